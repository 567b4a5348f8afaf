//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use hq_console::api::{ApiError, User};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Signed-in user, `None` until `users/me` answers
    pub user: RwSignal<Option<User>>,
    /// Whether `users/me` answered for the current session
    pub user_checked: RwSignal<bool>,
    /// Visible toast notifications, oldest first
    pub toasts: RwSignal<Vec<ToastEntry>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    next_toast_id: StoredValue<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn timeout_ms(&self) -> u32 {
        match self {
            ToastKind::Success => 3000,
            ToastKind::Error => 5000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        user: create_rw_signal(None),
        user_checked: create_rw_signal(false),
        toasts: create_rw_signal(Vec::new()),
        loading: create_rw_signal(false),
        next_toast_id: store_value(0),
    };

    provide_context(state);
}

/// Global state from context
pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.push_toast(ToastKind::Success, message);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
        self.push_toast(ToastKind::Error, message);
    }

    /// One error toast per message carried by the error
    pub fn show_api_error(&self, error: &ApiError) {
        for message in error.toasts() {
            self.show_error(&message);
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push_toast(&self, kind: ToastKind, message: &str) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id + 1);

        self.toasts.update(|toasts| {
            toasts.push(ToastEntry {
                id,
                kind,
                message: message.to_string(),
            })
        });

        let state = *self;
        gloo_timers::callback::Timeout::new(kind.timeout_ms(), move || {
            state.dismiss(id);
        })
        .forget();
    }

    /// Forget the signed-in user after logout or a 401
    pub fn sign_out(&self) {
        self.user.set(None);
        self.user_checked.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_toasts_outlive_success_toasts() {
        assert_eq!(ToastKind::Success.timeout_ms(), 3000);
        assert_eq!(ToastKind::Error.timeout_ms(), 5000);
    }
}
