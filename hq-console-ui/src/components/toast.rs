//! Toast Notification Component
//!
//! Stacks success and error messages in the bottom-right corner.

use leptos::*;

use crate::state::{use_global_state, ToastKind};

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2">
            <For
                each=move || state.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <ToastMessage
                            message=toast.message
                            kind=toast.kind
                            on_close=move || state.dismiss(id)
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    kind: ToastKind,
    on_close: impl Fn() + 'static,
) -> impl IntoView {
    let (icon, bg_class) = match kind {
        ToastKind::Success => ("✓", "bg-green-600"),
        ToastKind::Error => ("✕", "bg-red-600"),
    };

    view! {
        <div class=format!(
            "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
             transform transition-all duration-300 ease-out animate-slide-in",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
            <button class="ml-2 text-white/70 hover:text-white" on:click=move |_| on_close()>
                "×"
            </button>
        </div>
    }
}
