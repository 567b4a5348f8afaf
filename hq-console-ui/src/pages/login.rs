//! Login Page
//!
//! Email and password form. Validates on submit, then signs in and loads
//! the user before going to the dashboard.

use leptos::*;
use leptos_router::*;

use hq_console::validation::{login_helper_text, FormErrors, LoginForm};

use crate::api;
use crate::state::use_global_state;

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let errors = create_rw_signal(FormErrors::default());
    let (submitting, set_submitting) = create_signal(false);
    let (api_url, set_api_url) = create_signal(api::get_api_base());

    let save_api_url = move |_| {
        let url = api_url.get();
        let url = match url.trim() {
            "" => api::DEFAULT_API_BASE,
            url => url,
        };
        api::set_api_base(url);
        set_api_url.set(api::get_api_base());
        state.show_success("API server saved");
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let request = match LoginForm::new(email.get(), password.get()).validate() {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FormErrors::default());
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&request).await {
                Ok(reply) => {
                    state.show_success(&success_toast(&reply.message));
                    match api::fetch_me().await {
                        Ok(user) => {
                            state.user.set(Some(user));
                            state.user_checked.set(true);
                            navigate("/", Default::default());
                        }
                        Err(e) => state.show_api_error(&e),
                    }
                }
                Err(e) => state.show_api_error(&e),
            }
            set_submitting.set(false);
        });
    };

    let helper = move |field: &'static str| {
        move || {
            errors
                .with(|e| login_helper_text(e, field))
                .map(|text| view! { <p class="mt-1 text-xs text-red-600">{text}</p> })
        }
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100">
            <form class="bg-white rounded-xl shadow-lg w-full max-w-sm p-8 space-y-5" on:submit=on_submit>
                <div>
                    <h1 class="text-2xl font-bold">"Sign in"</h1>
                    <p class="text-gray-500 text-sm mt-1">"HQ Console"</p>
                </div>

                <label class="block">
                    <span class="text-sm text-gray-600">"Email"</span>
                    <input
                        type="email"
                        autocomplete="email"
                        class="mt-1 w-full border rounded px-3 py-2"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    {helper("email")}
                </label>

                <label class="block">
                    <span class="text-sm text-gray-600">"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        class="mt-1 w-full border rounded px-3 py-2"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    {helper("password")}
                </label>

                <button
                    type="submit"
                    class="w-full py-2 rounded-lg bg-blue-600 text-white font-medium hover:bg-blue-700 disabled:opacity-50"
                    disabled=move || submitting.get()
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>

                <details class="text-sm text-gray-500">
                    <summary class="cursor-pointer">"API server"</summary>
                    <div class="flex items-center gap-2 mt-2">
                        <input
                            type="url"
                            class="flex-1 border rounded px-2 py-1"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="px-3 py-1 rounded bg-gray-100 hover:bg-gray-200"
                            on:click=save_api_url
                        >
                            "Save"
                        </button>
                    </div>
                </details>
            </form>
        </div>
    }
}

/// Toast after a successful sign-in; the API may send no message
fn success_toast(message: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        "Signed in".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_toast_falls_back_when_message_missing() {
        assert_eq!(success_toast(""), "Signed in");
        assert_eq!(success_toast("  "), "Signed in");
        assert_eq!(success_toast("Welcome back"), "Welcome back");
    }
}
