//! Navigation Component
//!
//! Sidebar with the console sections, the signed-in user and logout.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::use_global_state;

/// Navigation sidebar component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                state.show_api_error(&e);
            }
            state.sign_out();
            navigate("/login", Default::default());
        });
    };

    view! {
        <nav class="w-60 min-h-screen bg-gray-900 text-gray-100 flex flex-col">
            <A href="/" class="flex items-center space-x-3 px-6 h-16 border-b border-gray-800">
                <span class="text-xl font-bold">"HQ Console"</span>
            </A>

            <div class="flex-1 px-3 py-4 space-y-1">
                <NavLink href="/" label="Dashboard" />
                <NavLink href="/admin/hqclients" label="HQ Clients" />
            </div>

            <div class="px-6 py-4 border-t border-gray-800 text-sm">
                {move || state.user.get().map(|user| view! {
                    <div class="mb-3">
                        <div class="font-medium">{user.name}</div>
                        <div class="text-gray-400">{user.email}</div>
                    </div>
                })}
                <button
                    class="w-full px-4 py-2 rounded-lg bg-gray-800 hover:bg-gray-700 transition-colors"
                    on:click=on_logout
                >
                    "Logout"
                </button>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="block px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-800 transition-colors"
            active_class="bg-gray-800 text-white"
        >
            {label}
        </A>
    }
}
