//! Auth Guard
//!
//! Loads the signed-in user once and sends anonymous visitors to `/login`.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::Loading;
use crate::state::use_global_state;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    create_effect(move |_| {
        if state.user_checked.get() {
            return;
        }
        let navigate = navigate.clone();
        state.loading.set(true);
        spawn_local(async move {
            match api::fetch_me().await {
                Ok(user) => {
                    state.user.set(Some(user));
                    state.user_checked.set(true);
                }
                Err(e) => {
                    if !e.needs_login() {
                        state.show_api_error(&e);
                    }
                    navigate("/login", Default::default());
                }
            }
            state.loading.set(false);
        });
    });

    let children = store_value(children);

    view! {
        <Show
            when=move || state.user.with(Option::is_some)
            fallback=|| view! { <Loading caption="Checking session" /> }
        >
            {children.with_value(|children| children())}
        </Show>
    }
}
