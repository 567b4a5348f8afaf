//! Spinners shown while the API answers

use leptos::*;

/// Centered spinner with a caption, used while a page waits for `users/me`
#[component]
pub fn Loading(
    #[prop(default = "Loading")]
    caption: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center gap-3 min-h-[40vh] text-gray-500">
            <span class="h-10 w-10 rounded-full border-4 border-blue-200 border-t-blue-600 animate-spin" />
            <span class="text-sm">{caption}</span>
        </div>
    }
}

/// Small spinner that sits next to a table header
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span
            class="inline-block h-3 w-3 align-middle rounded-full border-2 border-gray-300 border-t-blue-600 animate-spin"
            title="Refreshing"
        />
    }
}
