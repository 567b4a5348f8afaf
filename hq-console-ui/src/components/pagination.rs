//! Table Pagination
//!
//! Rows-per-page select, displayed range and first / prev / next / last
//! buttons for a `ListState` signal.

use leptos::*;

use hq_console::api::RowsPerPage;
use hq_console::table::ListState;

#[component]
pub fn TablePagination(
    state: RwSignal<ListState>,
    /// Filtered row count from the last response
    #[prop(into)]
    filtered: Signal<u64>,
) -> impl IntoView {
    let on_rows = move |ev| {
        let value: i64 = event_target_value(&ev).parse().unwrap_or(5);
        if let Some(rows) = RowsPerPage::from_wire(value) {
            state.update(|s| {
                s.set_rows_per_page(rows);
            });
        }
    };

    view! {
        <div class="flex items-center justify-end space-x-6 px-4 py-3 text-sm text-gray-600">
            <label class="flex items-center space-x-2">
                <span>"Rows per page:"</span>
                <select class="border rounded px-2 py-1" on:change=on_rows>
                    {RowsPerPage::OPTIONS
                        .iter()
                        .map(|rows| {
                            let rows = *rows;
                            view! {
                                <option
                                    value=rows.as_wire().to_string()
                                    selected=move || state.with(|s| s.rows_per_page == rows)
                                >
                                    {rows.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>

            <span>{move || state.with(|s| s.displayed_range(filtered.get()))}</span>

            <div class="flex items-center space-x-1">
                <PageButton
                    label="⏮"
                    title="First page"
                    disabled=Signal::derive(move || !state.with(|s| s.can_prev()))
                    on_click=move || state.update(|s| { s.first(); })
                />
                <PageButton
                    label="‹"
                    title="Previous page"
                    disabled=Signal::derive(move || !state.with(|s| s.can_prev()))
                    on_click=move || state.update(|s| { s.prev(); })
                />
                <PageButton
                    label="›"
                    title="Next page"
                    disabled=Signal::derive(move || !state.with(|s| s.can_next(filtered.get())))
                    on_click=move || state.update(|s| { s.next(filtered.get_untracked()); })
                />
                <PageButton
                    label="⏭"
                    title="Last page"
                    disabled=Signal::derive(move || !state.with(|s| s.can_next(filtered.get())))
                    on_click=move || state.update(|s| { s.last(filtered.get_untracked()); })
                />
            </div>
        </div>
    }
}

#[component]
fn PageButton(
    label: &'static str,
    title: &'static str,
    disabled: Signal<bool>,
    on_click: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <button
            class="px-2 py-1 rounded hover:bg-gray-100 disabled:opacity-40 disabled:cursor-not-allowed"
            title=title
            disabled=move || disabled.get()
            on:click=move |_| on_click()
        >
            {label}
        </button>
    }
}
