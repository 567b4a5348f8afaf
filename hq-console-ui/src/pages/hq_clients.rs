//! HQ Clients Page
//!
//! Paged table of franchise centers with country, level and search filters.
//! Every change to the list state re-runs the query; responses for
//! superseded queries are dropped by the controller.

use leptos::*;
use leptos_router::*;

use hq_console::api::{CenterPage, CenterTableItem, Level};
use hq_console::countries::{self, COUNTRIES};
use hq_console::dashboard::format_count;
use hq_console::table::{ListController, ListState};

use crate::api;
use crate::components::{InlineLoading, NewCenterModal, TablePagination};
use crate::state::use_global_state;

const COLUMNS: usize = 5;

#[component]
pub fn HqClients() -> impl IntoView {
    let global = use_global_state();
    let navigate = use_navigate();

    let state = create_rw_signal(ListState::new());
    let results = create_rw_signal(ListController::<CenterPage>::default());
    let modal_open = create_rw_signal(false);

    // Lazy query: fires whenever the list state changes
    create_effect(move |_| {
        let snapshot = state.get();
        let Some(query) = results
            .try_update(|c| {
                c.state = snapshot;
                c.begin()
            })
            .flatten()
        else {
            return;
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::filter_centers(&query).await;
            let error = result.as_ref().err().cloned();

            let current = results
                .try_update(|c| c.finish(&query, result))
                .unwrap_or(false);

            if let (true, Some(e)) = (current, error) {
                global.show_api_error(&e);
                if e.needs_login() {
                    global.sign_out();
                    navigate("/login", Default::default());
                }
            }
        });
    });

    let filtered = Signal::derive(move || {
        results.with(|c| c.data().map(|p| p.filtered_counts).unwrap_or(0))
    });
    let total = move || results.with(|c| c.data().map(|p| p.total_counts).unwrap_or(0));

    let on_created = Callback::new(move |_| {
        results.update(|c| c.invalidate());
        // Same state, new key: re-run the effect
        state.update(|_| {});
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"HQ Clients"</h1>
                    <p class="text-gray-500 mt-1">
                        {move || format_count(total())}" centers"
                    </p>
                </div>
                <button
                    class="px-4 py-2 rounded-lg bg-blue-600 text-white font-medium hover:bg-blue-700"
                    on:click=move |_| modal_open.set(true)
                >
                    "NEW CENTER"
                </button>
            </div>

            <Filters state=state />

            <section class="bg-white rounded-xl shadow overflow-hidden">
                <table class="w-full text-sm">
                    <thead class="bg-gray-50 text-gray-500">
                        <tr>
                            <th class="text-left font-medium px-4 py-3">"Center ID"</th>
                            <th class="text-left font-medium px-4 py-3">"Address"</th>
                            <th class="text-left font-medium px-4 py-3">"Referer Center"</th>
                            <th class="text-left font-medium px-4 py-3">"Level"</th>
                            <th class="text-right font-medium px-4 py-3">
                                "Purchases"
                                {move || results.with(|c| c.is_loading()).then(|| view! {
                                    <span class="ml-2"><InlineLoading /></span>
                                })}
                            </th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || results.with(|c| {
                            c.data()
                                .map(|page| page.centers.iter().map(center_row).collect_view())
                        })}
                        {move || {
                            let filtered = results.with(|c| c.data().map(|p| p.filtered_counts));
                            let height = state.with(|s| s.padding_height(filtered));
                            (height > 0).then(|| view! {
                                <tr style=format!("height: {}px", height)>
                                    <td colspan=COLUMNS.to_string() />
                                </tr>
                            })
                        }}
                    </tbody>
                </table>

                <TablePagination state=state filtered=filtered />
            </section>

            <NewCenterModal open=modal_open on_created=on_created />
        </div>
    }
}

fn center_row(center: &CenterTableItem) -> impl IntoView {
    view! {
        <tr class="border-t hover:bg-gray-50">
            <td class="px-4 py-3 font-medium">{center.center_id.clone()}</td>
            <td class="px-4 py-3">{center.address.display()}</td>
            <td class="px-4 py-3">
                {center.referer_center_id.clone().unwrap_or_else(|| "-".to_string())}
            </td>
            <td class="px-4 py-3">{center.level.map(|l| l.label()).unwrap_or("-")}</td>
            <td class="px-4 py-3 text-right">
                {center.purchases.map(format_count).unwrap_or_else(|| "-".to_string())}
            </td>
        </tr>
    }
}

#[component]
fn Filters(state: RwSignal<ListState>) -> impl IntoView {
    let selected_country = move || state.with(|s| countries::find(&s.country));

    view! {
        <div class="flex flex-wrap items-center gap-4">
            <label class="flex items-center space-x-2">
                {move || selected_country()
                    .and_then(|c| c.flag_url().map(|url| (url, c.flag_srcset())))
                    .map(|(url, srcset)| view! {
                        <img src=url srcset=srcset width="20" alt="" />
                    })}
                <select
                    class="border rounded px-3 py-2"
                    on:change=move |ev| state.update(|s| {
                        s.set_country(event_target_value(&ev));
                    })
                >
                    {COUNTRIES
                        .iter()
                        .map(|c| {
                            let value = c.filter_value();
                            view! {
                                <option
                                    value=value
                                    selected=move || state.with(|s| s.country == value)
                                >
                                    {c.label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>

            <select
                class="border rounded px-3 py-2"
                on:change=move |ev| state.update(|s| {
                    s.set_level(event_target_value(&ev).parse::<Level>().ok());
                })
            >
                <option value="">"All levels"</option>
                {Level::ALL
                    .iter()
                    .map(|level| view! { <option value=level.as_str()>{level.label()}</option> })
                    .collect_view()}
            </select>

            <input
                type="search"
                placeholder="Search center ID"
                class="border rounded px-3 py-2 flex-1 min-w-[12rem]"
                prop:value=move || state.with(|s| s.search.clone())
                on:input=move |ev| state.update(|s| {
                    s.set_search(event_target_value(&ev));
                })
            />
        </div>
    }
}
