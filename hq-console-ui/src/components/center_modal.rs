//! New Center Modal
//!
//! Form dialog behind the "NEW CENTER" button. Validates with
//! `NewCenterForm` before posting to the API.

use leptos::*;

use hq_console::api::Level;
use hq_console::countries::COUNTRIES;
use hq_console::validation::{FormErrors, NewCenterForm};

use crate::api;
use crate::state::use_global_state;

#[component]
pub fn NewCenterModal(
    open: RwSignal<bool>,
    /// Called after the center was created
    on_created: Callback<()>,
) -> impl IntoView {
    let state = use_global_state();

    let form = create_rw_signal(NewCenterForm {
        level: Level::Bronze.as_str().to_string(),
        ..Default::default()
    });
    let errors = create_rw_signal(FormErrors::default());
    let (submitting, set_submitting) = create_signal(false);

    let close = move || {
        open.set(false);
        form.set(NewCenterForm {
            level: Level::Bronze.as_str().to_string(),
            ..Default::default()
        });
        errors.set(FormErrors::default());
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let input = match form.with(NewCenterForm::validate) {
            Ok(input) => input,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FormErrors::default());
        set_submitting.set(true);

        spawn_local(async move {
            match api::add_center(&input).await {
                Ok(reply) => {
                    let message = if reply.message.is_empty() {
                        format!("Center {} created", input.center_id)
                    } else {
                        reply.message
                    };
                    state.show_success(&message);
                    close();
                    on_created.call(());
                }
                Err(e) => state.show_api_error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="fixed inset-0 z-40 bg-black/40 flex items-center justify-center">
                <form class="bg-white rounded-xl shadow-xl w-full max-w-md p-6 space-y-4" on:submit=on_submit>
                    <h2 class="text-xl font-semibold">"New Center"</h2>

                    <TextField
                        label="Center ID"
                        field="center_id"
                        value=Signal::derive(move || form.with(|f| f.center_id.clone()))
                        on_input=move |v| form.update(|f| f.center_id = v)
                        errors=errors
                    />
                    <TextField
                        label="City"
                        field="city"
                        value=Signal::derive(move || form.with(|f| f.city.clone()))
                        on_input=move |v| form.update(|f| f.city = v)
                        errors=errors
                    />

                    <label class="block">
                        <span class="text-sm text-gray-600">"Country"</span>
                        <select
                            class="mt-1 w-full border rounded px-3 py-2"
                            on:change=move |ev| form.update(|f| f.country = event_target_value(&ev))
                        >
                            <option value="" selected=move || form.with(|f| f.country.is_empty())>
                                "Select a country"
                            </option>
                            {COUNTRIES
                                .iter()
                                .filter(|c| !c.is_all())
                                .map(|c| view! { <option value=c.label>{c.label}</option> })
                                .collect_view()}
                        </select>
                        <FieldHelp field="country" errors=errors />
                    </label>

                    <TextField
                        label="Referer Center ID"
                        field="referer_center_id"
                        value=Signal::derive(move || form.with(|f| f.referer_center_id.clone()))
                        on_input=move |v| form.update(|f| f.referer_center_id = v)
                        errors=errors
                    />

                    <label class="block">
                        <span class="text-sm text-gray-600">"Level"</span>
                        <select
                            class="mt-1 w-full border rounded px-3 py-2"
                            on:change=move |ev| form.update(|f| f.level = event_target_value(&ev))
                        >
                            {Level::ALL
                                .iter()
                                .map(|level| {
                                    let level = *level;
                                    view! {
                                        <option
                                            value=level.as_str()
                                            selected=move || form.with(|f| f.level == level.as_str())
                                        >
                                            {level.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <FieldHelp field="level" errors=errors />
                    </label>

                    <div class="flex justify-end space-x-2 pt-2">
                        <button
                            type="button"
                            class="px-4 py-2 rounded-lg text-gray-600 hover:bg-gray-100"
                            on:click=move |_| close()
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="px-4 py-2 rounded-lg bg-blue-600 text-white hover:bg-blue-700 disabled:opacity-50"
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() { "Saving..." } else { "Create" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[component]
fn TextField(
    label: &'static str,
    field: &'static str,
    value: Signal<String>,
    on_input: impl Fn(String) + 'static,
    errors: RwSignal<FormErrors>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="text-sm text-gray-600">{label}</span>
            <input
                type="text"
                class="mt-1 w-full border rounded px-3 py-2"
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            <FieldHelp field=field errors=errors />
        </label>
    }
}

#[component]
fn FieldHelp(field: &'static str, errors: RwSignal<FormErrors>) -> impl IntoView {
    move || {
        errors
            .with(|e| e.message(field))
            .map(|message| view! { <p class="mt-1 text-xs text-red-600">{message}</p> })
    }
}
