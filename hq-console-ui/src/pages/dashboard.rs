//! Dashboard Page
//!
//! Center overview: income, membership allowance, activity, commissions and
//! marketing services.

use leptos::*;

use hq_console::dashboard::{
    format_count, format_euro, format_euro_compact, format_percent, DashboardHeader,
    DashboardSummary, MembershipGauge, Referrer,
};

use crate::state::use_global_state;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_global_state();
    let summary = store_value(DashboardSummary::sample());

    let month = chrono::Local::now().format("%B %Y").to_string();
    let header = move || state.user.with(|user| DashboardHeader::for_user(user.as_ref()));

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-500 mt-1">
                        "Center "{move || header().center_id}" · "{month}
                    </p>
                </div>
                <span class="px-3 py-1 rounded-full bg-amber-100 text-amber-800 text-sm font-medium">
                    {move || header().level.label()}
                </span>
            </div>

            <div class="grid md:grid-cols-2 gap-6">
                <IncomeTable summary=summary />
                <MembershipCard gauge=summary.with_value(|s| s.membership) />
            </div>

            <ActivityStrip summary=summary />

            <div class="grid md:grid-cols-3 gap-6">
                <div class="md:col-span-2">
                    <CommissionTable summary=summary />
                </div>
                <MarketingCard summary=summary />
            </div>
        </div>
    }
}

#[component]
fn IncomeTable(summary: StoredValue<DashboardSummary>) -> impl IntoView {
    view! {
        <section class="bg-white rounded-xl shadow p-6">
            <h2 class="text-lg font-semibold mb-4">"Income"</h2>
            <table class="w-full text-sm">
                <thead class="text-gray-500">
                    <tr>
                        <th class="text-left font-normal pb-2"></th>
                        <th class="text-right font-normal pb-2">"This month"</th>
                        <th class="text-right font-normal pb-2">"This year"</th>
                    </tr>
                </thead>
                <tbody>
                    {summary.with_value(|s| {
                        s.income
                            .iter()
                            .map(|row| view! {
                                <tr class="border-t">
                                    <td class="py-2">{row.kind.label()}</td>
                                    <td class="py-2 text-right">{format_euro_compact(row.month)}</td>
                                    <td class="py-2 text-right">{format_euro_compact(row.year)}</td>
                                </tr>
                            })
                            .collect_view()
                    })}
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn MembershipCard(gauge: MembershipGauge) -> impl IntoView {
    let width = format!("width: {:.1}%", gauge.percent());

    view! {
        <section class="bg-white rounded-xl shadow p-6">
            <h2 class="text-lg font-semibold mb-1">"Membership remaining"</h2>
            <p class="text-3xl font-bold mb-4">
                {format_count(gauge.remaining as u64)}
                <span class="text-base font-normal text-gray-500">
                    {format!(" / {}", format_count(gauge.capacity as u64))}
                </span>
            </p>
            <div class="h-3 bg-gray-200 rounded-full overflow-hidden">
                <div class="h-full bg-blue-600" style=width />
            </div>
            <div class="flex justify-between text-xs text-gray-400 mt-1">
                {MembershipGauge::TICKS
                    .iter()
                    .map(|tick| view! { <span>{tick.to_string()}</span> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn ActivityStrip(summary: StoredValue<DashboardSummary>) -> impl IntoView {
    let activity = summary.with_value(|s| s.activity);
    let items = [
        ("Pitches made this month", activity.pitches_this_month),
        ("Test drives this month", activity.test_drives_this_month),
        ("Total members", activity.total_members),
        ("Total leads", activity.total_leads),
    ];

    view! {
        <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {items
                .into_iter()
                .map(|(label, value)| view! {
                    <div class="bg-white rounded-xl shadow p-4">
                        <div class="text-sm text-gray-500">{label}</div>
                        <div class="text-2xl font-bold mt-1">{format_count(value)}</div>
                    </div>
                })
                .collect_view()}
        </section>
    }
}

#[component]
fn CommissionTable(summary: StoredValue<DashboardSummary>) -> impl IntoView {
    let (referrer, set_referrer) = create_signal(None::<Referrer>);

    view! {
        <section class="bg-white rounded-xl shadow p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-lg font-semibold">"Commissions"</h2>
                <select
                    class="border rounded px-2 py-1 text-sm"
                    on:change=move |ev| set_referrer.set(Referrer::from_value(&event_target_value(&ev)))
                >
                    <option value="">"All referrers"</option>
                    {Referrer::ALL
                        .iter()
                        .map(|r| view! { <option value=r.value()>{r.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            <table class="w-full text-sm">
                <thead class="text-gray-500">
                    <tr>
                        <th class="text-left font-normal pb-2">"Sales date"</th>
                        <th class="text-left font-normal pb-2">"Company"</th>
                        <th class="text-left font-normal pb-2">"Referrer"</th>
                        <th class="text-right font-normal pb-2">"Amount"</th>
                        <th class="text-right font-normal pb-2">"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || summary.with_value(|s| {
                        s.commissions_for(referrer.get())
                            .into_iter()
                            .map(|row| view! {
                                <tr class="border-t">
                                    <td class="py-2">{row.sales_date.format("%d/%m/%Y").to_string()}</td>
                                    <td class="py-2">{row.company.clone()}</td>
                                    <td class="py-2">{row.referrer_name.clone()}</td>
                                    <td class="py-2 text-right">{format_euro(row.amount)}</td>
                                    <td class="py-2 text-right">
                                        {if row.paid { "Paid" } else { "Pending" }}
                                    </td>
                                </tr>
                            })
                            .collect_view()
                    })}
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn MarketingCard(summary: StoredValue<DashboardSummary>) -> impl IntoView {
    let marketing = summary.with_value(|s| s.marketing);

    view! {
        <section class="bg-white rounded-xl shadow p-6 space-y-4">
            <h2 class="text-lg font-semibold">"Marketing services"</h2>
            <div>
                <div class="text-sm text-gray-500">"Members reached"</div>
                <div class="text-2xl font-bold">
                    {format_count(marketing.members_reached)}
                    <span class="text-base font-normal text-gray-500 ml-2">
                        {format_percent(marketing.members_share)}
                    </span>
                </div>
            </div>
            <div>
                <div class="text-sm text-gray-500">"Ad spend commission"</div>
                <div class="text-2xl font-bold">{format_percent(marketing.ad_spend_commission)}</div>
            </div>
        </section>
    }
}
