//! Terminal rendering for list and dashboard output

use crate::api::{CenterPage, Client, ClientPage};
use crate::dashboard::{
    format_count, format_euro, format_euro_compact, format_percent, DashboardHeader,
    DashboardSummary, MembershipGauge, Referrer,
};
use crate::table::ListState;

/// Plain aligned text table
#[derive(Debug, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let line = |cells: &[String]| -> String {
            widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    let pad = w.saturating_sub(cell.chars().count());
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&line(&self.headers));
        out.push('\n');
        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }
}

fn or_dash(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| "—".to_string())
}

/// Centers page with its header count and pagination footer
pub fn render_centers(page: &CenterPage, state: &ListState) -> String {
    let mut table = TextTable::new([
        "CENTER ID",
        "CITY, COUNTRY",
        "REFERER CENTER ID",
        "LEVEL",
        "PURCHASES",
    ]);

    for center in &page.centers {
        table.row([
            center.center_id.clone(),
            center.address.display(),
            or_dash(center.referer_center_id.clone()),
            or_dash(center.level.map(|l| l.label().to_string())),
            or_dash(center.purchases.map(format_count)),
        ]);
    }

    format!(
        "CENTERS {}\n\n{}{}\n",
        format_count(page.total_counts),
        table.render(),
        footer(state, page.filtered_counts)
    )
}

pub fn render_client_page(page: &ClientPage, state: &ListState) -> String {
    let mut table = TextTable::new(["NAME", "CENTER ID", "CITY, COUNTRY", "STATUS"]);

    for client in &page.clients {
        table.row([
            client.name.clone(),
            or_dash(client.center_id.clone()),
            client.address.display(),
            or_dash(client.status.clone()),
        ]);
    }

    format!(
        "CLIENTS {}\n\n{}{}\n",
        format_count(page.total_counts),
        table.render(),
        footer(state, page.filtered_counts)
    )
}

pub fn render_clients(clients: &[Client]) -> String {
    let mut table = TextTable::new(["NAME", "EMAIL", "PHONE", "CENTER ID", "CITY, COUNTRY"]);

    for client in clients {
        table.row([
            client.name.clone(),
            or_dash(client.email.clone()),
            or_dash(client.phone.clone()),
            or_dash(client.center_id.clone()),
            client.address.display(),
        ]);
    }

    table.render()
}

fn footer(state: &ListState, filtered: u64) -> String {
    format!(
        "Rows per page: {}   {}   page {}/{}",
        state.rows_per_page.label(),
        state.displayed_range(filtered),
        state.page + 1,
        state.page_count(filtered)
    )
}

pub fn render_dashboard(
    header: &DashboardHeader,
    summary: &DashboardSummary,
    referrer: Option<Referrer>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Center ID  {}\n", header.center_id));
    out.push_str(&format!("Level      {}\n\n", header.level));

    let mut income = TextTable::new(["INCOME", "MONTH", "YEAR"]);
    for row in &summary.income {
        income.row([
            row.kind.label().to_string(),
            format_euro_compact(row.month),
            format_euro_compact(row.year),
        ]);
    }
    out.push_str(&income.render());
    out.push('\n');

    out.push_str(&format!(
        "Membership remaining: {}\n{}\n\n",
        summary.membership.remaining,
        gauge_bar(&summary.membership, 40)
    ));

    let a = &summary.activity;
    let mut activity = TextTable::new(["PITCHES (MONTH)", "TEST DRIVES (MONTH)", "TOTAL MEMBERS", "LEADS"]);
    activity.row([
        format_count(a.pitches_this_month),
        format_count(a.test_drives_this_month),
        format_count(a.total_members),
        format_count(a.total_leads),
    ]);
    out.push_str(&activity.render());
    out.push('\n');

    let mut commissions = TextTable::new(["SALES DATE", "COMPANY", "REFERRER", "AMOUNT", "PAID"]);
    for row in summary.commissions_for(referrer) {
        commissions.row([
            row.sales_date.format("%Y-%m-%d").to_string(),
            row.company.clone(),
            row.referrer_name.clone(),
            format_euro(row.amount),
            if row.paid { "yes" } else { "no" }.to_string(),
        ]);
    }
    out.push_str("COMMISSIONS");
    if let Some(r) = referrer {
        out.push_str(&format!(" ({})", r.label()));
    }
    out.push('\n');
    out.push_str(&commissions.render());
    out.push('\n');

    let m = &summary.marketing;
    out.push_str(&format!(
        "MARKETING SERVICES\nMembers reached   {}  {}\nLatest ad spending commission   {}\n",
        format_count(m.members_reached),
        format_percent(m.members_share),
        format_percent(m.ad_spend_commission)
    ));

    out
}

/// `[################........]` with tick labels below
fn gauge_bar(gauge: &MembershipGauge, width: usize) -> String {
    let filled = (gauge.percent() / 100.0 * width as f64).round() as usize;
    let bar = format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled.min(width)));

    let mut ticks = vec![' '; width + 2];
    let mut labels = String::new();
    for tick in MembershipGauge::TICKS {
        let pos = (tick as usize * width) / 100;
        if let Some(slot) = ticks.get_mut(pos + 1) {
            *slot = '|';
        }
        labels.push_str(&format!("{:<width$}", tick, width = width / 4));
    }

    format!("{}\n{}\n{}", bar, ticks.into_iter().collect::<String>().trim_end(), labels.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Address, CenterTableItem, Level, RowsPerPage};

    #[test]
    fn test_table_alignment() {
        let mut table = TextTable::new(["A", "LONG HEADER"]);
        table.row(["wide cell", "x"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "A          LONG HEADER");
        assert_eq!(lines[2], "wide cell  x");
    }

    #[test]
    fn test_render_centers() {
        let page = CenterPage {
            total_counts: 1_200,
            filtered_counts: 7,
            centers: vec![CenterTableItem {
                center_id: "C-006".to_string(),
                address: Address {
                    city: "Lyon".to_string(),
                    country: "France".to_string(),
                },
                referer_center_id: None,
                level: Some(Level::Gold),
                purchases: Some(1_500),
            }],
        };
        let state = ListState {
            page: 1,
            rows_per_page: RowsPerPage::Count(5),
            ..Default::default()
        };

        let out = render_centers(&page, &state);
        assert!(out.starts_with("CENTERS 1,200"));
        assert!(out.contains("Lyon France"));
        assert!(out.contains("Gold"));
        assert!(out.contains("1,500"));
        assert!(out.contains("6–7 of 7"));
        assert!(out.contains("page 2/2"));
    }

    #[test]
    fn test_render_dashboard() {
        let header = DashboardHeader::for_user(None);
        let out = render_dashboard(&header, &DashboardSummary::sample(), Some(Referrer::SalesRep2));

        assert!(out.contains("Level      Bronze"));
        assert!(out.contains("€100.3K"));
        assert!(out.contains("5,000"));
        assert!(out.contains("€3,000"));
        assert!(!out.contains("Amy Adams"));
        assert!(out.contains("33%"));
    }
}
