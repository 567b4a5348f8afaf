//! Dashboard View Model
//!
//! Figures shown on the center dashboard and the formatting rules for them.
//! The API has no dashboard endpoint yet, so `DashboardSummary::sample`
//! carries the figures the page displays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{Level, User};

/// Income categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeKind {
    MembershipSales,
    AiCenterReferrals,
    MarketingServices,
    TotalIncome,
}

impl IncomeKind {
    pub fn label(&self) -> &'static str {
        match self {
            IncomeKind::MembershipSales => "Membership sales",
            IncomeKind::AiCenterReferrals => "AI center referrals",
            IncomeKind::MarketingServices => "Marketing services",
            IncomeKind::TotalIncome => "Total income",
        }
    }
}

/// One row of the income table, in whole euros
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IncomeRow {
    pub kind: IncomeKind,
    pub month: u64,
    pub year: u64,
}

/// Who brought in a commission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Referrer {
    SalesRep1,
    SalesRep2,
    Instructor,
}

impl Referrer {
    pub const ALL: [Referrer; 3] = [Referrer::SalesRep1, Referrer::SalesRep2, Referrer::Instructor];

    pub fn label(&self) -> &'static str {
        match self {
            Referrer::SalesRep1 => "Sales Rep 1",
            Referrer::SalesRep2 => "Sales Rep 2",
            Referrer::Instructor => "Instructor",
        }
    }

    /// Value of the select option
    pub fn value(&self) -> &'static str {
        match self {
            Referrer::SalesRep1 => "1",
            Referrer::SalesRep2 => "2",
            Referrer::Instructor => "3",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.value() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommissionRow {
    pub sales_date: NaiveDate,
    pub company: String,
    pub referrer_name: String,
    pub referrer: Referrer,
    pub amount: u64,
    pub paid: bool,
}

/// Membership slots left out of the current allowance
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MembershipGauge {
    pub remaining: u32,
    pub capacity: u32,
}

impl MembershipGauge {
    pub const TICKS: [u32; 5] = [0, 25, 50, 75, 100];

    /// Fill of the bar, 0 to 100
    pub fn percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        (self.remaining as f64 / self.capacity as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Monthly activity strip
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ActivityStats {
    pub pitches_this_month: u64,
    pub test_drives_this_month: u64,
    pub total_members: u64,
    pub total_leads: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MarketingStats {
    pub members_reached: u64,
    /// Share of members reached, in percent
    pub members_share: f64,
    /// Latest ad-spend commission rate, in percent
    pub ad_spend_commission: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardSummary {
    pub income: Vec<IncomeRow>,
    pub membership: MembershipGauge,
    pub activity: ActivityStats,
    pub commissions: Vec<CommissionRow>,
    pub marketing: MarketingStats,
}

/// Identity block at the top of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardHeader {
    pub center_id: String,
    pub level: Level,
}

impl DashboardHeader {
    pub fn for_user(user: Option<&User>) -> Self {
        Self {
            center_id: user
                .and_then(|u| u.center_id.clone())
                .unwrap_or_else(|| "—".to_string()),
            level: user.and_then(|u| u.level).unwrap_or(Level::Bronze),
        }
    }
}

impl DashboardSummary {
    pub fn sample() -> Self {
        Self {
            income: vec![
                IncomeRow {
                    kind: IncomeKind::MembershipSales,
                    month: 2_000,
                    year: 10_000,
                },
                IncomeRow {
                    kind: IncomeKind::AiCenterReferrals,
                    month: 10_000,
                    year: 100_300,
                },
                IncomeRow {
                    kind: IncomeKind::MarketingServices,
                    month: 500_000,
                    year: 750_700,
                },
                IncomeRow {
                    kind: IncomeKind::TotalIncome,
                    month: 2_000,
                    year: 10_000,
                },
            ],
            membership: MembershipGauge {
                remaining: 80,
                capacity: 100,
            },
            activity: ActivityStats {
                pitches_this_month: 500,
                test_drives_this_month: 100,
                total_members: 500,
                total_leads: 5_000,
            },
            commissions: vec![
                commission(2023, 2, 13, "ABC", "Amy Adams", Referrer::SalesRep1, 300),
                commission(2023, 2, 14, "DEF", "Barry Brad", Referrer::SalesRep2, 3_000),
                commission(2023, 3, 15, "GHI", "Cindy Craw", Referrer::Instructor, 300),
            ],
            marketing: MarketingStats {
                members_reached: 500,
                members_share: 33.0,
                ad_spend_commission: 1.3,
            },
        }
    }

    /// Commission rows, optionally narrowed to one referrer
    pub fn commissions_for(&self, referrer: Option<Referrer>) -> Vec<&CommissionRow> {
        self.commissions
            .iter()
            .filter(|row| referrer.map_or(true, |r| row.referrer == r))
            .collect()
    }
}

fn commission(
    y: i32,
    m: u32,
    d: u32,
    company: &str,
    name: &str,
    referrer: Referrer,
    amount: u64,
) -> CommissionRow {
    CommissionRow {
        sales_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
        company: company.to_string(),
        referrer_name: name.to_string(),
        referrer,
        amount,
        paid: true,
    }
}

// ============================================
// Formatting
// ============================================

/// Thousands separators: 5000 -> "5,000"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Full euro amount: 3000 -> "€3,000"
pub fn format_euro(amount: u64) -> String {
    format!("€{}", format_count(amount))
}

/// Compact euro amount: 2000 -> "€2K", 100300 -> "€100.3K"
pub fn format_euro_compact(amount: u64) -> String {
    let (value, suffix) = if amount >= 1_000_000 {
        (amount as f64 / 1_000_000.0, "M")
    } else if amount >= 1_000 {
        (amount as f64 / 1_000.0, "K")
    } else {
        return format!("€{}", amount);
    };

    let rounded = format!("{:.1}", value);
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("€{}{}", trimmed, suffix)
}

/// Percentage with at most one decimal: 33.0 -> "33%", 1.3 -> "1.3%"
pub fn format_percent(value: f64) -> String {
    let rounded = format!("{:.1}", value);
    format!("{}%", rounded.strip_suffix(".0").unwrap_or(&rounded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(500), "500");
        assert_eq!(format_count(5_000), "5,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_euro_compact() {
        assert_eq!(format_euro_compact(300), "€300");
        assert_eq!(format_euro_compact(2_000), "€2K");
        assert_eq!(format_euro_compact(100_300), "€100.3K");
        assert_eq!(format_euro_compact(750_700), "€750.7K");
        assert_eq!(format_euro_compact(1_240_000), "€1.2M");
    }

    #[test]
    fn test_format_euro_and_percent() {
        assert_eq!(format_euro(3_000), "€3,000");
        assert_eq!(format_percent(33.0), "33%");
        assert_eq!(format_percent(1.3), "1.3%");
    }

    #[test]
    fn test_header_defaults() {
        let header = DashboardHeader::for_user(None);
        assert_eq!(header.level, Level::Bronze);
        assert_eq!(header.center_id, "—");

        let user = User {
            id: "u1".to_string(),
            name: "Amy".to_string(),
            email: "amy@center.eu".to_string(),
            role: "admin".to_string(),
            center_id: Some("C-042".to_string()),
            level: Some(Level::Gold),
        };
        let header = DashboardHeader::for_user(Some(&user));
        assert_eq!(header.center_id, "C-042");
        assert_eq!(header.level, Level::Gold);
    }

    #[test]
    fn test_sample_summary() {
        let summary = DashboardSummary::sample();
        assert_eq!(summary.income.len(), 4);
        assert_eq!(summary.income[3].kind, IncomeKind::TotalIncome);
        assert_eq!(summary.membership.percent(), 80.0);
        assert_eq!(summary.commissions_for(None).len(), 3);
        assert_eq!(summary.commissions_for(Some(Referrer::Instructor)).len(), 1);
    }

    #[test]
    fn test_referrer_select_values() {
        assert_eq!(Referrer::from_value("2"), Some(Referrer::SalesRep2));
        assert_eq!(Referrer::from_value(""), None);
    }

    #[test]
    fn test_empty_gauge() {
        let gauge = MembershipGauge {
            remaining: 5,
            capacity: 0,
        };
        assert_eq!(gauge.percent(), 0.0);
    }
}
