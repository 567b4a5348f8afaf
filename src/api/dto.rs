//! Wire Types
//!
//! Request and response bodies for the HQ REST API, plus the query-string
//! builders for the filtered list endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================
// Envelopes
// ============================================

/// Most list endpoints wrap their payload in `{ "data": ... }`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Plain status/message reply returned by mutations
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GenericResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

// ============================================
// Auth
// ============================================

/// Credentials posted to `auth/login`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub center_id: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
}

/// `users/me` answers `{ "data": { "user": ... } }`
#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub user: User,
}

// ============================================
// Centers
// ============================================

/// Center membership level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Bronze, Level::Silver, Level::Gold, Level::Platinum];

    /// Value used on the wire and in select inputs
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Bronze => "bronze",
            Level::Silver => "silver",
            Level::Gold => "gold",
            Level::Platinum => "platinum",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Level::Bronze => "Bronze",
            Level::Silver => "Silver",
            Level::Gold => "Gold",
            Level::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bronze" => Ok(Level::Bronze),
            "silver" => Ok(Level::Silver),
            "gold" => Ok(Level::Gold),
            "platinum" => Ok(Level::Platinum),
            other => Err(format!("Unknown level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl Address {
    /// "City Country", as shown in the table
    pub fn display(&self) -> String {
        format!("{} {}", self.city, self.country).trim().to_string()
    }
}

/// One row of the HQ clients (centers) table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CenterTableItem {
    pub center_id: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub referer_center_id: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub purchases: Option<u64>,
}

/// Payload of `centers/filter`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CenterPage {
    pub total_counts: u64,
    pub filtered_counts: u64,
    #[serde(default)]
    pub centers: Vec<CenterTableItem>,
}

/// Body posted to `centers` by the "NEW CENTER" form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCenterInput {
    pub center_id: String,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer_center_id: Option<String>,
    pub level: Level,
}

// ============================================
// Clients
// ============================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Client {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub center_id: Option<String>,
    #[serde(default)]
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientTableItem {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub center_id: Option<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payload of `clients/filter`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ClientPage {
    pub total_counts: u64,
    pub filtered_counts: u64,
    #[serde(default)]
    pub clients: Vec<ClientTableItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewClientInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub center_id: String,
    pub address: Address,
}

// ============================================
// Filters
// ============================================

/// Page size for filtered lists. `All` goes over the wire as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowsPerPage {
    Count(u32),
    All,
}

impl RowsPerPage {
    pub const OPTIONS: [RowsPerPage; 4] = [
        RowsPerPage::Count(5),
        RowsPerPage::Count(10),
        RowsPerPage::Count(25),
        RowsPerPage::All,
    ];

    pub fn as_wire(&self) -> i64 {
        match self {
            RowsPerPage::Count(n) => *n as i64,
            RowsPerPage::All => -1,
        }
    }

    /// Parse the select value; anything negative means all rows
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            v if v < 0 => Some(RowsPerPage::All),
            0 => None,
            v => u32::try_from(v).ok().map(RowsPerPage::Count),
        }
    }

    pub fn label(&self) -> String {
        match self {
            RowsPerPage::Count(n) => n.to_string(),
            RowsPerPage::All => "All".to_string(),
        }
    }
}

impl Default for RowsPerPage {
    fn default() -> Self {
        RowsPerPage::Count(5)
    }
}

/// Query parameters for `centers/filter`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CenterFilter {
    pub page: u32,
    pub rows_per_page: RowsPerPage,
    pub country: String,
    pub level: Option<Level>,
    pub search: String,
}

impl CenterFilter {
    /// Query string, without the leading `?`
    pub fn to_query(&self) -> String {
        let level = self.level.map(|l| l.as_str()).unwrap_or("");
        build_query(&[
            ("page", self.page.to_string()),
            ("rowsperPage", self.rows_per_page.as_wire().to_string()),
            ("country", self.country.clone()),
            ("level", level.to_string()),
            ("search", self.search.clone()),
        ])
    }
}

/// Query parameters for `clients/filter`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClientFilter {
    pub page: u32,
    pub rows_per_page: RowsPerPage,
    pub country: String,
    pub center: String,
    pub search: String,
}

impl ClientFilter {
    pub fn to_query(&self) -> String {
        build_query(&[
            ("page", self.page.to_string()),
            ("rowsperPage", self.rows_per_page.as_wire().to_string()),
            ("country", self.country.clone()),
            ("center", self.center.clone()),
            ("search", self.search.clone()),
        ])
    }
}

fn build_query(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_filter_query_uses_wire_names() {
        let filter = CenterFilter {
            page: 2,
            rows_per_page: RowsPerPage::Count(10),
            country: "United States".to_string(),
            level: Some(Level::Gold),
            search: "a&b".to_string(),
        };

        assert_eq!(
            filter.to_query(),
            "page=2&rowsperPage=10&country=United%20States&level=gold&search=a%26b"
        );
    }

    #[test]
    fn test_default_filter_sends_empty_params() {
        let query = ClientFilter::default().to_query();
        assert_eq!(query, "page=0&rowsperPage=5&country=&center=&search=");
    }

    #[test]
    fn test_all_rows_is_minus_one() {
        let filter = CenterFilter {
            rows_per_page: RowsPerPage::All,
            ..Default::default()
        };
        assert!(filter.to_query().contains("rowsperPage=-1"));
        assert_eq!(RowsPerPage::from_wire(-1), Some(RowsPerPage::All));
        assert_eq!(RowsPerPage::from_wire(0), None);
        assert_eq!(RowsPerPage::from_wire(25), Some(RowsPerPage::Count(25)));
    }

    #[test]
    fn test_center_page_unwraps_envelope() {
        let body = r#"{
            "data": {
                "total_counts": 1200,
                "filtered_counts": 2,
                "centers": [
                    {"center_id": "C-001", "address": {"city": "Lyon", "country": "France"}, "referer_center_id": "C-000"},
                    {"center_id": "C-002", "address": {"city": "Porto", "country": "Portugal"}, "level": "silver"}
                ]
            }
        }"#;

        let page: Envelope<CenterPage> = serde_json::from_str(body).unwrap();
        assert_eq!(page.data.total_counts, 1200);
        assert_eq!(page.data.centers.len(), 2);
        assert_eq!(page.data.centers[0].address.display(), "Lyon France");
        assert_eq!(page.data.centers[1].referer_center_id, None);
        assert_eq!(page.data.centers[1].level, Some(Level::Silver));
    }

    #[test]
    fn test_new_center_nests_address() {
        let input = NewCenterInput {
            center_id: "C-010".to_string(),
            address: Address {
                city: "Madrid".to_string(),
                country: "Spain".to_string(),
            },
            referer_center_id: None,
            level: Level::Bronze,
        };

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["address"]["city"], "Madrid");
        assert_eq!(json["level"], "bronze");
        assert!(json.get("referer_center_id").is_none());
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("Platinum".parse::<Level>(), Ok(Level::Platinum));
        assert!("diamond".parse::<Level>().is_err());
        assert_eq!(Level::Silver.to_string(), "Silver");
    }
}
