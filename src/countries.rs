//! Country Options
//!
//! Options for the country filter. The first entry is "All", which has an
//! empty code and clears the filter.

/// One selectable country
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryOption {
    /// ISO 3166-1 alpha-2 code, empty for "All"
    pub code: &'static str,
    pub label: &'static str,
}

impl CountryOption {
    pub fn is_all(&self) -> bool {
        self.code.is_empty()
    }

    /// Value the list filter receives when this option is picked
    pub fn filter_value(&self) -> &'static str {
        if self.is_all() {
            ""
        } else {
            self.label
        }
    }

    /// 20px flag image
    pub fn flag_url(&self) -> Option<String> {
        (!self.is_all()).then(|| {
            format!("https://flagcdn.com/w20/{}.png", self.code.to_lowercase())
        })
    }

    /// `srcset` entry for high-density screens
    pub fn flag_srcset(&self) -> Option<String> {
        (!self.is_all()).then(|| {
            format!("https://flagcdn.com/w40/{}.png 2x", self.code.to_lowercase())
        })
    }
}

const fn c(code: &'static str, label: &'static str) -> CountryOption {
    CountryOption { code, label }
}

pub const COUNTRIES: &[CountryOption] = &[
    c("", "All"),
    c("AT", "Austria"),
    c("AU", "Australia"),
    c("BE", "Belgium"),
    c("BG", "Bulgaria"),
    c("BR", "Brazil"),
    c("CA", "Canada"),
    c("CH", "Switzerland"),
    c("CN", "China"),
    c("CY", "Cyprus"),
    c("CZ", "Czech Republic"),
    c("DE", "Germany"),
    c("DK", "Denmark"),
    c("EE", "Estonia"),
    c("ES", "Spain"),
    c("FI", "Finland"),
    c("FR", "France"),
    c("GB", "United Kingdom"),
    c("GR", "Greece"),
    c("HR", "Croatia"),
    c("HU", "Hungary"),
    c("IE", "Ireland"),
    c("IN", "India"),
    c("IT", "Italy"),
    c("JP", "Japan"),
    c("KR", "Korea, Republic of"),
    c("LT", "Lithuania"),
    c("LU", "Luxembourg"),
    c("LV", "Latvia"),
    c("MT", "Malta"),
    c("MX", "Mexico"),
    c("NL", "Netherlands"),
    c("NO", "Norway"),
    c("NZ", "New Zealand"),
    c("PL", "Poland"),
    c("PT", "Portugal"),
    c("RO", "Romania"),
    c("SE", "Sweden"),
    c("SG", "Singapore"),
    c("SI", "Slovenia"),
    c("SK", "Slovakia"),
    c("TR", "Turkey"),
    c("UA", "Ukraine"),
    c("US", "United States"),
    c("ZA", "South Africa"),
];

/// Look up by code or label, case-insensitively
pub fn find(query: &str) -> Option<&'static CountryOption> {
    let query = query.trim();
    COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(query) || c.label.eq_ignore_ascii_case(query))
}

/// Options whose label contains the typed text
pub fn matching(input: &str) -> Vec<&'static CountryOption> {
    let needle = input.trim().to_lowercase();
    COUNTRIES
        .iter()
        .filter(|c| needle.is_empty() || c.label.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_comes_first_and_clears_filter() {
        let all = COUNTRIES[0];
        assert!(all.is_all());
        assert_eq!(all.filter_value(), "");
        assert_eq!(all.flag_url(), None);
    }

    #[test]
    fn test_flag_urls() {
        let fr = find("fr").unwrap();
        assert_eq!(fr.filter_value(), "France");
        assert_eq!(fr.flag_url().unwrap(), "https://flagcdn.com/w20/fr.png");
        assert_eq!(fr.flag_srcset().unwrap(), "https://flagcdn.com/w40/fr.png 2x");
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find("united states").map(|c| c.code), Some("US"));
        assert!(find("Atlantis").is_none());
        assert!(matching("land").iter().any(|c| c.code == "FI"));
        assert_eq!(matching("").len(), COUNTRIES.len());
    }
}
