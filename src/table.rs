//! List State
//!
//! Filter, search and pagination state for the HQ clients table, and a small
//! controller that decides when the list has to be fetched again.
//!
//! The state itself is plain data: both the web UI (through signals) and the
//! CLI pager drive it the same way. Any change to page, rows per page,
//! country, level or search yields a new query key, and a new key means a
//! fresh list request.

use crate::api::{ApiError, CenterFilter, Level, RowsPerPage};

/// Height of one table row in pixels, used for the padding row
pub const ROW_HEIGHT_PX: u32 = 53;

/// Current table state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub page: u32,
    pub rows_per_page: RowsPerPage,
    pub country: String,
    pub level: Option<Level>,
    pub search: String,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request matching the current state
    pub fn query(&self) -> CenterFilter {
        CenterFilter {
            page: self.page,
            rows_per_page: self.rows_per_page,
            country: self.country.clone(),
            level: self.level,
            search: self.search.clone(),
        }
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        replace(&mut self.page, page)
    }

    /// Changing the page size always goes back to the first page
    pub fn set_rows_per_page(&mut self, rows: RowsPerPage) -> bool {
        let changed = replace(&mut self.rows_per_page, rows);
        self.reset_page() || changed
    }

    pub fn set_country(&mut self, country: impl Into<String>) -> bool {
        let changed = replace(&mut self.country, country.into());
        if changed {
            self.reset_page();
        }
        changed
    }

    pub fn set_level(&mut self, level: Option<Level>) -> bool {
        let changed = replace(&mut self.level, level);
        if changed {
            self.reset_page();
        }
        changed
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let changed = replace(&mut self.search, search.into());
        if changed {
            self.reset_page();
        }
        changed
    }

    fn reset_page(&mut self) -> bool {
        replace(&mut self.page, 0)
    }

    /// Number of placeholder rows to render so the table keeps its height.
    ///
    /// Before any data arrives the whole page is placeholders. The first page
    /// is never padded. Later pages are padded up to a full page.
    pub fn empty_rows(&self, filtered: Option<u64>) -> u32 {
        let rows = match self.rows_per_page {
            RowsPerPage::Count(n) => n as u64,
            RowsPerPage::All => return 0,
        };

        let Some(filtered) = filtered else {
            return rows as u32;
        };

        if self.page == 0 {
            return 0;
        }

        let shown_up_to = (self.page as u64 + 1) * rows;
        shown_up_to.saturating_sub(filtered).min(rows) as u32
    }

    /// Height of the padding row in pixels
    pub fn padding_height(&self, filtered: Option<u64>) -> u32 {
        self.empty_rows(filtered).saturating_mul(ROW_HEIGHT_PX)
    }

    pub fn page_count(&self, filtered: u64) -> u32 {
        match self.rows_per_page {
            RowsPerPage::All => 1,
            RowsPerPage::Count(n) => (filtered.div_ceil(n as u64) as u32).max(1),
        }
    }

    pub fn last_page(&self, filtered: u64) -> u32 {
        self.page_count(filtered) - 1
    }

    /// Page index points beyond the data, e.g. `--page 10` over 12 rows
    pub fn is_past_end(&self, filtered: u64) -> bool {
        self.page > self.last_page(filtered)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 0
    }

    pub fn can_next(&self, filtered: u64) -> bool {
        self.page < self.last_page(filtered)
    }

    pub fn first(&mut self) -> bool {
        self.set_page(0)
    }

    pub fn prev(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn next(&mut self, filtered: u64) -> bool {
        if self.can_next(filtered) {
            self.set_page(self.page + 1)
        } else {
            false
        }
    }

    pub fn last(&mut self, filtered: u64) -> bool {
        self.set_page(self.last_page(filtered))
    }

    /// Footer label, e.g. "6–10 of 23"
    pub fn displayed_range(&self, filtered: u64) -> String {
        if filtered == 0 {
            return "0–0 of 0".to_string();
        }
        let (from, to) = match self.rows_per_page {
            RowsPerPage::All => (1, filtered),
            RowsPerPage::Count(n) => {
                let n = n as u64;
                let page = self.page.min(self.last_page(filtered)) as u64;
                (page * n + 1, filtered.min((page + 1) * n))
            }
        };
        format!("{}–{} of {}", from, to, filtered)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Tracks issued queries and the data that came back for them.
///
/// `begin` hands out a query only when the key changed since the last one
/// issued. `finish` ignores responses for queries that have been superseded,
/// so slow responses never overwrite newer ones.
#[derive(Debug, Clone)]
pub struct ListController<P> {
    pub state: ListState,
    issued: Option<CenterFilter>,
    data: Option<P>,
    error: Option<ApiError>,
    loading: bool,
}

impl<P> Default for ListController<P> {
    fn default() -> Self {
        Self::new(ListState::default())
    }
}

impl<P> ListController<P> {
    pub fn new(state: ListState) -> Self {
        Self {
            state,
            issued: None,
            data: None,
            error: None,
            loading: false,
        }
    }

    /// Query to send now, if the state moved since the last request
    pub fn begin(&mut self) -> Option<CenterFilter> {
        let query = self.state.query();
        if self.issued.as_ref() == Some(&query) {
            return None;
        }
        tracing::debug!(query = %query.to_query(), "issuing list query");
        self.issued = Some(query.clone());
        self.loading = true;
        Some(query)
    }

    /// Forget the last issued key so the next `begin` fetches again
    pub fn invalidate(&mut self) {
        self.issued = None;
    }

    /// Record a response. Returns false when the response was stale.
    pub fn finish(&mut self, query: &CenterFilter, result: Result<P, ApiError>) -> bool {
        if self.issued.as_ref() != Some(query) {
            tracing::debug!(query = %query.to_query(), "dropping stale list response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "list query failed");
                self.error = Some(e);
            }
        }
        true
    }

    /// Last good payload. Kept while a newer query is in flight.
    pub fn data(&self) -> Option<&P> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CenterPage;

    fn state(page: u32, rows: u32) -> ListState {
        ListState {
            page,
            rows_per_page: RowsPerPage::Count(rows),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let state = ListState::new();
        assert_eq!(state.page, 0);
        assert_eq!(state.rows_per_page, RowsPerPage::Count(5));
        assert!(state.country.is_empty());
        assert!(state.level.is_none());
    }

    #[test]
    fn test_empty_rows_before_data_fills_page() {
        assert_eq!(state(0, 10).empty_rows(None), 10);
        assert_eq!(state(3, 5).empty_rows(None), 5);
    }

    #[test]
    fn test_empty_rows_first_page_never_padded() {
        assert_eq!(state(0, 10).empty_rows(Some(3)), 0);
    }

    #[test]
    fn test_empty_rows_last_page() {
        // 23 rows, 5 per page: page 4 shows rows 21-23
        assert_eq!(state(4, 5).empty_rows(Some(23)), 2);
        assert_eq!(state(4, 5).padding_height(Some(23)), 2 * ROW_HEIGHT_PX);
        // Exact multiple leaves nothing to pad
        assert_eq!(state(3, 5).empty_rows(Some(20)), 0);
        // Middle pages are full
        assert_eq!(state(1, 5).empty_rows(Some(23)), 0);
    }

    #[test]
    fn test_padding_height_saturates_on_huge_pages() {
        let s = ListState {
            rows_per_page: RowsPerPage::Count(100_000_000),
            ..Default::default()
        };
        assert_eq!(s.empty_rows(None), 100_000_000);
        assert_eq!(s.padding_height(None), u32::MAX);
    }

    #[test]
    fn test_displayed_range_past_last_page() {
        let s = state(9, 5);
        assert!(s.is_past_end(12));
        assert_eq!(s.displayed_range(12), "11–12 of 12");

        assert!(!state(2, 5).is_past_end(12));
        assert!(!state(0, 5).is_past_end(0));
    }

    #[test]
    fn test_empty_rows_all() {
        let mut s = state(0, 5);
        s.set_rows_per_page(RowsPerPage::All);
        assert_eq!(s.empty_rows(None), 0);
        assert_eq!(s.empty_rows(Some(40)), 0);
    }

    #[test]
    fn test_rows_per_page_resets_page() {
        let mut s = state(3, 5);
        assert!(s.set_rows_per_page(RowsPerPage::Count(10)));
        assert_eq!(s.page, 0);

        // Same size while on page 0: nothing changes
        assert!(!s.set_rows_per_page(RowsPerPage::Count(10)));
    }

    #[test]
    fn test_filters_reset_page_and_report_change() {
        let mut s = state(2, 5);
        assert!(s.set_country("France"));
        assert_eq!(s.page, 0);
        assert!(!s.set_country("France"));

        s.set_page(2);
        assert!(s.set_level(Some(Level::Gold)));
        assert_eq!(s.page, 0);

        s.set_page(1);
        assert!(s.set_search("lyon"));
        assert_eq!(s.page, 0);
        assert_eq!(s.query().search, "lyon");
    }

    #[test]
    fn test_navigation() {
        let mut s = state(0, 10);
        assert!(!s.can_prev());
        assert_eq!(s.page_count(25), 3);
        assert!(s.next(25));
        assert!(s.next(25));
        assert!(!s.next(25));
        assert_eq!(s.page, 2);
        assert!(s.prev());
        assert!(s.first());
        assert!(s.last(25));
        assert_eq!(s.page, 2);
        assert_eq!(s.page_count(0), 1);
    }

    #[test]
    fn test_displayed_range() {
        assert_eq!(state(1, 5).displayed_range(23), "6–10 of 23");
        assert_eq!(state(4, 5).displayed_range(23), "21–23 of 23");
        assert_eq!(state(0, 5).displayed_range(0), "0–0 of 0");
    }

    #[test]
    fn test_controller_fetches_only_on_change() {
        let mut list: ListController<CenterPage> = ListController::default();

        let q = list.begin().expect("first query");
        assert!(list.is_loading());
        assert!(list.begin().is_none());

        assert!(list.finish(&q, Ok(CenterPage::default())));
        assert!(!list.is_loading());
        assert!(list.data().is_some());

        list.state.set_search("x");
        assert!(list.begin().is_some());

        list.invalidate();
        assert!(list.begin().is_some());
    }

    #[test]
    fn test_controller_drops_stale_responses() {
        let mut list: ListController<CenterPage> = ListController::default();
        let first = list.begin().unwrap();

        list.state.set_page(1);
        let second = list.begin().unwrap();

        let stale = CenterPage {
            total_counts: 1,
            ..Default::default()
        };
        assert!(!list.finish(&first, Ok(stale)));
        assert!(list.data().is_none());

        assert!(list.finish(&second, Err(ApiError::Timeout)));
        assert_eq!(list.error(), Some(&ApiError::Timeout));
    }
}
