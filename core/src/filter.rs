//! Period / sub-period selection and sort order over the event collection.
//!
//! [`FilterState`] holds only the user's choices; the visible set is always
//! recomputed from the catalog, so a reload never leaves a stale subset.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::ids::matches_id;
use crate::model::Event;

/// Sentinel the UI uses for the "All Periods" button.
pub const ALL_PERIODS: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodSelection {
    #[default]
    All,
    Period(String),
}

impl PeriodSelection {
    /// Parse a filter-button value; `"all"` is the sentinel.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_PERIODS {
            PeriodSelection::All
        } else {
            PeriodSelection::Period(value.to_string())
        }
    }

    pub fn period_id(&self) -> Option<&str> {
        match self {
            PeriodSelection::All => None,
            PeriodSelection::Period(id) => Some(id),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, PeriodSelection::All)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    DateAsc,
    DateDesc,
    #[serde(rename = "name-asc")]
    TitleAsc,
    #[serde(rename = "name-desc")]
    TitleDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::DateAsc,
        SortMode::DateDesc,
        SortMode::TitleAsc,
        SortMode::TitleDesc,
    ];

    /// Value used by the sort `<select>` and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::DateAsc => "date-asc",
            SortMode::DateDesc => "date-desc",
            SortMode::TitleAsc => "name-asc",
            SortMode::TitleDesc => "name-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::DateAsc => "Oldest first",
            SortMode::DateDesc => "Newest first",
            SortMode::TitleAsc => "Title A–Z",
            SortMode::TitleDesc => "Title Z–A",
        }
    }

    fn compare(self, a: &Event, b: &Event) -> Ordering {
        match self {
            SortMode::DateAsc => a.sort_year().cmp(&b.sort_year()),
            SortMode::DateDesc => b.sort_year().cmp(&a.sort_year()),
            SortMode::TitleAsc => title_key(a).cmp(&title_key(b)),
            SortMode::TitleDesc => title_key(b).cmp(&title_key(a)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode `{0}` (expected date-asc, date-desc, name-asc or name-desc)")]
pub struct SortModeError(pub String);

impl FromStr for SortMode {
    type Err = SortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SortModeError(s.to_string()))
    }
}

fn title_key(event: &Event) -> String {
    event.title.as_deref().unwrap_or_default().to_lowercase()
}

/// Sort events in place. Stable: equal keys keep their input order.
pub fn sort_events(events: &mut [&Event], mode: SortMode) {
    events.sort_by(|a, b| mode.compare(a, b));
}

/// The user's current selections on a list/map/timeline page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    period: PeriodSelection,
    sub_period: Option<String>,
    sort: SortMode,
    query: String,
}

impl FilterState {
    pub fn period(&self) -> &PeriodSelection {
        &self.period
    }

    pub fn sub_period(&self) -> Option<&str> {
        self.sub_period.as_deref()
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    /// Select a period (`"all"` clears it). Always clears the sub-period.
    pub fn filter_by_period(&mut self, id: &str) {
        self.period = PeriodSelection::from_value(id);
        self.sub_period = None;
    }

    /// Narrow the period-filtered set to one sub-period.
    pub fn filter_by_sub_period(&mut self, id: &str) {
        self.sub_period = Some(id.to_string());
    }

    pub fn clear_sub_period(&mut self) {
        self.sub_period = None;
    }

    pub fn sort(&mut self, mode: SortMode) {
        self.sort = mode;
    }

    /// Search box text. Searching ignores the period selections.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Does `event` pass the period and sub-period selections?
    pub fn admits(&self, event: &Event) -> bool {
        let period_ok = match &self.period {
            PeriodSelection::All => true,
            PeriodSelection::Period(id) => matches_id(event.period_id.as_ref(), id),
        };
        period_ok
            && self
                .sub_period
                .as_deref()
                .is_none_or(|id| matches_id(event.sub_period_id.as_ref(), id))
    }

    /// The visible events: filtered, then sorted per the active mode.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Event> {
        let mut visible: Vec<&Event> = catalog.events().iter().filter(|e| self.admits(e)).collect();
        sort_events(&mut visible, self.sort);
        debug!(
            period = ?self.period,
            sub_period = ?self.sub_period,
            sort = %self.sort,
            visible = visible.len(),
            "filter applied"
        );
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ObjectRef;
    use crate::model::EventDate;

    fn ev(id: &str, title: &str, year: Option<i32>, period: &str, sub: Option<&str>) -> Event {
        Event {
            id: Some(id.into()),
            title: Some(title.into()),
            date: year.map(EventDate::year),
            period_id: Some(ObjectRef::Wrapped { oid: period.into() }),
            sub_period_id: sub.map(ObjectRef::from),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![],
            vec![],
            vec![
                ev("e1", "Founding of Văn Lang", Some(-2879), "p1", Some("sp1")),
                ev("e2", "battle of Bach Dang", Some(938), "p2", None),
                ev("e3", "Ly dynasty", Some(1009), "p2", Some("sp2")),
                ev("e4", "Undated legend", None, "p1", Some("sp9")),
                ev("e5", "Bronze drums", Some(-2879), "p1", Some("sp1")),
            ],
        )
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id().unwrap_or_default().to_string()).collect()
    }

    #[test]
    fn test_all_returns_everything() {
        let c = catalog();
        let state = FilterState::default();
        assert_eq!(state.apply(&c).len(), 5);
    }

    #[test]
    fn test_filter_by_period() {
        let c = catalog();
        let mut state = FilterState::default();
        state.filter_by_period("p2");
        assert_eq!(ids(&state.apply(&c)), ["e2", "e3"]);
    }

    #[test]
    fn test_filter_by_sub_period_narrows() {
        let c = catalog();
        let mut state = FilterState::default();
        state.filter_by_period("p1");
        state.filter_by_sub_period("sp1");
        assert_eq!(ids(&state.apply(&c)), ["e1", "e5"]);
    }

    #[test]
    fn test_period_change_clears_sub_period() {
        let c = catalog();
        let mut state = FilterState::default();
        state.filter_by_period("p1");
        state.filter_by_sub_period("sp1");
        state.filter_by_period(ALL_PERIODS);
        assert_eq!(state.sub_period(), None);
        assert_eq!(state.apply(&c).len(), 5);
    }

    #[test]
    fn test_sort_date_missing_year_is_zero_and_stable() {
        let c = catalog();
        let state = FilterState::default();
        // e1 and e5 share -2879 and keep input order; e4 (no year) sorts as 0.
        assert_eq!(ids(&state.apply(&c)), ["e1", "e5", "e4", "e2", "e3"]);
    }

    #[test]
    fn test_sort_date_desc_is_stable() {
        let c = catalog();
        let mut state = FilterState::default();
        state.sort(SortMode::DateDesc);
        assert_eq!(ids(&state.apply(&c)), ["e3", "e2", "e4", "e1", "e5"]);
    }

    #[test]
    fn test_sort_title_case_insensitive() {
        let c = catalog();
        let mut state = FilterState::default();
        state.sort(SortMode::TitleAsc);
        assert_eq!(ids(&state.apply(&c)), ["e2", "e5", "e1", "e3", "e4"]);
        state.sort(SortMode::TitleDesc);
        assert_eq!(ids(&state.apply(&c)), ["e4", "e3", "e1", "e5", "e2"]);
    }

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("name-asc".parse::<SortMode>(), Ok(SortMode::TitleAsc));
        assert_eq!("date-desc".parse::<SortMode>(), Ok(SortMode::DateDesc));
        assert!("title".parse::<SortMode>().is_err());
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_filter_reapplies_after_reload() {
        let mut state = FilterState::default();
        state.filter_by_period("p2");
        let first = catalog();
        assert_eq!(state.apply(&first).len(), 2);
        let reloaded = Catalog::new(vec![], vec![], vec![ev("e9", "New", Some(1), "p2", None)]);
        assert_eq!(ids(&state.apply(&reloaded)), ["e9"]);
    }
}
