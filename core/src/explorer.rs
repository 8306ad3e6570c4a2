//! Page controller shared by the list, map and timeline pages.
//!
//! An [`Explorer`] owns one catalog snapshot plus the user's selections and
//! turns them into view models. It never mutates the catalog, so switching
//! filters back and forth is always exact.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{LoadError, LoadFailure};
use crate::filter::{FilterState, SortMode};
use crate::handoff::Handoff;
use crate::location::{LocationResolver, Projection};
use crate::model::{Event, Period, SubPeriod};
use crate::search::{self, SearchOptions, SearchOutcome};
use crate::timeline::{self, LegendEntry, TimelineItem, TimelineWindow};
use crate::view::{self, Annotation, EventCard, FilterButton, MapMarker, SearchHit, Stats};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub filters: Vec<FilterButton>,
    pub sort: SortMode,
    pub cards: Vec<EventCard>,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub filters: Vec<FilterButton>,
    pub sub_filters: Vec<FilterButton>,
    pub markers: Vec<MapMarker>,
    pub annotations: Vec<Annotation>,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    pub filters: Vec<FilterButton>,
    pub items: Vec<TimelineItem>,
    pub window: TimelineWindow,
    pub legend: Vec<LegendEntry>,
    pub stats: Stats,
}

#[derive(Debug, Clone, Default)]
pub struct Explorer {
    catalog: Catalog,
    filter: FilterState,
    failures: Vec<LoadFailure>,
    resolver: LocationResolver,
}

impl Explorer {
    pub fn new(catalog: Catalog) -> Self {
        Explorer {
            catalog,
            ..Default::default()
        }
    }

    /// Build from three independently settled loads.
    pub fn from_settled(
        periods: Result<Vec<Period>, LoadError>,
        sub_periods: Result<Vec<SubPeriod>, LoadError>,
        events: Result<Vec<Event>, LoadError>,
    ) -> Self {
        let (catalog, failures) = Catalog::from_settled(periods, sub_periods, events);
        Explorer {
            catalog,
            failures,
            ..Default::default()
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.resolver = LocationResolver::new(projection);
        self
    }

    /// Swap in a fresh snapshot, keeping the user's selections.
    pub fn reload(&mut self, catalog: Catalog, failures: Vec<LoadFailure>) {
        info!(events = catalog.events().len(), failed = failures.len(), "snapshot reloaded");
        self.catalog = catalog;
        self.failures = failures;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    /// Non-fatal notice naming the collections that failed to load.
    pub fn banner(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let names: Vec<String> = self
            .failures
            .iter()
            .map(|f| f.collection.to_string())
            .collect();
        Some(format!(
            "Some data could not be loaded ({}). Showing what is available.",
            names.join(", ")
        ))
    }

    // ── Selections ───────────────────────────────────────────────────

    pub fn filter_by_period(&mut self, id: &str) {
        self.filter.filter_by_period(id);
    }

    pub fn filter_by_sub_period(&mut self, id: &str) {
        self.filter.filter_by_sub_period(id);
    }

    pub fn clear_sub_period(&mut self) {
        self.filter.clear_sub_period();
    }

    pub fn sort(&mut self, mode: SortMode) {
        self.filter.sort(mode);
    }

    /// Narrow the filters to an event's period and sub-period, as picking a
    /// search result on the map does. Returns the event when it exists.
    pub fn focus_event(&mut self, id: &str) -> Option<&Event> {
        let event = self.catalog.event(id)?;
        if let Some(period) = self.catalog.period_of(event).and_then(Period::id) {
            self.filter.filter_by_period(period);
            if let Some(sub) = self.catalog.sub_period_of(event).and_then(SubPeriod::id) {
                self.filter.filter_by_sub_period(sub);
            }
        }
        debug!(id, "focused event");
        self.catalog.event(id)
    }

    /// Apply a handoff left by the detail page.
    pub fn apply_handoff(&mut self, handoff: &Handoff) -> Option<&Event> {
        if let Some(period) = handoff.period.as_deref()
            && self.catalog.period(period).is_some()
        {
            self.filter.filter_by_period(period);
        }
        let id = handoff.id.as_deref()?;
        self.catalog.event(id)
    }

    // ── Views ────────────────────────────────────────────────────────

    /// Visible events under the current selections.
    pub fn visible(&self) -> Vec<&Event> {
        self.filter.apply(&self.catalog)
    }

    pub fn stats(&self) -> Stats {
        Stats::build(&self.catalog, self.filter.period(), &self.visible())
    }

    pub fn list_view(&self) -> ListView {
        let visible = self.visible();
        ListView {
            filters: view::period_filters(&self.catalog, self.filter.period()),
            sort: self.filter.sort_mode(),
            cards: view::event_cards(&self.catalog, &visible),
            stats: Stats::build(&self.catalog, self.filter.period(), &visible),
        }
    }

    pub fn map_view(&self) -> MapView {
        let visible = self.visible();
        MapView {
            filters: view::period_filters(&self.catalog, self.filter.period()),
            sub_filters: view::sub_period_filters(
                &self.catalog,
                self.filter.period(),
                self.filter.sub_period(),
            ),
            markers: view::map_markers(&self.catalog, &visible, &self.resolver),
            annotations: view::annotations(&self.catalog, &visible),
            stats: Stats::build(&self.catalog, self.filter.period(), &visible),
        }
    }

    pub fn timeline_view(&self) -> TimelineView {
        let visible = self.visible();
        let items = timeline::timeline_items(&self.catalog, &visible, self.filter.period());
        TimelineView {
            filters: view::period_filters(&self.catalog, self.filter.period()),
            window: TimelineWindow::fitted_or_default(&items),
            items,
            legend: timeline::legend(&self.catalog, self.filter.period()),
            stats: Stats::build(&self.catalog, self.filter.period(), &visible),
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.set_query(query);
    }

    /// Hits for the remembered query.
    pub fn current_hits(&self, options: SearchOptions) -> Option<Vec<SearchHit>> {
        self.search_hits(self.filter.query(), options)
    }

    /// Search the whole collection, ignoring the current filters.
    pub fn search(&self, query: &str, options: SearchOptions) -> SearchOutcome<'_> {
        search::search(self.catalog.events(), query, options)
    }

    /// Dropdown rows, or `None` when the panel should close.
    pub fn search_hits(&self, query: &str, options: SearchOptions) -> Option<Vec<SearchHit>> {
        match self.search(query, options) {
            SearchOutcome::Closed => None,
            SearchOutcome::Results(found) => Some(view::search_hits(&self.catalog, &found)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Collection;
    use crate::ids::ObjectRef;
    use crate::model::{EventDate, Location};

    fn explorer() -> Explorer {
        let periods = vec![
            Period {
                id: Some(ObjectRef::Wrapped { oid: "p1".into() }),
                name: "Ancient".into(),
                ..Default::default()
            },
            Period {
                id: Some(ObjectRef::Wrapped { oid: "p2".into() }),
                name: "Independence".into(),
                order: 1,
                ..Default::default()
            },
        ];
        let subs = vec![SubPeriod {
            id: Some(ObjectRef::Wrapped { oid: "s1".into() }),
            name: "Ngô".into(),
            period_id: Some(ObjectRef::Wrapped { oid: "p2".into() }),
            ..Default::default()
        }];
        let events = vec![
            Event {
                id: Some(ObjectRef::Wrapped { oid: "e1".into() }),
                title: Some("Battle of Bach Dang".into()),
                date: Some(EventDate::year(938)),
                period_id: Some(ObjectRef::Wrapped { oid: "p2".into() }),
                sub_period_id: Some(ObjectRef::Wrapped { oid: "s1".into() }),
                location: Some(Location::named("Bạch Đằng")),
                ..Default::default()
            },
            Event {
                id: Some(ObjectRef::Wrapped { oid: "e2".into() }),
                title: Some("Văn Lang founded".into()),
                date: Some(EventDate::year(-2879)),
                period_id: Some(ObjectRef::Wrapped { oid: "p1".into() }),
                ..Default::default()
            },
        ];
        Explorer::new(Catalog::new(periods, subs, events))
    }

    #[test]
    fn test_list_view_default() {
        let ex = explorer();
        let view = ex.list_view();
        assert_eq!(view.filters.len(), 3);
        assert_eq!(view.cards[0].title, "Văn Lang founded");
        assert_eq!(view.stats.visible, 2);
        assert_eq!(view.stats.years_of_history, 2879 + 938);
    }

    #[test]
    fn test_map_view_follows_filters() {
        let mut ex = explorer();
        ex.filter_by_period("p2");
        let view = ex.map_view();
        assert_eq!(view.markers.len(), 1);
        assert_eq!(view.sub_filters.len(), 1);
        assert_eq!(view.stats.periods, 1);
    }

    #[test]
    fn test_timeline_view_window() {
        let mut ex = explorer();
        let all = ex.timeline_view().window;
        assert_ne!(all, TimelineWindow::default());
        assert!(all.start < -2879.0 && all.end > 938.0);
        ex.filter_by_period("p2");
        let view = ex.timeline_view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.window, TimelineWindow { start: 937.0, end: 939.0 });
        assert_eq!(view.legend.len(), 1);
    }

    #[test]
    fn test_search_ignores_filters() {
        let mut ex = explorer();
        ex.filter_by_period("p1");
        let hits = ex.search_hits("bach dang", SearchOptions::list()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].period, "Independence");
        assert!(ex.search_hits("b", SearchOptions::list()).is_none());
    }

    #[test]
    fn test_query_survives_period_changes() {
        let mut ex = explorer();
        ex.set_query("lang founded");
        ex.filter_by_period("p2");
        assert_eq!(ex.filter().query(), "lang founded");
        let hits = ex.current_hits(SearchOptions::list()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Văn Lang founded");
    }

    #[test]
    fn test_focus_event_sets_period_and_sub_period() {
        let mut ex = explorer();
        let title = ex.focus_event("e1").map(|e| e.title_or_default().to_string());
        assert_eq!(title.as_deref(), Some("Battle of Bach Dang"));
        assert_eq!(ex.filter().period().period_id(), Some("p2"));
        assert_eq!(ex.filter().sub_period(), Some("s1"));
        assert!(ex.focus_event("missing").is_none());
    }

    #[test]
    fn test_apply_handoff() {
        let mut ex = explorer();
        let h = Handoff {
            id: Some("e2".into()),
            period: Some("p1".into()),
            year: Some(-2879),
            ..Default::default()
        };
        assert!(ex.apply_handoff(&h).is_some());
        assert_eq!(ex.visible().len(), 1);
    }

    #[test]
    fn test_banner_lists_failures() {
        let ex = Explorer::from_settled(
            Ok(vec![]),
            Err(LoadError::Transport {
                endpoint: "/subperiods".into(),
                reason: "offline".into(),
            }),
            Ok(vec![]),
        );
        assert_eq!(ex.failures()[0].collection, Collection::SubPeriods);
        assert_eq!(
            ex.banner().as_deref(),
            Some("Some data could not be loaded (sub-periods). Showing what is available.")
        );
        assert_eq!(explorer().banner(), None);
    }

    #[test]
    fn test_reload_keeps_selection() {
        let mut ex = explorer();
        ex.filter_by_period("p1");
        let fresh = explorer().catalog().clone();
        ex.reload(fresh, Vec::new());
        assert_eq!(ex.visible().len(), 1);
    }
}
