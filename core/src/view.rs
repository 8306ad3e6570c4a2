//! View models for the list, map and home pages.
//!
//! Everything here is a pure function of the catalog and the current
//! selections. The Leptos pages and the CLI printers render these structs
//! as-is; neither reaches back into raw documents.

use serde::Serialize;

use crate::assign;
use crate::catalog::{Catalog, MarkerStyle};
use crate::filter::{ALL_PERIODS, PeriodSelection};
use crate::format::{self, MonthStyle};
use crate::location::{LocationResolver, PlotPoint};
use crate::model::{Event, non_empty};

/// Tags shown on a list card.
pub const CARD_TAG_LIMIT: usize = 3;
/// Random events on the homepage.
pub const HOME_CARD_COUNT: usize = 4;

// ── Filter bar ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    pub label: String,
    /// Period id, or `"all"`.
    pub value: String,
    pub active: bool,
}

/// "All Periods" followed by every period in display order.
pub fn period_filters(catalog: &Catalog, selection: &PeriodSelection) -> Vec<FilterButton> {
    let mut buttons = vec![FilterButton {
        label: "All Periods".to_string(),
        value: ALL_PERIODS.to_string(),
        active: selection.is_all(),
    }];
    buttons.extend(catalog.periods().iter().filter_map(|p| {
        let id = p.id()?;
        Some(FilterButton {
            label: p.name.clone(),
            value: id.to_string(),
            active: selection.period_id() == Some(id),
        })
    }));
    buttons
}

/// Sub-period chips under the selected period; empty when "all" is selected.
pub fn sub_period_filters(
    catalog: &Catalog,
    selection: &PeriodSelection,
    selected_sub_period: Option<&str>,
) -> Vec<FilterButton> {
    let Some(period_id) = selection.period_id() else {
        return Vec::new();
    };
    catalog
        .sub_periods_of(period_id)
        .into_iter()
        .filter_map(|s| {
            let id = s.id()?;
            Some(FilterButton {
                label: s.name.clone(),
                value: id.to_string(),
                active: selected_sub_period == Some(id),
            })
        })
        .collect()
}

// ── Cards ────────────────────────────────────────────────────────────────

/// One card in the events grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCard {
    pub id: Option<String>,
    pub title: String,
    pub localized_title: Option<String>,
    pub date: String,
    pub period: String,
    pub location: String,
    pub summary: String,
    pub image: Option<String>,
    pub gradient: &'static str,
    pub featured: bool,
    pub tags: Vec<String>,
}

impl EventCard {
    pub fn build(catalog: &Catalog, event: &Event) -> Self {
        let id = event.id();
        EventCard {
            id: id.map(str::to_string),
            title: event.title_or_default().to_string(),
            localized_title: non_empty(event.localized_title.as_deref()).map(str::to_string),
            date: format::format_event_date(event.date.as_ref(), MonthStyle::Short),
            period: catalog.period_label(event).to_string(),
            location: event.location_label().to_string(),
            summary: event.summary().to_string(),
            image: id.map(assign::event_image),
            gradient: id
                .map(assign::fallback_gradient)
                .unwrap_or(assign::GRADIENT_FALLBACKS[0]),
            featured: event.featured,
            tags: event.tags.iter().take(CARD_TAG_LIMIT).cloned().collect(),
        }
    }
}

pub fn event_cards(catalog: &Catalog, events: &[&Event]) -> Vec<EventCard> {
    events.iter().map(|e| EventCard::build(catalog, e)).collect()
}

/// A row in a search dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    pub period: String,
}

pub fn search_hits(catalog: &Catalog, results: &[&Event]) -> Vec<SearchHit> {
    results
        .iter()
        .map(|e| SearchHit {
            id: e.id().map(str::to_string),
            title: e.title_or_default().to_string(),
            date: format::format_event_date(e.date.as_ref(), MonthStyle::Long),
            period: catalog.period_label(e).to_string(),
        })
        .collect()
}

// ── Homepage ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeCard {
    pub id: Option<String>,
    pub title: String,
    pub period: String,
    pub summary: String,
    pub date: String,
    pub gradient: &'static str,
    pub featured: bool,
}

/// Pick up to `count` distinct indices out of `len` with a Fisher-Yates
/// shuffle. `random` returns a uniform value in `[0, 1)`.
pub fn sample_indices(len: usize, count: usize, mut random: impl FnMut() -> f64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    if len <= count {
        return indices;
    }
    for i in (1..len).rev() {
        let j = ((random() * (i + 1) as f64) as usize).min(i);
        indices.swap(i, j);
    }
    indices.truncate(count);
    indices
}

/// Homepage cards. Gradients follow display position, not identity.
pub fn home_cards(catalog: &Catalog, picks: &[&Event]) -> Vec<HomeCard> {
    picks
        .iter()
        .enumerate()
        .map(|(index, e)| HomeCard {
            id: e.id().map(str::to_string),
            title: e.title_or_default().to_string(),
            period: catalog.period_label(e).to_string(),
            summary: e.summary().to_string(),
            date: format::format_event_date(e.date.as_ref(), MonthStyle::Short),
            gradient: assign::GRADIENT_FALLBACKS[index % assign::GRADIENT_FALLBACKS.len()],
            featured: e.featured,
        })
        .collect()
}

// ── Map ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: Option<String>,
    pub title: String,
    pub color: String,
    pub point: PlotPoint,
}

/// Markers for events that carry any location descriptor.
pub fn map_markers(
    catalog: &Catalog,
    events: &[&Event],
    resolver: &LocationResolver,
) -> Vec<MapMarker> {
    events
        .iter()
        .filter_map(|e| {
            let point = resolver.resolve(e.location.as_ref())?;
            Some(MapMarker {
                id: e.id().map(str::to_string),
                title: e.title_or_default().to_string(),
                color: catalog.event_color(e, MarkerStyle::Map).to_string(),
                point,
            })
        })
        .collect()
}

/// Side-list entry next to the map, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    pub color: String,
}

pub fn annotations(catalog: &Catalog, events: &[&Event]) -> Vec<Annotation> {
    let mut sorted: Vec<&Event> = events.to_vec();
    sorted.sort_by_key(|e| e.sort_year());
    sorted
        .into_iter()
        .map(|e| Annotation {
            id: e.id().map(str::to_string),
            title: e.title_or_default().to_string(),
            date: format::date_label(e.date.as_ref()),
            color: catalog.event_color(e, MarkerStyle::Map).to_string(),
        })
        .collect()
}

/// Popup shown when a marker is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPopup {
    pub id: Option<String>,
    pub title: String,
    pub period: String,
    pub date: String,
    pub location: String,
    pub summary: String,
}

impl MapPopup {
    pub fn build(catalog: &Catalog, event: &Event) -> Self {
        MapPopup {
            id: event.id().map(str::to_string),
            title: event.title_or_default().to_string(),
            period: catalog.period_label(event).to_string(),
            date: format::date_label(event.date.as_ref()),
            location: event.location_label().to_string(),
            summary: event.summary().to_string(),
        }
    }
}

// ── Stats ────────────────────────────────────────────────────────────────

/// Span shown when nothing dated is visible: 2879 BC to 2025 AD.
pub const DEFAULT_YEARS_OF_HISTORY: i64 = 4904;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub visible: usize,
    /// Periods when "all" is selected, else sub-periods of the selection.
    pub periods: usize,
    pub years_of_history: i64,
}

impl Stats {
    pub fn build(catalog: &Catalog, selection: &PeriodSelection, visible: &[&Event]) -> Self {
        let periods = match selection.period_id() {
            None => catalog.periods().len(),
            Some(id) => catalog.sub_periods_of(id).len(),
        };
        Stats {
            total: catalog.events().len(),
            visible: visible.len(),
            periods,
            years_of_history: years_of_history(visible),
        }
    }
}

/// Years spanned by the dated events in `events`; end dates extend the span.
pub fn years_of_history(events: &[&Event]) -> i64 {
    let mut span: Option<(i64, i64)> = None;
    for e in events {
        let Some(year) = e.date.as_ref().and_then(|d| d.year) else {
            continue;
        };
        let year = i64::from(year);
        let end = e
            .end_date
            .as_ref()
            .and_then(|d| d.year)
            .map(i64::from)
            .map_or(year, |end| end.max(year));
        span = Some(match span {
            None => (year, end),
            Some((lo, hi)) => (lo.min(year), hi.max(end)),
        });
    }
    match span {
        None => DEFAULT_YEARS_OF_HISTORY,
        Some((min, max)) if min < 0 && max >= 0 => min.abs() + max,
        Some((min, max)) if min < 0 => min.abs() - max.abs(),
        Some((min, max)) => max - min,
    }
}
