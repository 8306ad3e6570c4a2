//! Joins the three collections and resolves cross-references.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Collection, LoadError, LoadFailure};
use crate::ids::matches_id;
use crate::model::{Event, Period, SubPeriod, non_empty};
use crate::palette;

/// Which view an event color is for; each has its own fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Map,
    /// `period_focused` is true when a single period is selected, which
    /// switches events to their sub-period shade.
    Timeline { period_focused: bool },
}

/// Read-only snapshot of periods, sub-periods and events for one page view.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    periods: Vec<Period>,
    sub_periods: Vec<SubPeriod>,
    events: Vec<Event>,
}

impl Catalog {
    /// Periods and sub-periods are stable-sorted by `order`; events keep
    /// fetch order.
    pub fn new(
        mut periods: Vec<Period>,
        mut sub_periods: Vec<SubPeriod>,
        events: Vec<Event>,
    ) -> Self {
        periods.sort_by_key(|p| p.order);
        sub_periods.sort_by_key(|s| s.order);
        Catalog {
            periods,
            sub_periods,
            events,
        }
    }

    /// Build from three independently settled loads. A failed collection
    /// becomes empty and is reported; the others are used as-is.
    pub fn from_settled(
        periods: Result<Vec<Period>, LoadError>,
        sub_periods: Result<Vec<SubPeriod>, LoadError>,
        events: Result<Vec<Event>, LoadError>,
    ) -> (Self, Vec<LoadFailure>) {
        let mut failures = Vec::new();
        let periods = settle(Collection::Periods, periods, &mut failures);
        let sub_periods = settle(Collection::SubPeriods, sub_periods, &mut failures);
        let events = settle(Collection::Events, events, &mut failures);
        debug!(
            periods = periods.len(),
            sub_periods = sub_periods.len(),
            events = events.len(),
            failed = failures.len(),
            "catalog settled"
        );
        (Catalog::new(periods, sub_periods, events), failures)
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn sub_periods(&self) -> &[SubPeriod] {
        &self.sub_periods
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() && self.sub_periods.is_empty() && self.events.is_empty()
    }

    // ── Lookup by id ─────────────────────────────────────────────────

    pub fn period(&self, id: &str) -> Option<&Period> {
        self.periods.iter().find(|p| matches_id(p.id.as_ref(), id))
    }

    pub fn sub_period(&self, id: &str) -> Option<&SubPeriod> {
        self.sub_periods
            .iter()
            .find(|s| matches_id(s.id.as_ref(), id))
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| matches_id(e.id.as_ref(), id))
    }

    // ── Cross-references ─────────────────────────────────────────────

    pub fn period_of(&self, event: &Event) -> Option<&Period> {
        event.period_id().and_then(|id| self.period(id))
    }

    pub fn sub_period_of(&self, event: &Event) -> Option<&SubPeriod> {
        event.sub_period_id().and_then(|id| self.sub_period(id))
    }

    pub fn parent_of(&self, sub_period: &SubPeriod) -> Option<&Period> {
        sub_period.period_id().and_then(|id| self.period(id))
    }

    /// Period name, or "Unknown Period" when the reference is missing or dangling.
    pub fn period_label(&self, event: &Event) -> &str {
        self.period_of(event)
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(crate::UNKNOWN_PERIOD)
    }

    /// Sub-periods of one period, in display order.
    pub fn sub_periods_of(&self, period_id: &str) -> Vec<&SubPeriod> {
        self.sub_periods
            .iter()
            .filter(|s| matches_id(s.period_id.as_ref(), period_id))
            .collect()
    }

    /// Position of a sub-period among its siblings (by order).
    pub fn sub_period_index(&self, sub_period: &SubPeriod) -> Option<usize> {
        let parent = sub_period.period_id()?;
        let id = sub_period.id()?;
        self.sub_periods_of(parent)
            .iter()
            .position(|s| s.id() == Some(id))
    }

    // ── Colors ───────────────────────────────────────────────────────

    /// Explicit color, else the slug's signature color, else the fallback.
    pub fn period_color<'a>(&self, period: &'a Period) -> &'a str {
        non_empty(period.color.as_deref())
            .or_else(|| period.slug.as_deref().and_then(palette::slug_color))
            .unwrap_or(palette::PERIOD_FALLBACK)
    }

    /// Explicit color, else the parent period's color, else the fallback.
    pub fn sub_period_color<'a>(&'a self, sub_period: &'a SubPeriod) -> &'a str {
        non_empty(sub_period.color.as_deref())
            .or_else(|| {
                self.parent_of(sub_period)
                    .and_then(|p| non_empty(p.color.as_deref()))
            })
            .unwrap_or(palette::PERIOD_FALLBACK)
    }

    /// Palette shade of a sub-period, by its slot among its siblings.
    pub fn sub_period_shade(&self, sub_period: &SubPeriod) -> Option<&'static str> {
        let slug = self.parent_of(sub_period)?.slug.as_deref()?;
        let index = self.sub_period_index(sub_period)?;
        palette::sub_period_shade(slug, index)
    }

    /// Marker/item color for an event in the given view.
    pub fn event_color<'a>(&'a self, event: &Event, style: MarkerStyle) -> &'a str {
        let period = self.period_of(event);
        match style {
            MarkerStyle::Map => period
                .and_then(|p| non_empty(p.color.as_deref()))
                .unwrap_or(palette::MAP_MARKER_FALLBACK),
            MarkerStyle::Timeline { period_focused } => {
                if period_focused
                    && let Some(shade) = self
                        .sub_period_of(event)
                        .and_then(|s| self.sub_period_shade(s))
                {
                    return shade;
                }
                period
                    .and_then(|p| {
                        p.slug
                            .as_deref()
                            .and_then(palette::slug_color)
                            .or_else(|| non_empty(p.color.as_deref()))
                    })
                    .unwrap_or(palette::TIMELINE_FALLBACK)
            }
        }
    }
}

fn settle<T>(
    collection: Collection,
    loaded: Result<Vec<T>, LoadError>,
    failures: &mut Vec<LoadFailure>,
) -> Vec<T> {
    match loaded {
        Ok(items) => items,
        Err(error) => {
            warn!(%collection, %error, "collection degraded to empty");
            failures.push(LoadFailure { collection, error });
            Vec::new()
        }
    }
}

/// Decode a JSON array of documents, skipping (and logging) any document
/// that does not fit the model. A non-array body is a decode error.
pub fn decode_collection<T: DeserializeOwned>(
    endpoint: &str,
    body: serde_json::Value,
) -> Result<Vec<T>, LoadError> {
    let serde_json::Value::Array(items) = body else {
        return Err(LoadError::Decode {
            endpoint: endpoint.to_string(),
            reason: "expected a JSON array".to_string(),
        });
    };
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(doc) => out.push(doc),
            Err(e) => warn!(endpoint, index, error = %e, "skipping malformed document"),
        }
    }
    Ok(out)
}
