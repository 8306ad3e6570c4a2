//! Timeline items, visible window and legend.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, MarkerStyle};
use crate::filter::PeriodSelection;
use crate::format::{self, MonthStyle};
use crate::model::{Event, EventDate, non_empty};
use crate::palette;

/// Earliest year the unfiltered timeline opens on.
pub const DEFAULT_START_YEAR: i32 = -2879;
/// Latest year the unfiltered timeline opens on.
pub const DEFAULT_END_YEAR: i32 = 2025;

/// Fractional year of a date, for placing it on the axis. `None` without a year.
pub fn decimal_year(date: &EventDate) -> Option<f64> {
    let year = f64::from(date.year?);
    let month = date.month.unwrap_or(0).min(11);
    let day = date.day.unwrap_or(1).max(1);
    Some(year + f64::from(month) / 12.0 + f64::from(day - 1) / 365.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A single moment.
    Box,
    /// Has an end date.
    Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: Option<String>,
    pub content: String,
    pub start: f64,
    pub end: f64,
    pub kind: ItemKind,
    pub color: String,
    /// Hover text.
    pub title: String,
}

/// Items for the visible events. Undated events cannot be placed and are left out.
pub fn timeline_items(
    catalog: &Catalog,
    events: &[&Event],
    selection: &PeriodSelection,
) -> Vec<TimelineItem> {
    let style = MarkerStyle::Timeline {
        period_focused: !selection.is_all(),
    };
    let items: Vec<TimelineItem> = events
        .iter()
        .filter_map(|e| {
            let start = e.date.as_ref().and_then(decimal_year)?;
            let end = e.end_date.as_ref().and_then(decimal_year);
            let date = format::format_event_date(e.date.as_ref(), MonthStyle::Long);
            Some(TimelineItem {
                id: e.id().map(str::to_string),
                content: e.title_or_default().to_string(),
                start,
                end: end.unwrap_or(start),
                kind: if end.is_some() {
                    ItemKind::Range
                } else {
                    ItemKind::Box
                },
                color: catalog.event_color(e, style).to_string(),
                title: format!("{}\n{date}\n\nClick to view details", e.title_or_default()),
            })
        })
        .collect();
    debug!(events = events.len(), items = items.len(), "timeline items");
    items
}

/// Visible range of the timeline axis, in fractional years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineWindow {
    pub start: f64,
    pub end: f64,
}

impl Default for TimelineWindow {
    fn default() -> Self {
        TimelineWindow {
            start: f64::from(DEFAULT_START_YEAR),
            end: f64::from(DEFAULT_END_YEAR),
        }
    }
}

impl TimelineWindow {
    /// Earliest start to latest end, padded by a tenth of the span on each
    /// side (at least one year). `None` when there is nothing to fit.
    pub fn fit(items: &[TimelineItem]) -> Option<Self> {
        let min = items.iter().map(|i| i.start).reduce(f64::min)?;
        let max = items.iter().map(|i| i.end.max(i.start)).reduce(f64::max)?;
        let padding = ((max - min) * 0.1).max(1.0);
        Some(TimelineWindow {
            start: min - padding,
            end: max + padding,
        })
    }

    /// Fitted to the visible items whatever the selection; the default span
    /// only when nothing is dated.
    pub fn fitted_or_default(items: &[TimelineItem]) -> Self {
        TimelineWindow::fit(items).unwrap_or_default()
    }

    /// Target of the reset button: the full default span for "all", the
    /// fitted window for a single period.
    pub fn reset_for(selection: &PeriodSelection, items: &[TimelineItem]) -> Self {
        if selection.is_all() {
            TimelineWindow::default()
        } else {
            TimelineWindow::fitted_or_default(items)
        }
    }

    /// Zoom around the center; `factor` > 1 shows less.
    pub fn zoom(&self, factor: f64) -> Self {
        let center = (self.start + self.end) / 2.0;
        let half = (self.end - self.start) / 2.0 / factor;
        TimelineWindow {
            start: center - half,
            end: center + half,
        }
    }
}

// ── Legend ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub id: Option<String>,
    pub name: String,
    pub years: String,
    pub color: String,
}

/// Periods when "all" is selected, else the selected period's sub-periods.
pub fn legend(catalog: &Catalog, selection: &PeriodSelection) -> Vec<LegendEntry> {
    match selection.period_id() {
        None => catalog
            .periods()
            .iter()
            .map(|p| LegendEntry {
                id: p.id().map(str::to_string),
                name: name_or_unknown(&p.name),
                years: format::format_year_range(p.start_year, p.end_year),
                color: non_empty(p.color.as_deref())
                    .or_else(|| p.slug.as_deref().and_then(palette::slug_color))
                    .unwrap_or(palette::TIMELINE_FALLBACK)
                    .to_string(),
            })
            .collect(),
        Some(period_id) => {
            let parent_slug_color = catalog
                .period(period_id)
                .and_then(|p| p.slug.as_deref())
                .and_then(palette::slug_color);
            catalog
                .sub_periods_of(period_id)
                .into_iter()
                .map(|s| LegendEntry {
                    id: s.id().map(str::to_string),
                    name: name_or_unknown(&s.name),
                    years: format::format_year_range(s.start_year, s.end_year),
                    color: non_empty(s.color.as_deref())
                        .or_else(|| catalog.sub_period_shade(s))
                        .or(parent_slug_color)
                        .unwrap_or(palette::TIMELINE_FALLBACK)
                        .to_string(),
                })
                .collect()
        }
    }
}

fn name_or_unknown(name: &str) -> String {
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ObjectRef;
    use crate::model::{Period, SubPeriod};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Period {
                    id: Some("p1".into()),
                    name: "Ancient".into(),
                    slug: Some("ancient".into()),
                    start_year: Some(-2879),
                    end_year: Some(-179),
                    ..Default::default()
                },
                Period {
                    id: Some("p2".into()),
                    name: "".into(),
                    order: 1,
                    ..Default::default()
                },
            ],
            vec![
                SubPeriod {
                    id: Some("s1".into()),
                    name: "Hồng Bàng".into(),
                    period_id: Some(ObjectRef::Wrapped { oid: "p1".into() }),
                    ..Default::default()
                },
                SubPeriod {
                    id: Some("s2".into()),
                    name: "Âu Lạc".into(),
                    order: 1,
                    color: Some("#000000".into()),
                    period_id: Some("p1".into()),
                    ..Default::default()
                },
            ],
            vec![],
        )
    }

    fn ev(id: &str, date: Option<EventDate>, end: Option<EventDate>) -> Event {
        Event {
            id: Some(id.into()),
            title: Some(id.to_uppercase()),
            date,
            end_date: end,
            period_id: Some("p1".into()),
            sub_period_id: Some("s1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_decimal_year() {
        assert_eq!(decimal_year(&EventDate::year(938)), Some(938.0));
        let d = EventDate {
            year: Some(1945),
            month: Some(6),
            day: Some(1),
            display_date: None,
        };
        assert_eq!(decimal_year(&d), Some(1945.5));
        assert_eq!(decimal_year(&EventDate::default()), None);
    }

    #[test]
    fn test_items_box_and_range() {
        let c = catalog();
        let a = ev("a", Some(EventDate::year(-258)), None);
        let b = ev("b", Some(EventDate::year(-257)), Some(EventDate::year(-207)));
        let undated = ev("c", None, None);
        let items = timeline_items(&c, &[&a, &b, &undated], &PeriodSelection::All);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ItemKind::Box);
        assert_eq!(items[0].end, items[0].start);
        assert_eq!(items[1].kind, ItemKind::Range);
        assert_eq!(items[1].end, -207.0);
        assert_eq!(items[0].title, "A\n258 BC\n\nClick to view details");
    }

    #[test]
    fn test_item_color_follows_focus() {
        let c = catalog();
        let a = ev("a", Some(EventDate::year(-258)), None);
        let all = timeline_items(&c, &[&a], &PeriodSelection::All);
        assert_eq!(all[0].color, "#8B4513");
        let focused = timeline_items(&c, &[&a], &PeriodSelection::Period("p1".into()));
        assert_eq!(focused[0].color, "#A0522D");
    }

    #[test]
    fn test_window_default_and_fit() {
        assert_eq!(
            TimelineWindow::default(),
            TimelineWindow {
                start: -2879.0,
                end: 2025.0
            }
        );
        let c = catalog();
        let a = ev("a", Some(EventDate::year(1000)), None);
        let b = ev("b", Some(EventDate::year(1050)), Some(EventDate::year(1100)));
        let items = timeline_items(&c, &[&a, &b], &PeriodSelection::All);
        let w = TimelineWindow::fit(&items).unwrap();
        assert_eq!(w, TimelineWindow { start: 990.0, end: 1110.0 });
        assert_eq!(TimelineWindow::fit(&[]), None);
        assert_eq!(TimelineWindow::fitted_or_default(&items), w);
        assert_eq!(TimelineWindow::fitted_or_default(&[]), TimelineWindow::default());
        assert_eq!(
            TimelineWindow::reset_for(&PeriodSelection::All, &items),
            TimelineWindow::default()
        );
        assert_eq!(
            TimelineWindow::reset_for(&PeriodSelection::Period("p1".into()), &items),
            w
        );
    }

    #[test]
    fn test_single_item_window_has_padding() {
        let c = catalog();
        let a = ev("a", Some(EventDate::year(938)), None);
        let items = timeline_items(&c, &[&a], &PeriodSelection::All);
        let w = TimelineWindow::fit(&items).unwrap();
        assert_eq!(w, TimelineWindow { start: 937.0, end: 939.0 });
    }

    #[test]
    fn test_zoom_keeps_center() {
        let w = TimelineWindow { start: 0.0, end: 100.0 }.zoom(2.0);
        assert_eq!(w, TimelineWindow { start: 25.0, end: 75.0 });
    }

    #[test]
    fn test_legend_periods_when_all() {
        let c = catalog();
        let entries = legend(&c, &PeriodSelection::All);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].years, "2879 BC - 179 BC");
        assert_eq!(entries[0].color, "#8B4513");
        assert_eq!(entries[1].name, "Unknown");
        assert_eq!(entries[1].years, "Various dates");
        assert_eq!(entries[1].color, "#3b82f6");
    }

    #[test]
    fn test_legend_sub_periods_when_focused() {
        let c = catalog();
        let entries = legend(&c, &PeriodSelection::Period("p1".into()));
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Hồng Bàng", "Âu Lạc"]);
        assert_eq!(entries[0].color, "#A0522D");
        assert_eq!(entries[1].color, "#000000");
    }
}
