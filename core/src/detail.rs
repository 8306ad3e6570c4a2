//! Event detail page.
//!
//! Each optional section (significance, key figures, related events, tags)
//! is built independently; an empty one is simply hidden by the page.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::format::{self, MonthStyle};
use crate::ids::matches_id;
use crate::model::{Event, KeyFigure, non_empty};

/// Related events shown under the body.
pub const RELATED_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFigureView {
    pub name: String,
    pub role: String,
    pub description: String,
}

impl From<&KeyFigure> for KeyFigureView {
    fn from(figure: &KeyFigure) -> Self {
        KeyFigureView {
            name: non_empty(figure.name.as_deref())
                .unwrap_or("Unknown")
                .to_string(),
            role: non_empty(figure.role.as_deref())
                .unwrap_or("Role not specified")
                .to_string(),
            description: non_empty(figure.description.as_deref())
                .unwrap_or("No description available.")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedEvent {
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub id: Option<String>,
    pub title: String,
    pub localized_title: Option<String>,
    /// Header date, short month names.
    pub date: String,
    /// Sidebar date, long month names.
    pub date_full: String,
    pub location: String,
    pub period: String,
    pub kind: Option<String>,
    pub description: Vec<String>,
    pub significance: Vec<String>,
    pub key_figures: Vec<KeyFigureView>,
    pub related: Vec<RelatedEvent>,
    pub tags: Vec<String>,
}

impl DetailView {
    pub fn build(catalog: &Catalog, event: &Event) -> Self {
        let description = match non_empty(event.description.as_deref()) {
            Some(text) => format::paragraphs(text).into_iter().map(str::to_string).collect(),
            None => vec!["No description available.".to_string()],
        };
        let significance = event
            .significance
            .as_deref()
            .map(|text| format::paragraphs(text).into_iter().map(str::to_string).collect())
            .unwrap_or_default();

        DetailView {
            id: event.id().map(str::to_string),
            title: event.title_or_default().to_string(),
            localized_title: non_empty(event.localized_title.as_deref()).map(str::to_string),
            date: format::format_event_date(event.date.as_ref(), MonthStyle::Short),
            date_full: format::format_event_date(event.date.as_ref(), MonthStyle::Long),
            location: event.location_label().to_string(),
            period: catalog.period_label(event).to_string(),
            kind: non_empty(event.kind.as_deref()).map(str::to_string),
            description,
            significance,
            key_figures: event.key_figures.iter().map(KeyFigureView::from).collect(),
            related: related_events(catalog, event, RELATED_LIMIT),
            tags: event.tags.clone(),
        }
    }

    /// Browser tab title.
    pub fn document_title(&self) -> String {
        format!("{} - Vietnamese History", self.title)
    }
}

/// Other events of the same period, in fetch order.
pub fn related_events(catalog: &Catalog, event: &Event, limit: usize) -> Vec<RelatedEvent> {
    let Some(period_id) = event.period_id() else {
        return Vec::new();
    };
    let own_id = event.id();
    catalog
        .events()
        .iter()
        .filter(|other| matches_id(other.period_id.as_ref(), period_id))
        .filter(|other| own_id.is_none() || other.id() != own_id)
        .take(limit)
        .map(|other| RelatedEvent {
            id: other.id().map(str::to_string),
            title: other.title_or_default().to_string(),
            date: format::format_event_date(other.date.as_ref(), MonthStyle::Short),
            summary: other.summary().to_string(),
        })
        .collect()
}

/// Text offered to the system share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn new(event: &Event, url: &str) -> Self {
        SharePayload {
            title: non_empty(event.title.as_deref())
                .unwrap_or("Vietnamese History Event")
                .to_string(),
            text: non_empty(event.short_description.as_deref())
                .or_else(|| non_empty(event.description.as_deref()))
                .unwrap_or_default()
                .to_string(),
            url: url.to_string(),
        }
    }
}
