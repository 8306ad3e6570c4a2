//! Cross-page handoff: the detail page leaves a note in session storage and
//! the map or timeline page picks it up once on load.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::Event;

/// Key read by the map page.
pub const MAP_KEY: &str = "selectedEvent";
/// Key read by the timeline page.
pub const TIMELINE_KEY: &str = "selectedTimelineEvent";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Handoff {
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl Handoff {
    /// For the map page. `None` when the event has no coordinates.
    pub fn for_map(event: &Event) -> Option<Self> {
        let coords = event.coordinates()?;
        Some(Handoff {
            id: event.id().map(str::to_string),
            title: event.title.clone(),
            lat: Some(coords.lat),
            lng: Some(coords.lng),
            year: None,
            period: event.period_id().map(str::to_string),
        })
    }

    /// For the timeline page.
    pub fn for_timeline(event: &Event) -> Self {
        Handoff {
            id: event.id().map(str::to_string),
            year: event.date.as_ref().and_then(|d| d.year),
            period: event.period_id().map(str::to_string),
            ..Default::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("cannot encode handoff: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("session storage rejected write: {0}")]
    Store(String),
}

/// Session-scoped key/value storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), HandoffError>;
    fn remove(&mut self, key: &str);
}

/// In-process store for tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), HandoffError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

pub fn write<S: SessionStore>(store: &mut S, key: &str, handoff: &Handoff) -> Result<(), HandoffError> {
    let json = serde_json::to_string(handoff)?;
    store.set(key, json)
}

/// Read and delete the record under `key`. A malformed record is dropped.
pub fn take_once<S: SessionStore>(store: &mut S, key: &str) -> Option<Handoff> {
    let raw = store.get(key)?;
    store.remove(key);
    match serde_json::from_str(&raw) {
        Ok(handoff) => Some(handoff),
        Err(e) => {
            warn!(key, error = %e, "discarding malformed handoff");
            None
        }
    }
}
