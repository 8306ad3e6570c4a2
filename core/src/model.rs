//! Periods, sub-periods and events as served by the history API.
//!
//! Every field tolerates absence: documents in the store were imported by hand
//! and optional sections come and go.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{ObjectRef, normalize_id};

// ── Period ───────────────────────────────────────────────────────────────

/// Top-level historical era.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Palette key, e.g. `monarchical`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Period {
    pub fn id(&self) -> Option<&str> {
        normalize_id(self.id.as_ref())
    }
}

// ── Sub-period ───────────────────────────────────────────────────────────

/// Finer-grained era within a [`Period`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPeriod {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,
    /// Falls back to the parent period's color when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_id: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
}

impl SubPeriod {
    pub fn id(&self) -> Option<&str> {
        normalize_id(self.id.as_ref())
    }

    pub fn period_id(&self) -> Option<&str> {
        normalize_id(self.period_id.as_ref())
    }
}

// ── Event ────────────────────────────────────────────────────────────────

/// Calendar date of an event. `month` is zero-based (January = 0), matching
/// how the dataset was authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDate {
    /// Negative for BC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// Free-form label some documents carry instead of a precise date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_date: Option<String>,
}

impl EventDate {
    pub fn year(year: i32) -> Self {
        EventDate {
            year: Some(year),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Where an event happened: a place name, a province, explicit coordinates,
/// or any combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modern_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// `None` unless both `lat` and `lng` are present.
    #[serde(
        default,
        deserialize_with = "partial_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<LatLng>,
}

impl Location {
    pub fn named(name: &str) -> Self {
        Location {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Name shown to users: place name, else province.
    pub fn label(&self) -> Option<&str> {
        non_empty(self.name.as_deref()).or_else(|| non_empty(self.province.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyFigure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A discrete historical occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Localized (Vietnamese) title.
    #[serde(
        rename = "titleVietnamese",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub localized_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<EventDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<EventDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_id: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_period_id: Option<ObjectRef>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub key_figures: Vec<KeyFigure>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

impl Event {
    pub fn id(&self) -> Option<&str> {
        normalize_id(self.id.as_ref())
    }

    pub fn period_id(&self) -> Option<&str> {
        normalize_id(self.period_id.as_ref())
    }

    pub fn sub_period_id(&self) -> Option<&str> {
        normalize_id(self.sub_period_id.as_ref())
    }

    /// Year used for ordering; a missing year sorts as 0.
    pub fn sort_year(&self) -> i32 {
        self.date.as_ref().and_then(|d| d.year).unwrap_or(0)
    }

    pub fn title_or_default(&self) -> &str {
        non_empty(self.title.as_deref())
            .or_else(|| non_empty(self.localized_title.as_deref()))
            .unwrap_or(crate::UNTITLED_EVENT)
    }

    /// Short description, else full description, else the fallback text.
    pub fn summary(&self) -> &str {
        non_empty(self.short_description.as_deref())
            .or_else(|| non_empty(self.description.as_deref()))
            .unwrap_or(crate::NO_DESCRIPTION)
    }

    pub fn location_label(&self) -> &str {
        self.location
            .as_ref()
            .and_then(Location::label)
            .unwrap_or(crate::UNKNOWN_LOCATION)
    }

    pub fn coordinates(&self) -> Option<LatLng> {
        self.location.as_ref().and_then(|l| l.coordinates)
    }
}

// ── Lenient fields ───────────────────────────────────────────────────────

/// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn partial_coordinates<'de, D>(deserializer: D) -> Result<Option<LatLng>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Partial {
        #[serde(default)]
        lat: Option<f64>,
        #[serde(default)]
        lng: Option<f64>,
    }

    Ok(Option::<Partial>::deserialize(deserializer)?.and_then(|p| match (p.lat, p.lng) {
        (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
        _ => None,
    }))
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_from_mongo_export() {
        let ev: Event = serde_json::from_value(json!({
            "_id": { "$oid": "e1" },
            "title": "Battle of Bach Dang",
            "titleVietnamese": "Trận Bạch Đằng",
            "date": { "year": 938 },
            "location": { "name": "Bạch Đằng", "coordinates": { "lat": 20.9, "lng": 106.8 } },
            "periodId": { "$oid": "p1" },
            "keyFigures": [{ "name": "Ngô Quyền", "role": "General" }],
            "tags": ["battle", "independence"],
            "featured": true
        }))
        .unwrap();
        assert_eq!(ev.id(), Some("e1"));
        assert_eq!(ev.period_id(), Some("p1"));
        assert_eq!(ev.sub_period_id(), None);
        assert_eq!(ev.localized_title.as_deref(), Some("Trận Bạch Đằng"));
        assert_eq!(ev.sort_year(), 938);
        assert_eq!(ev.key_figures.len(), 1);
        assert!(ev.featured);
        assert_eq!(ev.coordinates(), Some(LatLng { lat: 20.9, lng: 106.8 }));
    }

    #[test]
    fn test_empty_document_uses_fallbacks() {
        let ev: Event = serde_json::from_value(json!({})).unwrap();
        assert_eq!(ev.sort_year(), 0);
        assert_eq!(ev.title_or_default(), "Untitled Event");
        assert_eq!(ev.summary(), "No description available");
        assert_eq!(ev.location_label(), "Unknown Location");
    }

    #[test]
    fn test_nulls_and_partial_objects_use_fallbacks() {
        let ev: Event = serde_json::from_value(json!({
            "_id": "e2",
            "title": null,
            "tags": null,
            "keyFigures": null,
            "featured": null,
            "date": { "year": null },
            "location": { "name": "Huế", "coordinates": { "lat": 16.4 } }
        }))
        .unwrap();
        assert_eq!(ev.id(), Some("e2"));
        assert_eq!(ev.title_or_default(), "Untitled Event");
        assert!(ev.tags.is_empty());
        assert!(ev.key_figures.is_empty());
        assert!(!ev.featured);
        assert_eq!(ev.sort_year(), 0);
        assert_eq!(ev.location_label(), "Huế");
        assert_eq!(ev.coordinates(), None);

        let loc: Location = serde_json::from_value(json!({ "coordinates": {} })).unwrap();
        assert_eq!(loc.coordinates, None);
        let loc: Location = serde_json::from_value(json!({ "coordinates": null })).unwrap();
        assert_eq!(loc.coordinates, None);

        let p: Period =
            serde_json::from_value(json!({ "_id": "p1", "name": null, "order": null })).unwrap();
        assert_eq!(p.name, "");
        assert_eq!(p.order, 0);
        let s: SubPeriod = serde_json::from_value(json!({ "_id": "s1", "name": null })).unwrap();
        assert_eq!(s.id(), Some("s1"));
    }

    #[test]
    fn test_location_label_prefers_name_then_province() {
        let loc: Location = serde_json::from_value(json!({ "province": "Huế" })).unwrap();
        assert_eq!(loc.label(), Some("Huế"));
        let loc: Location =
            serde_json::from_value(json!({ "name": "Kinh thành", "province": "Huế" })).unwrap();
        assert_eq!(loc.label(), Some("Kinh thành"));
        let loc: Location = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert_eq!(loc.label(), None);
    }

    #[test]
    fn test_summary_prefers_short_description() {
        let ev = Event {
            description: Some("long".into()),
            short_description: Some("short".into()),
            ..Default::default()
        };
        assert_eq!(ev.summary(), "short");
    }

    #[test]
    fn test_period_defaults() {
        let p: Period = serde_json::from_value(json!({ "_id": "p1", "name": "Ancient" })).unwrap();
        assert_eq!(p.id(), Some("p1"));
        assert_eq!(p.order, 0);
        assert!(p.color.is_none());
    }
}
