//! REST contract of the history API: endpoints, base URL selection and the
//! payloads the diagnostics and admin routes exchange.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{EventDate, KeyFigure, Location, non_empty};

/// Base URL when the frontend is served from a developer machine.
pub const DEV_BASE: &str = "http://localhost:3000/api";
/// Deployed API.
pub const PRODUCTION_BASE: &str = "https://vietnamese-history-api-dvwf.onrender.com/api";
/// Search radius for `/events/near` when none is given, in metres.
pub const DEFAULT_NEAR_DISTANCE_M: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Periods,
    SubPeriods,
    SubPeriodsOf(String),
    Events,
    Event(String),
    /// Server-side text search. The pages search client-side instead.
    Search(String),
    EventsOfPeriod(String),
    EventsOfSubPeriod(String),
    Range { start: i32, end: i32 },
    Near { lat: f64, lng: f64, distance: Option<u32> },
    CreateEvent,
    UpdateEvent(String),
    DeleteEvent(String),
    Stats,
    Health,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::CreateEvent => Method::Post,
            Endpoint::UpdateEvent(_) => Method::Put,
            Endpoint::DeleteEvent(_) => Method::Delete,
            _ => Method::Get,
        }
    }

    /// Path relative to the API base, with a leading slash.
    pub fn path(&self) -> String {
        let seg = |s: &str| urlencoding::encode(s).into_owned();
        match self {
            Endpoint::Periods => "/periods".to_string(),
            Endpoint::SubPeriods => "/subperiods".to_string(),
            Endpoint::SubPeriodsOf(id) => format!("/subperiods/period/{}", seg(id)),
            Endpoint::Events | Endpoint::CreateEvent => "/events".to_string(),
            Endpoint::Event(id) | Endpoint::UpdateEvent(id) | Endpoint::DeleteEvent(id) => {
                format!("/events/{}", seg(id))
            }
            Endpoint::Search(_) => "/events/search".to_string(),
            Endpoint::EventsOfPeriod(id) => format!("/events/period/{}", seg(id)),
            Endpoint::EventsOfSubPeriod(id) => format!("/events/subperiod/{}", seg(id)),
            Endpoint::Range { .. } => "/events/range".to_string(),
            Endpoint::Near { .. } => "/events/near".to_string(),
            Endpoint::Stats => "/stats".to_string(),
            Endpoint::Health => "/health".to_string(),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Search(q) => vec![("q", q.clone())],
            Endpoint::Range { start, end } => vec![("start", start.to_string()), ("end", end.to_string())],
            Endpoint::Near { lat, lng, distance } => vec![
                ("lat", lat.to_string()),
                ("lng", lng.to_string()),
                (
                    "distance",
                    distance.unwrap_or(DEFAULT_NEAR_DISTANCE_M).to_string(),
                ),
            ],
            _ => Vec::new(),
        }
    }

    /// Path plus encoded query string.
    pub fn path_and_query(&self) -> String {
        let path = self.path();
        let query = self.query();
        if query.is_empty() {
            return path;
        }
        let pairs: Vec<String> = query
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect();
        format!("{path}?{}", pairs.join("&"))
    }
}

/// Where the API lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: PRODUCTION_BASE.to_string(),
        }
    }
}

impl ApiConfig {
    /// Local API for `localhost`/`127.0.0.1`, production otherwise.
    pub fn for_host(hostname: &str) -> Self {
        let base = if is_local_host(hostname) {
            DEV_BASE
        } else {
            PRODUCTION_BASE
        };
        ApiConfig {
            base_url: base.to_string(),
        }
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path_and_query()
        )
    }
}

pub fn is_local_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1")
}

// ── Payloads ─────────────────────────────────────────────────────────────

/// Body of every non-2xx answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCount {
    #[serde(rename = "_id")]
    pub period: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_events: u64,
    #[serde(default)]
    pub total_periods: u64,
    #[serde(default)]
    pub total_sub_periods: u64,
    #[serde(default)]
    pub events_by_period: Vec<PeriodCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("title, periodId and date are required")]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Create payload for `POST /events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "titleVietnamese", default, skip_serializing_if = "Option::is_none")]
    pub localized_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_period_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<EventDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<EventDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_figures: Vec<KeyFigure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if non_empty(self.title.as_deref()).is_none() {
            missing.push("title");
        }
        if non_empty(self.period_id.as_deref()).is_none() {
            missing.push("periodId");
        }
        if self.date.as_ref().and_then(|d| d.year).is_none() {
            missing.push("date");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::Periods.path(), "/periods");
        assert_eq!(Endpoint::SubPeriodsOf("p1".into()).path(), "/subperiods/period/p1");
        assert_eq!(Endpoint::Event("e 1".into()).path(), "/events/e%201");
        assert_eq!(Endpoint::EventsOfSubPeriod("s1".into()).path(), "/events/subperiod/s1");
        assert_eq!(Endpoint::DeleteEvent("e1".into()).method(), Method::Delete);
        assert_eq!(Endpoint::CreateEvent.method(), Method::Post);
        assert_eq!(Endpoint::Stats.method(), Method::Get);
    }

    #[test]
    fn test_query_strings() {
        assert_eq!(
            Endpoint::Search("Trần Hưng Đạo".into()).path_and_query(),
            "/events/search?q=Tr%E1%BA%A7n%20H%C6%B0ng%20%C4%90%E1%BA%A1o"
        );
        assert_eq!(
            Endpoint::Range { start: -258, end: 938 }.path_and_query(),
            "/events/range?start=-258&end=938"
        );
        assert_eq!(
            Endpoint::Near { lat: 21.5, lng: 105.25, distance: None }.path_and_query(),
            "/events/near?lat=21.5&lng=105.25&distance=100000"
        );
    }

    #[test]
    fn test_config_for_host() {
        assert_eq!(ApiConfig::for_host("localhost").base_url, DEV_BASE);
        assert_eq!(ApiConfig::for_host("127.0.0.1").base_url, DEV_BASE);
        assert_eq!(ApiConfig::for_host("history.example.org").base_url, PRODUCTION_BASE);
        let local = ApiConfig::for_host("localhost");
        assert_eq!(local.url(&Endpoint::Events), "http://localhost:3000/api/events");
        let remote = ApiConfig::for_host("history.example.org");
        assert_eq!(
            remote.url(&Endpoint::Events),
            "https://vietnamese-history-api-dvwf.onrender.com/api/events"
        );
        let slash = ApiConfig {
            base_url: "http://x/api/".into(),
        };
        assert_eq!(slash.url(&Endpoint::Health), "http://x/api/health");
    }

    #[test]
    fn test_new_event_validation() {
        let err = NewEvent::default().validate().unwrap_err();
        assert_eq!(err.missing, ["title", "periodId", "date"]);
        assert_eq!(err.to_string(), "title, periodId and date are required");

        let ok = NewEvent {
            title: Some("Founding of Thăng Long".into()),
            period_id: Some("p3".into()),
            date: Some(EventDate::year(1010)),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_decode_stats_and_health() {
        let stats: StatsResponse = serde_json::from_str(
            r#"{"totalEvents":12,"totalPeriods":3,"totalSubPeriods":9,
                "eventsByPeriod":[{"_id":"p1","count":7},{"_id":null,"count":5}]}"#,
        )
        .unwrap();
        assert_eq!(stats.events_by_period.len(), 2);
        assert_eq!(stats.events_by_period[1].period, None);

        let health: Health =
            serde_json::from_str(r#"{"status":"OK","database":"Connected"}"#).unwrap();
        assert!(health.is_ok());
    }
}
