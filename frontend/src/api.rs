//! Fetches against the history API.

use atlas_core::api::{ApiConfig, Endpoint};
use atlas_core::{Event, Explorer, LoadError, Period, SubPeriod, decode_collection};
use gloo_net::http::Request;
use leptos::logging::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Local API when served from a developer machine, production otherwise.
pub fn api_config() -> ApiConfig {
    let host = web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    ApiConfig::for_host(&host)
}

async fn get_json(config: &ApiConfig, endpoint: &Endpoint) -> Result<Value, LoadError> {
    let path = endpoint.path();
    let resp = Request::get(&config.url(endpoint))
        .send()
        .await
        .map_err(|e| LoadError::Transport {
            endpoint: path.clone(),
            reason: e.to_string(),
        })?;
    if !resp.ok() {
        return Err(LoadError::Status {
            endpoint: path,
            status: resp.status(),
        });
    }
    resp.json::<Value>().await.map_err(|e| LoadError::Decode {
        endpoint: path,
        reason: e.to_string(),
    })
}

async fn get_collection<T: DeserializeOwned>(
    config: &ApiConfig,
    endpoint: Endpoint,
) -> Result<Vec<T>, LoadError> {
    let body = get_json(config, &endpoint).await?;
    decode_collection(&endpoint.path(), body)
}

/// All three collections, fetched concurrently. Each one settles on its own;
/// a failed collection is empty and named in the explorer's banner.
pub async fn load_explorer() -> Explorer {
    let config = api_config();
    let (periods, sub_periods, events) = futures::join!(
        get_collection::<Period>(&config, Endpoint::Periods),
        get_collection::<SubPeriod>(&config, Endpoint::SubPeriods),
        get_collection::<Event>(&config, Endpoint::Events),
    );
    let explorer = Explorer::from_settled(periods, sub_periods, events);
    for failure in explorer.failures() {
        warn!("{failure}: {}", failure.error);
    }
    explorer
}

pub async fn load_event(id: &str) -> Result<Event, LoadError> {
    let endpoint = Endpoint::Event(id.to_string());
    match get_json(&api_config(), &endpoint).await {
        Ok(body) => serde_json::from_value(body).map_err(|e| LoadError::Decode {
            endpoint: endpoint.path(),
            reason: e.to_string(),
        }),
        Err(e) if e.is_not_found() => Err(LoadError::NotFound(format!("event {id}"))),
        Err(e) => Err(e),
    }
}
