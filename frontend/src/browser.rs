//! Thin wrappers over browser APIs: session storage, sharing, page title.

use atlas_core::detail::SharePayload;
use atlas_core::handoff::{HandoffError, SessionStore};
use gloo_storage::{SessionStorage, Storage};
use js_sys::{Function, Object, Promise, Reflect};
use leptos::logging::{log, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// `sessionStorage`, holding raw strings so other tabs' scripts can read them.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSession;

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        SessionStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), HandoffError> {
        SessionStorage::raw()
            .set_item(key, &value)
            .map_err(|e| HandoffError::Store(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = SessionStorage::raw().remove_item(key) {
            warn!("cannot clear {key}: {e:?}");
        }
    }
}

pub fn random() -> f64 {
    js_sys::Math::random()
}

pub fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

pub fn current_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

async fn settle(result: Result<JsValue, JsValue>) -> Result<JsValue, JsValue> {
    let value = result?;
    match value.dyn_into::<Promise>() {
        Ok(promise) => JsFuture::from(promise).await,
        Err(value) => Ok(value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    Prompted,
}

/// System share sheet, else clipboard, else a prompt with the link selected.
pub async fn share(payload: &SharePayload) -> ShareOutcome {
    let Some(window) = web_sys::window() else {
        return ShareOutcome::Prompted;
    };
    let navigator: JsValue = window.navigator().into();

    if let Some(share) = method(&navigator, "share") {
        let data = Object::new();
        let _ = Reflect::set(&data, &"title".into(), &payload.title.as_str().into());
        let _ = Reflect::set(&data, &"text".into(), &payload.text.as_str().into());
        let _ = Reflect::set(&data, &"url".into(), &payload.url.as_str().into());
        if let Err(e) = settle(share.call1(&navigator, &data)).await {
            log!("share dismissed: {e:?}");
        }
        return ShareOutcome::Shared;
    }

    if let Ok(clipboard) = Reflect::get(&navigator, &"clipboard".into())
        && !clipboard.is_undefined()
        && let Some(write) = method(&clipboard, "writeText")
    {
        let url = JsValue::from_str(&payload.url);
        match settle(write.call1(&clipboard, &url)).await {
            Ok(_) => {
                alert("Link copied to clipboard!");
                return ShareOutcome::Copied;
            }
            Err(e) => warn!("clipboard write failed: {e:?}"),
        }
    }

    let _ = window.prompt_with_message_and_default("Copy this link:", &payload.url);
    ShareOutcome::Prompted
}
