//! Collection snapshots exported from the document store.
//!
//! Expected layout: any directory tree containing files named like
//! `{db}.periods.json`, `{db}.subPeriods.json` and `{db}.events.json`.
//! Each file is either a JSON array (`mongoexport --jsonArray`) or one
//! document per line (plain `mongoexport`). Several files of the same
//! collection are concatenated in path order.

use std::path::{Path, PathBuf};

use atlas_core::location::Projection;
use atlas_core::{Collection, Event, Explorer, LoadError, Period, SubPeriod, decode_collection};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::AtlasError;

/// Snapshot files found under a data directory, grouped by collection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SnapshotFiles {
    pub periods: Vec<PathBuf>,
    pub sub_periods: Vec<PathBuf>,
    pub events: Vec<PathBuf>,
}

impl SnapshotFiles {
    fn bucket(&mut self, collection: Collection) -> &mut Vec<PathBuf> {
        match collection {
            Collection::Periods => &mut self.periods,
            Collection::SubPeriods => &mut self.sub_periods,
            Collection::Events => &mut self.events,
        }
    }
}

/// Which collection a file name belongs to. `subPeriods` is tested before
/// `periods` since the lowercase spelling ends with the same suffix.
pub fn classify(file_name: &str) -> Option<Collection> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with("subperiods.json") {
        Some(Collection::SubPeriods)
    } else if lower.ends_with("periods.json") {
        Some(Collection::Periods)
    } else if lower.ends_with("events.json") {
        Some(Collection::Events)
    } else {
        None
    }
}

pub fn discover(dir: &Path) -> Result<SnapshotFiles, AtlasError> {
    let mut files = SnapshotFiles::default();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if let Some(collection) = classify(name) {
            debug!(path = %entry.path().display(), %collection, "snapshot file");
            files.bucket(collection).push(entry.into_path());
        }
    }
    Ok(files)
}

/// Parse a file body into one JSON array, accepting either export style.
pub fn parse_documents(source: &str, text: &str) -> Result<Value, LoadError> {
    let decode = |e: serde_json::Error| LoadError::Decode {
        endpoint: source.to_string(),
        reason: e.to_string(),
    };
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).map_err(decode);
    }
    let docs = serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(decode)?;
    Ok(Value::Array(docs))
}

fn read_collection<T: DeserializeOwned>(
    collection: Collection,
    paths: &[PathBuf],
) -> Result<Vec<T>, LoadError> {
    if paths.is_empty() {
        return Err(LoadError::NotFound(format!("{collection} snapshot")));
    }
    let mut out = Vec::new();
    for path in paths {
        let source = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::Transport {
            endpoint: source.clone(),
            reason: e.to_string(),
        })?;
        let body = parse_documents(&source, &text)?;
        out.extend(decode_collection::<T>(&source, body)?);
    }
    Ok(out)
}

/// Load every collection under `dir` into an explorer.
///
/// Missing or unreadable period and sub-period snapshots degrade to empty
/// collections, exactly as a failed fetch does in the browser. Events are
/// the point of every command, so a missing events snapshot is an error.
pub fn load(dir: &Path, projection: Projection) -> Result<Explorer, AtlasError> {
    let files = discover(dir)?;
    if files.events.is_empty() {
        return Err(AtlasError::MissingSnapshot {
            collection: Collection::Events.to_string(),
            dir: dir.to_path_buf(),
        });
    }
    let explorer = Explorer::from_settled(
        read_collection::<Period>(Collection::Periods, &files.periods),
        read_collection::<SubPeriod>(Collection::SubPeriods, &files.sub_periods),
        read_collection::<Event>(Collection::Events, &files.events),
    )
    .with_projection(projection);
    info!(
        dir = %dir.display(),
        periods = explorer.catalog().periods().len(),
        sub_periods = explorer.catalog().sub_periods().len(),
        events = explorer.catalog().events().len(),
        "snapshot loaded"
    );
    Ok(explorer)
}
