use std::path::{Path, PathBuf};

use atlas_core::location::Projection;
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::error::AtlasError;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_NAME: &str = "atlas";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Directory holding the exported `*.periods.json`, `*.subPeriods.json`
    /// and `*.events.json` files.
    pub data_dir: PathBuf,
    /// Where `export` writes its view-model files.
    pub output_dir: PathBuf,
    pub projection: Projection,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        AtlasConfig {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            projection: Projection::Canvas,
        }
    }
}

/// Layered load: settings file, then `ATLAS__*` environment variables.
///
/// An explicit `path` must exist; the default `atlas.toml` is optional.
pub fn load_config(path: Option<&Path>) -> Result<AtlasConfig, AtlasError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };
    let cfg = Config::builder()
        .add_source(file)
        .add_source(Environment::with_prefix("ATLAS").separator("__"))
        .build()?
        .try_deserialize::<AtlasConfig>()?;
    debug!(?cfg, "configuration loaded");
    Ok(cfg)
}

/// Command-line values that win over file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub projection: Option<Projection>,
}

impl AtlasConfig {
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(projection) = overrides.projection {
            self.projection = projection;
        }
        self
    }
}
