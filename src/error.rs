use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot walk {path}: {0}", path = .0.path().map(|p| p.display().to_string()).unwrap_or_default())]
    Walk(#[from] walkdir::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("no {collection} snapshot found under {}", dir.display())]
    MissingSnapshot { collection: String, dir: PathBuf },
    #[error("no event with id {0}")]
    UnknownEvent(String),
}

impl AtlasError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AtlasError::Io {
            path: path.into(),
            source,
        }
    }
}
