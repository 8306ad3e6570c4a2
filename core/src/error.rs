use std::fmt;

/// The three independently loaded collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Periods,
    SubPeriods,
    Events,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Collection::Periods => "periods",
            Collection::SubPeriods => "sub-periods",
            Collection::Events => "events",
        })
    }
}

/// Why a collection or entity could not be loaded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },
    /// Any non-2xx answer. The status is for logs, never for users.
    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("cannot decode {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
    #[error("{0} not found")]
    NotFound(String),
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_) | LoadError::Status { status: 404, .. })
    }
}

/// A collection that degraded to empty, kept for the non-fatal banner.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub collection: Collection,
    pub error: LoadError,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not load {}", self.collection)
    }
}
