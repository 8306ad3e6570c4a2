//! Identifier normalization.
//!
//! The document store serializes ids inconsistently across endpoints: a bare
//! string, an extended-JSON `{"$oid": "..."}` wrapper, or an embedded document
//! carrying its own `_id`. Every cross-reference goes through [`ObjectRef`]
//! so both sides are compared in canonical form.

use serde::{Deserialize, Serialize};
use tracing::warn;

// ── Identifier shapes ────────────────────────────────────────────────────

/// An entity reference as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectRef {
    /// `"656f..."`
    Plain(String),
    /// `{"$oid": "656f..."}`
    Wrapped {
        #[serde(rename = "$oid")]
        oid: String,
    },
    /// `{"_id": "656f..."}` or `{"_id": {"$oid": "656f..."}}`
    Nested {
        #[serde(rename = "_id")]
        id: Box<ObjectRef>,
    },
    /// Any other JSON shape. Kept so one bad id never fails a whole collection.
    Unrecognized(serde_json::Value),
}

impl ObjectRef {
    /// Canonical string form, or `None` for shapes outside the accepted set.
    pub fn normalize(&self) -> Option<&str> {
        match self {
            ObjectRef::Plain(s) => Some(s.as_str()),
            ObjectRef::Wrapped { oid } => Some(oid.as_str()),
            ObjectRef::Nested { id } => id.normalize(),
            ObjectRef::Unrecognized(value) => {
                warn!(shape = %value, "rejecting unrecognized identifier shape");
                None
            }
        }
    }

    /// Owned canonical id.
    pub fn to_id(&self) -> Option<String> {
        self.normalize().map(str::to_string)
    }
}

impl From<&str> for ObjectRef {
    fn from(s: &str) -> Self {
        ObjectRef::Plain(s.to_string())
    }
}

impl From<String> for ObjectRef {
    fn from(s: String) -> Self {
        ObjectRef::Plain(s)
    }
}

/// Normalize an optional reference (`null` and absent both map to `None`).
pub fn normalize_id(id: Option<&ObjectRef>) -> Option<&str> {
    id.and_then(ObjectRef::normalize)
}

/// True when both references resolve and their canonical forms are equal.
pub fn same_id(a: Option<&ObjectRef>, b: Option<&ObjectRef>) -> bool {
    match (normalize_id(a), normalize_id(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// True when the reference resolves to exactly `id`.
pub fn matches_id(reference: Option<&ObjectRef>, id: &str) -> bool {
    normalize_id(reference) == Some(id)
}
