//! Client-side data layer for the Vietnamese history atlas.
//!
//! Three collections (periods, sub-periods, events) are fetched separately,
//! joined into a [`Catalog`], filtered and searched through an [`Explorer`],
//! and turned into plain view models for the pages and the CLI.

pub mod api;
pub mod assign;
pub mod catalog;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod format;
pub mod handoff;
pub mod ids;
pub mod location;
pub mod model;
pub mod palette;
pub mod query;
pub mod search;
pub mod timeline;
pub mod view;

pub use catalog::{Catalog, MarkerStyle, decode_collection};
pub use error::{Collection, LoadError, LoadFailure};
pub use explorer::Explorer;
pub use filter::{FilterState, PeriodSelection, SortMode, SortModeError};
pub use ids::ObjectRef;
pub use model::{Event, EventDate, KeyFigure, LatLng, Location, Period, SubPeriod};

// ── Fallback text ────────────────────────────────────────────────────────

pub const UNKNOWN_PERIOD: &str = "Unknown Period";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const UNTITLED_EVENT: &str = "Untitled Event";
pub const NO_DESCRIPTION: &str = "No description available";
pub const UNKNOWN_DATE: &str = "Unknown date";
