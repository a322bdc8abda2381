//! Location subsystem: free-text address → coordinates.
//!
//! Provides the built-in place directory, geocoding providers, and the
//! resolver that chains them with a fixed default.

pub mod directory;
pub mod providers;
pub mod resolver;
pub mod types;

pub use directory::{directory_list, PlaceInfo};
pub use providers::{GeocodeHit, GeocodeProvider};
pub use resolver::{default_location, LocationResolver};
pub use types::{format_coords, LocationSource, ResolvedLocation};
