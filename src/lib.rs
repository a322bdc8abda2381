//! repairscope: repair cost estimation and repair-shop lookup.
//!
//! The crate is split along the request paths it serves:
//! `estimate` prices a damage assessment, `location` turns free text into
//! coordinates, and `shops` ranks nearby repair shops. All of them fall back
//! to deterministic data when an upstream provider is unavailable.

pub mod config;
pub mod estimate;
pub mod fallback;
pub mod geo;
pub mod google;
pub mod location;
pub mod server;
pub mod shops;
