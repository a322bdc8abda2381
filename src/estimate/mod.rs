//! Repair cost estimation from a structured damage assessment.

pub mod estimator;
pub mod tables;
pub mod types;

pub use estimator::estimate;
pub use types::{CostBreakdown, DamageAssessment, EstimateRange, LineItem, Part, PartDamage, Severity};
