//! Reference price tables (USD).

use super::types::{Part, Severity};

/// Base cost for parts not in the table.
pub const DEFAULT_PART_COST: f64 = 500.0;

/// Flat refinish charge per exterior panel.
pub const PAINT_PER_PANEL: f64 = 200.0;

/// Replacement of two airbags.
pub const AIRBAG_SURCHARGE: f64 = 3000.0;

pub const TOWING_SURCHARGE: f64 = 300.0;

/// Minimum charge for any job with damage.
pub const MINIMUM_CHARGE: f64 = 600.0;

/// Confidence assumed when the classifier reports none.
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

const PART_COSTS: &[(Part, f64)] = &[
    (Part::FrontBumper, 500.0),
    (Part::RearBumper, 500.0),
    (Part::FrontDoor, 800.0),
    (Part::RearDoor, 800.0),
    (Part::Hood, 1200.0),
    (Part::Roof, 2500.0),
    (Part::Fender, 700.0),
    (Part::QuarterPanel, 700.0),
    (Part::Trunk, 700.0),
    (Part::Windshield, 500.0),
    (Part::RearGlass, 400.0),
    (Part::SideGlass, 400.0),
    (Part::Headlight, 300.0),
    (Part::Taillight, 300.0),
    (Part::Wheel, 400.0),
    (Part::Tire, 400.0),
    (Part::Frame, 2000.0),
];

pub fn base_part_cost(part: &Part) -> f64 {
    PART_COSTS
        .iter()
        .find(|(p, _)| p == part)
        .map(|(_, cost)| *cost)
        .unwrap_or(DEFAULT_PART_COST)
}

pub fn severity_multiplier(severity: &Severity) -> f64 {
    match severity {
        Severity::Minor => 0.5,
        Severity::Moderate => 1.0,
        Severity::Severe => 2.0,
        Severity::Catastrophic => 3.0,
        Severity::Unknown(_) => 1.0,
    }
}

/// Half-width of the estimate range as a fraction of the total.
pub fn range_pct(confidence: f64) -> f64 {
    if confidence >= 0.8 {
        0.15
    } else if confidence >= 0.6 {
        0.25
    } else {
        0.35
    }
}
