//! Assessment → cost breakdown.

use super::tables::{
    base_part_cost, range_pct, severity_multiplier, AIRBAG_SURCHARGE, DEFAULT_CONFIDENCE,
    MINIMUM_CHARGE, PAINT_PER_PANEL, TOWING_SURCHARGE,
};
use super::types::{CostBreakdown, DamageAssessment, EstimateRange, LineItem};
use tracing::debug;

/// Price a damage assessment.
///
/// Total over its input: unknown parts and severities fall back to the
/// default base cost and the moderate multiplier. No randomness, so equal
/// inputs produce equal outputs.
pub fn estimate(assessment: &DamageAssessment) -> CostBreakdown {
    let confidence = assessment.clamped_confidence();
    let parts = assessment.effective_parts();

    if !assessment.vehicle_detected || parts.is_empty() {
        debug!(
            vehicle = assessment.vehicle_detected,
            damage = assessment.damage_detected,
            "nothing to price"
        );
        return CostBreakdown::zero(confidence.unwrap_or(1.0));
    }

    let line_items: Vec<LineItem> = parts
        .iter()
        .map(|d| LineItem {
            part: d.part.clone(),
            severity: d.severity.clone(),
            cost: base_part_cost(&d.part) * severity_multiplier(&d.severity),
            paint: if d.part.is_exterior_panel() { PAINT_PER_PANEL } else { 0.0 },
        })
        .collect();

    let parts_and_labor: f64 = line_items.iter().map(|i| i.cost).sum();
    let paint: f64 = line_items.iter().map(|i| i.paint).sum();

    let mut surcharges = 0.0;
    if assessment.airbags_deployed {
        surcharges += AIRBAG_SURCHARGE;
    }
    if !assessment.drivable {
        surcharges += TOWING_SURCHARGE;
    }

    let total = parts_and_labor + paint + surcharges;
    let adjusted_total = total.max(MINIMUM_CHARGE);

    let confidence = confidence.unwrap_or(DEFAULT_CONFIDENCE);
    let pct = range_pct(confidence);

    let breakdown = CostBreakdown {
        parts_and_labor,
        paint,
        surcharges,
        total,
        adjusted_total,
        floor_applied: adjusted_total > total,
        estimate_range: EstimateRange {
            low: (adjusted_total * (1.0 - pct)).round(),
            high: (adjusted_total * (1.0 + pct)).round(),
        },
        midpoint: adjusted_total.round(),
        confidence,
        line_items,
    };

    debug!(
        parts = breakdown.line_items.len(),
        total = breakdown.total,
        low = breakdown.estimate_range.low,
        high = breakdown.estimate_range.high,
        "estimate computed"
    );

    breakdown
}
