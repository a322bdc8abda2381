//! Input and output types for cost estimation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A damaged vehicle part as reported by the vision classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Part {
    FrontBumper,
    RearBumper,
    FrontDoor,
    RearDoor,
    Hood,
    Roof,
    Fender,
    QuarterPanel,
    Trunk,
    Windshield,
    RearGlass,
    SideGlass,
    Headlight,
    Taillight,
    Wheel,
    Tire,
    Frame,
    /// Anything the classifier reports that is not in the list above.
    Other(String),
}

impl Part {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FrontBumper => "front_bumper",
            Self::RearBumper => "rear_bumper",
            Self::FrontDoor => "front_door",
            Self::RearDoor => "rear_door",
            Self::Hood => "hood",
            Self::Roof => "roof",
            Self::Fender => "fender",
            Self::QuarterPanel => "quarter_panel",
            Self::Trunk => "trunk",
            Self::Windshield => "windshield",
            Self::RearGlass => "rear_glass",
            Self::SideGlass => "side_glass",
            Self::Headlight => "headlight",
            Self::Taillight => "taillight",
            Self::Wheel => "wheel",
            Self::Tire => "tire",
            Self::Frame => "frame",
            Self::Other(s) => s,
        }
    }

    /// Body panels that need refinishing after repair.
    pub fn is_exterior_panel(&self) -> bool {
        matches!(
            self,
            Self::FrontBumper
                | Self::RearBumper
                | Self::FrontDoor
                | Self::RearDoor
                | Self::Hood
                | Self::Roof
                | Self::Fender
                | Self::QuarterPanel
                | Self::Trunk
        )
    }
}

/// Lower-case, trim, and fold spaces/hyphens to underscores.
fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl From<String> for Part {
    fn from(raw: String) -> Self {
        match normalize_label(&raw).as_str() {
            "front_bumper" => Self::FrontBumper,
            "rear_bumper" => Self::RearBumper,
            "front_door" => Self::FrontDoor,
            "rear_door" => Self::RearDoor,
            "hood" => Self::Hood,
            "roof" => Self::Roof,
            "fender" => Self::Fender,
            "quarter_panel" => Self::QuarterPanel,
            "trunk" => Self::Trunk,
            "windshield" => Self::Windshield,
            "rear_glass" => Self::RearGlass,
            "side_glass" => Self::SideGlass,
            "headlight" => Self::Headlight,
            "taillight" => Self::Taillight,
            "wheel" => Self::Wheel,
            "tire" => Self::Tire,
            "frame" => Self::Frame,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for Part {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

/// A null or missing label is an unnamed part.
impl From<Option<String>> for Part {
    fn from(raw: Option<String>) -> Self {
        raw.map_or_else(Self::default, Self::from)
    }
}

impl Default for Part {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<Part> for String {
    fn from(part: Part) -> Self {
        match part {
            Part::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Damage intensity tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
    Catastrophic,
    Unknown(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Catastrophic => "catastrophic",
            Self::Unknown(s) => s,
        }
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match normalize_label(&raw).as_str() {
            "minor" => Self::Minor,
            "moderate" => Self::Moderate,
            "severe" => Self::Severe,
            "catastrophic" => Self::Catastrophic,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for Severity {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Option<String>> for Severity {
    fn from(raw: Option<String>) -> Self {
        raw.map_or_else(Self::default, Self::from)
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDamage {
    #[serde(default)]
    pub part: Part,
    #[serde(default)]
    pub severity: Severity,
}

impl PartDamage {
    pub fn new(part: impl Into<Part>, severity: impl Into<Severity>) -> Self {
        Self {
            part: part.into(),
            severity: severity.into(),
        }
    }
}

/// Structured output of the damage classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageAssessment {
    #[serde(default)]
    pub vehicle_detected: bool,
    #[serde(default)]
    pub damage_detected: bool,
    #[serde(default)]
    pub parts: Vec<PartDamage>,
    #[serde(default)]
    pub airbags_deployed: bool,
    #[serde(default = "default_drivable")]
    pub drivable: bool,
    /// Classifier confidence in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

fn default_drivable() -> bool {
    true
}

impl Default for DamageAssessment {
    fn default() -> Self {
        Self {
            vehicle_detected: false,
            damage_detected: false,
            parts: Vec::new(),
            airbags_deployed: false,
            drivable: true,
            confidence: None,
        }
    }
}

impl DamageAssessment {
    /// Parts that should be priced. Empty when no damage was detected,
    /// whatever the `parts` list says.
    pub fn effective_parts(&self) -> &[PartDamage] {
        if self.damage_detected {
            &self.parts
        } else {
            &[]
        }
    }

    /// Confidence clamped to [0, 1]; `None` when absent or NaN.
    pub fn clamped_confidence(&self) -> Option<f64> {
        self.confidence
            .filter(|c| !c.is_nan())
            .map(|c| c.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateRange {
    pub low: f64,
    pub high: f64,
}

/// Price of one assessed part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub part: Part,
    pub severity: Severity,
    /// Base cost times severity multiplier.
    pub cost: f64,
    /// Flat refinish charge, zero for non-panel parts.
    pub paint: f64,
}

/// Priced result of an assessment. All amounts in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub parts_and_labor: f64,
    pub paint: f64,
    pub surcharges: f64,
    /// Sum of the three components before the minimum charge.
    pub total: f64,
    /// `total` raised to the minimum charge when below it.
    pub adjusted_total: f64,
    pub floor_applied: bool,
    pub estimate_range: EstimateRange,
    pub midpoint: f64,
    pub confidence: f64,
    pub line_items: Vec<LineItem>,
}

impl CostBreakdown {
    pub fn zero(confidence: f64) -> Self {
        Self {
            parts_and_labor: 0.0,
            paint: 0.0,
            surcharges: 0.0,
            total: 0.0,
            adjusted_total: 0.0,
            floor_applied: false,
            estimate_range: EstimateRange { low: 0.0, high: 0.0 },
            midpoint: 0.0,
            confidence,
            line_items: Vec::new(),
        }
    }
}
