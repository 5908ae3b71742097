#![forbid(unsafe_code)]

//! Risk alerts and severity ordering.

use serde::{Deserialize, Serialize};

/// Risk classification carried by an alert. Totally ordered:
/// `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// The derived severity of this level.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Low => Severity::Low,
            Self::Medium => Severity::Medium,
            Self::High => Severity::High,
        }
    }
}

/// Aggregated severity of a hierarchy node: the alert levels plus the
/// "no risk" floor. Totally ordered: `None < Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Numeric rank: 0 = none, 1 = low, 2 = medium, 3 = high.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl From<RiskLevel> for Severity {
    fn from(level: RiskLevel) -> Self {
        level.severity()
    }
}

/// Whether an alert belongs to the global feed or to a specific supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlertScope {
    Global,
    #[default]
    Supplier,
}

/// An externally supplied risk record. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    /// Free-text classification ("Geopolitical", "Weather", ...).
    pub category: String,
    pub risk_level: RiskLevel,
    /// Display label for where the alert originates.
    pub location: String,
    pub details: String,
    pub date: String,
    /// Binding key to a hierarchy node's producing facility, if any.
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng")]
    pub longitude: Option<f64>,
    #[serde(default, rename = "type")]
    pub scope: AlertScope,
}

impl Alert {
    /// Both coordinates, when the alert is placeable on the map.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some((lon, lat)),
            _ => None,
        }
    }
}
