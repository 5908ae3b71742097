#![forbid(unsafe_code)]

//! Contracts the backend data source must satisfy, and the fetch failure
//! taxonomy.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use serde::Deserialize;

use crate::alert::Alert;
use crate::node::RawNode;

/// Why a fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The backend could not be reached.
    Unreachable(String),
    /// The backend does not know this product/manufacturer pair.
    UnknownSelection {
        product: String,
        manufacturer: String,
    },
    /// The response arrived but could not be decoded.
    Malformed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(detail) => write!(f, "backend unreachable: {detail}"),
            Self::UnknownSelection {
                product,
                manufacturer,
            } => write!(f, "no supply chain known for {product} / {manufacturer}"),
            Self::Malformed(detail) => write!(f, "malformed backend response: {detail}"),
        }
    }
}

impl Error for FetchError {}

/// One regulatory requirement record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Regulation {
    pub id: String,
    pub jurisdiction: String,
    pub regulation: String,
    pub details: String,
    #[serde(default)]
    pub link: String,
}

/// Regulations for a material/location pair, split the way the detail pane
/// presents them.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RegulationSet {
    #[serde(default)]
    pub location_regulations: Vec<Regulation>,
    #[serde(default)]
    pub global_regulations: Vec<Regulation>,
}

impl RegulationSet {
    /// Whether both sections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location_regulations.is_empty() && self.global_regulations.is_empty()
    }
}

/// The four request/response contracts the explorer consumes.
///
/// Implementations run on background threads, so the trait requires
/// `Send + Sync`. Callers short-circuit an empty manufacturer set without
/// invoking [`RiskDataSource::fetch_alerts_for_manufacturers`].
pub trait RiskDataSource: Send + Sync {
    /// The supply-chain hierarchy for a product/manufacturer pair.
    fn fetch_hierarchy(&self, product: &str, manufacturer: &str) -> Result<RawNode, FetchError>;

    /// Alerts bound to any of the given manufacturer keys.
    fn fetch_alerts_for_manufacturers(
        &self,
        keys: &BTreeSet<String>,
    ) -> Result<Vec<Alert>, FetchError>;

    /// Regulations applying to a material produced at a location.
    fn fetch_regulations(&self, material: &str, location: &str)
    -> Result<RegulationSet, FetchError>;

    /// The pre-loaded globally scoped alert list. No network call.
    fn global_alerts(&self) -> Vec<Alert>;
}
