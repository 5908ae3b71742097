#![forbid(unsafe_code)]

//! Demo backend: embedded JSON fixtures decoded through the same serde
//! path a network backend would use, with simulated latency so the
//! loading states are visible.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use chainscope_model::{Alert, AlertScope, FetchError, RawNode, RegulationSet, RiskDataSource};

use crate::catalog::Catalog;

const CATALOG_JSON: &str = include_str!("../data/catalog.json");
const HIERARCHIES_JSON: &str = include_str!("../data/hierarchies.json");
const ALERTS_JSON: &str = include_str!("../data/alerts.json");
const REGULATIONS_JSON: &str = include_str!("../data/regulations.json");

#[derive(Debug, Clone, Deserialize)]
struct RegulationFixtures {
    materials: BTreeMap<String, RegulationSet>,
    default: RegulationSet,
}

/// An in-process [`RiskDataSource`] over embedded fixtures.
pub struct DemoDataSource {
    latency: Duration,
    catalog: Catalog,
    hierarchies: BTreeMap<String, RawNode>,
    alerts: Vec<Alert>,
    regulations: RegulationFixtures,
}

impl DemoDataSource {
    /// Decode the embedded fixtures.
    pub fn new(latency: Duration) -> Result<Self, FetchError> {
        let catalog: Catalog = decode(CATALOG_JSON, "catalog")?;
        let hierarchies: BTreeMap<String, RawNode> = decode(HIERARCHIES_JSON, "hierarchies")?;
        let alerts: Vec<Alert> = decode(ALERTS_JSON, "alerts")?;
        let regulations: RegulationFixtures = decode(REGULATIONS_JSON, "regulations")?;
        Ok(Self {
            latency,
            catalog,
            hierarchies,
            alerts,
            regulations,
        })
    }

    /// The selector catalog.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone()
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }
}

fn decode<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, FetchError> {
    serde_json::from_str(json).map_err(|e| FetchError::Malformed(format!("{what}: {e}")))
}

impl RiskDataSource for DemoDataSource {
    fn fetch_hierarchy(&self, product: &str, manufacturer: &str) -> Result<RawNode, FetchError> {
        self.simulate_latency();
        let key = format!("{product}_{manufacturer}");
        debug!(query = %key, "hierarchy fetch");
        self.hierarchies
            .get(&key)
            .cloned()
            .ok_or_else(|| FetchError::UnknownSelection {
                product: product.to_string(),
                manufacturer: manufacturer.to_string(),
            })
    }

    fn fetch_alerts_for_manufacturers(
        &self,
        keys: &BTreeSet<String>,
    ) -> Result<Vec<Alert>, FetchError> {
        self.simulate_latency();
        debug!(suppliers = keys.len(), "alert fetch");
        Ok(self
            .alerts
            .iter()
            .filter(|alert| {
                alert
                    .manufacturer
                    .as_ref()
                    .is_some_and(|key| keys.contains(key))
            })
            .cloned()
            .collect())
    }

    fn fetch_regulations(
        &self,
        material: &str,
        location: &str,
    ) -> Result<RegulationSet, FetchError> {
        self.simulate_latency();
        debug!(material, location, "regulation fetch");
        Ok(self
            .regulations
            .materials
            .get(material)
            .cloned()
            .unwrap_or_else(|| self.regulations.default.clone()))
    }

    fn global_alerts(&self) -> Vec<Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.scope == AlertScope::Global)
            .cloned()
            .collect()
    }
}
