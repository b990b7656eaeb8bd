//! Scenario input: the built-in case study or a JSON file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dn_core::{DemandPoint, Depot};
use dn_routing::OptimizerConfig;
use dn_sim::SimConfig;

/// Everything needed for one end-to-end run.
///
/// `optimizer` and `sim` may be omitted from the JSON; their defaults apply.
#[derive(Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub depots:    Vec<Depot>,
    pub points:    Vec<DemandPoint>,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub sim:       SimConfig,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// Three warehouses and five stores in greater Buenos Aires, one week.
    pub fn case_study() -> Self {
        Self {
            depots: vec![
                Depot::new(0, 10_000.0, (-34.50, -58.50)),
                Depot::new(1, 8_000.0, (-34.70, -58.45)),
                Depot::new(2, 12_000.0, (-34.60, -58.70)),
            ],
            points: vec![
                DemandPoint::new(0, 1_500.0, (-34.55, -58.48)),
                DemandPoint::new(1, 1_200.0, (-34.65, -58.52)),
                DemandPoint::new(2, 1_000.0, (-34.62, -58.55)),
                DemandPoint::new(3, 800.0, (-34.58, -58.60)),
                DemandPoint::new(4, 1_100.0, (-34.67, -58.65)),
            ],
            optimizer: OptimizerConfig::default(),
            sim: SimConfig { days: 7, ..SimConfig::default() },
        }
    }
}
