use regimen_analysis::{analyzer::PerformanceAnalyzer, baseline::InvalidReferenceError};
use serde::{Deserialize, Serialize};

use crate::params::{ForestParams, InvalidParamsError};

/// Number of drills kept per regimen when not configured otherwise.
pub const DEFAULT_MAX_DRILLS: usize = 4;

/// Everything a [`RegimenPlanner`](crate::regimen::RegimenPlanner) needs.
///
/// Read from JSON; every field is optional. Analyzer settings sit at the top
/// level next to `max_drills`:
///
/// ```json
/// {
///   "lookback": 8,
///   "baseline": "history",
///   "references": { "FT_PCT": { "expected": 0.7, "spread": 0.1 } },
///   "max_drills": 3,
///   "forest": { "tree_count": 40 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimenConfig {
    #[serde(flatten)]
    pub analyzer: PerformanceAnalyzer,
    /// Maximum number of drills in a regimen.
    pub max_drills: usize,
    pub forest: ForestParams,
}

impl Default for RegimenConfig {
    fn default() -> Self {
        Self {
            analyzer: PerformanceAnalyzer::default(),
            max_drills: DEFAULT_MAX_DRILLS,
            forest: ForestParams::default(),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
)]
pub enum InvalidConfigError {
    #[display("invalid reference table: {_0}")]
    Reference(InvalidReferenceError),
    #[display("invalid forest parameters: {_0}")]
    Forest(InvalidParamsError),
    #[display("max_drills must be at least 1")]
    ZeroMaxDrills,
}

impl RegimenConfig {
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        self.analyzer.validate()?;
        self.forest.validate()?;
        if self.max_drills == 0 {
            return Err(InvalidConfigError::ZeroMaxDrills);
        }
        Ok(())
    }
}
