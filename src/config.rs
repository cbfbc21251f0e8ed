use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Tunable parameters of the aftermath analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Exact run count that qualifies a baseline inning for the comparison
    /// universe. A grand-slam inning produces at least this many runs at the
    /// default, making the slam group a strict subset of big innings.
    pub baseline_threshold: u32,

    /// Minimum post-trigger runs for a trigger to count as re-ignited and
    /// enter attribution.
    pub reignition_min_runs: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            baseline_threshold: 4,
            reignition_min_runs: 3,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.baseline_threshold == 0 {
            return Err(AnalysisError::InvalidConfig(
                "baseline_threshold must be at least 1 (a 0-run inning is not a big inning)"
                    .into(),
            ));
        }
        if self.reignition_min_runs == 0 {
            return Err(AnalysisError::InvalidConfig(
                "reignition_min_runs must be at least 1 (re-ignition means runs followed)"
                    .into(),
            ));
        }
        Ok(())
    }
}
