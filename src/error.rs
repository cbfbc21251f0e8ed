use thiserror::Error;

/// Fatal error classes of the batch analysis.
///
/// Individually dirty rows are never errors: malformed records, team/side
/// mismatches, and undefined arithmetic are dropped or propagated as missing
/// values and tallied in [`DropCounts`](crate::model::DropCounts). Only a
/// missing input table or an invalid configuration halts the run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An input table could not be materialized by the loading collaborator.
    #[error("input table `{table}` is unavailable: {reason}")]
    SourceUnavailable { table: String, reason: String },

    /// The analysis configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
