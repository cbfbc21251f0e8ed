//! Batch orchestration: from fully materialized input tables to the
//! enriched comparison tables, attributions, and summaries.
//!
//! Single-threaded and pure: every component is a function of its inputs,
//! so a full run is deterministic for a fixed dataset and configuration.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::model::{
    AttributionRecord, DropCounts, Event, Game, QualifyingInning, TeamDirectory,
};
use crate::pipeline::summary::GroupSummary;
use crate::pipeline::{attribution, extract, summary, tagger};

/// The input contract: three tables, materialized in memory by the loading
/// collaborator before processing begins. The engine issues no queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub events: Vec<Event>,
    pub games: Vec<Game>,
    pub teams: TeamDirectory,
}

/// The output contract: enriched comparison tables plus summaries, consumed
/// by the excluded export/report collaborators. Missing numerics serialize
/// as explicit nulls throughout.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    /// Grand-slam innings (through the 9th), enriched and tagged true.
    pub grand_slams: Vec<QualifyingInning>,
    /// The full baseline universe of threshold-run innings, tagged by
    /// grand-slam key membership.
    pub baseline: Vec<QualifyingInning>,
    /// Per-tag summary over the baseline universe.
    pub overall: Vec<GroupSummary>,
    /// Per-stage, per-tag summary over the baseline universe.
    pub by_stage: Vec<GroupSummary>,
    pub attributions: Vec<AttributionRecord>,
    /// Rows excluded from the batch, by reason.
    pub drops: DropCounts,
}

/// Run the full aftermath analysis over one dataset.
pub fn run_analysis(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, AnalysisError> {
    config.validate()?;

    let games = extract::index_games(&dataset.games);
    let mut drops = DropCounts::default();

    let mut grand_slams = extract::scan_grand_slams(&dataset.events, &games, &mut drops);
    info!(
        count = grand_slams.len(),
        "identified grand-slam innings through the 9th"
    );

    let mut baseline = extract::scan_baseline(&dataset.games, config, &mut drops);
    info!(
        count = baseline.len(),
        threshold = config.baseline_threshold,
        "extracted baseline big innings"
    );

    {
        let keys = tagger::grand_slam_keys(&grand_slams);
        tagger::tag_baseline(&mut baseline, &keys);
    }

    let attributions = attribution::resolve_attributions(&dataset.events, &games, config);
    info!(count = attributions.len(), "resolved re-ignition attributions");

    let overall = summary::summarize_overall(&baseline);
    let by_stage = summary::summarize_by_stage(&baseline);

    // Display names resolve once, at the presentation boundary; tagging and
    // summaries above operate on raw ids only.
    for row in grand_slams.iter_mut().chain(baseline.iter_mut()) {
        row.team_name = dataset.teams.display_name(&row.team).to_owned();
    }

    if drops.total() > 0 {
        warn!(
            dropped = drops.total(),
            unparseable_inning = drops.unparseable_inning,
            extra_inning = drops.extra_inning,
            missing_game = drops.missing_game,
            side_mismatch = drops.side_mismatch,
            "rows excluded from the batch"
        );
    }

    Ok(AnalysisOutput {
        grand_slams,
        baseline,
        overall,
        by_stage,
        attributions,
        drops,
    })
}
