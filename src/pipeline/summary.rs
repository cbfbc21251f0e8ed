//! Grouped descriptive statistics over the qualifying-inning table:
//! grand-slam group vs baseline, overall and by game stage.

use serde::{Deserialize, Serialize};

use crate::model::QualifyingInning;

/// Game stage bucketed by the trigger inning's ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Early,
    Mid,
    Late,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Early, Stage::Mid, Stage::Late];

    pub fn from_inning(inning_no: u8) -> Stage {
        match inning_no {
            0..=3 => Stage::Early,
            4..=6 => Stage::Mid,
            _ => Stage::Late,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Early => "early (1-3)",
            Stage::Mid => "mid (4-6)",
            Stage::Late => "late (7-9)",
        }
    }
}

/// Descriptive statistics for one group of qualifying innings.
///
/// Rate statistics exclude rows whose run-rate is undefined; `scored_any_rate`
/// is computed from the raw post-event run total and is defined for every
/// non-empty group. An empty group is a well-formed count-0 record with all
/// statistics `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub is_grand_slam: bool,
    /// `None` for the overall (un-staged) grouping.
    pub stage: Option<Stage>,
    /// Rows in the group, including those with an undefined rate.
    pub rows: usize,
    /// Rows with a defined run-rate.
    pub rate_count: usize,
    pub rate_mean: Option<f64>,
    pub rate_median: Option<f64>,
    /// Sample standard deviation; `None` below two defined rates.
    pub rate_std: Option<f64>,
    pub mean_post_runs: Option<f64>,
    pub mean_remaining_innings: Option<f64>,
    /// Empirical probability that at least one run was scored afterward.
    pub scored_any_rate: Option<f64>,
}

/// One summary per tag value, in `false, true` order. Both groups are always
/// present even when empty.
pub fn summarize_overall(rows: &[QualifyingInning]) -> Vec<GroupSummary> {
    [false, true]
        .into_iter()
        .map(|tag| {
            let group: Vec<&QualifyingInning> =
                rows.iter().filter(|r| r.is_grand_slam == tag).collect();
            summarize_group(tag, None, &group)
        })
        .collect()
}

/// One summary per (stage, tag) pair, all six always present, stages in
/// early/mid/late order with the untagged group first within each stage.
pub fn summarize_by_stage(rows: &[QualifyingInning]) -> Vec<GroupSummary> {
    let mut out = Vec::with_capacity(6);
    for stage in Stage::ALL {
        for tag in [false, true] {
            let group: Vec<&QualifyingInning> = rows
                .iter()
                .filter(|r| r.is_grand_slam == tag && Stage::from_inning(r.inning_no) == stage)
                .collect();
            out.push(summarize_group(tag, Some(stage), &group));
        }
    }
    out
}

fn summarize_group(
    is_grand_slam: bool,
    stage: Option<Stage>,
    group: &[&QualifyingInning],
) -> GroupSummary {
    let mut rates: Vec<f64> = group.iter().filter_map(|r| r.post_run_rate).collect();
    let post_runs: Vec<f64> = group.iter().map(|r| f64::from(r.post_inning_runs)).collect();
    let remaining: Vec<f64> = group
        .iter()
        .map(|r| f64::from(r.remaining_off_innings))
        .collect();
    let scored_any: Vec<f64> = group
        .iter()
        .map(|r| if r.post_inning_runs > 0 { 1.0 } else { 0.0 })
        .collect();

    GroupSummary {
        is_grand_slam,
        stage,
        rows: group.len(),
        rate_count: rates.len(),
        rate_mean: mean(&rates),
        rate_median: median(&mut rates),
        rate_std: sample_std(&rates),
        mean_post_runs: mean(&post_runs),
        mean_remaining_innings: mean(&remaining),
        scored_any_rate: mean(&scored_any),
    }
}

// ── Descriptive statistics helpers ───────────────────────────────────────────

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Sample standard deviation (n − 1 denominator); undefined below 2 values.
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
