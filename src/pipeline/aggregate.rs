//! Post-event production: how much a side kept scoring after a trigger
//! inning, through the 9th.
//!
//! Unplayed innings (`None` in the boxscore) are not 0-run opportunities:
//! they contribute nothing to the totals *and* do not count toward the
//! remaining-innings denominator. Extra innings never contribute.

use crate::model::{Game, Side};

/// Run aggregates for one (game, side, trigger inning).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostEventProduction {
    /// Runs in innings strictly after the trigger, through the 9th.
    pub post_runs: u32,
    /// How many of those innings were actually played.
    pub countable_innings: u32,
    /// Side's full-game total over played innings 1-9.
    pub team_total: u32,
    /// Opponent's full-game total over played innings 1-9.
    pub opponent_total: u32,
}

impl PostEventProduction {
    /// Post-event runs per remaining played inning. Undefined — `None`,
    /// never 0 — when no countable inning remains.
    pub fn run_rate(&self) -> Option<f64> {
        if self.countable_innings == 0 {
            None
        } else {
            Some(f64::from(self.post_runs) / f64::from(self.countable_innings))
        }
    }
}

/// Aggregate a side's production after `inning_no` plus both sides' 1-9
/// totals for the same game.
pub fn post_event_production(game: &Game, side: Side, inning_no: u8) -> PostEventProduction {
    let mut production = PostEventProduction::default();
    for n in inning_no.saturating_add(1)..=9 {
        if let Some(runs) = game.runs(side, n) {
            production.post_runs += runs;
            production.countable_innings += 1;
        }
    }
    for n in 1..=9 {
        if let Some(runs) = game.runs(side, n) {
            production.team_total += runs;
        }
        if let Some(runs) = game.runs(side.opponent(), n) {
            production.opponent_total += runs;
        }
    }
    production
}
