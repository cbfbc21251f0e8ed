use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Half of an inning: top (visiting side bats) or bottom (home side bats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    /// Decode the single-character half indicator of a raw inning label.
    pub fn from_char(c: char) -> Option<Half> {
        match c {
            'T' => Some(Half::Top),
            'B' => Some(Half::Bottom),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Half::Top => 'T',
            Half::Bottom => 'B',
        }
    }
}

/// Which side of a game a team plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Visitor,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Visitor,
            Side::Visitor => Side::Home,
        }
    }

    /// The half in which this side bats (visitors score in the top).
    pub fn scoring_half(self) -> Half {
        match self {
            Side::Home => Half::Bottom,
            Side::Visitor => Half::Top,
        }
    }
}

/// One plate appearance / scoring play as ingested from the event table.
///
/// Immutable once read. There is no sequence number; within-game order is
/// reconstructed by [`pipeline::sequence`](crate::pipeline::sequence).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub game_id: String,
    pub team: String,
    /// Raw inning label, e.g. `"7T"`. Missing or malformed labels exclude
    /// the row from ordered computations.
    pub inning: Option<String>,
    /// Occupied-bases encoding at the start of the play: the digit characters
    /// `'1'`, `'2'`, `'3'` signal a runner on that base.
    pub on_base: Option<String>,
    /// Hits credited on the play
    pub hits: u32,
    pub single: bool,
    pub double: bool,
    pub triple: bool,
    pub home_run: bool,
    pub walk: bool,
    pub hit_by_pitch: bool,
    pub reached_on_error: bool,
    pub sac_fly: bool,
    pub sac_bunt: bool,
    /// Runs batted in on the play
    pub rbi: u32,
    pub batter_id: Option<String>,
}

/// One contest, with sparse per-inning run counts for both sides.
///
/// `None` in an inning slot means the inning was never played (the game ended
/// early), which is distinct from an explicit 0-run inning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    pub game_id: String,
    pub date: Option<NaiveDate>,
    /// Missing team ids make the game un-sideable; its rows are dropped.
    pub home_team_id: Option<String>,
    pub away_team_id: Option<String>,
    pub ballpark: Option<String>,
    /// Runs per inning 1-9 for the visiting side (index 0 = 1st inning).
    pub visitor_innings: [Option<u32>; 9],
    /// Runs per inning 1-9 for the home side.
    pub home_innings: [Option<u32>; 9],
}

impl Game {
    pub fn innings(&self, side: Side) -> &[Option<u32>; 9] {
        match side {
            Side::Home => &self.home_innings,
            Side::Visitor => &self.visitor_innings,
        }
    }

    /// Runs scored by `side` in inning `inning_no` (1-based).
    /// `None` for an unplayed inning or an ordinal outside 1-9.
    pub fn runs(&self, side: Side, inning_no: u8) -> Option<u32> {
        if !(1..=9).contains(&inning_no) {
            return None;
        }
        self.innings(side)[usize::from(inning_no) - 1]
    }

    /// Which side `team` plays on, or `None` when the team matches neither
    /// side (data mismatch) or the game record lacks the identifiers.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team_id.as_deref() == Some(team) {
            Some(Side::Home)
        } else if self.away_team_id.as_deref() == Some(team) {
            Some(Side::Visitor)
        } else {
            None
        }
    }

    pub fn team_id(&self, side: Side) -> Option<&str> {
        match side {
            Side::Home => self.home_team_id.as_deref(),
            Side::Visitor => self.away_team_id.as_deref(),
        }
    }
}

/// Read-only team id → display name mapping, applied once at the
/// presentation boundary. Unknown ids fall back to the id itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamDirectory {
    names: HashMap<String, String>,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        TeamDirectory {
            names: pairs
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A half-inning that qualifies for the comparison: either a grand-slam
/// inning or a baseline inning whose run count equals the configured
/// threshold. Enriched with post-event production aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualifyingInning {
    pub game_id: String,
    pub date: Option<NaiveDate>,
    /// Scoring team id.
    pub team: String,
    /// Display name resolved through [`TeamDirectory`]; falls back to the id.
    pub team_name: String,
    pub side: Side,
    /// Label in event notation, e.g. `"7T"` (synthesized for baseline rows).
    pub inning_label: String,
    pub inning_no: u8,
    /// Boxscore run count of the inning. Always `Some(threshold)` for
    /// baseline rows; may be `None` for a grand-slam row whose boxscore
    /// entry is sparse.
    pub runs_in_inning: Option<u32>,
    /// Batter who hit the slam (grand-slam rows only).
    pub batter_id: Option<String>,
    pub home_team_id: Option<String>,
    pub away_team_id: Option<String>,
    pub ballpark: Option<String>,
    /// True iff a grand slam occurred at exactly this (game, team, inning).
    pub is_grand_slam: bool,
    /// Runs scored by the same side in innings strictly after this one,
    /// through the 9th.
    pub post_inning_runs: u32,
    /// Count of later innings (through the 9th) actually played by this side.
    pub remaining_off_innings: u32,
    pub team_total_runs: u32,
    pub opponent_total_runs: u32,
    /// `post_inning_runs / remaining_off_innings`; `None` (serialized as
    /// null, never 0) when no countable inning remains.
    pub post_run_rate: Option<f64>,
}

/// How the run after a trigger inning was produced: the reaching-base method
/// of the scoring runner, or a direct home run by the batter.
///
/// Variants are listed in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanism {
    HomeRun,
    Triple,
    Double,
    Single,
    Walk,
    HitByPitch,
    ReachedOnError,
    Unclassified,
}

impl Mechanism {
    /// All variants in classification priority order.
    pub const PRIORITY: [Mechanism; 8] = [
        Mechanism::HomeRun,
        Mechanism::Triple,
        Mechanism::Double,
        Mechanism::Single,
        Mechanism::Walk,
        Mechanism::HitByPitch,
        Mechanism::ReachedOnError,
        Mechanism::Unclassified,
    ];
}

/// What kind of play the scoring event itself was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    HomeRun,
    Triple,
    Double,
    Single,
    Walk,
    HitByPitch,
    SacrificeFly,
    SacrificeBunt,
    Other,
}

/// Attribution of the next run after a grand-slam trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionRecord {
    pub game_id: String,
    /// Inning label of the triggering grand slam, e.g. `"5T"`.
    pub trigger_inning: String,
    /// Inning label of the next scoring event for the same team.
    pub scoring_inning: String,
    pub mechanism: Mechanism,
    pub scoring_play: PlayType,
}

/// Counts of rows excluded from the batch, reported alongside the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCounts {
    /// Inning label missing, shorter than two characters, or unparseable.
    pub unparseable_inning: u64,
    /// Trigger in an extra inning (beyond the 9th); excluded by design.
    pub extra_inning: u64,
    /// Event whose game id matches no game record.
    pub missing_game: u64,
    /// Side could not be determined: the event's team matches neither side,
    /// or the game record lacks a team identifier.
    pub side_mismatch: u64,
}

impl DropCounts {
    pub fn total(&self) -> u64 {
        self.unparseable_inning + self.extra_inning + self.missing_game + self.side_mismatch
    }
}
