//! Aftermath attribution and comparison engine for grand-slam innings.
//!
//! Tests a fan-lore hypothesis against NPB play-by-play and boxscore data:
//! after a grand slam produces a big inning, does the lineup go cold, or
//! keep scoring, compared with other equally big innings?
//!
//! The engine is a pure, single-threaded batch over in-memory tables:
//!
//! 1. [`pipeline::extract`] finds grand-slam triggers in the event table and
//!    the baseline universe of threshold-run innings in the boxscores,
//! 2. [`pipeline::aggregate`] enriches each with post-event production
//!    (runs, countable remaining innings, run-rate),
//! 3. [`pipeline::tagger`] marks which baseline innings coincide with a slam
//!    by exact (game, team, inning) key,
//! 4. [`pipeline::sequence`] + [`pipeline::attribution`] reconstruct a
//!    best-effort event order and classify how the next run was produced,
//! 5. [`pipeline::summary`] compares the groups, overall and by game stage.
//!
//! Loading the tables, exporting CSV/JSON, plotting, and report templating
//! are external collaborators; [`run_analysis`] consumes and produces plain
//! data structures with missing values as explicit `None`/null.

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;

pub use analysis::{run_analysis, AnalysisOutput, Dataset};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
