pub mod aggregate;
pub mod attribution;
pub mod bases;
pub mod extract;
pub mod notation;
pub mod sequence;
pub mod summary;
pub mod tagger;

pub use aggregate::{post_event_production, PostEventProduction};
pub use attribution::{mechanism_counts, resolve_attributions};
pub use bases::BaseState;
pub use extract::{is_grand_slam, scan_baseline, scan_grand_slams};
pub use notation::{format_inning, parse_inning};
pub use sequence::{sequence_game, SequencedEvent};
pub use summary::{summarize_by_stage, summarize_overall, GroupSummary, Stage};
pub use tagger::{grand_slam_keys, tag_baseline};
