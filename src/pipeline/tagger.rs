//! Marks which baseline innings coincide with a grand slam.
//!
//! The tag is derived solely from the composite key (game, team, inning
//! ordinal), never from any other attribute, so a non-slam inning of the
//! threshold size is never mistakenly tagged.

use std::collections::HashSet;

use crate::model::QualifyingInning;

/// Composite identity of a grand-slam inning.
pub type SlamKey<'a> = (&'a str, &'a str, u8);

pub fn grand_slam_keys(slams: &[QualifyingInning]) -> HashSet<SlamKey<'_>> {
    slams
        .iter()
        .map(|s| (s.game_id.as_str(), s.team.as_str(), s.inning_no))
        .collect()
}

/// Tag each baseline inning true iff its key exactly matches a grand slam.
pub fn tag_baseline(baseline: &mut [QualifyingInning], keys: &HashSet<SlamKey<'_>>) {
    for row in baseline.iter_mut() {
        row.is_grand_slam =
            keys.contains(&(row.game_id.as_str(), row.team.as_str(), row.inning_no));
    }
}
