//! Best-effort total order over one game's events.
//!
//! The raw source records order at inning-half granularity only; true
//! within-half chronology is not recoverable. The contract here is weaker
//! but explicit: events are ordered by a composite key
//! `ordinal * 10 + (0 top / 1 bottom)`, with ties broken by the original
//! ingestion position. The tie-break is stable and reproducible, never
//! re-derived from record content — a documented limitation, not a guess
//! at true chronology.

use tracing::debug;

use crate::model::{Event, Half};

use super::notation::parse_inning;

/// An event placed in the best-effort order of its game.
#[derive(Debug, Clone, Copy)]
pub struct SequencedEvent<'a> {
    pub event: &'a Event,
    /// Index in the raw ingestion order; the tie-break within a half-inning.
    pub arrival: usize,
    pub inning_no: u8,
    pub half: Half,
}

impl SequencedEvent<'_> {
    pub fn order_key(&self) -> u32 {
        order_key(self.inning_no, self.half)
    }

    /// The full ordering position: `(order_key, arrival)` is injective over
    /// a game's events.
    pub fn position(&self) -> (u32, usize) {
        (self.order_key(), self.arrival)
    }
}

/// Composite inning-half sort key. Tops sort before bottoms of the same
/// inning; the factor of 10 keeps keys of consecutive innings disjoint.
pub fn order_key(inning_no: u8, half: Half) -> u32 {
    u32::from(inning_no) * 10
        + match half {
            Half::Top => 0,
            Half::Bottom => 1,
        }
}

/// Collect one game's events in best-effort order. Events with missing or
/// unparseable inning labels cannot be placed and are omitted.
pub fn sequence_game<'a>(events: &'a [Event], game_id: &str) -> Vec<SequencedEvent<'a>> {
    let mut sequenced: Vec<SequencedEvent<'a>> = events
        .iter()
        .enumerate()
        .filter(|(_, event)| event.game_id == game_id)
        .filter_map(|(arrival, event)| {
            let label = event.inning.as_deref()?;
            let Some((inning_no, half)) = parse_inning(label) else {
                debug!(game_id, arrival, label, "event with unparseable inning label left unordered");
                return None;
            };
            Some(SequencedEvent {
                event,
                arrival,
                inning_no,
                half,
            })
        })
        .collect();
    sequenced.sort_by_key(|s| s.position());
    sequenced
}
