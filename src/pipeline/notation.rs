//! Inning-label notation: an ordinal number followed by a single
//! half-indicator character (`"7T"`, `"1B"`, `"12T"`).

use crate::model::Half;

/// Parse a raw inning label into `(ordinal, half)`.
///
/// Returns `None` for labels shorter than two characters, a numeric prefix
/// that fails to parse, or a half indicator other than `T`/`B`. Never
/// panics; callers treat `None` as "exclude from analysis".
pub fn parse_inning(label: &str) -> Option<(u8, Half)> {
    let (last_idx, last) = label.char_indices().next_back()?;
    let number = label.get(..last_idx)?;
    if number.is_empty() {
        return None;
    }
    let inning_no: u8 = number.parse().ok()?;
    Some((inning_no, Half::from_char(last)?))
}

/// Render `(ordinal, half)` back into label notation. The inverse of
/// [`parse_inning`] for every parseable label.
pub fn format_inning(inning_no: u8, half: Half) -> String {
    format!("{}{}", inning_no, half.as_char())
}
