//! Evidence combination for triage conditions.
//!
//! A condition holds if the slot says so OR the utterance contains the
//! keyword. Neither source outranks the other.

use crate::kernel::event::TurnInput;
use crate::kernel::slots::TriState;

/// Slot value OR keyword match.
pub fn slot_or_keyword(slot_says: bool, turn: &TurnInput, keyword: &str) -> bool {
    slot_says || turn.mentions(keyword)
}

/// Tri-state slot resolved to "true", OR the user said "yes".
/// A `False` slot and an unset slot behave the same here.
pub fn affirmed(flag: TriState, turn: &TurnInput) -> bool {
    slot_or_keyword(flag.is_true(), turn, "yes")
}
