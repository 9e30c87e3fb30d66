//! Field identifiers and the edit policy each field enforces.
//!
//! The text-input surface asks before applying a keystroke. `check_edit`
//! answers that question for one field; `splice` applies an accepted edit.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::validator::{
    is_name_character_allowed, is_postcode_character_allowed, is_postcode_edit_allowed,
};

/// The three inputs of the personal-details step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum FormFieldId {
    Name,
    Age,
    Postcode,
}

impl FormFieldId {
    /// Whether the field accepts typed edits at all.
    pub fn is_typed(self) -> bool {
        !matches!(self, Self::Age)
    }
}

/// Why a proposed edit was dropped. Never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The age field is filled by the bracket picker only.
    PickerOnly,
    DisallowedCharacter(char),
    TooLong,
    /// Range outside the current text or with `start > end`.
    InvalidRange,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PickerOnly => write!(f, "field is picker-only"),
            Self::DisallowedCharacter(c) => write!(f, "disallowed character {c:?}"),
            Self::TooLong => write!(f, "edit exceeds maximum length"),
            Self::InvalidRange => write!(f, "edit range out of bounds"),
        }
    }
}

/// Result of offering an edit to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Rejected(RejectReason),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Decide whether `replacement` may replace `range` (char indices) of `current`.
pub fn check_edit(
    field: FormFieldId,
    current: &str,
    range: &Range<usize>,
    replacement: &str,
) -> Result<(), RejectReason> {
    if !field.is_typed() {
        return Err(RejectReason::PickerOnly);
    }
    if range.start > range.end || range.end > current.chars().count() {
        return Err(RejectReason::InvalidRange);
    }
    // Deletions are always fine for typed fields.
    if replacement.is_empty() {
        return Ok(());
    }

    match field {
        FormFieldId::Postcode => {
            if let Some(c) = replacement
                .chars()
                .find(|c| !is_postcode_character_allowed(*c))
            {
                return Err(RejectReason::DisallowedCharacter(c));
            }
            if !is_postcode_edit_allowed(current, range.clone(), replacement) {
                return Err(RejectReason::TooLong);
            }
        }
        FormFieldId::Name => {
            if let Some(c) = replacement.chars().find(|c| !is_name_character_allowed(*c)) {
                return Err(RejectReason::DisallowedCharacter(c));
            }
        }
        FormFieldId::Age => return Err(RejectReason::PickerOnly),
    }
    Ok(())
}

/// Replace the chars in `range` with `replacement`. The range must be valid
/// (see [`check_edit`]).
pub fn splice(current: &str, range: &Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(current.len() + replacement.len());
    out.extend(current.chars().take(range.start));
    out.push_str(replacement);
    out.extend(current.chars().skip(range.end));
    out
}
