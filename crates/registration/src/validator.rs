//! Field predicates for the personal-details step.
//!
//! Everything here is pure: predicates take the proposed input and answer
//! yes/no. Edits that fail a predicate are dropped by the caller; the only
//! failure a user ever sees is the postcode format check on submit.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::bracket::AgeBracket;

/// Characters the name field never accepts.
pub const NAME_DENYLIST: [char; 12] = ['!', '?', '@', '#', '$', '%', '^', '&', '*', '>', '<', ':'];

/// Maximum (and, for submission, exact) postcode length.
pub const POSTCODE_LENGTH: usize = 4;

/// Message shown when the postcode fails the format check.
pub const INVALID_POSTCODE_MESSAGE: &str = "Please enter a valid postcode";

/// Pattern as used in production. The bars sit inside a character class,
/// so the second character after a leading `0` may be
/// `2`, `8`, `9` or a literal `|`. `\d` is Unicode-aware: the last two
/// positions take any decimal digit, the prefix only ASCII ones.
const LITERAL_POSTCODE_PATTERN: &str = r"^(0[2|8|9]|[1-9][0-9])\d{2}$";

/// Same rule with real alternation: `02`, `08`, `09` or `10`..`99`.
const CORRECTED_POSTCODE_PATTERN: &str = r"^(0(2|8|9)|[1-9][0-9])\d{2}$";

/// One character of Unicode general category `Nd`.
const DECIMAL_DIGIT_PATTERN: &str = r"^\p{Nd}$";

/// Which postcode pattern the submit check uses.
///
/// Both agree on every digit-only string. They only differ on inputs such
/// as `0|00`, which the postcode field cannot produce through typing.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PostcodeRule {
    #[default]
    Literal,
    Corrected,
}

impl PostcodeRule {
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Literal => LITERAL_POSTCODE_PATTERN,
            Self::Corrected => CORRECTED_POSTCODE_PATTERN,
        }
    }

    fn regex(self) -> &'static Regex {
        static LITERAL: OnceLock<Regex> = OnceLock::new();
        static CORRECTED: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            Self::Literal => &LITERAL,
            Self::Corrected => &CORRECTED,
        };
        // Both patterns are compile-time constants covered by tests.
        cell.get_or_init(|| Regex::new(self.pattern()).expect("postcode pattern compiles"))
    }
}

pub fn is_name_character_allowed(c: char) -> bool {
    !NAME_DENYLIST.contains(&c)
}

/// Decimal digits of any script (`0`, `٣`, `１`, ...), nothing else.
pub fn is_postcode_character_allowed(c: char) -> bool {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    let digit =
        DIGIT.get_or_init(|| Regex::new(DECIMAL_DIGIT_PATTERN).expect("digit pattern compiles"));
    let mut buf = [0u8; 4];
    digit.is_match(c.encode_utf8(&mut buf))
}

/// Length guard for a proposed postcode edit.
///
/// `edit_range` is in characters, as reported by the text-input surface.
/// Only the resulting length is checked here; the characters themselves go
/// through [`is_postcode_character_allowed`].
pub fn is_postcode_edit_allowed(current: &str, edit_range: Range<usize>, replacement: &str) -> bool {
    let grown = current.chars().count() + replacement.chars().count();
    grown.saturating_sub(edit_range.len()) <= POSTCODE_LENGTH
}

/// Continue gate on raw values, with the age given as picker index (`-1` = unset).
pub fn can_enable_continue(name: &str, age_bracket_index: i64, postcode: &str) -> bool {
    let age_label = AgeBracket::from_index(age_bracket_index).map_or("", AgeBracket::label);
    continue_gate(name, age_label, postcode)
}

/// Continue gate on what the fields display.
///
/// A necessary condition only: the postcode format is checked on submit.
pub fn continue_gate(name: &str, age_label: &str, postcode: &str) -> bool {
    !name.trim().is_empty()
        && postcode.chars().count() == POSTCODE_LENGTH
        && !age_label.is_empty()
}

pub fn validate_postcode_format(postcode: &str, rule: PostcodeRule) -> bool {
    rule.regex().is_match(postcode)
}
