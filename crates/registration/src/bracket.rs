//! Age brackets offered by the picker.
//!
//! Each bracket maps to one representative age. The value is not the user's
//! real age; it only feeds the minor check and the outgoing request.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Age used when no bracket is selected (or an index is out of range).
pub const UNSET_AGE: i32 = -1;

/// Index used for "no bracket selected".
pub const UNSET_INDEX: i64 = -1;

/// The nine picker rows, in display order.
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
    EnumCount,
    IntoStaticStr,
)]
pub enum AgeBracket {
    #[default]
    #[strum(serialize = "0 - 15")]
    Under16,
    #[strum(serialize = "16 - 29")]
    From16To29,
    #[strum(serialize = "30 - 39")]
    From30To39,
    #[strum(serialize = "40 - 49")]
    From40To49,
    #[strum(serialize = "50 - 59")]
    From50To59,
    #[strum(serialize = "60 - 69")]
    From60To69,
    #[strum(serialize = "70 - 79")]
    From70To79,
    #[strum(serialize = "80 - 89")]
    From80To89,
    #[strum(serialize = "90+")]
    From90,
}

impl AgeBracket {
    /// Look up a bracket by picker row. Negative or too-large indices yield `None`.
    pub fn from_index(index: i64) -> Option<Self> {
        let index = usize::try_from(index).ok()?;
        Self::iter().nth(index)
    }

    /// Picker row of this bracket (0..=8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label shown in the picker and in the age field.
    pub fn label(self) -> &'static str {
        self.into()
    }

    pub fn representative_age(self) -> i32 {
        match self {
            Self::Under16 => 8,
            Self::From16To29 => 23,
            Self::From30To39 => 35,
            Self::From40To49 => 45,
            Self::From50To59 => 55,
            Self::From60To69 => 65,
            Self::From70To79 => 75,
            Self::From80To89 => 85,
            Self::From90 => 91,
        }
    }

    /// All labels in picker order.
    pub fn labels() -> Vec<&'static str> {
        Self::iter().map(Self::label).collect()
    }
}

/// Raw index for an optional selection; `-1` when unset.
pub fn bracket_index(bracket: Option<AgeBracket>) -> i64 {
    bracket.map_or(UNSET_INDEX, |b| b.index() as i64)
}

/// Representative age for a raw picker index; `-1` for unset or unknown indices.
pub fn age_for_bracket(index: i64) -> i32 {
    AgeBracket::from_index(index).map_or(UNSET_AGE, AgeBracket::representative_age)
}
