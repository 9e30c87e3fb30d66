//! Focus sequence of the personal-details step.
//!
//! The form is filled top to bottom: name, then age, then postcode. `Done`
//! means no field holds focus and the continue control is next.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::field::FormFieldId;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum FocusStep {
    #[default]
    Name,
    Age,
    Postcode,
    Done,
}

/// Title of the button on the keyboard accessory bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum AccessoryTitle {
    Done,
    Next,
}

/// Next step in the fill order. `Done` is terminal.
pub fn advance_focus(current: FocusStep) -> FocusStep {
    match current {
        FocusStep::Name => FocusStep::Age,
        FocusStep::Age => FocusStep::Postcode,
        FocusStep::Postcode | FocusStep::Done => FocusStep::Done,
    }
}

impl FocusStep {
    pub fn from_field(field: Option<FormFieldId>) -> Self {
        match field {
            Some(FormFieldId::Name) => Self::Name,
            Some(FormFieldId::Age) => Self::Age,
            Some(FormFieldId::Postcode) => Self::Postcode,
            None => Self::Done,
        }
    }

    pub fn field(self) -> Option<FormFieldId> {
        match self {
            Self::Name => Some(FormFieldId::Name),
            Self::Age => Some(FormFieldId::Age),
            Self::Postcode => Some(FormFieldId::Postcode),
            Self::Done => None,
        }
    }

    /// Accessory title while this step is focused.
    pub fn accessory_title(self) -> Option<AccessoryTitle> {
        match self {
            Self::Name | Self::Postcode => Some(AccessoryTitle::Done),
            Self::Age => Some(AccessoryTitle::Next),
            Self::Done => None,
        }
    }

    /// Where the accessory button sends focus.
    ///
    /// Unlike [`advance_focus`], "Done" on the name field dismisses the
    /// keyboard instead of opening the picker; only "Next" on the age
    /// field moves on to the postcode.
    pub fn after_accessory(self) -> Self {
        match self {
            Self::Age => Self::Postcode,
            Self::Name | Self::Postcode | Self::Done => Self::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn advance_walks_fill_order() {
        let mut step = FocusStep::default();
        let mut seen = vec![step];
        while step != FocusStep::Done {
            step = advance_focus(step);
            seen.push(step);
        }
        assert_eq!(
            seen,
            vec![
                FocusStep::Name,
                FocusStep::Age,
                FocusStep::Postcode,
                FocusStep::Done
            ]
        );
        assert_eq!(advance_focus(FocusStep::Done), FocusStep::Done);
    }

    #[test]
    fn field_mapping_is_inverse() {
        for step in FocusStep::iter() {
            assert_eq!(FocusStep::from_field(step.field()), step);
        }
    }

    #[test]
    fn accessory_titles() {
        assert_eq!(FocusStep::Name.accessory_title(), Some(AccessoryTitle::Done));
        assert_eq!(FocusStep::Age.accessory_title(), Some(AccessoryTitle::Next));
        assert_eq!(
            FocusStep::Postcode.accessory_title(),
            Some(AccessoryTitle::Done)
        );
        assert_eq!(FocusStep::Done.accessory_title(), None);
    }

    #[test]
    fn accessory_only_advances_from_age() {
        assert_eq!(FocusStep::Name.after_accessory(), FocusStep::Done);
        assert_eq!(FocusStep::Age.after_accessory(), FocusStep::Postcode);
        assert_eq!(FocusStep::Postcode.after_accessory(), FocusStep::Done);
    }
}
