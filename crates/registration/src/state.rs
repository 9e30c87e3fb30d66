//! Mutable form state owned by the personal-details screen.
//!
//! `FieldState` is created empty when the screen appears, changed by every
//! accepted edit or picker selection, and read once by [`FieldState::submit`]
//! to build the outgoing request.

use std::ops::Range;

use tracing::debug;

use crate::bracket::{bracket_index, AgeBracket, UNSET_AGE};
use crate::errors::RegistrationError;
use crate::field::{check_edit, splice, EditOutcome, FormFieldId};
use crate::request::RegistrationRequest;
use crate::validator::{continue_gate, validate_postcode_format, PostcodeRule};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldState {
    name: String,
    age_bracket: Option<AgeBracket>,
    /// Text displayed in the age field; empty until a bracket is picked.
    age_label: String,
    /// Row highlighted in the picker, committed when the age field is left.
    highlighted: AgeBracket,
    postcode: String,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a field as the host displays it.
    pub fn text(&self, field: FormFieldId) -> &str {
        match field {
            FormFieldId::Name => &self.name,
            FormFieldId::Age => &self.age_label,
            FormFieldId::Postcode => &self.postcode,
        }
    }

    pub fn age_bracket(&self) -> Option<AgeBracket> {
        self.age_bracket
    }

    /// Picker index of the selection, `-1` when nothing is picked.
    pub fn age_bracket_index(&self) -> i64 {
        bracket_index(self.age_bracket)
    }

    pub fn highlighted(&self) -> AgeBracket {
        self.highlighted
    }

    /// Representative age of the selection, `-1` when nothing is picked.
    pub fn age(&self) -> i32 {
        self.age_bracket
            .map_or(UNSET_AGE, AgeBracket::representative_age)
    }

    /// Offer a typed edit to a field. Rejected edits leave the state untouched.
    pub fn apply_edit(
        &mut self,
        field: FormFieldId,
        range: Range<usize>,
        replacement: &str,
    ) -> EditOutcome {
        if let Err(reason) = check_edit(field, self.text(field), &range, replacement) {
            debug!(%field, %reason, "edit rejected");
            return EditOutcome::Rejected(reason);
        }

        let updated = splice(self.text(field), &range, replacement);
        match field {
            FormFieldId::Name => self.name = updated,
            FormFieldId::Postcode => self.postcode = updated,
            // check_edit never accepts picker-only fields.
            FormFieldId::Age => {}
        }
        EditOutcome::Applied
    }

    /// Picker selection: sets both the bracket and the displayed label.
    pub fn select_bracket(&mut self, bracket: AgeBracket) {
        self.highlighted = bracket;
        self.age_bracket = Some(bracket);
        self.age_label = bracket.label().to_string();
    }

    /// Commit the highlighted picker row (row 0 if the user never scrolled).
    pub fn commit_highlighted(&mut self) -> AgeBracket {
        let bracket = self.highlighted;
        self.select_bracket(bracket);
        bracket
    }

    /// Write the trimmed name back into the field. Returns true if it changed.
    pub fn normalize_name(&mut self) -> bool {
        let trimmed = self.name.trim();
        if trimmed.len() == self.name.len() {
            return false;
        }
        self.name = trimmed.to_string();
        true
    }

    /// Continue gate over the displayed values.
    pub fn can_continue(&self) -> bool {
        continue_gate(&self.name, &self.age_label, &self.postcode)
    }

    /// Run the submit-time checks and build the request.
    ///
    /// The gate is checked first so a request is never built from an
    /// incomplete form, then the postcode format under `rule`.
    pub fn submit(&self, rule: PostcodeRule) -> Result<RegistrationRequest, RegistrationError> {
        if !self.can_continue() {
            return Err(RegistrationError::Incomplete);
        }
        if !validate_postcode_format(&self.postcode, rule) {
            return Err(RegistrationError::InvalidPostcode);
        }
        Ok(RegistrationRequest::new(
            &self.name,
            &self.postcode,
            self.age_bracket,
        ))
    }
}
