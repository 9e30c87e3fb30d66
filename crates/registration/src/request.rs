//! Outgoing registration payload and the routing decision that follows it.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::bracket::{AgeBracket, UNSET_AGE};

/// Registrants with a representative age below this are minors.
pub const MINOR_AGE_THRESHOLD: i32 = 16;

/// Payload handed to the next onboarding step.
///
/// Serialised with the field names the downstream steps expect
/// (`fullName`, `postcode`, `age`, `isMinor`, `phoneNumber`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub full_name: String,
    pub postcode: String,
    pub age: i32,
    pub is_minor: bool,
    /// Collected by a later step.
    pub phone_number: String,
}

impl RegistrationRequest {
    /// Build the payload from already validated values.
    ///
    /// Performs no validation of its own; callers go through
    /// [`FieldState::submit`](crate::state::FieldState::submit).
    pub fn new(name: &str, postcode: &str, bracket: Option<AgeBracket>) -> Self {
        let age = bracket.map_or(UNSET_AGE, AgeBracket::representative_age);
        Self {
            full_name: name.trim().to_string(),
            postcode: postcode.to_string(),
            age,
            is_minor: is_minor(age),
            phone_number: String::new(),
        }
    }

    pub fn next_step(&self) -> NextStep {
        next_step_for(self.age)
    }
}

/// Where the onboarding flow continues after this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum NextStep {
    /// Alternate flow for registrants under sixteen.
    UnderSixteen,
    PhoneValidation,
}

pub fn is_minor(age: i32) -> bool {
    age < MINOR_AGE_THRESHOLD
}

pub fn next_step_for(age: i32) -> NextStep {
    if is_minor(age) {
        NextStep::UnderSixteen
    } else {
        NextStep::PhoneValidation
    }
}
