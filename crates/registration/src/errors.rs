use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Shown to the user verbatim; keep in sync with `INVALID_POSTCODE_MESSAGE`.
    #[error("Please enter a valid postcode")]
    InvalidPostcode,

    #[error("continue gate closed: name, age bracket and a 4-digit postcode are required")]
    Incomplete,

    #[error("unknown age bracket index: {0}")]
    UnknownBracket(i64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings error: {0}")]
    Settings(#[from] ron::error::SpannedError),
}

impl RegistrationError {
    /// Whether the error is meant for the error-presentation surface.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidPostcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::INVALID_POSTCODE_MESSAGE;

    #[test]
    fn postcode_message_matches_alert_text() {
        assert_eq!(
            RegistrationError::InvalidPostcode.to_string(),
            INVALID_POSTCODE_MESSAGE
        );
        assert!(RegistrationError::InvalidPostcode.is_user_facing());
        assert!(!RegistrationError::Incomplete.is_user_facing());
    }
}
