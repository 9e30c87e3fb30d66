//! RON-backed configuration.
//!
//! The settings file is a RON map from section name to section value. Each
//! consumer owns one section through the [`Settings`] trait; sections it
//! does not know are skipped. A missing file, a missing section and missing
//! fields all fall back to the defaults:
//!
//! ```ron
//! {
//!     "registration": (
//!         postcode_rule: Corrected,
//!         keyboard_gap: 32.0,
//!     ),
//! }
//! ```

use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{DeserializeOwned, DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::errors::RegistrationError;
use crate::validator::PostcodeRule;
use crate::viewport::DEFAULT_KEYBOARD_GAP;

/// A typed section of the settings file.
pub trait Settings: Default + DeserializeOwned {
    /// Key of the section in the settings map.
    const SECTION: &'static str;
}

/// Settings of the personal-details step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    pub postcode_rule: PostcodeRule,
    pub keyboard_gap: f64,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            postcode_rule: PostcodeRule::default(),
            keyboard_gap: DEFAULT_KEYBOARD_GAP,
        }
    }
}

impl Settings for RegistrationSettings {
    const SECTION: &'static str = "registration";
}

/// Pulls `T::SECTION` out of the top-level map and skips everything else.
///
/// Sections are deserialized straight into `T` instead of going through
/// `ron::Value`, which drops enum variant names.
struct SectionSeed<T>(PhantomData<T>);

impl<'de, T: Settings> DeserializeSeed<'de> for SectionSeed<T> {
    type Value = Option<T>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de, T: Settings> Visitor<'de> for SectionSeed<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map of settings sections")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut section = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == T::SECTION {
                section = Some(map.next_value::<T>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(section)
    }
}

/// Read one section from a settings document; absent sections yield `T::default()`.
pub fn section_from_ron<T: Settings>(content: &str) -> Result<T, RegistrationError> {
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let section = ron::Options::default().from_str_seed(content, SectionSeed::<T>(PhantomData))?;
    if section.is_none() {
        debug!(section = T::SECTION, "section missing, using defaults");
    }
    Ok(section.unwrap_or_default())
}

/// Every section this workspace reads, resolved from one settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnboardingConfig {
    pub registration: RegistrationSettings,
}

impl OnboardingConfig {
    pub fn from_ron(content: &str) -> Result<Self, RegistrationError> {
        Ok(Self {
            registration: section_from_ron(content)?,
        })
    }

    /// Read the settings file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, RegistrationError> {
        if !path.exists() {
            debug!(path = %path.display(), "settings file missing, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(OnboardingConfig::from_ron("  \n").unwrap(), OnboardingConfig::default());
    }

    #[test]
    fn section_is_read_from_map() {
        let cfg = OnboardingConfig::from_ron(
            r#"{ "registration": (postcode_rule: Corrected, keyboard_gap: 40.0) }"#,
        )
        .unwrap();
        assert_eq!(cfg.registration.postcode_rule, PostcodeRule::Corrected);
        assert_eq!(cfg.registration.keyboard_gap, 40.0);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = OnboardingConfig::from_ron(r#"{ "registration": (keyboard_gap: 24.0) }"#).unwrap();
        assert_eq!(cfg.registration.postcode_rule, PostcodeRule::Literal);
        assert_eq!(cfg.registration.keyboard_gap, 24.0);
    }

    #[test]
    fn other_sections_are_skipped() {
        let content = r#"{
            "wizard": (tick_rate: 4.0, mode: Fast, tags: ["a", "b"]),
            "registration": (postcode_rule: Corrected),
            "meta": (version: "1"),
        }"#;
        let settings: RegistrationSettings = section_from_ron(content).unwrap();
        assert_eq!(settings.postcode_rule, PostcodeRule::Corrected);
    }

    #[test]
    fn missing_section_is_default() {
        let settings: RegistrationSettings =
            section_from_ron(r#"{ "meta": (version: "1") }"#).unwrap();
        assert_eq!(settings, RegistrationSettings::default());
    }

    #[test]
    fn defaults_keep_literal_rule() {
        let settings = RegistrationSettings::default();
        assert_eq!(settings.postcode_rule, PostcodeRule::Literal);
        assert_eq!(settings.keyboard_gap, 40.0);
    }

    #[test]
    fn malformed_section_is_an_error() {
        let err = OnboardingConfig::from_ron(r#"{ "registration": (postcode_rule: Sometimes) }"#)
            .unwrap_err();
        assert!(matches!(err, RegistrationError::Settings(_)));
    }

    #[test]
    fn document_must_be_a_section_map() {
        let err = OnboardingConfig::from_ron("(registration: (postcode_rule: Corrected))")
            .unwrap_err();
        assert!(matches!(err, RegistrationError::Settings(_)));
    }
}
