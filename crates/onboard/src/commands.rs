use std::fs;
use std::io::{self, Write};
use std::path::Path;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use registration::bracket::bracket_index;
use registration::validator::validate_postcode_format;
use registration::{
    AgeBracket, EditOutcome, FieldState, FormFieldId, NextStep, OnboardingConfig, PostcodeRule,
    RegistrationError, RegistrationRequest, RegistrationScreen, RegistrationSettings, ScreenEvent,
};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::cli::{Cli, Cmd};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitReport {
    request: RegistrationRequest,
    next_step: NextStep,
}

#[derive(Debug, Serialize)]
struct PostcodeReport<'a> {
    postcode: &'a str,
    literal: bool,
    corrected: bool,
}

/// Settings file (if any) with the command-line rule override applied.
pub fn load_settings(cli: &Cli) -> Result<RegistrationSettings> {
    let mut settings = match &cli.config {
        Some(path) => {
            OnboardingConfig::load(path)
                .wrap_err_with(|| format!("reading settings from {}", path.display()))?
                .registration
        }
        None => RegistrationSettings::default(),
    };
    if let Some(rule) = cli.postcode_rule {
        settings.postcode_rule = rule.into();
    }
    debug!(?settings, "settings resolved");
    Ok(settings)
}

pub fn run(cmd: Cmd, settings: RegistrationSettings) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cmd {
        Cmd::Submit {
            name,
            bracket,
            postcode,
        } => {
            let report = submit(&name, bracket, &postcode, settings.postcode_rule)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        Cmd::Replay { script } => {
            for effect in replay(&script, settings)? {
                writeln!(out, "{}", serde_json::to_string(&effect)?)?;
            }
        }
        Cmd::Brackets => {
            for bracket in AgeBracket::iter() {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    bracket.index(),
                    bracket.label(),
                    bracket.representative_age()
                )?;
            }
        }
        Cmd::CheckPostcode { postcode } => {
            let report = PostcodeReport {
                postcode: &postcode,
                literal: validate_postcode_format(&postcode, PostcodeRule::Literal),
                corrected: validate_postcode_format(&postcode, PostcodeRule::Corrected),
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }
    Ok(())
}

/// Fill a form the way the text fields would and submit it.
fn submit(name: &str, bracket: i64, postcode: &str, rule: PostcodeRule) -> Result<SubmitReport> {
    let fields = fill(name, bracket, postcode)?;
    let request = fields.submit(rule).map_err(|err| {
        if err.is_user_facing() {
            eyre!("{err} (\"{postcode}\" under {rule} rule)")
        } else {
            eyre!(err)
        }
    })?;
    let next_step = request.next_step();
    info!(%next_step, "request built");
    Ok(SubmitReport { request, next_step })
}

fn fill(name: &str, bracket: i64, postcode: &str) -> Result<FieldState> {
    let mut fields = FieldState::new();
    for (field, text) in [(FormFieldId::Name, name), (FormFieldId::Postcode, postcode)] {
        if let EditOutcome::Rejected(reason) = fields.apply_edit(field, 0..0, text) {
            return Err(eyre!("{field} rejected: {reason}"));
        }
    }
    match AgeBracket::from_index(bracket) {
        Some(b) => fields.select_bracket(b),
        None if bracket == bracket_index(None) => {}
        None => return Err(RegistrationError::UnknownBracket(bracket).into()),
    }
    Ok(fields)
}

fn replay(script: &Path, settings: RegistrationSettings) -> Result<Vec<registration::Effect>> {
    let content = fs::read_to_string(script)
        .wrap_err_with(|| format!("reading replay script {}", script.display()))?;
    let events: Vec<ScreenEvent> =
        serde_json::from_str(&content).wrap_err("parsing replay script")?;
    debug!(count = events.len(), "replaying events");

    let mut screen = RegistrationScreen::new(settings);
    Ok(events.into_iter().flat_map(|e| screen.handle(e)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use registration::Effect;

    #[test]
    fn submit_builds_minor_request() {
        let report = submit("Jo", 0, "3000", PostcodeRule::Literal).unwrap();
        assert_eq!(report.next_step, NextStep::UnderSixteen);
        assert_eq!(report.request.age, 8);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["nextStep"], "UnderSixteen");
        assert_eq!(json["request"]["fullName"], "Jo");
    }

    #[test]
    fn submit_rejects_filtered_input() {
        let err = submit("Jo!", 0, "3000", PostcodeRule::Literal).unwrap_err();
        assert!(err.to_string().contains("name rejected"));

        let err = submit("Jo", 0, "30000", PostcodeRule::Literal).unwrap_err();
        assert!(err.to_string().contains("postcode rejected"));
    }

    #[test]
    fn submit_reports_gate_and_format_failures() {
        let err = submit("Jo", -1, "3000", PostcodeRule::Literal).unwrap_err();
        assert!(err.to_string().contains("continue gate closed"));

        let err = submit("Jo", 12, "3000", PostcodeRule::Literal).unwrap_err();
        assert!(err.to_string().contains("unknown age bracket index: 12"));

        let err = submit("Jo", 3, "0100", PostcodeRule::Corrected).unwrap_err();
        assert!(err.to_string().starts_with("Please enter a valid postcode"));
    }

    #[test]
    fn replay_reads_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        fs::write(
            &path,
            r#"["Appeared", {"PickerRowSelected": 8}, "BackTapped"]"#,
        )
        .unwrap();

        let effects = replay(&path, RegistrationSettings::default()).unwrap();
        assert_eq!(effects.last(), Some(&Effect::NavigateBack));
        assert!(effects.contains(&Effect::FieldText {
            field: FormFieldId::Age,
            text: "90+".into()
        }));
    }

    #[test]
    fn demo_script_recovers_from_invalid_postcode() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
        let settings = OnboardingConfig::load(&demos.join("onboarding.ron"))
            .unwrap()
            .registration;
        let effects = replay(&demos.join("minor_flow.json"), settings).unwrap();

        let alert = effects
            .iter()
            .find_map(|e| match e {
                Effect::PresentError(alert) => Some(alert),
                _ => None,
            })
            .expect("postcode alert");
        assert_eq!(alert.refocus, FormFieldId::Postcode);
        match effects.last() {
            Some(Effect::Route { request, step }) => {
                assert_eq!(request.full_name, "Jo");
                assert_eq!(request.postcode, "3000");
                assert_eq!(*step, NextStep::UnderSixteen);
            }
            other => panic!("expected route, got {other:?}"),
        }
    }

    #[test]
    fn replay_reports_missing_file() {
        let err = replay(Path::new("/nonexistent/script.json"), RegistrationSettings::default())
            .unwrap_err();
        assert!(err.to_string().contains("reading replay script"));
    }
}
