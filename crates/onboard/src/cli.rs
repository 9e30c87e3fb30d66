// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use registration::PostcodeRule;

#[derive(Parser, Debug)]
#[command(name = "onboard", version, about = "Personal-details onboarding step driver")]
pub struct Cli {
    /// Settings file (RON); defaults apply when absent
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Postcode pattern used on submit; overrides the settings file
    #[arg(long, value_enum, global = true)]
    pub postcode_rule: Option<RuleArg>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Validate name, age bracket and postcode, then print the outgoing request
    Submit {
        #[arg(long)]
        name: String,
        /// Picker row 0-8, or -1 for "not selected"
        #[arg(long, allow_negative_numbers = true)]
        bracket: i64,
        #[arg(long)]
        postcode: String,
    },
    /// Feed a JSON array of screen events and print one effect per line
    Replay { script: PathBuf },
    /// List age brackets with their representative ages
    Brackets,
    /// Check a postcode against both patterns
    CheckPostcode { postcode: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    Literal,
    Corrected,
}

impl From<RuleArg> for PostcodeRule {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::Literal => PostcodeRule::Literal,
            RuleArg::Corrected => PostcodeRule::Corrected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_accepts_unset_bracket() {
        let cli = Cli::try_parse_from([
            "onboard", "submit", "--name", "Jo", "--bracket", "-1", "--postcode", "3000",
        ])
        .unwrap();
        match cli.cmd {
            Cmd::Submit { bracket, .. } => assert_eq!(bracket, -1),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "onboard",
            "check-postcode",
            "0800",
            "--postcode-rule",
            "corrected",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.postcode_rule, Some(RuleArg::Corrected));
        assert!(cli.verbose);
        assert!(matches!(cli.cmd, Cmd::CheckPostcode { ref postcode } if postcode == "0800"));
    }

    #[test]
    fn rule_arg_maps_to_library_rule() {
        assert_eq!(PostcodeRule::from(RuleArg::Literal), PostcodeRule::Literal);
        assert_eq!(PostcodeRule::from(RuleArg::Corrected), PostcodeRule::Corrected);
    }
}
