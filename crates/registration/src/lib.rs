//! Personal-details onboarding step.
//!
//! The crate holds everything that decides *whether* a user may leave the
//! personal-details step and *what* is handed to the next step:
//!
//! - `validator` : per-character / per-edit predicates and the postcode rule
//! - `bracket`   : the fixed age-bracket list and its representative ages
//! - `field`     : field identifiers and the edit policy applied to each field
//! - `state`     : `FieldState`, the mutable form owned by the screen
//! - `focus`     : the focus sequence Name -> Age -> Postcode -> Done
//! - `viewport`  : keyboard-avoidance inset computation
//! - `request`   : the outgoing `RegistrationRequest` and routing decision
//! - `screen`    : `RegistrationScreen`, a reducer turning host events into effects
//! - `settings`  : RON-backed configuration
//!
//! Nothing in here renders. A host (UI toolkit, terminal, test) feeds
//! `ScreenEvent`s into the screen and interprets the returned `Effect`s.
//!
//! ```ignore
//! use registration::{RegistrationScreen, RegistrationSettings, ScreenEvent};
//!
//! let mut screen = RegistrationScreen::new(RegistrationSettings::default());
//! for effect in screen.handle(ScreenEvent::Appeared) {
//!     println!("{effect:?}");
//! }
//! ```

pub mod bracket;
pub mod errors;
pub mod field;
pub mod focus;
pub mod request;
pub mod screen;
pub mod settings;
pub mod state;
pub mod validator;
pub mod viewport;

pub use bracket::AgeBracket;
pub use errors::RegistrationError;
pub use field::{EditOutcome, FormFieldId, RejectReason};
pub use focus::{advance_focus, AccessoryTitle, FocusStep};
pub use request::{next_step_for, NextStep, RegistrationRequest};
pub use screen::{Effect, RegistrationScreen, ScreenEvent, ValidationAlert};
pub use settings::{section_from_ron, OnboardingConfig, RegistrationSettings, Settings};
pub use state::FieldState;
pub use validator::PostcodeRule;
pub use viewport::{FieldFrame, InsetPlan, KeyboardFrame};
