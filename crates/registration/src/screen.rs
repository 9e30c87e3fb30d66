//! Personal-details screen as a reducer.
//!
//! The host reports what happened (`ScreenEvent`) and gets back what it
//! should do (`Effect`). The screen never talks to a UI toolkit itself.
//!
//! Policy:
//!   - `handle` is synchronous and finishes within the call.
//!   - Unknown or out-of-place events are ignored, never an error.
//!   - `Effect::Focus` is a command. The screen has already done the
//!     end/begin bookkeeping for that move, so hosts must not echo it back
//!     as `EndEditing` / `BeginEditing`.
//!   - The continue gate is re-evaluated after every accepted edit, picker
//!     selection and focus change, and reported as `ContinueEnabled`.
//!   - After a successful continue the form is consumed; further events
//!     other than `Disappeared` and `BackTapped` are ignored.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bracket::AgeBracket;
use crate::errors::RegistrationError;
use crate::field::{EditOutcome, FormFieldId};
use crate::focus::{AccessoryTitle, FocusStep};
use crate::request::{NextStep, RegistrationRequest};
use crate::settings::RegistrationSettings;
use crate::state::FieldState;
use crate::viewport::{content_inset, FieldFrame, InsetPlan, KeyboardFrame};

/// Something the host observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScreenEvent {
    Appeared,
    Disappeared,
    /// User moved focus into a field (tap).
    BeginEditing(FormFieldId),
    /// User moved focus out of a field.
    EndEditing(FormFieldId),
    /// Proposed keystroke; `range` is in characters.
    Edit {
        field: FormFieldId,
        range: Range<usize>,
        replacement: String,
    },
    /// Picker row chosen (0-based).
    PickerRowSelected(usize),
    ReturnPressed(FormFieldId),
    AccessoryTapped,
    FieldLaidOut {
        field: FormFieldId,
        frame: FieldFrame,
    },
    KeyboardFrameChanged(KeyboardFrame),
    KeyboardHidden,
    ContinueTapped,
    ErrorAcknowledged,
    BackTapped,
}

/// Blocking message for the error-presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationAlert {
    pub title: String,
    pub message: String,
    /// Field to focus once the alert is acknowledged.
    pub refocus: FormFieldId,
}

impl ValidationAlert {
    pub fn new(message: impl Into<String>, refocus: FormFieldId) -> Self {
        Self {
            title: "Validation error".into(),
            message: message.into(),
            refocus,
        }
    }
}

/// Something the host should do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Move input focus; `None` dismisses the keyboard.
    Focus(Option<FormFieldId>),
    FieldText {
        field: FormFieldId,
        text: String,
    },
    AccessoryTitle(AccessoryTitle),
    ContinueEnabled(bool),
    ContentInset(InsetPlan),
    PresentError(ValidationAlert),
    /// Hand the request to the next step.
    Route {
        request: RegistrationRequest,
        step: NextStep,
    },
    NavigateBack,
}

pub struct RegistrationScreen {
    settings: RegistrationSettings,
    fields: FieldState,
    focused: Option<FormFieldId>,
    observing_keyboard: bool,
    keyboard: Option<KeyboardFrame>,
    frames: HashMap<FormFieldId, FieldFrame>,
    pending_alert: Option<ValidationAlert>,
    finished: bool,
}

impl RegistrationScreen {
    pub fn new(settings: RegistrationSettings) -> Self {
        Self {
            settings,
            fields: FieldState::new(),
            focused: None,
            observing_keyboard: false,
            keyboard: None,
            frames: HashMap::new(),
            pending_alert: None,
            finished: false,
        }
    }

    pub fn fields(&self) -> &FieldState {
        &self.fields
    }

    pub fn focused(&self) -> Option<FormFieldId> {
        self.focused
    }

    pub fn focus_step(&self) -> FocusStep {
        FocusStep::from_field(self.focused)
    }

    pub fn settings(&self) -> &RegistrationSettings {
        &self.settings
    }

    pub fn pending_alert(&self) -> Option<&ValidationAlert> {
        self.pending_alert.as_ref()
    }

    pub fn continue_enabled(&self) -> bool {
        self.fields.can_continue()
    }

    /// True once a request has been routed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn handle(&mut self, event: ScreenEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.finished {
            match event {
                ScreenEvent::Disappeared => self.stop_observing(),
                ScreenEvent::BackTapped => effects.push(Effect::NavigateBack),
                other => debug!(?other, "screen finished, event ignored"),
            }
            return effects;
        }

        match event {
            ScreenEvent::Appeared => {
                self.observing_keyboard = true;
                effects.push(Effect::ContinueEnabled(self.fields.can_continue()));
                self.move_focus(Some(FormFieldId::Name), &mut effects);
            }
            ScreenEvent::Disappeared => self.stop_observing(),
            ScreenEvent::BeginEditing(field) => {
                if let Some(previous) = self.focused.filter(|f| *f != field) {
                    self.end_editing(previous, &mut effects);
                }
                self.begin_editing(field, &mut effects);
            }
            ScreenEvent::EndEditing(field) => {
                self.end_editing(field, &mut effects);
                if self.focused == Some(field) {
                    self.focused = None;
                }
            }
            ScreenEvent::Edit {
                field,
                range,
                replacement,
            } => {
                if let EditOutcome::Applied = self.fields.apply_edit(field, range, &replacement) {
                    effects.push(self.field_text(field));
                    effects.push(Effect::ContinueEnabled(self.fields.can_continue()));
                }
            }
            ScreenEvent::PickerRowSelected(row) => {
                match AgeBracket::from_index(row as i64) {
                    Some(bracket) => {
                        self.fields.select_bracket(bracket);
                        effects.push(self.field_text(FormFieldId::Age));
                        effects.push(Effect::ContinueEnabled(self.fields.can_continue()));
                    }
                    None => debug!(row, "picker row out of range"),
                }
            }
            ScreenEvent::ReturnPressed(FormFieldId::Name) => {
                if self.fields.normalize_name() {
                    effects.push(self.field_text(FormFieldId::Name));
                }
                self.move_focus(Some(FormFieldId::Age), &mut effects);
            }
            ScreenEvent::ReturnPressed(_) => {}
            ScreenEvent::AccessoryTapped => {
                let current = self.focus_step();
                if current != FocusStep::Done {
                    self.move_focus(current.after_accessory().field(), &mut effects);
                }
            }
            ScreenEvent::FieldLaidOut { field, frame } => {
                self.frames.insert(field, frame);
            }
            ScreenEvent::KeyboardFrameChanged(frame) => {
                if self.observing_keyboard {
                    self.keyboard = Some(frame);
                    effects.extend(self.inset_effect());
                }
            }
            ScreenEvent::KeyboardHidden => {
                if self.observing_keyboard {
                    self.keyboard = None;
                    effects.push(Effect::ContentInset(InsetPlan::zero()));
                }
            }
            ScreenEvent::ContinueTapped => self.submit(&mut effects),
            ScreenEvent::ErrorAcknowledged => {
                if let Some(alert) = self.pending_alert.take() {
                    self.move_focus(Some(alert.refocus), &mut effects);
                }
            }
            ScreenEvent::BackTapped => effects.push(Effect::NavigateBack),
        }

        effects
    }

    fn stop_observing(&mut self) {
        self.observing_keyboard = false;
        self.keyboard = None;
    }

    fn field_text(&self, field: FormFieldId) -> Effect {
        Effect::FieldText {
            field,
            text: self.fields.text(field).to_string(),
        }
    }

    /// Screen-initiated focus move: end the old field, begin the new one,
    /// then tell the host.
    fn move_focus(&mut self, target: Option<FormFieldId>, effects: &mut Vec<Effect>) {
        if let Some(previous) = self.focused.filter(|f| Some(*f) != target) {
            self.end_editing(previous, effects);
        }
        match target {
            Some(field) => self.begin_editing(field, effects),
            None => self.focused = None,
        }
        effects.push(Effect::Focus(target));
    }

    fn begin_editing(&mut self, field: FormFieldId, effects: &mut Vec<Effect>) {
        self.focused = Some(field);
        if let Some(title) = FocusStep::from_field(Some(field)).accessory_title() {
            effects.push(Effect::AccessoryTitle(title));
        }
        effects.extend(self.inset_effect());
    }

    fn end_editing(&mut self, field: FormFieldId, effects: &mut Vec<Effect>) {
        // Only the age field resigning commits the picker row.
        if field == FormFieldId::Age && self.focused == Some(FormFieldId::Age) {
            let bracket = self.fields.commit_highlighted();
            debug!(%bracket, "age field left, picker row committed");
            effects.push(self.field_text(FormFieldId::Age));
        }
        if self.fields.normalize_name() {
            effects.push(self.field_text(FormFieldId::Name));
        }
        effects.push(Effect::ContinueEnabled(self.fields.can_continue()));
    }

    fn inset_effect(&self) -> Option<Effect> {
        let keyboard = self.keyboard?;
        let field = self.focused?;
        let reveal = self.frames.get(&field).copied();
        Some(Effect::ContentInset(content_inset(
            keyboard,
            reveal,
            self.settings.keyboard_gap,
        )))
    }

    fn submit(&mut self, effects: &mut Vec<Effect>) {
        match self.fields.submit(self.settings.postcode_rule) {
            Ok(request) => {
                let step = request.next_step();
                info!(%step, age = request.age, "registration details accepted");
                self.finished = true;
                self.fields = FieldState::new();
                effects.push(Effect::Route { request, step });
            }
            Err(RegistrationError::Incomplete) => {
                debug!("continue tapped while gate closed");
            }
            Err(err) => {
                warn!(rule = %self.settings.postcode_rule, "postcode rejected on submit");
                let alert = ValidationAlert::new(err.to_string(), FormFieldId::Postcode);
                self.pending_alert = Some(alert.clone());
                effects.push(Effect::PresentError(alert));
            }
        }
    }
}

impl Default for RegistrationScreen {
    fn default() -> Self {
        Self::new(RegistrationSettings::default())
    }
}
