//! Keyboard avoidance.
//!
//! The form lives in a scrollable region that does not cover the whole
//! viewport, so only the part of the keyboard overlapping the region needs
//! an inset, plus a small gap below the focused field.

use serde::{Deserialize, Serialize};

/// Space kept between the keyboard and the focused field.
pub const DEFAULT_KEYBOARD_GAP: f64 = 40.0;

/// Geometry reported when the keyboard frame changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyboardFrame {
    pub keyboard_height: f64,
    pub viewport_height: f64,
    pub scrollable_height: f64,
}

/// Frame of a field inside the scrollable region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Bottom inset to apply and the rect to scroll into view, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InsetPlan {
    pub bottom: f64,
    pub reveal: Option<FieldFrame>,
}

impl InsetPlan {
    /// Keyboard hidden: no inset, nothing to reveal.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Inset for a visible keyboard. Never negative.
pub fn content_inset(keyboard: KeyboardFrame, reveal: Option<FieldFrame>, gap: f64) -> InsetPlan {
    let outside_region = keyboard.viewport_height - keyboard.scrollable_height;
    let bottom = (keyboard.keyboard_height - outside_region + gap).max(0.0);
    InsetPlan { bottom, reveal }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(keyboard_height: f64) -> KeyboardFrame {
        KeyboardFrame {
            keyboard_height,
            viewport_height: 800.0,
            scrollable_height: 700.0,
        }
    }

    #[test]
    fn subtracts_area_outside_scroll_region() {
        let plan = content_inset(frame(300.0), None, DEFAULT_KEYBOARD_GAP);
        assert_eq!(plan.bottom, 240.0);
        assert_eq!(plan.reveal, None);
    }

    #[test]
    fn carries_focused_field_to_reveal() {
        let field = FieldFrame {
            x: 16.0,
            y: 420.0,
            width: 300.0,
            height: 44.0,
        };
        let plan = content_inset(frame(300.0), Some(field), 0.0);
        assert_eq!(plan.bottom, 200.0);
        assert_eq!(plan.reveal, Some(field));
    }

    #[test]
    fn small_keyboard_does_not_go_negative() {
        let plan = content_inset(frame(20.0), None, 0.0);
        assert_eq!(plan.bottom, 0.0);
    }

    #[test]
    fn zero_plan_is_empty() {
        assert_eq!(
            InsetPlan::zero(),
            InsetPlan {
                bottom: 0.0,
                reveal: None
            }
        );
    }
}
