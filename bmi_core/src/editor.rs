//! Click-to-edit state machine for a single numeric field.
//!
//! ```text
//! Display --Activate--> Editing --Enter|Blur--> commit --> Display
//!                       Editing --Escape------> revert --> Display
//! ```
//!
//! A field that is currently derived ignores activation.

use crate::{Error, Limits, Measurement, Variable};

/// Editing mode of a field
#[derive(Clone, Debug, PartialEq)]
pub enum EditState {
    Display,
    Editing { draft: String },
}

/// User interaction delivered to a field
#[derive(Clone, Debug, PartialEq)]
pub enum EditEvent {
    /// Click or tap on the displayed value
    Activate,
    /// Replace the draft text
    Input(String),
    Enter,
    Blur,
    Escape,
}

/// Result of handling an [`EditEvent`]
#[derive(Clone, Debug, PartialEq)]
pub enum EditOutcome {
    /// Event had no effect in the current state
    Ignored,
    /// Entered editing mode
    Started,
    /// Draft text changed
    Updated,
    /// Draft accepted; carries the recomputed state
    Committed(Measurement),
    /// Confirmed without changing the pre-filled text; nothing recomputed
    Unchanged,
    /// Draft rejected as invalid; value unchanged
    Reverted,
    /// Editing cancelled with Escape; value unchanged
    Cancelled,
}

/// Editor for one of the measurement fields
#[derive(Clone, Debug)]
pub struct FieldEditor {
    field: Variable,
    state: EditState,
    /// Text the draft was pre-filled with on activation
    prefill: String,
}

impl FieldEditor {
    pub fn new(field: Variable) -> Self {
        Self {
            field,
            state: EditState::Display,
            prefill: String::new(),
        }
    }

    pub fn field(&self) -> Variable {
        self.field
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Draft text while editing
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft } => Some(draft),
            EditState::Display => None,
        }
    }

    /// Advance the state machine
    ///
    /// `current` is the state the field is displaying; commits are computed
    /// against it.
    pub fn handle(&mut self, event: EditEvent, current: &Measurement, limits: &Limits) -> EditOutcome {
        match event {
            EditEvent::Activate => {
                if self.is_editing() {
                    return EditOutcome::Ignored;
                }
                if current.is_derived(self.field) {
                    tracing::debug!("{} is derived; ignoring activation", self.field);
                    return EditOutcome::Ignored;
                }
                self.prefill = format_value(current.value(self.field));
                self.state = EditState::Editing {
                    draft: self.prefill.clone(),
                };
                EditOutcome::Started
            }
            EditEvent::Input(text) => match &mut self.state {
                EditState::Editing { draft } => {
                    *draft = text;
                    EditOutcome::Updated
                }
                EditState::Display => EditOutcome::Ignored,
            },
            EditEvent::Escape => {
                if !self.is_editing() {
                    return EditOutcome::Ignored;
                }
                self.state = EditState::Display;
                EditOutcome::Cancelled
            }
            EditEvent::Enter | EditEvent::Blur => {
                let text = match std::mem::replace(&mut self.state, EditState::Display) {
                    EditState::Editing { draft } => draft,
                    EditState::Display => return EditOutcome::Ignored,
                };
                // Untouched rounded prefill keeps the exact stored value
                if text.trim() == self.prefill {
                    return EditOutcome::Unchanged;
                }
                match current.commit_text(self.field, &text, limits) {
                    Ok(next) => EditOutcome::Committed(next),
                    Err(Error::InvalidInput(reason)) => {
                        tracing::debug!("Reverting {}: {}", self.field, reason);
                        EditOutcome::Reverted
                    }
                    Err(e) => {
                        tracing::warn!("Reverting {}: {}", self.field, e);
                        EditOutcome::Reverted
                    }
                }
            }
        }
    }
}

/// Format a value the way it is shown and pre-filled for editing
pub fn format_value(value: f64) -> String {
    format!("{:.1}", value)
}
