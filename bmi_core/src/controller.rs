//! Calculator controller owning the measurement state.
//!
//! Every user action goes through one entry point that updates the single
//! [`Measurement`] and notifies subscribers with the full new state. At most
//! one field is in editing mode at a time.

use crate::editor::{EditEvent, EditOutcome, FieldEditor};
use crate::{Config, Limits, Measurement, Result, Variable};

/// Callback invoked with the new state after every change
pub type Observer = Box<dyn FnMut(&Measurement)>;

/// Interactive calculator driving the edit/propagation model
pub struct Calculator {
    state: Measurement,
    limits: Limits,
    editor: Option<FieldEditor>,
    observers: Vec<Observer>,
}

impl Calculator {
    pub fn new(state: Measurement, limits: Limits) -> Self {
        Self {
            state,
            limits,
            editor: None,
            observers: Vec::new(),
        }
    }

    /// Build a calculator from the configured defaults and limits
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.defaults.initial_state(), config.limits)
    }

    pub fn state(&self) -> &Measurement {
        &self.state
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Field currently in editing mode, if any
    pub fn editing(&self) -> Option<&FieldEditor> {
        self.editor.as_ref()
    }

    /// Register a callback for state changes
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Measurement) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Select the field being solved for
    ///
    /// Values are untouched; an edit in progress on the newly derived field
    /// is cancelled.
    pub fn select_target(&mut self, target: Variable) -> &Measurement {
        if self.editor.as_ref().is_some_and(|e| e.field() == target) {
            self.editor = None;
        }
        self.state.set_target(target);
        self.notify();
        &self.state
    }

    /// Commit a slider value for a field
    pub fn slide(&mut self, field: Variable, value: f64) -> Result<&Measurement> {
        let next = self.state.apply(field, value, &self.limits)?;
        self.replace(next);
        Ok(&self.state)
    }

    /// Click or tap on a field's displayed value
    ///
    /// Another field being edited loses focus first, which commits it.
    pub fn click(&mut self, field: Variable) -> EditOutcome {
        if let Some(active) = self.editor.as_ref() {
            if active.field() == field {
                return EditOutcome::Ignored;
            }
            self.blur();
        }

        let mut editor = FieldEditor::new(field);
        let outcome = editor.handle(EditEvent::Activate, &self.state, &self.limits);
        if outcome == EditOutcome::Started {
            self.editor = Some(editor);
        }
        outcome
    }

    /// Replace the draft text of the active editor
    pub fn type_text(&mut self, text: &str) -> EditOutcome {
        self.send(EditEvent::Input(text.to_string()))
    }

    pub fn press_enter(&mut self) -> EditOutcome {
        self.send(EditEvent::Enter)
    }

    pub fn press_escape(&mut self) -> EditOutcome {
        self.send(EditEvent::Escape)
    }

    pub fn blur(&mut self) -> EditOutcome {
        self.send(EditEvent::Blur)
    }

    fn send(&mut self, event: EditEvent) -> EditOutcome {
        let Some(editor) = self.editor.as_mut() else {
            return EditOutcome::Ignored;
        };

        let outcome = editor.handle(event, &self.state, &self.limits);
        if !editor.is_editing() {
            self.editor = None;
        }
        if let EditOutcome::Committed(next) = &outcome {
            self.replace(*next);
        }
        outcome
    }

    fn replace(&mut self, next: Measurement) {
        self.state = next;
        tracing::debug!(
            "State updated: weight={:.2} height={:.2} bmi={:.2} target={}",
            self.state.weight,
            self.state.height,
            self.state.bmi,
            self.state.target
        );
        self.notify();
    }

    fn notify(&mut self) {
        let state = self.state;
        for observer in self.observers.iter_mut() {
            observer(&state);
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Measurement::default(), Limits::default())
    }
}
