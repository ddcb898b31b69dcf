//! Edit propagation for the measurement state.
//!
//! The target variable is the field being solved for. Committing an edit to
//! either of the other two fields clamps the new value and recomputes the
//! target:
//!
//! | target | recomputed with |
//! |--------|-----------------|
//! | bmi    | `compute_bmi(weight, height)` |
//! | weight | `compute_weight(bmi, height)` |
//! | height | `compute_height(bmi, weight)` |
//!
//! Derived values are never clamped so the BMI formula always holds.

use crate::conversion::{classify, compute_bmi, compute_height, compute_weight, healthy_weight_range};
use crate::{Category, Error, Limits, Measurement, Result, Variable, WeightRange};

impl Default for Measurement {
    fn default() -> Self {
        Self::new(70.0, 175.0, Variable::Bmi)
    }
}

impl Measurement {
    /// Create a state from weight and height, deriving BMI
    pub fn new(weight: f64, height: f64, target: Variable) -> Self {
        Self {
            weight,
            height,
            bmi: compute_bmi(weight, height),
            target,
        }
    }

    /// Current value of a field
    pub fn value(&self, variable: Variable) -> f64 {
        match variable {
            Variable::Weight => self.weight,
            Variable::Height => self.height,
            Variable::Bmi => self.bmi,
        }
    }

    /// Whether the field is currently derived (read-only)
    pub fn is_derived(&self, variable: Variable) -> bool {
        self.target == variable
    }

    /// Switch the field being solved for
    ///
    /// No value changes; only the read-only field moves.
    pub fn set_target(&mut self, target: Variable) {
        if self.target != target {
            tracing::debug!("Target variable changed from {} to {}", self.target, target);
        }
        self.target = target;
    }

    /// Commit a numeric edit and return the recomputed state
    ///
    /// The value is clamped to the field's bounds before it is accepted.
    pub fn apply(&self, field: Variable, value: f64, limits: &Limits) -> Result<Measurement> {
        if self.is_derived(field) {
            return Err(Error::DerivedField(field));
        }
        if !value.is_finite() {
            return Err(Error::InvalidInput(format!("{} is not a finite number", value)));
        }

        let bounds = limits.for_variable(field);
        let accepted = bounds.clamp(value);
        if accepted != value {
            tracing::debug!(
                "Clamped {} from {} to {} (bounds {}..={})",
                field,
                value,
                accepted,
                bounds.min,
                bounds.max
            );
        }

        let mut next = *self;
        match field {
            Variable::Weight => next.weight = accepted,
            Variable::Height => next.height = accepted,
            Variable::Bmi => next.bmi = accepted,
        }
        next.recompute();
        Ok(next)
    }

    /// Commit a textual edit
    ///
    /// Empty or non-numeric text is rejected; the caller keeps its prior
    /// state. Numeric text is clamped and propagated like [`Self::apply`].
    pub fn commit_text(&self, field: Variable, text: &str, limits: &Limits) -> Result<Measurement> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput(format!("empty value for {}", field)));
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| Error::InvalidInput(format!("'{}' is not a number", trimmed)))?;
        self.apply(field, value, limits)
    }

    /// Recompute the target field from the other two
    fn recompute(&mut self) {
        match self.target {
            Variable::Bmi => self.bmi = compute_bmi(self.weight, self.height),
            Variable::Weight => self.weight = compute_weight(self.bmi, self.height),
            Variable::Height => self.height = compute_height(self.bmi, self.weight),
        }
    }

    pub fn category(&self) -> Category {
        classify(self.bmi)
    }

    pub fn healthy_weight_range(&self) -> WeightRange {
        healthy_weight_range(self.height)
    }

    /// Whether `bmi = weight / (height/100)^2` holds within a relative tolerance
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        let expected = compute_bmi(self.weight, self.height);
        (expected - self.bmi).abs() <= tolerance * expected.abs().max(self.bmi.abs())
    }
}
