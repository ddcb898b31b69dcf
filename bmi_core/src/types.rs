//! Core domain types for the BMI calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - The three measurement variables and their units
//! - BMI categories and healthy weight ranges
//! - Clamp bounds for committed edits
//! - The measurement state shared by every view

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Variables
// ============================================================================

/// One of the three quantities tied together by the BMI formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Weight,
    Height,
    Bmi,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::Weight, Variable::Height, Variable::Bmi];

    /// Human readable field label
    pub fn label(&self) -> &'static str {
        match self {
            Variable::Weight => "Weight",
            Variable::Height => "Height",
            Variable::Bmi => "BMI",
        }
    }

    /// Display unit, empty for BMI
    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Weight => "kg",
            Variable::Height => "cm",
            Variable::Bmi => "",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weight" | "w" => Ok(Variable::Weight),
            "height" | "h" => Ok(Variable::Height),
            "bmi" | "b" => Ok(Variable::Bmi),
            other => Err(Error::InvalidInput(format!("unknown variable '{}'", other))),
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// BMI classification bucket
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Underweight => "Underweight",
            Category::NormalWeight => "Normal weight",
            Category::Overweight => "Overweight",
            Category::Obese => "Obese",
        }
    }

    /// BMI range shown next to the category name
    pub fn range_label(&self) -> &'static str {
        match self {
            Category::Underweight => "< 18.5",
            Category::NormalWeight => "18.5 - 24.9",
            Category::Overweight => "25.0 - 29.9",
            Category::Obese => "≥ 30.0",
        }
    }

    /// Accent colour used when rendering the category
    pub fn color(&self) -> &'static str {
        match self {
            Category::Underweight => "blue",
            Category::NormalWeight => "green",
            Category::Overweight => "yellow",
            Category::Obese => "red",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weight bounds in kilograms
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

// ============================================================================
// Bounds
// ============================================================================

/// Closed interval applied to committed edits
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Clamp bounds for every variable
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Limits {
    #[serde(default = "default_weight_bounds")]
    pub weight: Bounds,

    #[serde(default = "default_height_bounds")]
    pub height: Bounds,

    #[serde(default = "default_bmi_bounds")]
    pub bmi: Bounds,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            weight: default_weight_bounds(),
            height: default_height_bounds(),
            bmi: default_bmi_bounds(),
        }
    }
}

impl Limits {
    pub fn for_variable(&self, variable: Variable) -> Bounds {
        match variable {
            Variable::Weight => self.weight,
            Variable::Height => self.height,
            Variable::Bmi => self.bmi,
        }
    }
}

fn default_weight_bounds() -> Bounds {
    Bounds::new(30.0, 200.0)
}

fn default_height_bounds() -> Bounds {
    Bounds::new(100.0, 250.0)
}

fn default_bmi_bounds() -> Bounds {
    Bounds::new(10.0, 60.0)
}

// ============================================================================
// Measurement State
// ============================================================================

/// The single weight/height/BMI state every view renders from
///
/// `target` names the field currently solved for; the other two are inputs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimetres
    pub height: f64,
    pub bmi: f64,
    pub target: Variable,
}
