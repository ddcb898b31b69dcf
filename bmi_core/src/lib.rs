#![forbid(unsafe_code)]

//! Core domain model and calculation logic for the BMI calculator.
//!
//! This crate provides:
//! - Weight/height/BMI conversions and category classification
//! - Measurement state with target-variable propagation
//! - Click-to-edit field editing and the calculator controller
//! - Configuration, logging and local preference storage
//! - Health reporting for the liveness endpoint

pub mod types;
pub mod error;
pub mod conversion;
pub mod config;
pub mod logging;
pub mod propagation;
pub mod editor;
pub mod controller;
pub mod preferences;
pub mod health;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use conversion::{classify, compute_bmi, compute_height, compute_weight, healthy_weight_range};
pub use config::Config;
pub use editor::{EditEvent, EditOutcome, EditState, FieldEditor};
pub use controller::Calculator;
pub use preferences::{Preferences, Theme};
pub use health::{HealthMonitor, HealthReport};
