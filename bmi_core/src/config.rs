//! Configuration file support for the BMI calculator.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi/config.toml`.
//! `APP_NAME`, `APP_VERSION` and `APP_ENV` override the `[app]` section.

use crate::{Bounds, Error, Limits, Measurement, Result, Variable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub limits: Limits,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub appearance: AppearanceConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Initial measurement values
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_weight")]
    pub weight: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_target")]
    pub target: Variable,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            height: default_height(),
            target: default_target(),
        }
    }
}

impl DefaultsConfig {
    pub fn initial_state(&self) -> Measurement {
        Measurement::new(self.weight, self.height, self.target)
    }
}

/// Health endpoint server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Application identity reported by the health endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_version(),
            environment: default_environment(),
        }
    }
}

/// Appearance configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AppearanceConfig {
    /// System colour scheme preference, used until the user toggles dark mode
    #[serde(default)]
    pub prefer_dark: bool,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("bmi")
}

fn default_weight() -> f64 {
    70.0
}

fn default_height() -> f64 {
    175.0
}

fn default_target() -> Variable {
    Variable::Bmi
}

fn default_bind() -> String {
    "127.0.0.1:3000".into()
}

fn default_app_name() -> String {
    "BMI Calculator".into()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

fn default_environment() -> String {
    "production".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        let config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("bmi").join("config.toml")
    }

    /// Apply `APP_NAME`, `APP_VERSION` and `APP_ENV` from the environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(name) = std::env::var("APP_NAME") {
            self.app.name = name;
        }
        if let Ok(version) = std::env::var("APP_VERSION") {
            self.app.version = version;
        }
        if let Ok(environment) = std::env::var("APP_ENV") {
            self.app.environment = environment;
        }
        self
    }

    /// Check that limits are usable and defaults fall inside them
    pub fn validate(&self) -> Result<()> {
        for variable in Variable::ALL {
            let bounds = self.limits.for_variable(variable);
            validate_bounds(variable, &bounds)?;
        }

        let weight = self.limits.weight;
        if !weight.contains(self.defaults.weight) {
            return Err(Error::Config(format!(
                "default weight {} outside {}..={}",
                self.defaults.weight, weight.min, weight.max
            )));
        }
        let height = self.limits.height;
        if !height.contains(self.defaults.height) {
            return Err(Error::Config(format!(
                "default height {} outside {}..={}",
                self.defaults.height, height.min, height.max
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

fn validate_bounds(variable: Variable, bounds: &Bounds) -> Result<()> {
    if !(bounds.min.is_finite() && bounds.max.is_finite()) {
        return Err(Error::Config(format!("{} bounds must be finite", variable)));
    }
    if bounds.min <= 0.0 {
        return Err(Error::Config(format!(
            "{} lower bound must be positive, got {}",
            variable, bounds.min
        )));
    }
    if bounds.min >= bounds.max {
        return Err(Error::Config(format!(
            "{} lower bound {} must be below upper bound {}",
            variable, bounds.min, bounds.max
        )));
    }
    Ok(())
}
