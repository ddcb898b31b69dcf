//! Local preference storage with file locking.
//!
//! The only stored preference is dark mode. Until the user toggles it, the
//! system colour-scheme preference applies.

use crate::{Category, Error, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the preference store inside the data directory
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Persisted user preferences
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Preferences {
    /// Explicit dark-mode choice; `None` follows the system preference
    #[serde(default, rename = "dark-mode")]
    pub dark_mode: Option<bool>,
}

/// Colour scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// ANSI foreground escape for a category's accent colour
    ///
    /// Dark terminals get the bright variants.
    pub fn category_style(&self, category: Category) -> String {
        let base = match category.color() {
            "blue" => 34,
            "green" => 32,
            "yellow" => 33,
            _ => 31,
        };
        let code = match self {
            Theme::Light => base,
            Theme::Dark => base + 60,
        };
        format!("\x1b[{}m", code)
    }

    /// Wrap a category name in its accent colour
    pub fn paint(&self, category: Category) -> String {
        format!("{}{}\x1b[0m", self.category_style(category), category.name())
    }
}

impl Preferences {
    /// Preference file location inside a data directory
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(PREFERENCES_FILE)
    }

    /// Resolve dark mode against the system preference
    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        self.dark_mode.unwrap_or(system_prefers_dark)
    }

    pub fn theme(&self, system_prefers_dark: bool) -> Theme {
        Theme::from_dark(self.is_dark(system_prefers_dark))
    }

    /// Read the stored preferences
    ///
    /// Missing or unreadable files fall back to the system preference.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No stored dark-mode choice at {:?}", path);
            return Ok(Self::default());
        }

        let prefs = read_shared(path)
            .map_err(Error::from)
            .and_then(|contents| Ok(serde_json::from_str::<Preferences>(&contents)?));
        match prefs {
            Ok(prefs) => {
                tracing::debug!("Dark mode preference {:?} from {:?}", prefs.dark_mode, path);
                Ok(prefs)
            }
            Err(e) => {
                tracing::warn!("Ignoring preferences at {:?}: {}", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save preferences atomically (temp file, sync, rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "preference path missing parent")
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Flip dark mode and persist the explicit choice
    ///
    /// Returns the updated preferences.
    pub fn toggle_dark_mode(path: &Path, system_prefers_dark: bool) -> Result<Self> {
        let mut prefs = Self::load(path)?;
        let dark = !prefs.is_dark(system_prefers_dark);
        prefs.dark_mode = Some(dark);
        prefs.save(path)?;
        tracing::info!("Dark mode {}", if dark { "enabled" } else { "disabled" });
        Ok(prefs)
    }
}

fn read_shared(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    file.lock_shared()?;
    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;
    read.map(|_| contents)
}
