#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persisted best score and player preferences.
//!
//! Preferences are stored as a flat TOML table keyed by fixed identifiers so
//! files written by older builds keep loading. Missing or malformed keys fall
//! back to their own defaults; a file that is not TOML is treated as absent.
//! [`Persistence`] is the only type the game loop touches: it swallows store
//! failures after logging them, so losing the preferences file never
//! interrupts play.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use neon_snake_core::GameMode;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use toml::Table;

/// Identifier of the persisted best score.
pub const BEST_SCORE_KEY: &str = "snakeHighScore_v1";
/// Identifier of the haptics preference.
pub const HAPTICS_KEY: &str = "snakeHaptics_v1";
/// Identifier of the on-screen D-pad preference.
pub const DPAD_KEY: &str = "snakeDpad_v1";
/// Identifier of the theme name preference.
pub const THEME_KEY: &str = "snakeTheme_v1";
/// Identifier of the last selected game mode.
pub const MODE_KEY: &str = "snakeMode_v1";

/// Theme persisted when none was chosen.
pub const DEFAULT_THEME: &str = "neon";

/// Values remembered between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Preferences {
    /// Highest score reached in any session.
    #[serde(rename = "snakeHighScore_v1")]
    pub best_score: u32,
    /// Whether haptic pulses are requested.
    #[serde(rename = "snakeHaptics_v1")]
    pub haptics: bool,
    /// Whether the on-screen D-pad is shown.
    #[serde(rename = "snakeDpad_v1")]
    pub dpad: bool,
    /// Opaque theme name.
    #[serde(rename = "snakeTheme_v1")]
    pub theme: String,
    /// Mode selected when the game last ran.
    #[serde(rename = "snakeMode_v1")]
    pub mode: GameMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            best_score: 0,
            haptics: true,
            dpad: true,
            theme: DEFAULT_THEME.to_owned(),
            mode: GameMode::default(),
        }
    }
}

impl Preferences {
    /// Decodes preferences from TOML text.
    ///
    /// Each identifier is read on its own: a missing or malformed value falls
    /// back to its default without affecting the others. Only text that is
    /// not a TOML table at all is an error.
    pub fn from_toml(text: &str) -> Result<Self, StorageError> {
        let table: Table = text.parse()?;
        let defaults = Self::default();

        Ok(Self {
            best_score: field(&table, BEST_SCORE_KEY).unwrap_or(defaults.best_score),
            haptics: field(&table, HAPTICS_KEY).unwrap_or(defaults.haptics),
            dpad: field(&table, DPAD_KEY).unwrap_or(defaults.dpad),
            theme: field(&table, THEME_KEY).unwrap_or(defaults.theme),
            mode: field(&table, MODE_KEY).unwrap_or(defaults.mode),
        })
    }

    /// Encodes preferences as TOML text.
    pub fn to_toml(&self) -> Result<String, StorageError> {
        Ok(toml::to_string(self)?)
    }
}

fn field<T: DeserializeOwned>(table: &Table, key: &str) -> Option<T> {
    let value = table.get(key)?;
    match value.clone().try_into() {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            tracing::warn!(key, %error, "ignoring invalid preference value");
            None
        }
    }
}

/// Failures raised by preference stores.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("failed to access preferences at {}", .path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Stored text is not a valid preferences table.
    #[error("stored preferences could not be decoded")]
    Decode(#[from] toml::de::Error),
    /// Preferences could not be turned into TOML.
    #[error("preferences could not be encoded")]
    Encode(#[from] toml::ser::Error),
}

/// Backing storage for [`Preferences`].
pub trait PreferenceStore {
    /// Loads the stored preferences; `Ok(None)` when nothing was saved yet.
    fn load(&mut self) -> Result<Option<Preferences>, StorageError>;

    /// Replaces the stored preferences.
    fn save(&mut self, preferences: &Preferences) -> Result<(), StorageError>;
}

/// Preferences kept in a TOML file on disk.
#[derive(Clone, Debug)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    /// Creates a store backed by `path`; the file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for TomlFileStore {
    fn load(&mut self) -> Result<Option<Preferences>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(error)),
        };
        Preferences::from_toml(&text).map(Some)
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), StorageError> {
        let text = preferences.to_toml()?;
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| self.io_error(error))?;
        }
        fs::write(&self.path, text).map_err(|error| self.io_error(error))
    }
}

/// Preferences kept in memory as encoded TOML text.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `text`, decoded on the next load.
    #[must_use]
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }

    /// Raw text currently stored.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Preferences>, StorageError> {
        self.contents
            .as_deref()
            .map(Preferences::from_toml)
            .transpose()
    }

    fn save(&mut self, preferences: &Preferences) -> Result<(), StorageError> {
        self.contents = Some(preferences.to_toml()?);
        Ok(())
    }
}

/// Failure-tolerant front for a [`PreferenceStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    preferences: Preferences,
}

impl<S: PreferenceStore> Persistence<S> {
    /// Loads preferences from `store`, falling back to defaults on any failure.
    pub fn open(mut store: S) -> Self {
        let preferences = match store.load() {
            Ok(Some(preferences)) => preferences,
            Ok(None) => {
                tracing::debug!("no stored preferences, using defaults");
                Preferences::default()
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable preferences");
                Preferences::default()
            }
        };

        Self { store, preferences }
    }

    /// Current preference values.
    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Best score persisted so far.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.preferences.best_score
    }

    /// Raises the best score when `score` beats it; returns whether it changed.
    pub fn record_best(&mut self, score: u32) -> bool {
        if score <= self.preferences.best_score {
            return false;
        }
        self.preferences.best_score = score;
        self.persist();
        true
    }

    /// Remembers the selected game mode.
    pub fn set_mode(&mut self, mode: GameMode) {
        if self.preferences.mode != mode {
            self.preferences.mode = mode;
            self.persist();
        }
    }

    /// Remembers whether haptics are enabled.
    pub fn set_haptics(&mut self, enabled: bool) {
        if self.preferences.haptics != enabled {
            self.preferences.haptics = enabled;
            self.persist();
        }
    }

    /// Remembers whether the D-pad is shown.
    pub fn set_dpad(&mut self, enabled: bool) {
        if self.preferences.dpad != enabled {
            self.preferences.dpad = enabled;
            self.persist();
        }
    }

    /// Remembers the theme name.
    pub fn set_theme(&mut self, theme: &str) {
        if self.preferences.theme != theme {
            self.preferences.theme = theme.to_owned();
            self.persist();
        }
    }

    /// Backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        if let Err(error) = self.store.save(&self.preferences) {
            tracing::warn!(%error, "failed to save preferences");
        }
    }
}
