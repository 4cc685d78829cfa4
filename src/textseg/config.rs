//! Configuration loader for textseg.
//!
//! `defaults/textseg.default.toml` is embedded into the crate so docs and runtime behavior
//! stay in sync. Callers layer their own files on top of those defaults via [`Loader`]
//! before deserializing into [`TextsegConfig`].

use crate::textseg::delimiters::DelimiterSet;
use crate::textseg::profile::DelimiterProfile;
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/textseg.default.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] ::config::ConfigError),

    #[error("unknown delimiter profile '{0}'")]
    UnknownProfile(String),

    #[error("break_char must be exactly one character, got {0:?}")]
    InvalidBreakChar(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TextsegConfig {
    pub wrap: WrapConfig,
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

/// Defaults for the `wrap` command.
#[derive(Debug, Clone, Deserialize)]
pub struct WrapConfig {
    pub line_length: usize,
    pub break_char: String,
}

/// One named delimiter profile. Omitted roles are switched off.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub leading: Vec<String>,
    #[serde(default)]
    pub trailing: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub end_of_line: Vec<String>,
}

impl WrapConfig {
    pub fn break_char(&self) -> Result<char, ConfigError> {
        let mut chars = self.break_char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConfigError::InvalidBreakChar(self.break_char.clone())),
        }
    }
}

impl From<&ProfileConfig> for DelimiterProfile {
    fn from(profile: &ProfileConfig) -> Self {
        DelimiterProfile {
            keywords: DelimiterSet::new(profile.keywords.iter().cloned()),
            leading: DelimiterSet::new(profile.leading.iter().cloned()),
            trailing: DelimiterSet::new(profile.trailing.iter().cloned()),
            comments: DelimiterSet::new(profile.comments.iter().cloned()),
            end_of_line: DelimiterSet::new(profile.end_of_line.iter().cloned()),
        }
    }
}

impl TextsegConfig {
    pub fn profile(&self, name: &str) -> Result<DelimiterProfile, ConfigError> {
        self.profiles
            .get(name)
            .map(DelimiterProfile::from)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TextsegConfig, ConfigError> {
        let config: TextsegConfig = self.builder.build()?.try_deserialize()?;
        config.wrap.break_char()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TextsegConfig, ConfigError> {
    Loader::new().build()
}
