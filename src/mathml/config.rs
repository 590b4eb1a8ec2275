//! Emission configuration
//!
//! `defaults/mathml.default.toml` is embedded into the library so the
//! documented defaults and [`EmitOptions::default`] stay in sync. Hosts layer
//! their own files or overrides on top via [`Loader`] before deserializing
//! into [`MathConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/mathml.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct MathConfig {
    pub emit: EmitOptions,
}

/// Numeric output settings read by the emitter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmitOptions {
    pub numeric_type: NumericType,
    pub number_postfix: bool,
    pub division_guards: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            numeric_type: NumericType::Double,
            number_postfix: false,
            division_guards: false,
        }
    }
}

impl EmitOptions {
    /// The literal suffix to append, if postfixes are enabled
    pub fn literal_postfix(&self) -> &'static str {
        if self.number_postfix {
            self.numeric_type.postfix()
        } else {
            ""
        }
    }
}

/// Declaration type of emitted variables and accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericType {
    Double,
    Float,
    Decimal,
}

impl NumericType {
    pub fn type_name(self) -> &'static str {
        match self {
            NumericType::Double => "double",
            NumericType::Float => "float",
            NumericType::Decimal => "decimal",
        }
    }

    pub fn postfix(self) -> &'static str {
        match self {
            NumericType::Double => "d",
            NumericType::Float => "f",
            NumericType::Decimal => "m",
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Helper for layering host overrides over the built-in defaults.
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

    /// Layer TOML text, e.g. a section stored alongside the host's own settings.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override such as `emit.numeric_type`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MathConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MathConfig, ConfigError> {
    Loader::new().build()
}
