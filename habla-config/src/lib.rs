//! Shared configuration loader for the habla toolchain.
//!
//! `defaults/habla.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`HablaConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use habla_markdown::formats::{json, markdown};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/habla.default.toml");

/// Top-level configuration consumed by habla applications.
#[derive(Debug, Clone, Deserialize)]
pub struct HablaConfig {
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub markdown: MarkdownConfig,
    pub json: JsonConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub ensure_block_spacing: bool,
    pub link_references: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub compact: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl ConvertConfig {
    /// Serializer options for the named target format, as passed to
    /// [`habla_markdown::FormatRegistry::serialize_with_options`].
    ///
    /// Formats without configurable options get an empty map.
    pub fn options_for(&self, format: &str) -> HashMap<String, String> {
        let mut options = HashMap::new();
        match format {
            "markdown" => {
                options.insert(
                    markdown::ENSURE_SPACING.to_string(),
                    self.markdown.ensure_block_spacing.to_string(),
                );
                options.insert(
                    markdown::LINK_REFERENCES.to_string(),
                    self.markdown.link_references.to_string(),
                );
            }
            "json" => {
                options.insert(json::COMPACT.to_string(), self.json.compact.to_string());
            }
            _ => {}
        }
        options
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
    pub fn build(self) -> Result<HablaConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<HablaConfig, ConfigError> {
    Loader::new().build()
}
