// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converter configuration and defaults.
//!
//! - **Level 1 (Static)**: compile-time defaults used when nothing else is set
//! - **Level 2 (Dynamic)**: [`ConverterConfig`], built in code or loaded from YAML
//!
//! # Example
//!
//! ```yaml
//! # converter.yaml
//! attach_values: true
//! max_depth: 16
//! default_locale: de
//! ```

#[cfg(feature = "loaders")]
use serde::Deserialize;

/// Locale attached to strings converted into OPC UA LocalizedText.
pub const DEFAULT_LOCALE: &str = "en";

/// Maximum structure nesting depth before a conversion is rejected.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Runtime configuration of a [`Converter`](crate::convert::Converter).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "loaders", derive(Deserialize))]
#[cfg_attr(feature = "loaders", serde(default))]
pub struct ConverterConfig {
    /// Events assembled by the converter own deep copies of their node data
    /// (`true`) or borrow the caller's storage (`false`).
    pub attach_values: bool,
    /// Maximum nesting depth of structured values.
    pub max_depth: usize,
    /// Locale used when a plain string is written to a LocalizedText.
    pub default_locale: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            attach_values: false,
            max_depth: DEFAULT_MAX_DEPTH,
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_values(mut self, attach: bool) -> Self {
        self.attach_values = attach;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Parse a configuration from YAML; missing keys keep their defaults.
    #[cfg(feature = "loaders")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, crate::resolver::SchemaLoadError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    #[cfg(feature = "loaders")]
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, crate::resolver::SchemaLoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
