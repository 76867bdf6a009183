//! Traversal configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Settings frozen into a [`Registry`](crate::Registry) at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TraversalConfig {
    /// Maximum nesting of dispatched nodes before the traversal fails.
    /// Default: 512
    pub max_depth: usize,

    /// Attributes whose name starts with this prefix are never visited.
    /// An empty prefix disables the filter.
    /// Default: `_`
    pub private_prefix: String,
}

fn default_max_depth() -> usize {
    512
}

fn default_private_prefix() -> String {
    "_".to_string()
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            private_prefix: default_private_prefix(),
        }
    }
}

impl TraversalConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum traversal depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the private attribute prefix.
    pub fn private_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.private_prefix = prefix.into();
        self
    }

    /// Parses a configuration from a JSON string.
    ///
    /// Missing fields take their defaults; unknown fields are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::invalid_value("maxDepth", "must be at least 1"));
        }
        Ok(())
    }
}
