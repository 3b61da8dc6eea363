//! Ingestion options, with an environment-variable reader.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use crate::error::ConfigError;

pub const DEFAULT_MAX_DEPTH: usize = 256;

pub const MAX_DEPTH_VAR: &str = "LAYERDOC_MAX_DEPTH";
pub const EAGER_MISC_VAR: &str = "LAYERDOC_EAGER_MISC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestConfig {
    /// Deepest layer nesting accepted; top-level layers are depth 1.
    pub max_depth: usize,
    /// Parse every misc blob during ingestion and fail the document on a bad one.
    pub eager_misc: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            eager_misc: false,
        }
    }
}

impl IngestConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `LAYERDOC_MAX_DEPTH`: positive integer, default 256 (bad values fall back)
    /// - `LAYERDOC_EAGER_MISC`: `1|true|yes|0|false|no`, default false
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `LAYERDOC_EAGER_MISC` is not a
    /// recognised boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_depth = match std::env::var(MAX_DEPTH_VAR).map(|v| v.trim().parse::<usize>()) {
            Ok(Ok(depth)) if depth > 0 => depth,
            _ => DEFAULT_MAX_DEPTH,
        };
        let eager_misc = match std::env::var(EAGER_MISC_VAR) {
            Ok(raw) => parse_flag(EAGER_MISC_VAR, &raw)?,
            Err(_) => false,
        };

        Ok(Self { max_depth, eager_misc })
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_owned(),
        }),
    }
}
