//! Error types for layout ingestion, misc metadata, and configuration.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use serde_json::Value;

// =============================================================================
// INGESTION
// =============================================================================

/// Fatal errors raised while building a [`crate::Layout`] from a document.
///
/// Every shape error names the key path of the offending value
/// (e.g. `layout[0].children[2].rect`). No partial tree is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A key holds the wrong JSON kind.
    #[error("malformed `{path}`: expected {expected}, found {found}")]
    Malformed {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An integer field holds a number that does not fit `i32` or has a fraction.
    #[error("malformed `{path}`: {value} is not a 32-bit integer")]
    OutOfRange { path: String, value: String },

    /// Layer nesting exceeds the configured maximum depth.
    #[error("`{path}` nests deeper than the maximum of {max_depth} levels")]
    TooDeep { path: String, max_depth: usize },

    /// A misc blob failed to parse during eager ingestion.
    #[error("malformed `{path}`: {source}")]
    Misc {
        path: String,
        #[source]
        source: MiscError,
    },

    /// The input text is not JSON.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document could not be read.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    /// Key path of the offending value, when the error is tied to one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Malformed { path, .. }
            | Self::OutOfRange { path, .. }
            | Self::TooDeep { path, .. }
            | Self::Misc { path, .. } => Some(path),
            Self::Json(_) | Self::Io(_) => None,
        }
    }
}

// =============================================================================
// MISC METADATA
// =============================================================================

/// Failure to decode an embedded misc blob.
///
/// `Clone` so a cached failure can be handed out on every read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MiscError {
    /// The exporter's backslash escaping is broken.
    #[error("bad escape at byte {offset}: {message}")]
    Escape { offset: usize, message: String },

    /// The unescaped text is not JSON.
    #[error("misc is not valid JSON: {0}")]
    Syntax(String),

    /// The unescaped text is JSON but not an object.
    #[error("misc must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

// =============================================================================
// CONFIG
// =============================================================================

/// Errors produced while reading [`crate::IngestConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value with no sensible fallback.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Human-readable JSON kind name used in error messages.
#[must_use]
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
