//! Typed field readers over a loosely-typed JSON document.
//!
//! Every entity decoder reads its keys through [`Fields`], which carries the
//! [`KeyPath`] of the object being decoded so that any shape error names the
//! exact offending key. Absent keys and explicit `null` both decode to the
//! zero value of the field's kind.

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{LayoutError, kind_name};

// =============================================================================
// KEY PATH
// =============================================================================

/// Location of a value inside the source document, e.g. `layout[0].children[2].rect`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath(String);

impl KeyPath {
    /// The document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of `key` inside the object at this path.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_owned())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    /// Path of element `index` inside the array at this path.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        if self.0.is_empty() { "$" } else { &self.0 }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn malformed(path: &KeyPath, expected: &'static str, found: &Value) -> LayoutError {
    LayoutError::Malformed {
        path: path.to_string(),
        expected,
        found: kind_name(found),
    }
}

// =============================================================================
// SCALARS
// =============================================================================

/// Numeric kinds the geometry and property records are stored in.
pub trait Scalar: Copy + Default + fmt::Display {
    /// Decode one JSON value at `path` into this numeric kind.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Malformed`] for non-numbers and
    /// [`LayoutError::OutOfRange`] for numbers the kind cannot hold.
    fn from_json(value: &Value, path: &KeyPath) -> Result<Self, LayoutError>;
}

impl Scalar for i32 {
    fn from_json(value: &Value, path: &KeyPath) -> Result<Self, LayoutError> {
        let out_of_range = || LayoutError::OutOfRange {
            path: path.to_string(),
            value: value.to_string(),
        };

        if let Some(n) = value.as_i64() {
            return i32::try_from(n).map_err(|_| out_of_range());
        }
        let Some(f) = value.as_f64() else {
            return Err(malformed(path, "integer", value));
        };
        if f.fract() != 0.0 || f < f64::from(i32::MIN) || f > f64::from(i32::MAX) {
            return Err(out_of_range());
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(f as i32)
    }
}

impl Scalar for f32 {
    fn from_json(value: &Value, path: &KeyPath) -> Result<Self, LayoutError> {
        let Some(f) = value.as_f64() else {
            return Err(malformed(path, "number", value));
        };
        #[allow(clippy::cast_possible_truncation)]
        let narrowed = f as f32;
        if narrowed.is_finite() {
            Ok(narrowed)
        } else {
            Err(LayoutError::OutOfRange {
                path: path.to_string(),
                value: value.to_string(),
            })
        }
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// Read-only view of one JSON object with its location in the document.
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: &'a KeyPath,
}

impl<'a> Fields<'a> {
    /// View `value` as an object, failing if it is any other kind.
    pub(crate) fn object(value: &'a Value, path: &'a KeyPath) -> Result<Self, LayoutError> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(malformed(path, "object", other)),
        }
    }

    /// Present, non-null value for `key`.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    pub(crate) fn string(&self, key: &str) -> Result<String, LayoutError> {
        match self.get(key) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(malformed(&self.path.key(key), "string", other)),
        }
    }

    pub(crate) fn bool(&self, key: &str) -> Result<bool, LayoutError> {
        match self.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(malformed(&self.path.key(key), "bool", other)),
        }
    }

    pub(crate) fn scalar<T: Scalar>(&self, key: &str) -> Result<T, LayoutError> {
        match self.get(key) {
            None => Ok(T::default()),
            Some(value) => T::from_json(value, &self.path.key(key)),
        }
    }

    /// Decode a nested object with `decode`, or the type's default when absent.
    pub(crate) fn nested<T, F>(&self, key: &str, decode: F) -> Result<T, LayoutError>
    where
        T: Default,
        F: FnOnce(&Value, &KeyPath) -> Result<T, LayoutError>,
    {
        match self.get(key) {
            None => Ok(T::default()),
            Some(value) => decode(value, &self.path.key(key)),
        }
    }

    /// Elements of the array under `key`, empty when absent.
    pub(crate) fn array(&self, key: &str) -> Result<&'a [Value], LayoutError> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(malformed(&self.path.key(key), "array", other)),
        }
    }
}
