//! Generic 2D value types: points, sizes, rects, and edge bounds.
//!
//! These are plain storage. `T` is the numeric kind the exporter wrote the
//! values in (`i32` for pixel rects, `f32` for computed positions and bounds).
//! No arithmetic is performed and no relationship between redundant fields is
//! inferred: a [`Bounds`] keeps its edges and its width/height side by side
//! exactly as exported.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod tests;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::LayoutError;
use crate::schema::{Fields, KeyPath, Scalar};

/// A position in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

/// A width/height extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

/// An origin plus an extent.
///
/// Serialises flat as `{x, y, width, height}`, the same shape it is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect<T> {
    #[serde(flatten)]
    pub position: Point<T>,
    #[serde(flatten)]
    pub size: Size<T>,
}

/// Four independent edges plus a redundant width/height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds<T> {
    pub top: T,
    pub bottom: T,
    pub left: T,
    pub right: T,
    pub width: T,
    pub height: T,
}

impl<T> Point<T> {
    #[must_use]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Size<T> {
    #[must_use]
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl<T: Copy> Rect<T> {
    #[must_use]
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            position: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[must_use]
    pub fn x(&self) -> T {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> T {
        self.position.y
    }

    #[must_use]
    pub fn width(&self) -> T {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> T {
        self.size.height
    }
}

// =============================================================================
// DECODING
// =============================================================================

impl<T: Scalar> Point<T> {
    pub(crate) fn from_json(value: &Value, path: &KeyPath) -> Result<Self, LayoutError> {
        let fields = Fields::object(value, path)?;
        Ok(Self {
            x: fields.scalar("x")?,
            y: fields.scalar("y")?,
        })
    }
}

impl<T: Scalar> Rect<T> {
    pub(crate) fn from_json(value: &Value, path: &KeyPath) -> Result<Self, LayoutError> {
        let fields = Fields::object(value, path)?;
        Ok(Self::new(
            fields.scalar("x")?,
            fields.scalar("y")?,
            fields.scalar("width")?,
            fields.scalar("height")?,
        ))
    }
}

impl<T: Scalar> Bounds<T> {
    pub(crate) fn from_json(value: &Value, path: &KeyPath) -> Result<Self, LayoutError> {
        let fields = Fields::object(value, path)?;
        Ok(Self {
            top: fields.scalar("top")?,
            bottom: fields.scalar("bottom")?,
            left: fields.scalar("left")?,
            right: fields.scalar("right")?,
            width: fields.scalar("width")?,
            height: fields.scalar("height")?,
        })
    }
}

// =============================================================================
// DISPLAY
// =============================================================================

impl<T: fmt::Display> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{} Y:{}", self.x, self.y)
    }
}

impl<T: fmt::Display> fmt::Display for Size<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Width:{} Height:{}", self.width, self.height)
    }
}

impl<T: fmt::Display> fmt::Display for Rect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position, self.size)
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Top:{} Bottom:{} Left:{} Right:{} Width:{} Height:{}",
            self.top, self.bottom, self.left, self.right, self.width, self.height
        )
    }
}
