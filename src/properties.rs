//! Rendering and visibility attributes of one layer.

#[cfg(test)]
#[path = "properties_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::Value;

use crate::error::LayoutError;
use crate::geometry::Bounds;
use crate::schema::{Fields, KeyPath};

/// Flat attribute record owned by a [`crate::Layer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    name: String,
    visible: bool,
    opacity: i32,
    #[serde(rename = "itemIndex")]
    index: i32,
    count: i32,
    #[serde(rename = "layerFXVisible")]
    fx_visible: bool,
    global_angle: f32,
    group: bool,
    bounds: Bounds<f32>,
    bounds_no_effects: Bounds<f32>,
}

impl Properties {
    /// Decode a `properties` object.
    pub(crate) fn from_json(value: &Value, path: &KeyPath) -> Result<Self, LayoutError> {
        let fields = Fields::object(value, path)?;
        Ok(Self {
            name: fields.string("name")?,
            visible: fields.bool("visible")?,
            opacity: fields.scalar("opacity")?,
            index: fields.scalar("itemIndex")?,
            count: fields.scalar("count")?,
            fx_visible: fields.bool("layerFXVisible")?,
            global_angle: fields.scalar("globalAngle")?,
            group: fields.bool("group")?,
            bounds: fields.nested("bounds", Bounds::from_json)?,
            bounds_no_effects: fields.nested("boundsNoEffects", Bounds::from_json)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Opacity as exported, nominally 0 to 100. Not clamped.
    #[must_use]
    pub fn opacity(&self) -> i32 {
        self.opacity
    }

    /// Position of the layer among its siblings.
    #[must_use]
    pub fn index(&self) -> i32 {
        self.index
    }

    #[must_use]
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Whether the layer's effects are visible.
    #[must_use]
    pub fn fx_visible(&self) -> bool {
        self.fx_visible
    }

    /// Global light angle used for effects, in degrees.
    #[must_use]
    pub fn global_angle(&self) -> f32 {
        self.global_angle
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        self.group
    }

    /// Computed bounds including effects.
    #[must_use]
    pub fn bounds(&self) -> &Bounds<f32> {
        &self.bounds
    }

    #[must_use]
    pub fn bounds_no_effects(&self) -> &Bounds<f32> {
        &self.bounds_no_effects
    }
}
