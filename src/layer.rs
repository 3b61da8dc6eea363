//! Layer nodes: the recursive body of a layout tree.
//!
//! A [`Layer`] is decoded in one pass from its JSON object. Constraint tokens
//! are resolved as they are read, nested geometry and properties are decoded
//! in place, and `children` is decoded recursively in document order. Only the
//! misc blob is left unparsed (see [`Misc`]).

#[cfg(test)]
#[path = "layer_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::Value;

use crate::config::IngestConfig;
use crate::constraint::{Constrained, PositionConstraint, SnapConstraint};
use crate::error::LayoutError;
use crate::geometry::{Point, Rect};
use crate::misc::Misc;
use crate::properties::Properties;
use crate::schema::{Fields, KeyPath};

/// One visual layer of the exported design.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    name: String,
    id: String,
    class: String,
    misc: Misc,
    #[serde(rename = "maintainRelativeScale")]
    relative_scale: bool,
    horizontal_position: Constrained<PositionConstraint>,
    horizontal_relative: f32,
    horizontal_snap_to: Constrained<SnapConstraint>,
    vertical_position: Constrained<PositionConstraint>,
    vertical_relative: f32,
    vertical_snap_to: Constrained<SnapConstraint>,
    rect: Rect<i32>,
    position: Point<f32>,
    properties: Properties,
    children: Vec<Layer>,
}

impl Layer {
    /// Decode the layer object at `path`, which sits `depth` levels below the root.
    pub(crate) fn from_json(
        value: &Value,
        path: &KeyPath,
        depth: usize,
        config: &IngestConfig,
    ) -> Result<Self, LayoutError> {
        if depth > config.max_depth {
            return Err(LayoutError::TooDeep {
                path: path.to_string(),
                max_depth: config.max_depth,
            });
        }

        let fields = Fields::object(value, path)?;
        let children_path = path.key("children");

        let layer = Self {
            name: fields.string("name")?,
            id: fields.string("id")?,
            class: fields.string("class")?,
            misc: Misc::new(fields.string("misc")?),
            relative_scale: fields.bool("maintainRelativeScale")?,
            horizontal_position: Constrained::new(fields.string("horizontalPosition")?),
            horizontal_relative: fields.scalar("horizontalRelative")?,
            horizontal_snap_to: Constrained::new(fields.string("horizontalSnapTo")?),
            vertical_position: Constrained::new(fields.string("verticalPosition")?),
            vertical_relative: fields.scalar("verticalRelative")?,
            vertical_snap_to: Constrained::new(fields.string("verticalSnapTo")?),
            rect: fields.nested("rect", Rect::from_json)?,
            position: fields.nested("position", Point::from_json)?,
            properties: fields.nested("properties", Properties::from_json)?,
            children: fields
                .array("children")?
                .iter()
                .enumerate()
                .map(|(i, child)| Self::from_json(child, &children_path.index(i), depth + 1, config))
                .collect::<Result<_, _>>()?,
        };

        if config.eager_misc {
            layer.misc.get().map_err(|source| LayoutError::Misc {
                path: path.key("misc").to_string(),
                source,
            })?;
        }

        Ok(layer)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier assigned by the design tool.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Opaque class name a consumer maps to a rendering behaviour.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Misc metadata cell; parsed on first [`Misc::get`].
    #[must_use]
    pub fn misc(&self) -> &Misc {
        &self.misc
    }

    /// Replace the raw misc string. The next read reparses.
    pub fn set_misc_raw(&mut self, raw: impl Into<String>) {
        self.misc.set_raw(raw);
    }

    /// Whether the layer should keep its relative scale.
    #[must_use]
    pub fn relative_scale(&self) -> bool {
        self.relative_scale
    }

    #[must_use]
    pub fn horizontal_position(&self) -> PositionConstraint {
        self.horizontal_position.resolved()
    }

    #[must_use]
    pub fn horizontal_position_raw(&self) -> &str {
        self.horizontal_position.raw()
    }

    /// Horizontal center as a percentage of the container.
    /// Meaningful only for [`PositionConstraint::Relative`].
    #[must_use]
    pub fn horizontal_relative(&self) -> f32 {
        self.horizontal_relative
    }

    /// Meaningful only for [`PositionConstraint::Snap`].
    #[must_use]
    pub fn horizontal_snap_to(&self) -> SnapConstraint {
        self.horizontal_snap_to.resolved()
    }

    #[must_use]
    pub fn horizontal_snap_to_raw(&self) -> &str {
        self.horizontal_snap_to.raw()
    }

    #[must_use]
    pub fn vertical_position(&self) -> PositionConstraint {
        self.vertical_position.resolved()
    }

    #[must_use]
    pub fn vertical_position_raw(&self) -> &str {
        self.vertical_position.raw()
    }

    /// Vertical center as a percentage of the container.
    /// Meaningful only for [`PositionConstraint::Relative`].
    #[must_use]
    pub fn vertical_relative(&self) -> f32 {
        self.vertical_relative
    }

    /// Meaningful only for [`PositionConstraint::Snap`].
    #[must_use]
    pub fn vertical_snap_to(&self) -> SnapConstraint {
        self.vertical_snap_to.resolved()
    }

    #[must_use]
    pub fn vertical_snap_to_raw(&self) -> &str {
        self.vertical_snap_to.raw()
    }

    /// Bounds in the original export's pixel space.
    #[must_use]
    pub fn rect(&self) -> &Rect<i32> {
        &self.rect
    }

    /// Computed center position.
    #[must_use]
    pub fn position(&self) -> &Point<f32> {
        &self.position
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Direct children in document order.
    #[must_use]
    pub fn children(&self) -> &[Layer] {
        &self.children
    }

    /// Every layer below this one, depth-first in document order.
    /// Depths are relative: direct children are depth 1.
    #[must_use]
    pub fn descendants(&self) -> DepthFirst<'_> {
        DepthFirst::new(&self.children, 1)
    }
}

// =============================================================================
// TRAVERSAL
// =============================================================================

/// Pre-order walk yielding `(depth, layer)` pairs.
#[derive(Debug, Clone)]
pub struct DepthFirst<'a> {
    stack: Vec<(usize, &'a Layer)>,
}

impl<'a> DepthFirst<'a> {
    pub(crate) fn new(roots: &'a [Layer], depth: usize) -> Self {
        Self {
            stack: roots.iter().rev().map(|layer| (depth, layer)).collect(),
        }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (usize, &'a Layer);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, layer) = self.stack.pop()?;
        self.stack
            .extend(layer.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, layer))
    }
}
