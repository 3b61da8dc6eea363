//! Layout root: export metadata, canvas rect, and the top-level layers.

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;

use std::io::Read;

use serde::Serialize;
use serde_json::Value;

use crate::config::IngestConfig;
use crate::error::LayoutError;
use crate::geometry::Rect;
use crate::layer::{DepthFirst, Layer};
use crate::schema::{Fields, KeyPath};

/// The root of an ingested layout document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Layout {
    exporter_version: String,
    export_name: String,
    #[serde(rename = "export-rect")]
    rect: Rect<i32>,
    #[serde(rename = "layout")]
    children: Vec<Layer>,
}

impl Layout {
    /// Build a layout from an already-parsed document with default options.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] naming the first key whose value has the
    /// wrong shape. No partial tree is returned.
    pub fn from_value(value: &Value) -> Result<Self, LayoutError> {
        Self::from_value_with(value, &IngestConfig::default())
    }

    /// Build a layout from an already-parsed document.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] naming the first key whose value has the
    /// wrong shape, or the layer that nests too deep.
    pub fn from_value_with(value: &Value, config: &IngestConfig) -> Result<Self, LayoutError> {
        let root = KeyPath::root();
        let layout = Self::decode(value, &root, config).inspect_err(|e| {
            tracing::debug!(error = %e, path = e.path().unwrap_or("$"), "layout rejected");
        })?;

        tracing::debug!(
            name = %layout.export_name,
            exporter_version = %layout.exporter_version,
            layers = layout.layer_count(),
            depth = layout.depth(),
            "layout ingested"
        );
        Ok(layout)
    }

    fn decode(value: &Value, path: &KeyPath, config: &IngestConfig) -> Result<Self, LayoutError> {
        let fields = Fields::object(value, path)?;
        let layers_path = path.key("layout");
        Ok(Self {
            exporter_version: fields.string("exporter-version")?,
            export_name: fields.string("export-name")?,
            rect: fields.nested("export-rect", Rect::from_json)?,
            children: fields
                .array("layout")?
                .iter()
                .enumerate()
                .map(|(i, layer)| Layer::from_json(layer, &layers_path.index(i), 1, config))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Parse document text and build a layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Json`] for text that is not JSON, otherwise as
    /// [`Layout::from_value_with`].
    pub fn from_json_str(text: &str, config: &IngestConfig) -> Result<Self, LayoutError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value_with(&value, config)
    }

    /// Parse document bytes and build a layout.
    ///
    /// # Errors
    ///
    /// As [`Layout::from_json_str`].
    pub fn from_json_slice(bytes: &[u8], config: &IngestConfig) -> Result<Self, LayoutError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value_with(&value, config)
    }

    /// Read a document to the end and build a layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Io`] if reading fails, otherwise as
    /// [`Layout::from_json_slice`].
    pub fn from_reader<R: Read>(mut reader: R, config: &IngestConfig) -> Result<Self, LayoutError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_json_slice(&bytes, config)
    }

    #[must_use]
    pub fn exporter_version(&self) -> &str {
        &self.exporter_version
    }

    #[must_use]
    pub fn export_name(&self) -> &str {
        &self.export_name
    }

    /// The canvas as originally authored.
    #[must_use]
    pub fn rect(&self) -> &Rect<i32> {
        &self.rect
    }

    /// Top-level layers in document order.
    #[must_use]
    pub fn children(&self) -> &[Layer] {
        &self.children
    }

    /// Every layer in the tree, depth-first in document order.
    /// Top-level layers are depth 1.
    #[must_use]
    pub fn layers(&self) -> DepthFirst<'_> {
        DepthFirst::new(&self.children, 1)
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers().count()
    }

    /// Deepest nesting level present; 0 for an empty layout.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    /// First layer (in walk order) with the given tool id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Layer> {
        self.layers().map(|(_, layer)| layer).find(|layer| layer.id() == id)
    }
}
