//! Typed, normalised model of an exported design-tool layout document.
//!
//! A design tool exports its layer panel as JSON: some export metadata, the
//! canvas rect, and a recursive list of layers carrying geometry, rendering
//! properties, positioning constraints written as string tokens, and a
//! free-form misc blob embedded as an escaped JSON string. This crate turns
//! that loosely-typed document into an immutable tree of [`Layer`]s under a
//! [`Layout`] root, resolving constraint tokens as it goes and deferring the
//! misc blobs until they are read.
//!
//! Ingestion is all-or-nothing: a value of the wrong kind anywhere fails the
//! whole document with a [`LayoutError`] naming the offending key path. Absent
//! keys are not errors; they take the zero value of their kind.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | Document root and ingestion entry points |
//! | [`layer`] | Recursive layer node and depth-first traversal |
//! | [`properties`] | Per-layer rendering/visibility record |
//! | [`constraint`] | Position/snap constraint tokens and their resolution |
//! | [`misc`] | Lazily parsed misc metadata |
//! | [`geometry`] | Point, size, rect, and bounds value types |
//! | [`schema`] | Key paths and typed field readers |
//! | [`config`] | Ingestion options |
//! | [`error`] | Error types |

pub mod config;
pub mod constraint;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod layout;
pub mod misc;
pub mod properties;
pub mod schema;

pub use config::IngestConfig;
pub use constraint::{PositionConstraint, SnapConstraint, resolve_position, resolve_snap};
pub use error::{ConfigError, LayoutError, MiscError};
pub use geometry::{Bounds, Point, Rect, Size};
pub use layer::Layer;
pub use layout::Layout;
pub use misc::{Misc, MiscMap, MiscParser};
pub use properties::Properties;
