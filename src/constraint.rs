//! Position and snap constraints, resolved from the exporter's string tokens.
//!
//! Resolution is an exact, case-sensitive table lookup. Any token not in the
//! table (including the empty string) resolves to `Default`; this is a silent
//! fallback, not an error. The raw token is always kept next to the resolved
//! value so unrecognised input stays inspectable.

#[cfg(test)]
#[path = "constraint_test.rs"]
mod tests;

use serde::Serialize;

/// How a layer's position should behave relative to its container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionConstraint {
    /// No recognised constraint.
    #[default]
    Default,
    /// Fixed pixel position.
    Absolute,
    /// Proportional position, see the layer's relative percentages.
    Relative,
    /// Snapped to a container edge, see the layer's snap constraints.
    Snap,
    /// Stretches with the container.
    Elastic,
}

/// Which container edge a snapped layer sticks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapConstraint {
    #[default]
    Default,
    Left,
    Right,
    Top,
    Bottom,
}

static POSITION_TOKENS: [(&str, PositionConstraint); 4] = [
    ("P2GUI_absolute", PositionConstraint::Absolute),
    ("P2GUI_relative", PositionConstraint::Relative),
    ("P2GUI_snap", PositionConstraint::Snap),
    ("P2GUI_elastic", PositionConstraint::Elastic),
];

static SNAP_TOKENS: [(&str, SnapConstraint); 4] = [
    ("P2GUI_left", SnapConstraint::Left),
    ("P2GUI_right", SnapConstraint::Right),
    ("P2GUI_top", SnapConstraint::Top),
    ("P2GUI_bottom", SnapConstraint::Bottom),
];

/// Resolve a position token. Never fails.
#[must_use]
pub fn resolve_position(raw: &str) -> PositionConstraint {
    lookup(&POSITION_TOKENS, raw)
}

/// Resolve a snap token. Never fails.
#[must_use]
pub fn resolve_snap(raw: &str) -> SnapConstraint {
    lookup(&SNAP_TOKENS, raw)
}

fn lookup<E: Copy + Default>(table: &[(&str, E)], raw: &str) -> E {
    table
        .iter()
        .find(|(token, _)| *token == raw)
        .map_or_else(E::default, |(_, value)| *value)
}

fn token_of<E: Copy + PartialEq>(table: &'static [(&'static str, E)], value: E) -> Option<&'static str> {
    table.iter().find(|(_, v)| *v == value).map(|(token, _)| *token)
}

impl PositionConstraint {
    /// Canonical exporter token, `None` for `Default`.
    #[must_use]
    pub fn as_token(self) -> Option<&'static str> {
        token_of(&POSITION_TOKENS, self)
    }
}

impl SnapConstraint {
    /// Canonical exporter token, `None` for `Default`.
    #[must_use]
    pub fn as_token(self) -> Option<&'static str> {
        token_of(&SNAP_TOKENS, self)
    }
}

// =============================================================================
// RAW + RESOLVED
// =============================================================================

/// Token-resolvable constraint kinds.
pub trait Resolve: Copy + Default + PartialEq {
    fn resolve(raw: &str) -> Self;
}

impl Resolve for PositionConstraint {
    fn resolve(raw: &str) -> Self {
        resolve_position(raw)
    }
}

impl Resolve for SnapConstraint {
    fn resolve(raw: &str) -> Self {
        resolve_snap(raw)
    }
}

/// A constraint as exported (`raw`) alongside what it resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Constrained<E> {
    raw: String,
    resolved: E,
}

impl<E: Resolve> Constrained<E> {
    /// Keep `raw` verbatim and resolve it immediately.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let resolved = E::resolve(&raw);
        Self { raw, resolved }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn resolved(&self) -> E {
        self.resolved
    }

    /// True when the raw token was not in the lookup table.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.resolved == E::default() && !self.raw.is_empty()
    }
}
