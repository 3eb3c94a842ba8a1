//! Layout algorithms offered by the rendering widget.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{info, warn};

/// A graph-drawing algorithm understood by the widget.
///
/// # Examples
/// ```
/// use graphdash_core::Layout;
///
/// assert_eq!("cose-bilkent".parse::<Layout>(), Ok(Layout::CoseBilkent));
/// assert_eq!(Layout::resolve("spiral"), Layout::Circle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Nodes on a circle.
    #[default]
    Circle,
    /// Nodes on a grid.
    Grid,
    /// Random positions.
    Random,
    /// Concentric rings by degree.
    Concentric,
    /// Breadth-first tree.
    Breadthfirst,
    /// Compound spring embedder.
    Cose,
    /// No positioning.
    Null,
    /// Layered DAG layout (extension).
    Dagre,
    /// Layered layout (extension).
    Klay,
    /// Force-directed layout (extension).
    Euler,
    /// Spread layout (extension).
    Spread,
    /// Improved spring embedder (extension).
    CoseBilkent,
}

impl Layout {
    /// Every layout, built-in algorithms first.
    pub const ALL: [Self; 12] = [
        Self::Circle,
        Self::Grid,
        Self::Random,
        Self::Concentric,
        Self::Breadthfirst,
        Self::Cose,
        Self::Null,
        Self::Dagre,
        Self::Klay,
        Self::Euler,
        Self::Spread,
        Self::CoseBilkent,
    ];

    /// Name the widget uses for this layout.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Grid => "grid",
            Self::Random => "random",
            Self::Concentric => "concentric",
            Self::Breadthfirst => "breadthfirst",
            Self::Cose => "cose",
            Self::Null => "null",
            Self::Dagre => "dagre",
            Self::Klay => "klay",
            Self::Euler => "euler",
            Self::Spread => "spread",
            Self::CoseBilkent => "cose-bilkent",
        }
    }

    /// Parses `requested`, falling back to [`Layout::Circle`] with a warning.
    #[must_use]
    pub fn resolve(requested: &str) -> Self {
        requested.parse().unwrap_or_else(|err: UnknownLayout| {
            warn!(%err, fallback = Self::Circle.name(), "unknown layout requested");
            Self::Circle
        })
    }

    /// Widget configuration selecting this layout.
    #[must_use]
    pub fn config(self) -> LayoutConfig {
        LayoutConfig { name: self }
    }

    /// Handles a layout change from the dashboard, returning the new
    /// configuration.
    #[must_use]
    pub fn change_to(requested: &str) -> LayoutConfig {
        let layout = Self::resolve(requested);
        info!(layout = layout.name(), "changing layout");
        layout.config()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Error returned when a layout name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout `{0}`")]
pub struct UnknownLayout(String);

impl FromStr for Layout {
    type Err = UnknownLayout;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.name() == raw)
            .ok_or_else(|| UnknownLayout(raw.to_owned()))
    }
}

/// Layout configuration object, serialized as `{"name": "circle"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutConfig {
    /// Selected layout.
    pub name: Layout,
}
