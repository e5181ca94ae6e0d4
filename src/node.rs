//! Scene model: container geometry, style, and node identity.
//!
//! A [`ContainerNode`] is the unit the engine manages: an axis-aligned
//! rectangle ([`ContainerProperty`]) with a process-unique id and an optional
//! back-reference to its parent. Nodes are built by the host and handed to the
//! registry, which becomes their sole owner.

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::DEFAULT_BACKGROUND;
use crate::viewport::Point;

/// Unique identifier for a container node.
pub type NodeId = Uuid;

/// Top-left corner of a container in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Extent of a container in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Visual style of a container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Style {
    /// CSS colour string. Painted as [`DEFAULT_BACKGROUND`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Geometry and style of a container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerProperty {
    pub position: Position,
    pub size: Size,
    #[serde(default)]
    pub style: Style,
}

impl ContainerProperty {
    /// Unstyled rectangle at `(x, y)` with the given size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Position { x, y },
            size: Size { width, height },
            style: Style::default(),
        }
    }

    /// Same rectangle with a background colour.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.style.background_color = Some(color.into());
        self
    }

    /// Right edge (exclusive).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom
    /// edges are outside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.position.x <= pt.x && pt.x < self.right() && self.position.y <= pt.y && pt.y < self.bottom()
    }

    /// Whether the rectangle lies fully within a `width × height` surface.
    #[must_use]
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.position.x >= 0.0 && self.position.y >= 0.0 && self.right() <= width && self.bottom() <= height
    }

    /// Fill colour, falling back to [`DEFAULT_BACKGROUND`].
    #[must_use]
    pub fn fill(&self) -> &str {
        self.fill_or(DEFAULT_BACKGROUND)
    }

    /// Fill colour, falling back to `default`.
    #[must_use]
    pub fn fill_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.style.background_color.as_deref().unwrap_or(default)
    }

    /// Copy of this property with geometry taken from `other`; style is kept.
    #[must_use]
    pub fn with_geometry_of(&self, other: &ContainerProperty) -> Self {
        Self {
            position: other.position,
            size: other.size,
            style: self.style.clone(),
        }
    }
}

/// A container managed by the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerNode {
    id: NodeId,
    /// Geometry and style; owned exclusively by this node.
    pub property: ContainerProperty,
    /// Containing node, if any. A back-reference only; the registry owns every node.
    pub parent_id: Option<NodeId>,
}

impl ContainerNode {
    /// Create a node with a fresh id.
    #[must_use]
    pub fn new(property: ContainerProperty) -> Self {
        Self { id: Uuid::new_v4(), property, parent_id: None }
    }

    /// Same node with a parent back-reference.
    #[must_use]
    pub fn with_parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// This node's id. Fixed at construction.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }
}
