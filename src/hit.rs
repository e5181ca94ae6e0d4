//! Hit-testing: corner handles and container bodies.
//!
//! The four corner handles of the latched node are checked first, so a handle
//! sitting over a neighbouring container still wins. Body hits defer to
//! [`SceneRegistry::find_topmost`], which ranks the latched node ahead of
//! anything overlapping it.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::Serialize;

use crate::node::{ContainerProperty, NodeId};
use crate::registry::SceneRegistry;
use crate::viewport::Point;

/// One of the four corner handles drawn around the selected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Relative position of a handle on its node's box: `0.0` is the left/top
/// edge, `1.0` the right/bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

impl Handle {
    /// All handles in paint order.
    pub const ALL: [Handle; 4] = [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight];

    /// Which corner of the box this handle sits on.
    #[must_use]
    pub fn anchor(self) -> Anchor {
        match self {
            Self::TopLeft => Anchor { x: 0.0, y: 0.0 },
            Self::TopRight => Anchor { x: 1.0, y: 0.0 },
            Self::BottomLeft => Anchor { x: 0.0, y: 1.0 },
            Self::BottomRight => Anchor { x: 1.0, y: 1.0 },
        }
    }

    /// Human-readable name for inspectors.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Whether dragging this handle moves the left edge (otherwise the right).
    #[must_use]
    pub fn moves_left_edge(self) -> bool {
        self.anchor().x == 0.0
    }

    /// Whether dragging this handle moves the top edge (otherwise the bottom).
    #[must_use]
    pub fn moves_top_edge(self) -> bool {
        self.anchor().y == 0.0
    }

    /// The true corner of `prop` this handle controls.
    #[must_use]
    pub fn corner(self, prop: &ContainerProperty) -> Point {
        let a = self.anchor();
        Point::new(
            prop.position.x + a.x * prop.size.width,
            prop.position.y + a.y * prop.size.height,
        )
    }

    /// Centre of the drawn handle.
    ///
    /// The selection outline is stroked inset by half its width, so handles
    /// sit on the inset box rather than on the true corner.
    #[must_use]
    pub fn center(self, prop: &ContainerProperty, outline_width: f64) -> Point {
        let a = self.anchor();
        let half = outline_width / 2.0;
        Point::new(
            prop.position.x + half + a.x * (prop.size.width - outline_width),
            prop.position.y + half + a.y * (prop.size.height - outline_width),
        )
    }

    /// Inverse of [`Handle::center`]: the true corner under a drawn handle.
    #[must_use]
    pub fn corner_from_center(self, center: Point, outline_width: f64) -> Point {
        let a = self.anchor();
        let half = outline_width / 2.0;
        Point::new(center.x - half + a.x * outline_width, center.y - half + a.y * outline_width)
    }

    /// Square hit box of side `size` centred on the drawn handle.
    #[must_use]
    pub fn hit_box(self, prop: &ContainerProperty, outline_width: f64, size: f64) -> ContainerProperty {
        let c = self.center(prop, outline_width);
        ContainerProperty::new(c.x - size / 2.0, c.y - size / 2.0, size, size)
    }
}

/// Which part of a node was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub node_id: NodeId,
    pub part: HitPart,
}

/// Geometry of the handles drawn around the selected node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMetrics {
    /// Stroke width of the selection outline.
    pub outline_width: f64,
    /// Side length of each square handle.
    pub handle_size: f64,
}

/// Find what lies under surface point `pt`.
///
/// The handles of `selected` are checked first, then container bodies via
/// [`SceneRegistry::find_topmost`] with `selected` as the preferred node.
/// `root` is never returned.
#[must_use]
pub fn hit_test(
    pt: Point,
    registry: &SceneRegistry,
    root: Option<NodeId>,
    selected: Option<NodeId>,
    metrics: HandleMetrics,
) -> Option<Hit> {
    if let Some(node) = selected.and_then(|id| registry.get(&id)) {
        let handle = Handle::ALL.into_iter().find(|h| {
            h.hit_box(&node.property, metrics.outline_width, metrics.handle_size)
                .contains(pt)
        });
        if let Some(handle) = handle {
            return Some(Hit { node_id: node.id(), part: HitPart::Handle(handle) });
        }
    }

    registry
        .find_topmost(pt, root, selected)
        .first()
        .map(|node| Hit { node_id: node.id(), part: HitPart::Body })
}
