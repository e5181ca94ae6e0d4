//! Move/resize geometry: the per-handle sign table and the surface clamp.
//!
//! A drag produces a pointer delta `(dx, dy)`. [`Adjustment`] turns that into
//! an offset applied to the node's position and a delta applied to its size.
//! [`clamp_to_surface`] then applies the adjustment to the node's pre-drag
//! geometry while keeping the result on the surface and at least
//! [`MIN_NODE_SIZE`] in each dimension.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use serde::Serialize;

use crate::consts::MIN_NODE_SIZE;
use crate::hit::Handle;
use crate::node::{ContainerProperty, Position, Size};
use crate::viewport::Point;

/// Offset and size change derived from a pointer delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Adjustment {
    pub offset_x: f64,
    pub offset_y: f64,
    pub width_delta: f64,
    pub height_delta: f64,
}

impl Adjustment {
    #[must_use]
    pub fn new(offset_x: f64, offset_y: f64, width_delta: f64, height_delta: f64) -> Self {
        Self { offset_x, offset_y, width_delta, height_delta }
    }

    /// Dragging a container body: the position follows the pointer, the size
    /// is unchanged.
    #[must_use]
    pub fn for_move(delta: Point) -> Self {
        Self::new(delta.x, delta.y, 0.0, 0.0)
    }

    /// Dragging a corner handle: the handle's corner follows the pointer and
    /// the opposite corner stays put.
    #[must_use]
    pub fn for_handle(handle: Handle, delta: Point) -> Self {
        let (dx, dy) = (delta.x, delta.y);
        match handle {
            Handle::TopLeft => Self::new(dx, dy, -dx, -dy),
            Handle::TopRight => Self::new(0.0, dy, dx, -dy),
            Handle::BottomLeft => Self::new(dx, 0.0, -dx, dy),
            Handle::BottomRight => Self::new(0.0, 0.0, dx, dy),
        }
    }
}

/// Apply `adj` to `original` and keep the result inside a
/// `surface_width × surface_height` surface.
///
/// Style is carried over from `original` untouched.
#[must_use]
pub fn clamp_to_surface(
    original: &ContainerProperty,
    adj: Adjustment,
    surface_width: f64,
    surface_height: f64,
) -> ContainerProperty {
    let (x, width) = clamp_axis(
        original.position.x,
        original.size.width,
        adj.offset_x,
        adj.width_delta,
        surface_width,
    );
    let (y, height) = clamp_axis(
        original.position.y,
        original.size.height,
        adj.offset_y,
        adj.height_delta,
        surface_height,
    );
    ContainerProperty {
        position: Position { x, y },
        size: Size { width, height },
        style: original.style.clone(),
    }
}

/// One axis of [`clamp_to_surface`]. The steps run in a fixed order; the
/// position bound always uses the pre-drag `len`.
fn clamp_axis(pos: f64, len: f64, offset: f64, delta: f64, limit: f64) -> (f64, f64) {
    // Far edge as seen on the surface; an overhanging original is cut at `limit`.
    let far = (pos + len).min(limit);
    // Handle on the near edge: position and size move in opposite directions.
    let near_edge = offset != 0.0 && delta != 0.0;

    // 1. Raw values.
    let mut next_pos = pos + offset;
    let mut next_len = len + delta;

    // 2. Position into [0, limit - len].
    next_pos = next_pos.clamp(0.0, (limit - len.max(MIN_NODE_SIZE)).max(0.0));

    // 3. Size into [MIN, limit - position].
    next_len = next_len.clamp(MIN_NODE_SIZE, (limit - next_pos).max(MIN_NODE_SIZE));

    // 4. Edge pinning.
    if near_edge && offset < 0.0 && next_pos <= 0.0 {
        // Dragged past the surface origin: the far edge must not move.
        next_len = far;
    }
    if next_len <= MIN_NODE_SIZE && delta < 0.0 {
        next_len = MIN_NODE_SIZE;
        next_pos = if offset > 0.0 { far - MIN_NODE_SIZE } else { pos };
    } else if near_edge {
        next_pos = far - next_len;
    }

    // Pre-drag geometry can overhang a surface that shrank since it was committed.
    next_pos = next_pos.clamp(0.0, (limit - MIN_NODE_SIZE).max(0.0));
    if next_pos + next_len > limit {
        next_len = (limit - next_pos).max(MIN_NODE_SIZE);
    }

    (next_pos, next_len)
}
