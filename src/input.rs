//! Input model: pointer buttons and the transient interaction record.
//!
//! `InteractionState` is the gesture tracked between pointer-down and
//! pointer-up. It stores only raw facts (origin, latest pointer point, the
//! pre-drag geometry); the pointer delta and the offset/size adjustment are
//! derived on demand so there is a single source of truth during a drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Serialize;

use crate::hit::Handle;
use crate::node::{ContainerProperty, NodeId};
use crate::resize::Adjustment;
use crate::viewport::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
    /// Back, forward, or any other auxiliary button.
    Other(i16),
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A container body is pressed and follows the pointer.
    DraggingContainer,
    /// A corner handle is pressed and resizes its container.
    ResizingViaHandle,
}

/// Pointer-down origin and latest pointer point, both in surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Increment {
    pub start: Point,
    pub current: Point,
}

impl Increment {
    #[must_use]
    pub fn new(start: Point) -> Self {
        Self { start, current: start }
    }

    /// Pointer travel since pointer-down.
    #[must_use]
    pub fn delta(&self) -> Point {
        self.current.delta_from(self.start)
    }
}

/// The in-progress gesture. Reset on every pointer-down and pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub mode: InteractionMode,
    /// Node the gesture acts on.
    pub target: Option<NodeId>,
    /// Pressed handle, while resizing.
    pub handle: Option<Handle>,
    pub increment: Option<Increment>,
    /// Committed geometry of the target at pointer-down.
    pub original: Option<ContainerProperty>,
    /// Preview geometry from the latest move tick; not yet committed.
    pub next: Option<ContainerProperty>,
}

impl InteractionState {
    /// Begin dragging a container body.
    #[must_use]
    pub fn dragging(target: NodeId, origin: Point, original: ContainerProperty) -> Self {
        Self {
            mode: InteractionMode::DraggingContainer,
            target: Some(target),
            handle: None,
            increment: Some(Increment::new(origin)),
            original: Some(original),
            next: None,
        }
    }

    /// Begin resizing via `handle`; `corner` is the handle's true corner.
    #[must_use]
    pub fn resizing(target: NodeId, handle: Handle, corner: Point, original: ContainerProperty) -> Self {
        Self {
            mode: InteractionMode::ResizingViaHandle,
            target: Some(target),
            handle: Some(handle),
            increment: Some(Increment::new(corner)),
            original: Some(original),
            next: None,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode != InteractionMode::Idle
    }

    /// Offset/size adjustment implied by the pointer travel so far.
    #[must_use]
    pub fn adjustment(&self) -> Option<Adjustment> {
        let delta = self.increment?.delta();
        match (self.mode, self.handle) {
            (InteractionMode::DraggingContainer, _) => Some(Adjustment::for_move(delta)),
            (InteractionMode::ResizingViaHandle, Some(handle)) => Some(Adjustment::for_handle(handle, delta)),
            _ => None,
        }
    }
}
