//! Interaction controller: the pointer state machine.
//!
//! ```text
//!            down on body                       down on handle
//!   Idle ───────────────────▶ DraggingContainer   Idle ─────────────▶ ResizingViaHandle
//!    ▲                              │ move: preview   ▲                       │ move: preview
//!    └────────────── up: commit ────┘                 └───── up: commit ──────┘
//! ```
//!
//! The controller only reads the registry. Commits are returned as
//! [`Action::Commit`] and applied by the engine, which owns all mutation.
//! Points passed in are in surface space.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::mem;

use crate::hit::{self, HandleMetrics, Hit, HitPart};
use crate::input::{Button, InteractionState};
use crate::node::{ContainerProperty, NodeId};
use crate::registry::SceneRegistry;
use crate::resize::clamp_to_surface;
use crate::viewport::{Point, Viewport};

/// Pointer affordance the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
        }
    }
}

/// Effects requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Write preview geometry into a node.
    Commit { id: NodeId, property: ContainerProperty },
    /// The raster no longer matches the model or overlay.
    RenderNeeded,
    /// Observers should receive a fresh snapshot.
    Publish,
    SetCursor(Cursor),
}

/// Owns the [`InteractionState`] and the latched node.
#[derive(Debug)]
pub struct InteractionController {
    state: InteractionState,
    latched: Option<NodeId>,
    metrics: HandleMetrics,
}

impl InteractionController {
    #[must_use]
    pub fn new(metrics: HandleMetrics) -> Self {
        Self { state: InteractionState::default(), latched: None, metrics }
    }

    /// The in-progress gesture.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The node targeted by the current or most recent interaction.
    #[must_use]
    pub fn latched(&self) -> Option<NodeId> {
        self.latched
    }

    /// Drop every reference to `id`, e.g. after the node was removed.
    pub fn forget(&mut self, id: NodeId) {
        if self.latched == Some(id) {
            self.latched = None;
        }
        if self.state.target == Some(id) {
            self.state = InteractionState::default();
        }
    }

    pub fn on_pointer_down(
        &mut self,
        pt: Point,
        button: Button,
        registry: &SceneRegistry,
        root: Option<NodeId>,
    ) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        // A pointer-up may have been lost; every press starts a fresh record.
        self.state = InteractionState::default();

        let Some(Hit { node_id, part }) = hit::hit_test(pt, registry, root, self.latched, self.metrics) else {
            if self.latched.take().is_some() {
                log::debug!("controller: selection cleared");
                return vec![Action::RenderNeeded, Action::Publish, Action::SetCursor(Cursor::Default)];
            }
            return vec![Action::SetCursor(Cursor::Default)];
        };
        let Some(node) = registry.get(&node_id) else {
            return Vec::new();
        };
        let original = node.property.clone();

        self.state = match part {
            HitPart::Body => {
                log::debug!("controller: drag {node_id} from ({}, {})", pt.x, pt.y);
                InteractionState::dragging(node_id, pt, original)
            }
            HitPart::Handle(handle) => {
                let center = handle.center(&original, self.metrics.outline_width);
                let corner = handle.corner_from_center(center, self.metrics.outline_width);
                log::debug!("controller: resize {node_id} via {}", handle.label());
                InteractionState::resizing(node_id, handle, corner, original)
            }
        };
        self.latched = Some(node_id);

        vec![Action::RenderNeeded, Action::Publish, Action::SetCursor(Cursor::Pointer)]
    }

    /// Advance the drag, or report the hover cursor when idle.
    ///
    /// `surface` bounds the preview geometry.
    pub fn on_pointer_move(
        &mut self,
        pt: Point,
        registry: &SceneRegistry,
        root: Option<NodeId>,
        surface: Viewport,
    ) -> Vec<Action> {
        if !self.state.is_active() {
            let cursor = if hit::hit_test(pt, registry, root, self.latched, self.metrics).is_some() {
                Cursor::Pointer
            } else {
                Cursor::Default
            };
            return vec![Action::SetCursor(cursor)];
        }

        let Some(target) = self.state.target else {
            return Vec::new();
        };
        if !registry.contains(&target) {
            log::debug!("controller: {target} vanished mid-drag, skipping move");
            return Vec::new();
        }
        let Some(original) = self.state.original.as_ref() else {
            return Vec::new();
        };
        let Some(increment) = self.state.increment.as_mut() else {
            return Vec::new();
        };
        increment.current = pt;
        let Some(adjustment) = self.state.adjustment() else {
            return Vec::new();
        };

        let next = clamp_to_surface(original, adjustment, surface.width, surface.height);
        log::trace!(
            "controller: {adjustment:?} -> ({}, {}, {}, {})",
            next.position.x,
            next.position.y,
            next.size.width,
            next.size.height
        );
        self.state.next = Some(next);

        vec![Action::RenderNeeded, Action::Publish]
    }

    /// End the drag. Commits the preview if one was computed.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if !self.state.is_active() {
            return Vec::new();
        }
        let finished = mem::take(&mut self.state);

        let mut actions = Vec::with_capacity(3);
        if let (Some(id), Some(property)) = (finished.target, finished.next) {
            log::debug!("controller: commit {id}");
            actions.push(Action::Commit { id, property });
        }
        actions.push(Action::RenderNeeded);
        actions.push(Action::Publish);
        actions
    }
}
