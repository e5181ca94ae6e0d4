//! Notification bus: pushes interaction snapshots to host observers.
//!
//! Observers are called synchronously, in subscription order, after every
//! state change the engine handles. They receive a shared reference and so
//! cannot alter what later observers see. Observers must not call back into
//! the engine that is notifying them.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::fmt;

use serde::Serialize;

use crate::hit::Handle;
use crate::input::{InteractionMode, InteractionState};
use crate::node::{ContainerProperty, NodeId};
use crate::registry::SceneRegistry;
use crate::resize::Adjustment;
use crate::viewport::{Point, Viewport};

/// Interaction and selection state at one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mode: InteractionMode,
    /// Whether a drag is in progress.
    pub interactive: bool,
    /// Latched node: the target of the current or most recent interaction.
    pub target_id: Option<NodeId>,
    /// Committed geometry of the latched node.
    pub committed: Option<ContainerProperty>,
    /// Preview geometry while a drag is in progress.
    pub preview: Option<ContainerProperty>,
    pub handle: Option<Handle>,
    pub handle_label: Option<&'static str>,
    /// Surface-space pointer-down origin.
    pub start: Option<Point>,
    /// Offset and size change of the current drag.
    pub adjustment: Option<Adjustment>,
    pub viewport: Viewport,
}

impl Snapshot {
    /// Capture the current state.
    ///
    /// A latched id that is no longer registered reports no committed geometry.
    #[must_use]
    pub fn capture(
        state: &InteractionState,
        latched: Option<NodeId>,
        registry: &SceneRegistry,
        viewport: Viewport,
    ) -> Self {
        let target_id = state.target.or(latched);
        Self {
            mode: state.mode,
            interactive: state.is_active(),
            target_id,
            committed: target_id
                .and_then(|id| registry.get(&id))
                .map(|node| node.property.clone()),
            preview: state.next.clone(),
            handle: state.handle,
            handle_label: state.handle.map(Handle::label),
            start: state.increment.map(|inc| inc.start),
            adjustment: state.adjustment(),
            viewport,
        }
    }
}

/// Callback receiving snapshots.
pub type Observer = Box<dyn Fn(&Snapshot)>;

/// Fan-out publisher of [`Snapshot`]s.
#[derive(Default)]
pub struct NotificationBus {
    observers: Vec<Observer>,
}

impl NotificationBus {
    #[must_use]
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    /// Append an observer. Observers are never de-duplicated.
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    /// Deliver `snapshot` to every observer in subscription order.
    pub fn publish(&self, snapshot: &Snapshot) {
        for observer in &self.observers {
            observer(snapshot);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}
