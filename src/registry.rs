//! Scene registry: the flat store that owns every container node.
//!
//! Nodes are kept in insertion order. Paint order follows that order, while
//! hit-testing orders results by priority so that the node latched by an
//! in-progress interaction keeps winning over anything overlapping it.
//! Parent/child relationships are back-references on the nodes themselves;
//! the registry never walks a tree.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use indexmap::IndexMap;

use crate::consts::{DEFAULT_PRIORITY, PREFERRED_PRIORITY};
use crate::node::{ContainerNode, NodeId};
use crate::viewport::Point;

/// In-memory store of container nodes.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    nodes: IndexMap<NodeId, ContainerNode>,
}

impl SceneRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: IndexMap::new() }
    }

    /// Insert a node unless its id is already registered.
    ///
    /// Returns `false` on collision; the registered node is left untouched.
    pub fn register(&mut self, node: ContainerNode) -> bool {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            log::debug!("registry: {id} already registered, ignoring");
            return false;
        }
        self.nodes.insert(id, node);
        true
    }

    /// Remove a node by id, returning it if it was present.
    ///
    /// The relative order of the remaining nodes is preserved.
    pub fn remove(&mut self, id: &NodeId) -> Option<ContainerNode> {
        self.nodes.shift_remove(id)
    }

    /// Return a reference to a node by id.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&ContainerNode> {
        self.nodes.get(id)
    }

    /// Return a mutable reference to a node by id.
    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut ContainerNode> {
        self.nodes.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ContainerNode> {
        self.nodes.values()
    }

    /// Nodes whose parent back-reference is `parent`, in insertion order.
    pub fn children_of(&self, parent: NodeId) -> impl Iterator<Item = &ContainerNode> {
        self.nodes
            .values()
            .filter(move |node| node.parent_id == Some(parent))
    }

    /// Every non-root node containing `pt`, preferred node first.
    ///
    /// Containment is half-open: a point on a node's right or bottom edge is
    /// outside it. Nodes are ranked [`PREFERRED_PRIORITY`] when their id is
    /// `preferred` and [`DEFAULT_PRIORITY`] otherwise; the sort is stable, so
    /// equal priorities keep insertion order.
    #[must_use]
    pub fn find_topmost(&self, pt: Point, exclude_root: Option<NodeId>, preferred: Option<NodeId>) -> Vec<&ContainerNode> {
        let mut hits: Vec<(u8, &ContainerNode)> = self
            .nodes
            .values()
            .filter(|node| Some(node.id()) != exclude_root)
            .filter(|node| node.property.contains(pt))
            .map(|node| {
                let priority = if Some(node.id()) == preferred { PREFERRED_PRIORITY } else { DEFAULT_PRIORITY };
                (priority, node)
            })
            .collect();
        hits.sort_by_key(|(priority, _)| *priority);
        hits.into_iter().map(|(_, node)| node).collect()
    }

    /// Number of registered nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
