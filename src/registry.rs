//! Spottable-node registry: registration, enabled state, membership, hit-testing.
//!
//! [`SpottableRegistry`] is the arena of elements currently eligible (or
//! temporarily ineligible, when disabled) to receive focus. The adapter layer
//! registers a node when its UI element mounts and unregisters on unmount;
//! disabling keeps the node registered so it can become eligible again without
//! re-registration. Registration order is the deterministic tie-break order
//! for navigation and doubles as z-order for pointer hit-testing (later
//! registrations are frontmost).

use slotmap::{SecondaryMap, SlotMap};

use crate::container::ContainerId;
use crate::geometry::{Offset, Region};
use crate::node::{NodeId, NodeMeta};

/// Arena of registered spottable nodes.
#[derive(Debug, Default)]
pub struct SpottableRegistry {
    nodes: SlotMap<NodeId, NodeMeta>,
    membership: SecondaryMap<NodeId, ContainerId>,
    /// Registration order; drives tie-breaks and hit-test z-order.
    order: Vec<NodeId>,
}

impl SpottableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node under the given container, returning its key.
    pub fn register(&mut self, meta: NodeMeta, container: ContainerId) -> NodeId {
        let id = self.nodes.insert(meta);
        self.membership.insert(id, container);
        self.order.push(id);
        id
    }

    /// Unregister a node, returning its metadata if it was registered.
    pub fn unregister(&mut self, id: NodeId) -> Option<NodeMeta> {
        let meta = self.nodes.remove(id)?;
        self.membership.remove(id);
        self.order.retain(|&n| n != id);
        Some(meta)
    }

    /// Immutable access to a node's metadata.
    pub fn get(&self, id: NodeId) -> Option<&NodeMeta> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's metadata.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeMeta> {
        self.nodes.get_mut(id)
    }

    /// Whether a node is currently registered.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether a node is registered and not disabled.
    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|meta| !meta.disabled)
    }

    /// Set the disabled flag. Returns `false` for unknown nodes.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> bool {
        match self.nodes.get_mut(id) {
            Some(meta) => {
                meta.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Update a node's bounding region. Returns `false` for unknown nodes.
    pub fn set_region(&mut self, id: NodeId, region: Region) -> bool {
        match self.nodes.get_mut(id) {
            Some(meta) => {
                meta.region = region;
                true
            }
            None => false,
        }
    }

    /// The container a node belongs to.
    pub fn container_of(&self, id: NodeId) -> Option<&ContainerId> {
        self.membership.get(id)
    }

    /// Reassign a node to a different container. Returns `false` for unknown nodes.
    pub fn set_container(&mut self, id: NodeId, container: ContainerId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.membership.insert(id, container);
        true
    }

    /// Move every member of `from` into `to`. Returns the number of nodes moved.
    ///
    /// Used when a container is removed: members are rehomed to the nearest
    /// living ancestor rather than left pointing at a dead id.
    pub fn rehome(&mut self, from: &ContainerId, to: &ContainerId) -> usize {
        let mut moved = 0;
        for &id in &self.order {
            if self.membership.get(id) == Some(from) {
                self.membership.insert(id, to.clone());
                moved += 1;
            }
        }
        moved
    }

    /// Find the first node (in registration order) whose stable id attribute
    /// matches `id`.
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, meta)| meta.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Iterate `(NodeId, &NodeMeta)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeMeta)> {
        self.order.iter().filter_map(|&id| self.nodes.get(id).map(|meta| (id, meta)))
    }

    /// All members of a container (direct membership only, not its subtree),
    /// in registration order.
    pub fn members(&self, container: &ContainerId) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.membership.get(id) == Some(container))
            .collect()
    }

    /// Return the frontmost enabled node whose region contains the given
    /// point, or `None`.
    ///
    /// Frontmost means registered last, mirroring painter's order: the node an
    /// adapter mounts later draws over earlier ones.
    pub fn node_at(&self, point: Offset) -> Option<NodeId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|&id| {
                self.nodes
                    .get(id)
                    .is_some_and(|meta| !meta.disabled && meta.region.contains(point.x, point.y))
            })
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node. Used by engine teardown.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.membership.clear();
        self.order.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
