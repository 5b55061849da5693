//! Container tree: navigation scopes with containment policies.
//!
//! A [`Container`] is a named navigation scope. Every spottable node belongs to
//! exactly one container; containers nest into a tree rooted at the always-
//! present root container. The container a focused node lives in decides, via
//! its [`Restrict`] policy, whether a directional move may leave the scope, and
//! its [`EnterTo`] rule decides which member receives focus when the scope is
//! entered as a whole.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use crate::node::NodeId;
use crate::selector::Selector;

/// Id of the root container, which always exists and can be neither removed
/// nor reconfigured to have a parent.
pub const ROOT_CONTAINER_ID: &str = "fiveway-root";

// ---------------------------------------------------------------------------
// ContainerId
// ---------------------------------------------------------------------------

/// Identifier for a container. Auto-generated (`container-N`) unless supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(String);

impl ContainerId {
    /// The root container's id.
    pub fn root() -> Self {
        Self(ROOT_CONTAINER_ID.to_owned())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ContainerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Restrict / EnterTo
// ---------------------------------------------------------------------------

/// Containment policy governing whether navigation may leave a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Restrict {
    /// No containment: internal and external candidates compete by geometry.
    None,
    /// Prefer internal candidates; consider external ones only when no
    /// internal candidate qualifies. The default for new containers.
    #[default]
    SelfFirst,
    /// Navigation never leaves the container, even when it has no candidate
    /// in the requested direction.
    SelfOnly,
}

/// Rule describing which member receives focus when the container is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterTo {
    /// The member focused most recently, when it is still registered and
    /// enabled; falls back to [`EnterTo::DefaultElement`].
    LastFocused,
    /// The member matched by the container's default-element selector; falls
    /// back to the first member in scan order.
    DefaultElement,
}

// ---------------------------------------------------------------------------
// ContainerConfig
// ---------------------------------------------------------------------------

/// Partial container configuration for [`ContainerRegistry::add`] and
/// [`ContainerRegistry::set`].
///
/// `None` fields are left untouched by `set` and take defaults in `add`
/// (universal selector, [`Restrict::SelfFirst`], no enter-to rule, parented
/// to the root).
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    pub id: Option<ContainerId>,
    pub selector: Option<Selector>,
    pub restrict: Option<Restrict>,
    pub enter_to: Option<EnterTo>,
    pub default_selector: Option<Selector>,
    pub parent: Option<ContainerId>,
}

impl ContainerConfig {
    /// An empty config: all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit id (builder).
    pub fn with_id(mut self, id: impl Into<ContainerId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the scoping selector (builder).
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Set the restrict policy (builder).
    pub fn with_restrict(mut self, restrict: Restrict) -> Self {
        self.restrict = Some(restrict);
        self
    }

    /// Set the enter-to rule (builder).
    pub fn with_enter_to(mut self, enter_to: EnterTo) -> Self {
        self.enter_to = Some(enter_to);
        self
    }

    /// Set the default-element selector (builder).
    pub fn with_default_selector(mut self, selector: Selector) -> Self {
        self.default_selector = Some(selector);
        self
    }

    /// Set the parent container (builder).
    pub fn with_parent(mut self, parent: impl Into<ContainerId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A single navigation scope.
#[derive(Debug, Clone)]
pub struct Container {
    pub id: ContainerId,
    /// Which spottable nodes belong to this scope.
    pub selector: Selector,
    pub restrict: Restrict,
    pub enter_to: Option<EnterTo>,
    /// Designated default child for [`EnterTo::DefaultElement`].
    pub default_selector: Option<Selector>,
    /// Enclosing container. `None` only for the root.
    pub parent: Option<ContainerId>,
    /// The member that most recently held focus, for [`EnterTo::LastFocused`].
    pub last_focused: Option<NodeId>,
}

// ---------------------------------------------------------------------------
// ContainerRegistry
// ---------------------------------------------------------------------------

/// Owner of the container tree.
///
/// Only the registry mutates the hierarchy; UI layers hold ids. The root
/// container (universal selector, [`Restrict::None`]) is created on
/// construction and always survives.
#[derive(Debug)]
pub struct ContainerRegistry {
    containers: HashMap<ContainerId, Container>,
    /// Insertion order, for deterministic iteration and membership resolution.
    order: Vec<ContainerId>,
    next_auto: u64,
}

impl ContainerRegistry {
    /// Create a registry holding only the root container.
    pub fn new() -> Self {
        let root = Container {
            id: ContainerId::root(),
            selector: Selector::universal(),
            restrict: Restrict::None,
            enter_to: None,
            default_selector: None,
            parent: None,
            last_focused: None,
        };
        let mut containers = HashMap::new();
        containers.insert(root.id.clone(), root);
        Self {
            containers,
            order: vec![ContainerId::root()],
            next_auto: 0,
        }
    }

    /// The root container's id.
    pub fn root_id(&self) -> ContainerId {
        ContainerId::root()
    }

    /// Create a new container from `config`, returning its id.
    ///
    /// The id is auto-generated unless `config.id` is supplied. An unknown or
    /// missing parent resolves to the root. Re-adding an existing id replaces
    /// that container's configuration in place (keeping its children).
    pub fn add(&mut self, config: ContainerConfig) -> ContainerId {
        let id = config.id.clone().unwrap_or_else(|| self.generate_id());
        let parent = match config.parent {
            Some(p) if self.containers.contains_key(&p) => Some(p),
            Some(p) => {
                warn!(container = %p, "unknown parent container, attaching to root");
                Some(self.root_id())
            }
            None => Some(self.root_id()),
        };
        let container = Container {
            id: id.clone(),
            selector: config.selector.unwrap_or_else(Selector::universal),
            restrict: config.restrict.unwrap_or_default(),
            enter_to: config.enter_to,
            default_selector: config.default_selector,
            parent,
            last_focused: None,
        };
        if self.containers.insert(id.clone(), container).is_none() {
            self.order.push(id.clone());
        }
        id
    }

    /// Merge `config` into an existing container.
    ///
    /// Unknown ids are a logged no-op, never an error surfaced to the event
    /// handler. The root's parent cannot be changed.
    pub fn set(&mut self, id: &ContainerId, config: ContainerConfig) -> bool {
        let is_root = *id == self.root_id();
        let parent = match config.parent {
            Some(p) if !is_root && self.containers.contains_key(&p) => Some(p),
            _ => None,
        };
        let Some(container) = self.containers.get_mut(id) else {
            warn!(container = %id, "set on unknown container");
            return false;
        };
        if let Some(selector) = config.selector {
            container.selector = selector;
        }
        if let Some(restrict) = config.restrict {
            container.restrict = restrict;
        }
        if let Some(enter_to) = config.enter_to {
            container.enter_to = Some(enter_to);
        }
        if let Some(default_selector) = config.default_selector {
            container.default_selector = Some(default_selector);
        }
        if let Some(parent) = parent {
            container.parent = Some(parent);
        }
        true
    }

    /// Delete a container, reparenting its child containers to the nearest
    /// living ancestor.
    ///
    /// Returns the id of that ancestor (for the caller to rehome the removed
    /// container's spottable members), or `None` when `id` was unknown or the
    /// root. Removing the root is a logged no-op.
    pub fn remove(&mut self, id: &ContainerId) -> Option<ContainerId> {
        if *id == self.root_id() {
            warn!("remove of root container ignored");
            return None;
        }
        let Some(removed) = self.containers.remove(id) else {
            warn!(container = %id, "remove of unknown container");
            return None;
        };
        self.order.retain(|c| c != id);
        // The parent is a living container: removal is the only way a parent
        // reference dies, and removal rewrites children first.
        let heir = removed.parent.unwrap_or_else(|| self.root_id());
        for container in self.containers.values_mut() {
            if container.parent.as_ref() == Some(id) {
                container.parent = Some(heir.clone());
            }
        }
        Some(heir)
    }

    /// Immutable access to a container.
    pub fn get(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.get(id)
    }

    /// Mutable access to a container.
    pub fn get_mut(&mut self, id: &ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(id)
    }

    /// Whether a container with this id exists.
    pub fn contains(&self, id: &ContainerId) -> bool {
        self.containers.contains_key(id)
    }

    /// Number of containers, including the root.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether only the root exists.
    pub fn is_empty(&self) -> bool {
        self.containers.len() <= 1
    }

    /// Walk from `id` up to the root, collecting ancestor ids.
    ///
    /// Does not include `id` itself; starts with the immediate parent and ends
    /// at the root. Unknown ids yield an empty vec.
    pub fn ancestors(&self, id: &ContainerId) -> Vec<ContainerId> {
        let mut result = Vec::new();
        let mut current = id.clone();
        while let Some(parent) = self.containers.get(&current).and_then(|c| c.parent.clone()) {
            result.push(parent.clone());
            current = parent;
        }
        result
    }

    /// Whether `inner` is `outer` or lies in `outer`'s subtree.
    pub fn is_within(&self, inner: &ContainerId, outer: &ContainerId) -> bool {
        inner == outer || self.ancestors(inner).contains(outer)
    }

    /// Iterate containers in insertion order (root first).
    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.order.iter().filter_map(|id| self.containers.get(id))
    }

    /// Resolve which container a node with the given metadata belongs to: the
    /// deepest container whose selector matches, falling back to the root.
    ///
    /// Among equally deep matches the earliest-added wins, keeping resolution
    /// deterministic.
    pub fn resolve_membership(&self, meta: &crate::node::NodeMeta) -> ContainerId {
        let mut best = self.root_id();
        let mut best_depth = 0;
        for container in self.iter() {
            if container.selector.matches(meta) {
                let depth = self.ancestors(&container.id).len();
                if depth > best_depth {
                    best = container.id.clone();
                    best_depth = depth;
                }
            }
        }
        best
    }

    /// Record `node` as the most recently focused member of `id` (and do not
    /// touch ancestors; each scope keeps its own memory).
    pub fn note_focus(&mut self, id: &ContainerId, node: NodeId) {
        if let Some(container) = self.containers.get_mut(id) {
            container.last_focused = Some(node);
        }
    }

    fn generate_id(&mut self) -> ContainerId {
        loop {
            self.next_auto += 1;
            let id = ContainerId(format!("container-{}", self.next_auto));
            if !self.containers.contains_key(&id) {
                return id;
            }
        }
    }
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
