//! The navigation engine: focus state, policy resolution, input wiring.
//!
//! [`Navigator`] owns the container tree, the spottable arena, the pause flag,
//! the pointer/5-way mode detector, and one accelerator for directional keys.
//! Everything executes synchronously inside the handler of the triggering
//! input event, in a fixed order: mode classification, accelerator admission,
//! candidate resolution, focus mutation.

use tracing::{debug, trace, warn};

use crate::accelerator::Accelerator;
use crate::container::{
    Container, ContainerConfig, ContainerId, ContainerRegistry, EnterTo, Restrict,
};
use crate::input::{Direction, InputEvent, InputModeDetector, KeyState, PointerAction};
use crate::navigate::score::{self, ScoreWeights, DEFAULT_OVERLAP_TOLERANCE};
use crate::node::{NodeId, NodeMeta};
use crate::pause::{PauseState, PauseToken};
use crate::registry::SpottableRegistry;

// ---------------------------------------------------------------------------
// FocusChange
// ---------------------------------------------------------------------------

/// A focus transition, queued for the adapter layer to react to (blur `from`,
/// focus `to`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    pub from: Option<NodeId>,
    pub to: Option<NodeId>,
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// The focus-navigation engine.
///
/// A `Navigator` is self-contained: multiple instances coexist without shared
/// state, so tests (or independent key groups) can each own one. Construction
/// is initialization; [`terminate`](Self::terminate) resets the instance to
/// its freshly-constructed state.
pub struct Navigator {
    containers: ContainerRegistry,
    nodes: SpottableRegistry,
    pause: PauseState,
    detector: InputModeDetector,
    accelerator: Accelerator,
    current: Option<NodeId>,
    weights: ScoreWeights,
    overlap_tolerance: i32,
    pending: Vec<FocusChange>,
}

impl Navigator {
    /// Create a navigator with default scoring weights and tolerance.
    pub fn new() -> Self {
        Self {
            containers: ContainerRegistry::new(),
            nodes: SpottableRegistry::new(),
            pause: PauseState::new(),
            detector: InputModeDetector::new(),
            accelerator: Accelerator::new(),
            current: None,
            weights: ScoreWeights::default(),
            overlap_tolerance: DEFAULT_OVERLAP_TOLERANCE,
            pending: Vec::new(),
        }
    }

    /// Override the scoring weights (builder).
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Override the overlap tolerance (builder).
    pub fn with_overlap_tolerance(mut self, tolerance: i32) -> Self {
        self.overlap_tolerance = tolerance;
        self
    }

    /// Reset to the freshly-constructed state: all containers except the root
    /// gone, no nodes, no focus, unpaused, 5-way mode.
    pub fn terminate(&mut self) {
        self.containers = ContainerRegistry::new();
        self.nodes.clear();
        self.pause.resume();
        self.detector = InputModeDetector::new();
        self.accelerator.reset();
        self.current = None;
        self.pending.clear();
    }

    // ── Container lifecycle ──────────────────────────────────────────

    /// The always-present root container's id.
    pub fn root_container(&self) -> ContainerId {
        self.containers.root_id()
    }

    /// Create a container. See [`ContainerRegistry::add`].
    pub fn add_container(&mut self, config: ContainerConfig) -> ContainerId {
        self.containers.add(config)
    }

    /// Reconfigure a container. Unknown ids warn and return `false`.
    pub fn set_container(&mut self, id: &ContainerId, config: ContainerConfig) -> bool {
        self.containers.set(id, config)
    }

    /// Delete a container, rehoming its member nodes (and child containers)
    /// to the nearest living ancestor. Unknown ids and the root warn and
    /// return `false`.
    pub fn remove_container(&mut self, id: &ContainerId) -> bool {
        match self.containers.remove(id) {
            Some(heir) => {
                let moved = self.nodes.rehome(id, &heir);
                debug!(container = %id, heir = %heir, moved, "container removed");
                true
            }
            None => false,
        }
    }

    /// Immutable access to a container.
    pub fn container(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.get(id)
    }

    // ── Node lifecycle ───────────────────────────────────────────────

    /// Register a spottable node, resolving its container by selector match
    /// (deepest matching container wins, root as fallback).
    pub fn register(&mut self, meta: NodeMeta) -> NodeId {
        let container = self.containers.resolve_membership(&meta);
        self.nodes.register(meta, container)
    }

    /// Register a spottable node under an explicit container. Unknown
    /// containers warn and fall back to the root.
    pub fn register_in(&mut self, meta: NodeMeta, container: ContainerId) -> NodeId {
        let container = if self.containers.contains(&container) {
            container
        } else {
            warn!(container = %container, "register into unknown container, using root");
            self.containers.root_id()
        };
        self.nodes.register(meta, container)
    }

    /// Unregister a node. Clears the current focus if it pointed here, so the
    /// focus slot never references a dead node.
    pub fn unregister(&mut self, id: NodeId) -> Option<NodeMeta> {
        let meta = self.nodes.unregister(id)?;
        if self.current == Some(id) {
            self.push_change(None);
        }
        Some(meta)
    }

    /// Set a node's disabled flag. Disabled nodes stay registered (and may
    /// keep focus until it moves) but are excluded from candidacy.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> bool {
        self.nodes.set_disabled(id, disabled)
    }

    /// Push an updated bounding region for a node.
    pub fn set_region(&mut self, id: NodeId, region: crate::geometry::Region) -> bool {
        self.nodes.set_region(id, region)
    }

    /// Find a node by its stable id attribute.
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.nodes.lookup(id)
    }

    /// Immutable access to a node's metadata.
    pub fn node(&self, id: NodeId) -> Option<&NodeMeta> {
        self.nodes.get(id)
    }

    // ── State queries ────────────────────────────────────────────────

    /// The currently focused node, if any.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Whether input is currently interpreted as pointer-driven.
    pub fn pointer_mode(&self) -> bool {
        self.detector.pointer_mode()
    }

    /// The shared pause flag (global, unconditional forms).
    pub fn pause_state(&self) -> &PauseState {
        &self.pause
    }

    /// Mint an ownership token over the pause flag.
    pub fn pause_token(&self) -> PauseToken {
        self.pause.token()
    }

    /// Drain the focus transitions accumulated since the last drain.
    pub fn drain_focus_changes(&mut self) -> Vec<FocusChange> {
        std::mem::take(&mut self.pending)
    }

    // ── Focus ────────────────────────────────────────────────────────

    /// Set focus to `id`, respecting containment policy.
    ///
    /// Fails (returning `false`, never panicking) when navigation is paused,
    /// the node is unregistered or disabled, or the move would cross a
    /// `SelfOnly` boundary enclosing the current focus. This and
    /// [`move_focus`](Self::move_focus) are the only paths that mutate focus.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.pause.is_paused() {
            trace!("focus ignored: navigation paused");
            return false;
        }
        if !self.nodes.is_enabled(id) {
            return false;
        }
        if self.current == Some(id) {
            return true;
        }
        if !self.may_leave_for(id) {
            trace!("focus rejected by self-only boundary");
            return false;
        }
        self.apply_focus(id);
        true
    }

    /// Set focus to `id`, ignoring containment policy.
    ///
    /// The explicit escape hatch for crossing a `SelfOnly` boundary (e.g.
    /// force-closing a modal scope). Still requires the target to be
    /// registered and enabled, and still a no-op while paused.
    pub fn focus_unrestricted(&mut self, id: NodeId) -> bool {
        if self.pause.is_paused() || !self.nodes.is_enabled(id) {
            return false;
        }
        if self.current != Some(id) {
            self.apply_focus(id);
        }
        true
    }

    /// Set focus by a node's stable id attribute.
    pub fn focus_by_id(&mut self, id: &str) -> bool {
        match self.nodes.lookup(id) {
            Some(node) => self.focus(node),
            None => false,
        }
    }

    /// Focus a container as a whole, resolving its enter-to rule:
    /// last-focused member, then the default-element selector, then the first
    /// member in scan order (top-to-bottom, left-to-right).
    pub fn focus_container(&mut self, id: &ContainerId) -> bool {
        let Some(container) = self.containers.get(id) else {
            warn!(container = %id, "focus_container on unknown container");
            return false;
        };

        let enter_to = container.enter_to;
        let last = container.last_focused;
        let default_selector = container.default_selector.clone();

        if enter_to == Some(EnterTo::LastFocused) {
            if let Some(node) = last {
                let still_member = self
                    .nodes
                    .container_of(node)
                    .is_some_and(|c| self.containers.is_within(c, id));
                if still_member && self.nodes.is_enabled(node) {
                    return self.focus(node);
                }
            }
        }

        if let Some(selector) = default_selector {
            let target = self
                .subtree_members(id)
                .into_iter()
                .find(|&n| self.nodes.get(n).is_some_and(|m| !m.disabled && selector.matches(m)));
            if let Some(node) = target {
                return self.focus(node);
            }
        }

        match self.scan_first(id) {
            Some(node) => self.focus(node),
            None => false,
        }
    }

    // ── Directional movement ─────────────────────────────────────────

    /// Move focus one step in `direction`.
    ///
    /// Returns `false` — leaving focus untouched — when navigation is paused,
    /// nothing is focused, or no candidate qualifies under the active
    /// restriction policy. Never an error: "no target in that direction" is
    /// an expected outcome.
    pub fn move_focus(&mut self, direction: Direction) -> bool {
        if self.pause.is_paused() {
            trace!("move ignored: navigation paused");
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };
        let Some(target) = self.resolve_move(current, direction) else {
            trace!(?direction, "no candidate");
            return false;
        };
        self.apply_focus(target);
        true
    }

    /// Compute where a move from `current` would land, without applying it.
    fn resolve_move(&self, current: NodeId, direction: Direction) -> Option<NodeId> {
        let current_region = self.nodes.get(current)?.region;
        let current_container = self.nodes.container_of(current)?.clone();

        // The nearest SelfOnly ancestor (including the container itself)
        // bounds the candidate set absolutely.
        let boundary = self
            .chain(&current_container)
            .into_iter()
            .find(|c| self.containers.get(c).is_some_and(|k| k.restrict == Restrict::SelfOnly));

        let qualified: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|&(id, meta)| {
                id != current
                    && !meta.disabled
                    && meta.region.size().area() > 0
                    && score::qualifies(current_region, meta.region, direction, self.overlap_tolerance)
            })
            .map(|(id, _)| id)
            .filter(|&id| self.in_scope(id, &current_container, boundary.as_ref()))
            .collect();

        // SelfFirst: internal candidates win outright when any exist.
        // Internal means anywhere in the scope's subtree, matching how the
        // SelfOnly boundary above treats containment.
        let restrict = self.containers.get(&current_container).map(|c| c.restrict);
        if restrict == Some(Restrict::SelfFirst) {
            let internal: Vec<NodeId> = qualified
                .iter()
                .copied()
                .filter(|&id| {
                    self.nodes
                        .container_of(id)
                        .is_some_and(|c| self.containers.is_within(c, &current_container))
                })
                .collect();
            if !internal.is_empty() {
                return self.best_scored(current_region, &internal, direction);
            }
        }

        self.best_scored(current_region, &qualified, direction)
    }

    /// Whether a candidate is reachable from the current container: inside
    /// the bounding SelfOnly scope (when there is one), and not hidden inside
    /// some *other* SelfOnly container.
    fn in_scope(
        &self,
        candidate: NodeId,
        current_container: &ContainerId,
        boundary: Option<&ContainerId>,
    ) -> bool {
        let Some(candidate_container) = self.nodes.container_of(candidate) else {
            return false;
        };
        if let Some(boundary) = boundary {
            if !self.containers.is_within(candidate_container, boundary) {
                return false;
            }
        }
        // A SelfOnly container that does not enclose the current focus is a
        // closed scope: directional movement cannot wander in.
        for scope in self.chain(candidate_container) {
            let self_only = self
                .containers
                .get(&scope)
                .is_some_and(|c| c.restrict == Restrict::SelfOnly);
            if self_only && !self.containers.is_within(current_container, &scope) {
                return false;
            }
        }
        true
    }

    /// Minimum-score candidate; ties keep the earliest-registered (the ids in
    /// `candidates` are in registration order).
    fn best_scored(
        &self,
        current_region: crate::geometry::Region,
        candidates: &[NodeId],
        direction: Direction,
    ) -> Option<NodeId> {
        let mut best: Option<(NodeId, i64)> = None;
        for &id in candidates {
            let region = self.nodes.get(id)?.region;
            let s = score::score(current_region, region, direction, self.weights);
            if best.is_none_or(|(_, b)| s < b) {
                best = Some((id, s));
            }
        }
        best.map(|(id, _)| id)
    }

    // ── Input wiring ─────────────────────────────────────────────────

    /// Feed one input event through the full pipeline.
    ///
    /// Order is fixed: (1) pointer/5-way classification, (2) accelerator
    /// admission for directional key-downs, (3) candidate resolution and
    /// focus mutation. Returns `true` when the event changed focus.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.detector.handle_event(&event);

        match event {
            InputEvent::Key(key) => {
                if !key.is_directional() {
                    return false;
                }
                match key.state {
                    KeyState::Down => {
                        let mut admitted = false;
                        self.accelerator.process_key(&key, |_| admitted = true);
                        if !admitted {
                            return false;
                        }
                        match key.direction() {
                            Some(direction) => self.move_focus(direction),
                            None => false,
                        }
                    }
                    KeyState::Up => {
                        // Ends the repeat sequence; no navigation.
                        self.accelerator.process_key(&key, |_| {});
                        false
                    }
                }
            }
            InputEvent::Pointer(pointer) => match pointer.action {
                // A click focuses directly, bypassing directional search.
                PointerAction::Down => match self.nodes.node_at(pointer.position) {
                    Some(node) => self.focus(node),
                    None => false,
                },
                PointerAction::Move => false,
            },
        }
    }

    /// The accelerator used for directional key pacing.
    pub fn accelerator_mut(&mut self) -> &mut Accelerator {
        &mut self.accelerator
    }

    // ── Internals ────────────────────────────────────────────────────

    /// `id` plus its ancestors, innermost first.
    fn chain(&self, id: &ContainerId) -> Vec<ContainerId> {
        let mut chain = vec![id.clone()];
        chain.extend(self.containers.ancestors(id));
        chain
    }

    /// Whether focusing `target` is permitted by every SelfOnly scope
    /// enclosing the current focus.
    fn may_leave_for(&self, target: NodeId) -> bool {
        let Some(current) = self.current else {
            return true;
        };
        let Some(current_container) = self.nodes.container_of(current) else {
            return true;
        };
        let Some(target_container) = self.nodes.container_of(target) else {
            return false;
        };
        for scope in self.chain(current_container) {
            let self_only = self
                .containers
                .get(&scope)
                .is_some_and(|c| c.restrict == Restrict::SelfOnly);
            if self_only && !self.containers.is_within(target_container, &scope) {
                return false;
            }
        }
        true
    }

    /// Enabled members of `id`'s subtree, in registration order.
    fn subtree_members(&self, id: &ContainerId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|&(node, meta)| {
                !meta.disabled
                    && self
                        .nodes
                        .container_of(node)
                        .is_some_and(|c| self.containers.is_within(c, id))
            })
            .map(|(node, _)| node)
            .collect()
    }

    /// First enabled subtree member in scan order: top-to-bottom, then
    /// left-to-right, then registration order.
    fn scan_first(&self, id: &ContainerId) -> Option<NodeId> {
        self.subtree_members(id)
            .into_iter()
            .enumerate()
            .min_by_key(|&(index, node)| {
                let region = self.nodes.get(node).map(|m| m.region).unwrap_or_default();
                (region.y, region.x, index)
            })
            .map(|(_, node)| node)
    }

    /// Commit a focus transition and update last-focused bookkeeping on the
    /// target's whole container chain.
    fn apply_focus(&mut self, id: NodeId) {
        debug!(from = ?self.current, to = ?id, "focus");
        self.push_change(Some(id));
        if let Some(container) = self.nodes.container_of(id).cloned() {
            for scope in self.chain(&container) {
                self.containers.note_focus(&scope, id);
            }
        }
    }

    fn push_change(&mut self, to: Option<NodeId>) {
        let from = self.current;
        self.current = to;
        self.pending.push(FocusChange { from, to });
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
