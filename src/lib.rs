//! # fiveway
//!
//! A deterministic 5-way spatial focus-navigation engine for remote-control and
//! keyboard-driven UIs.
//!
//! fiveway answers one question, synchronously and deterministically: given the
//! currently focused element and a directional key (up/down/left/right), which
//! registered element should receive focus next? Navigation is mediated by a
//! tree of *containers* — named scopes with containment policies — and refined
//! by a pointer/5-way input-mode switch, a key-repeat accelerator, and an
//! ownership-gated pause primitive.
//!
//! The engine owns no rendering and no widget library: an adapter layer
//! registers *spottable* nodes (with their screen regions) and containers, then
//! feeds input events through [`Navigator::handle_input`].
//!
//! ## Core Systems
//!
//! - **[`geometry`]** — Offset, Size, Region primitives with the edge/center
//!   accessors used by directional scoring
//! - **[`selector`]** — CSS-like scoping selectors (`*`, `Kind`, `#id`,
//!   `.class`) for container membership
//! - **[`node`]** — Slotmap-keyed spottable node metadata
//! - **[`registry`]** — The spottable-node arena: registration, enable/disable,
//!   region updates, hit-testing
//! - **[`container`]** — The container tree: restrict policies, enter-to rules,
//!   last-focused bookkeeping
//! - **[`accelerator`]** — Key-repeat pacing with a per-second frequency table
//! - **[`pause`]** — Ownership-gated suspend/resume of navigation side effects
//! - **[`input`]** — Decoupled input events, key codes, pointer/5-way mode
//!   detection, crossterm conversion
//! - **[`navigate`]** — Directional candidate filtering, weighted scoring, and
//!   the [`Navigator`] engine tying everything together
//! - **[`testing`]** — Headless driver for scripting synthetic input in tests

// Foundation
pub mod geometry;

// Scoping and registration
pub mod container;
pub mod node;
pub mod registry;
pub mod selector;

// Input pacing and gating
pub mod accelerator;
pub mod input;
pub mod pause;

// The engine
pub mod navigate;

// Test support
pub mod testing;

pub use accelerator::Accelerator;
pub use container::{ContainerConfig, ContainerId, ContainerRegistry, EnterTo, Restrict};
pub use input::{
    Direction, InputEvent, InputModeDetector, KeyInput, KeyState, PointerAction, PointerInput,
};
pub use navigate::engine::{FocusChange, Navigator};
pub use navigate::score::ScoreWeights;
pub use node::{NodeId, NodeMeta};
pub use pause::{PauseState, PauseToken};
pub use registry::SpottableRegistry;
pub use selector::Selector;
