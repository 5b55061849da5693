//! Pilot: programmatic interaction with a headless [`Navigator`].
//!
//! The `Pilot` wraps a [`Navigator`] together with a scripted clock and
//! provides methods to simulate user input (arrow taps, held keys, pointer
//! clicks) without a terminal. Because key events carry their own timestamps,
//! tests advance time explicitly and the accelerator behaves identically on
//! every run.

use crate::geometry::Offset;
use crate::input::{key_code, Direction, InputEvent, KeyInput, PointerAction, PointerInput};
use crate::navigate::engine::{FocusChange, Navigator};
use crate::node::NodeId;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless navigation driver for testing.
///
/// # Examples
///
/// ```
/// use fiveway::testing::Pilot;
/// use fiveway::{Direction, NodeMeta};
/// use fiveway::geometry::Region;
///
/// let mut pilot = Pilot::new();
/// let a = pilot.navigator_mut().register(
///     NodeMeta::new("Button").with_region(Region::new(0, 0, 10, 10)),
/// );
/// let b = pilot.navigator_mut().register(
///     NodeMeta::new("Button").with_region(Region::new(20, 0, 10, 10)),
/// );
/// pilot.navigator_mut().focus(a);
/// pilot.press(Direction::Right);
/// assert_eq!(pilot.current(), Some(b));
/// ```
pub struct Pilot {
    navigator: Navigator,
    clock_ms: u64,
}

impl Pilot {
    /// Create a pilot around a fresh navigator, with the clock at zero.
    pub fn new() -> Self {
        Self { navigator: Navigator::new(), clock_ms: 0 }
    }

    /// Create a pilot around an already-configured navigator.
    pub fn with_navigator(navigator: Navigator) -> Self {
        Self { navigator, clock_ms: 0 }
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Advance the scripted clock by `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        self.clock_ms += ms;
    }

    /// The current scripted time.
    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a full tap of an arrow key: key-down then key-up.
    ///
    /// Returns `true` when the tap changed focus.
    pub fn press(&mut self, direction: Direction) -> bool {
        let code = direction_code(direction);
        let moved = self
            .navigator
            .handle_input(InputEvent::Key(KeyInput::down(code, self.clock_ms)));
        self.navigator
            .handle_input(InputEvent::Key(KeyInput::up(code, self.clock_ms)));
        moved
    }

    /// Simulate one key-down of a held arrow key, without releasing.
    ///
    /// Repeated calls model auto-repeat; interleave [`advance`](Self::advance)
    /// to script the hold duration the accelerator sees.
    pub fn hold(&mut self, direction: Direction) -> bool {
        let code = direction_code(direction);
        self.navigator
            .handle_input(InputEvent::Key(KeyInput::down(code, self.clock_ms)))
    }

    /// Release a held arrow key.
    pub fn release(&mut self, direction: Direction) {
        let code = direction_code(direction);
        self.navigator
            .handle_input(InputEvent::Key(KeyInput::up(code, self.clock_ms)));
    }

    /// Simulate a select/enter key tap.
    pub fn select(&mut self) {
        self.navigator
            .handle_input(InputEvent::Key(KeyInput::down(key_code::ENTER, self.clock_ms)));
        self.navigator
            .handle_input(InputEvent::Key(KeyInput::up(key_code::ENTER, self.clock_ms)));
    }

    /// Simulate a pointer click at (x, y).
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        self.navigator.handle_input(InputEvent::Pointer(PointerInput {
            action: PointerAction::Down,
            position: Offset::new(x, y),
        }))
    }

    /// Simulate pointer movement to (x, y).
    pub fn hover(&mut self, x: i32, y: i32) {
        self.navigator.handle_input(InputEvent::Pointer(PointerInput {
            action: PointerAction::Move,
            position: Offset::new(x, y),
        }));
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying navigator immutably.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Borrow the underlying navigator mutably.
    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// The currently focused node.
    pub fn current(&self) -> Option<NodeId> {
        self.navigator.current()
    }

    /// Drain the focus transitions accumulated so far.
    pub fn focus_changes(&mut self) -> Vec<FocusChange> {
        self.navigator.drain_focus_changes()
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

fn direction_code(direction: Direction) -> u32 {
    match direction {
        Direction::Left => key_code::LEFT,
        Direction::Up => key_code::UP,
        Direction::Right => key_code::RIGHT,
        Direction::Down => key_code::DOWN,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Region;
    use crate::node::NodeMeta;

    fn grid_pilot() -> (Pilot, NodeId, NodeId, NodeId, NodeId) {
        // 2x2 grid: a b / c d.
        let mut pilot = Pilot::new();
        let nav = pilot.navigator_mut();
        let a = nav.register(NodeMeta::new("Cell").with_region(Region::new(0, 0, 10, 10)));
        let b = nav.register(NodeMeta::new("Cell").with_region(Region::new(20, 0, 10, 10)));
        let c = nav.register(NodeMeta::new("Cell").with_region(Region::new(0, 20, 10, 10)));
        let d = nav.register(NodeMeta::new("Cell").with_region(Region::new(20, 20, 10, 10)));
        nav.focus(a);
        (pilot, a, b, c, d)
    }

    // ── Taps ─────────────────────────────────────────────────────────

    #[test]
    fn press_moves_one_step() {
        let (mut pilot, _a, b, _c, d) = grid_pilot();
        assert!(pilot.press(Direction::Right));
        assert_eq!(pilot.current(), Some(b));
        assert!(pilot.press(Direction::Down));
        assert_eq!(pilot.current(), Some(d));
    }

    #[test]
    fn taps_are_never_throttled() {
        // Each press includes a key-up, so every tap starts a fresh
        // accelerator sequence regardless of timing.
        let (mut pilot, a, b, ..) = grid_pilot();
        for _ in 0..4 {
            assert!(pilot.press(Direction::Right));
            assert_eq!(pilot.current(), Some(b));
            assert!(pilot.press(Direction::Left));
            assert_eq!(pilot.current(), Some(a));
        }
    }

    #[test]
    fn press_against_the_wall() {
        let (mut pilot, a, ..) = grid_pilot();
        assert!(!pilot.press(Direction::Left));
        assert_eq!(pilot.current(), Some(a));
    }

    // ── Held keys ────────────────────────────────────────────────────

    #[test]
    fn hold_is_paced() {
        let (mut pilot, _a, b, _c, d) = grid_pilot();
        assert!(pilot.hold(Direction::Right));
        assert_eq!(pilot.current(), Some(b));

        // Auto-repeats inside the first second: two swallowed, third lands.
        pilot.advance(50);
        assert!(!pilot.hold(Direction::Right));
        pilot.advance(50);
        assert!(!pilot.hold(Direction::Right));
        assert_eq!(pilot.current(), Some(b));

        pilot.advance(50);
        pilot.hold(Direction::Down); // direction change: immediate
        assert_eq!(pilot.current(), Some(d));
        pilot.release(Direction::Down);
    }

    #[test]
    fn release_ends_the_sequence() {
        let (mut pilot, a, b, ..) = grid_pilot();
        pilot.hold(Direction::Right);
        pilot.advance(50);
        pilot.hold(Direction::Right); // swallowed
        pilot.release(Direction::Right);

        pilot.advance(50);
        pilot.hold(Direction::Left); // fresh sequence
        assert_eq!(pilot.current(), Some(a));
        let _ = b;
    }

    // ── Pointer ──────────────────────────────────────────────────────

    #[test]
    fn click_focuses_and_switches_mode() {
        let (mut pilot, _a, _b, c, _d) = grid_pilot();
        assert!(pilot.click(5, 25));
        assert_eq!(pilot.current(), Some(c));
        assert!(pilot.navigator().pointer_mode());
    }

    #[test]
    fn hover_switches_mode_only() {
        let (mut pilot, a, ..) = grid_pilot();
        pilot.hover(5, 25);
        assert_eq!(pilot.current(), Some(a));
        assert!(pilot.navigator().pointer_mode());

        // A key tap switches back to 5-way.
        pilot.press(Direction::Right);
        assert!(!pilot.navigator().pointer_mode());
    }

    #[test]
    fn click_on_empty_space() {
        let (mut pilot, a, ..) = grid_pilot();
        assert!(!pilot.click(100, 100));
        assert_eq!(pilot.current(), Some(a));
    }

    // ── Select / clock ───────────────────────────────────────────────

    #[test]
    fn select_does_not_move_focus() {
        let (mut pilot, a, ..) = grid_pilot();
        pilot.select();
        assert_eq!(pilot.current(), Some(a));
    }

    #[test]
    fn clock_accumulates() {
        let mut pilot = Pilot::new();
        assert_eq!(pilot.now_ms(), 0);
        pilot.advance(100);
        pilot.advance(250);
        assert_eq!(pilot.now_ms(), 350);
    }

    // ── Focus changes ────────────────────────────────────────────────

    #[test]
    fn focus_changes_are_observable() {
        let (mut pilot, a, b, ..) = grid_pilot();
        pilot.focus_changes(); // discard setup transitions
        pilot.press(Direction::Right);

        let changes = pilot.focus_changes();
        assert_eq!(changes, vec![FocusChange { from: Some(a), to: Some(b) }]);
    }
}
