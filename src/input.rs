//! Input event types and pointer/5-way mode detection.
//!
//! Defines [`KeyInput`], [`PointerInput`], [`InputEvent`], and
//! [`InputModeDetector`]. Crossterm events are converted at the boundary via
//! [`InputEvent::from_crossterm`] so the rest of the engine never depends on
//! crossterm directly. Key events carry raw key codes (browser-compatible
//! numbering plus the remote-control select alias) and a caller-stamped
//! timestamp, keeping the accelerator deterministic under test.

use crate::geometry::Offset;

// ---------------------------------------------------------------------------
// Key codes
// ---------------------------------------------------------------------------

/// Raw key codes consumed by the engine.
///
/// Arrow and enter codes follow the common browser numbering; `SELECT_REMOTE`
/// is the vendor-specific alias some TV remotes emit for the OK/select button.
pub mod key_code {
    pub const ENTER: u32 = 13;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const SELECT_REMOTE: u32 = 16_777_221;
}

/// Whether a key code is the select/enter key (including the remote alias).
pub fn is_select_code(code: u32) -> bool {
    code == key_code::ENTER || code == key_code::SELECT_REMOTE
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four navigation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a raw key code to a direction, if it is one of the four arrows.
    pub fn from_key_code(code: u32) -> Option<Direction> {
        match code {
            key_code::LEFT => Some(Direction::Left),
            key_code::UP => Some(Direction::Up),
            key_code::RIGHT => Some(Direction::Right),
            key_code::DOWN => Some(Direction::Down),
            _ => None,
        }
    }

    /// Whether movement along this direction is on the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

// ---------------------------------------------------------------------------
// KeyInput
// ---------------------------------------------------------------------------

/// Key transition kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Down,
    Up,
}

/// A key event: transition, raw code, and caller-stamped time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub state: KeyState,
    pub code: u32,
    pub time_ms: u64,
}

impl KeyInput {
    /// A key-down event.
    pub const fn down(code: u32, time_ms: u64) -> Self {
        Self { state: KeyState::Down, code, time_ms }
    }

    /// A key-up event.
    pub const fn up(code: u32, time_ms: u64) -> Self {
        Self { state: KeyState::Up, code, time_ms }
    }

    /// The direction this key maps to, if it is an arrow key.
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_key_code(self.code)
    }

    /// Whether this is a directional (arrow) key.
    pub fn is_directional(&self) -> bool {
        self.direction().is_some()
    }

    /// Whether this is the select/enter key (including the remote alias).
    pub fn is_select(&self) -> bool {
        is_select_code(self.code)
    }
}

// ---------------------------------------------------------------------------
// PointerInput
// ---------------------------------------------------------------------------

/// Pointer action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Movement (including drags).
    Move,
    /// Primary-button press / touch down.
    Down,
}

/// A pointer (mouse/touch) event at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerInput {
    pub action: PointerAction,
    pub position: Offset,
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyInput),
    Pointer(PointerInput),
}

impl InputEvent {
    /// Convert a crossterm event, stamping key events with `time_ms`.
    ///
    /// Arrow keys map to the browser arrow codes, Enter to the select code,
    /// and other characters to their ASCII uppercase code. Returns `None` for
    /// events the engine has no use for (resize, paste, scroll, focus).
    pub fn from_crossterm(event: crossterm::event::Event, time_ms: u64) -> Option<InputEvent> {
        use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};

        match event {
            Event::Key(key) => {
                let code = match key.code {
                    KeyCode::Left => key_code::LEFT,
                    KeyCode::Up => key_code::UP,
                    KeyCode::Right => key_code::RIGHT,
                    KeyCode::Down => key_code::DOWN,
                    KeyCode::Enter => key_code::ENTER,
                    KeyCode::Char(c) => c.to_ascii_uppercase() as u32,
                    _ => return None,
                };
                let input = match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => KeyInput::down(code, time_ms),
                    KeyEventKind::Release => KeyInput::up(code, time_ms),
                };
                Some(InputEvent::Key(input))
            }
            Event::Mouse(mouse) => {
                let position = Offset::new(i32::from(mouse.column), i32::from(mouse.row));
                let action = match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerAction::Move,
                    MouseEventKind::Down(_) => PointerAction::Down,
                    _ => return None,
                };
                Some(InputEvent::Pointer(PointerInput { action, position }))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// InputModeDetector
// ---------------------------------------------------------------------------

/// Classifies input as pointer (mouse/touch) or 5-way (directional keys).
///
/// Pointer events switch pointer mode on; directional or select keys switch
/// it off. Mode changes are immediate and synchronous, with no debouncing —
/// repeated-key pacing is the accelerator's job.
#[derive(Debug, Default)]
pub struct InputModeDetector {
    pointer_mode: bool,
}

impl InputModeDetector {
    /// Create a detector starting in 5-way mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify an event, updating the mode. Returns `true` if the mode changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        let new_mode = match event {
            InputEvent::Pointer(_) => true,
            InputEvent::Key(key) if key.is_directional() || key.is_select() => false,
            InputEvent::Key(_) => return false,
        };
        let changed = new_mode != self.pointer_mode;
        self.pointer_mode = new_mode;
        changed
    }

    /// Whether input is currently interpreted as pointer-driven.
    pub fn pointer_mode(&self) -> bool {
        self.pointer_mode
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Direction ────────────────────────────────────────────────────

    #[test]
    fn direction_from_arrow_codes() {
        assert_eq!(Direction::from_key_code(key_code::LEFT), Some(Direction::Left));
        assert_eq!(Direction::from_key_code(key_code::UP), Some(Direction::Up));
        assert_eq!(Direction::from_key_code(key_code::RIGHT), Some(Direction::Right));
        assert_eq!(Direction::from_key_code(key_code::DOWN), Some(Direction::Down));
        assert_eq!(Direction::from_key_code(key_code::ENTER), None);
    }

    #[test]
    fn direction_axis() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
    }

    // ── KeyInput ─────────────────────────────────────────────────────

    #[test]
    fn key_input_predicates() {
        let left = KeyInput::down(key_code::LEFT, 0);
        assert!(left.is_directional());
        assert!(!left.is_select());
        assert_eq!(left.direction(), Some(Direction::Left));

        let enter = KeyInput::down(key_code::ENTER, 0);
        assert!(enter.is_select());
        assert!(!enter.is_directional());

        let remote = KeyInput::down(key_code::SELECT_REMOTE, 0);
        assert!(remote.is_select());

        let other = KeyInput::up(65, 0);
        assert!(!other.is_directional());
        assert!(!other.is_select());
        assert_eq!(other.state, KeyState::Up);
    }

    // ── Crossterm conversion ─────────────────────────────────────────

    #[test]
    fn from_crossterm_arrow_key() {
        let ct = crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Right,
            crossterm::event::KeyModifiers::NONE,
        ));
        let event = InputEvent::from_crossterm(ct, 42).unwrap();
        assert_eq!(
            event,
            InputEvent::Key(KeyInput::down(key_code::RIGHT, 42))
        );
    }

    #[test]
    fn from_crossterm_enter_is_select() {
        let ct = crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        ));
        let event = InputEvent::from_crossterm(ct, 0).unwrap();
        match event {
            InputEvent::Key(key) => assert!(key.is_select()),
            _ => panic!("expected Key event"),
        }
    }

    #[test]
    fn from_crossterm_char_uppercased() {
        let ct = crossterm::event::Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('a'),
            crossterm::event::KeyModifiers::NONE,
        ));
        let event = InputEvent::from_crossterm(ct, 0).unwrap();
        assert_eq!(event, InputEvent::Key(KeyInput::down(65, 0)));
    }

    #[test]
    fn from_crossterm_mouse_move() {
        let ct = crossterm::event::Event::Mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Moved,
            column: 10,
            row: 5,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        let event = InputEvent::from_crossterm(ct, 0).unwrap();
        assert_eq!(
            event,
            InputEvent::Pointer(PointerInput {
                action: PointerAction::Move,
                position: Offset::new(10, 5),
            })
        );
    }

    #[test]
    fn from_crossterm_mouse_down() {
        let ct = crossterm::event::Event::Mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        let event = InputEvent::from_crossterm(ct, 0).unwrap();
        match event {
            InputEvent::Pointer(pointer) => {
                assert_eq!(pointer.action, PointerAction::Down);
                assert_eq!(pointer.position, Offset::new(3, 7));
            }
            _ => panic!("expected Pointer event"),
        }
    }

    #[test]
    fn from_crossterm_ignores_resize() {
        let ct = crossterm::event::Event::Resize(80, 24);
        assert!(InputEvent::from_crossterm(ct, 0).is_none());
    }

    #[test]
    fn from_crossterm_ignores_scroll() {
        let ct = crossterm::event::Event::Mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert!(InputEvent::from_crossterm(ct, 0).is_none());
    }

    // ── InputModeDetector ────────────────────────────────────────────

    #[test]
    fn detector_starts_in_five_way() {
        let detector = InputModeDetector::new();
        assert!(!detector.pointer_mode());
    }

    #[test]
    fn pointer_event_enters_pointer_mode() {
        let mut detector = InputModeDetector::new();
        let event = InputEvent::Pointer(PointerInput {
            action: PointerAction::Move,
            position: Offset::new(0, 0),
        });
        assert!(detector.handle_event(&event));
        assert!(detector.pointer_mode());

        // Same mode again: no change reported.
        assert!(!detector.handle_event(&event));
    }

    #[test]
    fn directional_key_leaves_pointer_mode() {
        let mut detector = InputModeDetector::new();
        detector.handle_event(&InputEvent::Pointer(PointerInput {
            action: PointerAction::Move,
            position: Offset::new(0, 0),
        }));
        assert!(detector.pointer_mode());

        let changed = detector.handle_event(&InputEvent::Key(KeyInput::down(key_code::DOWN, 0)));
        assert!(changed);
        assert!(!detector.pointer_mode());
    }

    #[test]
    fn select_key_leaves_pointer_mode() {
        let mut detector = InputModeDetector::new();
        detector.handle_event(&InputEvent::Pointer(PointerInput {
            action: PointerAction::Move,
            position: Offset::new(0, 0),
        }));

        detector.handle_event(&InputEvent::Key(KeyInput::down(key_code::SELECT_REMOTE, 0)));
        assert!(!detector.pointer_mode());
    }

    #[test]
    fn unrelated_key_leaves_mode_untouched() {
        let mut detector = InputModeDetector::new();
        detector.handle_event(&InputEvent::Pointer(PointerInput {
            action: PointerAction::Move,
            position: Offset::new(0, 0),
        }));

        let changed = detector.handle_event(&InputEvent::Key(KeyInput::down(65, 0)));
        assert!(!changed);
        assert!(detector.pointer_mode());
    }
}
