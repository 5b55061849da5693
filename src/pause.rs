//! Ownership-gated pause/resume of navigation side effects.
//!
//! Several independent UI layers may want navigation suspended at once (a
//! modal opening, a drag gesture). A counting semaphore would let an unrelated
//! layer's extra resume unpause something it never paused, so the flag is
//! owner-gated instead: the first [`PauseToken`] to pause owns the flag, and
//! only that token (or the unconditional global forms) can clear it.
//!
//! The engine is single-threaded by contract; shared handles use `Rc` + `Cell`.

use std::cell::Cell;
use std::rc::Rc;

/// Who currently holds the pause flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    /// The unconditional global kill-switch.
    Global,
    /// A specific [`PauseToken`], by its minted id.
    Token(u64),
}

#[derive(Debug, Default)]
struct Inner {
    owner: Cell<Option<Owner>>,
    next_id: Cell<u64>,
}

// ---------------------------------------------------------------------------
// PauseState
// ---------------------------------------------------------------------------

/// Shared handle to a single pause flag.
///
/// Cloning shares the flag; the methods on `PauseState` itself are the
/// unconditional global forms, which set, clear, and observe the flag
/// regardless of which token owns it.
#[derive(Debug, Clone, Default)]
pub struct PauseState {
    inner: Rc<Inner>,
}

impl PauseState {
    /// Create a new, unpaused flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a token over this flag.
    pub fn token(&self) -> PauseToken {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        PauseToken { id, inner: Rc::clone(&self.inner) }
    }

    /// Unconditionally pause, overriding any token owner. Idempotent.
    pub fn pause(&self) {
        self.inner.owner.set(Some(Owner::Global));
    }

    /// Unconditionally resume, regardless of which owner set the flag.
    pub fn resume(&self) {
        self.inner.owner.set(None);
    }

    /// Whether the flag is set, by any owner.
    pub fn is_paused(&self) -> bool {
        self.inner.owner.get().is_some()
    }
}

// ---------------------------------------------------------------------------
// PauseToken
// ---------------------------------------------------------------------------

/// An owner identity over a shared pause flag.
///
/// First-writer-wins: [`pause`](Self::pause) only takes the flag when no other
/// owner holds it, and [`resume`](Self::resume) only releases the flag this
/// token took.
#[derive(Debug)]
pub struct PauseToken {
    id: u64,
    inner: Rc<Inner>,
}

impl PauseToken {
    /// Take the flag if it is free (or already ours). Idempotent.
    pub fn pause(&self) {
        match self.inner.owner.get() {
            None => self.inner.owner.set(Some(Owner::Token(self.id))),
            Some(_) => {} // someone else (or we) already paused
        }
    }

    /// Release the flag, but only if this token owns it.
    pub fn resume(&self) {
        if self.inner.owner.get() == Some(Owner::Token(self.id)) {
            self.inner.owner.set(None);
        }
    }

    /// Whether *this token* is the current owner.
    ///
    /// Distinguishes "I am the one who paused" from "someone else paused";
    /// use [`PauseState::is_paused`] for the any-owner view.
    pub fn is_paused(&self) -> bool {
        self.inner.owner.get() == Some(Owner::Token(self.id))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
