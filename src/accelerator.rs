//! Key-repeat accelerator: pacing for held directional keys.
//!
//! Holding an arrow key delivers the first key-down immediately, then admits
//! repeats at a rate read from a per-second frequency table, so a held key
//! "accelerates" selection changes over time without flooding the navigation
//! engine. A caller can [`cancel`](Accelerator::cancel) the sequence once a
//! target has locked, suppressing further repeats until the key is released
//! or changes.
//!
//! All state is per instance: independent accelerators (e.g. one per virtual
//! key group) never share a skip counter. Time rides on the events themselves
//! ([`KeyInput::time_ms`]), never on an ambient clock.

use crate::input::{KeyInput, KeyState};

/// Default frequency table: admitted-every-N-events per second of holding,
/// tapering as the hold continues (index = whole seconds held).
pub const DEFAULT_FREQUENCY: [u32; 7] = [3, 3, 3, 2, 2, 2, 1];

/// Paces repeated key-down events for a single key sequence.
#[derive(Debug)]
pub struct Accelerator {
    frequency: Vec<u32>,
    last_key_code: Option<u32>,
    /// Time of the key-down that started the current sequence.
    first_down_ms: u64,
    skipped: u32,
    accelerating: bool,
    canceled: bool,
}

impl Accelerator {
    /// Create an accelerator with the default frequency table.
    pub fn new() -> Self {
        Self::with_frequency(DEFAULT_FREQUENCY.to_vec())
    }

    /// Create an accelerator with a custom frequency table.
    ///
    /// An empty table falls back to the default.
    pub fn with_frequency(frequency: Vec<u32>) -> Self {
        let frequency = if frequency.is_empty() {
            DEFAULT_FREQUENCY.to_vec()
        } else {
            frequency
        };
        Self {
            frequency,
            last_key_code: None,
            first_down_ms: 0,
            skipped: 0,
            accelerating: false,
            canceled: false,
        }
    }

    /// Admit or suppress a key event.
    ///
    /// `callback` is invoked exactly when the event should be delivered
    /// downstream. Returns `true` when the event was consumed (suppressed) —
    /// the caller should then prevent any default handling — and `false` when
    /// it was delivered.
    ///
    /// - A key-down with a *different* code than the tracked one starts a new
    ///   sequence and is delivered immediately.
    /// - A key-down with the same code is suppressed while canceled; otherwise
    ///   it is admitted once per `frequency[seconds_held]` events.
    /// - A key-up resets the sequence and is always delivered.
    pub fn process_key(&mut self, event: &KeyInput, callback: impl FnOnce(&KeyInput)) -> bool {
        match event.state {
            KeyState::Up => {
                self.reset();
                callback(event);
                false
            }
            KeyState::Down if self.last_key_code != Some(event.code) => {
                self.reset();
                self.last_key_code = Some(event.code);
                self.first_down_ms = event.time_ms;
                callback(event);
                false
            }
            KeyState::Down if self.canceled => true,
            KeyState::Down => {
                let elapsed_s = (event.time_ms.saturating_sub(self.first_down_ms) / 1000) as usize;
                let index = elapsed_s.min(self.frequency.len() - 1);
                let to_skip = self.frequency[index].saturating_sub(1);

                self.accelerating = !(elapsed_s == 0 && self.skipped == 0);

                if self.skipped >= to_skip {
                    self.skipped = 0;
                    callback(event);
                    false
                } else {
                    self.skipped += 1;
                    true
                }
            }
        }
    }

    /// Clear all sequence state, including a pending cancel.
    pub fn reset(&mut self) {
        self.last_key_code = None;
        self.first_down_ms = 0;
        self.skipped = 0;
        self.accelerating = false;
        self.canceled = false;
    }

    /// Suppress further same-key key-downs until the key changes or is
    /// released. Idempotent.
    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    /// Whether the current sequence is past its first admitted event.
    pub fn is_accelerating(&self) -> bool {
        self.accelerating
    }
}

impl Default for Accelerator {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
