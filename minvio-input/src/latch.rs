//! Frame-synchronized input latch.
//!
//! Raw events write the *current* state as soon as they arrive, from whatever
//! thread the windowing layer delivers them on. The *previous* key snapshot
//! only moves when the render loop calls [`InputLatch::tick`], so the loop can
//! compare the two to find keys pressed or released this frame:
//!
//! ```
//! use minvio_input::{keycodes::KEY_SPACE, InputLatch};
//!
//! let latch = InputLatch::new();
//! latch.key_down(KEY_SPACE);
//!
//! let (now, before) = (latch.current_keys(), latch.previous_keys());
//! assert!(now[KEY_SPACE] && !before[KEY_SPACE]); // just pressed
//!
//! latch.tick();
//! assert!(latch.current_keys()[KEY_SPACE] && latch.previous_keys()[KEY_SPACE]); // held
//! ```

use std::fmt;
use std::ops::Index;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::keyboard::KEY_SLOTS;
use crate::mouse::{MouseButtons, BUTTON_SLOTS};

fn check_key(code: usize) {
    assert!(
        code < KEY_SLOTS,
        "key code {} out of range (0..{})",
        code,
        KEY_SLOTS
    );
}

/// A snapshot of which key codes are held, indexable by key code.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyStates {
    keys: Box<[bool; KEY_SLOTS]>,
}

impl KeyStates {
    /// All keys released.
    pub fn new() -> Self {
        Self {
            keys: Box::new([false; KEY_SLOTS]),
        }
    }

    /// Whether `code` is held.
    ///
    /// # Panics
    ///
    /// Panics if `code >= KEY_SLOTS`.
    pub fn is_down(&self, code: usize) -> bool {
        check_key(code);
        self.keys[code]
    }

    /// Codes of every held key, ascending.
    pub fn pressed(&self) -> impl Iterator<Item = usize> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter_map(|(code, &down)| down.then_some(code))
    }
}

impl Default for KeyStates {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for KeyStates {
    type Output = bool;

    fn index(&self, code: usize) -> &bool {
        check_key(code);
        &self.keys[code]
    }
}

impl fmt::Debug for KeyStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.pressed()).finish()
    }
}

/// Current/previous keyboard snapshots plus mouse position and buttons.
///
/// Shared between the event producer and the render loop, typically behind an
/// `Arc`. Writers never block readers for longer than a single flag update;
/// only [`tick`](Self::tick) and [`previous_keys`](Self::previous_keys) take
/// a lock.
pub struct InputLatch {
    current: Box<[AtomicBool]>,
    previous: Mutex<KeyStates>,
    mouse_x: AtomicI32,
    mouse_y: AtomicI32,
    buttons: AtomicU8,
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl InputLatch {
    /// A latch with every key and button released and the mouse at (0, 0).
    pub fn new() -> Self {
        Self {
            current: (0..KEY_SLOTS).map(|_| AtomicBool::new(false)).collect(),
            previous: Mutex::new(KeyStates::new()),
            mouse_x: AtomicI32::new(0),
            mouse_y: AtomicI32::new(0),
            buttons: AtomicU8::new(0),
        }
    }

    /// Record a key press.
    ///
    /// # Panics
    ///
    /// Panics if `code >= KEY_SLOTS`.
    pub fn key_down(&self, code: usize) {
        check_key(code);
        trace!("key {} down", code);
        self.current[code].store(true, Ordering::Relaxed);
    }

    /// Record a key release.
    ///
    /// # Panics
    ///
    /// Panics if `code >= KEY_SLOTS`.
    pub fn key_up(&self, code: usize) {
        check_key(code);
        trace!("key {} up", code);
        self.current[code].store(false, Ordering::Relaxed);
    }

    /// Record the pointer position. Coordinates may lie outside the surface
    /// while a button is held.
    pub fn mouse_moved(&self, x: i32, y: i32) {
        self.mouse_x.store(x, Ordering::Relaxed);
        self.mouse_y.store(y, Ordering::Relaxed);
    }

    /// Record a press of the 1-based button `id`. Ids without a slot (0 and
    /// anything above 3) are ignored; returns whether the press was recorded.
    pub fn button_pressed(&self, id: u16) -> bool {
        match MouseButtons::from_id(id) {
            Some(flag) => {
                self.buttons.fetch_or(flag.bits(), Ordering::Relaxed);
                true
            }
            None => {
                trace!("ignoring press of button {}", id);
                false
            }
        }
    }

    /// Record a release of the 1-based button `id`. Same rules as
    /// [`button_pressed`](Self::button_pressed).
    pub fn button_released(&self, id: u16) -> bool {
        match MouseButtons::from_id(id) {
            Some(flag) => {
                self.buttons.fetch_and(!flag.bits(), Ordering::Relaxed);
                true
            }
            None => {
                trace!("ignoring release of button {}", id);
                false
            }
        }
    }

    /// Copy the current key state into the previous snapshot.
    ///
    /// This is the only operation that changes the previous snapshot. Calling
    /// it again with no key events in between changes nothing.
    pub fn tick(&self) {
        let mut previous = self.previous.lock();
        for (slot, flag) in previous.keys.iter_mut().zip(self.current.iter()) {
            *slot = flag.load(Ordering::Relaxed);
        }
    }

    /// Snapshot of the keys held right now.
    pub fn current_keys(&self) -> KeyStates {
        let mut states = KeyStates::new();
        for (slot, flag) in states.keys.iter_mut().zip(self.current.iter()) {
            *slot = flag.load(Ordering::Relaxed);
        }
        states
    }

    /// Snapshot of the keys held as of the last [`tick`](Self::tick).
    pub fn previous_keys(&self) -> KeyStates {
        self.previous.lock().clone()
    }

    /// Whether `code` is held right now.
    ///
    /// # Panics
    ///
    /// Panics if `code >= KEY_SLOTS`.
    pub fn is_key_down(&self, code: usize) -> bool {
        check_key(code);
        self.current[code].load(Ordering::Relaxed)
    }

    /// Whether `code` was held at the last tick.
    ///
    /// # Panics
    ///
    /// Panics if `code >= KEY_SLOTS`.
    pub fn was_key_down(&self, code: usize) -> bool {
        self.previous.lock().is_down(code)
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        (
            self.mouse_x.load(Ordering::Relaxed),
            self.mouse_y.load(Ordering::Relaxed),
        )
    }

    /// Buttons held right now.
    pub fn buttons(&self) -> MouseButtons {
        MouseButtons::from_bits_truncate(self.buttons.load(Ordering::Relaxed))
    }

    /// Whether the button in `slot` is held; slot 0 is always `false`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= BUTTON_SLOTS`.
    pub fn mouse_button(&self, slot: usize) -> bool {
        self.buttons().slot(slot)
    }
}

impl fmt::Debug for InputLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputLatch")
            .field("current", &self.current_keys())
            .field("previous", &self.previous_keys())
            .field("mouse", &self.mouse_position())
            .field("buttons", &self.buttons())
            .finish()
    }
}

// Button slots are bits of a u8.
const _: () = assert!(BUTTON_SLOTS <= 8);
