use bitflags::bitflags;
use winit::event::MouseButton;

/// Number of button slots. Slot 0 is reserved so that slot numbers match the
/// 1-based button ids of the windowing system.
pub const BUTTON_SLOTS: usize = 4;

pub const BUTTON_LEFT: u16 = 1;
pub const BUTTON_MIDDLE: u16 = 2;
pub const BUTTON_RIGHT: u16 = 3;

bitflags! {
    /// Held mouse buttons. Bit `n` is button slot `n`; bit 0 is never set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT   = 1 << 1; // Button 1
        const MIDDLE = 1 << 2; // Button 2
        const RIGHT  = 1 << 3; // Button 3
    }
}

impl MouseButtons {
    /// Flag for a 1-based button id, `None` for ids without a slot.
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            BUTTON_LEFT => Some(Self::LEFT),
            BUTTON_MIDDLE => Some(Self::MIDDLE),
            BUTTON_RIGHT => Some(Self::RIGHT),
            _ => None,
        }
    }

    /// Whether the button in `slot` is held.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= BUTTON_SLOTS`.
    pub fn slot(self, slot: usize) -> bool {
        assert!(
            slot < BUTTON_SLOTS,
            "mouse button slot {} out of range (0..{})",
            slot,
            BUTTON_SLOTS
        );
        self.bits() & (1 << slot) != 0
    }
}

/// Map a winit button to its 1-based id. Extra buttons have no id.
pub fn button_id(button: MouseButton) -> Option<u16> {
    match button {
        MouseButton::Left => Some(BUTTON_LEFT),
        MouseButton::Middle => Some(BUTTON_MIDDLE),
        MouseButton::Right => Some(BUTTON_RIGHT),
        MouseButton::Other(_) => None,
    }
}
