use tracing::trace;
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

/// Number of key-code slots tracked by the latch. Every code produced by
/// [`map_virtual_keycode`] is below this.
pub const KEY_SLOTS: usize = 1000;

/// Integer key codes.
///
/// The numbering follows the classic desktop virtual-key table (letters and
/// digits are their upper-case ASCII values, arrows are 37..=40, and so on),
/// so code written against that table indexes the latch unchanged.
pub mod keycodes {
    pub const KEY_BACK_SPACE: usize = 8;
    pub const KEY_TAB: usize = 9;
    pub const KEY_ENTER: usize = 10;
    pub const KEY_SHIFT: usize = 16;
    pub const KEY_CONTROL: usize = 17;
    pub const KEY_ALT: usize = 18;
    pub const KEY_PAUSE: usize = 19;
    pub const KEY_CAPS_LOCK: usize = 20;
    pub const KEY_ESCAPE: usize = 27;
    pub const KEY_SPACE: usize = 32;
    pub const KEY_PAGE_UP: usize = 33;
    pub const KEY_PAGE_DOWN: usize = 34;
    pub const KEY_END: usize = 35;
    pub const KEY_HOME: usize = 36;
    pub const KEY_LEFT: usize = 37;
    pub const KEY_UP: usize = 38;
    pub const KEY_RIGHT: usize = 39;
    pub const KEY_DOWN: usize = 40;
    pub const KEY_COMMA: usize = 44;
    pub const KEY_MINUS: usize = 45;
    pub const KEY_PERIOD: usize = 46;
    pub const KEY_SLASH: usize = 47;
    /// `'0'`; digits 1-9 follow consecutively.
    pub const KEY_0: usize = 48;
    pub const KEY_SEMICOLON: usize = 59;
    pub const KEY_EQUALS: usize = 61;
    /// `'A'`; letters B-Z follow consecutively.
    pub const KEY_A: usize = 65;
    pub const KEY_OPEN_BRACKET: usize = 91;
    pub const KEY_BACK_SLASH: usize = 92;
    pub const KEY_CLOSE_BRACKET: usize = 93;
    /// Numpad 0; numpad 1-9 follow consecutively.
    pub const KEY_NUMPAD0: usize = 96;
    pub const KEY_MULTIPLY: usize = 106;
    pub const KEY_ADD: usize = 107;
    pub const KEY_SUBTRACT: usize = 109;
    pub const KEY_DECIMAL: usize = 110;
    pub const KEY_DIVIDE: usize = 111;
    /// F1; F2-F12 follow consecutively.
    pub const KEY_F1: usize = 112;
    pub const KEY_DELETE: usize = 127;
    pub const KEY_NUM_LOCK: usize = 144;
    pub const KEY_SCROLL_LOCK: usize = 145;
    pub const KEY_PRINT_SCREEN: usize = 154;
    pub const KEY_INSERT: usize = 155;
    pub const KEY_BACK_QUOTE: usize = 192;
    pub const KEY_QUOTE: usize = 222;
    pub const KEY_WINDOWS: usize = 524;
    pub const KEY_CONTEXT_MENU: usize = 525;

    /// Code for an ASCII letter or digit, case-insensitive.
    pub const fn ascii(c: char) -> usize {
        c.to_ascii_uppercase() as usize
    }
}
use keycodes::*;

/// Map a winit KeyboardInput to (key code, down?) for the latch.
pub fn map_keyboard_input(input: &KeyboardInput) -> Option<(usize, bool)> {
    let down = matches!(input.state, ElementState::Pressed);
    let vk = input.virtual_keycode?;
    let code = map_virtual_keycode(vk);
    if code.is_none() {
        trace!("No key code for {:?}", vk);
    }
    Some((code?, down))
}

/// Map a winit VirtualKeyCode to its key code, `None` for keys without one.
pub fn map_virtual_keycode(vk: VirtualKeyCode) -> Option<usize> {
    use VirtualKeyCode as VK;

    let letters = [
        VK::A, VK::B, VK::C, VK::D, VK::E, VK::F, VK::G, VK::H, VK::I, VK::J, VK::K, VK::L, VK::M,
        VK::N, VK::O, VK::P, VK::Q, VK::R, VK::S, VK::T, VK::U, VK::V, VK::W, VK::X, VK::Y, VK::Z,
    ];
    let digits = [
        VK::Key0, VK::Key1, VK::Key2, VK::Key3, VK::Key4, VK::Key5, VK::Key6, VK::Key7, VK::Key8,
        VK::Key9,
    ];
    let numpad = [
        VK::Numpad0, VK::Numpad1, VK::Numpad2, VK::Numpad3, VK::Numpad4, VK::Numpad5,
        VK::Numpad6, VK::Numpad7, VK::Numpad8, VK::Numpad9,
    ];
    let function = [
        VK::F1, VK::F2, VK::F3, VK::F4, VK::F5, VK::F6, VK::F7, VK::F8, VK::F9, VK::F10, VK::F11,
        VK::F12,
    ];

    if let Some(i) = letters.iter().position(|&k| k == vk) {
        return Some(KEY_A + i);
    }
    if let Some(i) = digits.iter().position(|&k| k == vk) {
        return Some(KEY_0 + i);
    }
    if let Some(i) = numpad.iter().position(|&k| k == vk) {
        return Some(KEY_NUMPAD0 + i);
    }
    if let Some(i) = function.iter().position(|&k| k == vk) {
        return Some(KEY_F1 + i);
    }

    let code = match vk {
        // Whitespace and editing
        VK::Space => KEY_SPACE,
        VK::Return | VK::NumpadEnter => KEY_ENTER,
        VK::Escape => KEY_ESCAPE,
        VK::Back => KEY_BACK_SPACE,
        VK::Tab => KEY_TAB,
        VK::Delete => KEY_DELETE,
        VK::Insert => KEY_INSERT,
        VK::Home => KEY_HOME,
        VK::End => KEY_END,
        VK::PageUp => KEY_PAGE_UP,
        VK::PageDown => KEY_PAGE_DOWN,

        // Arrows
        VK::Left => KEY_LEFT,
        VK::Up => KEY_UP,
        VK::Right => KEY_RIGHT,
        VK::Down => KEY_DOWN,

        // Modifiers: left and right share a code
        VK::LShift | VK::RShift => KEY_SHIFT,
        VK::LControl | VK::RControl => KEY_CONTROL,
        VK::LAlt | VK::RAlt => KEY_ALT,
        VK::LWin | VK::RWin => KEY_WINDOWS,
        VK::Apps => KEY_CONTEXT_MENU,

        // Locks and system keys
        VK::Capital => KEY_CAPS_LOCK,
        VK::Numlock => KEY_NUM_LOCK,
        VK::Scroll => KEY_SCROLL_LOCK,
        VK::Snapshot => KEY_PRINT_SCREEN,
        VK::Pause => KEY_PAUSE,

        // Punctuation
        VK::Comma => KEY_COMMA,
        VK::Minus => KEY_MINUS,
        VK::Period => KEY_PERIOD,
        VK::Slash => KEY_SLASH,
        VK::Semicolon => KEY_SEMICOLON,
        VK::Equals => KEY_EQUALS,
        VK::LBracket => KEY_OPEN_BRACKET,
        VK::Backslash => KEY_BACK_SLASH,
        VK::RBracket => KEY_CLOSE_BRACKET,
        VK::Grave => KEY_BACK_QUOTE,
        VK::Apostrophe => KEY_QUOTE,

        // Keypad operators
        VK::NumpadMultiply => KEY_MULTIPLY,
        VK::NumpadAdd => KEY_ADD,
        VK::NumpadSubtract => KEY_SUBTRACT,
        VK::NumpadDecimal => KEY_DECIMAL,
        VK::NumpadDivide => KEY_DIVIDE,

        _ => return None,
    };
    Some(code)
}
