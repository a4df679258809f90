//! minvio-input: keyboard and mouse state for immediate-mode render loops.
//!
//! [`InputLatch`] holds the current and previous key snapshots, the pointer
//! position and the held mouse buttons. [`InputDispatcher`] feeds it from
//! winit window events.

mod keyboard;
mod latch;
mod mouse;

use std::sync::Arc;

use tracing::trace;
use winit::event::{ElementState, WindowEvent};

pub use keyboard::{keycodes, map_keyboard_input, map_virtual_keycode, KEY_SLOTS};
pub use latch::{InputLatch, KeyStates};
pub use mouse::{button_id, MouseButtons, BUTTON_LEFT, BUTTON_MIDDLE, BUTTON_RIGHT, BUTTON_SLOTS};

/// Maps window (physical pixel) coordinates to surface coordinates.
/// Defaults to identity mapping (truncated to i32).
pub type CoordMapper = Box<dyn Fn(f64, f64) -> (i32, i32) + Send + Sync>;

/// Routes window events into an [`InputLatch`].
pub struct InputDispatcher {
    latch: Arc<InputLatch>,
    coord_mapper: CoordMapper,
}

impl InputDispatcher {
    /// Create a dispatcher writing into `latch` with identity coordinate mapping.
    pub fn new(latch: Arc<InputLatch>) -> Self {
        Self {
            latch,
            coord_mapper: Box::new(|x, y| (x as i32, y as i32)),
        }
    }

    /// Override coordinate mapper (e.g. to undo HiDPI scaling).
    pub fn set_coord_mapper<F>(&mut self, f: F)
    where
        F: Fn(f64, f64) -> (i32, i32) + Send + Sync + 'static,
    {
        self.coord_mapper = Box::new(f);
    }

    /// The latch this dispatcher writes into.
    pub fn latch(&self) -> &Arc<InputLatch> {
        &self.latch
    }

    /// Apply a winit WindowEvent to the latch. Returns whether the event
    /// carried input the latch records.
    pub fn handle_window_event(&mut self, event: &WindowEvent<'_>) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (self.coord_mapper)(position.x, position.y);
                self.latch.mouse_moved(x, y);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(id) = button_id(*button) else {
                    trace!("Ignoring {:?} mouse button", button);
                    return false;
                };
                match state {
                    ElementState::Pressed => self.latch.button_pressed(id),
                    ElementState::Released => self.latch.button_released(id),
                }
            }
            WindowEvent::KeyboardInput { input, .. } => match map_keyboard_input(input) {
                Some((code, true)) => {
                    self.latch.key_down(code);
                    true
                }
                Some((code, false)) => {
                    self.latch.key_up(code);
                    true
                }
                None => false,
            },
            // Typed characters carry no key state.
            WindowEvent::ReceivedCharacter(_) => false,
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, KeyboardInput, ModifiersState, MouseButton, VirtualKeyCode};

    fn device() -> DeviceId {
        unsafe { DeviceId::dummy() }
    }

    fn key(vk: VirtualKeyCode, state: ElementState) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            device_id: device(),
            input: KeyboardInput {
                scancode: 0,
                state,
                virtual_keycode: Some(vk),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        }
    }

    fn mouse(button: MouseButton, state: ElementState) -> WindowEvent<'static> {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button,
            modifiers: ModifiersState::empty(),
        }
    }

    #[test]
    fn test_mouse_move_updates_position() {
        let mut d = InputDispatcher::new(Arc::new(InputLatch::new()));
        assert!(d.handle_window_event(&WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(100.0, 200.0),
            modifiers: ModifiersState::empty(),
        }));
        assert_eq!(d.latch().mouse_position(), (100, 200));
    }

    #[test]
    fn test_coord_mapper_applies() {
        let mut d = InputDispatcher::new(Arc::new(InputLatch::new()));
        d.set_coord_mapper(|x, y| ((x / 2.0) as i32, (y / 2.0) as i32));
        d.handle_window_event(&WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(50.0, 31.0),
            modifiers: ModifiersState::empty(),
        });
        assert_eq!(d.latch().mouse_position(), (25, 15));
    }

    #[test]
    fn test_left_button_press_release() {
        let mut d = InputDispatcher::new(Arc::new(InputLatch::new()));
        assert!(d.handle_window_event(&mouse(MouseButton::Left, ElementState::Pressed)));
        assert!(d.latch().mouse_button(1));
        assert!(d.handle_window_event(&mouse(MouseButton::Left, ElementState::Released)));
        assert!(!d.latch().mouse_button(1));
    }

    #[test]
    fn test_extra_buttons_ignored() {
        let mut d = InputDispatcher::new(Arc::new(InputLatch::new()));
        assert!(!d.handle_window_event(&mouse(MouseButton::Other(0), ElementState::Pressed)));
        assert_eq!(d.latch().buttons(), MouseButtons::empty());
    }

    #[test]
    fn test_keyboard_events() {
        let mut d = InputDispatcher::new(Arc::new(InputLatch::new()));
        d.handle_window_event(&key(VirtualKeyCode::Space, ElementState::Pressed));
        assert!(d.latch().is_key_down(keycodes::KEY_SPACE));
        d.handle_window_event(&key(VirtualKeyCode::Space, ElementState::Released));
        assert!(!d.latch().is_key_down(keycodes::KEY_SPACE));
        assert!(!d.handle_window_event(&key(VirtualKeyCode::Mute, ElementState::Pressed)));
    }
}
