use instant::Duration;
use winit::{
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::{CameraState, Movement};

/// Pixels of touchpad scrolling that count as one wheel line.
pub const SCROLL_PIXELS_PER_LINE: f64 = 20.0;

/// Feeds winit window events into a [`CameraState`].
///
/// Cursor and scroll samples turn and zoom the camera right away. Movement keys
/// only record whether they are held; [`CameraController::update`] applies them
/// once per frame so walking speed does not depend on key repeat.
#[derive(Debug, Default, Clone)]
pub struct CameraController {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the key is one of the movement keys.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => self.forward = pressed,
            KeyCode::KeyS | KeyCode::ArrowDown => self.backward = pressed,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.left = pressed,
            KeyCode::KeyD | KeyCode::ArrowRight => self.right = pressed,
            _ => return false,
        }
        true
    }

    pub fn is_moving(&self, movement: Movement) -> bool {
        match movement {
            Movement::Forward => self.forward,
            Movement::Backward => self.backward,
            Movement::Left => self.left,
            Movement::Right => self.right,
        }
    }

    /// Returns `true` if the event was consumed by the camera.
    ///
    /// Escape and close requests are left to the caller, which decides when to exit.
    pub fn handle_window_events(&mut self, camera: &mut CameraState, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => self.process_keyboard(*key, *state),
            WindowEvent::CursorMoved { position, .. } => {
                camera.on_cursor_moved(position.x, position.y);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                camera.on_scroll(scroll_lines(delta));
                true
            }
            WindowEvent::Focused(false) => {
                // keys released while unfocused never reach us
                *self = Self::default();
                false
            }
            _ => false,
        }
    }

    /// Applies every held movement key for the frame time `dt`.
    pub fn update(&self, camera: &mut CameraState, dt: Duration) {
        let dt = dt.as_secs_f32();
        for movement in [
            Movement::Forward,
            Movement::Backward,
            Movement::Left,
            Movement::Right,
        ] {
            if self.is_moving(movement) {
                camera.translate(movement, dt);
            }
        }
    }
}

pub fn scroll_lines(delta: &MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => *y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y / SCROLL_PIXELS_PER_LINE,
    }
}
