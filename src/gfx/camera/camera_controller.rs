use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

use super::orbit_camera::{CameraMovement, OrbitCamera};

/// Turns absolute cursor positions into look deltas.
///
/// The first sample only records the position, so the camera does not jump
/// when the cursor is first captured. The vertical delta is inverted because
/// window coordinates grow downwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delta(&mut self, x: f64, y: f64) -> (f32, f32) {
        let delta = match self.last {
            Some((last_x, last_y)) => ((x - last_x) as f32, (last_y - y) as f32),
            None => (0.0, 0.0),
        };
        self.last = Some((x, y));
        delta
    }

    /// Forget the last position, e.g. after the cursor was released
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Maps raw input onto [`OrbitCamera`] operations.
///
/// Movement keys are level-triggered: the controller remembers which are held
/// and [`update_camera`](CameraController::update_camera) moves the camera for
/// each of them once per frame.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Multiplier applied to mouse deltas before the camera's own sensitivity
    pub look_speed: f32,
    /// Multiplier applied to scroll deltas
    pub zoom_speed: f32,
    cursor: CursorTracker,
    is_forward_pressed: bool,
    is_backward_pressed: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl CameraController {
    pub fn new(look_speed: f32, zoom_speed: f32) -> Self {
        Self {
            look_speed,
            zoom_speed,
            cursor: CursorTracker::new(),
            is_forward_pressed: false,
            is_backward_pressed: false,
            is_left_pressed: false,
            is_right_pressed: false,
        }
    }

    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.zoom(scroll_amount * self.zoom_speed);
            }
            DeviceEvent::MouseMotion { delta } => {
                // Raw motion is reported with y growing downwards
                camera.look(
                    delta.0 as f32 * self.look_speed,
                    -delta.1 as f32 * self.look_speed,
                );
            }
            _ => (),
        }
    }

    /// Feeds an absolute cursor position (window event) to the camera
    pub fn process_cursor_moved(&mut self, x: f64, y: f64, camera: &mut OrbitCamera) {
        let (dx, dy) = self.cursor.delta(x, y);
        if dx != 0.0 || dy != 0.0 {
            camera.look(dx * self.look_speed, dy * self.look_speed);
        }
    }

    /// Records movement key state, returns whether the key is a movement key
    pub fn process_key(&mut self, key: KeyCode, state: ElementState) -> bool {
        let is_pressed = state == ElementState::Pressed;
        match key {
            KeyCode::KeyW => self.is_forward_pressed = is_pressed,
            KeyCode::KeyS => self.is_backward_pressed = is_pressed,
            KeyCode::KeyA => self.is_left_pressed = is_pressed,
            KeyCode::KeyD => self.is_right_pressed = is_pressed,
            _ => return false,
        }
        true
    }

    /// Moves the camera for every held movement key
    pub fn update_camera(&self, camera: &mut OrbitCamera, delta_time: f32) {
        let held = [
            (self.is_forward_pressed, CameraMovement::Forward),
            (self.is_backward_pressed, CameraMovement::Backward),
            (self.is_left_pressed, CameraMovement::Left),
            (self.is_right_pressed, CameraMovement::Right),
        ];
        for (pressed, direction) in held {
            if pressed {
                camera.move_in(direction, delta_time);
            }
        }
    }

    /// Returns true if any movement key is held
    pub fn is_moving(&self) -> bool {
        self.is_forward_pressed
            || self.is_backward_pressed
            || self.is_left_pressed
            || self.is_right_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_cursor_sample_has_no_delta() {
        let mut tracker = CursorTracker::new();
        assert_eq!(tracker.delta(400.0, 300.0), (0.0, 0.0));
        assert_eq!(tracker.delta(410.0, 290.0), (10.0, 10.0));

        tracker.reset();
        assert_eq!(tracker.delta(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_held_keys_move_every_frame() {
        let mut controller = CameraController::default();
        let mut camera = OrbitCamera::default();

        controller.process_key(KeyCode::KeyW, ElementState::Pressed);
        controller.update_camera(&mut camera, 0.2);
        controller.update_camera(&mut camera, 0.2);
        assert!((camera.position().z - 2.0).abs() < 1e-5);

        controller.process_key(KeyCode::KeyW, ElementState::Released);
        assert!(!controller.is_moving());
        controller.update_camera(&mut camera, 0.2);
        assert!((camera.position().z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut controller = CameraController::default();
        let mut camera = OrbitCamera::default();
        controller.process_key(KeyCode::KeyA, ElementState::Pressed);
        controller.process_key(KeyCode::KeyD, ElementState::Pressed);
        controller.update_camera(&mut camera, 1.0);
        assert!(camera.position().x.abs() < 1e-5);
    }

    #[test]
    fn test_non_movement_keys_are_not_consumed() {
        let mut controller = CameraController::default();
        assert!(!controller.process_key(KeyCode::KeyP, ElementState::Pressed));
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_device_events_drive_look_and_zoom() {
        let mut controller = CameraController::default();
        let mut camera = OrbitCamera::default();

        controller.process_events(&DeviceEvent::MouseMotion { delta: (0.0, -100.0) }, &mut camera);
        assert!((camera.pitch() - 10.0).abs() < 1e-4);

        controller.process_events(
            &DeviceEvent::MouseWheel {
                delta: MouseScrollDelta::LineDelta(0.0, 5.0),
            },
            &mut camera,
        );
        assert_eq!(camera.fov(), 40.0);
    }

    #[test]
    fn test_cursor_moves_look_up() {
        let mut controller = CameraController::default();
        let mut camera = OrbitCamera::default();
        controller.process_cursor_moved(400.0, 400.0, &mut camera);
        controller.process_cursor_moved(400.0, 350.0, &mut camera);
        assert!((camera.pitch() - 5.0).abs() < 1e-4);
    }
}
