use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// The four canonical movement directions, relative to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Tunables of the camera. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// World units per second
    pub movement_speed: f32,
    /// Degrees per unit of mouse delta
    pub mouse_sensitivity: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    /// Pitch is kept within `[-pitch_limit, pitch_limit]`
    pub pitch_limit: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            min_fov: 1.0,
            max_fov: 45.0,
            pitch_limit: MAX_PITCH_LIMIT,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

/// Largest pitch the camera may reach, short of looking straight up
pub const MAX_PITCH_LIMIT: f32 = 89.0;

/// Field of view bounds a perspective projection accepts, in degrees
const FOV_RANGE: (f32, f32) = (0.1, 179.0);

impl CameraSettings {
    /// Returns settings every camera operation can use without panicking.
    ///
    /// Non-finite values fall back to the defaults, the field of view bounds
    /// are ordered and kept inside `(0, 180)`, `pitch_limit` is kept within
    /// `[0, 89]` and the far plane is kept beyond a positive near plane.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };

        let fov_a = finite(self.min_fov, defaults.min_fov).clamp(FOV_RANGE.0, FOV_RANGE.1);
        let fov_b = finite(self.max_fov, defaults.max_fov).clamp(FOV_RANGE.0, FOV_RANGE.1);

        let znear = match finite(self.znear, defaults.znear) {
            near if near > 0.0 => near,
            _ => defaults.znear,
        };
        let zfar = match finite(self.zfar, defaults.zfar) {
            far if far > znear * 1.001 => far,
            _ => znear + defaults.zfar,
        };

        Self {
            movement_speed: finite(self.movement_speed, defaults.movement_speed),
            mouse_sensitivity: finite(self.mouse_sensitivity, defaults.mouse_sensitivity),
            min_fov: fov_a.min(fov_b),
            max_fov: fov_a.max(fov_b),
            pitch_limit: finite(self.pitch_limit, defaults.pitch_limit).clamp(0.0, MAX_PITCH_LIMIT),
            znear,
            zfar,
        }
    }
}

/// Free-look camera driven by movement keys, mouse deltas and scroll.
///
/// `front`, `right` and `up` are derived from `yaw` and `pitch` and only
/// recomputed by [`OrbitCamera::look`], so the mutators are limited to
/// [`move_in`](OrbitCamera::move_in), [`look`](OrbitCamera::look) and
/// [`zoom`](OrbitCamera::zoom).
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    position: Vector3<f32>,
    front: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    fov: f32,
    pub aspect: f32,
    settings: CameraSettings,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection_matrix(self.aspect) * self.view_matrix()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 3.0), Vector3::unit_y(), -90.0, 0.0)
    }
}

impl OrbitCamera {
    pub fn new(position: Vector3<f32>, world_up: Vector3<f32>, yaw: f32, pitch: f32) -> Self {
        Self::with_settings(position, world_up, yaw, pitch, CameraSettings::default())
    }

    pub fn with_settings(
        position: Vector3<f32>,
        world_up: Vector3<f32>,
        yaw: f32,
        pitch: f32,
        settings: CameraSettings,
    ) -> Self {
        let settings = settings.sanitized();
        let pitch = if pitch.is_finite() { pitch } else { 0.0 };
        let yaw = if yaw.is_finite() { yaw } else { -90.0 };
        let mut camera = Self {
            position,
            front: -Vector3::unit_z(),
            right: Vector3::unit_x(),
            up: world_up,
            world_up,
            yaw,
            pitch: pitch.clamp(-settings.pitch_limit, settings.pitch_limit),
            fov: settings.max_fov,
            aspect: 1.0,
            settings,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Translates along `front`/`right`, scaled by `delta_time` so the speed
    /// does not depend on the frame rate.
    pub fn move_in(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.settings.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Applies raw mouse deltas. Pitch is clamped before the basis is rebuilt
    /// so `front` never flips over the vertical axis.
    pub fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if !delta_yaw.is_finite() || !delta_pitch.is_finite() {
            return;
        }
        let sensitivity = self.settings.mouse_sensitivity;
        let limit = self.settings.pitch_limit;

        self.yaw += delta_yaw * sensitivity;
        self.pitch = (self.pitch + delta_pitch * sensitivity).clamp(-limit, limit);
        self.update();
    }

    /// Narrows the field of view for positive scroll, widens it for negative.
    pub fn zoom(&mut self, delta_scroll: f32) {
        if !delta_scroll.is_finite() {
            return;
        }
        self.fov = (self.fov - delta_scroll).clamp(self.settings.min_fov, self.settings.max_fov);
    }

    /// Right-handed look-at from `position` towards `position + front`.
    /// Column-major, as OpenGL-style renderers expect.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let target = Point3::from_vec(self.position + self.front);
        Matrix4::look_at_rh(eye, target, self.up)
    }

    /// OpenGL-style perspective projection using the current field of view.
    /// A zero or non-finite `aspect` is treated as square.
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        perspective(
            Deg(self.fov),
            aspect,
            self.settings.znear,
            self.settings.zfar,
        )
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Replaces the settings, sanitized, and pulls pitch and field of view
    /// back inside the new bounds.
    pub fn set_settings(&mut self, settings: CameraSettings) {
        self.settings = settings.sanitized();
        let limit = self.settings.pitch_limit;
        self.pitch = self.pitch.clamp(-limit, limit);
        self.fov = self.fov.clamp(self.settings.min_fov, self.settings.max_fov);
        self.update();
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Rebuilds the orthonormal basis from yaw and pitch.
    fn update(&mut self) {
        let (yaw, pitch) = (Deg(self.yaw), Deg(self.pitch));
        let front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Ignores zero-sized (minimized) windows.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.position.x, self.position.y, self.position.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}
