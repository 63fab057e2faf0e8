use cgmath::{Matrix4, SquareMatrix};
use winit::{event::DeviceEvent, event::ElementState, keyboard::KeyCode};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

/// Camera plus the controller that feeds it input
#[derive(Debug)]
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn process_event(&mut self, event: &DeviceEvent) {
        self.controller.process_events(event, &mut self.camera);
    }

    pub fn process_keyboard_event(&mut self, key: KeyCode, state: ElementState) -> bool {
        self.controller.process_key(key, state)
    }

    /// Applies held movement keys for this frame and refreshes the uniform
    pub fn update(&mut self, delta_time: f32) {
        self.controller.update_camera(&mut self.camera, delta_time);
        self.camera.update_view_proj();
    }

    /// Get the view projection matrix from the camera
    pub fn get_view_proj_matrix(&self) -> cgmath::Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

impl Default for CameraManager {
    fn default() -> Self {
        Self::new(OrbitCamera::default(), CameraController::default())
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

/// Column-major copy of a matrix, `result[column][row]`
pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
