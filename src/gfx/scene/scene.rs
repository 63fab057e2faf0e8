use cgmath::{Deg, Matrix4, Vector3};
use log::{debug, info};
use winit::{event::ElementState, keyboard::KeyCode};

use crate::{
    gfx::{
        camera::camera_utils::CameraManager,
        geometry::generate_cube,
        resources::{lighting::LightRig, material::Material},
        scene::object::{Mesh, SceneObject},
    },
    input::{Axis, Debouncer, KeyBindings, SceneAction, DEFAULT_DEBOUNCE_INTERVAL},
};

/// Axis the objects spin around. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationAxis {
    #[default]
    None,
    X,
    Y,
    Z,
}

/// Tunables for object editing and animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    /// Minimum seconds between two triggers of a debounced action, read on
    /// every [`SceneContext::apply`]
    pub debounce_interval: f64,
    /// Distance moved by one nudge
    pub nudge_step: f32,
    /// Scale change per scale action
    pub scale_step: f32,
    pub min_scale: f32,
    /// Degrees per second around the active rotation axis
    pub rotation_speed: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL,
            nudge_step: 0.05,
            scale_step: 0.02,
            min_scale: 0.1,
            rotation_speed: 45.0,
        }
    }
}

/// Everything the frame loop owns and mutates between frames
pub struct SceneContext {
    pub camera_manager: CameraManager,
    pub objects: Vec<SceneObject>,
    /// Mesh drawn for every object
    pub mesh: Mesh,
    pub material: Material,
    pub lights: LightRig,
    pub selected: usize,
    pub rotation_axis: RotationAxis,
    /// Accumulated rotation in degrees
    pub rotation_angle: f32,
    pub scale: f32,
    pub show_trajectories: bool,
    pub settings: MotionSettings,
    pub bindings: KeyBindings,
    debouncer: Debouncer,
}

impl SceneContext {
    /// Creates an empty scene drawing `mesh` with `material`
    pub fn new(camera_manager: CameraManager, mesh: Mesh, material: Material) -> Self {
        Self::with_settings(camera_manager, mesh, material, MotionSettings::default())
    }

    pub fn with_settings(
        camera_manager: CameraManager,
        mesh: Mesh,
        material: Material,
        settings: MotionSettings,
    ) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            mesh,
            material,
            lights: LightRig::default(),
            selected: 0,
            rotation_axis: RotationAxis::None,
            rotation_angle: 0.0,
            scale: 1.0,
            show_trajectories: true,
            settings,
            bindings: KeyBindings::default(),
            debouncer: Debouncer::default(),
        }
    }

    /// Three cubes ready for waypoint authoring
    pub fn demo() -> Self {
        let mut scene = Self::new(
            CameraManager::default(),
            generate_cube().to_mesh(),
            Material::default(),
        );
        scene.seed_demo_objects();
        scene
    }

    /// Adds the three demo objects at their fixed start positions
    pub fn seed_demo_objects(&mut self) {
        for position in [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, -5.0),
            Vector3::new(-2.0, 1.0, -3.0),
        ] {
            self.add_object(SceneObject::new(position));
        }
    }

    /// Adds an object, returns its index
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.objects.get(self.selected)
    }

    pub fn selected_object_mut(&mut self) -> Option<&mut SceneObject> {
        self.objects.get_mut(self.selected)
    }

    /// Per-frame update of everything except object motion: camera movement
    /// from held keys, the spin around the active axis and the light rig
    /// following the selected object.
    pub fn update(&mut self, delta_time: f32) {
        self.camera_manager.update(delta_time);
        if let Some(position) = self.selected_object().map(|object| object.position) {
            self.lights.place_around(position, self.scale);
        }
        if self.rotation_axis != RotationAxis::None {
            self.rotation_angle =
                (self.rotation_angle + self.settings.rotation_speed * delta_time) % 360.0;
        }
    }

    /// Routes a key to the camera or to a scene action. `now` is the current
    /// time in seconds, used for debouncing.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState, now: f64) -> bool {
        if self.camera_manager.process_keyboard_event(key, state) {
            return true;
        }
        if state != ElementState::Pressed {
            return false;
        }
        match self.bindings.action_for(key) {
            Some(action) => self.apply(action, now),
            None => false,
        }
    }

    /// Applies a scene action, returns whether it had an effect.
    ///
    /// Authoring actions are dropped while inside their debounce window.
    pub fn apply(&mut self, action: SceneAction, now: f64) -> bool {
        let interval = self.settings.debounce_interval;
        if action.is_debounced() && !self.debouncer.try_trigger_within(action, now, interval) {
            return false;
        }

        match action {
            SceneAction::AddWaypoint => {
                let selected = self.selected;
                let Some(object) = self.selected_object_mut() else {
                    return false;
                };
                let point = object.add_waypoint_here();
                info!(
                    "Added waypoint at ({:.3}, {:.3}, {:.3}) for object {}",
                    point.x, point.y, point.z, selected
                );
            }
            SceneAction::ClearWaypoints => {
                let selected = self.selected;
                let Some(object) = self.selected_object_mut() else {
                    return false;
                };
                object.clear_waypoints();
                info!("Cleared waypoints for object {}", selected);
            }
            SceneAction::ToggleMotion => {
                let selected = self.selected;
                let Some(object) = self.selected_object_mut() else {
                    return false;
                };
                let moving = object.toggle_moving();
                info!(
                    "{} movement for object {}",
                    if moving { "Started" } else { "Stopped" },
                    selected
                );
            }
            SceneAction::ToggleTrajectories => {
                self.show_trajectories = !self.show_trajectories;
                info!(
                    "{} trajectories",
                    if self.show_trajectories { "Showing" } else { "Hiding" }
                );
            }
            SceneAction::SelectObject(index) => {
                if index >= self.objects.len() {
                    return false;
                }
                if self.selected != index {
                    self.selected = index;
                    info!("Selected object {}", index);
                }
            }
            SceneAction::SetRotation(axis) => {
                self.rotation_axis = axis;
                debug!("Rotation axis set to {:?}", axis);
            }
            SceneAction::Nudge(axis, direction) => {
                let step = self.settings.nudge_step * direction.sign();
                let Some(object) = self.selected_object_mut() else {
                    return false;
                };
                match axis {
                    Axis::X => object.position.x += step,
                    Axis::Y => object.position.y += step,
                    Axis::Z => object.position.z += step,
                }
            }
            SceneAction::Scale(direction) => {
                let scaled = self.scale + self.settings.scale_step * direction.sign();
                self.scale = scaled.max(self.settings.min_scale);
            }
            SceneAction::ToggleLight(slot) => {
                self.lights.toggle(slot);
            }
        }
        true
    }

    /// Model transform of an object: translate, then spin, then scale
    pub fn model_matrix(&self, index: usize) -> Option<Matrix4<f32>> {
        let object = self.objects.get(index)?;
        let angle = Deg(self.rotation_angle);
        let rotation = match self.rotation_axis {
            RotationAxis::None => Matrix4::from_scale(1.0),
            RotationAxis::X => Matrix4::from_angle_x(angle),
            RotationAxis::Y => Matrix4::from_angle_y(angle),
            RotationAxis::Z => Matrix4::from_angle_z(angle),
        };
        Some(Matrix4::from_translation(object.position) * rotation * Matrix4::from_scale(self.scale))
    }

    /// Trajectory overlays to draw this frame, one line strip per object
    pub fn trajectory_overlays(&self) -> Vec<Vec<Vector3<f32>>> {
        if !self.show_trajectories {
            return Vec::new();
        }
        self.objects
            .iter()
            .map(SceneObject::trajectory_polyline)
            .filter(|strip| !strip.is_empty())
            .collect()
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            moving_objects: self.objects.iter().filter(|o| o.is_moving).count(),
            total_waypoints: self.objects.iter().map(|o| o.waypoints.len()).sum(),
            mesh_triangles: self.mesh.triangle_count(),
        }
    }
}

/// Scene statistics for debugging and display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub moving_objects: usize,
    pub total_waypoints: usize,
    pub mesh_triangles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use cgmath::{InnerSpace, Vector4};

    #[test]
    fn test_demo_scene() {
        let scene = SceneContext::demo();
        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 3);
        assert_eq!(stats.mesh_triangles, 12);
        assert_eq!(scene.objects[1].position, Vector3::new(2.0, 0.0, -5.0));
    }

    #[test]
    fn test_authoring_is_debounced() {
        let mut scene = SceneContext::demo();
        assert!(scene.apply(SceneAction::AddWaypoint, 1.0));
        assert!(!scene.apply(SceneAction::AddWaypoint, 1.1));
        assert_eq!(scene.objects[0].waypoints.len(), 1);

        scene.apply(SceneAction::Nudge(Axis::X, Direction::Positive), 1.15);
        assert!(scene.apply(SceneAction::AddWaypoint, 1.3));
        assert_eq!(scene.objects[0].waypoints.len(), 2);
        assert!((scene.objects[0].waypoints[1].x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_debounce_follows_settings_changes() {
        let mut scene = SceneContext::demo();
        scene.settings.debounce_interval = 0.0;
        assert!(scene.apply(SceneAction::AddWaypoint, 1.0));
        assert!(scene.apply(SceneAction::AddWaypoint, 1.1));

        scene.settings.debounce_interval = 1.0;
        assert!(!scene.apply(SceneAction::AddWaypoint, 1.5));
        assert!(scene.apply(SceneAction::AddWaypoint, 2.2));
        assert_eq!(scene.objects[0].waypoints.len(), 3);
    }

    #[test]
    fn test_light_keys_and_rig_follow_selection() {
        let mut scene = SceneContext::demo();
        assert!(scene.handle_key(KeyCode::F1, ElementState::Pressed, 0.0));
        assert!(!scene.lights.key.enabled);
        assert!(!scene.handle_key(KeyCode::F1, ElementState::Pressed, 0.1));
        assert!(!scene.lights.key.enabled);

        scene.apply(SceneAction::SelectObject(1), 0.5);
        scene.update(0.0);
        assert_eq!(scene.lights.key.position, Vector3::new(4.0, 2.0, -3.0));
        assert!(!scene.lights.key.enabled);
    }

    #[test]
    fn test_actions_follow_selection() {
        let mut scene = SceneContext::demo();
        assert!(scene.apply(SceneAction::SelectObject(2), 0.0));
        scene.apply(SceneAction::AddWaypoint, 0.0);
        scene.apply(SceneAction::ToggleMotion, 0.0);

        assert!(scene.objects[0].waypoints.is_empty());
        assert_eq!(scene.objects[2].waypoints, vec![Vector3::new(-2.0, 1.0, -3.0)]);
        assert!(scene.objects[2].is_moving);

        // Out of range selection is ignored
        assert!(!scene.apply(SceneAction::SelectObject(7), 0.0));
        assert_eq!(scene.selected, 2);
    }

    #[test]
    fn test_scale_has_a_floor() {
        let mut scene = SceneContext::demo();
        for _ in 0..100 {
            scene.apply(SceneAction::Scale(Direction::Negative), 0.0);
        }
        assert_eq!(scene.scale, 0.1);
    }

    #[test]
    fn test_rotation_axis_is_exclusive() {
        let mut scene = SceneContext::demo();
        scene.apply(SceneAction::SetRotation(RotationAxis::X), 0.0);
        scene.apply(SceneAction::SetRotation(RotationAxis::Z), 0.0);
        assert_eq!(scene.rotation_axis, RotationAxis::Z);

        scene.update(2.0);
        assert!((scene.rotation_angle - 90.0).abs() < 1e-4);

        // The spin is around Z only: +X maps into the XY plane
        let model = scene.model_matrix(0).unwrap();
        let x = model * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!(x.z.abs() < 1e-6);
        assert!((x.truncate() - Vector3::new(0.0, 1.0, 0.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_no_rotation_leaves_angle() {
        let mut scene = SceneContext::demo();
        scene.update(1.0);
        assert_eq!(scene.rotation_angle, 0.0);
    }

    #[test]
    fn test_model_matrix_translates_object() {
        let mut scene = SceneContext::demo();
        scene.scale = 2.0;
        let model = scene.model_matrix(1).unwrap();
        let origin = model * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin.truncate(), Vector3::new(2.0, 0.0, -5.0));
        let corner = model * Vector4::new(0.5, 0.5, 0.5, 1.0);
        assert_eq!(corner.truncate(), Vector3::new(3.0, 1.0, -4.0));
        assert!(scene.model_matrix(3).is_none());
    }

    #[test]
    fn test_trajectory_overlays_respect_toggle() {
        let mut scene = SceneContext::demo();
        scene.apply(SceneAction::AddWaypoint, 0.0);
        scene.apply(SceneAction::Nudge(Axis::Y, Direction::Positive), 0.0);
        scene.apply(SceneAction::AddWaypoint, 1.0);
        assert_eq!(scene.trajectory_overlays().len(), 1);

        assert!(scene.apply(SceneAction::ToggleTrajectories, 1.0));
        assert!(scene.trajectory_overlays().is_empty());
    }

    #[test]
    fn test_keys_route_to_camera_or_scene() {
        let mut scene = SceneContext::demo();
        assert!(scene.handle_key(KeyCode::KeyW, ElementState::Pressed, 0.0));
        assert!(scene.objects[0].waypoints.is_empty());

        assert!(scene.handle_key(KeyCode::KeyP, ElementState::Pressed, 0.0));
        assert!(!scene.handle_key(KeyCode::KeyP, ElementState::Released, 0.05));
        assert_eq!(scene.objects[0].waypoints.len(), 1);

        assert!(!scene.handle_key(KeyCode::KeyQ, ElementState::Pressed, 1.0));
    }
}
