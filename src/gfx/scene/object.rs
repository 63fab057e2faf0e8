use cgmath::{InnerSpace, Vector3};

use super::vertex::Vertex;

/// Immutable triangle-list vertex stream handed to the rendering layer.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        debug_assert_eq!(vertices.len() % 3, 0, "mesh is not a triangle list");
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Sequential index buffer, one index per vertex.
    pub fn indices(&self) -> Vec<u32> {
        (0..self.vertices.len() as u32).collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw bytes ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// A scene object that can travel along authored waypoints.
///
/// `speed` is in units per nominal 60 Hz update; see
/// [`crate::simulation::waypoint`] for the stepping rules.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub position: Vector3<f32>,
    pub waypoints: Vec<Vector3<f32>>,
    pub speed: f32,
    pub current_target: usize,
    pub is_moving: bool,
    pub loop_trajectory: bool,
}

impl SceneObject {
    pub const DEFAULT_SPEED: f32 = 0.02;

    /// Create an idle, looping object at `position`
    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            waypoints: Vec::new(),
            speed: Self::DEFAULT_SPEED,
            current_target: 0,
            is_moving: false,
            loop_trajectory: true,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_loop(mut self, loop_trajectory: bool) -> Self {
        self.loop_trajectory = loop_trajectory;
        self
    }

    /// Append the current position as a waypoint
    pub fn add_waypoint_here(&mut self) -> Vector3<f32> {
        self.waypoints.push(self.position);
        self.position
    }

    pub fn clear_waypoints(&mut self) {
        self.waypoints.clear();
        self.current_target = 0;
    }

    /// Begin moving. A traversal that already finished starts over from
    /// the first waypoint.
    pub fn start(&mut self) {
        if self.current_target >= self.waypoints.len() {
            self.current_target = 0;
        }
        self.is_moving = true;
    }

    pub fn stop(&mut self) {
        self.is_moving = false;
    }

    /// Toggle between moving and idle, returns the new moving state
    pub fn toggle_moving(&mut self) -> bool {
        if self.is_moving {
            self.stop();
        } else {
            self.start();
        }
        self.is_moving
    }

    /// Target waypoint, `None` when there is nothing left to visit.
    pub fn current_target_point(&self) -> Option<Vector3<f32>> {
        self.waypoints.get(self.current_target).copied()
    }

    /// Whether a non-looping traversal ran to its end.
    pub fn is_finished(&self) -> bool {
        !self.waypoints.is_empty() && self.current_target >= self.waypoints.len()
    }

    /// Points for the trajectory overlay, drawn as a line strip.
    ///
    /// Fewer than two waypoints draw nothing. A looping path with more than
    /// two points is closed back to its start.
    pub fn trajectory_polyline(&self) -> Vec<Vector3<f32>> {
        if self.waypoints.len() < 2 {
            return Vec::new();
        }

        let mut points = self.waypoints.clone();
        if self.loop_trajectory && self.waypoints.len() > 2 {
            points.push(self.waypoints[0]);
        }
        points
    }

    /// Total length of the trajectory overlay
    pub fn trajectory_length(&self) -> f32 {
        self.trajectory_polyline()
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).magnitude())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> SceneObject {
        let mut object = SceneObject::new(Vector3::new(0.0, 0.0, 0.0));
        object.waypoints = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        ];
        object
    }

    #[test]
    fn test_new_object_defaults() {
        let object = SceneObject::new(Vector3::new(2.0, 0.0, -5.0));
        assert_eq!(object.speed, 0.02);
        assert!(!object.is_moving);
        assert!(object.loop_trajectory);
        assert_eq!(object.current_target, 0);
        assert!(object.current_target_point().is_none());
    }

    #[test]
    fn test_polyline_closes_only_looping_paths() {
        let object = square();
        let closed = object.trajectory_polyline();
        assert_eq!(closed.len(), 4);
        assert_eq!(closed[3], closed[0]);
        assert!((object.trajectory_length() - (2.0 + 2f32.sqrt())).abs() < 1e-5);

        let open = square().with_loop(false).trajectory_polyline();
        assert_eq!(open.len(), 3);
    }

    #[test]
    fn test_polyline_needs_two_points() {
        let mut object = SceneObject::new(Vector3::new(0.0, 0.0, 0.0));
        object.add_waypoint_here();
        assert!(object.trajectory_polyline().is_empty());

        // Two points are never closed, even when looping.
        object.position = Vector3::new(0.0, 2.0, 0.0);
        object.add_waypoint_here();
        assert_eq!(object.trajectory_polyline().len(), 2);
    }

    #[test]
    fn test_start_after_finish_restarts() {
        let mut object = square().with_loop(false);
        object.current_target = 3;
        assert!(object.is_finished());

        object.start();
        assert!(object.is_moving);
        assert_eq!(object.current_target, 0);
    }

    #[test]
    fn test_clear_resets_target() {
        let mut object = square();
        object.current_target = 2;
        object.clear_waypoints();
        assert!(object.waypoints.is_empty());
        assert_eq!(object.current_target, 0);
        assert!(!object.is_finished());
    }

    #[test]
    fn test_mesh_counts() {
        let mesh = Mesh::new(vec![Vertex::default(); 6]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.as_bytes().len(), 6 * std::mem::size_of::<Vertex>());
    }
}
