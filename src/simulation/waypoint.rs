//! Waypoint following for scene objects
//!
//! Each moving [`SceneObject`] travels towards `waypoints[current_target]` at
//! `speed` units per nominal 60 Hz update. Once it is closer than `speed` it
//! snaps onto the waypoint and targets the next one. At the end of the list a
//! looping object wraps to the first waypoint, a non-looping one stops.

use cgmath::{InnerSpace, Vector3};
use log::{debug, info};

use super::traits::Simulation;
use crate::gfx::scene::{SceneContext, SceneObject};

/// Update rate the authored `speed` is expressed against
pub const NOMINAL_UPDATE_RATE: f32 = 60.0;

/// What a single step did to an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not moving, or nothing to move towards
    Idle,
    /// Moved towards the current target
    Advanced,
    /// Snapped onto waypoint `index`, more waypoints follow
    Reached { index: usize },
    /// Snapped onto the last waypoint and wrapped to the first
    Looped,
    /// Snapped onto the last waypoint and stopped
    Finished,
}

/// Advance one object by `delta_time` seconds.
pub fn step_object(object: &mut SceneObject, delta_time: f32) -> StepOutcome {
    if !object.is_moving || object.waypoints.is_empty() {
        return StepOutcome::Idle;
    }

    let count = object.waypoints.len();
    if object.current_target >= count {
        // Waypoints were edited under a finished traversal
        if !object.loop_trajectory {
            object.is_moving = false;
            return StepOutcome::Finished;
        }
        object.current_target = 0;
    }

    let target = object.waypoints[object.current_target];
    let delta: Vector3<f32> = target - object.position;
    let distance = delta.magnitude();

    if distance < object.speed || distance == 0.0 {
        object.position = target;
        let index = object.current_target;
        object.current_target += 1;

        if object.current_target < count {
            return StepOutcome::Reached { index };
        }
        if object.loop_trajectory {
            object.current_target = 0;
            return StepOutcome::Looped;
        }
        // The index stays one past the end to mark the traversal finished
        object.is_moving = false;
        return StepOutcome::Finished;
    }

    object.position += delta / distance * object.speed * delta_time * NOMINAL_UPDATE_RATE;
    StepOutcome::Advanced
}

/// Moves every object of the scene along its waypoints
#[derive(Debug, Clone)]
pub struct WaypointMotion {
    running: bool,
    initial_positions: Vec<Vector3<f32>>,
    laps: u64,
}

impl Default for WaypointMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointMotion {
    pub fn new() -> Self {
        Self {
            running: true,
            initial_positions: Vec::new(),
            laps: 0,
        }
    }

    /// Completed loops and traversals since the last reset
    pub fn laps(&self) -> u64 {
        self.laps
    }
}

impl Simulation for WaypointMotion {
    fn initialize(&mut self, scene: &mut SceneContext) {
        self.initial_positions = scene.objects.iter().map(|o| o.position).collect();
        self.laps = 0;
        debug!(
            "Waypoint motion tracking {} objects",
            self.initial_positions.len()
        );
    }

    fn update(&mut self, delta_time: f32, scene: &mut SceneContext) {
        if !self.running {
            return;
        }

        for (index, object) in scene.objects.iter_mut().enumerate() {
            match step_object(object, delta_time) {
                StepOutcome::Reached { index: waypoint } => {
                    debug!("Object {} reached waypoint {}", index, waypoint);
                }
                StepOutcome::Looped => {
                    self.laps += 1;
                    debug!("Object {} looped its trajectory", index);
                }
                StepOutcome::Finished => {
                    self.laps += 1;
                    info!("Object {} finished its trajectory", index);
                }
                StepOutcome::Idle | StepOutcome::Advanced => {}
            }
        }
    }

    fn name(&self) -> &str {
        "Waypoint Motion"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Stops every object and puts it back where it was at initialization.
    /// Authored waypoints are kept.
    fn reset(&mut self, scene: &mut SceneContext) {
        for (object, initial) in scene.objects.iter_mut().zip(&self.initial_positions) {
            object.position = *initial;
            object.current_target = 0;
            object.stop();
        }
        self.laps = 0;
    }
}
