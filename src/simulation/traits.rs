//! Core simulation traits
//!
//! Defines the interface per-frame simulations implement to be driven by the
//! frame loop against a [`SceneContext`].

use crate::gfx::scene::SceneContext;

/// Core trait for per-frame simulations
///
/// The frame loop calls these lifecycle methods; implementors keep their own
/// state and mutate the scene only from [`update`](Simulation::update) and
/// [`reset`](Simulation::reset).
pub trait Simulation {
    /// Initialize the simulation
    ///
    /// Called once when the simulation is attached. Use this to capture
    /// initial state from the scene.
    fn initialize(&mut self, scene: &mut SceneContext);

    /// Advance the simulation by `delta_time` seconds
    fn update(&mut self, delta_time: f32, scene: &mut SceneContext);

    /// Get simulation name for logging
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self, scene: &mut SceneContext);

    /// Optional: Custom cleanup when simulation is removed
    fn cleanup(&mut self, _scene: &mut SceneContext) {}
}
