//! Simulation system
//!
//! Per-frame simulations driven against a [`SceneContext`](crate::gfx::scene::SceneContext).
//! [`waypoint::WaypointMotion`] moves scene objects along their authored
//! trajectories.

pub mod manager;
pub mod traits;
pub mod waypoint;

pub use manager::SimulationManager;
pub use traits::Simulation;
pub use waypoint::{step_object, StepOutcome, WaypointMotion};
