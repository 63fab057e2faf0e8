//! Simulation manager
//!
//! Owns the attached simulation and drives it from the frame loop with
//! pause, time scaling and an optional fixed timestep.

use log::info;

use super::traits::Simulation;
use crate::gfx::scene::SceneContext;

/// Drives a single attached simulation
pub struct SimulationManager {
    simulation: Option<Box<dyn Simulation>>,
    is_paused: bool,
    time_scale: f32,
    accumulated_time: f32,
    fixed_timestep: Option<f32>,
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationManager {
    pub fn new() -> Self {
        Self {
            simulation: None,
            is_paused: false,
            time_scale: 1.0,
            accumulated_time: 0.0,
            fixed_timestep: None,
        }
    }

    /// Attach a simulation, cleaning up the previous one
    pub fn attach_simulation(
        &mut self,
        mut simulation: Box<dyn Simulation>,
        scene: &mut SceneContext,
    ) {
        if let Some(mut old_sim) = self.simulation.take() {
            old_sim.cleanup(scene);
        }

        simulation.initialize(scene);
        info!("Attached simulation: {}", simulation.name());
        self.simulation = Some(simulation);
        self.is_paused = false;
    }

    pub fn detach_simulation(&mut self, scene: &mut SceneContext) {
        if let Some(mut sim) = self.simulation.take() {
            sim.cleanup(scene);
        }
    }

    /// Update simulation (called every frame)
    pub fn update(&mut self, delta_time: f32, scene: &mut SceneContext) {
        if self.is_paused {
            return;
        }

        if let Some(simulation) = &mut self.simulation {
            let scaled_delta = delta_time * self.time_scale;

            if let Some(fixed_dt) = self.fixed_timestep {
                self.accumulated_time += scaled_delta;
                while self.accumulated_time >= fixed_dt {
                    simulation.update(fixed_dt, scene);
                    self.accumulated_time -= fixed_dt;
                }
            } else {
                simulation.update(scaled_delta, scene);
            }
        }
    }

    /// Reset the attached simulation to its initial state
    pub fn reset(&mut self, scene: &mut SceneContext) {
        if let Some(simulation) = &mut self.simulation {
            simulation.reset(scene);
        }
        self.accumulated_time = 0.0;
    }

    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    /// `true` if a simulation is attached and not paused
    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Some(simulation) = &mut self.simulation {
            simulation.set_running(!paused);
        }
    }

    /// Fixed timestep in seconds, or `None` for variable timestep
    pub fn set_fixed_timestep(&mut self, timestep: Option<f32>) {
        self.fixed_timestep = timestep.filter(|dt| *dt > 0.0);
        self.accumulated_time = 0.0;
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Time scale multiplier (1.0 = normal speed), never negative
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts updates and the time it was given
    struct Counter {
        running: bool,
        updates: std::rc::Rc<std::cell::Cell<(u32, f32)>>,
    }

    impl Simulation for Counter {
        fn initialize(&mut self, _scene: &mut SceneContext) {
            self.running = true;
        }

        fn update(&mut self, delta_time: f32, _scene: &mut SceneContext) {
            let (count, total) = self.updates.get();
            self.updates.set((count + 1, total + delta_time));
        }

        fn name(&self) -> &str {
            "Counter"
        }

        fn is_running(&self) -> bool {
            self.running
        }

        fn set_running(&mut self, running: bool) {
            self.running = running;
        }

        fn reset(&mut self, _scene: &mut SceneContext) {
            self.updates.set((0, 0.0));
        }
    }

    fn attach_counter(
        manager: &mut SimulationManager,
        scene: &mut SceneContext,
    ) -> std::rc::Rc<std::cell::Cell<(u32, f32)>> {
        let updates = std::rc::Rc::new(std::cell::Cell::new((0, 0.0)));
        manager.attach_simulation(
            Box::new(Counter {
                running: false,
                updates: updates.clone(),
            }),
            scene,
        );
        updates
    }

    #[test]
    fn test_variable_timestep_scales_time() {
        let mut scene = SceneContext::demo();
        let mut manager = SimulationManager::new();
        let updates = attach_counter(&mut manager, &mut scene);
        assert_eq!(manager.current_simulation_name(), Some("Counter"));

        manager.set_time_scale(2.0);
        manager.update(0.25, &mut scene);
        assert_eq!(updates.get(), (1, 0.5));
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut scene = SceneContext::demo();
        let mut manager = SimulationManager::new();
        let updates = attach_counter(&mut manager, &mut scene);

        manager.set_fixed_timestep(Some(0.25));
        manager.update(0.6, &mut scene);
        assert_eq!(updates.get().0, 2);
        manager.update(0.2, &mut scene);
        assert_eq!(updates.get().0, 3);
    }

    #[test]
    fn test_paused_manager_skips_updates() {
        let mut scene = SceneContext::demo();
        let mut manager = SimulationManager::new();
        let updates = attach_counter(&mut manager, &mut scene);

        manager.set_paused(true);
        assert!(!manager.is_running());
        manager.update(1.0, &mut scene);
        assert_eq!(updates.get().0, 0);

        manager.detach_simulation(&mut scene);
        assert!(!manager.has_simulation());
    }
}
