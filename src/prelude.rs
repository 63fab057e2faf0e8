//! # Scenecore Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```no_run
//! use scenecore::prelude::*;
//!
//! let mut scene = SceneContext::demo();
//! let mut motion = WaypointMotion::new();
//! motion.initialize(&mut scene);
//!
//! scene.apply(SceneAction::AddWaypoint, 0.0);
//! motion.update(1.0 / 60.0, &mut scene);
//! ```

// Scene and camera types
pub use crate::gfx::camera::{CameraManager, CameraMovement, CameraSettings, OrbitCamera};
pub use crate::gfx::geometry::obj::{load_obj, load_obj_or_empty, ObjMesh};
pub use crate::gfx::geometry::{generate_cube, GeometryData};
pub use crate::gfx::resources::lighting::{LightRig, LightSlot};
pub use crate::gfx::resources::material::{load_mtl, load_mtl_or_default, Material};
pub use crate::gfx::scene::{
    Mesh, MotionSettings, RotationAxis, SceneContext, SceneObject, Vertex,
};

// Input and simulation framework
pub use crate::input::{Axis, Debouncer, Direction, KeyBindings, SceneAction};
pub use crate::simulation::{Simulation, SimulationManager, StepOutcome, WaypointMotion};

pub use crate::error::{ImportError, ImportResult};
pub use crate::performance::{FrameClock, FrameMetrics};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
