// src/lib.rs
//! Scenecore
//!
//! Scene core for small real-time 3D programs: OBJ/MTL import, a free-look
//! camera driven by input deltas, and waypoint motion for scene objects.
//! Produces plain data (vertices, matrices, positions) for a wgpu renderer.

pub mod error;
pub mod gfx;
pub mod input;
pub mod performance;
pub mod prelude;
pub mod simulation;

pub use error::{ImportError, ImportResult};
pub use gfx::scene::SceneContext;
