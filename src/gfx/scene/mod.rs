//! # Scene Module
//!
//! Scene objects, the vertex layout they are drawn with, and the
//! [`SceneContext`] that owns the camera, objects and editing state of a
//! running scene.
//!
//! ## Key Components
//!
//! - [`SceneContext`] - Camera, objects, lights and the current edit state
//! - [`SceneObject`] - A positioned object that can follow waypoints
//! - [`Mesh`] - Triangle-list vertex stream shared by the objects
//! - [`Vertex`] - Interleaved position, normal and texture coordinate

pub mod object;
pub mod scene;
pub mod vertex;

pub use object::{Mesh, SceneObject};
pub use scene::{MotionSettings, RotationAxis, SceneContext, SceneStatistics};
pub use vertex::Vertex;
