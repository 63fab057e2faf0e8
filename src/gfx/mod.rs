//! # Graphics Module
//!
//! Everything the renderer consumes, as plain data.
//!
//! - **Camera System** ([`camera`]) - Free-look camera with keyboard, mouse and scroll input
//! - **Geometry** ([`geometry`]) - OBJ importer and the built-in cube
//! - **Resources** ([`resources`]) - Materials and the light rig
//! - **Scene Management** ([`scene`]) - Objects, vertices and the scene context
//!
//! Nothing here touches the GPU. [`scene::Vertex::desc`] and the `bytemuck`
//! uniform types describe the data layout the wgpu pipeline expects.

pub mod camera;
pub mod geometry;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use scene::SceneContext;
