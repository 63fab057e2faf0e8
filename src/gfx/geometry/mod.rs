//! # Geometry
//!
//! Mesh sources for the scene: the OBJ importer ([`obj`]) and procedurally
//! generated primitives ([`primitives`]) used when no model file is given.
//!
//! ## Usage
//!
//! ```no_run
//! use scenecore::gfx::geometry::{generate_cube, obj::load_obj_or_empty};
//!
//! // Falls back to an empty mesh (and logs a warning) if the file is missing
//! let imported = load_obj_or_empty("assets/Suzanne.obj");
//!
//! // Built-in unit cube, already expanded to a triangle list
//! let cube = generate_cube().to_mesh();
//! ```

pub mod obj;
pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::{object::Mesh, vertex::Vertex};

/// Indexed geometry as generated, before expansion for the renderer
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Expands the indexed geometry into the flat triangle list the
    /// importer produces, so both sources look the same downstream.
    pub fn to_mesh(&self) -> Mesh {
        let vertices = self
            .indices
            .iter()
            .map(|&index| {
                let i = index as usize;
                Vertex {
                    position: self.vertices.get(i).copied().unwrap_or_default(),
                    normal: self.normals.get(i).copied().unwrap_or_default(),
                    tex_coord: self.tex_coords.get(i).copied().unwrap_or_default(),
                }
            })
            .collect();

        Mesh::new(vertices)
    }
}
