//! # Primitive Shape Generation
//!
//! Built-in shapes for scenes that do not load a model file.

use super::GeometryData;

/// Cube faces as `(normal, u axis, v axis)`, with `u × v = normal` so the
/// corners below wind counter-clockwise seen from outside.
const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
];

/// Generate a unit cube centered at the origin
///
/// Vertices span -0.5 to 0.5 on all axes. Each face has its own four
/// vertices with an outward normal and UVs covering 0 to 1.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    for (normal, u, v) in CUBE_FACES {
        let base = data.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner: [f32; 3] =
                std::array::from_fn(|i| 0.5 * (normal[i] + su * u[i] + sv * v[i]));
            data.vertices.push(corner);
            data.normals.push(normal);
            data.tex_coords.push([(su + 1.0) * 0.5, (sv + 1.0) * 0.5]);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}
