// src/gfx/resources/mod.rs
//! Shading resources
//!
//! Material coefficients imported from MTL files and the three-point light rig.

pub mod lighting;
pub mod material;

// Re-export main types
pub use lighting::{LightConfig, LightRig, LightSlot};
pub use material::{Material, MaterialUniform};
