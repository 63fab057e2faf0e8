//! Three-point light rig
//!
//! Key, fill and back lights placed around a focus object, each with its own
//! on/off switch. The rendering layer reads the lights when filling its
//! lighting uniforms.

use cgmath::Vector3;

/// Which light of the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightSlot {
    Key,
    Fill,
    Back,
}

/// Point light configuration
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub position: Vector3<f32>,
    pub color: [f32; 3],
    pub intensity: f32,
    pub enabled: bool,
}

impl LightConfig {
    /// Distance falloff used by the Phong shader: `1 / (1 + 0.1 d + 0.01 d²)`
    pub fn attenuation(distance: f32) -> f32 {
        1.0 / (1.0 + 0.1 * distance + 0.01 * distance * distance)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightRig {
    pub key: LightConfig,
    pub fill: LightConfig,
    pub back: LightConfig,
}

impl LightRig {
    /// Places the rig around an object, offsets scaled by the object's size
    pub fn three_point(object_position: Vector3<f32>, object_scale: f32) -> Self {
        Self {
            key: LightConfig {
                position: object_position + Vector3::new(2.0, 2.0, 2.0) * object_scale,
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
                enabled: true,
            },
            fill: LightConfig {
                position: object_position + Vector3::new(-2.0, 1.0, 1.0) * object_scale,
                color: [0.8, 0.8, 0.9],
                intensity: 0.5,
                enabled: true,
            },
            back: LightConfig {
                position: object_position + Vector3::new(0.0, 1.0, -2.0) * object_scale,
                color: [0.7, 0.7, 1.0],
                intensity: 0.3,
                enabled: true,
            },
        }
    }

    /// Moves the rig to follow an object. Colors, intensities and on/off
    /// state are kept.
    pub fn place_around(&mut self, object_position: Vector3<f32>, object_scale: f32) {
        let placed = Self::three_point(object_position, object_scale);
        self.key.position = placed.key.position;
        self.fill.position = placed.fill.position;
        self.back.position = placed.back.position;
    }

    pub fn light(&self, slot: LightSlot) -> &LightConfig {
        match slot {
            LightSlot::Key => &self.key,
            LightSlot::Fill => &self.fill,
            LightSlot::Back => &self.back,
        }
    }

    pub fn light_mut(&mut self, slot: LightSlot) -> &mut LightConfig {
        match slot {
            LightSlot::Key => &mut self.key,
            LightSlot::Fill => &mut self.fill,
            LightSlot::Back => &mut self.back,
        }
    }

    /// Flip one light on or off, returns the new state
    pub fn toggle(&mut self, slot: LightSlot) -> bool {
        let light = self.light_mut(slot);
        light.enabled = !light.enabled;
        log::info!(
            "{:?} light {}",
            slot,
            if light.enabled { "enabled" } else { "disabled" }
        );
        light.enabled
    }

    /// Lights currently switched on
    pub fn enabled_lights(&self) -> impl Iterator<Item = &LightConfig> {
        [&self.key, &self.fill, &self.back]
            .into_iter()
            .filter(|light| light.enabled)
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::three_point(Vector3::new(0.0, 0.0, 0.0), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_follows_object_and_scale() {
        let rig = LightRig::three_point(Vector3::new(1.0, 0.0, 0.0), 2.0);
        assert_eq!(rig.key.position, Vector3::new(5.0, 4.0, 4.0));
        assert_eq!(rig.fill.position, Vector3::new(-3.0, 2.0, 2.0));
        assert_eq!(rig.back.position, Vector3::new(1.0, 2.0, -4.0));
        assert_eq!(rig.enabled_lights().count(), 3);
    }

    #[test]
    fn test_toggle_single_light() {
        let mut rig = LightRig::default();
        assert!(!rig.toggle(LightSlot::Fill));
        assert!(!rig.light(LightSlot::Fill).enabled);
        assert!(rig.light(LightSlot::Key).enabled);
        assert_eq!(rig.enabled_lights().count(), 2);

        assert!(rig.toggle(LightSlot::Fill));
    }

    #[test]
    fn test_place_around_keeps_switches() {
        let mut rig = LightRig::default();
        rig.toggle(LightSlot::Back);
        rig.place_around(Vector3::new(0.0, 0.0, -5.0), 0.5);

        assert_eq!(rig.key.position, Vector3::new(1.0, 1.0, -4.0));
        assert_eq!(rig.back.position, Vector3::new(0.0, 0.5, -6.0));
        assert!(!rig.back.enabled);
        assert_eq!(rig.fill.intensity, 0.5);
    }

    #[test]
    fn test_attenuation_falls_off() {
        assert_eq!(LightConfig::attenuation(0.0), 1.0);
        assert!((LightConfig::attenuation(10.0) - 1.0 / 3.0).abs() < 1e-6);
        assert!(LightConfig::attenuation(20.0) < LightConfig::attenuation(10.0));
    }
}
