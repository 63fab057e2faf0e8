//! Discrete scene actions, their key bindings and debouncing.
//!
//! Waypoint authoring is edge-triggered, but a held key repeats. Every
//! debounced action keeps its own last trigger time and fires again only
//! once more than the configured interval has passed.

use std::collections::HashMap;

use winit::keyboard::KeyCode;

use crate::gfx::{resources::lighting::LightSlot, scene::scene::RotationAxis};

/// Default minimum interval between two triggers of the same action, seconds
pub const DEFAULT_DEBOUNCE_INTERVAL: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// Everything the user can do to the scene with a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneAction {
    /// Append the selected object's position to its waypoints
    AddWaypoint,
    ClearWaypoints,
    /// Start or stop the selected object
    ToggleMotion,
    ToggleTrajectories,
    SelectObject(usize),
    SetRotation(RotationAxis),
    /// Move the selected object one step along an axis
    Nudge(Axis, Direction),
    /// Grow or shrink the uniform scale
    Scale(Direction),
    /// Switch one light of the rig on or off
    ToggleLight(LightSlot),
}

impl SceneAction {
    /// Whether a held key must be debounced for this action
    pub fn is_debounced(self) -> bool {
        matches!(
            self,
            SceneAction::AddWaypoint
                | SceneAction::ClearWaypoints
                | SceneAction::ToggleMotion
                | SceneAction::ToggleTrajectories
                | SceneAction::ToggleLight(_)
        )
    }
}

/// Per-action trigger timestamps
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: f64,
    last_trigger_time: HashMap<SceneAction, f64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_INTERVAL)
    }
}

impl Debouncer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last_trigger_time: HashMap::new(),
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn set_interval(&mut self, interval: f64) {
        self.interval = interval;
    }

    /// Records a trigger at `now` (seconds) if the action is not within its
    /// debounce window. The first trigger of an action always passes.
    pub fn try_trigger(&mut self, action: SceneAction, now: f64) -> bool {
        self.try_trigger_within(action, now, self.interval)
    }

    /// Like [`try_trigger`](Debouncer::try_trigger) with an explicit window,
    /// for callers that own the interval setting.
    pub fn try_trigger_within(&mut self, action: SceneAction, now: f64, interval: f64) -> bool {
        match self.last_trigger_time.get(&action) {
            Some(&last) if now - last <= interval => false,
            _ => {
                self.last_trigger_time.insert(action, now);
                true
            }
        }
    }

    pub fn last_trigger_time(&self, action: SceneAction) -> Option<f64> {
        self.last_trigger_time.get(&action).copied()
    }

    pub fn reset(&mut self) {
        self.last_trigger_time.clear();
    }
}

/// Maps keys to scene actions.
///
/// WASD is left to the camera controller; objects are nudged with the arrow
/// keys (x/z) and I/J (y). The digits select objects, so F1-F3 switch the
/// key, fill and back lights.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, SceneAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::from([
            (KeyCode::KeyP, SceneAction::AddWaypoint),
            (KeyCode::KeyC, SceneAction::ClearWaypoints),
            (KeyCode::KeyM, SceneAction::ToggleMotion),
            (KeyCode::KeyT, SceneAction::ToggleTrajectories),
            (KeyCode::KeyX, SceneAction::SetRotation(RotationAxis::X)),
            (KeyCode::KeyY, SceneAction::SetRotation(RotationAxis::Y)),
            (KeyCode::KeyZ, SceneAction::SetRotation(RotationAxis::Z)),
            (KeyCode::KeyR, SceneAction::SetRotation(RotationAxis::None)),
            (KeyCode::ArrowLeft, SceneAction::Nudge(Axis::X, Direction::Negative)),
            (KeyCode::ArrowRight, SceneAction::Nudge(Axis::X, Direction::Positive)),
            (KeyCode::ArrowUp, SceneAction::Nudge(Axis::Z, Direction::Negative)),
            (KeyCode::ArrowDown, SceneAction::Nudge(Axis::Z, Direction::Positive)),
            (KeyCode::KeyI, SceneAction::Nudge(Axis::Y, Direction::Positive)),
            (KeyCode::KeyJ, SceneAction::Nudge(Axis::Y, Direction::Negative)),
            (KeyCode::BracketLeft, SceneAction::Scale(Direction::Negative)),
            (KeyCode::BracketRight, SceneAction::Scale(Direction::Positive)),
            (KeyCode::F1, SceneAction::ToggleLight(LightSlot::Key)),
            (KeyCode::F2, SceneAction::ToggleLight(LightSlot::Fill)),
            (KeyCode::F3, SceneAction::ToggleLight(LightSlot::Back)),
        ]);

        let digits = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
            KeyCode::Digit9,
        ];
        for (index, key) in digits.into_iter().enumerate() {
            bindings.insert(key, SceneAction::SelectObject(index));
        }

        Self { bindings }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key: KeyCode) -> Option<SceneAction> {
        self.bindings.get(&key).copied()
    }

    /// Rebinds a key, returning the action it was bound to before
    pub fn bind(&mut self, key: KeyCode, action: SceneAction) -> Option<SceneAction> {
        self.bindings.insert(key, action)
    }
}
