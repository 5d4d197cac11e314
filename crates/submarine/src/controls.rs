//! Control sampling
//!
//! The mode reads held keys once per update. Each control axis resolves to
//! -1, 0 or +1; holding both keys of an axis cancels out.

use sea_engine::input::{KeyCode, KeyboardState};
use serde::{Deserialize, Serialize};

/// Key bindings for the six vehicle controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlBindings {
    /// Turn left
    pub yaw_left: KeyCode,
    /// Turn right
    pub yaw_right: KeyCode,
    /// Thrust forward
    pub forward: KeyCode,
    /// Thrust backward
    pub backward: KeyCode,
    /// Sink
    pub descend: KeyCode,
    /// Rise
    pub ascend: KeyCode,
}

impl Default for ControlBindings {
    fn default() -> Self {
        Self {
            yaw_left: KeyCode::A,
            yaw_right: KeyCode::D,
            forward: KeyCode::W,
            backward: KeyCode::S,
            descend: KeyCode::Q,
            ascend: KeyCode::E,
        }
    }
}

/// Which controls are held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Turn left held
    pub yaw_left: bool,
    /// Turn right held
    pub yaw_right: bool,
    /// Forward thrust held
    pub forward: bool,
    /// Backward thrust held
    pub backward: bool,
    /// Descend held
    pub descend: bool,
    /// Ascend held
    pub ascend: bool,
}

impl ControlState {
    /// Read the bound keys from a keyboard snapshot
    pub fn sample(keyboard: &KeyboardState, bindings: &ControlBindings) -> Self {
        Self {
            yaw_left: keyboard.is_pressed(bindings.yaw_left),
            yaw_right: keyboard.is_pressed(bindings.yaw_right),
            forward: keyboard.is_pressed(bindings.forward),
            backward: keyboard.is_pressed(bindings.backward),
            descend: keyboard.is_pressed(bindings.descend),
            ascend: keyboard.is_pressed(bindings.ascend),
        }
    }

    /// +1 turning left, -1 turning right
    pub fn yaw(&self) -> f32 {
        axis(self.yaw_left, self.yaw_right)
    }

    /// +1 forward, -1 backward
    pub fn thrust(&self) -> f32 {
        axis(self.forward, self.backward)
    }

    /// +1 ascending, -1 descending
    pub fn vertical(&self) -> f32 {
        axis(self.ascend, self.descend)
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_reads_bindings() {
        let keyboard = KeyboardState::from_pressed([KeyCode::W, KeyCode::A, KeyCode::Q]);
        let controls = ControlState::sample(&keyboard, &ControlBindings::default());
        assert!(controls.forward && controls.yaw_left && controls.descend);
        assert!(!controls.backward);
        assert_eq!(controls.thrust(), 1.0);
        assert_eq!(controls.yaw(), 1.0);
        assert_eq!(controls.vertical(), -1.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let keyboard = KeyboardState::from_pressed([KeyCode::A, KeyCode::D, KeyCode::W, KeyCode::S]);
        let controls = ControlState::sample(&keyboard, &ControlBindings::default());
        assert_eq!(controls.yaw(), 0.0);
        assert_eq!(controls.thrust(), 0.0);
    }

    #[test]
    fn test_rebound_keys() {
        let bindings = ControlBindings {
            forward: KeyCode::Up,
            ..ControlBindings::default()
        };
        let keyboard = KeyboardState::from_pressed([KeyCode::W]);
        assert!(!ControlState::sample(&keyboard, &bindings).forward);
        let keyboard = KeyboardState::from_pressed([KeyCode::Up]);
        assert!(ControlState::sample(&keyboard, &bindings).forward);
    }
}
