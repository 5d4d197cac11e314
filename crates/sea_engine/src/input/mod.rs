//! Input state
//!
//! Modes never query devices. The host platform builds a [`KeyboardState`]
//! snapshot once per frame and hands it to the mode's update.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Left shift
    LeftShift,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Snapshot of which keys are held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Snapshot with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with exactly `keys` held
    pub fn from_pressed(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            pressed: keys.into_iter().collect(),
        }
    }

    /// Mark a key as held
    pub fn press(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }

    /// Mark a key as released
    pub fn release(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }

    /// Apply a key transition
    pub fn set(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Release every key, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Whether `key` is held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keyboard = KeyboardState::new();
        keyboard.press(KeyCode::W);
        keyboard.set(KeyCode::A, true);
        assert!(keyboard.is_pressed(KeyCode::W));
        assert!(keyboard.is_pressed(KeyCode::A));

        keyboard.release(KeyCode::W);
        assert!(!keyboard.is_pressed(KeyCode::W));

        keyboard.clear();
        assert_eq!(keyboard, KeyboardState::new());
    }

    #[test]
    fn test_from_pressed() {
        let keyboard = KeyboardState::from_pressed([KeyCode::Q, KeyCode::E]);
        assert!(keyboard.is_pressed(KeyCode::Q));
        assert!(keyboard.is_pressed(KeyCode::E));
        assert!(!keyboard.is_pressed(KeyCode::S));
    }
}
