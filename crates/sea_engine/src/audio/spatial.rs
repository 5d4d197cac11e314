//! Spatial audio listener
//!
//! The listener is the single reference pose every emitter is spatialized
//! against. Its position and right vector are one unit: the simulation thread
//! writes both inside a single critical section and the mixing thread reads
//! both inside one, so the mixer never pairs a position from one frame with a
//! right vector from another.
//!
//! The lock is exposed through [`ListenerLock`] and passed around explicitly
//! as a handle rather than reached through a global.

use crate::foundation::math::Vec3;
use std::f32::consts::FRAC_PI_4;
use std::sync::{Mutex, PoisonError};

/// Listener pose as seen by the mixer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListenerFrame {
    /// World-space position
    pub position: Vec3,
    /// World-space unit vector pointing to the listener's right
    pub right: Vec3,
}

impl Default for ListenerFrame {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            right: Vec3::x(),
        }
    }
}

impl ListenerFrame {
    /// Set the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the right direction; it is normalized, zero vectors are ignored
    pub fn set_right(&mut self, right: Vec3) {
        if let Some(unit) = right.try_normalize(f32::EPSILON) {
            self.right = unit;
        }
    }

    /// Left and right channel gains for a source at `source`
    ///
    /// Equal-power pan driven by how far the source lies toward the
    /// listener's right. A source at the listener is centered.
    pub fn pan_gains(&self, source: Vec3) -> (f32, f32) {
        let pan = (source - self.position)
            .try_normalize(f32::EPSILON)
            .map_or(0.0, |dir| self.right.dot(&dir).clamp(-1.0, 1.0));
        let angle = (pan + 1.0) * FRAC_PI_4;
        (angle.cos(), angle.sin())
    }
}

/// Distance attenuation that halves volume at `half_volume_radius`
pub fn attenuation(distance: f32, half_volume_radius: f32) -> f32 {
    if half_volume_radius <= 0.0 {
        return if distance <= 0.0 { 1.0 } else { 0.0 };
    }
    half_volume_radius / (half_volume_radius + distance.max(0.0))
}

/// Shared, lock-guarded access to the listener pose
///
/// Writers must change the pose only inside [`ListenerLock::update`];
/// readers take whole-frame copies with [`ListenerLock::snapshot`].
pub trait ListenerLock: Send + Sync {
    /// Run `update` while holding the listener lock
    fn update(&self, update: &mut dyn FnMut(&mut ListenerFrame));

    /// Copy of the current pose, taken under the listener lock
    fn snapshot(&self) -> ListenerFrame;
}

/// Mutex-backed listener
#[derive(Debug, Default)]
pub struct Listener {
    frame: Mutex<ListenerFrame>,
}

impl Listener {
    /// Create a listener at the origin facing with +X to its right
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListenerLock for Listener {
    fn update(&self, update: &mut dyn FnMut(&mut ListenerFrame)) {
        let mut frame = self.frame.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut frame);
    }

    fn snapshot(&self) -> ListenerFrame {
        *self.frame.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
