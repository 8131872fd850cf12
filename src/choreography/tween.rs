use bevy::prelude::*;

use crate::choreography::easing::Easing;

/// Time-bounded interpolation of a world-space vector.
///
/// Advancement is explicit: the owner feeds elapsed seconds every frame, so no
/// scheduler or wall clock is involved.
#[derive(Clone, Debug)]
pub struct Tween {
    /// Value at progress zero.
    start: Vec3,
    /// Value at progress one.
    end: Vec3,
    /// Total duration in seconds.
    duration: f32,
    /// Seconds elapsed since the tween started.
    elapsed: f32,
    /// Curve applied to linear progress.
    easing: Easing,
}

impl Tween {
    /// Start a tween from `start` toward `end` over `duration` seconds.
    pub fn new(start: Vec3, end: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Destination value.
    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= f32::EPSILON {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Current interpolated value.
    pub fn value(&self) -> Vec3 {
        if self.is_finished() {
            return self.end;
        }
        self.start.lerp(self.end, (self.easing)(self.progress()))
    }

    /// Whether the tween has reached its end value.
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }
}
