//! Time-driven scalar interpolation
//!
//! A `Tween` advances a value from start to end over a fixed duration,
//! clamping at the end and reporting completion exactly once. Instead of
//! stored callbacks, [`Tween::update`] returns a [`TweenStep`] and the
//! owner reacts to it; this keeps the type plain data (serializable,
//! no borrow knots) while preserving the "finish fires once" contract.

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// 3t² - 2t³
    Smoothstep,
}

impl Easing {
    fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Result of advancing a tween by one delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    /// Interpolated value after the update
    pub value: f32,
    /// True on the single update that crosses the duration
    pub just_finished: bool,
}

/// Scalar interpolation driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tween {
    start: f32,
    end: f32,
    duration: f32,
    easing: Easing,
    elapsed: f32,
    finished: bool,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration: f32) -> Self {
        Self {
            start,
            end,
            duration,
            easing: Easing::Linear,
            elapsed: 0.0,
            finished: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Restart from the beginning
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.finished = false;
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Current value without advancing
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.end;
        }
        let t = self.easing.apply((self.elapsed / self.duration).min(1.0));
        self.start + (self.end - self.start) * t
    }

    /// Advance by `delta_secs`, clamping at the duration.
    ///
    /// Updating a finished tween is a no-op that reports the end value
    /// with `just_finished == false`.
    pub fn update(&mut self, delta_secs: f32) -> TweenStep {
        if self.finished {
            return TweenStep {
                value: self.end,
                just_finished: false,
            };
        }

        self.elapsed = (self.elapsed + delta_secs).min(self.duration);

        let done = self.elapsed >= self.duration;
        if done {
            self.elapsed = self.duration;
            self.finished = true;
        }

        TweenStep {
            value: self.value(),
            just_finished: done,
        }
    }
}
