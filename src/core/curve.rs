//! Evaluation curves for layout and animation.
//!
//! Two flavors:
//!
//! - `Curve`: a piecewise-linear keyframe curve over `[0, 1]`, used for
//!   stack layout offsets and the mid-move scale envelope. This is the
//!   data-driven equivalent of an editor-authored animation curve.
//! - `Ease`: closed-form easing functions for motion timing.
//!
//! Curves clamp outside the domain of their keyframes, so sampling is
//! total once construction succeeds.

use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// A single keyframe of a [`Curve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in `[0, 1]`.
    pub t: f32,
    /// Curve value at `t`.
    pub value: f32,
}

impl Keyframe {
    /// Create a new keyframe.
    #[must_use]
    pub const fn new(t: f32, value: f32) -> Self {
        Self { t, value }
    }
}

/// Piecewise-linear keyframe curve mapping `[0, 1]` to a value.
///
/// Keyframes must be supplied in strictly increasing `t` order.
/// Evaluation clamps to the first/last keyframe outside their range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    keys: Vec<Keyframe>,
}

impl Curve {
    /// Create a curve from keyframes.
    ///
    /// Fails if `keys` is empty or not strictly increasing in `t`.
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, ConfigError> {
        let curve = Self { keys };
        curve.check()?;
        Ok(curve)
    }

    /// Verify the keyframe invariants.
    ///
    /// `Curve` derives `Deserialize`, so a curve loaded from data can
    /// bypass [`Curve::new`]; configuration validation re-checks every
    /// curve through here before any evaluation happens.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::EmptyCurve);
        }
        if self.keys.windows(2).any(|w| w[0].t >= w[1].t) {
            return Err(ConfigError::UnsortedCurve);
        }
        Ok(())
    }

    /// A curve that evaluates to `value` everywhere.
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// A straight line from `(0, start)` to `(1, end)`.
    #[must_use]
    pub fn linear(start: f32, end: f32) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, start), Keyframe::new(1.0, end)],
        }
    }

    /// Evaluate the curve at `t`, clamping outside the keyframe range.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let first = self.keys[0];
        if t <= first.t {
            return first.value;
        }
        let last = self.keys[self.keys.len() - 1];
        if t >= last.t {
            return last.value;
        }

        // t is strictly inside the keyframe range, so a bracketing
        // segment exists.
        for w in self.keys.windows(2) {
            let (a, b) = (w[0], w[1]);
            if t <= b.t {
                let local = (t - a.t) / (b.t - a.t);
                return a.value + (b.value - a.value) * local;
            }
        }
        last.value
    }

    /// Number of keyframes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the curve has no keyframes. Always false for a
    /// successfully constructed curve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Closed-form easing function for animation timing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    /// No easing.
    Linear,
    /// Quartic ease-in-out, the standard card-move ease.
    #[default]
    InOutQuart,
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::InOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u * u / 2.0
                }
            }
        }
    }
}
