//! Transition descriptions and sampled output.

use serde::{Deserialize, Serialize};

use crate::core::card::SpriteHandle;
use crate::core::curve::{Curve, Ease};
use crate::core::geom::Vec2;

/// Description of a two-phase card move.
///
/// Phase 1: `from` to `midpoint`, scaling from 1 to `peak_scale` along
/// `scale_curve`. Phase 2: `midpoint` to `to`, scaling back to 1. Each
/// phase lasts `phase_duration` logical seconds; the engine applies the
/// presentation time scale on top.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Visual being moved.
    pub sprite: SpriteHandle,

    /// Start position (the source pile's top slot).
    pub from: Vec2,

    /// Pass-through position between the piles.
    pub midpoint: Vec2,

    /// End position (the destination pile's incoming slot).
    pub to: Vec2,

    /// Duration of each phase, in logical seconds.
    pub phase_duration: f32,

    /// Easing applied to both positional phases.
    pub move_ease: Ease,

    /// Scale envelope for phase 1, sampled over that phase's progress.
    pub scale_curve: Curve,

    /// Uniform scale reached at the midpoint.
    pub peak_scale: f32,

    /// Draw order for the card while in flight (topmost).
    pub draw_order: u32,
}

impl TransitionSpec {
    /// Total logical duration of both phases.
    #[must_use]
    pub fn total_duration(&self) -> f32 {
        self.phase_duration * 2.0
    }
}

/// Interpolated state of an in-flight transition, for the presentation
/// layer to apply each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformSample {
    /// Visual this sample applies to.
    pub sprite: SpriteHandle,

    /// Current world position.
    pub position: Vec2,

    /// Current uniform scale.
    pub scale: f32,

    /// Render priority while in flight.
    pub draw_order: u32,
}
