//! Animation scheduling and the deterministic tick engine.
//!
//! The sequencer talks to animation through the [`AnimationEngine`]
//! trait: schedule a transition, get back a cancellable id, learn about
//! completion from `advance`. [`TickEngine`] is the crate's deterministic
//! implementation - it advances only on explicit ticks, which makes the
//! whole system reproducible in tests and lets the presentation layer
//! drive it from its frame loop.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::spec::{TransformSample, TransitionSpec};
use crate::core::geom::Vec2;

/// Identifier for a scheduled transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Anim({})", self.0)
    }
}

/// Completed transition ids from one tick.
///
/// The sequencer runs at most one move at a time, so one inline slot
/// covers the common case.
pub type Completed = SmallVec<[AnimationId; 1]>;

/// Scheduling and cancellation contract the sequencer depends on.
///
/// ## Contract
///
/// - `advance` reports each scheduled transition complete at most once.
/// - `cancel` is idempotent and suppresses a pending completion; a
///   cancelled id is never reported by `advance`.
/// - `set_time_scale` affects only transitions scheduled afterwards;
///   in-flight transitions keep the rate they started with.
pub trait AnimationEngine {
    /// Schedule a transition, returning its cancellable id.
    fn schedule(&mut self, spec: TransitionSpec) -> AnimationId;

    /// Cancel a transition. No-op if the id is unknown or already done.
    fn cancel(&mut self, id: AnimationId);

    /// Set the presentation time scale for future transitions.
    fn set_time_scale(&mut self, scale: f32);

    /// Advance by `dt` seconds of real time; returns transitions that
    /// finished during this tick.
    fn advance(&mut self, dt: f32) -> Completed;
}

/// One in-flight transition inside the tick engine.
#[derive(Clone, Debug)]
struct Flight {
    spec: TransitionSpec,
    /// Elapsed logical seconds (real time already multiplied by `rate`).
    elapsed: f32,
    /// Time scale snapshotted at schedule time.
    rate: f32,
}

impl Flight {
    fn sample(&self) -> TransformSample {
        let spec = &self.spec;
        let half = spec.phase_duration;

        let (position, scale) = if self.elapsed < half {
            // Phase 1: source -> midpoint, scale 1 -> peak
            let t = self.elapsed / half;
            let eased = spec.move_ease.apply(t);
            let scale = 1.0 + (spec.peak_scale - 1.0) * spec.scale_curve.evaluate(t);
            (spec.from.lerp(spec.midpoint, eased), scale)
        } else {
            // Phase 2: midpoint -> destination, scale back to 1
            let t = ((self.elapsed - half) / half).min(1.0);
            let eased = spec.move_ease.apply(t);
            let scale = spec.peak_scale + (1.0 - spec.peak_scale) * t;
            (spec.midpoint.lerp(spec.to, eased), scale)
        };

        TransformSample {
            sprite: spec.sprite,
            position,
            scale,
            draw_order: spec.draw_order,
        }
    }
}

/// Deterministic tick-driven animation engine.
///
/// Advances only when `advance` is called; the presentation layer
/// samples in-flight transforms with [`TickEngine::sample`] and applies
/// them to its sprites.
#[derive(Clone, Debug, Default)]
pub struct TickEngine {
    flights: FxHashMap<AnimationId, Flight>,
    time_scale: f32,
    next_id: u64,
}

impl TickEngine {
    /// Create an engine at time scale 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flights: FxHashMap::default(),
            time_scale: 1.0,
            next_id: 0,
        }
    }

    /// Number of in-flight transitions.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.flights.len()
    }

    /// Current time scale applied to newly scheduled transitions.
    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Interpolated transform of an in-flight transition, or `None` if
    /// the id is unknown, finished, or cancelled.
    #[must_use]
    pub fn sample(&self, id: AnimationId) -> Option<TransformSample> {
        self.flights.get(&id).map(Flight::sample)
    }

    /// Remaining logical seconds of an in-flight transition.
    #[must_use]
    pub fn remaining(&self, id: AnimationId) -> Option<f32> {
        self.flights
            .get(&id)
            .map(|f| (f.spec.total_duration() - f.elapsed).max(0.0))
    }
}

impl AnimationEngine for TickEngine {
    fn schedule(&mut self, spec: TransitionSpec) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.flights.insert(
            id,
            Flight {
                spec,
                elapsed: 0.0,
                rate: self.time_scale,
            },
        );
        id
    }

    fn cancel(&mut self, id: AnimationId) {
        // Removal suppresses any pending completion; unknown ids are a
        // defined no-op, so cancel is idempotent.
        self.flights.remove(&id);
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    fn advance(&mut self, dt: f32) -> Completed {
        let mut done = Completed::new();
        for (&id, flight) in &mut self.flights {
            flight.elapsed += dt * flight.rate;
            if flight.elapsed >= flight.spec.total_duration() {
                done.push(id);
            }
        }
        for id in &done {
            self.flights.remove(id);
        }
        done
    }
}
