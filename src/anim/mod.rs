//! Card move animation: transition specs, the engine trait, and the
//! deterministic tick implementation.
//!
//! ## Key Types
//!
//! - `TransitionSpec`: describes one two-phase card move
//! - `AnimationEngine`: scheduling/cancellation seam the sequencer uses
//! - `TickEngine`: deterministic, tick-driven implementation
//! - `TransformSample`: interpolated per-frame output for rendering

pub mod engine;
pub mod spec;

pub use engine::{AnimationEngine, AnimationId, Completed, TickEngine};
pub use spec::{TransformSample, TransitionSpec};
