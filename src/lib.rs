//! # card-table
//!
//! A dual-stack card deck animation sequencer.
//!
//! Cards move one at a time from a source pile to a destination pile,
//! each move a two-phase animation (up to a midpoint with a scale pop,
//! then down onto the destination). Playback is pause/resumable, speed
//! is cyclable, and the whole system is driven by explicit ticks so it
//! stays deterministic and testable.
//!
//! ## Design Principles
//!
//! 1. **Logic, not rendering**: the crate tracks piles, schedules
//!    animations and emits layout data; the presentation layer owns all
//!    sprites and applies the output.
//!
//! 2. **Cooperative single thread**: everything advances inside `tick`;
//!    at most one move animation is in flight per table, guarded by a
//!    single-flight check rather than locks.
//!
//! 3. **Configuration over convention**: card lists, curves, timing and
//!    positions are injected via `TableConfig` at construction - nothing
//!    is loaded from well-known paths.
//!
//! ## Modules
//!
//! - `core`: card identity, geometry, curves, configuration
//! - `pile`: the ordered card stack with deterministic layout
//! - `anim`: transition specs, the engine trait, the tick engine
//! - `table`: the sequencer state machine and its event registry

pub mod anim;
pub mod core;
pub mod pile;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    CardId, CardToken, ConfigError, Curve, Ease, Keyframe, SpriteHandle, TableConfig, Vec2,
};

pub use crate::pile::{Pile, PileError, Placement};

pub use crate::anim::{AnimationEngine, AnimationId, TickEngine, TransformSample, TransitionSpec};

pub use crate::table::{CardTable, TableListeners, TableState};
