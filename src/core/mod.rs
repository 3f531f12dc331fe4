//! Core types: card identity, geometry, curves, and configuration.

pub mod card;
pub mod config;
pub mod curve;
pub mod geom;

pub use card::{CardId, CardToken, SpriteHandle};
pub use config::{ConfigError, TableConfig};
pub use curve::{Curve, Ease, Keyframe};
pub use geom::Vec2;
