//! Table configuration.
//!
//! The embedding application configures a table at startup by providing a
//! `TableConfig`: the ordered card list (which defines both capacity and
//! the order cards leave the source pile), layout and scale curves,
//! animation timing, and pile positions. The engine never loads
//! configuration from a well-known path - it is injected at construction
//! and validated there.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card::CardToken;
use super::curve::{Curve, Ease};
use super::geom::Vec2;

/// Configuration validation failure.
///
/// Any of these means the table cannot be constructed; there is no
/// degraded mode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The card list is empty, so there's nothing to sequence.
    #[error("card list is empty")]
    EmptyCardList,

    /// A card appears more than once in the card list.
    #[error("duplicate card in card list")]
    DuplicateCard,

    /// The per-phase move duration is not strictly positive.
    #[error("move duration must be positive")]
    InvalidDuration,

    /// `max_speed` is zero; the speed cycle needs at least level 1.
    #[error("max speed level must be at least 1")]
    InvalidSpeedRange,

    /// The midpoint scale factor is not strictly positive.
    #[error("midpoint scale must be positive")]
    InvalidScale,

    /// A curve was constructed with no keyframes.
    #[error("curve has no keyframes")]
    EmptyCurve,

    /// Curve keyframes are not strictly increasing in time.
    #[error("curve keyframes must be strictly increasing in time")]
    UnsortedCurve,
}

/// Complete configuration for a [`CardTable`](crate::table::CardTable).
///
/// ## Layout model
///
/// Each pile sits at a base position. A card at index `i` in a pile of
/// capacity `n` is offset vertically by `offset_curve.evaluate(i / n)`,
/// which keeps piles visually compact regardless of count.
///
/// ## Move animation
///
/// A move is two phases of `move_duration` logical seconds each: source
/// top to `midpoint` while scaling from 1 to `midpoint_scale` along
/// `scale_curve`, then `midpoint` to the destination slot while scaling
/// back to 1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableConfig {
    /// Ordered card list. `cards[0]` is the first card to leave the
    /// source pile; the list length is the table's capacity.
    pub cards: Vec<CardToken>,

    /// Vertical stacking offset per normalized pile index.
    pub offset_curve: Curve,

    /// Scale envelope for the first move phase.
    pub scale_curve: Curve,

    /// Easing applied to both positional move phases.
    pub move_ease: Ease,

    /// Duration of each move phase, in logical seconds.
    pub move_duration: f32,

    /// Highest speed level; `toggle_speed` cycles `1..=max_speed`.
    pub max_speed: u8,

    /// World position cards pass through between piles.
    pub midpoint: Vec2,

    /// Peak uniform scale at the midpoint.
    pub midpoint_scale: f32,

    /// Base position of the source pile.
    pub source_base: Vec2,

    /// Base position of the destination pile.
    pub dest_base: Vec2,
}

impl TableConfig {
    /// Create a configuration with the standard timing and layout
    /// defaults for the given card list.
    pub fn new(cards: Vec<CardToken>) -> Self {
        Self {
            cards,
            offset_curve: Curve::linear(0.0, 1.0),
            scale_curve: Curve::linear(0.0, 1.0),
            move_ease: Ease::InOutQuart,
            move_duration: 0.5,
            max_speed: 4,
            midpoint: Vec2::ZERO,
            midpoint_scale: 1.2,
            source_base: Vec2::new(-3.0, 0.0),
            dest_base: Vec2::new(3.0, 0.0),
        }
    }

    /// Set the stacking offset curve.
    #[must_use]
    pub fn with_offset_curve(mut self, curve: Curve) -> Self {
        self.offset_curve = curve;
        self
    }

    /// Set the midpoint scale envelope curve.
    #[must_use]
    pub fn with_scale_curve(mut self, curve: Curve) -> Self {
        self.scale_curve = curve;
        self
    }

    /// Set the per-phase move duration in logical seconds.
    #[must_use]
    pub fn with_move_duration(mut self, seconds: f32) -> Self {
        self.move_duration = seconds;
        self
    }

    /// Set the highest speed level.
    #[must_use]
    pub fn with_max_speed(mut self, max: u8) -> Self {
        self.max_speed = max;
        self
    }

    /// Set the animation midpoint and peak scale.
    #[must_use]
    pub fn with_midpoint(mut self, midpoint: Vec2, scale: f32) -> Self {
        self.midpoint = midpoint;
        self.midpoint_scale = scale;
        self
    }

    /// Set the pile base positions.
    #[must_use]
    pub fn with_pile_positions(mut self, source: Vec2, dest: Vec2) -> Self {
        self.source_base = source;
        self.dest_base = dest;
        self
    }

    /// Number of cards the table sequences; also the topmost draw order
    /// assigned to a card in flight.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cards.len()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cards.is_empty() {
            return Err(ConfigError::EmptyCardList);
        }
        for (i, card) in self.cards.iter().enumerate() {
            if self.cards[..i].iter().any(|c| c.id == card.id) {
                return Err(ConfigError::DuplicateCard);
            }
        }
        // Curves deserialized from data bypass Curve::new, so their
        // invariants are re-checked here.
        self.offset_curve.check()?;
        self.scale_curve.check()?;
        if !(self.move_duration > 0.0) {
            return Err(ConfigError::InvalidDuration);
        }
        if self.max_speed == 0 {
            return Err(ConfigError::InvalidSpeedRange);
        }
        if !(self.midpoint_scale > 0.0) {
            return Err(ConfigError::InvalidScale);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{CardId, SpriteHandle};

    fn cards(n: u32) -> Vec<CardToken> {
        (0..n)
            .map(|i| CardToken::new(CardId::new(i), SpriteHandle::new(i)))
            .collect()
    }

    #[test]
    fn test_defaults_valid() {
        let config = TableConfig::new(cards(3));
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity(), 3);
        assert_eq!(config.max_speed, 4);
    }

    #[test]
    fn test_empty_card_list() {
        let config = TableConfig::new(vec![]);
        assert_eq!(config.validate(), Err(ConfigError::EmptyCardList));
    }

    #[test]
    fn test_duplicate_card() {
        let mut list = cards(2);
        list.push(CardToken::new(CardId::new(0), SpriteHandle::new(9)));
        let config = TableConfig::new(list);
        assert_eq!(config.validate(), Err(ConfigError::DuplicateCard));
    }

    #[test]
    fn test_invalid_duration() {
        let config = TableConfig::new(cards(2)).with_move_duration(0.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidDuration));

        let config = TableConfig::new(cards(2)).with_move_duration(f32::NAN);
        assert_eq!(config.validate(), Err(ConfigError::InvalidDuration));
    }

    #[test]
    fn test_invalid_speed_range() {
        let config = TableConfig::new(cards(2)).with_max_speed(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeedRange));
    }

    #[test]
    fn test_invalid_scale() {
        let config = TableConfig::new(cards(2)).with_midpoint(Vec2::ZERO, 0.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidScale));
    }

    #[test]
    fn test_builder() {
        let config = TableConfig::new(cards(4))
            .with_move_duration(1.0)
            .with_max_speed(2)
            .with_midpoint(Vec2::new(0.0, 1.0), 1.5)
            .with_pile_positions(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0));

        assert_eq!(config.move_duration, 1.0);
        assert_eq!(config.max_speed, 2);
        assert_eq!(config.midpoint_scale, 1.5);
        assert_eq!(config.source_base, Vec2::new(-5.0, 0.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialized_empty_curve_rejected() {
        // Deserialization bypasses Curve::new, so validate must catch a
        // keyframe-less curve before it is ever evaluated
        let mut value = serde_json::to_value(TableConfig::new(cards(2))).unwrap();
        value["offset_curve"]["keys"] = serde_json::json!([]);

        let loaded: TableConfig = serde_json::from_value(value).unwrap();
        assert_eq!(loaded.validate(), Err(ConfigError::EmptyCurve));
    }

    #[test]
    fn test_deserialized_unsorted_curve_rejected() {
        let mut value = serde_json::to_value(TableConfig::new(cards(2))).unwrap();
        value["scale_curve"]["keys"] = serde_json::json!([
            { "t": 0.8, "value": 1.0 },
            { "t": 0.2, "value": 0.0 },
        ]);

        let loaded: TableConfig = serde_json::from_value(value).unwrap();
        assert_eq!(loaded.validate(), Err(ConfigError::UnsortedCurve));
    }

    #[test]
    fn test_serde_round_trip() {
        let config = TableConfig::new(cards(3)).with_max_speed(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: TableConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.cards, config.cards);
        assert_eq!(back.max_speed, 3);
        assert!(back.validate().is_ok());
    }
}
