//! Pile data structure for card stacks.
//!
//! A `Pile` is an ordered LIFO collection of cards with deterministic
//! layout: given a base position and an offset curve, every index maps to
//! a world position and a draw order. It supports:
//! - Push/pop with stack semantics (top = most recently pushed)
//! - Bulk populate from an ordered list (reversed, so pop order matches
//!   list order)
//! - Placement queries for a card that hasn't been pushed yet, so an
//!   animation target is known before the push happens
//!
//! The duplicate-card invariant (no card in two piles, none twice in one)
//! is enforced by the pile's owner, which controls all card movement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::card::CardToken;
use crate::core::curve::Curve;
use crate::core::geom::Vec2;

/// Pile operation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PileError {
    /// Pop was called on an empty pile.
    #[error("pile is empty")]
    Empty,
}

/// Where a card sits in a pile: world position plus draw order.
///
/// Draw order increases toward the top of the pile, so later cards
/// render above earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// World position of the card.
    pub position: Vec2,

    /// Render priority; higher draws on top.
    pub draw_order: u32,
}

/// An ordered stack of cards with deterministic layout.
///
/// ## Layout
///
/// A card at index `i` (0 = bottom) sits at
/// `base + (0, offset_curve.evaluate(i / capacity))`. Normalizing by the
/// table capacity rather than the current count keeps a card's offset
/// stable as the pile grows.
///
/// ## Usage
///
/// ```
/// use card_table::core::{CardId, CardToken, Curve, SpriteHandle, Vec2};
/// use card_table::pile::Pile;
///
/// let cards: Vec<_> = (0..3)
///     .map(|i| CardToken::new(CardId::new(i), SpriteHandle::new(i)))
///     .collect();
///
/// let mut pile = Pile::new(Vec2::ZERO, Curve::linear(0.0, 1.0), 3);
/// pile.populate(&cards);
///
/// // Pop order matches list order
/// assert_eq!(pile.pop().unwrap(), cards[0]);
/// assert_eq!(pile.pop().unwrap(), cards[1]);
/// ```
#[derive(Clone, Debug)]
pub struct Pile {
    base: Vec2,
    offset_curve: Curve,
    capacity: usize,
    cards: Vec<CardToken>,
}

impl Pile {
    /// Create an empty pile.
    ///
    /// `capacity` is the table capacity used to normalize layout offsets,
    /// not a hard card limit.
    #[must_use]
    pub fn new(base: Vec2, offset_curve: Curve, capacity: usize) -> Self {
        Self {
            base,
            offset_curve,
            capacity,
            cards: Vec::with_capacity(capacity),
        }
    }

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the pile has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The top card, if any (most recently pushed, next to pop).
    #[must_use]
    pub fn top(&self) -> Option<CardToken> {
        self.cards.last().copied()
    }

    /// Whether the pile contains the given card.
    #[must_use]
    pub fn contains(&self, card: CardToken) -> bool {
        self.cards.iter().any(|c| c.id == card.id)
    }

    /// Push a card onto the top, returning its placement.
    pub fn push(&mut self, card: CardToken) -> Placement {
        let placement = self.placement_at(self.cards.len());
        self.cards.push(card);
        placement
    }

    /// Remove and return the top card.
    pub fn pop(&mut self) -> Result<CardToken, PileError> {
        self.cards.pop().ok_or(PileError::Empty)
    }

    /// Remove all cards. No animation; O(n).
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Clear, then push `cards` in reverse order so the first card to be
    /// popped is `cards[0]`.
    pub fn populate(&mut self, cards: &[CardToken]) {
        self.clear();
        for card in cards.iter().rev() {
            self.push(*card);
        }
    }

    /// Placement an incoming card would get if pushed right now.
    ///
    /// Pure query; used to aim a move animation at the destination slot
    /// before the card is actually pushed.
    #[must_use]
    pub fn incoming_placement(&self) -> Placement {
        self.placement_at(self.cards.len())
    }

    /// World position of the current top card, or the base slot when
    /// empty.
    #[must_use]
    pub fn top_position(&self) -> Vec2 {
        let index = self.cards.len().saturating_sub(1);
        self.placement_at(index).position
    }

    /// Current layout of every card, bottom to top.
    ///
    /// Placements are recomputed from current indices, so this reflects
    /// any pushes or pops since the last query.
    pub fn layout(&self) -> impl Iterator<Item = (CardToken, Placement)> + '_ {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, &card)| (card, self.placement_at(i)))
    }

    /// Placement for a card at `index`.
    fn placement_at(&self, index: usize) -> Placement {
        let capacity = self.capacity.max(1);
        let t = index as f32 / capacity as f32;
        Placement {
            position: self.base + Vec2::new(0.0, self.offset_curve.evaluate(t)),
            draw_order: index as u32,
        }
    }
}
