//! Card identification.
//!
//! Every card on the table has a `CardId` (its identity for the whole
//! session) and a `SpriteHandle` (a reference to a visual owned by the
//! presentation layer). The engine never interprets either - they're
//! opaque identifiers the embedding application assigns meaning to.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card.
///
/// Immutable for the card's lifetime. The engine only compares these
/// for equality; the embedding application maps them to faces, names, etc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Handle to a card visual owned by the presentation layer.
///
/// The engine references sprites but never owns or draws them. Layout
/// output (`Placement`, `TransformSample`) is keyed by this handle so
/// the renderer can apply it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

impl SpriteHandle {
    /// Create a new sprite handle.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SpriteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sprite({})", self.0)
    }
}

/// A card as tracked by piles and the sequencer.
///
/// Identity plus a visual reference. Cheap to copy; the token itself
/// carries no mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardToken {
    /// The card's identity.
    pub id: CardId,

    /// The presentation-layer visual for this card.
    pub sprite: SpriteHandle,
}

impl CardToken {
    /// Create a new card token.
    #[must_use]
    pub const fn new(id: CardId, sprite: SpriteHandle) -> Self {
        Self { id, sprite }
    }
}
