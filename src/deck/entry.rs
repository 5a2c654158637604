//! Deck line items.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind};
use crate::core::ids::CardId;

/// One line of a deck: a card reference, a display snapshot and a count.
///
/// The name and kind are copied from the catalog when the card is first
/// added so that a deck can be rendered without looking every card up
/// again. The quantity is always at least 1; an entry whose quantity would
/// reach zero is removed from the deck instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckCard {
    pub card_id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub quantity: u32,
}

impl DeckCard {
    #[must_use]
    pub fn new(
        card_id: impl Into<CardId>,
        name: impl Into<String>,
        kind: CardKind,
        quantity: u32,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            name: name.into(),
            kind,
            quantity,
        }
    }

    /// Snapshot a catalog card.
    #[must_use]
    pub fn from_card(card: &Card, quantity: u32) -> Self {
        Self::new(card.id().clone(), card.name(), card.kind(), quantity)
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.kind == CardKind::Character
    }
}

impl std::fmt::Display for DeckCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.name, self.quantity)
    }
}
