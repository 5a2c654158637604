//! The Catalog Store seam.
//!
//! The store that holds cards and decks (a cloud document database in the
//! bot) lives outside this crate. `CatalogStore` is the narrow interface the
//! deck workflow needs from it; `MemoryCatalog` implements it in memory for
//! tests and for embedding code that keeps everything local.

use std::convert::Infallible;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::cards::{Card, CardFactory, CardKind};
use crate::core::error::CardDataError;
use crate::core::ids::{CardId, DeckId, UserId};
use crate::deck::Deck;

/// Card and deck lookup plus deck persistence.
///
/// Lookups return owned snapshots; the caller mutates its copy and hands it
/// back through `save_deck`. Serialising concurrent edits of one deck is the
/// implementation's concern.
pub trait CatalogStore {
    /// Failure raised by the backing store (network, permissions, ...).
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_card(&self, id: &CardId) -> Result<Option<Card>, Self::Error>;

    fn get_deck(&self, id: &DeckId) -> Result<Option<Deck>, Self::Error>;

    /// Insert or replace a deck.
    fn save_deck(&mut self, deck: &Deck) -> Result<(), Self::Error>;

    /// Delete a deck owned by `owner`. Returns `false` if no such deck
    /// exists or it belongs to someone else.
    fn delete_deck(&mut self, id: &DeckId, owner: &UserId) -> Result<bool, Self::Error>;
}

/// In-memory catalog.
///
/// ## Example
///
/// ```
/// use tcg_deckbuilder::cards::{Card, CardBase, EventCard};
/// use tcg_deckbuilder::catalog::{CatalogStore, MemoryCatalog};
/// use tcg_deckbuilder::core::CardId;
///
/// let mut catalog = MemoryCatalog::new();
/// catalog.register(Card::Event(EventCard {
///     base: CardBase::new("strategize", "Strategize").with_cost(1),
///     duration: None,
/// }));
///
/// let found = catalog.get_card(&CardId::new("strategize")).unwrap().unwrap();
/// assert_eq!(found.name(), "Strategize");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    cards: FxHashMap<CardId, Card>,
    decks: FxHashMap<DeckId, Deck>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card. Returns `false` (and keeps the existing card) if
    /// the id is already taken.
    pub fn register(&mut self, card: Card) -> bool {
        if self.cards.contains_key(card.id()) {
            return false;
        }
        self.cards.insert(card.id().clone(), card);
        true
    }

    /// Build cards from JSON records and register them.
    ///
    /// Stops at the first malformed record. Returns how many new cards were
    /// registered.
    pub fn import_json<'a>(
        &mut self,
        factory: &CardFactory,
        records: impl IntoIterator<Item = &'a Value>,
    ) -> Result<usize, CardDataError> {
        let mut added = 0;
        for record in records {
            if self.register(factory.create_card_from_json(record)?) {
                added += 1;
            }
        }
        Ok(added)
    }

    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains_card(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Cards of one kind.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(move |c| c.kind() == kind)
    }

    /// Cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }

    /// Cards whose name contains `query`, case-insensitively, sorted by name.
    #[must_use]
    pub fn search_by_name(&self, query: &str) -> Vec<&Card> {
        let needle = query.trim().to_lowercase();
        let mut hits: Vec<&Card> = self
            .find(|c| c.name().to_lowercase().contains(&needle))
            .collect();
        hits.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        hits
    }

    /// Decks owned by `owner`, sorted by name.
    #[must_use]
    pub fn decks_of(&self, owner: &UserId) -> Vec<&Deck> {
        let mut decks: Vec<&Deck> = self.decks.values().filter(|d| d.is_owned_by(owner)).collect();
        decks.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        decks
    }
}

impl CatalogStore for MemoryCatalog {
    type Error = Infallible;

    fn get_card(&self, id: &CardId) -> Result<Option<Card>, Self::Error> {
        Ok(self.cards.get(id).cloned())
    }

    fn get_deck(&self, id: &DeckId) -> Result<Option<Deck>, Self::Error> {
        Ok(self.decks.get(id).cloned())
    }

    fn save_deck(&mut self, deck: &Deck) -> Result<(), Self::Error> {
        self.decks.insert(deck.id.clone(), deck.clone());
        Ok(())
    }

    fn delete_deck(&mut self, id: &DeckId, owner: &UserId) -> Result<bool, Self::Error> {
        match self.decks.get(id) {
            Some(deck) if deck.is_owned_by(owner) => {
                self.decks.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
