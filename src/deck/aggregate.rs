//! The deck aggregate.
//!
//! A `Deck` is an ordered list of `DeckCard` entries owned by one user.
//! Mutation is permissive: `add_card` never checks the legality limits, so
//! a deck can pass through over-full or incomplete states while it is being
//! edited. Legality is reported on demand by `validate_deck` and enforced
//! at save time by `DeckEditor::commit`.
//!
//! Entries live in an `im::Vector`, so cloning a deck to hand a snapshot to
//! the Catalog Store is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::entry::DeckCard;
use crate::cards::{Card, CardKind};
use crate::core::config::DeckRules;
use crate::core::error::DeckError;
use crate::core::ids::{CardId, DeckId, UserId};
use crate::rules::{DeckValidator, ValidationResult};

/// A user-owned collection of card references.
///
/// ## Example
///
/// ```
/// use tcg_deckbuilder::cards::CardKind;
/// use tcg_deckbuilder::core::DeckRules;
/// use tcg_deckbuilder::deck::Deck;
///
/// let mut deck = Deck::new("d1", "Burning Dawn", "123456");
/// assert!(deck.add_card("diluc", "Diluc", CardKind::Character, 1));
/// assert!(deck.add_card("strategize", "Strategize", CardKind::Event, 2));
///
/// assert_eq!(deck.get_total_cards(), 3);
/// assert_eq!(deck.get_character_count(), 1);
/// assert!(deck.validate_deck(&DeckRules::default()).is_valid());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredDeck")]
pub struct Deck {
    pub id: DeckId,

    /// User-chosen name, trimmed.
    pub name: String,

    /// Owner. Only the owner may edit or delete the deck.
    pub user_id: UserId,

    cards: Vector<DeckCard>,

    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Wire form of a deck. Entries are normalised on the way in.
#[derive(Deserialize)]
struct StoredDeck {
    id: DeckId,
    name: String,
    user_id: UserId,
    #[serde(default)]
    cards: Vec<DeckCard>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<StoredDeck> for Deck {
    fn from(stored: StoredDeck) -> Self {
        let mut deck = Deck::new(stored.id, stored.name, stored.user_id).with_cards(stored.cards);
        deck.created_at = stored.created_at;
        deck.updated_at = stored.updated_at;
        deck
    }
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new(id: impl Into<DeckId>, name: impl AsRef<str>, user_id: impl Into<UserId>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: id.into(),
            name: name.as_ref().trim().to_string(),
            user_id: user_id.into(),
            cards: Vector::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the entry list (builder pattern, for loading stored decks).
    ///
    /// Zero-quantity entries are dropped and repeated card ids are merged
    /// into the first entry, so every card has at most one entry.
    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = DeckCard>) -> Self {
        let mut merged: Vector<DeckCard> = Vector::new();
        for card in cards {
            if card.quantity == 0 {
                continue;
            }
            match merged.iter().position(|c| c.card_id == card.card_id) {
                Some(index) => {
                    let entry = &mut merged[index];
                    entry.quantity = entry.quantity.saturating_add(card.quantity);
                }
                None => merged.push_back(card),
            }
        }
        self.cards = merged;
        self
    }

    /// Entries in deck order.
    pub fn cards(&self) -> impl Iterator<Item = &DeckCard> {
        self.cards.iter()
    }

    /// Entry for a card, if present.
    #[must_use]
    pub fn entry(&self, card_id: &CardId) -> Option<&DeckCard> {
        self.cards.iter().find(|c| &c.card_id == card_id)
    }

    /// Copies of a card in the deck (0 if absent).
    #[must_use]
    pub fn quantity_of(&self, card_id: &CardId) -> u32 {
        self.entry(card_id).map_or(0, |c| c.quantity)
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }

    /// Fail unless `requester` owns the deck.
    pub fn ensure_owner(&self, requester: &UserId) -> Result<(), DeckError> {
        if self.is_owned_by(requester) {
            Ok(())
        } else {
            Err(DeckError::NotOwner {
                deck: self.id.clone(),
                requester: requester.clone(),
            })
        }
    }

    fn position(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.card_id == card_id)
    }

    fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }

    /// Add copies of a card, returning the entry's new quantity.
    ///
    /// An existing entry keeps its snapshot and gains `quantity`; otherwise
    /// a new entry is appended.
    pub fn try_add_card(
        &mut self,
        card_id: impl Into<CardId>,
        name: impl Into<String>,
        kind: CardKind,
        quantity: i64,
    ) -> Result<u32, DeckError> {
        if quantity <= 0 {
            return Err(DeckError::NonPositiveQuantity(quantity));
        }
        let requested = quantity;
        let quantity =
            u32::try_from(quantity).map_err(|_| DeckError::QuantityTooLarge(requested))?;
        let card_id = card_id.into();

        let total = match self.position(&card_id) {
            Some(index) => {
                let entry = &mut self.cards[index];
                let current = entry.quantity;
                entry.quantity = current
                    .checked_add(quantity)
                    .ok_or(DeckError::QuantityTooLarge(i64::from(current) + requested))?;
                entry.quantity
            }
            None => {
                self.cards
                    .push_back(DeckCard::new(card_id, name, kind, quantity));
                quantity
            }
        };
        self.touch();
        Ok(total)
    }

    /// Add copies of a card. Returns `false` for a non-positive quantity.
    pub fn add_card(
        &mut self,
        card_id: impl Into<CardId>,
        name: impl Into<String>,
        kind: CardKind,
        quantity: i64,
    ) -> bool {
        self.try_add_card(card_id, name, kind, quantity).is_ok()
    }

    /// Add copies of a catalog card, snapshotting its name and kind.
    pub fn try_add_catalog_card(&mut self, card: &Card, quantity: i64) -> Result<u32, DeckError> {
        self.try_add_card(card.id().clone(), card.name(), card.kind(), quantity)
    }

    /// Remove copies of a card, returning how many remain.
    ///
    /// Removing at least as many copies as the entry holds removes the entry.
    pub fn try_remove_card(&mut self, card_id: &CardId, quantity: i64) -> Result<u32, DeckError> {
        if quantity <= 0 {
            return Err(DeckError::NonPositiveQuantity(quantity));
        }
        let index = self
            .position(card_id)
            .ok_or_else(|| DeckError::CardNotInDeck(card_id.clone()))?;
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let remaining = self.cards[index].quantity.saturating_sub(quantity);
        if remaining == 0 {
            self.cards.remove(index);
        } else {
            self.cards[index].quantity = remaining;
        }
        self.touch();
        Ok(remaining)
    }

    /// Remove copies of a card. Returns `false` if the card is absent.
    pub fn remove_card(&mut self, card_id: impl Into<CardId>, quantity: i64) -> bool {
        self.try_remove_card(&card_id.into(), quantity).is_ok()
    }

    /// Sum of all entry quantities, saturating at `u32::MAX`.
    #[must_use]
    pub fn get_total_cards(&self) -> u32 {
        self.cards
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.quantity))
    }

    /// Number of distinct character entries, ignoring copies.
    #[must_use]
    pub fn get_character_count(&self) -> u32 {
        let count = self.cards.iter().filter(|c| c.is_character()).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Multi-line listing grouped by kind.
    ///
    /// Groups follow kind priority (characters first); entries keep deck
    /// order within a group. Each group heading shows its copy count.
    #[must_use]
    pub fn get_deck_summary(&self) -> String {
        let mut lines = vec![
            self.name.clone(),
            format!("Total cards: {}", self.get_total_cards()),
        ];

        if self.cards.is_empty() {
            lines.push("No cards yet.".to_string());
            return lines.join("\n");
        }

        for kind in CardKind::ALL {
            let group: Vec<&DeckCard> = self.cards.iter().filter(|c| c.kind == *kind).collect();
            if group.is_empty() {
                continue;
            }
            let copies = group
                .iter()
                .fold(0u32, |total, c| total.saturating_add(c.quantity));
            lines.push(format!("{} ({}):", kind.group_heading(), copies));
            lines.extend(group.iter().map(|c| format!("  {c}")));
        }
        lines.join("\n")
    }

    /// Check this deck against `rules`.
    #[must_use]
    pub fn validate_deck(&self, rules: &DeckRules) -> ValidationResult {
        DeckValidator::validate(self, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Deck {
        Deck::new("d1", "  Test Deck  ", "123456")
    }

    #[test]
    fn test_new_deck_is_empty() {
        let deck = deck();
        assert_eq!(deck.name, "Test Deck");
        assert!(deck.is_empty());
        assert_eq!(deck.get_total_cards(), 0);
        assert_eq!(deck.created_at, deck.updated_at);
    }

    #[test]
    fn test_add_merges_entries() {
        let mut deck = deck();
        assert!(deck.add_card("c1", "Diluc", CardKind::Character, 1));
        assert!(deck.add_card("c1", "Diluc", CardKind::Character, 1));

        assert_eq!(deck.len(), 1);
        assert_eq!(deck.quantity_of(&CardId::new("c1")), 2);
        assert_eq!(deck.get_total_cards(), 2);
        assert_eq!(deck.get_character_count(), 1);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut deck = deck();
        assert!(!deck.add_card("c1", "Diluc", CardKind::Character, 0));
        assert!(!deck.add_card("c1", "Diluc", CardKind::Character, -2));
        assert!(deck.is_empty());

        assert_eq!(
            deck.try_add_card("c1", "Diluc", CardKind::Character, 0),
            Err(DeckError::NonPositiveQuantity(0))
        );
    }

    #[test]
    fn test_add_does_not_enforce_limits() {
        let mut deck = deck();
        assert!(deck.add_card("a", "Sweet Madame", CardKind::Event, 40));
        assert_eq!(deck.get_total_cards(), 40);
    }

    #[test]
    fn test_remove_decrements_then_drops_entry() {
        let mut deck = deck();
        deck.add_card("a", "Sweet Madame", CardKind::Event, 2);

        assert_eq!(deck.try_remove_card(&CardId::new("a"), 1), Ok(1));
        assert_eq!(deck.quantity_of(&CardId::new("a")), 1);

        assert!(deck.remove_card("a", 1));
        assert!(deck.entry(&CardId::new("a")).is_none());
        assert!(deck.is_empty());
    }

    #[test]
    fn test_remove_more_than_present_drops_entry() {
        let mut deck = deck();
        deck.add_card("a", "Sweet Madame", CardKind::Event, 2);
        assert_eq!(deck.try_remove_card(&CardId::new("a"), 5), Ok(0));
        assert!(deck.is_empty());
    }

    #[test]
    fn test_remove_absent_card() {
        let mut deck = deck();
        assert!(!deck.remove_card("ghost", 1));
        assert_eq!(
            deck.try_remove_card(&CardId::new("ghost"), 1),
            Err(DeckError::CardNotInDeck(CardId::new("ghost")))
        );
    }

    #[test]
    fn test_character_count_ignores_copies() {
        let mut deck = deck();
        deck.add_card("diluc", "Diluc", CardKind::Character, 2);
        deck.add_card("xingqiu", "Xingqiu", CardKind::Character, 1);
        deck.add_card("paimon", "Paimon", CardKind::Support, 2);
        assert_eq!(deck.get_character_count(), 2);
        assert_eq!(deck.get_total_cards(), 5);
    }

    #[test]
    fn test_summary_groups_by_kind_priority() {
        let mut deck = deck();
        deck.add_card("paimon", "Paimon", CardKind::Support, 2);
        deck.add_card("diluc", "Diluc", CardKind::Character, 1);
        deck.add_card("strategize", "Strategize", CardKind::Event, 2);
        deck.add_card("xingqiu", "Xingqiu", CardKind::Character, 1);

        assert_eq!(
            deck.get_deck_summary(),
            "Test Deck\n\
             Total cards: 6\n\
             Characters (2):\n  Diluc x1\n  Xingqiu x1\n\
             Support Cards (2):\n  Paimon x2\n\
             Event Cards (2):\n  Strategize x2"
        );
    }

    #[test]
    fn test_summary_of_empty_deck() {
        assert_eq!(deck().get_deck_summary(), "Test Deck\nTotal cards: 0\nNo cards yet.");
    }

    #[test]
    fn test_ownership() {
        let deck = deck();
        assert!(deck.is_owned_by(&UserId::new("123456")));
        assert!(deck.ensure_owner(&UserId::new("123456")).is_ok());
        assert_eq!(
            deck.ensure_owner(&UserId::new("999")),
            Err(DeckError::NotOwner {
                deck: DeckId::new("d1"),
                requester: UserId::new("999"),
            })
        );
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut deck = deck();
        deck.add_card("a", "A", CardKind::Action, 1);
        let snapshot = deck.clone();
        deck.add_card("a", "A", CardKind::Action, 1);

        assert_eq!(snapshot.get_total_cards(), 1);
        assert_eq!(deck.get_total_cards(), 2);
    }

    #[test]
    fn test_oversized_quantities_are_rejected() {
        let mut deck = deck();
        assert_eq!(
            deck.try_add_card("a", "A", CardKind::Action, i64::MAX),
            Err(DeckError::QuantityTooLarge(i64::MAX))
        );
        assert!(deck.is_empty());

        let max = i64::from(u32::MAX);
        assert_eq!(deck.try_add_card("a", "A", CardKind::Action, max), Ok(u32::MAX));
        assert_eq!(
            deck.try_add_card("a", "A", CardKind::Action, 1),
            Err(DeckError::QuantityTooLarge(max + 1))
        );
        assert_eq!(deck.quantity_of(&CardId::new("a")), u32::MAX);

        assert!(deck.add_card("b", "B", CardKind::Action, 1));
        assert_eq!(deck.get_total_cards(), u32::MAX);
        assert!(deck.get_deck_summary().contains(&format!("Action Cards ({}):", u32::MAX)));
        assert!(!deck.validate_deck(&DeckRules::default()).is_valid());
    }

    #[test]
    fn test_with_cards_merges_duplicates_and_drops_empty_entries() {
        let deck = deck().with_cards([
            DeckCard::new("x", "Xiao", CardKind::Character, 0),
            DeckCard::new("x", "Xiao", CardKind::Character, 2),
            DeckCard::new("a", "Sweet Madame", CardKind::Action, 1),
            DeckCard::new("x", "Xiao", CardKind::Character, 1),
        ]);

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.quantity_of(&CardId::new("x")), 3);
        assert_eq!(deck.get_character_count(), 1);
        assert_eq!(deck.get_total_cards(), 4);

        let result = deck.validate_deck(&DeckRules::default());
        assert_eq!(result.reasons(), vec!["Xiao has 3 copies; the maximum is 2."]);
    }

    #[test]
    fn test_deserialize_normalises_entries() {
        let original = deck();
        let mut json = serde_json::to_value(&original).unwrap();
        json["cards"] = serde_json::json!([
            {"card_id": "x", "name": "Xiao", "kind": "CHARACTER", "quantity": 0},
            {"card_id": "x", "name": "Xiao", "kind": "CHARACTER", "quantity": 1},
            {"card_id": " x ", "name": "Xiao", "kind": "CHARACTER", "quantity": 1},
        ]);

        let loaded: Deck = serde_json::from_value(json).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get_character_count(), 1);
        assert_eq!(loaded.quantity_of(&CardId::new("x")), 2);
        assert_eq!(loaded.name, original.name);
        assert_eq!(loaded.created_at, original.created_at);
    }
}
