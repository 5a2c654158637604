//! Ownership-checked deck editing on top of a `CatalogStore`.
//!
//! Every write goes through `commit`: the deck is validated and only saved
//! when it has no hard violations. Warnings (an incomplete deck) do not
//! block a save, so unfinished decks persist as drafts.

use thiserror::Error;
use tracing::{debug, info};

use super::store::CatalogStore;
use crate::core::config::{DeckRules, InputLimits};
use crate::core::error::DeckError;
use crate::core::ids::{CardId, DeckId, UserId};
use crate::deck::Deck;
use crate::rules::{InputValidator, ValidationResult};

/// Why an edit was not applied.
#[derive(Debug, Error)]
pub enum EditError<E> {
    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("deck rejected: {}", .0.reasons().join(" "))]
    Rejected(ValidationResult),

    #[error("catalog store failed: {0}")]
    Store(#[source] E),
}

pub type EditResult<T, E> = std::result::Result<T, EditError<E>>;

/// Applies user edits to stored decks.
pub struct DeckEditor<'a, S: CatalogStore> {
    store: &'a mut S,
    rules: DeckRules,
    input: InputValidator,
}

impl<'a, S: CatalogStore> DeckEditor<'a, S> {
    pub fn new(store: &'a mut S, rules: DeckRules) -> Self {
        Self {
            store,
            rules,
            input: InputValidator::default(),
        }
    }

    #[must_use]
    pub fn with_input_limits(mut self, limits: InputLimits) -> Self {
        self.input = InputValidator::new(limits);
        self
    }

    #[must_use]
    pub fn rules(&self) -> &DeckRules {
        &self.rules
    }

    /// Create and save an empty deck owned by `owner`.
    ///
    /// Fails with `DeckExists` if the id is already taken, whoever owns it.
    pub fn create_deck(
        &mut self,
        id: impl Into<DeckId>,
        name: &str,
        owner: impl Into<UserId>,
    ) -> EditResult<Deck, S::Error> {
        let check = self.input.validate_deck_name(name);
        if !check.is_valid() {
            return Err(EditError::Rejected(check));
        }

        let deck = Deck::new(id, name, owner);
        if self.store.get_deck(&deck.id).map_err(EditError::Store)?.is_some() {
            return Err(DeckError::DeckExists(deck.id).into());
        }
        self.store.save_deck(&deck).map_err(EditError::Store)?;
        info!(deck_id = %deck.id, user_id = %deck.user_id, "created deck");
        Ok(deck)
    }

    /// Load a deck the requester owns.
    pub fn load(&self, requester: &UserId, deck_id: &DeckId) -> EditResult<Deck, S::Error> {
        let deck = self
            .store
            .get_deck(deck_id)
            .map_err(EditError::Store)?
            .ok_or_else(|| DeckError::DeckNotFound(deck_id.clone()))?;
        deck.ensure_owner(requester)?;
        Ok(deck)
    }

    /// Validate a stored deck without changing it.
    pub fn check(&self, requester: &UserId, deck_id: &DeckId) -> EditResult<ValidationResult, S::Error> {
        let deck = self.load(requester, deck_id)?;
        Ok(deck.validate_deck(&self.rules))
    }

    /// Add catalog copies of a card to a stored deck and save it.
    ///
    /// Nothing is saved if the result breaks a hard rule.
    pub fn add_card(
        &mut self,
        requester: &UserId,
        deck_id: &DeckId,
        card_id: &CardId,
        quantity: i64,
    ) -> EditResult<ValidationResult, S::Error> {
        let mut deck = self.load(requester, deck_id)?;
        let card = self
            .store
            .get_card(card_id)
            .map_err(EditError::Store)?
            .ok_or_else(|| DeckError::CardNotFound(card_id.clone()))?;

        let now = deck.try_add_catalog_card(&card, quantity)?;
        debug!(deck_id = %deck.id, card_id = %card_id, quantity = now, "added card");
        self.commit(requester, &deck)
    }

    /// Remove copies of a card from a stored deck and save it.
    ///
    /// A removal never adds a hard violation, so the deck is saved even if
    /// it was already over a limit (for instance after the rules tightened).
    pub fn remove_card(
        &mut self,
        requester: &UserId,
        deck_id: &DeckId,
        card_id: &CardId,
        quantity: i64,
    ) -> EditResult<ValidationResult, S::Error> {
        let mut deck = self.load(requester, deck_id)?;
        let remaining = deck.try_remove_card(card_id, quantity)?;
        debug!(deck_id = %deck.id, card_id = %card_id, remaining, "removed card");

        let result = deck.validate_deck(&self.rules);
        self.store.save_deck(&deck).map_err(EditError::Store)?;
        info!(deck_id = %deck.id, valid = result.is_valid(), "saved deck");
        Ok(result)
    }

    /// Fail if a deck with this id is stored under another owner.
    fn ensure_stored_owner(&self, requester: &UserId, deck_id: &DeckId) -> EditResult<(), S::Error> {
        if let Some(stored) = self.store.get_deck(deck_id).map_err(EditError::Store)? {
            stored.ensure_owner(requester)?;
        }
        Ok(())
    }

    /// Validate `deck` and save it if it breaks no hard rule.
    ///
    /// Both the snapshot and any stored deck with the same id must belong
    /// to `requester`. Returns the validation result; warnings in it mean
    /// the deck was saved as a draft.
    pub fn commit(&mut self, requester: &UserId, deck: &Deck) -> EditResult<ValidationResult, S::Error> {
        deck.ensure_owner(requester)?;
        self.ensure_stored_owner(requester, &deck.id)?;

        let result = deck.validate_deck(&self.rules);
        if !result.is_valid() {
            info!(
                deck_id = %deck.id,
                violations = result.errors().count(),
                "rejected deck save"
            );
            return Err(EditError::Rejected(result));
        }

        self.store.save_deck(deck).map_err(EditError::Store)?;
        info!(deck_id = %deck.id, draft = !result.is_complete(), "saved deck");
        Ok(result)
    }

    /// Delete a stored deck the requester owns.
    pub fn delete(&mut self, requester: &UserId, deck_id: &DeckId) -> EditResult<(), S::Error> {
        self.load(requester, deck_id)?;
        let deleted = self
            .store
            .delete_deck(deck_id, requester)
            .map_err(EditError::Store)?;
        if !deleted {
            return Err(DeckError::DeckNotFound(deck_id.clone()).into());
        }
        info!(deck_id = %deck_id, "deleted deck");
        Ok(())
    }
}
