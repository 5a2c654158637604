//! Error types.
//!
//! These cover structural and programming errors only. A deck or an input
//! that breaks game rules is not an error: it is reported through
//! `ValidationResult`.

use thiserror::Error;

use super::ids::{CardId, DeckId, UserId};
use crate::cards::CardKind;

/// Invalid card data handed to the card factory.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardDataError {
    /// The raw input is not a key/value mapping.
    #[error("card data must be an object")]
    NotAnObject,

    /// A required field is absent.
    #[error("card data is missing required field `{field}`")]
    MissingField { field: &'static str },

    /// A required field is present but blank.
    #[error("card field `{field}` must not be empty")]
    EmptyField { field: &'static str },

    /// A field holds a value of the wrong shape.
    #[error("card field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// The kind tag does not name any known card kind.
    #[error("unknown card kind `{0}`")]
    UnknownKind(String),

    /// Costs are non-negative.
    #[error("card cost must be non-negative, got {0}")]
    NegativeCost(i64),

    /// A registered constructor built a card of another kind.
    #[error("constructor for {expected} built a {built} card")]
    KindMismatch { expected: CardKind, built: CardKind },
}

/// Invalid operation on a deck.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    /// Quantities passed to add/remove must be positive.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    /// The card has no entry in the deck.
    #[error("card {0} is not in the deck")]
    CardNotInDeck(CardId),

    /// The requester does not own the deck.
    #[error("user {requester} does not own deck {deck}")]
    NotOwner { deck: DeckId, requester: UserId },

    /// The catalog has no such deck.
    #[error("deck {0} not found")]
    DeckNotFound(DeckId),

    /// The catalog has no such card.
    #[error("card {0} not found")]
    CardNotFound(CardId),

    /// A deck with this id is already stored.
    #[error("deck {0} already exists")]
    DeckExists(DeckId),

    /// Quantities are stored as `u32`.
    #[error("quantity {0} is too large")]
    QuantityTooLarge(i64),
}

/// Invalid rule or input-limit configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    CardData(#[from] CardDataError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, Error>;
