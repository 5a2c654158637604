//! Core types: identifiers, rule configuration, errors.
//!
//! Nothing here knows about card kinds or decks. The other modules build
//! on these types and receive configuration as explicit values.

pub mod config;
pub mod error;
pub mod ids;

pub use config::{
    DeckRules, InputLimits, DEFAULT_MAX_CARDS, DEFAULT_MAX_CHARACTERS,
    DEFAULT_MAX_COPIES_PER_CARD,
};
pub use error::{CardDataError, ConfigError, DeckError, Error, Result};
pub use ids::{CardId, DeckId, UserId};
