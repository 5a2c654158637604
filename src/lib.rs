//! # tcg-deckbuilder
//!
//! Domain model for a trading-card-game companion bot: a card taxonomy, a
//! factory that turns loosely-typed catalog records into typed cards, a deck
//! aggregate that counts card references, and validators for deck legality
//! and raw user input.
//!
//! ## Design Principles
//!
//! 1. **Closed Taxonomy**: Card kinds and their tags are enums. Unknown kind
//!    tags are rejected at the factory, never carried through as strings.
//!
//! 2. **Reports, Not Errors**: An illegal deck or a bad deck name produces a
//!    `ValidationResult` listing every violation. Errors are reserved for
//!    malformed data and failed lookups.
//!
//! 3. **Configuration Over Constants**: Deck limits live in `DeckRules`,
//!    input limits in `InputLimits`. Both load from JSON.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Deck entries use `im::Vector`, so deck
//!   snapshots handed to validators and stores clone in O(1).
//!
//! - **Store Seam**: Persistence is behind the `CatalogStore` trait;
//!   `MemoryCatalog` implements it for tests and local use.
//!
//! ## Modules
//!
//! - `core`: ids, errors, configuration
//! - `cards`: card taxonomy, attribute maps, factory
//! - `deck`: deck aggregate and entries
//! - `rules`: deck-legality and raw-input validation
//! - `catalog`: catalog store trait, in-memory store, deck editor

pub mod core;
pub mod cards;
pub mod deck;
pub mod rules;
pub mod catalog;

// Re-export commonly used types
pub use crate::core::{
    CardId, DeckId, UserId,
    DeckRules, InputLimits,
    CardDataError, ConfigError, DeckError, Error, Result,
};

pub use crate::cards::{
    Card, CardBase, CardKind, CardFactory,
    ActionCard, CharacterCard, EquipmentCard, EventCard, SupportCard,
    Skill, Skills, Element, WeaponType, EquipmentSlot, SupportType, SkillType,
    AttributeKey, AttributeValue, Attributes,
};

pub use crate::deck::{Deck, DeckCard};

pub use crate::rules::{
    DeckValidator, DeckRule, ValidationResult, Violation, ViolationCode, Severity,
    InputValidator, CommandValidator, DeckCommand, DeckSubcommand,
    sanitize_input, validate_deck_name, validate_search_query,
};

pub use crate::catalog::{CatalogStore, MemoryCatalog, DeckEditor, EditError};
