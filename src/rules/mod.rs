//! Validation: deck legality and raw input shape.
//!
//! Two independent validators share the `ValidationResult` report type:
//! - `DeckValidator` checks a deck against `DeckRules`
//! - `InputValidator` / `CommandValidator` check raw text and argument
//!   lists before anything is parsed or looked up
//!
//! Neither raises for invalid decks or input; failures are report entries.

pub mod input;
pub mod validator;

pub use input::{
    sanitize_input, validate_deck_name, validate_search_query, CommandValidator, DeckCommand,
    DeckSubcommand, InputValidator,
};
pub use validator::{
    CharacterCountRule, CompletenessRule, CopyLimitRule, DeckRule, DeckValidator, Severity,
    TotalCardsRule, ValidationResult, Violation, ViolationCode,
};
