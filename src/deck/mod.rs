//! Deck aggregate: a user's counted list of card references.
//!
//! - `DeckCard`: one line item (card reference + display snapshot + quantity)
//! - `Deck`: ordered entries plus owner and timestamps

pub mod aggregate;
pub mod entry;

pub use aggregate::Deck;
pub use entry::DeckCard;
