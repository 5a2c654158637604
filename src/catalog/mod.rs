//! Catalog store seam and the deck-editing workflow built on it.

pub mod editor;
pub mod store;

pub use editor::{DeckEditor, EditError, EditResult};
pub use store::{CatalogStore, MemoryCatalog};
