//! Identifier newtypes.
//!
//! Cards, decks and users are keyed by opaque strings handed out by the
//! Catalog Store (wiki slugs for cards, document ids for decks, chat user
//! ids for owners). Wrapping them keeps a deck id from being passed where a
//! card id is expected.
//!
//! ```
//! use tcg_deckbuilder::core::{CardId, UserId};
//!
//! let card = CardId::new("diluc");
//! assert_eq!(card.as_str(), "diluc");
//! assert_eq!(format!("{}", UserId::new("123456")), "123456");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an identifier. Surrounding whitespace is trimmed.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                let raw = id.into();
                let trimmed = raw.trim();
                if trimmed.len() == raw.len() {
                    Self(raw)
                } else {
                    Self(trimmed.to_string())
                }
            }

            /// Get the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True if the identifier is empty after trimming.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Stable catalog key of a card definition.
    CardId
);

string_id!(
    /// Identifier of a stored deck.
    DeckId
);

string_id!(
    /// Identifier of the user owning a deck (the chat user id).
    UserId
);
