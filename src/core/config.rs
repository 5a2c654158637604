//! Rule configuration.
//!
//! Deck-legality limits and raw-input limits are plain values that callers
//! pass into the validators. Nothing in the crate reads a global: a
//! collaborator that reloads its settings simply builds a new value and
//! passes that on the next call.
//!
//! - `DeckRules`: card, character and copy limits plus per-card overrides
//! - `InputLimits`: length limits for deck names and search queries
//!
//! Both can be built with builder methods or loaded from JSON. Fields left
//! out of a JSON document keep their standard values.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::ids::CardId;

/// Standard maximum number of cards in a deck.
pub const DEFAULT_MAX_CARDS: u32 = 30;

/// Standard maximum number of distinct character cards.
pub const DEFAULT_MAX_CHARACTERS: u32 = 3;

/// Standard maximum copies of any one card.
pub const DEFAULT_MAX_COPIES_PER_CARD: u32 = 2;

/// Deck-legality limits.
///
/// ## Example
///
/// ```
/// use tcg_deckbuilder::core::{CardId, DeckRules};
///
/// let rules = DeckRules::default().with_copy_limit("paimon", 1);
///
/// assert_eq!(rules.max_cards, 30);
/// assert_eq!(rules.copy_limit_for(&CardId::new("paimon")), 1);
/// assert_eq!(rules.copy_limit_for(&CardId::new("strategize")), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckRules {
    /// Maximum total copies across all entries.
    pub max_cards: u32,

    /// Maximum number of distinct character entries.
    pub max_characters: u32,

    /// Maximum copies of a single card unless overridden.
    pub max_copies_per_card: u32,

    /// Per-card copy limits (unique/legendary cards capped at 1, etc.).
    pub copy_limit_overrides: FxHashMap<CardId, u32>,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            max_cards: DEFAULT_MAX_CARDS,
            max_characters: DEFAULT_MAX_CHARACTERS,
            max_copies_per_card: DEFAULT_MAX_COPIES_PER_CARD,
            copy_limit_overrides: FxHashMap::default(),
        }
    }
}

impl DeckRules {
    /// Standard rules (30 cards, 3 characters, 2 copies).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rules from a JSON document.
    ///
    /// ```
    /// use tcg_deckbuilder::core::DeckRules;
    ///
    /// let rules = DeckRules::from_json_str(r#"{"max_cards": 40}"#).unwrap();
    /// assert_eq!(rules.max_cards, 40);
    /// assert_eq!(rules.max_characters, 3);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.check()?;
        Ok(rules)
    }

    /// Load rules from an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let rules: Self = serde_json::from_value(value)?;
        rules.check()?;
        Ok(rules)
    }

    /// Reject limits no deck could ever satisfy.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.max_cards == 0 {
            return Err(ConfigError::Invalid {
                message: "max_cards must be at least 1".to_string(),
            });
        }
        if self.max_copies_per_card == 0 {
            return Err(ConfigError::Invalid {
                message: "max_copies_per_card must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Set the total card limit.
    #[must_use]
    pub fn with_max_cards(mut self, max: u32) -> Self {
        self.max_cards = max;
        self
    }

    /// Set the character limit.
    #[must_use]
    pub fn with_max_characters(mut self, max: u32) -> Self {
        self.max_characters = max;
        self
    }

    /// Set the default per-card copy limit.
    #[must_use]
    pub fn with_max_copies_per_card(mut self, max: u32) -> Self {
        self.max_copies_per_card = max;
        self
    }

    /// Override the copy limit of one card.
    #[must_use]
    pub fn with_copy_limit(mut self, card: impl Into<CardId>, max: u32) -> Self {
        self.copy_limit_overrides.insert(card.into(), max);
        self
    }

    /// Copy limit for a card: its override if present, else the default.
    #[must_use]
    pub fn copy_limit_for(&self, card: &CardId) -> u32 {
        self.copy_limit_overrides
            .get(card)
            .copied()
            .unwrap_or(self.max_copies_per_card)
    }
}

/// Length limits for raw user input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Longest accepted deck name, in characters.
    pub deck_name_max_len: usize,

    /// Shortest accepted search query, in characters.
    pub search_query_min_len: usize,

    /// Longest accepted search query, in characters.
    pub search_query_max_len: usize,

    /// Length sanitised input is truncated to.
    pub sanitized_max_len: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            deck_name_max_len: 50,
            search_query_min_len: 2,
            search_query_max_len: 100,
            sanitized_max_len: 200,
        }
    }
}

impl InputLimits {
    /// Load limits from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let limits: Self = serde_json::from_str(json)?;
        if limits.search_query_min_len > limits.search_query_max_len {
            return Err(ConfigError::Invalid {
                message: format!(
                    "search_query_min_len ({}) exceeds search_query_max_len ({})",
                    limits.search_query_min_len, limits.search_query_max_len
                ),
            });
        }
        Ok(limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = DeckRules::default();
        assert_eq!(rules.max_cards, 30);
        assert_eq!(rules.max_characters, 3);
        assert_eq!(rules.max_copies_per_card, 2);
        assert!(rules.copy_limit_overrides.is_empty());
    }

    #[test]
    fn test_rules_builder() {
        let rules = DeckRules::new()
            .with_max_cards(40)
            .with_max_characters(4)
            .with_max_copies_per_card(3)
            .with_copy_limit("liben", 1);

        assert_eq!(rules.max_cards, 40);
        assert_eq!(rules.max_characters, 4);
        assert_eq!(rules.copy_limit_for(&CardId::new("liben")), 1);
        assert_eq!(rules.copy_limit_for(&CardId::new("other")), 3);
    }

    #[test]
    fn test_rules_from_json_with_overrides() {
        let rules = DeckRules::from_json_str(
            r#"{"max_copies_per_card": 2, "copy_limit_overrides": {"paimon": 1}}"#,
        )
        .unwrap();

        assert_eq!(rules.max_cards, 30);
        assert_eq!(rules.copy_limit_for(&CardId::new("paimon")), 1);
    }

    #[test]
    fn test_rules_from_json_rejects_zero_limits() {
        let err = DeckRules::from_json_str(r#"{"max_cards": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rules_from_malformed_json() {
        let err = DeckRules::from_json_str("{max_cards").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_input_limits() {
        let limits = InputLimits::from_json_str(r#"{"deck_name_max_len": 20}"#).unwrap();
        assert_eq!(limits.deck_name_max_len, 20);
        assert_eq!(limits.search_query_max_len, 100);

        let err = InputLimits::from_json_str(
            r#"{"search_query_min_len": 10, "search_query_max_len": 5}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
