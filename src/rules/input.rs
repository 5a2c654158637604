//! Raw input validation.
//!
//! These checks run before any parsing or catalog lookup and only look at
//! shape, length and character set. They know nothing about cards and are
//! separate from deck-legality validation.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::validator::{ValidationResult, Violation, ViolationCode};
use crate::core::config::InputLimits;

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Punctuation accepted in deck names besides letters, digits and spaces.
const NAME_PUNCTUATION: &[char] = &[
    '-', '_', '\'', '.', ',', '!', '?', '&', '(', ')', '#', ':', '+',
];

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || NAME_PUNCTUATION.contains(&c)
}

/// Validates and cleans free-text user input.
#[derive(Clone, Debug, Default)]
pub struct InputValidator {
    limits: InputLimits,
}

impl InputValidator {
    #[must_use]
    pub fn new(limits: InputLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// A deck name must be non-empty after trimming, within the length
    /// limit, and use only letters, digits, spaces and common punctuation.
    #[must_use]
    pub fn validate_deck_name(&self, text: &str) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let name = text.trim();

        if name.is_empty() {
            result.push(Violation::error(
                ViolationCode::EmptyName,
                "Deck name cannot be empty.",
            ));
            return result;
        }

        let max = self.limits.deck_name_max_len;
        if name.chars().count() > max {
            result.push(Violation::error(
                ViolationCode::NameTooLong,
                format!("Deck name must be at most {max} characters."),
            ));
        }

        let mut seen = FxHashSet::default();
        let invalid: Vec<char> = name
            .chars()
            .filter(|c| !is_name_char(*c) && seen.insert(*c))
            .collect();
        if !invalid.is_empty() {
            let listed: Vec<String> = invalid.iter().map(|c| format!("'{c}'")).collect();
            result.push(Violation::error(
                ViolationCode::InvalidNameCharacters,
                format!(
                    "Deck name contains unsupported characters: {}.",
                    listed.join(", ")
                ),
            ));
        }
        result
    }

    /// A search query must be non-empty after trimming, within the length
    /// limits, and free of markup and control characters.
    #[must_use]
    pub fn validate_search_query(&self, text: &str) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let query = text.trim();

        if query.is_empty() {
            result.push(Violation::error(
                ViolationCode::EmptyQuery,
                "Search query cannot be empty.",
            ));
            return result;
        }

        let len = query.chars().count();
        let (min, max) = (
            self.limits.search_query_min_len,
            self.limits.search_query_max_len,
        );
        if len < min {
            result.push(Violation::error(
                ViolationCode::QueryTooShort,
                format!("Search query must be at least {min} characters."),
            ));
        }
        if len > max {
            result.push(Violation::error(
                ViolationCode::QueryTooLong,
                format!("Search query must be at most {max} characters."),
            ));
        }
        if query.chars().any(|c| c == '<' || c == '>' || c.is_control()) {
            result.push(Violation::error(
                ViolationCode::InvalidQueryCharacters,
                "Search query contains unsupported characters.",
            ));
        }
        result
    }

    /// Strip markup, collapse whitespace, trim and truncate.
    ///
    /// ```
    /// use tcg_deckbuilder::rules::InputValidator;
    ///
    /// let clean = InputValidator::default().sanitize_input("  Test <script> Input  ");
    /// assert_eq!(clean, "Test Input");
    /// ```
    #[must_use]
    pub fn sanitize_input(&self, text: &str) -> String {
        let without_tags = MARKUP_TAG.replace_all(text, " ");
        let without_brackets: String = without_tags
            .chars()
            .filter(|c| *c != '<' && *c != '>')
            .collect();
        let collapsed = WHITESPACE_RUN.replace_all(without_brackets.trim(), " ");
        let truncated: String = collapsed
            .chars()
            .take(self.limits.sanitized_max_len)
            .collect();
        truncated.trim_end().to_string()
    }
}

/// `InputValidator::validate_deck_name` with standard limits.
#[must_use]
pub fn validate_deck_name(text: &str) -> ValidationResult {
    InputValidator::default().validate_deck_name(text)
}

/// `InputValidator::validate_search_query` with standard limits.
#[must_use]
pub fn validate_search_query(text: &str) -> ValidationResult {
    InputValidator::default().validate_search_query(text)
}

/// `InputValidator::sanitize_input` with standard limits.
#[must_use]
pub fn sanitize_input(text: &str) -> String {
    InputValidator::default().sanitize_input(text)
}

/// Deck command verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckSubcommand {
    List,
    Create,
    Show,
    Delete,
    Validate,
}

impl DeckSubcommand {
    fn parse(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "list" => Some(DeckSubcommand::List),
            "create" | "new" => Some(DeckSubcommand::Create),
            "show" | "view" => Some(DeckSubcommand::Show),
            "delete" | "remove" => Some(DeckSubcommand::Delete),
            "validate" | "check" => Some(DeckSubcommand::Validate),
            _ => None,
        }
    }

    /// True if the verb operates on a named deck.
    #[must_use]
    pub fn takes_name(self) -> bool {
        self != DeckSubcommand::List
    }
}

/// A parsed deck command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCommand {
    pub subcommand: DeckSubcommand,
    /// Deck name for verbs that take one, unquoted and trimmed.
    pub name: Option<String>,
}

const DECK_USAGE: &str = "Usage: /deck <list|create|show|delete|validate> [deck name]";
const SEARCH_USAGE: &str = "Usage: /search <card name>";

fn unquote(text: &str) -> &str {
    let text = text.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('\u{201c}', '\u{201d}')] {
        if let Some(inner) = text.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            return inner.trim();
        }
    }
    text
}

/// Validates chat command argument lists.
#[derive(Clone, Debug, Default)]
pub struct CommandValidator {
    input: InputValidator,
}

impl CommandValidator {
    #[must_use]
    pub fn new(limits: InputLimits) -> Self {
        Self {
            input: InputValidator::new(limits),
        }
    }

    /// `/search <words...>`: at least one word; the joined query must be a
    /// valid search query.
    #[must_use]
    pub fn validate_search_command<S: AsRef<str>>(&self, args: &[S]) -> ValidationResult {
        let words: Vec<&str> = args
            .iter()
            .map(|a| a.as_ref().trim())
            .filter(|a| !a.is_empty())
            .collect();
        if words.is_empty() {
            let mut result = ValidationResult::valid();
            result.push(Violation::error(ViolationCode::MissingArguments, SEARCH_USAGE));
            return result;
        }
        self.input.validate_search_query(&words.join(" "))
    }

    /// Parse `/deck <verb> [name...]`, or report why it is malformed.
    pub fn parse_deck_command<S: AsRef<str>>(
        &self,
        args: &[S],
    ) -> Result<DeckCommand, ValidationResult> {
        let mut result = ValidationResult::valid();

        let Some((verb, rest)) = args.split_first() else {
            result.push(Violation::error(ViolationCode::MissingArguments, DECK_USAGE));
            return Err(result);
        };

        let Some(subcommand) = DeckSubcommand::parse(verb.as_ref()) else {
            result.push(Violation::error(
                ViolationCode::UnknownSubcommand,
                format!("Unknown deck command `{}`. {DECK_USAGE}", verb.as_ref().trim()),
            ));
            return Err(result);
        };

        let joined = rest
            .iter()
            .map(|a| a.as_ref().trim())
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !subcommand.takes_name() {
            if !joined.is_empty() {
                result.push(Violation::error(
                    ViolationCode::UnexpectedArguments,
                    "`list` takes no arguments.",
                ));
                return Err(result);
            }
            return Ok(DeckCommand {
                subcommand,
                name: None,
            });
        }

        let name = unquote(&joined);
        let name_check = self.input.validate_deck_name(name);
        if !name_check.is_valid() {
            return Err(name_check);
        }
        Ok(DeckCommand {
            subcommand,
            name: Some(name.to_string()),
        })
    }

    /// Shape check for `/deck` arguments.
    #[must_use]
    pub fn validate_deck_command<S: AsRef<str>>(&self, args: &[S]) -> ValidationResult {
        match self.parse_deck_command(args) {
            Ok(_) => ValidationResult::valid(),
            Err(result) => result,
        }
    }
}
