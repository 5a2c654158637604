//! Deck-legality validation.
//!
//! `DeckValidator::validate` is a pure function of a deck snapshot and a
//! `DeckRules` value. It runs every rule in a fixed order and collects all
//! violations, so one report lists everything the user has to fix:
//!
//! 1. total card count
//! 2. character count
//! 3. per-entry copy limit, in deck order (overrides beat the default)
//! 4. completeness (at least one character), reported as a warning
//!
//! An invalid deck is an ordinary `ValidationResult`, never an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::DeckRules;
use crate::deck::Deck;

/// How serious a violation is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Breaks a hard rule; the deck or input is invalid.
    Error,
    /// The deck is legal but not ready to play (it may be saved as a draft).
    Warning,
}

/// Machine-checkable identifier of a violated rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    TooManyCards,
    TooManyCharacters,
    TooManyCopies,
    NoCharacters,
    EmptyName,
    NameTooLong,
    InvalidNameCharacters,
    EmptyQuery,
    QueryTooShort,
    QueryTooLong,
    InvalidQueryCharacters,
    MissingArguments,
    UnknownSubcommand,
    UnexpectedArguments,
}

/// One violated rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: ViolationCode,
    pub severity: Severity,
    /// Human-readable reason.
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn error(code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Outcome of a validation: a validity flag plus ordered violations.
///
/// Warnings do not affect `is_valid`; they only make the result
/// incomplete. A deserialised result recomputes the flag from its
/// violations; a stored `is_valid` is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredViolations")]
pub struct ValidationResult {
    is_valid: bool,
    violations: Vec<Violation>,
}

#[derive(Deserialize)]
struct StoredViolations {
    #[serde(default)]
    violations: Vec<Violation>,
}

impl From<StoredViolations> for ValidationResult {
    fn from(stored: StoredViolations) -> Self {
        let mut result = ValidationResult::valid();
        for violation in stored.violations {
            result.push(violation);
        }
        result
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            is_valid: true,
            violations: Vec::new(),
        }
    }
}

impl ValidationResult {
    /// A result with no violations.
    #[must_use]
    pub fn valid() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, violation: Violation) {
        if violation.is_error() {
            self.is_valid = false;
        }
        self.violations.push(violation);
    }

    /// Append another result's violations.
    pub fn merge(&mut self, other: ValidationResult) {
        for violation in other.violations {
            self.push(violation);
        }
    }

    /// No hard-rule violations.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// No violations of any severity.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Warning)
    }

    /// Every message, in report order.
    #[must_use]
    pub fn reasons(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Every code, in report order.
    #[must_use]
    pub fn codes(&self) -> Vec<ViolationCode> {
        self.violations.iter().map(|v| v.code).collect()
    }

    #[must_use]
    pub fn has(&self, code: ViolationCode) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }
}

/// A single deck-legality rule.
pub trait DeckRule {
    /// Append this rule's violations for `deck` to `out`.
    fn check(&self, deck: &Deck, rules: &DeckRules, out: &mut ValidationResult);
}

/// Total copies must not exceed `max_cards`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TotalCardsRule;

impl DeckRule for TotalCardsRule {
    fn check(&self, deck: &Deck, rules: &DeckRules, out: &mut ValidationResult) {
        let total = deck.get_total_cards();
        if total > rules.max_cards {
            out.push(Violation::error(
                ViolationCode::TooManyCards,
                format!("Deck has {total} cards; the maximum is {}.", rules.max_cards),
            ));
        }
    }
}

/// Distinct characters must not exceed `max_characters`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharacterCountRule;

impl DeckRule for CharacterCountRule {
    fn check(&self, deck: &Deck, rules: &DeckRules, out: &mut ValidationResult) {
        let characters = deck.get_character_count();
        if characters > rules.max_characters {
            out.push(Violation::error(
                ViolationCode::TooManyCharacters,
                format!(
                    "Deck has {characters} characters; the maximum is {}.",
                    rules.max_characters
                ),
            ));
        }
    }
}

/// Each entry must respect its copy limit.
#[derive(Clone, Copy, Debug, Default)]
pub struct CopyLimitRule;

impl DeckRule for CopyLimitRule {
    fn check(&self, deck: &Deck, rules: &DeckRules, out: &mut ValidationResult) {
        for entry in deck.cards() {
            let limit = rules.copy_limit_for(&entry.card_id);
            if entry.quantity > limit {
                out.push(Violation::error(
                    ViolationCode::TooManyCopies,
                    format!(
                        "{} has {} copies; the maximum is {limit}.",
                        entry.name, entry.quantity
                    ),
                ));
            }
        }
    }
}

/// A playable deck needs at least one character.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompletenessRule;

impl DeckRule for CompletenessRule {
    fn check(&self, deck: &Deck, _rules: &DeckRules, out: &mut ValidationResult) {
        if deck.get_character_count() == 0 {
            out.push(Violation::warning(
                ViolationCode::NoCharacters,
                "Deck has no character cards yet.",
            ));
        }
    }
}

const STANDARD_RULES: [&dyn DeckRule; 4] = [
    &TotalCardsRule,
    &CharacterCountRule,
    &CopyLimitRule,
    &CompletenessRule,
];

/// Deck-legality validator.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeckValidator;

impl DeckValidator {
    /// Check `deck` against `rules`, collecting every violation.
    #[must_use]
    pub fn validate(deck: &Deck, rules: &DeckRules) -> ValidationResult {
        let mut result = ValidationResult::valid();
        for rule in STANDARD_RULES {
            rule.check(deck, rules, &mut result);
        }

        debug!(
            deck_id = %deck.id,
            valid = result.is_valid(),
            violations = result.violations().len(),
            "validated deck"
        );
        result
    }
}
