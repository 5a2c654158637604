//! Card definitions - static catalog data.
//!
//! A `Card` is one of five closed variants. Every variant carries the same
//! `CardBase` (id, name, cost, description) and adds its own statically
//! typed fields. Cards are built once by the factory and never mutated by
//! the deck builder; decks hold `DeckCard` references instead.
//!
//! Identity is the id: two `Card`s compare equal when their ids match. The
//! variant structs compare by value.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kinds::{CardKind, Element, EquipmentSlot, SkillType, SupportType, WeaponType};
use crate::core::ids::CardId;

/// Attributes shared by every card kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBase {
    /// Stable catalog key.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Dice cost.
    pub cost: u32,

    /// Rules text.
    #[serde(default)]
    pub description: String,
}

impl CardBase {
    /// Create a base with zero cost and no description.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost: 0,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A character skill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub skill_type: SkillType,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub description: String,
    /// Base damage, if the skill deals any.
    #[serde(default)]
    pub damage: Option<u32>,
}

impl Skill {
    #[must_use]
    pub fn new(name: impl Into<String>, skill_type: SkillType) -> Self {
        Self {
            name: name.into(),
            skill_type,
            cost: 0,
            description: String::new(),
            damage: None,
        }
    }
}

/// Skill list. Characters have three or four skills.
pub type Skills = SmallVec<[Skill; 4]>;

/// A character card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCard {
    pub base: CardBase,
    /// `None` when the catalog gave no usable element.
    pub element: Option<Element>,
    pub weapon: WeaponType,
    pub hp: u32,
    pub max_energy: u32,
    pub skills: Skills,
}

/// A generic action card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCard {
    pub base: CardBase,
    /// Free-form catalog tags ("Food", "Elemental Resonance", ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An equipment card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCard {
    pub base: CardBase,
    pub slot: Option<EquipmentSlot>,
}

/// A support card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportCard {
    pub base: CardBase,
    pub support_type: Option<SupportType>,
    /// Uses before the support is discarded, if limited.
    pub usages: Option<u32>,
}

/// An event card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCard {
    pub base: CardBase,
    /// Rounds the event stays in play, if it lingers.
    pub duration: Option<u32>,
}

/// A card of any kind.
///
/// ## Example
///
/// ```
/// use tcg_deckbuilder::cards::{Card, CardBase, CardKind, EventCard};
///
/// let card = Card::Event(EventCard {
///     base: CardBase::new("strategize", "Strategize").with_cost(1),
///     duration: None,
/// });
///
/// assert_eq!(card.kind(), CardKind::Event);
/// assert_eq!(card.summary(), "Strategize (Event) - Cost 1");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "card_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Card {
    Character(CharacterCard),
    Action(ActionCard),
    Equipment(EquipmentCard),
    Support(SupportCard),
    Event(EventCard),
}

impl Card {
    /// Shared attributes.
    #[must_use]
    pub fn base(&self) -> &CardBase {
        match self {
            Card::Character(c) => &c.base,
            Card::Action(c) => &c.base,
            Card::Equipment(c) => &c.base,
            Card::Support(c) => &c.base,
            Card::Event(c) => &c.base,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.base().id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.base().name
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.base().cost
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.base().description
    }

    /// Kind tag. Always matches the variant.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Character(_) => CardKind::Character,
            Card::Action(_) => CardKind::Action,
            Card::Equipment(_) => CardKind::Equipment,
            Card::Support(_) => CardKind::Support,
            Card::Event(_) => CardKind::Event,
        }
    }

    #[must_use]
    pub fn as_character(&self) -> Option<&CharacterCard> {
        match self {
            Card::Character(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_equipment(&self) -> Option<&EquipmentCard> {
        match self {
            Card::Equipment(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_support(&self) -> Option<&SupportCard> {
        match self {
            Card::Support(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_event(&self) -> Option<&EventCard> {
        match self {
            Card::Event(c) => Some(c),
            _ => None,
        }
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let name = self.name();
        match self {
            Card::Character(c) => {
                let element = c.element.map_or("Unknown element", Element::label);
                let mut line = format!(
                    "{name} (Character) - {element} {} | HP {} | Energy {}",
                    c.weapon.label(),
                    c.hp,
                    c.max_energy
                );
                if !c.skills.is_empty() {
                    let skills: Vec<&str> = c.skills.iter().map(|s| s.name.as_str()).collect();
                    line.push_str(" | Skills: ");
                    line.push_str(&skills.join(", "));
                }
                line
            }
            Card::Action(_) => format!("{name} (Action) - Cost {}", self.cost()),
            Card::Equipment(c) => match c.slot {
                Some(slot) => format!("{name} (Equipment, {slot}) - Cost {}", self.cost()),
                None => format!("{name} (Equipment) - Cost {}", self.cost()),
            },
            Card::Support(c) => match c.support_type {
                Some(kind) => format!("{name} (Support, {kind}) - Cost {}", self.cost()),
                None => format!("{name} (Support) - Cost {}", self.cost()),
            },
            Card::Event(c) => match c.duration {
                Some(1) => format!("{name} (Event, 1 round) - Cost {}", self.cost()),
                Some(rounds) => {
                    format!("{name} (Event, {rounds} rounds) - Cost {}", self.cost())
                }
                None => format!("{name} (Event) - Cost {}", self.cost()),
            },
        }
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id().hash(hasher);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}
