//! Card factory - typed cards from untyped attribute maps.
//!
//! The factory reads the kind tag (`card_type`, or `kind` as a fallback),
//! normalises it, and dispatches through a kind → constructor table. Base
//! fields are strict: a missing or blank `id`/`name`, a missing or unknown
//! kind tag, or a negative cost is bad data and fails with
//! `CardDataError`. Kind-specific fields are permissive: absent or
//! malformed values fall back to fixed defaults so that heterogeneous
//! catalog sources can still be imported.
//!
//! ## Defaults
//!
//! | Field | Default |
//! |---|---|
//! | `cost` | 0 |
//! | `description` | empty |
//! | `element` | none |
//! | `weapon` | `Other` |
//! | `hp`, `max_energy` | 0 |
//! | `skills` | empty |
//! | skill type | by listing position: normal attack, skill, burst, then passive |
//! | equipment `slot`, support `support_type`, `usages`, event `duration` | none |

use rustc_hash::FxHashMap;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::attributes::{attributes_from_json, AttributeKey, AttributeValue, Attributes};
use super::definition::{
    ActionCard, Card, CardBase, CharacterCard, EquipmentCard, EventCard, Skill, Skills,
    SupportCard,
};
use super::kinds::{CardKind, Element, EquipmentSlot, SkillType, SupportType, WeaponType};
use crate::core::error::CardDataError;
use crate::core::ids::CardId;

/// Builds the kind-specific part of a card once the base is known.
pub type Constructor = fn(CardBase, &Attributes) -> Card;

const KIND_KEYS: [&str; 2] = ["card_type", "kind"];

/// Constructs typed cards from attribute maps.
///
/// ## Example
///
/// ```
/// use serde_json::json;
/// use tcg_deckbuilder::cards::{CardFactory, CardKind};
///
/// let factory = CardFactory::new();
/// let card = factory
///     .create_card_from_json(&json!({
///         "id": "diluc",
///         "name": "Diluc",
///         "card_type": "character",
///         "element": "Pyro",
///         "hp": 10,
///     }))
///     .unwrap();
///
/// assert_eq!(card.kind(), CardKind::Character);
/// assert_eq!(card.as_character().unwrap().hp, 10);
/// ```
#[derive(Clone)]
pub struct CardFactory {
    constructors: FxHashMap<CardKind, Constructor>,
}

impl std::fmt::Debug for CardFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.constructors.keys().collect();
        kinds.sort();
        f.debug_struct("CardFactory").field("kinds", &kinds).finish()
    }
}

impl Default for CardFactory {
    fn default() -> Self {
        let mut constructors: FxHashMap<CardKind, Constructor> = FxHashMap::default();
        constructors.insert(CardKind::Character, build_character);
        constructors.insert(CardKind::Action, build_action);
        constructors.insert(CardKind::Equipment, build_equipment);
        constructors.insert(CardKind::Support, build_support);
        constructors.insert(CardKind::Event, build_event);
        Self { constructors }
    }
}

impl CardFactory {
    /// Factory with a constructor for every card kind.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the constructor used for a kind.
    ///
    /// The constructor must return a card of that kind; `create_card`
    /// fails with `KindMismatch` otherwise.
    pub fn register(&mut self, kind: CardKind, constructor: Constructor) {
        self.constructors.insert(kind, constructor);
    }

    /// Build a card from an attribute map.
    pub fn create_card(&self, attrs: &Attributes) -> Result<Card, CardDataError> {
        let kind = read_kind(attrs)?;
        let constructor = self
            .constructors
            .get(&kind)
            .ok_or_else(|| CardDataError::UnknownKind(kind.as_tag().to_string()))?;
        let base = read_base(attrs)?;

        debug!(card_id = %base.id, kind = kind.as_tag(), "building card");
        let card = constructor(base, attrs);
        if card.kind() != kind {
            return Err(CardDataError::KindMismatch {
                expected: kind,
                built: card.kind(),
            });
        }
        Ok(card)
    }

    /// Build a card from a JSON object.
    pub fn create_card_from_json(&self, value: &Value) -> Result<Card, CardDataError> {
        self.create_card(&attributes_from_json(value)?)
    }
}

fn get<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a AttributeValue> {
    attrs.get(&AttributeKey::new(key))
}

fn get_any<'a>(attrs: &'a Attributes, keys: &[&str]) -> Option<&'a AttributeValue> {
    keys.iter().find_map(|key| get(attrs, key))
}

fn read_kind(attrs: &Attributes) -> Result<CardKind, CardDataError> {
    let value = get_any(attrs, &KIND_KEYS).ok_or(CardDataError::MissingField {
        field: "card_type",
    })?;
    let tag = value.as_text().ok_or(CardDataError::WrongType {
        field: "card_type",
        expected: "text",
    })?;
    tag.parse::<CardKind>()
        .map_err(|_| CardDataError::UnknownKind(tag.trim().to_string()))
}

fn read_required_text(attrs: &Attributes, field: &'static str) -> Result<String, CardDataError> {
    let text = match get(attrs, field) {
        None => return Err(CardDataError::MissingField { field }),
        Some(AttributeValue::Text(s)) => s.trim().to_string(),
        Some(AttributeValue::Int(i)) => i.to_string(),
        Some(_) => {
            return Err(CardDataError::WrongType {
                field,
                expected: "text",
            })
        }
    };
    if text.is_empty() {
        return Err(CardDataError::EmptyField { field });
    }
    Ok(text)
}

fn read_base(attrs: &Attributes) -> Result<CardBase, CardDataError> {
    let id = CardId::new(read_required_text(attrs, "id")?);
    let name = read_required_text(attrs, "name")?;

    let cost = match get(attrs, "cost") {
        None => 0,
        Some(value) => {
            let cost = value.as_int().ok_or(CardDataError::WrongType {
                field: "cost",
                expected: "a non-negative integer",
            })?;
            if cost < 0 {
                return Err(CardDataError::NegativeCost(cost));
            }
            u32::try_from(cost).map_err(|_| CardDataError::WrongType {
                field: "cost",
                expected: "a non-negative integer",
            })?
        }
    };

    let description = match get(attrs, "description") {
        None => String::new(),
        Some(AttributeValue::Text(s)) => s.trim().to_string(),
        Some(_) => {
            warn!(card_id = %id, field = "description", "ignoring malformed optional field");
            String::new()
        }
    };

    Ok(CardBase {
        id,
        name,
        cost,
        description,
    })
}

fn base_id(base: &CardBase) -> &str {
    base.id.as_str()
}

/// Optional non-negative count. Malformed values are dropped with a warning.
fn optional_count(attrs: &Attributes, keys: &[&'static str], card: &str) -> Option<u32> {
    let value = get_any(attrs, keys)?;
    match value.as_int().and_then(|v| u32::try_from(v).ok()) {
        Some(v) => Some(v),
        None => {
            warn!(card_id = card, field = keys[0], "ignoring malformed optional field");
            None
        }
    }
}

/// Optional enum tag. Unknown tags are dropped with a warning.
fn optional_tag<T: std::str::FromStr>(
    attrs: &Attributes,
    keys: &[&'static str],
    card: &str,
) -> Option<T> {
    let value = get_any(attrs, keys)?;
    match value.as_text().and_then(|s| s.parse().ok()) {
        Some(v) => Some(v),
        None => {
            warn!(card_id = card, field = keys[0], ?value, "ignoring unrecognized optional field");
            None
        }
    }
}

fn positional_skill_type(index: usize) -> SkillType {
    match index {
        0 => SkillType::NormalAttack,
        1 => SkillType::ElementalSkill,
        2 => SkillType::ElementalBurst,
        _ => SkillType::Passive,
    }
}

fn read_skill(record: &Attributes, index: usize, card: &str) -> Option<Skill> {
    let name = match get(record, "name").and_then(AttributeValue::as_text) {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            warn!(card_id = card, index, "skipping skill without a name");
            return None;
        }
    };
    let skill_type = optional_tag(record, &["skill_type", "type"], card)
        .unwrap_or_else(|| positional_skill_type(index));

    Some(Skill {
        name,
        skill_type,
        cost: optional_count(record, &["cost"], card).unwrap_or(0),
        description: get(record, "description")
            .and_then(AttributeValue::as_text)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        damage: optional_count(record, &["damage"], card),
    })
}

fn read_skills(attrs: &Attributes, card: &str) -> Skills {
    match get(attrs, "skills") {
        None => SmallVec::new(),
        Some(AttributeValue::Records(records)) => records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| read_skill(record, i, card))
            .collect(),
        Some(AttributeValue::TextList(names)) => names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .enumerate()
            .map(|(i, name)| Skill::new(name, positional_skill_type(i)))
            .collect(),
        Some(_) => {
            warn!(card_id = card, field = "skills", "ignoring malformed optional field");
            SmallVec::new()
        }
    }
}

fn build_character(base: CardBase, attrs: &Attributes) -> Card {
    let card = base_id(&base).to_string();
    let element: Option<Element> = optional_tag(attrs, &["element"], &card);
    let weapon: WeaponType =
        optional_tag(attrs, &["weapon", "weapon_type"], &card).unwrap_or(WeaponType::Other);

    Card::Character(CharacterCard {
        element,
        weapon,
        hp: optional_count(attrs, &["hp"], &card).unwrap_or(0),
        max_energy: optional_count(attrs, &["max_energy", "energy"], &card).unwrap_or(0),
        skills: read_skills(attrs, &card),
        base,
    })
}

fn build_action(base: CardBase, attrs: &Attributes) -> Card {
    let tags = match get(attrs, "tags") {
        None => Vec::new(),
        Some(AttributeValue::TextList(tags)) => tags.clone(),
        Some(AttributeValue::Text(tag)) => vec![tag.trim().to_string()],
        Some(_) => {
            warn!(card_id = base_id(&base), field = "tags", "ignoring malformed optional field");
            Vec::new()
        }
    };
    Card::Action(ActionCard { base, tags })
}

fn build_equipment(base: CardBase, attrs: &Attributes) -> Card {
    let slot: Option<EquipmentSlot> =
        optional_tag(attrs, &["slot", "equipment_type"], base_id(&base));
    Card::Equipment(EquipmentCard { base, slot })
}

fn build_support(base: CardBase, attrs: &Attributes) -> Card {
    let card = base_id(&base).to_string();
    let support_type: Option<SupportType> = optional_tag(attrs, &["support_type"], &card);
    let usages = optional_count(attrs, &["usages"], &card);
    Card::Support(SupportCard {
        base,
        support_type,
        usages,
    })
}

fn build_event(base: CardBase, attrs: &Attributes) -> Card {
    let duration = optional_count(attrs, &["duration"], base_id(&base));
    Card::Event(EventCard { base, duration })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(pairs: &[(&str, AttributeValue)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (AttributeKey::new(*k), v.clone()))
            .collect()
    }

    #[test]
    fn test_dispatch_on_each_kind() {
        let factory = CardFactory::new();
        for kind in CardKind::ALL {
            let card = factory
                .create_card(&attrs(&[
                    ("id", "c".into()),
                    ("name", "C".into()),
                    ("card_type", kind.as_tag().to_lowercase().into()),
                ]))
                .unwrap();
            assert_eq!(card.kind(), *kind);
        }
    }

    #[test]
    fn test_kind_fallback_key() {
        let card = CardFactory::new()
            .create_card(&attrs(&[
                ("id", "e".into()),
                ("name", "E".into()),
                ("kind", "Event".into()),
            ]))
            .unwrap();
        assert_eq!(card.kind(), CardKind::Event);
    }

    #[test]
    fn test_missing_base_fields() {
        let factory = CardFactory::new();

        let err = factory
            .create_card(&attrs(&[("id", "x".into()), ("card_type", "ACTION".into())]))
            .unwrap_err();
        assert_eq!(err, CardDataError::MissingField { field: "name" });

        let err = factory
            .create_card(&attrs(&[("id", "x".into()), ("name", "X".into())]))
            .unwrap_err();
        assert_eq!(err, CardDataError::MissingField { field: "card_type" });

        let err = factory
            .create_card(&attrs(&[
                ("id", "   ".into()),
                ("name", "X".into()),
                ("card_type", "ACTION".into()),
            ]))
            .unwrap_err();
        assert_eq!(err, CardDataError::EmptyField { field: "id" });
    }

    #[test]
    fn test_unknown_kind() {
        let err = CardFactory::new()
            .create_card_from_json(&json!({"id": "x", "name": "X", "card_type": "spell"}))
            .unwrap_err();
        assert_eq!(err, CardDataError::UnknownKind("spell".to_string()));
    }

    #[test]
    fn test_cost_rules() {
        let factory = CardFactory::new();

        let card = factory
            .create_card_from_json(&json!({"id": "a", "name": "A", "card_type": "ACTION", "cost": "3"}))
            .unwrap();
        assert_eq!(card.cost(), 3);

        let err = factory
            .create_card_from_json(&json!({"id": "a", "name": "A", "card_type": "ACTION", "cost": -1}))
            .unwrap_err();
        assert_eq!(err, CardDataError::NegativeCost(-1));

        let err = factory
            .create_card_from_json(&json!({"id": "a", "name": "A", "card_type": "ACTION", "cost": "lots"}))
            .unwrap_err();
        assert!(matches!(err, CardDataError::WrongType { field: "cost", .. }));
    }

    #[test]
    fn test_character_defaults() {
        let card = CardFactory::new()
            .create_card_from_json(&json!({"id": "m", "name": "Mystery", "card_type": "CHARACTER"}))
            .unwrap();
        let character = card.as_character().unwrap();

        assert_eq!(character.element, None);
        assert_eq!(character.weapon, WeaponType::Other);
        assert_eq!(character.hp, 0);
        assert_eq!(character.max_energy, 0);
        assert!(character.skills.is_empty());
    }

    #[test]
    fn test_malformed_optional_fields_fall_back() {
        let card = CardFactory::new()
            .create_card_from_json(&json!({
                "id": "k",
                "name": "Keqing",
                "card_type": "CHARACTER",
                "element": "Plasma",
                "weapon": "sword",
                "hp": -4,
                "energy": 3,
                "skills": "not a list",
            }))
            .unwrap();
        let character = card.as_character().unwrap();

        assert_eq!(character.element, None);
        assert_eq!(character.weapon, WeaponType::Sword);
        assert_eq!(character.hp, 0);
        assert_eq!(character.max_energy, 3);
        assert!(character.skills.is_empty());
    }

    #[test]
    fn test_skill_records_and_names() {
        let factory = CardFactory::new();

        let card = factory
            .create_card_from_json(&json!({
                "id": "diluc",
                "name": "Diluc",
                "card_type": "CHARACTER",
                "skills": [
                    {"name": "Tempered Sword", "cost": 3, "damage": 2},
                    {"name": "Searing Onslaught", "skill_type": "Elemental Skill", "damage": 3},
                    {"description": "no name, skipped"},
                    {"name": "Dawn", "type": "elemental burst", "damage": 8},
                ],
            }))
            .unwrap();
        let skills = &card.as_character().unwrap().skills;
        assert_eq!(skills.len(), 3);
        assert_eq!(skills[0].skill_type, SkillType::NormalAttack);
        assert_eq!(skills[0].damage, Some(2));
        assert_eq!(skills[1].skill_type, SkillType::ElementalSkill);
        assert_eq!(skills[2].skill_type, SkillType::ElementalBurst);

        let card = factory
            .create_card_from_json(&json!({
                "id": "fischl",
                "name": "Fischl",
                "card_type": "CHARACTER",
                "skills": ["Bolts of Downfall", "Nightrider", "Midnight Phantasmagoria", "Stellar Predator"],
            }))
            .unwrap();
        let skills = &card.as_character().unwrap().skills;
        assert_eq!(skills.len(), 4);
        assert_eq!(skills[3].skill_type, SkillType::Passive);
    }

    #[test]
    fn test_kind_specific_optionals() {
        let factory = CardFactory::new();

        let card = factory
            .create_card_from_json(&json!({"id": "w", "name": "W", "card_type": "EQUIPMENT", "slot": "artifact"}))
            .unwrap();
        assert_eq!(card.as_equipment().unwrap().slot, Some(EquipmentSlot::Artifact));

        let card = factory
            .create_card_from_json(&json!({"id": "s", "name": "S", "card_type": "SUPPORT", "support_type": "Location", "usages": 3}))
            .unwrap();
        let support = card.as_support().unwrap();
        assert_eq!(support.support_type, Some(SupportType::Location));
        assert_eq!(support.usages, Some(3));

        let card = factory
            .create_card_from_json(&json!({"id": "e", "name": "E", "card_type": "EVENT"}))
            .unwrap();
        assert_eq!(card.as_event().unwrap().duration, None);
    }

    #[test]
    fn test_create_is_idempotent() {
        let factory = CardFactory::new();
        let data = json!({
            "id": "paimon",
            "name": "Paimon",
            "card_type": "SUPPORT",
            "cost": 3,
            "support_type": "COMPANION",
        });

        let a = factory.create_card_from_json(&data).unwrap();
        let b = factory.create_card_from_json(&data).unwrap();
        assert_eq!(a.as_support(), b.as_support());
    }

    #[test]
    fn test_register_replaces_constructor() {
        fn tagged_action(base: CardBase, _: &Attributes) -> Card {
            Card::Action(ActionCard {
                base,
                tags: vec!["Imported".to_string()],
            })
        }

        let mut factory = CardFactory::new();
        factory.register(CardKind::Action, tagged_action);

        let card = factory
            .create_card_from_json(&json!({"id": "a", "name": "A", "card_type": "ACTION"}))
            .unwrap();
        match card {
            Card::Action(action) => assert_eq!(action.tags, vec!["Imported".to_string()]),
            other => panic!("expected an action card, got {other:?}"),
        }
    }

    #[test]
    fn test_constructor_of_wrong_kind_is_rejected() {
        fn character_instead(base: CardBase, _: &Attributes) -> Card {
            Card::Character(CharacterCard {
                base,
                element: None,
                weapon: WeaponType::Other,
                hp: 0,
                max_energy: 0,
                skills: Skills::new(),
            })
        }

        let mut factory = CardFactory::new();
        factory.register(CardKind::Action, character_instead);

        let err = factory
            .create_card_from_json(&json!({"id": "a", "name": "A", "card_type": "ACTION"}))
            .unwrap_err();
        assert_eq!(
            err,
            CardDataError::KindMismatch {
                expected: CardKind::Action,
                built: CardKind::Character,
            }
        );
    }
}
