//! Card system: taxonomy, attribute maps and the factory.
//!
//! ## Key Types
//!
//! - `Card`: closed enum over the five card kinds
//! - `CardBase`: id, name, cost, description shared by every kind
//! - `CardKind`, `Element`, `WeaponType`, ...: closed tag enumerations
//! - `Attributes`: untyped key/value map as delivered by catalog sources
//! - `CardFactory`: attribute map → typed `Card`

pub mod attributes;
pub mod definition;
pub mod factory;
pub mod kinds;

pub use attributes::{attributes_from_json, AttributeKey, AttributeValue, Attributes};
pub use definition::{
    ActionCard, Card, CardBase, CharacterCard, EquipmentCard, EventCard, Skill, Skills,
    SupportCard,
};
pub use factory::{CardFactory, Constructor};
pub use kinds::{
    normalize_tag, CardKind, Element, EquipmentSlot, SkillType, SupportType, UnknownTag,
    WeaponType,
};
