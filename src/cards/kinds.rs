//! Closed enumerations of the card taxonomy.
//!
//! Catalog sources spell these inconsistently ("Elemental Skill",
//! "ELEMENTAL_SKILL", "elemental-skill"), so every enum parses through
//! `normalize_tag`: trimmed, upper-cased, with spaces and hyphens folded to
//! underscores.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical form of a tag: `"  elemental skill "` becomes `"ELEMENTAL_SKILL"`.
#[must_use]
pub fn normalize_tag(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Error returned when a tag names no variant of the target enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl std::fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown tag `{}`", self.0)
    }
}

impl std::error::Error for UnknownTag {}

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $tag:literal, $label:literal;)+ }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Canonical upper-case tag.
            #[must_use]
            pub const fn as_tag(self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }

            /// Human-readable label.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match normalize_tag(s).as_str() {
                    $($tag => Ok($name::$variant),)+
                    _ => Err(UnknownTag(s.trim().to_string())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

tag_enum! {
    /// Card kind. Declaration order is the display priority in deck summaries.
    CardKind {
        Character => "CHARACTER", "Character";
        Action => "ACTION", "Action";
        Equipment => "EQUIPMENT", "Equipment";
        Support => "SUPPORT", "Support";
        Event => "EVENT", "Event";
    }
}

tag_enum! {
    /// Elemental affiliation of a character.
    Element {
        Pyro => "PYRO", "Pyro";
        Hydro => "HYDRO", "Hydro";
        Electro => "ELECTRO", "Electro";
        Cryo => "CRYO", "Cryo";
        Dendro => "DENDRO", "Dendro";
        Anemo => "ANEMO", "Anemo";
        Geo => "GEO", "Geo";
    }
}

tag_enum! {
    /// Weapon wielded by a character. Monsters use `Other`.
    WeaponType {
        Sword => "SWORD", "Sword";
        Claymore => "CLAYMORE", "Claymore";
        Polearm => "POLEARM", "Polearm";
        Bow => "BOW", "Bow";
        Catalyst => "CATALYST", "Catalyst";
        Other => "OTHER", "Other Weapons";
    }
}

tag_enum! {
    /// Slot an equipment card occupies on its character.
    EquipmentSlot {
        Weapon => "WEAPON", "Weapon";
        Artifact => "ARTIFACT", "Artifact";
        Talent => "TALENT", "Talent";
        Technique => "TECHNIQUE", "Technique";
    }
}

tag_enum! {
    /// Support card category.
    SupportType {
        Companion => "COMPANION", "Companion";
        Item => "ITEM", "Item";
        Location => "LOCATION", "Location";
    }
}

tag_enum! {
    /// Character skill category.
    SkillType {
        NormalAttack => "NORMAL_ATTACK", "Normal Attack";
        ElementalSkill => "ELEMENTAL_SKILL", "Elemental Skill";
        ElementalBurst => "ELEMENTAL_BURST", "Elemental Burst";
        Passive => "PASSIVE", "Passive Skill";
    }
}

impl CardKind {
    /// Heading used when grouping deck entries.
    #[must_use]
    pub const fn group_heading(self) -> &'static str {
        match self {
            CardKind::Character => "Characters",
            CardKind::Action => "Action Cards",
            CardKind::Equipment => "Equipment Cards",
            CardKind::Support => "Support Cards",
            CardKind::Event => "Event Cards",
        }
    }
}
