//! Hero ability table. Abilities are owned by a hero id and grouped into
//! skill/spell categories for the battle sub-menus.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityCategory {
    Skill,
    Spell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    Attack,
    Heal,
}

/// Who an ability may be aimed at. `User` resolves on the caster without
/// entering target selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityTarget {
    Enemy,
    Ally,
    #[serde(rename = "self")]
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityDefinition {
    pub id: &'static str,
    pub hero: &'static str,
    pub name: &'static str,
    pub category: AbilityCategory,
    pub kind: AbilityKind,
    pub power: i32,
    pub cost: i32,
    pub target: AbilityTarget,
    pub description: &'static str,
}

pub const ABILITIES: &[AbilityDefinition] = &[
    AbilityDefinition {
        id: "cleave",
        hero: "kael",
        name: "Cleave",
        category: AbilityCategory::Skill,
        kind: AbilityKind::Attack,
        power: 4,
        cost: 2,
        target: AbilityTarget::Enemy,
        description: "A heavy two-handed swing.",
    },
    AbilityDefinition {
        id: "crag-breaker",
        hero: "kael",
        name: "Crag Breaker",
        category: AbilityCategory::Skill,
        kind: AbilityKind::Attack,
        power: 8,
        cost: 5,
        target: AbilityTarget::Enemy,
        description: "Shatters armor with a downward blow.",
    },
    AbilityDefinition {
        id: "mist-bolt",
        hero: "eyla",
        name: "Mist Bolt",
        category: AbilityCategory::Spell,
        kind: AbilityKind::Attack,
        power: 5,
        cost: 3,
        target: AbilityTarget::Enemy,
        description: "Condensed Mist hurled as a lance.",
    },
    AbilityDefinition {
        id: "soothing-veil",
        hero: "eyla",
        name: "Soothing Veil",
        category: AbilityCategory::Spell,
        kind: AbilityKind::Heal,
        power: 8,
        cost: 4,
        target: AbilityTarget::Ally,
        description: "Wraps an ally in restorative vapor.",
    },
    AbilityDefinition {
        id: "mend",
        hero: "greyor",
        name: "Mend",
        category: AbilityCategory::Spell,
        kind: AbilityKind::Heal,
        power: 6,
        cost: 3,
        target: AbilityTarget::Ally,
        description: "Knits wounds closed with warden rites.",
    },
    AbilityDefinition {
        id: "iron-focus",
        hero: "greyor",
        name: "Iron Focus",
        category: AbilityCategory::Skill,
        kind: AbilityKind::Heal,
        power: 4,
        cost: 2,
        target: AbilityTarget::User,
        description: "Steadies the warden's own guard.",
    },
];

pub fn get_ability(id: &str) -> Option<&'static AbilityDefinition> {
    ABILITIES.iter().find(|a| a.id == id)
}

/// Abilities a hero can open under one sub-menu category, in table order.
pub fn hero_abilities_by_category(
    hero_id: &str,
    category: AbilityCategory,
) -> Vec<&'static AbilityDefinition> {
    ABILITIES
        .iter()
        .filter(|a| a.hero == hero_id && a.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter() {
        let skills = hero_abilities_by_category("kael", AbilityCategory::Skill);
        assert_eq!(skills.len(), 2);
        assert!(hero_abilities_by_category("kael", AbilityCategory::Spell).is_empty());
        let spells = hero_abilities_by_category("eyla", AbilityCategory::Spell);
        assert_eq!(spells.len(), 2);
    }

    #[test]
    fn test_every_ability_belongs_to_a_known_hero() {
        use crate::content::heroes::HERO_BASES;
        for ability in ABILITIES {
            assert!(
                HERO_BASES.iter().any(|h| h.id == ability.hero),
                "{} owned by unknown hero {}",
                ability.id,
                ability.hero
            );
            assert!(ability.cost >= 0);
            assert!(ability.power > 0);
        }
    }
}
