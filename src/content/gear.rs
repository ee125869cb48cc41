//! Equipment table. Each piece fits one slot and contributes flat stat
//! bonuses to the wearer's derived stats.

use log::warn;
use serde::{Deserialize, Serialize};

/// Equipment slots on a hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Head,
    Body,
    Focus,
    Accessory,
    Boots,
}

/// Flat stat bonuses granted by one gear piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GearBonuses {
    pub hp: i32,
    pub mp: i32,
    pub atk: i32,
    pub agi: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GearDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub bonuses: GearBonuses,
}

const NO_BONUS: GearBonuses = GearBonuses {
    hp: 0,
    mp: 0,
    atk: 0,
    agi: 0,
};

pub const GEAR: &[GearDefinition] = &[
    GearDefinition {
        id: "iron-helm",
        name: "Iron Helm",
        slot: EquipmentSlot::Head,
        bonuses: GearBonuses { hp: 4, ..NO_BONUS },
    },
    GearDefinition {
        id: "mistwarden-mail",
        name: "Mistwarden Mail",
        slot: EquipmentSlot::Body,
        bonuses: GearBonuses {
            hp: 8,
            agi: -1,
            ..NO_BONUS
        },
    },
    GearDefinition {
        id: "ember-splitter",
        name: "Ember Splitter",
        slot: EquipmentSlot::Weapon,
        bonuses: GearBonuses { atk: 4, ..NO_BONUS },
    },
    GearDefinition {
        id: "runed-focus",
        name: "Runed Focus",
        slot: EquipmentSlot::Focus,
        bonuses: GearBonuses {
            mp: 6,
            atk: 1,
            ..NO_BONUS
        },
    },
    GearDefinition {
        id: "stormband",
        name: "Stormband",
        slot: EquipmentSlot::Accessory,
        bonuses: GearBonuses { agi: 3, ..NO_BONUS },
    },
    GearDefinition {
        id: "aether-amulet",
        name: "Aether Amulet",
        slot: EquipmentSlot::Accessory,
        bonuses: GearBonuses {
            mp: 4,
            hp: 2,
            ..NO_BONUS
        },
    },
    GearDefinition {
        id: "scout-greaves",
        name: "Scout Greaves",
        slot: EquipmentSlot::Boots,
        bonuses: GearBonuses { agi: 2, ..NO_BONUS },
    },
];

pub fn get_gear(id: &str) -> Option<&'static GearDefinition> {
    let found = GEAR.iter().find(|g| g.id == id);
    if found.is_none() {
        warn!("unknown gear id {id:?}");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(
            get_gear("ember-splitter").map(|g| g.slot),
            Some(EquipmentSlot::Weapon)
        );
        assert!(get_gear("wooden-spoon").is_none());
    }

    #[test]
    fn test_ids_unique() {
        for (i, a) in GEAR.iter().enumerate() {
            for b in &GEAR[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
