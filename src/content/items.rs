//! Consumable item table. Items live in the shared bag and are spent one
//! unit per use in battle.

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Heal,
    Damage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemTarget {
    Ally,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ItemKind,
    pub target: ItemTarget,
    pub amount: i32,
}

pub const ITEMS: &[ItemDefinition] = &[
    ItemDefinition {
        id: "potion",
        name: "Potion",
        description: "Restores 15 HP to one ally.",
        kind: ItemKind::Heal,
        target: ItemTarget::Ally,
        amount: 15,
    },
    ItemDefinition {
        id: "mist-bomb",
        name: "Mist Bomb",
        description: "Bursts for 12 damage against one enemy.",
        kind: ItemKind::Damage,
        target: ItemTarget::Enemy,
        amount: 12,
    },
    ItemDefinition {
        id: "ember-draught",
        name: "Ember Draught",
        description: "Restores 35 HP to one ally.",
        kind: ItemKind::Heal,
        target: ItemTarget::Ally,
        amount: 35,
    },
];

pub fn get_item(id: &str) -> Option<&'static ItemDefinition> {
    let found = ITEMS.iter().find(|item| item.id == id);
    if found.is_none() {
        warn!("unknown item id {id:?}");
    }
    found
}

/// Display name for an id, falling back to the id itself so bag listings
/// never show blanks.
pub fn item_name(id: &str) -> &str {
    ITEMS
        .iter()
        .find(|item| item.id == id)
        .map_or(id, |item| item.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback_name() {
        assert_eq!(get_item("potion").map(|i| i.amount), Some(15));
        assert!(get_item("no-such-item").is_none());
        assert_eq!(item_name("mist-bomb"), "Mist Bomb");
        assert_eq!(item_name("mystery"), "mystery");
    }
}
