//! # Party Systems
//!
//! The hero roster and everything that mutates it outside battle: derived
//! stats, equipment, xp rewards and leveling, and the shared item bag.

pub mod equipment;
pub mod inventory;
pub mod rewards;
pub mod stats;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::MAX_ACTIVE_HEROES;
use crate::content::gear::EquipmentSlot;
use crate::content::heroes::HERO_BASES;

pub use inventory::Bag;
pub use stats::{clamp_hero_vitals, compute_hero_stats, DerivedStats};

/// Base stats shared by hero templates and leveled heroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: i32,
    pub mp: i32,
    pub atk: i32,
    pub agi: i32,
}

/// A party member. Never removed from the roster; a fallen hero carries
/// `alive: false` until revived by battle finalization or leveling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub class: String,
    /// Grows with levels; derived maxima add gear on top of this
    pub base: StatBlock,
    pub level: u32,
    pub xp: u32,
    pub hp: i32,
    pub mp: i32,
    pub alive: bool,
    /// Gear id per occupied slot
    pub equipment: BTreeMap<EquipmentSlot, String>,
    /// Whether the hero joins the battle lineup
    pub active: bool,
}

impl Hero {
    fn from_base(base: &crate::content::heroes::HeroBase, active: bool) -> Self {
        Self {
            id: base.id.to_string(),
            name: base.name.to_string(),
            class: base.class.to_string(),
            base: base.base,
            level: 1,
            xp: 0,
            hp: base.base.hp,
            mp: base.base.mp,
            alive: true,
            equipment: BTreeMap::new(),
            active,
        }
    }
}

/// Builds the starting party from the hero table. The first three roster
/// entries begin in the active lineup.
pub fn create_party() -> Vec<Hero> {
    HERO_BASES
        .iter()
        .enumerate()
        .map(|(idx, base)| Hero::from_base(base, idx < MAX_ACTIVE_HEROES))
        .collect()
}

/// The battle lineup: active heroes capped at three, or the first three
/// roster members when nobody is flagged active.
pub fn battle_lineup(party: &[Hero]) -> Vec<&Hero> {
    let mut lineup: Vec<&Hero> = party.iter().filter(|h| h.active).collect();
    if lineup.is_empty() {
        lineup = party.iter().take(MAX_ACTIVE_HEROES).collect();
    }
    lineup.truncate(MAX_ACTIVE_HEROES);
    lineup
}

/// Average level of the battle lineup, rounded to nearest, never below 1.
/// Drives the encounter factory's difficulty window.
pub fn average_top_level(party: &[Hero]) -> u32 {
    let lineup = battle_lineup(party);
    if lineup.is_empty() {
        return 1;
    }
    let total: u32 = lineup.iter().map(|h| h.level).sum();
    let avg = (f64::from(total) / lineup.len() as f64).round() as u32;
    avg.max(1)
}
