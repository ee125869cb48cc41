//! Combat data model: battlers, the phase enum, menu cursor, pending
//! actions, and the discrete event stream the renderer animates from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{BATTLE_INTRO_FRAMES, BATTLE_VICTORY_FRAMES};
use crate::party::{battle_lineup, compute_hero_stats, Hero};

/// Which side a battler fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Heroes,
    Enemies,
}

/// Ephemeral combat projection of a hero or an enemy template. Created at
/// battle start, written back onto heroes at finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battler {
    pub id: String,
    pub name: String,
    pub team: Team,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub atk: i32,
    pub agi: i32,
    pub alive: bool,
    /// Turn-progress meter, reserved for a future speed-based turn order
    pub atb: f32,
    pub sprite: Option<String>,
}

/// Battle state-machine phases. At most one transition happens per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    HeroInput,
    TargetSelect,
    Resolve,
    EnemyTurn,
    Victory,
    Defeat,
    Summary,
}

/// Which command list the hero menu is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMode {
    Primary,
    Skills,
    Spells,
    Items,
}

/// One row of a sub-menu, projected for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEntry {
    pub id: String,
    pub label: String,
    pub cost: Option<i32>,
    pub qty: Option<u32>,
    /// Unaffordable commands stay listed but refuse selection
    pub disabled: bool,
}

/// Menu and targeting cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub hero_idx: usize,
    pub menu_idx: usize,
    pub target_idx: usize,
    pub target_team: Team,
    pub mode: MenuMode,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            hero_idx: 0,
            menu_idx: 0,
            target_idx: 0,
            target_team: Team::Enemies,
            mode: MenuMode::Primary,
        }
    }
}

/// Action awaiting a target.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Attack,
    Ability { id: String },
    Item { id: String },
}

/// Discrete combat happening, consumed by the renderer for hit flashes,
/// KO fades, and floating numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CombatEvent {
    Damage {
        target: String,
        amount: i32,
        ko: bool,
    },
    Heal {
        target: String,
        amount: i32,
    },
}

/// Totals paid out at battle end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reward {
    pub xp: u32,
    pub gold: u32,
}

/// Full battle state. Created per encounter, discarded after the summary.
#[derive(Debug, Clone)]
pub struct CombatState {
    pub phase: Phase,
    pub heroes: Vec<Battler>,
    pub enemies: Vec<Battler>,
    /// Append-only battle log; the renderer shows the tail
    pub log: Vec<String>,
    pub cursor: Cursor,
    pub pending: Option<PendingAction>,
    pub reward: Reward,
    /// Xp value of each enemy battler, by battler id
    pub enemy_xp: HashMap<String, u32>,
    /// Kill credit accumulated per hero id
    pub kill_xp: HashMap<String, u32>,
    /// Sub-menu rows for the current hero, rebuilt on menu entry
    pub commands: Vec<CommandEntry>,
    pub intro_frames: u32,
    pub victory_frames: u32,
    /// Battle-background hint from the triggering map
    pub tile_type: Option<u8>,
}

impl CombatState {
    /// Fresh state around an enemy roster, before heroes are attached.
    pub fn new(enemies: Vec<Battler>, reward: Reward, enemy_xp: HashMap<String, u32>) -> Self {
        Self {
            phase: Phase::Intro,
            heroes: Vec::new(),
            enemies,
            log: vec!["Enemies emerge from the Mist...".to_string()],
            cursor: Cursor::default(),
            pending: None,
            reward,
            enemy_xp,
            kill_xp: HashMap::new(),
            commands: Vec::new(),
            intro_frames: BATTLE_INTRO_FRAMES,
            victory_frames: BATTLE_VICTORY_FRAMES,
            tile_type: None,
        }
    }

    /// Snapshots the party's battle lineup into hero battlers. Current
    /// hp/mp are clamped to the gear-derived maxima.
    pub fn attach_party(&mut self, party: &[Hero]) {
        self.heroes = battle_lineup(party)
            .into_iter()
            .map(|hero| {
                let derived = compute_hero_stats(hero);
                Battler {
                    id: hero.id.clone(),
                    name: hero.name.clone(),
                    team: Team::Heroes,
                    hp: hero.hp.min(derived.hp),
                    max_hp: derived.hp,
                    mp: hero.mp.min(derived.mp),
                    max_mp: derived.mp,
                    atk: derived.atk,
                    agi: derived.agi,
                    alive: hero.alive,
                    atb: 0.0,
                    sprite: None,
                }
            })
            .collect();
    }

    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn living_heroes(&self) -> usize {
        self.heroes.iter().filter(|h| h.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::gear::EquipmentSlot;
    use crate::party::create_party;

    fn bare_state() -> CombatState {
        CombatState::new(Vec::new(), Reward::default(), HashMap::new())
    }

    #[test]
    fn test_new_state_opens_with_intro() {
        let state = bare_state();
        assert_eq!(state.phase, Phase::Intro);
        assert_eq!(state.intro_frames, BATTLE_INTRO_FRAMES);
        assert_eq!(state.log.first().map(String::as_str), Some("Enemies emerge from the Mist..."));
    }

    #[test]
    fn test_attach_party_clamps_to_derived() {
        let mut party = create_party();
        party[0].hp = 999;
        party[0]
            .equipment
            .insert(EquipmentSlot::Head, "iron-helm".into());
        let mut state = bare_state();
        state.attach_party(&party);
        assert_eq!(state.heroes.len(), 3);
        let kael = &state.heroes[0];
        assert_eq!(kael.max_hp, party[0].base.hp + 4);
        assert_eq!(kael.hp, kael.max_hp);
    }

    #[test]
    fn test_attach_party_respects_lineup_cap() {
        let party = create_party();
        let mut state = bare_state();
        state.attach_party(&party);
        assert!(state.heroes.len() <= crate::config::MAX_ACTIVE_HEROES);
    }
}
