//! Encounter factory: picks enemy templates around the party's level and
//! builds the opening combat state.

use std::collections::HashMap;

use log::debug;

use crate::combat::state::{Battler, CombatState, Reward, Team};
use crate::content::enemies::{max_template_level, EnemyTemplate, ENEMY_TEMPLATES};
use crate::rng::Mulberry32;
use crate::{MistheartError, MistheartResult};

const ENCOUNTER_SIZE: usize = 2;

/// Builds an encounter for a party of roughly `party_level`. `tile_type`
/// is a battle-background hint carried through untouched.
///
/// An empty template pool is a content-authoring bug and surfaces as a
/// content-integrity error rather than a fallback.
pub fn make_encounter(
    party_level: u32,
    tile_type: Option<u8>,
    rng: &mut Mulberry32,
) -> MistheartResult<CombatState> {
    let picks = pick_templates(ENEMY_TEMPLATES, party_level, ENCOUNTER_SIZE, rng)?;

    let mut enemy_xp = HashMap::new();
    let enemies: Vec<Battler> = picks
        .iter()
        .enumerate()
        .map(|(i, template)| {
            let id = format!("{}_{i}", template.id);
            enemy_xp.insert(id.clone(), template.xp);
            Battler {
                id,
                name: template.name.to_string(),
                team: Team::Enemies,
                hp: template.hp,
                max_hp: template.hp,
                mp: 0,
                max_mp: 0,
                atk: template.atk,
                agi: template.agi,
                alive: true,
                atb: 0.0,
                sprite: Some(template.sprite.to_string()),
            }
        })
        .collect();

    let reward = Reward {
        xp: picks.iter().map(|t| t.xp).sum(),
        gold: picks.iter().map(|t| t.gold).sum(),
    };
    debug!(
        "encounter for party level {party_level}: {:?}",
        picks.iter().map(|t| t.id).collect::<Vec<_>>()
    );

    let mut state = CombatState::new(enemies, reward, enemy_xp);
    state.tile_type = tile_type;
    Ok(state)
}

/// Widens a level window around the party level until at least
/// `desired` templates qualify, then samples that many distinct templates.
/// A pool smaller than `desired` pads by repeating its last entry.
fn pick_templates(
    pool: &'static [EnemyTemplate],
    party_level: u32,
    desired: usize,
    rng: &mut Mulberry32,
) -> MistheartResult<Vec<&'static EnemyTemplate>> {
    if pool.is_empty() {
        return Err(MistheartError::ContentIntegrity(
            "enemy template pool is empty".to_string(),
        ));
    }
    let party_level = party_level.max(1);
    let candidates = level_window(pool, party_level, desired);

    let mut remaining: Vec<&EnemyTemplate> = candidates.clone();
    let mut picks = Vec::with_capacity(desired);
    while picks.len() < desired && !remaining.is_empty() {
        let idx = rng.index(remaining.len());
        picks.push(remaining.swap_remove(idx));
    }
    while picks.len() < desired {
        picks.push(candidates[candidates.len() - 1]);
    }
    Ok(picks)
}

fn level_window(
    pool: &'static [EnemyTemplate],
    party_level: u32,
    desired: usize,
) -> Vec<&'static EnemyTemplate> {
    let ceiling = max_template_level();
    for spread in 0..=ceiling {
        let min = party_level.saturating_sub(spread).max(1);
        let max = (party_level + spread).min(ceiling);
        let subset: Vec<&EnemyTemplate> = pool
            .iter()
            .filter(|t| t.level >= min && t.level <= max)
            .collect();
        if subset.len() >= desired {
            return subset;
        }
    }
    pool.iter().collect()
}
