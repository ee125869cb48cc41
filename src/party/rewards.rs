//! Battle reward distribution and leveling.
//!
//! The xp pool is split exactly: every recipient gets the floor share and
//! the integer remainder goes one point at a time to the earliest
//! recipients, so shares always sum to the pool. Kill credit pays a 2x
//! bonus on top and does not come out of the pool.

use std::collections::HashMap;

use log::debug;

use crate::config::MAX_ACTIVE_HEROES;
use crate::party::Hero;

/// Xp threshold to leave `level`.
pub fn xp_threshold(level: u32) -> u32 {
    20 * level
}

/// Distributes a battle's xp across the party and applies level-ups.
/// Returns the level-up messages in roster order.
pub fn gain_rewards(party: &mut [Hero], xp: u32, kill_xp: &HashMap<String, u32>) -> Vec<String> {
    let recipients = recipient_indices(party);
    let mut ups = Vec::new();
    if recipients.is_empty() {
        return ups;
    }

    let count = recipients.len() as u32;
    let base_share = xp / count;
    let mut remainder = xp - base_share * count;

    for idx in recipients {
        let hero = &mut party[idx];
        let mut grant = base_share;
        if remainder > 0 {
            grant += 1;
            remainder -= 1;
        }
        grant += kill_xp.get(&hero.id).copied().unwrap_or(0) * 2;
        apply_xp_gain(hero, grant, &mut ups);
    }
    ups
}

/// Reward recipients: the living members of the active lineup, falling
/// back to the first three roster members, then the whole party.
fn recipient_indices(party: &[Hero]) -> Vec<usize> {
    let pick_alive = |indices: Vec<usize>| -> Vec<usize> {
        indices.into_iter().filter(|&i| party[i].alive).collect()
    };

    let active: Vec<usize> = (0..party.len()).filter(|&i| party[i].active).collect();
    if !active.is_empty() {
        return pick_alive(active);
    }
    let leading: Vec<usize> = (0..party.len().min(MAX_ACTIVE_HEROES)).collect();
    let alive_leading = pick_alive(leading);
    if !alive_leading.is_empty() {
        return alive_leading;
    }
    pick_alive((0..party.len()).collect())
}

/// Adds xp and levels up while the threshold is met. Each level grants
/// +2 base hp, +1 atk, +2 mp, and fully restores vitals.
pub fn apply_xp_gain(hero: &mut Hero, amount: u32, ups: &mut Vec<String>) {
    hero.xp += amount;
    while hero.xp >= xp_threshold(hero.level) {
        hero.xp -= xp_threshold(hero.level);
        hero.level += 1;
        hero.base.hp += 2;
        hero.base.atk += 1;
        hero.base.mp += 2;
        hero.hp = hero.base.hp;
        hero.mp = hero.base.mp;
        debug!("{} reached level {}", hero.id, hero.level);
        ups.push(format!("{} leveled up! Lv {}", hero.name, hero.level));
    }
}
