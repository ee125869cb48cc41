//! The battle state machine. One `update` call per frame advances at most
//! one phase; menu navigation, targeting, resolution, and the enemy turn
//! all run off the same edge-triggered input snapshot.

use log::debug;

use crate::combat::state::{
    Battler, CombatEvent, CombatState, CommandEntry, MenuMode, PendingAction, Phase, Team,
};
use crate::content::abilities::{
    get_ability, hero_abilities_by_category, AbilityCategory, AbilityDefinition, AbilityKind,
    AbilityTarget,
};
use crate::content::items::{ItemKind, ITEMS};
use crate::input::{InputState, Key};
use crate::party::rewards::gain_rewards;
use crate::party::{Bag, Hero};
use crate::rng::Mulberry32;

/// Primary command menu, in cursor order.
pub const PRIMARY_MENU: [&str; 4] = ["Attack", "Skills", "Spells", "Items"];

/// What a finished battle pays out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSummary {
    pub xp: u32,
    pub gold: u32,
    pub level_ups: Vec<String>,
}

/// Drives one battle from intro to summary. Owns its RNG so enemy target
/// picks are reproducible under a fixed seed.
#[derive(Debug, Clone)]
pub struct BattleEngine {
    state: CombatState,
    rng: Mulberry32,
    finished: bool,
}

impl BattleEngine {
    pub fn new(mut state: CombatState, rng: Mulberry32) -> Self {
        state.cursor.hero_idx = next_alive(&state.heroes, 0).unwrap_or(0);
        state.cursor.target_idx = next_alive(&state.enemies, 0).unwrap_or(0);
        Self {
            state,
            rng,
            finished: false,
        }
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// True once the summary screen has been confirmed; the caller should
    /// then finalize against the party.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the battle one frame. Returns the combat events produced
    /// this frame, in occurrence order.
    pub fn update(&mut self, input: &mut InputState, bag: &mut Bag) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        match self.state.phase {
            Phase::Intro => {
                self.state.intro_frames = self.state.intro_frames.saturating_sub(1);
                if self.state.intro_frames == 0 {
                    self.begin_hero_input();
                }
            }
            Phase::HeroInput => self.update_hero_menu(input, bag, &mut events),
            Phase::TargetSelect => self.update_targeting(input),
            Phase::Resolve => self.resolve_pending(bag, &mut events),
            Phase::EnemyTurn => {
                self.run_enemy_turn(&mut events);
                if !self.check_outcome() {
                    self.begin_hero_input();
                }
            }
            Phase::Victory => {
                self.state.victory_frames = self.state.victory_frames.saturating_sub(1);
                if self.state.victory_frames == 0 {
                    self.state.phase = Phase::Summary;
                }
            }
            Phase::Defeat => {
                self.state.phase = Phase::Summary;
            }
            Phase::Summary => {
                if input.consume(Key::Confirm) {
                    self.finished = true;
                }
            }
        }
        events
    }

    /// Writes battle results back onto the party and distributes rewards.
    /// Call once, after [`Self::is_finished`] turns true.
    pub fn finalize(&mut self, party: &mut [Hero]) -> BattleSummary {
        for hero in party.iter_mut() {
            let Some(battler) = self.state.heroes.iter().find(|b| b.id == hero.id) else {
                continue;
            };
            hero.hp = battler.hp.clamp(0, hero.base.hp);
            hero.mp = battler.mp.clamp(0, hero.base.mp);
            hero.alive = battler.alive;
        }
        let level_ups = gain_rewards(party, self.state.reward.xp, &self.state.kill_xp);
        debug!(
            "battle finalized: {} xp, {} gold, {} level-ups",
            self.state.reward.xp,
            self.state.reward.gold,
            level_ups.len()
        );
        BattleSummary {
            xp: self.state.reward.xp,
            gold: self.state.reward.gold,
            level_ups,
        }
    }

    fn begin_hero_input(&mut self) {
        let Some(idx) = next_alive(&self.state.heroes, 0) else {
            self.state.phase = Phase::Defeat;
            return;
        };
        self.state.phase = Phase::HeroInput;
        self.state.cursor.hero_idx = idx;
        self.state.cursor.menu_idx = 0;
        self.state.cursor.mode = MenuMode::Primary;
        self.state.commands.clear();
    }

    /// Next living hero after the current one, without wrapping; wrapping
    /// here would let the lineup act forever and starve the enemy turn.
    fn advance_hero(&mut self) {
        let from = self.state.cursor.hero_idx + 1;
        let next = self.state.heroes[from.min(self.state.heroes.len())..]
            .iter()
            .position(|h| h.alive)
            .map(|offset| from + offset);
        match next {
            Some(idx) => {
                self.state.cursor.hero_idx = idx;
                self.state.cursor.menu_idx = 0;
                self.state.cursor.mode = MenuMode::Primary;
                self.state.commands.clear();
                self.state.phase = Phase::HeroInput;
            }
            None => self.state.phase = Phase::EnemyTurn,
        }
    }

    fn update_hero_menu(&mut self, input: &mut InputState, bag: &Bag, events: &mut Vec<CombatEvent>) {
        match self.state.cursor.mode {
            MenuMode::Primary => self.update_primary_menu(input, bag),
            MenuMode::Skills | MenuMode::Spells | MenuMode::Items => {
                self.update_sub_menu(input, events)
            }
        }
    }

    fn update_primary_menu(&mut self, input: &mut InputState, bag: &Bag) {
        let len = PRIMARY_MENU.len();
        if input.consume(Key::Up) {
            self.state.cursor.menu_idx = (self.state.cursor.menu_idx + len - 1) % len;
        }
        if input.consume(Key::Down) {
            self.state.cursor.menu_idx = (self.state.cursor.menu_idx + 1) % len;
        }
        if !input.consume(Key::Confirm) {
            return;
        }
        match self.state.cursor.menu_idx {
            0 => {
                self.state.pending = Some(PendingAction::Attack);
                self.enter_targeting(Team::Enemies);
            }
            1 => self.open_ability_menu(AbilityCategory::Skill, MenuMode::Skills),
            2 => self.open_ability_menu(AbilityCategory::Spell, MenuMode::Spells),
            _ => self.open_item_menu(bag),
        }
    }

    fn open_ability_menu(&mut self, category: AbilityCategory, mode: MenuMode) {
        let hero = &self.state.heroes[self.state.cursor.hero_idx];
        let commands: Vec<CommandEntry> = hero_abilities_by_category(&hero.id, category)
            .into_iter()
            .map(|ability| CommandEntry {
                id: ability.id.to_string(),
                label: ability.name.to_string(),
                cost: Some(ability.cost),
                qty: None,
                disabled: hero.mp < ability.cost,
            })
            .collect();
        if commands.is_empty() {
            let noun = match category {
                AbilityCategory::Skill => "skills",
                AbilityCategory::Spell => "spells",
            };
            self.state.log.push(format!("{} has no {noun}.", hero.name));
            return;
        }
        self.state.commands = commands;
        self.state.cursor.mode = mode;
        self.state.cursor.menu_idx = 0;
    }

    fn open_item_menu(&mut self, bag: &Bag) {
        let commands: Vec<CommandEntry> = bag
            .iter()
            .filter_map(|(id, qty)| {
                let item = ITEMS.iter().find(|i| i.id == id)?;
                Some(CommandEntry {
                    id: item.id.to_string(),
                    label: item.name.to_string(),
                    cost: None,
                    qty: Some(qty),
                    disabled: false,
                })
            })
            .collect();
        if commands.is_empty() {
            self.state.log.push("No items in the bag.".to_string());
            return;
        }
        self.state.commands = commands;
        self.state.cursor.mode = MenuMode::Items;
        self.state.cursor.menu_idx = 0;
    }

    fn update_sub_menu(&mut self, input: &mut InputState, events: &mut Vec<CombatEvent>) {
        let len = self.state.commands.len();
        if input.consume(Key::Left) || input.consume(Key::Cancel) {
            self.close_sub_menu();
            return;
        }
        if len > 0 {
            if input.consume(Key::Up) {
                self.state.cursor.menu_idx = (self.state.cursor.menu_idx + len - 1) % len;
            }
            if input.consume(Key::Down) {
                self.state.cursor.menu_idx = (self.state.cursor.menu_idx + 1) % len;
            }
        }
        if !input.consume(Key::Confirm) {
            return;
        }
        let Some(entry) = self.state.commands.get(self.state.cursor.menu_idx).cloned() else {
            return;
        };
        match self.state.cursor.mode {
            MenuMode::Skills | MenuMode::Spells => self.select_ability(&entry, events),
            MenuMode::Items => {
                self.state.pending = Some(PendingAction::Item {
                    id: entry.id.clone(),
                });
                let team = match ITEMS.iter().find(|i| i.id == entry.id).map(|i| i.kind) {
                    Some(ItemKind::Damage) => Team::Enemies,
                    _ => Team::Heroes,
                };
                self.enter_targeting(team);
            }
            MenuMode::Primary => {}
        }
    }

    fn close_sub_menu(&mut self) {
        let primary_idx = match self.state.cursor.mode {
            MenuMode::Skills => 1,
            MenuMode::Spells => 2,
            MenuMode::Items => 3,
            MenuMode::Primary => 0,
        };
        self.state.cursor.mode = MenuMode::Primary;
        self.state.cursor.menu_idx = primary_idx;
        self.state.commands.clear();
    }

    fn select_ability(&mut self, entry: &CommandEntry, events: &mut Vec<CombatEvent>) {
        let Some(ability) = get_ability(&entry.id) else {
            return;
        };
        let hero = &self.state.heroes[self.state.cursor.hero_idx];
        if hero.mp < ability.cost {
            self.state
                .log
                .push(format!("{} lacks the MP for {}.", hero.name, ability.name));
            return;
        }
        match ability.target {
            AbilityTarget::User => {
                // Self-targeted abilities skip targeting entirely.
                let caster = self.state.cursor.hero_idx;
                self.pay_mp(caster, ability.cost);
                self.apply_ability(ability, caster, Team::Heroes, caster, events);
                self.state.commands.clear();
                self.state.cursor.mode = MenuMode::Primary;
                if !self.check_outcome() {
                    self.advance_hero();
                }
            }
            AbilityTarget::Enemy => {
                self.state.pending = Some(PendingAction::Ability {
                    id: ability.id.to_string(),
                });
                self.enter_targeting(Team::Enemies);
            }
            AbilityTarget::Ally => {
                self.state.pending = Some(PendingAction::Ability {
                    id: ability.id.to_string(),
                });
                self.enter_targeting(Team::Heroes);
            }
        }
    }

    fn enter_targeting(&mut self, team: Team) {
        self.state.cursor.target_team = team;
        let list = self.team_list(team);
        let seed = if list
            .get(self.state.cursor.target_idx)
            .is_some_and(|b| b.alive)
        {
            self.state.cursor.target_idx
        } else {
            next_alive(list, 0).unwrap_or(0)
        };
        self.state.cursor.target_idx = seed;
        self.state.phase = Phase::TargetSelect;
    }

    fn team_list(&self, team: Team) -> &[Battler] {
        match team {
            Team::Heroes => &self.state.heroes,
            Team::Enemies => &self.state.enemies,
        }
    }

    fn update_targeting(&mut self, input: &mut InputState) {
        let team = self.state.cursor.target_team;
        let current = self.state.cursor.target_idx;
        if input.consume(Key::Left) || input.consume(Key::Up) {
            if let Some(idx) = prev_alive(self.team_list(team), current as isize - 1) {
                self.state.cursor.target_idx = idx;
            }
        }
        if input.consume(Key::Right) || input.consume(Key::Down) {
            if let Some(idx) = next_alive(self.team_list(team), current + 1) {
                self.state.cursor.target_idx = idx;
            }
        }
        if input.consume(Key::Cancel) {
            self.state.pending = None;
            self.state.phase = Phase::HeroInput;
            return;
        }
        if input.consume(Key::Confirm) {
            self.state.phase = Phase::Resolve;
        }
    }

    fn resolve_pending(&mut self, bag: &mut Bag, events: &mut Vec<CombatEvent>) {
        let Some(pending) = self.state.pending.take() else {
            self.advance_hero();
            return;
        };
        let hero_idx = self.state.cursor.hero_idx;
        let target_idx = self.state.cursor.target_idx;
        match pending {
            PendingAction::Attack => self.resolve_attack(hero_idx, target_idx, events),
            PendingAction::Ability { id } => {
                if let Some(ability) = get_ability(&id) {
                    let team = self.state.cursor.target_team;
                    if self.state.heroes[hero_idx].mp >= ability.cost {
                        self.pay_mp(hero_idx, ability.cost);
                        self.apply_ability(ability, hero_idx, team, target_idx, events);
                    } else {
                        let name = self.state.heroes[hero_idx].name.clone();
                        self.state
                            .log
                            .push(format!("{name} lacks the MP for {}.", ability.name));
                    }
                }
            }
            PendingAction::Item { id } => self.resolve_item(&id, target_idx, bag, events),
        }
        self.state.commands.clear();
        self.state.cursor.mode = MenuMode::Primary;
        if !self.check_outcome() {
            self.advance_hero();
        }
    }

    fn resolve_attack(&mut self, hero_idx: usize, target_idx: usize, events: &mut Vec<CombatEvent>) {
        let Some(hero) = self.state.heroes.get(hero_idx) else {
            return;
        };
        let (attacker_id, attacker_name, atk) = (hero.id.clone(), hero.name.clone(), hero.atk);
        let Some(target) = self.state.enemies.get_mut(target_idx) else {
            return;
        };
        if !target.alive {
            return;
        }
        let damage = atk.max(1);
        target.hp -= damage;
        let ko = target.hp <= 0;
        let target_name = target.name.clone();
        let target_id = target.id.clone();
        events.push(CombatEvent::Damage {
            target: target_id.clone(),
            amount: damage,
            ko,
        });
        self.state
            .log
            .push(format!("{attacker_name} hits {target_name} for {damage}"));
        if ko {
            self.state.enemies[target_idx].alive = false;
            self.state.log.push(format!("{target_name} is defeated"));
            self.credit_kill(&attacker_id, &target_id);
        }
    }

    fn apply_ability(
        &mut self,
        ability: &AbilityDefinition,
        hero_idx: usize,
        target_team: Team,
        target_idx: usize,
        events: &mut Vec<CombatEvent>,
    ) {
        let Some(hero) = self.state.heroes.get(hero_idx) else {
            return;
        };
        let (attacker_id, attacker_name, atk) = (hero.id.clone(), hero.name.clone(), hero.atk);
        match ability.kind {
            AbilityKind::Attack => {
                let target = match target_team {
                    Team::Enemies => self.state.enemies.get_mut(target_idx),
                    Team::Heroes => self.state.heroes.get_mut(target_idx),
                };
                let Some(target) = target else {
                    return;
                };
                if !target.alive {
                    return;
                }
                let damage = (atk + ability.power).max(1);
                target.hp -= damage;
                let ko = target.hp <= 0;
                let target_name = target.name.clone();
                let target_id = target.id.clone();
                if ko {
                    target.alive = false;
                }
                events.push(CombatEvent::Damage {
                    target: target_id.clone(),
                    amount: damage,
                    ko,
                });
                self.state.log.push(format!(
                    "{attacker_name} unleashes {} on {target_name} for {damage}",
                    ability.name
                ));
                if ko {
                    self.state.log.push(format!("{target_name} is defeated"));
                    if target_team == Team::Enemies {
                        self.credit_kill(&attacker_id, &target_id);
                    }
                }
            }
            AbilityKind::Heal => {
                let target = match target_team {
                    Team::Heroes => self.state.heroes.get_mut(target_idx),
                    Team::Enemies => self.state.enemies.get_mut(target_idx),
                };
                let Some(target) = target else {
                    return;
                };
                let amount = (ability.power + atk / 2).max(1);
                let healed = (target.hp + amount).min(target.max_hp) - target.hp;
                target.hp += healed;
                let target_id = target.id.clone();
                let target_name = target.name.clone();
                events.push(CombatEvent::Heal {
                    target: target_id,
                    amount: healed,
                });
                self.state.log.push(format!(
                    "{attacker_name} casts {} and restores {healed} to {target_name}",
                    ability.name
                ));
            }
        }
    }

    fn resolve_item(
        &mut self,
        item_id: &str,
        target_idx: usize,
        bag: &mut Bag,
        events: &mut Vec<CombatEvent>,
    ) {
        let Some(item) = ITEMS.iter().find(|i| i.id == item_id) else {
            return;
        };
        if !bag.consume(item_id) {
            self.state
                .log
                .push(format!("No {} left in the bag.", item.name));
            return;
        }
        let user_name = self.state.heroes[self.state.cursor.hero_idx].name.clone();
        match item.kind {
            ItemKind::Heal => {
                let Some(target) = self.state.heroes.get_mut(target_idx) else {
                    return;
                };
                let healed = (target.hp + item.amount).min(target.max_hp) - target.hp;
                target.hp += healed;
                let target_name = target.name.clone();
                let target_id = target.id.clone();
                events.push(CombatEvent::Heal {
                    target: target_id,
                    amount: healed,
                });
                self.state.log.push(format!(
                    "{user_name} uses {} and restores {healed} to {target_name}",
                    item.name
                ));
            }
            ItemKind::Damage => {
                let user_id = self.state.heroes[self.state.cursor.hero_idx].id.clone();
                let Some(target) = self.state.enemies.get_mut(target_idx) else {
                    return;
                };
                if !target.alive {
                    return;
                }
                let damage = item.amount.max(1);
                target.hp -= damage;
                let ko = target.hp <= 0;
                let target_name = target.name.clone();
                let target_id = target.id.clone();
                if ko {
                    target.alive = false;
                }
                events.push(CombatEvent::Damage {
                    target: target_id.clone(),
                    amount: damage,
                    ko,
                });
                self.state.log.push(format!(
                    "{user_name} throws {} at {target_name} for {damage}",
                    item.name
                ));
                if ko {
                    self.state.log.push(format!("{target_name} is defeated"));
                    self.credit_kill(&user_id, &target_id);
                }
            }
        }
    }

    /// Every living enemy attacks a uniformly random living hero, in list
    /// order, stopping early if the party is wiped mid-sequence.
    fn run_enemy_turn(&mut self, events: &mut Vec<CombatEvent>) {
        for enemy_idx in 0..self.state.enemies.len() {
            let enemy = &self.state.enemies[enemy_idx];
            if !enemy.alive {
                continue;
            }
            let (enemy_name, atk) = (enemy.name.clone(), enemy.atk);
            let living: Vec<usize> = self
                .state
                .heroes
                .iter()
                .enumerate()
                .filter(|(_, h)| h.alive)
                .map(|(i, _)| i)
                .collect();
            if living.is_empty() {
                break;
            }
            let target_idx = living[self.rng.index(living.len())];
            let target = &mut self.state.heroes[target_idx];
            let damage = atk.max(1);
            target.hp -= damage;
            let ko = target.hp <= 0;
            let target_name = target.name.clone();
            let target_id = target.id.clone();
            if ko {
                target.alive = false;
            }
            events.push(CombatEvent::Damage {
                target: target_id,
                amount: damage,
                ko,
            });
            self.state
                .log
                .push(format!("{enemy_name} hits {target_name} for {damage}"));
            if ko {
                self.state.log.push(format!("{target_name} falls"));
            }
        }
    }

    fn credit_kill(&mut self, hero_id: &str, enemy_id: &str) {
        let xp = self.state.enemy_xp.get(enemy_id).copied().unwrap_or(0);
        *self
            .state
            .kill_xp
            .entry(hero_id.to_string())
            .or_insert(0) += xp;
    }

    fn pay_mp(&mut self, hero_idx: usize, cost: i32) {
        if let Some(hero) = self.state.heroes.get_mut(hero_idx) {
            hero.mp -= cost;
        }
    }

    fn check_outcome(&mut self) -> bool {
        if self.state.living_enemies() == 0 {
            self.state.phase = Phase::Victory;
            self.state.victory_frames = self.state.victory_frames.max(1);
            self.state.log.push("Victory!".to_string());
            return true;
        }
        if self.state.living_heroes() == 0 {
            self.state.phase = Phase::Defeat;
            self.state.log.push("The party falls...".to_string());
            return true;
        }
        false
    }
}

/// First living battler at or after `start`, wrapping around the list.
fn next_alive(list: &[Battler], start: usize) -> Option<usize> {
    if list.is_empty() {
        return None;
    }
    (0..list.len())
        .map(|i| (start + i) % list.len())
        .find(|&idx| list[idx].alive)
}

/// First living battler at or before `start`, wrapping around the list.
fn prev_alive(list: &[Battler], start: isize) -> Option<usize> {
    if list.is_empty() {
        return None;
    }
    let len = list.len() as isize;
    (0..len)
        .map(|i| (((start - i) % len + len) % len) as usize)
        .find(|&idx| list[idx].alive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::factory::make_encounter;
    use crate::combat::state::Reward;
    use crate::party::create_party;

    fn press(engine: &mut BattleEngine, bag: &mut Bag, key: Key) -> Vec<CombatEvent> {
        let mut input = InputState::default();
        input.press(key);
        let events = engine.update(&mut input, bag);
        input.flush();
        events
    }

    fn tick(engine: &mut BattleEngine, bag: &mut Bag) -> Vec<CombatEvent> {
        let mut input = InputState::default();
        engine.update(&mut input, bag)
    }

    fn skip_intro(engine: &mut BattleEngine, bag: &mut Bag) {
        while engine.phase() == Phase::Intro {
            tick(engine, bag);
        }
    }

    fn test_engine() -> BattleEngine {
        let mut rng = Mulberry32::new(7);
        let mut state = make_encounter(1, None, &mut rng).unwrap();
        state.attach_party(&create_party());
        BattleEngine::new(state, Mulberry32::new(11))
    }

    #[test]
    fn test_intro_counts_down_to_hero_input() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        for _ in 0..crate::config::BATTLE_INTRO_FRAMES {
            assert_eq!(engine.phase(), Phase::Intro);
            tick(&mut engine, &mut bag);
        }
        assert_eq!(engine.phase(), Phase::HeroInput);
        assert_eq!(engine.state().cursor.hero_idx, 0);
    }

    #[test]
    fn test_primary_menu_wraps() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);
        press(&mut engine, &mut bag, Key::Up);
        assert_eq!(engine.state().cursor.menu_idx, 3);
        press(&mut engine, &mut bag, Key::Down);
        assert_eq!(engine.state().cursor.menu_idx, 0);
    }

    #[test]
    fn test_attack_flow_damages_target() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);
        press(&mut engine, &mut bag, Key::Confirm);
        assert_eq!(engine.phase(), Phase::TargetSelect);
        let hp_before = engine.state().enemies[engine.state().cursor.target_idx].hp;
        press(&mut engine, &mut bag, Key::Confirm);
        assert_eq!(engine.phase(), Phase::Resolve);
        let events = tick(&mut engine, &mut bag);
        assert_eq!(events.len(), 1);
        match &events[0] {
            CombatEvent::Damage { amount, .. } => {
                assert_eq!(*amount, engine.state().heroes[0].atk.max(1));
            }
            other => panic!("expected damage event, got {other:?}"),
        }
        let target_idx = engine.state().cursor.target_idx;
        assert!(engine.state().enemies[target_idx].hp < hp_before);
        // Next hero is up.
        assert_eq!(engine.phase(), Phase::HeroInput);
        assert_eq!(engine.state().cursor.hero_idx, 1);
    }

    #[test]
    fn test_cancel_clears_pending_target() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);
        press(&mut engine, &mut bag, Key::Confirm);
        assert!(engine.state().pending.is_some());
        press(&mut engine, &mut bag, Key::Cancel);
        assert_eq!(engine.phase(), Phase::HeroInput);
        assert!(engine.state().pending.is_none());
    }

    #[test]
    fn test_insufficient_mp_refuses_without_state_change() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);
        engine.state.heroes[0].mp = 0;
        // Open the skills menu and try to pick Cleave (cost 2).
        press(&mut engine, &mut bag, Key::Down);
        press(&mut engine, &mut bag, Key::Confirm);
        assert_eq!(engine.state().cursor.mode, MenuMode::Skills);
        assert!(engine.state().commands[0].disabled);
        let log_len = engine.state().log.len();
        press(&mut engine, &mut bag, Key::Confirm);
        // Still the same hero's input, one refusal line logged.
        assert_eq!(engine.phase(), Phase::HeroInput);
        assert_eq!(engine.state().cursor.hero_idx, 0);
        assert_eq!(engine.state().log.len(), log_len + 1);
        assert_eq!(engine.state().heroes[0].mp, 0);
    }

    #[test]
    fn test_self_targeted_ability_resolves_immediately() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);
        // Advance to Greyor, who owns the self-targeted Iron Focus skill.
        press(&mut engine, &mut bag, Key::Confirm);
        press(&mut engine, &mut bag, Key::Confirm);
        tick(&mut engine, &mut bag);
        press(&mut engine, &mut bag, Key::Confirm);
        press(&mut engine, &mut bag, Key::Confirm);
        tick(&mut engine, &mut bag);
        assert_eq!(engine.state().cursor.hero_idx, 2);
        engine.state.heroes[2].hp = 10;
        let mp_before = engine.state().heroes[2].mp;
        press(&mut engine, &mut bag, Key::Down);
        press(&mut engine, &mut bag, Key::Confirm);
        assert_eq!(engine.state().cursor.mode, MenuMode::Skills);
        let events = press(&mut engine, &mut bag, Key::Confirm);
        assert!(matches!(events[0], CombatEvent::Heal { .. }));
        assert!(engine.state().heroes[2].hp > 10);
        assert_eq!(engine.state().heroes[2].mp, mp_before - 2);
        // Last hero acted, so the enemies take over.
        assert_eq!(engine.phase(), Phase::EnemyTurn);
    }

    #[test]
    fn test_item_use_consumes_from_bag() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        bag.add("potion", 1);
        skip_intro(&mut engine, &mut bag);
        engine.state.heroes[0].hp = 5;
        for _ in 0..3 {
            press(&mut engine, &mut bag, Key::Down);
        }
        press(&mut engine, &mut bag, Key::Confirm);
        assert_eq!(engine.state().cursor.mode, MenuMode::Items);
        press(&mut engine, &mut bag, Key::Confirm);
        assert_eq!(engine.phase(), Phase::TargetSelect);
        assert_eq!(engine.state().cursor.target_team, Team::Heroes);
        press(&mut engine, &mut bag, Key::Confirm);
        let events = tick(&mut engine, &mut bag);
        assert!(matches!(
            events[0],
            CombatEvent::Heal { amount: 15, .. }
        ));
        assert_eq!(engine.state().heroes[0].hp, 20);
        assert_eq!(bag.quantity("potion"), 0);
    }

    #[test]
    fn test_empty_item_menu_refuses() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);
        for _ in 0..3 {
            press(&mut engine, &mut bag, Key::Down);
        }
        let log_len = engine.state().log.len();
        press(&mut engine, &mut bag, Key::Confirm);
        assert_eq!(engine.state().cursor.mode, MenuMode::Primary);
        assert_eq!(engine.state().log.len(), log_len + 1);
    }

    #[test]
    fn test_enemy_turn_damages_heroes() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);
        let hp_before: i32 = engine.state().heroes.iter().map(|h| h.hp).sum();
        engine.state.phase = Phase::EnemyTurn;
        let events = tick(&mut engine, &mut bag);
        assert_eq!(events.len(), engine.state().living_enemies());
        let hp_after: i32 = engine.state().heroes.iter().map(|h| h.hp).sum();
        assert!(hp_after < hp_before);
        assert_eq!(engine.phase(), Phase::HeroInput);
    }

    #[test]
    fn test_victory_path_and_finalize() {
        let mut rng = Mulberry32::new(3);
        let mut state = make_encounter(1, None, &mut rng).unwrap();
        state.attach_party(&create_party());
        // One fragile enemy so a single attack wins.
        state.enemies.truncate(1);
        state.enemies[0].hp = 1;
        let enemy_id = state.enemies[0].id.clone();
        state.enemy_xp.insert(enemy_id, 6);
        state.reward = Reward { xp: 6, gold: 4 };
        let mut engine = BattleEngine::new(state, Mulberry32::new(1));
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);

        press(&mut engine, &mut bag, Key::Confirm);
        press(&mut engine, &mut bag, Key::Confirm);
        tick(&mut engine, &mut bag);
        assert_eq!(engine.phase(), Phase::Victory);

        for _ in 0..crate::config::BATTLE_VICTORY_FRAMES {
            tick(&mut engine, &mut bag);
        }
        assert_eq!(engine.phase(), Phase::Summary);
        assert!(!engine.is_finished());
        press(&mut engine, &mut bag, Key::Confirm);
        assert!(engine.is_finished());

        let mut party = create_party();
        let summary = engine.finalize(&mut party);
        assert_eq!(summary.xp, 6);
        assert_eq!(summary.gold, 4);
        // Killer collected 2x kill credit on top of the split.
        assert_eq!(party[0].xp, 2 + 12);
        assert_eq!(party[1].xp, 2);
        assert_eq!(party[2].xp, 2);
    }

    #[test]
    fn test_defeat_when_party_wiped() {
        let mut engine = test_engine();
        let mut bag = Bag::new();
        skip_intro(&mut engine, &mut bag);
        for hero in &mut engine.state.heroes {
            hero.hp = 1;
        }
        // Enemies hit for at least 1, so two full turns wipe three heroes.
        engine.state.phase = Phase::EnemyTurn;
        for _ in 0..4 {
            if engine.phase() == Phase::Defeat {
                break;
            }
            tick(&mut engine, &mut bag);
            if engine.phase() == Phase::HeroInput {
                engine.state.phase = Phase::EnemyTurn;
            }
        }
        assert_eq!(engine.phase(), Phase::Defeat);
        tick(&mut engine, &mut bag);
        assert_eq!(engine.phase(), Phase::Summary);
    }
}
