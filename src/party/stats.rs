//! Derived stats: a hero's base block plus every equipped gear bonus.
//! Unknown gear ids contribute nothing (the gear table logs the miss).

use crate::content::gear::get_gear;
use crate::party::Hero;

/// Totals after gear. Battle snapshots and HUD bars read these, never the
/// base block directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub hp: i32,
    pub mp: i32,
    pub atk: i32,
    pub agi: i32,
}

pub fn compute_hero_stats(hero: &Hero) -> DerivedStats {
    let mut totals = DerivedStats {
        hp: hero.base.hp,
        mp: hero.base.mp,
        atk: hero.base.atk,
        agi: hero.base.agi,
    };
    for gear_id in hero.equipment.values() {
        let Some(gear) = get_gear(gear_id) else {
            continue;
        };
        totals.hp += gear.bonuses.hp;
        totals.mp += gear.bonuses.mp;
        totals.atk += gear.bonuses.atk;
        totals.agi += gear.bonuses.agi;
    }
    totals
}

/// Clamps current hp/mp to the derived maxima. Called after any equipment
/// change so removing a +hp piece cannot leave hp above max.
pub fn clamp_hero_vitals(hero: &mut Hero) -> DerivedStats {
    let totals = compute_hero_stats(hero);
    hero.hp = hero.hp.min(totals.hp);
    hero.mp = hero.mp.min(totals.mp);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::gear::EquipmentSlot;
    use crate::party::create_party;

    #[test]
    fn test_bare_hero_matches_base() {
        let party = create_party();
        let derived = compute_hero_stats(&party[0]);
        assert_eq!(derived.hp, party[0].base.hp);
        assert_eq!(derived.atk, party[0].base.atk);
    }

    #[test]
    fn test_gear_bonuses_stack() {
        let mut party = create_party();
        let hero = &mut party[0];
        hero.equipment
            .insert(EquipmentSlot::Weapon, "ember-splitter".into());
        hero.equipment.insert(EquipmentSlot::Head, "iron-helm".into());
        let derived = compute_hero_stats(hero);
        assert_eq!(derived.atk, hero.base.atk + 4);
        assert_eq!(derived.hp, hero.base.hp + 4);
    }

    #[test]
    fn test_unknown_gear_contributes_nothing() {
        let mut party = create_party();
        let hero = &mut party[0];
        hero.equipment
            .insert(EquipmentSlot::Weapon, "lost-relic".into());
        let derived = compute_hero_stats(hero);
        assert_eq!(derived.atk, hero.base.atk);
    }

    #[test]
    fn test_clamp_after_removing_hp_gear() {
        let mut party = create_party();
        let hero = &mut party[0];
        hero.equipment.insert(EquipmentSlot::Head, "iron-helm".into());
        hero.hp = hero.base.hp + 4;
        hero.equipment.remove(&EquipmentSlot::Head);
        clamp_hero_vitals(hero);
        assert_eq!(hero.hp, hero.base.hp);
    }
}
