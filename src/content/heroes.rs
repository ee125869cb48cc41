//! Starting hero roster. Levels, xp, and vitals are derived at party
//! creation; this table holds only identity and base stats.

use crate::party::StatBlock;

/// Immutable hero template.
#[derive(Debug, Clone, Copy)]
pub struct HeroBase {
    pub id: &'static str,
    pub name: &'static str,
    pub class: &'static str,
    pub base: StatBlock,
}

pub const HERO_BASES: &[HeroBase] = &[
    HeroBase {
        id: "kael",
        name: "Kael",
        class: "Blademaster",
        base: StatBlock {
            hp: 24,
            mp: 4,
            atk: 6,
            agi: 5,
        },
    },
    HeroBase {
        id: "eyla",
        name: "Eyla",
        class: "Mistbinder",
        base: StatBlock {
            hp: 18,
            mp: 12,
            atk: 4,
            agi: 6,
        },
    },
    HeroBase {
        id: "greyor",
        name: "Greyor",
        class: "Warden",
        base: StatBlock {
            hp: 28,
            mp: 8,
            atk: 5,
            agi: 3,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_ids_unique_and_stats_positive() {
        for (i, a) in HERO_BASES.iter().enumerate() {
            assert!(a.base.hp > 0 && a.base.atk > 0);
            for b in &HERO_BASES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
