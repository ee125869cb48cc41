//! Enemy template pool. The encounter factory filters this table by a
//! level window around the party's level, so template levels should cover
//! the expected party progression.

/// Immutable enemy template. `xp` and `gold` feed the battle reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub level: u32,
    pub hp: i32,
    pub atk: i32,
    pub agi: i32,
    pub xp: u32,
    pub gold: u32,
    pub sprite: &'static str,
}

pub const ENEMY_TEMPLATES: &[EnemyTemplate] = &[
    EnemyTemplate {
        id: "mistling",
        name: "Mistling",
        level: 1,
        hp: 10,
        atk: 3,
        agi: 4,
        xp: 6,
        gold: 4,
        sprite: "mistling",
    },
    EnemyTemplate {
        id: "shambler",
        name: "Shambler",
        level: 2,
        hp: 16,
        atk: 4,
        agi: 2,
        xp: 10,
        gold: 7,
        sprite: "shambler",
    },
    EnemyTemplate {
        id: "fog-wraith",
        name: "Fog Wraith",
        level: 3,
        hp: 20,
        atk: 6,
        agi: 7,
        xp: 16,
        gold: 11,
        sprite: "fog-wraith",
    },
    EnemyTemplate {
        id: "hollow-knight",
        name: "Hollow Knight",
        level: 4,
        hp: 30,
        atk: 8,
        agi: 4,
        xp: 24,
        gold: 18,
        sprite: "hollow-knight",
    },
    EnemyTemplate {
        id: "mist-tyrant",
        name: "Mist Tyrant",
        level: 6,
        hp: 48,
        atk: 11,
        agi: 6,
        xp: 45,
        gold: 40,
        sprite: "mist-tyrant",
    },
];

/// Highest template level in the pool, used to bound the factory's level
/// window expansion.
pub fn max_template_level() -> u32 {
    ENEMY_TEMPLATES.iter().map(|e| e.level).max().unwrap_or(1)
}
