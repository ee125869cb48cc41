//! # Combat
//!
//! Turn-based battles: the encounter factory rolls an enemy roster around
//! the party's level, [`CombatState`] holds the battle data, and
//! [`BattleEngine`] steps the phase machine one frame at a time. The engine
//! emits [`CombatEvent`]s for the renderer and writes results back onto the
//! party through [`BattleEngine::finalize`].

pub mod engine;
pub mod factory;
pub mod state;

pub use engine::{BattleEngine, BattleSummary, PRIMARY_MENU};
pub use factory::make_encounter;
pub use state::{
    Battler, CombatEvent, CombatState, CommandEntry, Cursor, MenuMode, PendingAction, Phase,
    Reward, Team,
};
