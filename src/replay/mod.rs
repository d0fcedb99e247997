pub mod engine;
pub mod scheduler;

pub use engine::{BattleReplayEngine, CombatantView, ReplayCursor, Side, TickEffect, TickOutcome};
pub use scheduler::{ReplayScheduler, ScheduledTick, run_to_completion};
