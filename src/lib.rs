//! Replay of finished Pokémon battles: a transcript from the battle service is
//! revealed one line at a time while two health bars follow the damage it reports.

pub mod error;
pub mod models;
pub mod parsing;
pub mod replay;
pub mod provider;
pub mod gui;
pub mod utils;

pub use error::{ProviderError, ReplayError};
pub use models::{BattleTranscript, Combatant, CombatantSnapshot};
pub use parsing::{LogEvent, classify_line};
pub use replay::{BattleReplayEngine, ReplayScheduler, Side};
