pub mod combatant;
pub mod transcript;
pub mod settings;

pub use combatant::{Combatant, CombatantSnapshot, HealthBand};
pub use transcript::{BattleTranscript, BattleHistorySummary};
pub use settings::ReplaySettings;
