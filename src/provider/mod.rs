pub mod credentials;
pub mod http;

pub use credentials::{CredentialSource, EnvToken, NoCredentials, StaticToken};
pub use http::ApiClient;

use crate::error::ProviderResult;
use crate::models::{BattleHistorySummary, BattleTranscript};

/// Source of finished battle transcripts.
pub trait BattleResultProvider {
    fn submit_battle(&self, combatant1: &str, combatant2: &str) -> ProviderResult<BattleTranscript>;
    fn fetch_battle_history_entry(&self, id: u64) -> ProviderResult<BattleTranscript>;
    fn list_battle_history(&self) -> ProviderResult<Vec<BattleHistorySummary>>;
}
