use serde::{Deserialize, Serialize};
use crate::models::CombatantSnapshot;

/// A finished battle as computed by the battle service. Never mutated once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleTranscript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "pokemon1_name", alias = "combatant1_name")]
    pub combatant1_name: String,
    #[serde(rename = "pokemon2_name", alias = "combatant2_name")]
    pub combatant2_name: String,
    #[serde(default, rename = "p1_stats", alias = "combatant1_base_stats")]
    pub combatant1_base_stats: Option<CombatantSnapshot>,
    #[serde(default, rename = "p2_stats", alias = "combatant2_base_stats")]
    pub combatant2_base_stats: Option<CombatantSnapshot>,
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl BattleTranscript {
    pub fn new(
        combatant1: CombatantSnapshot,
        combatant2: CombatantSnapshot,
        log: Vec<String>,
        winner_name: Option<String>,
    ) -> Self {
        Self {
            id: None,
            combatant1_name: combatant1.name.clone(),
            combatant2_name: combatant2.name.clone(),
            combatant1_base_stats: Some(combatant1),
            combatant2_base_stats: Some(combatant2),
            log,
            winner_name,
            timestamp: None,
        }
    }

    pub fn title(&self) -> String {
        format!("{} vs {}", self.combatant1_name, self.combatant2_name)
    }
}

/// One row of the recorded battle listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleHistorySummary {
    pub id: u64,
    pub pokemon1_name: String,
    pub pokemon2_name: String,
    pub winner_name: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let json = r#"{
            "id": 7,
            "pokemon1_name": "bulbasaur",
            "pokemon2_name": "charmander",
            "winner_name": "bulbasaur",
            "timestamp": "2024-05-01T10:00:00",
            "log": ["bulbasaur attacks!", "charmander took 15 damage."],
            "p1_stats": { "name": "bulbasaur", "hp": 40, "maxHp": 40, "image": "https://img/1.png" },
            "p2_stats": { "name": "charmander", "hp": 20, "maxHp": 20, "image": "https://img/4.png" }
        }"#;
        let transcript: BattleTranscript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.id, Some(7));
        assert_eq!(transcript.log.len(), 2);
        let p1 = transcript.combatant1_base_stats.as_ref().unwrap();
        assert_eq!(p1.max_hp, 40);
        assert_eq!(p1.image_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(transcript.title(), "bulbasaur vs charmander");
    }

    #[test]
    fn missing_snapshots_decode_as_none() {
        let json = r#"{ "pokemon1_name": "a", "pokemon2_name": "b", "log": ["x"] }"#;
        let transcript: BattleTranscript = serde_json::from_str(json).unwrap();
        assert!(transcript.combatant1_base_stats.is_none());
        assert!(transcript.combatant2_base_stats.is_none());
        assert!(transcript.winner_name.is_none());
    }

    #[test]
    fn history_rows_decode() {
        let json = r#"[{ "id": 1, "pokemon1_name": "eevee", "pokemon2_name": "ditto", "winner_name": "eevee", "timestamp": "2024-05-01T10:00:00" }]"#;
        let rows: Vec<BattleHistorySummary> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].winner_name, "eevee");
    }
}
