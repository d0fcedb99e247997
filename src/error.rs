use thiserror::Error;
use crate::replay::Side;

/// Reasons a transcript cannot be replayed. The engine stays unstarted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("battle log is empty")]
    EmptyLog,

    #[error("base stats for {side:?} are missing")]
    MissingBaseStats { side: Side },

    #[error("neither base-stat snapshot ({first}, {second}) matches combatant {combatant1}")]
    UnresolvedSides {
        combatant1: String,
        first: String,
        second: String,
    },

    #[error("{name} has invalid max HP {max_hp}")]
    InvalidMaxHp { name: String, max_hp: i32 },
}

/// Failures talking to the battle service or reading transcript files.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("battle service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transcript file error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
