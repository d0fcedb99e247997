use std::fs;
use std::path::Path;
use tracing::info;
use crate::error::ProviderResult;
use crate::models::BattleTranscript;

/// Reads a transcript saved in the battle service's JSON shape.
pub fn load_transcript(file_path: &Path) -> ProviderResult<BattleTranscript> {
    let content = fs::read_to_string(file_path)?;
    let transcript: BattleTranscript = serde_json::from_str(&content)?;
    info!(
        "Loaded transcript {} ({} lines) from {}",
        transcript.title(),
        transcript.log.len(),
        file_path.display()
    );
    Ok(transcript)
}

pub fn save_transcript(transcript: &BattleTranscript, file_path: &Path) -> ProviderResult<()> {
    let json_content = serde_json::to_string_pretty(transcript)?;
    fs::write(file_path, json_content)?;
    info!("Saved transcript {} to {}", transcript.title(), file_path.display());
    Ok(())
}
