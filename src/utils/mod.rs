pub mod logging;
pub mod settings_persistence;
pub mod transcript_persistence;

pub use logging::init_logging;
pub use settings_persistence::{get_settings_file_path, load_replay_settings, save_replay_settings};
pub use transcript_persistence::{load_transcript, save_transcript};
