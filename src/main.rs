use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use clap::Parser;
use eframe::{egui, NativeOptions};
use egui::ViewportBuilder;
use tracing::{error, info};

use poke_replay::gui::{ReplayApp, hp_label, text_bar};
use poke_replay::models::{BattleTranscript, ReplaySettings};
use poke_replay::provider::{ApiClient, BattleResultProvider, CredentialSource, EnvToken, NoCredentials, StaticToken};
use poke_replay::replay::{BattleReplayEngine, ReplayScheduler, Side, TickEffect, TickOutcome, run_to_completion};
use poke_replay::utils::{get_settings_file_path, init_logging, load_replay_settings, load_transcript, save_replay_settings, save_transcript};

#[derive(Parser, Debug)]
#[command(name = "poke_replay", about = "Replays a finished Pokémon battle log with live health bars")]
struct Cli {
    /// Replay a transcript saved as JSON
    #[arg(long, value_name = "PATH", conflicts_with_all = ["history", "battle"])]
    transcript: Option<PathBuf>,

    /// Replay a recorded battle from the battle service
    #[arg(long, value_name = "ID", conflicts_with = "battle")]
    history: Option<u64>,

    /// Ask the battle service to fight two Pokémon, then replay the result
    #[arg(long, num_args = 2, value_names = ["POKEMON1", "POKEMON2"])]
    battle: Option<Vec<String>>,

    /// List recorded battles and exit
    #[arg(long)]
    list_history: bool,

    /// Milliseconds between revealed log lines
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Battle service base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Bearer token for the battle service
    #[arg(long)]
    token: Option<String>,

    /// Keep --interval-ms and --api-url in replay_settings.json for later runs
    #[arg(long)]
    save_settings: bool,

    /// Write the fetched transcript to this file
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Print the replay to stdout instead of opening a window
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut settings = load_replay_settings();
    init_logging(&settings.log_filter);
    if let Some(interval_ms) = cli.interval_ms {
        settings.set_tick_interval_ms(interval_ms);
    }
    if let Some(api_url) = &cli.api_url {
        settings.api_base_url = api_url.clone();
    }
    if cli.save_settings {
        save_replay_settings(&settings, &get_settings_file_path())?;
    }

    if cli.list_history {
        let client = build_client(&cli, &settings)?;
        for entry in client.list_battle_history()? {
            println!(
                "#{:<4} {} vs {} - winner: {} {}",
                entry.id,
                entry.pokemon1_name,
                entry.pokemon2_name,
                entry.winner_name,
                entry.timestamp.as_deref().unwrap_or("")
            );
        }
        return Ok(());
    }

    let transcript = fetch_transcript(&cli, &settings);
    if let (Ok(transcript), Some(path)) = (&transcript, &cli.save) {
        save_transcript(transcript, path)?;
    }

    if cli.headless {
        return run_headless(transcript?, &settings);
    }

    let app = match transcript {
        Ok(transcript) => {
            let mut app = ReplayApp::new(settings.tick_interval());
            app.load(transcript, Instant::now());
            app
        }
        Err(e) => {
            error!("Could not load battle: {}", e);
            ReplayApp::with_load_error(settings.tick_interval(), format!("Could not load battle: {}", e))
        }
    };

    let native_options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([520.0, 560.0])
            .with_min_inner_size([320.0, 360.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Battle Replay",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}

fn credentials(cli: &Cli, settings: &ReplaySettings) -> Box<dyn CredentialSource> {
    if let Some(token) = &cli.token {
        return Box::new(StaticToken(token.clone()));
    }
    match &settings.auth_token_env {
        Some(var) => Box::new(EnvToken::new(var.clone())),
        None => Box::new(NoCredentials),
    }
}

fn build_client(cli: &Cli, settings: &ReplaySettings) -> Result<ApiClient, Box<dyn Error>> {
    Ok(ApiClient::new(settings.api_base_url.clone(), credentials(cli, settings))?)
}

fn fetch_transcript(cli: &Cli, settings: &ReplaySettings) -> Result<BattleTranscript, Box<dyn Error>> {
    if let Some(path) = &cli.transcript {
        return Ok(load_transcript(path)?);
    }

    let client = build_client(cli, settings)?;
    if let Some(id) = cli.history {
        info!("Fetching recorded battle #{}", id);
        return Ok(client.fetch_battle_history_entry(id)?);
    }
    if let Some([first, second]) = cli.battle.as_deref() {
        info!("Submitting battle {} vs {}", first, second);
        return Ok(client.submit_battle(first, second)?);
    }

    Err("nothing to replay: pass --transcript, --history or --battle".into())
}

fn run_headless(transcript: BattleTranscript, settings: &ReplaySettings) -> Result<(), Box<dyn Error>> {
    let mut engine = BattleReplayEngine::with_transcript(transcript)?;
    let mut scheduler = ReplayScheduler::new(settings.tick_interval());

    if let Some(title) = engine.transcript().map(BattleTranscript::title) {
        println!("=== {} ===", title);
    }
    print_health(&engine);
    run_to_completion(&mut engine, &mut scheduler, print_tick);

    println!();
    print_health(&engine);
    println!("Winner: {}", engine.winner().unwrap_or("unknown"));
    Ok(())
}

fn print_tick(engine: &BattleReplayEngine, outcome: &TickOutcome) {
    println!("> {}", outcome.line);
    if matches!(outcome.effect, TickEffect::Damaged { .. }) {
        print_health(engine);
    }
}

fn print_health(engine: &BattleReplayEngine) {
    for side in [Side::One, Side::Two] {
        if let Some(view) = engine.view(side) {
            let marker = if view.attacking { "*" } else { " " };
            println!("{}{:<14} {} {}", marker, view.name, text_bar(&view, 20), hp_label(&view));
        }
    }
}
