use std::time::{Duration, Instant};
use eframe::egui;
use tracing::info;
use crate::models::BattleTranscript;
use crate::replay::{BattleReplayEngine, ReplayScheduler, Side};
use crate::gui::health_bar::show_health_bar;

pub struct ReplayApp {
    /// Engine for the replay currently on screen
    pub engine: BattleReplayEngine,
    /// Tick driver; re-armed after every applied tick
    pub scheduler: ReplayScheduler,
    /// Source transcript, kept so the replay can be restarted
    pub transcript: Option<BattleTranscript>,
    /// Load or initialization failure shown instead of the health bars
    pub error: Option<String>,
    /// Text scaling factor
    pub text_scale: f32,
}

impl ReplayApp {
    pub fn new(interval: Duration) -> Self {
        Self {
            engine: BattleReplayEngine::new(),
            scheduler: ReplayScheduler::new(interval),
            transcript: None,
            error: None,
            text_scale: 1.0,
        }
    }

    pub fn with_load_error(interval: Duration, error: impl Into<String>) -> Self {
        let mut app = Self::new(interval);
        app.error = Some(error.into());
        app
    }

    /// Replaces whatever is playing. The pending tick is cancelled before the
    /// new replay starts so it can never land on the new transcript.
    pub fn load(&mut self, transcript: BattleTranscript, now: Instant) {
        self.scheduler.cancel();
        match self.engine.start(transcript.clone()) {
            Ok(()) => {
                self.error = None;
                self.scheduler.arm(&self.engine, now);
            }
            Err(e) => {
                self.error = Some(format!("Could not start replay: {}", e));
            }
        }
        self.transcript = Some(transcript);
    }

    pub fn restart(&mut self, now: Instant) {
        if let Some(transcript) = self.transcript.clone() {
            info!("Restarting replay {}", transcript.title());
            self.load(transcript, now);
        }
    }

    /// Fires a due tick and returns how long until the next one.
    pub fn pump(&mut self, now: Instant) -> Option<Duration> {
        self.scheduler.poll(&mut self.engine, now);
        self.scheduler.time_until_due(now)
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        if let Some(transcript) = self.engine.transcript() {
            ui.vertical_centered(|ui| {
                ui.heading(transcript.title());
                match self.engine.winner() {
                    Some(winner) => {
                        ui.label(
                            egui::RichText::new(format!("Winner: {}", winner))
                                .strong()
                                .color(egui::Color32::from_rgb(34, 197, 94)),
                        );
                    }
                    None if self.engine.is_complete() => {
                        ui.label("Battle finished");
                    }
                    None => {
                        ui.label(format!(
                            "Turn log {}/{}",
                            self.engine.cursor().revealed_count,
                            self.engine.total_lines()
                        ));
                    }
                }
            });
        }
    }

    fn show_log(&self, ui: &mut egui::Ui) {
        egui::Frame::default()
            .fill(egui::Color32::from_rgb(31, 41, 55))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in self.engine.revealed_lines() {
                            ui.label(
                                egui::RichText::new(format!("> {}", line))
                                    .monospace()
                                    .color(egui::Color32::WHITE),
                            );
                        }
                    });
            });
    }
}

impl eframe::App for ReplayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(wait) = self.pump(Instant::now()) {
            ctx.request_repaint_after(wait);
        }

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let can_restart = self.transcript.is_some();
                if ui.add_enabled(can_restart, egui::Button::new("Replay")).clicked() {
                    self.restart(Instant::now());
                    ctx.request_repaint();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(egui::Button::new(egui::RichText::new("A").size(16.0))
                        .min_size(egui::Vec2::new(20.0, 20.0))).clicked() {
                        self.text_scale = (self.text_scale + 0.1).min(2.0);
                        ctx.set_zoom_factor(self.text_scale);
                    }
                    if ui.add(egui::Button::new(egui::RichText::new("A").size(8.0))
                        .min_size(egui::Vec2::new(18.0, 18.0))).clicked() {
                        self.text_scale = (self.text_scale - 0.1).max(0.5);
                        ctx.set_zoom_factor(self.text_scale);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.error {
                ui.vertical_centered(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(239, 68, 68), error.as_str());
                });
                return;
            }
            if !self.engine.is_started() {
                ui.label("Loading battle...");
                return;
            }

            self.show_header(ui);
            ui.add_space(8.0);
            for side in [Side::One, Side::Two] {
                if let Some(view) = self.engine.view(side) {
                    show_health_bar(ui, &view);
                    ui.add_space(6.0);
                }
            }
            ui.add_space(8.0);
            self.show_log(ui);
        });
    }
}
