use eframe::egui;
use crate::models::HealthBand;
use crate::replay::CombatantView;

pub fn band_color(band: HealthBand) -> egui::Color32 {
    match band {
        HealthBand::Healthy => egui::Color32::from_rgb(34, 197, 94),
        HealthBand::Wounded => egui::Color32::from_rgb(234, 179, 8),
        HealthBand::Critical => egui::Color32::from_rgb(239, 68, 68),
    }
}

pub fn hp_label(view: &CombatantView) -> String {
    format!("{} / {} HP", view.displayed_hp, view.max_hp)
}

pub fn hp_fraction(view: &CombatantView) -> f32 {
    if view.max_hp <= 0 {
        return 0.0;
    }
    (view.displayed_hp as f32 / view.max_hp as f32).clamp(0.0, 1.0)
}

/// Fixed-width text rendering of a health bar, e.g. `[#####-----]`.
pub fn text_bar(view: &CombatantView, width: usize) -> String {
    let filled = (hp_fraction(view) * width as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width.saturating_sub(filled)))
}

pub fn show_health_bar(ui: &mut egui::Ui, view: &CombatantView) {
    let name_color = if view.attacking {
        egui::Color32::from_rgb(250, 204, 21)
    } else {
        ui.visuals().text_color()
    };
    let name = if view.attacking {
        format!("⚔ {}", view.name)
    } else {
        view.name.clone()
    };

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(name).strong().size(16.0).color(name_color));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(hp_label(view));
        });
    });

    let bar_height = 22.0;
    let available_width = ui.available_width();
    let bar_rect = ui.allocate_space(egui::Vec2::new(available_width, bar_height)).1;
    ui.painter().rect_filled(bar_rect, 6.0, egui::Color32::from_gray(60));

    let fraction = hp_fraction(view);
    if fraction > 0.0 {
        let fill_rect = egui::Rect::from_min_size(
            bar_rect.min,
            egui::Vec2::new(available_width * fraction, bar_height),
        );
        ui.painter().rect_filled(fill_rect, 6.0, band_color(view.band));
    }
}
