//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, Stroke, StrokeKind, Ui};
use egui_phosphor::regular::USER_CIRCLE;

use crate::assets::{AssetResolver, ImageRef};
use crate::models::Doctor;

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const PRIMARY: Color32 = Color32::from_rgb(13, 110, 253);
    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const TRACK: Color32 = Color32::from_rgb(222, 226, 230);
}

/// Render a clickable navigation card with icon, title and description.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn nav_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let scale = size.x / 200.0;

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        ui.painter().text(
            egui::pos2(rect.center().x, rect.top() + size.y * 0.25),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(34.0 * scale),
            colors::PRIMARY,
        );
        ui.painter().text(
            egui::pos2(rect.center().x, rect.center().y + size.y * 0.08),
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(17.0 * scale),
            visuals.text_color(),
        );
        ui.painter().text(
            egui::pos2(rect.center().x, rect.bottom() - size.y * 0.17),
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(12.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Render a doctor's portrait, falling back to a placeholder icon.
pub fn doctor_portrait(ui: &mut Ui, assets: &AssetResolver, doctor_image: &str, size: f32) {
    match assets.resolve(doctor_image) {
        ImageRef::File(uri) => {
            ui.add(
                egui::Image::new(uri)
                    .fit_to_exact_size(egui::vec2(size, size))
                    .corner_radius(CornerRadius::same((size / 2.0) as u8)),
            );
        }
        ImageRef::Placeholder => {
            ui.label(RichText::new(USER_CIRCLE).size(size).color(colors::NEUTRAL));
        }
    }
}

/// Render a doctor card. Returns the click response of the whole card.
pub fn doctor_card(ui: &mut Ui, assets: &AssetResolver, doctor: &Doctor, selected: bool) -> Response {
    let stroke = if selected {
        Stroke::new(2.0, colors::PRIMARY)
    } else {
        Stroke::new(1.0, colors::TRACK)
    };

    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .stroke(stroke)
        .inner_margin(Margin::same(12))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(260.0);
            ui.horizontal(|ui| {
                doctor_portrait(ui, assets, doctor.image, 50.0);
                ui.add_space(8.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(doctor.name).strong());
                    ui.label(RichText::new(doctor.specialty).small().weak());
                });
            });
        })
        .response
        .interact(Sense::click())
}

/// Render the numbered step indicator: `(1)--(2)--(3)`.
pub fn step_indicator(ui: &mut Ui, current: usize, total: usize) {
    let radius = 15.0;
    let gap = 50.0;
    let width = total as f32 * radius * 2.0 + (total.saturating_sub(1)) as f32 * (gap + 16.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, radius * 2.0), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter();
    let mut x = rect.left() + radius;
    for step in 1..=total {
        let center = egui::pos2(x, rect.center().y);
        let reached = step <= current;
        painter.circle_filled(center, radius, if reached { colors::PRIMARY } else { colors::TRACK });
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            step.to_string(),
            egui::FontId::proportional(14.0),
            Color32::WHITE,
        );

        if step < total {
            let start = egui::pos2(x + radius + 8.0, center.y);
            let end = egui::pos2(start.x + gap, center.y);
            let color = if step < current { colors::PRIMARY } else { colors::TRACK };
            painter.line_segment([start, end], Stroke::new(2.0, color));
            x = end.x + 8.0 + radius;
        }
    }
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}
