//! Doctor catalog panel.

use eframe::egui::{self, Ui};

use crate::assets::AssetResolver;
use crate::models::doctor;
use crate::routes::Route;

use super::components::{doctor_card, panel_header};

/// Show the doctor catalog. Clicking a doctor opens the booking wizard with
/// that doctor pre-selected.
pub fn show(ui: &mut Ui, assets: &AssetResolver) -> Option<Route> {
    let mut next = None;

    panel_header(ui, "Our Doctors");

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("catalog_grid")
            .num_columns(2)
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for (index, entry) in doctor::catalog().iter().enumerate() {
                    let card = doctor_card(ui, assets, entry, false).on_hover_text("Book an appointment");
                    if card.clicked() {
                        next = Some(Route::Book { doctor: Some(entry.id) });
                    }
                    if index % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    });

    next
}
