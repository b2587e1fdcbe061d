//! Home panel with navigation cards.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{CALENDAR_CHECK, CALENDAR_PLUS, SIGN_IN, STETHOSCOPE};

use crate::routes::Route;

use super::components::nav_card;

/// Show the home panel.
///
/// Returns `Some(route)` if navigation is requested.
pub fn show(ui: &mut Ui, authenticated: bool) -> Option<Route> {
    let mut next = None;

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);
        ui.label(RichText::new("HealthConnect").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Book appointments with our doctors").size(14.0).weak());
        ui.add_space(30.0);
    });

    let cards: Vec<(&str, &str, &str, Route)> = if authenticated {
        vec![
            ("Find a Doctor", "Browse specialists", STETHOSCOPE, Route::Doctors),
            ("Book Appointment", "Pick a date and time", CALENDAR_PLUS, Route::Book { doctor: None }),
            ("My Appointments", "Upcoming and past visits", CALENDAR_CHECK, Route::Appointments),
        ]
    } else {
        vec![("Login", "Sign in to book a visit", SIGN_IN, Route::Login)]
    };

    let available = ui.available_width();
    let spacing = 30.0;
    let count = cards.len() as f32;
    let card_width = ((available - spacing * (count - 1.0)) / count).clamp(150.0, 240.0);
    let card_size = egui::vec2(card_width, card_width * 0.75);
    let total_width = card_width * count + spacing * (count - 1.0);

    ui.horizontal(|ui| {
        ui.add_space(((available - total_width) / 2.0).max(0.0));
        for (index, (title, description, icon, route)) in cards.into_iter().enumerate() {
            if index > 0 {
                ui.add_space(spacing);
            }
            if nav_card(ui, title, description, icon, card_size).clicked() {
                next = Some(route);
            }
        }
    });

    next
}
