//! Book-an-appointment panel rendering the booking wizard.

use chrono::NaiveDate;
use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_phosphor::regular::CALENDAR_PLUS;

use crate::assets::AssetResolver;
use crate::booking::{BookingWizard, Step};
use crate::models::{TimeSlot, doctor};

use super::components::{colors, doctor_card, panel_header, step_indicator};

/// Requested follow-up for the app shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
}

/// Booking panel state.
pub struct BookingPanel {
    pub wizard: BookingWizard,
    /// Date picker buffer; only copied into the wizard when picked.
    date_input: NaiveDate,
    date_error: Option<String>,
}

impl BookingPanel {
    pub fn new(today: NaiveDate, preselect: Option<u32>) -> Self {
        Self {
            wizard: BookingWizard::new(today, preselect),
            date_input: today,
            date_error: None,
        }
    }
}

/// Show the booking panel.
pub fn show(panel: &mut BookingPanel, ui: &mut Ui, assets: &AssetResolver) -> Action {
    let mut action = Action::None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        panel_header(ui, &format!("{} Book an Appointment", CALENDAR_PLUS));

        ui.vertical_centered(|ui| {
            step_indicator(ui, panel.wizard.step_number(), BookingWizard::TOTAL_STEPS);
        });
        ui.add_space(20.0);

        ui.heading(panel.wizard.step_title());
        ui.add_space(10.0);

        match panel.wizard.step_number() {
            1 => show_doctor_step(panel, ui, assets),
            2 => show_schedule_step(panel, ui),
            _ => show_details_step(panel, ui),
        }

        ui.add_space(20.0);
        ui.separator();

        // Navigation buttons
        ui.horizontal(|ui| {
            if panel.wizard.step_number() > 1
                && ui
                    .add_enabled(!panel.wizard.is_submitting(), egui::Button::new("Back"))
                    .clicked()
            {
                panel.wizard.back();
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if matches!(panel.wizard.step(), Step::Details(_)) {
                    if panel.wizard.is_submitting() {
                        ui.spinner();
                        ui.label("Processing...");
                    } else if ui
                        .add_enabled(panel.wizard.can_submit(), egui::Button::new("Confirm Booking"))
                        .clicked()
                    {
                        action = Action::Submit;
                    }
                } else if ui
                    .add_enabled(panel.wizard.can_proceed(), egui::Button::new("Next"))
                    .clicked()
                {
                    panel.wizard.next();
                }
            });
        });
    });

    action
}

fn show_doctor_step(panel: &mut BookingPanel, ui: &mut Ui, assets: &AssetResolver) {
    if panel.wizard.is_preselected() {
        if let Some(selected) = panel.wizard.doctor() {
            doctor_card(ui, assets, selected, true);
        }
        return;
    }

    let selected_id = panel.wizard.doctor().map(|d| d.id);
    let mut clicked = None;

    egui::Grid::new("doctor_grid")
        .num_columns(2)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (index, candidate) in doctor::catalog().iter().enumerate() {
                if doctor_card(ui, assets, candidate, selected_id == Some(candidate.id)).clicked() {
                    clicked = Some(candidate.id);
                }
                if index % 2 == 1 {
                    ui.end_row();
                }
            }
        });

    if let Some(id) = clicked {
        panel.wizard.select_doctor(id);
    }
}

fn show_schedule_step(panel: &mut BookingPanel, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label("Date:");
        let response = ui.add(egui_extras::DatePickerButton::new(&mut panel.date_input).id_salt("appointment_date"));
        if response.changed() {
            if panel.wizard.set_date(panel.date_input) {
                panel.date_error = None;
            } else {
                panel.date_error = Some(format!(
                    "Choose {} or a later date",
                    panel.wizard.today().format("%Y-%m-%d")
                ));
            }
        }
        match panel.wizard.date() {
            Some(date) => {
                ui.label(date.format("%Y-%m-%d").to_string());
            }
            None => {
                ui.label(RichText::new("No date selected").weak());
            }
        }
    });

    if let Some(err) = &panel.date_error {
        ui.colored_label(colors::ERROR, err);
    }

    if panel.wizard.date().is_none() {
        return;
    }

    ui.add_space(15.0);
    ui.label("Time:");
    ui.add_space(5.0);

    let current = panel.wizard.time().cloned();
    let mut picked: Option<TimeSlot> = None;
    ui.horizontal_wrapped(|ui| {
        for slot in TimeSlot::all_offered() {
            let selected = current.as_ref() == Some(&slot);
            if ui.selectable_label(selected, slot.as_str()).clicked() {
                picked = Some(slot);
            }
        }
    });

    if let Some(slot) = picked {
        panel.wizard.set_time(&slot);
    }
}

fn show_details_step(panel: &mut BookingPanel, ui: &mut Ui) {
    let submitting = panel.wizard.is_submitting();

    ui.label("Reason for Visit");
    if let Some(reason) = panel.wizard.reason_mut() {
        ui.add_enabled(
            !submitting,
            egui::TextEdit::multiline(reason)
                .hint_text("Briefly describe your symptoms or reason for the appointment")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
    }

    ui.add_space(15.0);

    let Some(summary) = panel.wizard.summary() else {
        return;
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("Appointment Summary").strong());
        ui.add_space(5.0);
        egui::Grid::new("summary_grid")
            .num_columns(2)
            .spacing([20.0, 6.0])
            .show(ui, |ui| {
                for (label, value) in [
                    ("Doctor:", summary.doctor.to_string()),
                    ("Specialty:", summary.specialty.to_string()),
                    ("Date:", summary.date.clone()),
                    ("Time:", summary.time.clone()),
                ] {
                    ui.label(RichText::new(label).weak());
                    ui.label(value);
                    ui.end_row();
                }
            });
    });
}
