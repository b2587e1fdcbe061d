//! Appointment listing with cancel and delete.

use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_phosphor::regular::{CALENDAR_PLUS, TRASH, X_CIRCLE};
use tracing::warn;

use crate::assets::AssetResolver;
use crate::models::{Appointment, AppointmentStatus};
use crate::storage::{SlotStorage, SlotWatcher};
use crate::store::{AppointmentRepository, AppointmentStore};

use super::components::{colors, doctor_portrait};

/// Requested follow-up for the app shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    BookNew,
    Cancel(u32),
    Delete(u32),
}

/// Listing panel state.
pub struct AppointmentsPanel {
    pub appointments: Vec<Appointment>,
    pub status_filter: Option<AppointmentStatus>,
    pub load_error: Option<String>,
    confirm_delete: Option<u32>,
    watcher: SlotWatcher,
}

impl AppointmentsPanel {
    pub fn new(watcher: SlotWatcher) -> Self {
        Self {
            appointments: Vec::new(),
            status_filter: None,
            load_error: None,
            confirm_delete: None,
            watcher,
        }
    }

    /// Load the collection from the store.
    pub fn reload<S: SlotStorage>(&mut self, store: &AppointmentStore<S>) {
        match store.list() {
            Ok(appointments) => {
                self.appointments = appointments;
                self.load_error = None;
            }
            Err(e) => {
                warn!("Failed to load appointments: {}", e);
                self.appointments.clear();
                self.load_error = Some(e.to_string());
            }
        }
        // Our own reads may have seeded the slot.
        self.watcher.poll(store.slots());
    }

    /// Reload when another instance changed the slot.
    pub fn refresh<S: SlotStorage>(&mut self, store: &AppointmentStore<S>) -> bool {
        if !self.watcher.poll(store.slots()) {
            return false;
        }
        self.reload(store);
        true
    }

    /// Records matching the active filter.
    pub fn visible(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments
            .iter()
            .filter(|a| self.status_filter.is_none_or(|status| a.status == status))
    }

    fn count(&self, status: AppointmentStatus) -> usize {
        self.appointments.iter().filter(|a| a.status == status).count()
    }
}

/// Show the appointments panel.
pub fn show(panel: &mut AppointmentsPanel, ui: &mut Ui, assets: &AssetResolver) -> Action {
    let mut action = Action::None;

    ui.horizontal(|ui| {
        ui.heading(RichText::new("My Appointments").size(24.0));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button(format!("{} Book Appointment", CALENDAR_PLUS)).clicked() {
                action = Action::BookNew;
            }
        });
    });
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);

    // Status filter
    ui.horizontal(|ui| {
        if ui
            .selectable_label(panel.status_filter.is_none(), format!("All ({})", panel.appointments.len()))
            .clicked()
        {
            panel.status_filter = None;
        }
        for status in [
            AppointmentStatus::Upcoming,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            let label = format!("{} ({})", status.name(), panel.count(status));
            if ui.selectable_label(panel.status_filter == Some(status), label).clicked() {
                panel.status_filter = Some(status);
            }
        }
    });

    ui.add_space(10.0);

    if let Some(err) = &panel.load_error {
        ui.colored_label(colors::ERROR, format!("Could not load appointments: {}", err));
        return action;
    }

    let visible: Vec<Appointment> = panel.visible().cloned().collect();
    if visible.is_empty() {
        ui.label(RichText::new("No appointments found.").weak());
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for appointment in &visible {
            if let Some(next) = appointment_row(ui, assets, appointment) {
                match next {
                    Action::Delete(id) => panel.confirm_delete = Some(id),
                    other => action = other,
                }
            }
            ui.add_space(8.0);
        }
    });

    if let Some(confirmed) = show_delete_confirm(panel, ui.ctx()) {
        action = Action::Delete(confirmed);
    }

    action
}

fn appointment_row(ui: &mut Ui, assets: &AssetResolver, appointment: &Appointment) -> Option<Action> {
    let mut action = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            doctor_portrait(ui, assets, &appointment.doctor.image, 44.0);
            ui.add_space(8.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(&appointment.doctor.name).strong());
                ui.label(RichText::new(&appointment.doctor.specialty).small().weak());
                ui.label(format!(
                    "{} at {}",
                    appointment.date.format("%b %-d, %Y"),
                    appointment.time
                ));
                if let Some(reason) = &appointment.reason {
                    ui.label(RichText::new(reason).italics());
                }
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button(TRASH).on_hover_text("Delete").clicked() {
                    action = Some(Action::Delete(appointment.id));
                }
                if appointment.status == AppointmentStatus::Upcoming
                    && ui.button(format!("{} Cancel", X_CIRCLE)).clicked()
                {
                    action = Some(Action::Cancel(appointment.id));
                }
                let color = match appointment.status {
                    AppointmentStatus::Upcoming => colors::PRIMARY,
                    AppointmentStatus::Completed => colors::SUCCESS,
                    AppointmentStatus::Cancelled => colors::NEUTRAL,
                };
                ui.colored_label(color, appointment.status.name());
            });
        });
    });

    action
}

fn show_delete_confirm(panel: &mut AppointmentsPanel, ctx: &egui::Context) -> Option<u32> {
    let id = panel.confirm_delete?;
    let mut confirmed = None;

    egui::Window::new("Delete Appointment")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Delete this appointment permanently?");
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Keep").clicked() {
                    panel.confirm_delete = None;
                }
                if ui.button(RichText::new("Delete").color(colors::ERROR)).clicked() {
                    confirmed = Some(id);
                    panel.confirm_delete = None;
                }
            });
        });

    confirmed
}
