//! Application shell: routing, notifications and the frame loop.

use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::Local;
use eframe::egui::{self, Color32, RichText};
use tracing::{error, info, warn};

use crate::assets::AssetResolver;
use crate::auth::SlotSession;
use crate::config::AppConfig;
use crate::routes::Route;
use crate::storage::{SlotStorage, SlotWatcher};
use crate::store::{AppointmentRepository, AppointmentStore};

use super::appointments_panel::{self, AppointmentsPanel};
use super::booking_panel::{self, BookingPanel};
use super::components::colors;
use super::login_panel::{self, LoginPanel};
use super::navbar::{NavBar, NavEvent};
use super::{doctors_panel, home_panel};

/// Storage shared by the store, the session and the watchers.
pub type Slots = Rc<dyn SlotStorage>;

/// Modal message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Blocking message shown until dismissed.
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// Where a navigation request actually lands.
///
/// Protected routes send logged out users to the login form.
pub fn resolve_route(requested: Route, authenticated: bool) -> Route {
    if requested.requires_auth() && !authenticated {
        Route::Login
    } else {
        requested
    }
}

/// Main application state.
pub struct HealthConnectApp {
    slots: Slots,
    store: AppointmentStore<Slots>,
    session: SlotSession<Slots>,
    assets: AssetResolver,

    // Navigation
    route: Route,
    /// Protected route to open after logging in.
    after_login: Option<Route>,
    navbar: NavBar,

    // Panels
    booking: Option<BookingPanel>,
    appointments: AppointmentsPanel,
    login: LoginPanel,

    // Dialogs
    notice: Option<Notice>,

    // Cross-instance refresh
    refresh_interval: Duration,
    last_refresh: Instant,
}

impl HealthConnectApp {
    pub fn new(config: &AppConfig, slots: Slots, initial_route: Route, initial_error: Option<String>) -> Self {
        let store = AppointmentStore::new(slots.clone(), config.storage.appointments_slot.clone());
        let session = SlotSession::new(slots.clone(), config.storage.session_slot.clone());
        let navbar = NavBar::mount(&session, SlotWatcher::new(session.key(), &slots));
        let appointments = AppointmentsPanel::new(SlotWatcher::new(store.key(), &slots));

        let mut app = Self {
            assets: AssetResolver::new(config.assets.root()),
            slots,
            store,
            session,
            route: Route::Home,
            after_login: None,
            navbar,
            booking: None,
            appointments,
            login: LoginPanel::default(),
            notice: initial_error.map(|e| Notice::error("Configuration Error", e)),
            refresh_interval: Duration::from_millis(config.ui.refresh_interval_ms),
            last_refresh: Instant::now(),
        };
        app.navigate(initial_route);
        app
    }

    /// Switch to a route, preparing the panel it shows.
    pub fn navigate(&mut self, requested: Route) {
        let route = resolve_route(requested, self.navbar.is_authenticated());
        if route != requested {
            info!("{} requires login", requested.path());
            self.after_login = Some(requested);
        } else if !matches!(route, Route::Login | Route::SignUp) {
            self.after_login = None;
        }

        match route {
            Route::Book { doctor } => {
                self.booking = Some(BookingPanel::new(Local::now().date_naive(), doctor));
            }
            Route::Appointments => self.appointments.reload(&self.store),
            Route::Login | Route::SignUp => self.login.error = None,
            Route::Home | Route::Doctors => {}
        }

        if route != self.route {
            info!("Navigate to {}", route.path());
        }
        self.route = route;
    }

    /// Pick up session and appointment changes made by other instances.
    fn refresh_shared_state(&mut self) {
        if self.last_refresh.elapsed() < self.refresh_interval {
            return;
        }
        self.last_refresh = Instant::now();

        if self.navbar.refresh(&self.session, &self.slots) {
            info!(
                "Session changed elsewhere, authenticated: {}",
                self.navbar.is_authenticated()
            );
            let fallback = resolve_route(self.route, self.navbar.is_authenticated());
            if fallback != self.route {
                self.navigate(Route::Home);
            }
        }
        if self.route == Route::Appointments {
            self.appointments.refresh(&self.store);
        }
    }

    fn logout(&mut self) {
        let next = self.navbar.logout(&self.session);
        self.booking = None;
        self.after_login = None;
        self.navigate(next);
    }

    fn login(&mut self, email: String) {
        match self.session.login(&email) {
            Ok(()) => {
                self.navbar.sync(&self.session);
                self.login = LoginPanel::default();
                let next = self.after_login.take().unwrap_or(Route::Home);
                self.navigate(next);
            }
            Err(e) => {
                warn!("Login rejected: {}", e);
                self.login.error = Some(e.to_string());
            }
        }
    }

    fn submit_booking(&mut self) {
        let Some(panel) = self.booking.as_mut() else {
            return;
        };
        match panel.wizard.submit(&self.store) {
            Ok(_) => {
                self.notice = Some(Notice::success("Appointment booked successfully!"));
                self.booking = None;
                self.navigate(Route::Appointments);
            }
            Err(e) => {
                error!("Booking failed: {}", e);
                self.notice = Some(Notice::error(
                    "Booking Failed",
                    "There was an error booking your appointment. Please try again.",
                ));
            }
        }
    }

    fn cancel_appointment(&mut self, id: u32) {
        match self.store.cancel(id) {
            Ok(_) => info!("Cancelled appointment {}", id),
            Err(e) => {
                error!("Failed to cancel appointment {}: {}", id, e);
                self.notice = Some(Notice::error("Cancel Failed", e.to_string()));
            }
        }
        self.appointments.reload(&self.store);
    }

    fn delete_appointment(&mut self, id: u32) {
        match self.store.remove(id) {
            Ok(true) => info!("Deleted appointment {}", id),
            Ok(false) => warn!("Appointment {} was already gone", id),
            Err(e) => {
                error!("Failed to delete appointment {}: {}", id, e);
                self.notice = Some(Notice::error("Delete Failed", e.to_string()));
            }
        }
        self.appointments.reload(&self.store);
    }

    /// Render the modal notice, if any.
    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };

        let color = match notice.level {
            NoticeLevel::Success => colors::SUCCESS,
            NoticeLevel::Error => colors::ERROR,
        };
        let mut dismissed = false;

        egui::Window::new(&notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(color, &notice.message);
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for HealthConnectApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_shared_state();
        ctx.request_repaint_after(self.refresh_interval);

        // Navigation bar
        let nav_event = egui::TopBottomPanel::top("navbar")
            .min_height(36.0)
            .show(ctx, |ui| self.navbar.show(ui, self.route))
            .inner;
        match nav_event {
            Some(NavEvent::Go(route)) => self.navigate(route),
            Some(NavEvent::Logout) => self.logout(),
            None => {}
        }

        // Notices block the rest of the window
        if self.notice.is_some() {
            self.show_notice(ctx);
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.disable();
                ui.label(RichText::new(self.route.name()).color(Color32::GRAY));
            });
            return;
        }

        // Main content
        let mut next_route = None;
        let mut submit = false;
        let mut appointment_action = appointments_panel::Action::None;
        let mut login_email = None;

        egui::CentralPanel::default().show(ctx, |ui| match self.route {
            Route::Home => next_route = home_panel::show(ui, self.navbar.is_authenticated()),
            Route::Doctors => next_route = doctors_panel::show(ui, &self.assets),
            Route::Appointments => {
                appointment_action = appointments_panel::show(&mut self.appointments, ui, &self.assets);
            }
            Route::Book { .. } => {
                if let Some(panel) = self.booking.as_mut() {
                    submit = booking_panel::show(panel, ui, &self.assets) == booking_panel::Action::Submit;
                }
            }
            Route::Login | Route::SignUp => {
                login_email = login_panel::show(&mut self.login, ui, self.route == Route::SignUp);
            }
        });

        if let Some(route) = next_route {
            self.navigate(route);
        }
        if submit {
            self.submit_booking();
        }
        if let Some(email) = login_email {
            self.login(email);
        }
        match appointment_action {
            appointments_panel::Action::None => {}
            appointments_panel::Action::BookNew => self.navigate(Route::Book { doctor: None }),
            appointments_panel::Action::Cancel(id) => self.cancel_appointment(id),
            appointments_panel::Action::Delete(id) => self.delete_appointment(id),
        }
    }
}
