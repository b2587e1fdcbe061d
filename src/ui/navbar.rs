//! Top navigation bar reflecting the login state.

use eframe::egui::{Align, Layout, RichText, Ui};
use egui_phosphor::regular::{HEARTBEAT, SIGN_OUT};

use crate::auth::AuthProvider;
use crate::routes::Route;
use crate::storage::{SlotStorage, SlotWatcher};

use super::components::colors;

/// Something the user did in the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Go(Route),
    Logout,
}

/// Right-hand side controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Link(Route),
    Logout,
}

/// Navigation bar state.
pub struct NavBar {
    authenticated: bool,
    user_email: Option<String>,
    session_watcher: SlotWatcher,
}

impl NavBar {
    /// Read the current login state.
    pub fn mount(auth: &impl AuthProvider, session_watcher: SlotWatcher) -> Self {
        Self {
            authenticated: auth.is_authenticated(),
            user_email: auth.user_email(),
            session_watcher,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Re-read the login state if the session slot changed, e.g. another
    /// running instance logged in or out. Returns whether it was re-read.
    pub fn refresh(&mut self, auth: &impl AuthProvider, slots: &impl SlotStorage) -> bool {
        if !self.session_watcher.poll(slots) {
            return false;
        }
        self.sync(auth);
        true
    }

    /// Re-read the login state unconditionally.
    pub fn sync(&mut self, auth: &impl AuthProvider) {
        self.authenticated = auth.is_authenticated();
        self.user_email = auth.user_email();
    }

    /// Left-hand links.
    pub fn links(&self) -> Vec<Route> {
        if self.authenticated {
            vec![Route::Home, Route::Doctors, Route::Appointments]
        } else {
            vec![Route::Home]
        }
    }

    /// Right-hand controls.
    pub fn actions(&self) -> Vec<NavAction> {
        if self.authenticated {
            vec![NavAction::Logout]
        } else {
            vec![NavAction::Link(Route::Login), NavAction::Link(Route::SignUp)]
        }
    }

    /// Log out through the auth collaborator and return where to go next.
    pub fn logout(&mut self, auth: &impl AuthProvider) -> Route {
        auth.logout();
        self.authenticated = false;
        self.user_email = None;
        Route::Home
    }

    /// Render the bar.
    pub fn show(&self, ui: &mut Ui, current: Route) -> Option<NavEvent> {
        let mut event = None;

        ui.horizontal(|ui| {
            if ui
                .button(RichText::new(format!("{} HealthConnect", HEARTBEAT)).strong().color(colors::PRIMARY))
                .clicked()
            {
                event = Some(NavEvent::Go(Route::Home));
            }

            ui.add_space(20.0);

            for route in self.links() {
                let selected = same_section(current, route);
                if ui.selectable_label(selected, route.name()).clicked() {
                    event = Some(NavEvent::Go(route));
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                for action in self.actions().into_iter().rev() {
                    match action {
                        NavAction::Logout => {
                            if ui.button(format!("{} Logout", SIGN_OUT)).clicked() {
                                event = Some(NavEvent::Logout);
                            }
                        }
                        NavAction::Link(route) => {
                            if ui.button(route.name()).clicked() {
                                event = Some(NavEvent::Go(route));
                            }
                        }
                    }
                }
                if let Some(email) = &self.user_email {
                    ui.label(RichText::new(email).weak());
                }
            });
        });

        event
    }
}

fn same_section(current: Route, link: Route) -> bool {
    match (current, link) {
        (Route::Book { .. }, Route::Appointments) => true,
        _ => current == link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SlotSession;
    use crate::storage::MemorySlots;

    fn mounted(slots: &MemorySlots) -> (SlotSession<&MemorySlots>, NavBar) {
        let session = SlotSession::new(slots, "session");
        let watcher = SlotWatcher::new("session", &slots);
        let navbar = NavBar::mount(&session, watcher);
        (session, navbar)
    }

    #[test]
    fn test_logged_out_links() {
        let slots = MemorySlots::new();
        let (_, navbar) = mounted(&slots);
        assert!(!navbar.is_authenticated());
        assert_eq!(navbar.links(), vec![Route::Home]);
        assert_eq!(
            navbar.actions(),
            vec![NavAction::Link(Route::Login), NavAction::Link(Route::SignUp)]
        );
    }

    #[test]
    fn test_logged_in_links() {
        let slots = MemorySlots::new();
        SlotSession::new(&slots, "session").login("a@b.c").unwrap();
        let (_, navbar) = mounted(&slots);
        assert!(navbar.is_authenticated());
        assert_eq!(navbar.links(), vec![Route::Home, Route::Doctors, Route::Appointments]);
        assert_eq!(navbar.actions(), vec![NavAction::Logout]);
    }

    #[test]
    fn test_refresh_picks_up_other_instance_login() {
        let slots = MemorySlots::new();
        let (session, mut navbar) = mounted(&slots);
        assert!(!navbar.refresh(&session, &slots));

        // Another instance writes the shared session slot.
        SlotSession::new(&slots, "session").login("a@b.c").unwrap();
        assert!(navbar.refresh(&session, &slots));
        assert!(navbar.is_authenticated());
        assert!(!navbar.refresh(&session, &slots));
    }

    #[test]
    fn test_logout_routes_home() {
        let slots = MemorySlots::new();
        SlotSession::new(&slots, "session").login("a@b.c").unwrap();
        let (session, mut navbar) = mounted(&slots);

        assert_eq!(navbar.logout(&session), Route::Home);
        assert!(!navbar.is_authenticated());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_book_highlights_appointments() {
        assert!(same_section(Route::Book { doctor: Some(1) }, Route::Appointments));
        assert!(!same_section(Route::Home, Route::Appointments));
    }
}
