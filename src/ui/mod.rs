//! GUI panels and application state.

pub mod app;
pub mod appointments_panel;
pub mod booking_panel;
pub mod components;
pub mod doctors_panel;
pub mod home_panel;
pub mod login_panel;
pub mod navbar;

pub use app::{HealthConnectApp, Slots};
pub use navbar::NavBar;
