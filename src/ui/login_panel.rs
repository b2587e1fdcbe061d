//! Minimal sign-in form backing the Login and Sign Up routes.

use eframe::egui::{self, RichText, Ui};

use super::components::{colors, panel_header};

/// Login form state.
#[derive(Default)]
pub struct LoginPanel {
    pub email: String,
    pub error: Option<String>,
}

/// Show the form. Returns the entered email when submitted.
pub fn show(panel: &mut LoginPanel, ui: &mut Ui, sign_up: bool) -> Option<String> {
    let mut submitted = None;

    panel_header(ui, if sign_up { "Create an Account" } else { "Login" });

    egui::Grid::new("login_grid")
        .num_columns(2)
        .spacing([20.0, 8.0])
        .show(ui, |ui| {
            ui.label("Email:");
            let response = ui.text_edit_singleline(&mut panel.email);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = Some(panel.email.clone());
            }
            ui.end_row();
        });

    ui.add_space(10.0);

    let label = if sign_up { "Sign Up" } else { "Login" };
    if ui
        .add_enabled(!panel.email.trim().is_empty(), egui::Button::new(label))
        .clicked()
    {
        submitted = Some(panel.email.clone());
    }

    if let Some(err) = &panel.error {
        ui.add_space(10.0);
        ui.colored_label(colors::ERROR, err);
    }

    ui.add_space(10.0);
    ui.label(RichText::new("Your session is shared with other open HealthConnect windows.").weak());

    submitted
}
