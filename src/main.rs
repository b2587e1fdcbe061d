//! HealthConnect - desktop appointment booking for patients.

use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use eframe::egui;
use healthconnect as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::routes::Route;
use app::storage::FileSlots;
use app::ui::{HealthConnectApp, Slots};

/// Desktop appointment booking for HealthConnect patients.
#[derive(Parser)]
#[command(name = "healthconnect")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Store slots in this directory instead of the configured one
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Open this view on start, e.g. "/appointments/book?doctor=2"
    #[arg(long, default_value = "/")]
    open: String,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let (mut config, config_status) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, ConfigStatus::Loaded),
        ConfigLoadResult::Missing => (AppConfig::default(), ConfigStatus::Missing),
        ConfigLoadResult::Invalid(e) => (AppConfig::default(), ConfigStatus::Invalid(e.to_string())),
    };

    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.display().to_string();
    }
    let data_dir = config.storage.data_dir();

    // Initialize logging
    let _log_guard = app::logging::init(&config.log, &data_dir.join("logs"));

    tracing::info!("HealthConnect starting...");
    tracing::info!("Config path: {:?}", config_path);

    let initial_error = match config_status {
        ConfigStatus::Loaded => {
            tracing::info!("Config loaded successfully");
            None
        }
        ConfigStatus::Missing => {
            tracing::info!("Config missing, writing defaults");
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            None
        }
        ConfigStatus::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            Some(format!("{} (using defaults)", e))
        }
    };

    let initial_route = Route::parse(&cli.open).unwrap_or_else(|| {
        tracing::warn!("Unknown view '{}', opening home", cli.open);
        Route::Home
    });

    tracing::info!("Data directory: {:?}", data_dir);
    let slots: Slots = Rc::new(FileSlots::new(data_dir));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HealthConnect")
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HealthConnect",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(HealthConnectApp::new(&config, slots, initial_route, initial_error)))
        }),
    )
}

/// Outcome of reading the config file, logged once the subscriber is up.
enum ConfigStatus {
    Loaded,
    Missing,
    Invalid(String),
}
