mod app;
mod branding;
mod catalog;
mod config;
mod error;
mod events;
mod grid;
mod icons;

use crate::app::{GridApp, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::branding::APP_DISPLAY_NAME;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use eframe::egui;
use log::{error, info};

fn main() -> eframe::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = AppConfig::load();
    let loaded = match &config.data_dir {
        Some(dir) => {
            info!("loading app data from {}", dir.display());
            Catalog::load_from_dir(dir)
        }
        None => Catalog::load(),
    };
    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("cannot start without app data: {err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_DISPLAY_NAME)
            .with_inner_size(startup_window_size(&config))
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_DISPLAY_NAME,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(GridApp::new(cc, catalog, config)))
        }),
    )
}

fn startup_window_size(config: &AppConfig) -> [f32; 2] {
    if let Some((w, h)) = config.last_size {
        [
            sanitize_dimension(w, WINDOW_WIDTH, MIN_WINDOW_WIDTH),
            sanitize_dimension(h, WINDOW_HEIGHT, MIN_WINDOW_HEIGHT),
        ]
    } else {
        [WINDOW_WIDTH, WINDOW_HEIGHT]
    }
}

fn sanitize_dimension(value: f32, fallback: f32, min: f32) -> f32 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, 4096.0)
}
