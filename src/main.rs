//! Indicator Dashboard - Country Indicator Loader & Interactive Bubble Chart
//!
//! Loads life expectancy, population and GNI per capita tables once, then
//! lets the user browse them by year and country.

mod charts;
mod config;
mod data;
mod export;
mod gui;
mod stats;

use anyhow::{anyhow, Context};
use config::{DashboardConfig, CONFIG_FILE};
use data::DATASET;
use eframe::egui;
use gui::DashboardApp;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // A load failure is fatal: no window is opened without the full dataset
    let dataset = DATASET
        .get_or_load(&config)
        .context("failed to load indicator data")?;
    info!(rows = dataset.table.len(), "starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Indicator Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Indicator Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dataset)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
