//! E-paper weather dashboard.
//!
//! Composes the station dashboard and either pushes it to the panel or, in
//! dev mode, writes a PNG preview.

mod app;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use epd_driver::SpoolDevice;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use app::Dashboard;
use config::{load_config, DashboardConfig};

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "E-paper weather dashboard with wind barbs")]
struct Args {
    /// Write a preview PNG instead of driving the panel
    #[arg(long = "dev", visible_alias = "dev-mode")]
    dev_mode: bool,

    /// Configuration file path (defaults apply when omitted)
    #[arg(short, long, env = "DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Preview output path (dev mode)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Preview scale factor (dev mode)
    #[arg(long)]
    preview_scale: Option<u32>,

    /// Log level
    #[arg(long, default_value = "info", env = "DASHBOARD_LOG_LEVEL")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!(dev_mode = args.dev_mode, "Starting dashboard");

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };
    let frame_path = config.display.frame_path.clone();

    let now = Utc::now();
    let dashboard = Dashboard::new(config, now)?;
    info!(
        station = %dashboard.report().station_id,
        age = %dashboard.report().age_label(now),
        "Observation loaded"
    );

    if args.dev_mode {
        let path = dashboard.run_preview(args.output.as_deref(), args.preview_scale, now)?;
        info!(path = %path.display(), "Preview written");
    } else {
        let device = SpoolDevice::new(dashboard.panel(), frame_path);
        let device = dashboard.run_device(device, now)?;
        info!(
            path = %device.path().display(),
            frames = device.frames_written(),
            "Panel updated"
        );
    }

    Ok(())
}
