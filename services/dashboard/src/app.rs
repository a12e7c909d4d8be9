//! Dashboard composition and output.
//!
//! Fonts, the icon and the report are loaded once in [`Dashboard::new`] and
//! reused for every frame.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use epd_common::{EpdError, StationReport};
use epd_driver::{EpdCanvas, EpdDevice, Panel};
use image::GrayImage;
use renderer::canvas::Canvas;
use renderer::icons::load_icon;
use renderer::preview::save_preview;
use renderer::raster::MonoCanvas;
use renderer::{render_dashboard, DashboardLayout, FontSet};
use tracing::{info, warn};

use crate::config::{DashboardConfig, IconConfig};

pub struct Dashboard {
    config: DashboardConfig,
    panel: Panel,
    fonts: FontSet,
    report: StationReport,
    icon: Option<GrayImage>,
    layout: DashboardLayout,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, now: DateTime<Utc>) -> Result<Self> {
        let panel = config.panel()?;
        let fonts = FontSet::load(&config.fonts.path, config.fonts.sizes)
            .with_context(|| format!("Failed to load font {:?}", config.fonts.path))?;

        let report = config
            .station
            .clone()
            .unwrap_or_else(|| StationReport::stub(now));
        let icon = load_sky_icon(&config.icons, &report)?;

        info!(
            panel = panel.name,
            station = %report.station_id,
            icon = icon.is_some(),
            "Dashboard ready"
        );

        Ok(Self {
            config,
            panel,
            fonts,
            report,
            icon,
            layout: DashboardLayout::default(),
        })
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn report(&self) -> &StationReport {
        &self.report
    }

    /// Draw the full dashboard onto `canvas`.
    pub fn compose<C: Canvas + ?Sized>(&self, canvas: &mut C, now: DateTime<Utc>) -> Result<()> {
        render_dashboard(
            canvas,
            &self.fonts,
            &self.report,
            self.icon.as_ref(),
            &self.config.barbs,
            &self.layout,
            now,
        )
        .context("Failed to compose dashboard")
    }

    /// Compose in memory and write a preview PNG.
    ///
    /// `output` and `scale` override the configured preview settings.
    pub fn run_preview(
        &self,
        output: Option<&Path>,
        scale: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let mut canvas = MonoCanvas::new(self.panel.width, self.panel.height);
        self.compose(&mut canvas, now)?;

        let path = output.or(self.config.preview.path.as_deref());
        let scale = scale.unwrap_or(self.config.preview.scale);
        save_preview(canvas.image(), path, scale).context("Failed to save preview")
    }

    /// Push one frame to the panel: init, clear, compose, present, sleep.
    ///
    /// Returns the device so callers can reuse it for the next refresh.
    pub fn run_device<D: EpdDevice>(&self, device: D, now: DateTime<Utc>) -> Result<D> {
        let mut canvas = EpdCanvas::new(device);
        canvas.init().context("Failed to initialize panel")?;
        self.compose(&mut canvas, now)?;
        canvas.present().context("Failed to present frame")?;
        canvas.sleep().context("Failed to put panel to sleep")?;

        let (device, _) = canvas.into_parts();
        Ok(device)
    }
}

/// Load the icon for the report's sky condition. A missing file is skipped.
fn load_sky_icon(config: &IconConfig, report: &StationReport) -> Result<Option<GrayImage>> {
    let path = config.dir.join(report.sky_condition.icon_file());
    match load_icon(&path, config.scale, config.inverted) {
        Ok(icon) => Ok(Some(icon)),
        Err(EpdError::IconNotFound(missing)) => {
            warn!(path = %missing, "Icon not found, drawing without it");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load icon {:?}", path)),
    }
}
