//! Canvas backed by a panel device.

use epd_common::{BoundingBox, Color, EpdResult, Point};
use image::GrayImage;
use renderer::canvas::Canvas;
use renderer::raster::MonoCanvas;
use renderer::text::Typeface;
use tracing::info;

use crate::device::EpdDevice;

/// Draws into a panel-sized raster and pushes it to the device on
/// [`EpdCanvas::present`].
pub struct EpdCanvas<D: EpdDevice> {
    device: D,
    raster: MonoCanvas,
}

impl<D: EpdDevice> EpdCanvas<D> {
    pub fn new(device: D) -> Self {
        let panel = device.panel();
        Self {
            device,
            raster: MonoCanvas::new(panel.width, panel.height),
        }
    }

    /// Wake the panel and blank both it and the raster.
    pub fn init(&mut self) -> EpdResult<()> {
        self.device.init()?;
        self.device.clear()?;
        self.raster.clear(Color::White);
        Ok(())
    }

    /// Pack the raster and show it on the panel.
    pub fn present(&mut self) -> EpdResult<()> {
        let frame = self.device.getbuffer(self.raster.image())?;
        self.device.display(&frame)?;
        info!(
            panel = self.device.panel().name,
            ink = self.raster.count(Color::Black),
            "Frame presented"
        );
        Ok(())
    }

    pub fn sleep(&mut self) -> EpdResult<()> {
        self.device.sleep()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn raster(&self) -> &MonoCanvas {
        &self.raster
    }

    pub fn into_parts(self) -> (D, MonoCanvas) {
        (self.device, self.raster)
    }
}

impl<D: EpdDevice> Canvas for EpdCanvas<D> {
    fn width(&self) -> u32 {
        self.raster.width()
    }

    fn height(&self) -> u32 {
        self.raster.height()
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32) -> EpdResult<()> {
        self.raster.draw_line(from, to, color, width)
    }

    fn draw_polygon(&mut self, points: &[Point], fill: Color) -> EpdResult<()> {
        self.raster.draw_polygon(points, fill)
    }

    fn draw_ellipse(&mut self, bbox: BoundingBox, outline: Color, width: u32) -> EpdResult<()> {
        self.raster.draw_ellipse(bbox, outline, width)
    }

    fn draw_text(&mut self, at: Point, text: &str, font: &Typeface, color: Color) -> EpdResult<()> {
        self.raster.draw_text(at, text, font, color)
    }

    fn draw_bitmap(&mut self, at: Point, bitmap: &GrayImage) -> EpdResult<()> {
        self.raster.draw_bitmap(at, bitmap)
    }
}
