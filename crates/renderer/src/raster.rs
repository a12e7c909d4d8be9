//! In-memory monochrome raster.
//!
//! Pixels hold luma 0 (black) or 255 (white) only. Antialiased primitives from
//! `imageproc` are thresholded on the way in so the raster never picks up
//! gray levels a 1-bit panel cannot show.

use epd_common::{BoundingBox, Color, EpdResult, Point};
use image::{GrayImage, Luma};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_ellipse_mut, draw_line_segment_mut, draw_polygon_mut,
    draw_text_mut,
};
use imageproc::point::Point as PolyPoint;

use crate::canvas::Canvas;
use crate::text::Typeface;

/// Coverage at or above this turns a text pixel on.
const TEXT_COVERAGE_THRESHOLD: u8 = 128;

/// Monochrome raster canvas backed by a `GrayImage`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoCanvas {
    image: GrayImage,
}

impl MonoCanvas {
    /// Blank (white) canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([Color::White.luma()])),
        }
    }

    /// Wrap an existing image, binarizing every pixel.
    pub fn from_image(mut image: GrayImage) -> Self {
        for pixel in image.pixels_mut() {
            pixel.0[0] = Color::from_luma(pixel.0[0]).luma();
        }
        Self { image }
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    /// Fill the whole raster with one ink.
    pub fn clear(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            pixel.0[0] = color.luma();
        }
    }

    /// Ink at a position, `None` outside the raster.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
            return None;
        }
        Some(Color::from_luma(self.image.get_pixel(x as u32, y as u32).0[0]))
    }

    /// Number of pixels of the given ink.
    pub fn count(&self, color: Color) -> usize {
        self.image
            .pixels()
            .filter(|p| Color::from_luma(p.0[0]) == color)
            .count()
    }

    fn set(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
        {
            self.image.put_pixel(x as u32, y as u32, Luma([color.luma()]));
        }
    }
}

impl Canvas for MonoCanvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32) -> EpdResult<()> {
        let ink = Luma([color.luma()]);
        let start = (from.x as f32, from.y as f32);
        let end = (to.x as f32, to.y as f32);

        if width <= 1 {
            draw_line_segment_mut(&mut self.image, start, end, ink);
            return Ok(());
        }

        let half = width as f32 / 2.0;
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let len = dx.hypot(dy);
        if len == 0.0 {
            draw_filled_circle_mut(&mut self.image, (from.x, from.y), (half as i32).max(1), ink);
            return Ok(());
        }

        // Thick strokes are the rectangle around the centerline
        let (nx, ny) = (-dy / len * half, dx / len * half);
        let quad = [
            PolyPoint::new((start.0 + nx).round() as i32, (start.1 + ny).round() as i32),
            PolyPoint::new((end.0 + nx).round() as i32, (end.1 + ny).round() as i32),
            PolyPoint::new((end.0 - nx).round() as i32, (end.1 - ny).round() as i32),
            PolyPoint::new((start.0 - nx).round() as i32, (start.1 - ny).round() as i32),
        ];
        draw_polygon_mut(&mut self.image, &quad, ink);
        draw_line_segment_mut(&mut self.image, start, end, ink);
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[Point], fill: Color) -> EpdResult<()> {
        let mut poly: Vec<PolyPoint<i32>> = Vec::with_capacity(points.len());
        for p in points {
            let next = PolyPoint::new(p.x, p.y);
            if poly.last() != Some(&next) {
                poly.push(next);
            }
        }
        // imageproc wants an open ring
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }

        match poly.len() {
            0 => {}
            1 => self.set(poly[0].x, poly[0].y, fill),
            2 => draw_line_segment_mut(
                &mut self.image,
                (poly[0].x as f32, poly[0].y as f32),
                (poly[1].x as f32, poly[1].y as f32),
                Luma([fill.luma()]),
            ),
            _ => draw_polygon_mut(&mut self.image, &poly, Luma([fill.luma()])),
        }
        Ok(())
    }

    fn draw_ellipse(&mut self, bbox: BoundingBox, outline: Color, width: u32) -> EpdResult<()> {
        let center = bbox.center();
        let rx = bbox.width() / 2;
        let ry = bbox.height() / 2;
        let ink = Luma([outline.luma()]);

        if rx <= 0 || ry <= 0 {
            self.set(center.x, center.y, outline);
            return Ok(());
        }

        // Each ring is one pixel, rings grow inward
        for inset in 0..width.max(1) as i32 {
            let (wr, hr) = (rx - inset, ry - inset);
            if wr <= 0 || hr <= 0 {
                break;
            }
            draw_hollow_ellipse_mut(&mut self.image, (center.x, center.y), wr, hr, ink);
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        at: Point,
        text: &str,
        font: &Typeface,
        color: Color,
    ) -> EpdResult<()> {
        let (w, h) = font.measure(text);
        if w == 0 || h == 0 {
            return Ok(());
        }

        // Render coverage into a mask, then threshold it onto the raster
        let mut mask = GrayImage::new(w, h);
        draw_text_mut(&mut mask, Luma([255u8]), 0, 0, font.scale(), font.font(), text);

        for (x, y, coverage) in mask.enumerate_pixels() {
            if coverage.0[0] >= TEXT_COVERAGE_THRESHOLD {
                self.set(at.x + x as i32, at.y + y as i32, color);
            }
        }
        Ok(())
    }

    fn draw_bitmap(&mut self, at: Point, bitmap: &GrayImage) -> EpdResult<()> {
        for (x, y, pixel) in bitmap.enumerate_pixels() {
            self.set(at.x + x as i32, at.y + y as i32, Color::from_luma(pixel.0[0]));
        }
        Ok(())
    }
}
