//! Drawing surface abstraction.
//!
//! Everything the dashboard draws goes through [`Canvas`]. Two surfaces live
//! in this crate:
//! - [`MonoCanvas`](crate::raster::MonoCanvas): an in-memory 1-ink raster used
//!   for previews and as the backing store of the panel canvas
//! - [`RecordingCanvas`]: keeps the primitive calls instead of pixels, so
//!   glyph geometry can be checked without rasterizing
//!
//! The hardware-backed surface lives in the `epd-driver` crate.

use epd_common::{BoundingBox, Color, EpdResult, Point};
use image::GrayImage;

use crate::text::Typeface;

/// A fixed-size monochrome drawing surface.
///
/// Coordinates are pixels with the origin in the top-left corner. Shapes that
/// fall partly outside the surface are clipped, never rejected.
pub trait Canvas {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Stroke a straight segment `width` pixels thick.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32) -> EpdResult<()>;

    /// Fill a closed polygon. The closing edge is implicit.
    fn draw_polygon(&mut self, points: &[Point], fill: Color) -> EpdResult<()>;

    /// Outline the ellipse inscribed in `bbox`.
    fn draw_ellipse(&mut self, bbox: BoundingBox, outline: Color, width: u32) -> EpdResult<()>;

    /// Draw `text` with its top-left corner at `at`.
    fn draw_text(&mut self, at: Point, text: &str, font: &Typeface, color: Color)
        -> EpdResult<()>;

    /// Paste a bitmap with its top-left corner at `at`, replacing what is below.
    fn draw_bitmap(&mut self, at: Point, bitmap: &GrayImage) -> EpdResult<()>;

    /// Size of the box `text` occupies when drawn with `font`.
    fn text_size(&self, text: &str, font: &Typeface) -> (u32, u32) {
        font.measure(text)
    }
}

/// A primitive call captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: u32,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Ellipse {
        bbox: BoundingBox,
        outline: Color,
        width: u32,
    },
    Text {
        at: Point,
        text: String,
        size: f32,
        color: Color,
    },
    Bitmap {
        at: Point,
        width: u32,
        height: u32,
    },
}

/// Canvas that records draw calls in order.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Line endpoints in draw order.
    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn polygons(&self) -> Vec<&[Point]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Polygon { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn ellipses(&self) -> Vec<BoundingBox> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Ellipse { bbox, .. } => Some(*bbox),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(Point, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { at, text, .. } => Some((*at, text.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32) -> EpdResult<()> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[Point], fill: Color) -> EpdResult<()> {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
        });
        Ok(())
    }

    fn draw_ellipse(&mut self, bbox: BoundingBox, outline: Color, width: u32) -> EpdResult<()> {
        self.commands.push(DrawCommand::Ellipse {
            bbox,
            outline,
            width,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        at: Point,
        text: &str,
        font: &Typeface,
        color: Color,
    ) -> EpdResult<()> {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            size: font.size(),
            color,
        });
        Ok(())
    }

    fn draw_bitmap(&mut self, at: Point, bitmap: &GrayImage) -> EpdResult<()> {
        self.commands.push(DrawCommand::Bitmap {
            at,
            width: bitmap.width(),
            height: bitmap.height(),
        });
        Ok(())
    }
}
