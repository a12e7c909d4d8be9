//! Weather icon bitmaps.
//!
//! Icons are BMP (or any format `image` decodes) files that get scaled and
//! reduced to one ink before being pasted onto a canvas.

use std::path::Path;

use epd_common::{Color, EpdError, EpdResult, Point};
use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::canvas::Canvas;

/// Load an icon, scale it and binarize it for a 1-bit panel.
///
/// `scale` of 1.0 keeps the original size. With `inverted` black and white
/// swap after thresholding.
pub fn load_icon(path: &Path, scale: f32, inverted: bool) -> EpdResult<GrayImage> {
    if !path.exists() {
        return Err(EpdError::IconNotFound(path.display().to_string()));
    }
    let decoded = image::open(path)
        .map_err(|e| EpdError::ImageError(format!("{}: {}", path.display(), e)))?
        .to_luma8();
    prepare_icon(decoded, scale, inverted)
}

/// Scale and binarize an already decoded icon.
pub fn prepare_icon(icon: GrayImage, scale: f32, inverted: bool) -> EpdResult<GrayImage> {
    if !(scale > 0.0) {
        return Err(EpdError::invalid_argument(
            "scale",
            format!("icon scale must be positive, got {}", scale),
        ));
    }

    let mut icon = if (scale - 1.0).abs() > f32::EPSILON {
        let width = ((icon.width() as f32 * scale) as u32).max(1);
        let height = ((icon.height() as f32 * scale) as u32).max(1);
        imageops::resize(&icon, width, height, FilterType::Lanczos3)
    } else {
        icon
    };

    for pixel in icon.pixels_mut() {
        let mut ink = Color::from_luma(pixel.0[0]);
        if inverted {
            ink = ink.inverted();
        }
        pixel.0[0] = ink.luma();
    }
    Ok(icon)
}

/// Paste an icon onto a canvas at `at`.
pub fn draw_icon<C: Canvas + ?Sized>(canvas: &mut C, at: Point, icon: &GrayImage) -> EpdResult<()> {
    canvas.draw_bitmap(at, icon)
}
