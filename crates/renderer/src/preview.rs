//! Preview export of panel frames.
//!
//! Converts a monochrome frame to RGB with a slightly warm paper tone so it
//! looks like the panel, optionally upscales it, and writes a PNG.

use std::path::{Path, PathBuf};

use chrono::Local;
use epd_common::{EpdError, EpdResult};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbImage};
use rayon::prelude::*;
use tracing::info;

use crate::png::encode_rgb_auto;

/// Paper tone used for white pixels.
pub const PAPER_TONE: [u8; 3] = [245, 245, 240];

/// Channels above this count as white when tinting.
const WHITE_CUTOFF: u8 = 200;

/// Default preview scale factor.
pub const DEFAULT_PREVIEW_SCALE: u32 = 2;

/// Timestamped file name for previews written without an explicit path.
pub fn default_preview_name() -> String {
    format!("eink_preview_{}.png", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Build the RGB preview of a frame without touching the filesystem.
pub fn preview_image(frame: &GrayImage, scale: u32) -> EpdResult<RgbImage> {
    if scale == 0 {
        return Err(EpdError::invalid_argument("scale", "preview scale must be at least 1"));
    }

    let mut rgb = DynamicImage::ImageLuma8(frame.clone()).to_rgb8();
    rgb.par_chunks_mut(3).for_each(|px| {
        if px.iter().all(|&c| c > WHITE_CUTOFF) {
            px.copy_from_slice(&PAPER_TONE);
        }
    });

    if scale != 1 {
        let (width, height) = rgb.dimensions();
        rgb = imageops::resize(&rgb, width * scale, height * scale, FilterType::Lanczos3);
    }
    Ok(rgb)
}

/// Write a preview PNG and return where it went.
///
/// Without `path` a timestamped name in the working directory is used.
/// Parent directories are created as needed.
pub fn save_preview(frame: &GrayImage, path: Option<&Path>, scale: u32) -> EpdResult<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(default_preview_name()),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let rgb = preview_image(frame, scale)?;
    let png = encode_rgb_auto(&rgb)?;
    std::fs::write(&path, &png)?;

    info!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        bytes = png.len(),
        "Preview saved"
    );
    Ok(path)
}
