//! 1-bit frame packing.
//!
//! Layout: rows top to bottom, `ceil(width / 8)` bytes per row, most
//! significant bit first. A set bit is black ink.

use epd_common::{Color, EpdError, EpdResult};
use image::{imageops, GrayImage, Luma};

use crate::panel::Panel;

/// Pack a raster for `panel`.
///
/// The raster must be the panel size, or the transposed size for a panel
/// mounted in portrait; portrait rasters are rotated 90° counterclockwise
/// first. Pixels darker than mid-gray become ink.
pub fn pack_frame(panel: &Panel, image: &GrayImage) -> EpdResult<Vec<u8>> {
    let dimensions = image.dimensions();
    let rotated;
    let source = if dimensions == (panel.width, panel.height) {
        image
    } else if dimensions == (panel.height, panel.width) {
        rotated = imageops::rotate270(image);
        &rotated
    } else {
        return Err(EpdError::FrameSizeMismatch {
            expected_width: panel.width,
            expected_height: panel.height,
            actual_width: dimensions.0,
            actual_height: dimensions.1,
        });
    };

    let stride = panel.row_stride();
    let mut buffer = vec![0u8; panel.buffer_len()];
    for (x, y, pixel) in source.enumerate_pixels() {
        if Color::from_luma(pixel.0[0]) == Color::Black {
            buffer[y as usize * stride + x as usize / 8] |= 0x80 >> (x % 8);
        }
    }
    Ok(buffer)
}

/// Expand a packed frame back into a raster of the panel size.
pub fn unpack_frame(panel: &Panel, frame: &[u8]) -> EpdResult<GrayImage> {
    if frame.len() != panel.buffer_len() {
        return Err(EpdError::DisplayError(format!(
            "Frame is {} bytes, panel {} expects {}",
            frame.len(),
            panel.name,
            panel.buffer_len()
        )));
    }

    let stride = panel.row_stride();
    Ok(GrayImage::from_fn(panel.width, panel.height, |x, y| {
        let byte = frame[y as usize * stride + x as usize / 8];
        let ink = if byte & (0x80 >> (x % 8)) != 0 {
            Color::Black
        } else {
            Color::White
        };
        Luma([ink.luma()])
    }))
}
