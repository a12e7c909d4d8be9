//! PNG encoding for preview images.
//!
//! Two encodings:
//! - **Indexed (color type 3)** when the image has at most 256 colors. An
//!   unscaled panel preview only has two, so this is the common path.
//! - **RGB (color type 2)** otherwise, e.g. after Lanczos upscaling blends
//!   the edges.

use std::collections::HashMap;
use std::io::Write;

use epd_common::{EpdError, EpdResult};
use image::RgbImage;

/// PNG file signature
const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG
const MAX_PALETTE_SIZE: usize = 256;

/// Encode an RGB image, picking indexed output when the palette fits.
pub fn encode_rgb_auto(image: &RgbImage) -> EpdResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    match extract_palette(image.as_raw()) {
        Some((palette, indices)) => encode_indexed(width, height, &palette, &indices),
        None => encode_rgb(image),
    }
}

#[inline(always)]
fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16)
}

/// Map each pixel to a palette slot, `None` once more than 256 colors show up.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<[u8; 3]>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(16);
    let mut palette: Vec<[u8; 3]> = Vec::with_capacity(16);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 3);

    for chunk in pixels.chunks_exact(3) {
        let packed = pack_rgb(chunk[0], chunk[1], chunk[2]);
        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push([chunk[0], chunk[1], chunk[2]]);
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Indexed PNG from a palette and one index byte per pixel.
pub fn encode_indexed(
    width: u32,
    height: u32,
    palette: &[[u8; 3]],
    indices: &[u8],
) -> EpdResult<Vec<u8>> {
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(EpdError::EncodeError(format!(
            "palette must have 1..=256 entries, got {}",
            palette.len()
        )));
    }
    let expected = width as usize * height as usize;
    if indices.len() != expected {
        return Err(EpdError::EncodeError(format!(
            "expected {} indices, got {}",
            expected,
            indices.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let plte: Vec<u8> = palette.iter().flatten().copied().collect();
    write_chunk(&mut png, b"PLTE", &plte);

    let idat = deflate_scanlines(indices, width as usize, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Truecolor PNG (8 bits per channel, no alpha).
pub fn encode_rgb(image: &RgbImage) -> EpdResult<Vec<u8>> {
    let (width, height) = image.dimensions();

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 2));

    let idat = deflate_scanlines(image.as_raw(), width as usize * 3, height as usize)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn ihdr(width: u32, height: u32, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each row with filter type 0 and zlib-compress the result.
fn deflate_scanlines(data: &[u8], row_bytes: usize, rows: usize) -> EpdResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(rows * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes.max(1)).take(rows) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(&uncompressed)
        .map_err(|e| EpdError::EncodeError(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| EpdError::EncodeError(format!("IDAT compression failed: {}", e)))
}
