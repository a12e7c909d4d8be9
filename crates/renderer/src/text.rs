//! TrueType fonts for dashboard text.
//!
//! Fonts are loaded once at startup and handed to the layout code; nothing in
//! this crate caches fonts globally.

use std::fmt;
use std::path::Path;

use epd_common::{EpdError, EpdResult};
use rusttype::{point, Font, Scale};
use serde::{Deserialize, Serialize};

/// A font at a fixed pixel size.
#[derive(Clone)]
pub struct Typeface {
    font: Font<'static>,
    size: f32,
}

impl Typeface {
    /// Parse font data (TTF, OTF or the first face of a TTC).
    pub fn from_bytes(data: Vec<u8>, size: f32) -> EpdResult<Self> {
        if !(size > 0.0) {
            return Err(EpdError::invalid_argument(
                "size",
                format!("font size must be positive, got {}", size),
            ));
        }
        let font = Font::try_from_vec(data)
            .ok_or_else(|| EpdError::FontError("unrecognized font data".to_string()))?;
        Ok(Self { font, size })
    }

    pub fn from_file(path: &Path, size: f32) -> EpdResult<Self> {
        let data = std::fs::read(path)
            .map_err(|e| EpdError::FontError(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data, size)
    }

    /// Same face at another size. The font data is shared, not copied.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            font: self.font.clone(),
            size,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn scale(&self) -> Scale {
        Scale::uniform(self.size)
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }

    /// Width and height of the box `text` occupies.
    ///
    /// Width follows glyph advances, height is ascent to descent.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let scale = self.scale();
        let v_metrics = self.font.v_metrics(scale);
        let width = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let height = v_metrics.ascent - v_metrics.descent;
        (width.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
    }
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeface")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Pixel sizes of the three dashboard text styles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub large: f32,
    pub medium: f32,
    pub small: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            large: 35.0,
            medium: 24.0,
            small: 18.0,
        }
    }
}

/// The faces the dashboard layout uses.
#[derive(Debug, Clone)]
pub struct FontSet {
    /// Station identifier
    pub large: Typeface,
    /// Observation age, flight category, wind values
    pub medium: Typeface,
    /// Captions
    pub small: Typeface,
}

impl FontSet {
    /// Build all three sizes from one face.
    pub fn from_typeface(face: &Typeface, sizes: FontSizes) -> Self {
        Self {
            large: face.with_size(sizes.large),
            medium: face.with_size(sizes.medium),
            small: face.with_size(sizes.small),
        }
    }

    /// Read a font file once and derive all sizes from it.
    pub fn load(path: &Path, sizes: FontSizes) -> EpdResult<Self> {
        let face = Typeface::from_file(path, sizes.large)?;
        tracing::debug!(path = %path.display(), ?sizes, "Loaded dashboard font");
        Ok(Self::from_typeface(&face, sizes))
    }
}
