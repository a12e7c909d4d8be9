//! Monochrome ink colors.

use serde::{Deserialize, Serialize};

/// One of the two inks an e-paper panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Black,
    White,
}

impl Color {
    /// 8-bit luma value (0 = black, 255 = white).
    pub fn luma(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 255,
        }
    }

    /// Classify a luma value, anything darker than mid-gray is black.
    pub fn from_luma(value: u8) -> Self {
        if value < 128 {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_roundtrip() {
        assert_eq!(Color::from_luma(Color::Black.luma()), Color::Black);
        assert_eq!(Color::from_luma(Color::White.luma()), Color::White);
    }

    #[test]
    fn test_from_luma_threshold() {
        assert_eq!(Color::from_luma(127), Color::Black);
        assert_eq!(Color::from_luma(128), Color::White);
    }

    #[test]
    fn test_inverted() {
        assert_eq!(Color::Black.inverted(), Color::White);
        assert_eq!(Color::White.inverted().inverted(), Color::White);
    }
}
