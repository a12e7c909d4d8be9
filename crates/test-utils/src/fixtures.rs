//! Common fixtures for barb and panel tests.

/// Expected symbol counts for a wind speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarbCase {
    pub speed_knots: f64,
    pub pennants: u32,
    pub full_barbs: u32,
    pub half_barbs: u32,
}

impl BarbCase {
    const fn new(speed_knots: f64, pennants: u32, full_barbs: u32, half_barbs: u32) -> Self {
        Self {
            speed_knots,
            pennants,
            full_barbs,
            half_barbs,
        }
    }

    /// Knots the symbols encode.
    pub fn encoded_knots(&self) -> u32 {
        self.pennants * 50 + self.full_barbs * 10 + self.half_barbs * 5
    }
}

/// Speeds that decompose into symbols, with their expected counts.
pub const BARB_CASES: &[BarbCase] = &[
    BarbCase::new(3.0, 0, 0, 0),
    BarbCase::new(4.9, 0, 0, 0),
    BarbCase::new(5.0, 0, 0, 1),
    BarbCase::new(7.0, 0, 0, 1),
    BarbCase::new(9.99, 0, 0, 1),
    BarbCase::new(10.0, 0, 1, 0),
    BarbCase::new(15.0, 0, 1, 1),
    BarbCase::new(25.0, 0, 2, 1),
    BarbCase::new(49.0, 0, 4, 1),
    BarbCase::new(50.0, 1, 0, 0),
    BarbCase::new(52.0, 1, 0, 0),
    BarbCase::new(67.0, 1, 1, 1),
    BarbCase::new(105.0, 2, 0, 1),
    BarbCase::new(148.0, 2, 4, 1),
];

/// Speeds drawn as a calm circle.
pub const CALM_SPEEDS: &[f64] = &[0.0, 0.5, 1.0, 2.0, 2.99];

/// Compass bearings covering every octant plus out-of-range values.
pub const DIRECTIONS: &[f64] = &[0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0, 359.9, 450.0, -90.0];

/// Panel resolutions (width, height).
pub mod panels {
    pub const EPD_7IN5_V2: (u32, u32) = (800, 480);
    pub const EPD_7IN5: (u32, u32) = (640, 384);
    pub const EPD_4IN2: (u32, u32) = (400, 300);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_encode_floor_to_five() {
        for case in BARB_CASES {
            let expected = ((case.speed_knots / 5.0).floor() * 5.0) as u32;
            assert_eq!(case.encoded_knots(), expected, "case {:?}", case);
        }
    }
}
