//! Wind observations.

use serde::{Deserialize, Serialize};

use crate::error::{EpdError, EpdResult};

/// Speeds below this are drawn as a calm circle.
pub const CALM_THRESHOLD_KNOTS: f64 = 3.0;

/// Highest speed a barb encodes; faster winds draw as this.
pub const MAX_ENCODED_KNOTS: f64 = 300.0;

/// A single wind observation.
///
/// `direction_degrees` is the compass bearing the wind blows FROM
/// (0 = north, 90 = east). Any real value is accepted and normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    pub speed_knots: f64,
    pub direction_degrees: f64,
}

impl WindSample {
    pub fn new(speed_knots: f64, direction_degrees: f64) -> Self {
        Self {
            speed_knots,
            direction_degrees,
        }
    }

    /// Reject speeds that cannot be encoded (negative, NaN or infinite).
    pub fn validate(&self) -> EpdResult<()> {
        if !self.speed_knots.is_finite() || self.speed_knots < 0.0 {
            return Err(EpdError::invalid_argument(
                "speed_knots",
                format!("must be a finite non-negative number, got {}", self.speed_knots),
            ));
        }
        Ok(())
    }

    pub fn is_calm(&self) -> bool {
        self.speed_knots < CALM_THRESHOLD_KNOTS
    }

    /// Direction folded into [0, 360).
    pub fn normalized_direction(&self) -> f64 {
        let d = self.direction_degrees.rem_euclid(360.0);
        // rem_euclid can return 360.0 for tiny negative inputs
        if d >= 360.0 {
            0.0
        } else {
            d
        }
    }

    /// Speed rounded down to the 5 knot resolution a barb can show,
    /// capped at [`MAX_ENCODED_KNOTS`].
    pub fn encoded_speed(&self) -> u32 {
        if !(self.speed_knots >= CALM_THRESHOLD_KNOTS) {
            return 0;
        }
        let capped = self.speed_knots.min(MAX_ENCODED_KNOTS);
        (capped / 5.0).floor() as u32 * 5
    }

    /// Short human readable form, e.g. `270° 15kt` or `Calm`.
    pub fn label(&self) -> String {
        if self.is_calm() {
            "Calm".to_string()
        } else {
            format!(
                "{:03.0}° {:.0}kt",
                self.normalized_direction(),
                self.speed_knots
            )
        }
    }
}
