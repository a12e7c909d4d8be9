//! Station observation shown on the dashboard.
//!
//! Observations are stubbed from configuration; nothing here fetches data.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::wind::WindSample;

/// Aviation flight category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightCategory {
    #[default]
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
}

impl FlightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
        }
    }
}

/// Sky condition, selects the icon drawn in the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyCondition {
    Clear,
    Few,
    Scattered,
    #[default]
    Broken,
    Overcast,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
}

impl SkyCondition {
    /// Bitmap file name inside the icon directory.
    pub fn icon_file(&self) -> &'static str {
        match self {
            SkyCondition::Clear => "wi-day-sunny.bmp",
            SkyCondition::Few => "wi-day-sunny-overcast.bmp",
            SkyCondition::Scattered => "wi-day-cloudy.bmp",
            SkyCondition::Broken => "wi-cloud_1.bmp",
            SkyCondition::Overcast => "wi-cloudy.bmp",
            SkyCondition::Rain => "wi-rain.bmp",
            SkyCondition::Snow => "wi-snow.bmp",
            SkyCondition::Thunderstorm => "wi-thunderstorm.bmp",
            SkyCondition::Fog => "wi-fog.bmp",
        }
    }
}

/// A labelled wind sample, e.g. surface or a level aloft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindReading {
    pub label: String,
    #[serde(flatten)]
    pub sample: WindSample,
}

impl WindReading {
    pub fn new(label: impl Into<String>, speed_knots: f64, direction_degrees: f64) -> Self {
        Self {
            label: label.into(),
            sample: WindSample::new(speed_knots, direction_degrees),
        }
    }
}

/// Everything the dashboard shows for one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReport {
    pub station_id: String,
    pub observed_at: DateTime<Utc>,
    #[serde(default)]
    pub flight_category: FlightCategory,
    #[serde(default)]
    pub sky_condition: SkyCondition,
    #[serde(default)]
    pub winds: Vec<WindReading>,
}

impl StationReport {
    /// Stub observation used when no station is configured.
    pub fn stub(now: DateTime<Utc>) -> Self {
        Self {
            station_id: "KORH".to_string(),
            observed_at: now - Duration::minutes(39),
            flight_category: FlightCategory::Vfr,
            sky_condition: SkyCondition::Broken,
            winds: vec![
                WindReading::new("SFC", 15.0, 270.0),
                WindReading::new("3000", 25.0, 280.0),
                WindReading::new("6000", 55.0, 290.0),
            ],
        }
    }

    /// Observation age relative to `now`, e.g. `39m ago`.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        format_age(now - self.observed_at)
    }
}

/// Format an elapsed duration the way the header shows it.
pub fn format_age(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 48 * 60 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (24 * 60))
    }
}
