//! Common types shared across the e-paper dashboard crates.

pub mod color;
pub mod error;
pub mod geometry;
pub mod station;
pub mod wind;

pub use color::Color;
pub use error::{EpdError, EpdResult};
pub use geometry::{BoundingBox, Point};
pub use station::{FlightCategory, SkyCondition, StationReport, WindReading};
pub use wind::WindSample;
