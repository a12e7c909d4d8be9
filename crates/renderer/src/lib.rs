//! Rendering for the e-paper weather dashboard.
//!
//! - Canvas trait with an in-memory raster and a recording surface
//! - Wind barb glyphs
//! - Fonts, icons and the fixed dashboard layout
//! - PNG previews of panel frames

pub mod barbs;
pub mod canvas;
pub mod dashboard;
pub mod icons;
pub mod png;
pub mod preview;
pub mod raster;
pub mod text;

pub use barbs::{layout_wind_barb, render_wind_barb, BarbGlyph, BarbStyle, BarbSymbols};
pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use dashboard::{render_dashboard, DashboardLayout};
pub use raster::MonoCanvas;
pub use text::{FontSet, FontSizes, Typeface};
