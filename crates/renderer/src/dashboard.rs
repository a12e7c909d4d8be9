//! Fixed-coordinate dashboard layout.
//!
//! ```text
//! +----------------------------------------------+
//! | KORH                                 39m ago |
//! |                                     +------+ |
//! | VFR                                 | icon | |
//! | Flight Category                     +------+ |
//! |----------------------------------------------|
//! |     \|__          \|__           \|>         |
//! |   270° 15kt     280° 25kt      290° 55kt     |
//! |     SFC           3000           6000        |
//! +----------------------------------------------+
//! ```

use chrono::{DateTime, Utc};
use epd_common::{Color, EpdResult, Point, StationReport};
use image::GrayImage;
use tracing::info;

use crate::barbs::{render_wind_barb, BarbStyle, BARB_LENGTH, STAFF_LENGTH};
use crate::canvas::Canvas;
use crate::icons::draw_icon;
use crate::text::{FontSet, Typeface};

/// Anchor points of the dashboard elements.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLayout {
    pub margin: i32,
    pub station_at: Point,
    pub category_at: Point,
    pub caption_at: Point,
    /// Icon left edge is this far from the right edge of the canvas
    pub icon_inset: i32,
    pub icon_top: i32,
    /// y of the rule above the wind row
    pub rule_y: i32,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            margin: 10,
            station_at: Point::new(10, 10),
            category_at: Point::new(10, 60),
            caption_at: Point::new(10, 90),
            icon_inset: 150,
            icon_top: 60,
            rule_y: 130,
        }
    }
}

/// Draw `text` so its right edge sits `margin` pixels from the canvas edge.
///
/// Returns the y coordinate just below the text.
pub fn right_aligned_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    text: &str,
    y: i32,
    margin: i32,
    font: &Typeface,
    color: Color,
) -> EpdResult<i32> {
    let (text_width, text_height) = canvas.text_size(text, font);
    let x = canvas.width() as i32 - text_width as i32 - margin;
    canvas.draw_text(Point::new(x, y), text, font, color)?;
    Ok(y + text_height as i32)
}

/// Draw `text` horizontally centered on `center_x`. Returns the y below it.
fn centered_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    text: &str,
    center_x: i32,
    y: i32,
    font: &Typeface,
) -> EpdResult<i32> {
    let (text_width, text_height) = canvas.text_size(text, font);
    canvas.draw_text(
        Point::new(center_x - text_width as i32 / 2, y),
        text,
        font,
        Color::Black,
    )?;
    Ok(y + text_height as i32)
}

/// Centers of `count` glyphs spread evenly across `width`.
pub fn wind_row_positions(count: usize, width: u32, y: i32) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let column = width as i32 / count as i32;
    (0..count as i32)
        .map(|i| Point::new(column * i + column / 2, y))
        .collect()
}

/// Vertical center of the wind row for a canvas height.
pub fn wind_row_y(height: u32) -> i32 {
    height as i32 * 5 / 8
}

/// Render the whole dashboard.
///
/// `icon` is the already prepared sky-condition bitmap, if one was found.
pub fn render_dashboard<C: Canvas + ?Sized>(
    canvas: &mut C,
    fonts: &FontSet,
    report: &StationReport,
    icon: Option<&GrayImage>,
    barb_style: &BarbStyle,
    layout: &DashboardLayout,
    now: DateTime<Utc>,
) -> EpdResult<()> {
    let width = canvas.width();

    // Header
    canvas.draw_text(layout.station_at, &report.station_id, &fonts.large, Color::Black)?;
    right_aligned_text(
        canvas,
        &report.age_label(now),
        layout.station_at.y,
        layout.margin,
        &fonts.medium,
        Color::Black,
    )?;

    canvas.draw_text(
        layout.category_at,
        report.flight_category.as_str(),
        &fonts.medium,
        Color::Black,
    )?;
    canvas.draw_text(layout.caption_at, "Flight Category", &fonts.small, Color::Black)?;

    if let Some(icon) = icon {
        let at = Point::new(width as i32 - layout.icon_inset, layout.icon_top);
        draw_icon(canvas, at, icon)?;
    }

    canvas.draw_line(
        Point::new(layout.margin, layout.rule_y),
        Point::new(width as i32 - layout.margin, layout.rule_y),
        Color::Black,
        1,
    )?;

    // Wind row
    let row_y = wind_row_y(canvas.height());
    let reach = ((STAFF_LENGTH / 2.0 + BARB_LENGTH) * barb_style.scale).round() as i32;
    let positions = wind_row_positions(report.winds.len(), width, row_y);
    for (reading, center) in report.winds.iter().zip(positions) {
        render_wind_barb(canvas, center, &reading.sample, barb_style)?;
        let below = centered_text(
            canvas,
            &reading.sample.label(),
            center.x,
            center.y + reach + 8,
            &fonts.medium,
        )?;
        centered_text(canvas, &reading.label, center.x, below + 2, &fonts.small)?;
    }

    info!(
        station = %report.station_id,
        winds = report.winds.len(),
        icon = icon.is_some(),
        "Dashboard composed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_row_positions_even() {
        let positions = wind_row_positions(3, 600, 300);
        assert_eq!(
            positions,
            vec![Point::new(100, 300), Point::new(300, 300), Point::new(500, 300)]
        );
    }

    #[test]
    fn test_wind_row_positions_empty() {
        assert!(wind_row_positions(0, 800, 10).is_empty());
    }

    #[test]
    fn test_wind_row_y() {
        assert_eq!(wind_row_y(480), 300);
        assert_eq!(wind_row_y(300), 187);
    }

    #[test]
    fn test_default_layout_matches_panel_header() {
        let layout = DashboardLayout::default();
        assert_eq!(layout.station_at, Point::new(10, 10));
        assert_eq!(layout.category_at, Point::new(10, 60));
        assert_eq!(layout.caption_at, Point::new(10, 90));
    }
}
