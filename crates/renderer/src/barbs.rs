//! Wind barb glyphs drawn from primitive strokes.
//!
//! A glyph is a staff centered on the station position plus symbols at its
//! outer end: pennants (50 kt), full barbs (10 kt) and a half barb (5 kt).
//! Speeds under 3 kt are drawn as an open calm circle instead.
//!
//! Geometry is computed in floating point by [`layout_wind_barb`] and only
//! rounded to pixels when a [`BarbGlyph`] is emitted, so the same glyph can be
//! drawn onto any [`Canvas`].

use epd_common::{BoundingBox, Color, EpdResult, Point, WindSample};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canvas::Canvas;

/// Staff length at scale 1.0, in pixels.
pub const STAFF_LENGTH: f64 = 40.0;

/// Calm circle radius at scale 1.0.
pub const CALM_RADIUS: f64 = 6.0;

/// Full barb length at scale 1.0. Half barbs are half of this.
pub const BARB_LENGTH: f64 = 15.0;

/// How far a pennant reaches out from the staff at scale 1.0.
pub const PENNANT_WIDTH: f64 = 15.0;

/// Inset from the tip for a glyph made of a lone half barb, at scale 1.0.
pub const HALF_BARB_INSET: f64 = 5.0;

/// Symbol step along the staff as a fraction of its length.
const SPACING_FRACTION: f64 = 0.10;

/// Pennant base along the staff, in symbol steps.
const PENNANT_BASE_STEPS: f64 = 0.8;

/// Cursor advance after a pennant, in symbol steps.
const PENNANT_ADVANCE_STEPS: f64 = 1.2;

/// Style options for barb rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarbStyle {
    /// Linear size multiplier
    pub scale: f64,
    /// Stroke and fill ink
    pub color: Color,
    /// Stroke thickness in pixels
    pub line_width: u32,
    /// Angle between symbols and the staff, counterclockwise positive.
    /// The default puts symbols on the clockwise side, slanted toward the tip.
    pub barb_angle_degrees: f64,
}

impl Default for BarbStyle {
    fn default() -> Self {
        Self {
            scale: 1.0,
            color: Color::Black,
            line_width: 1,
            barb_angle_degrees: -60.0,
        }
    }
}

impl BarbStyle {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// How a speed decomposes into barb symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarbSymbols {
    pub pennants: u32,
    pub full_barbs: u32,
    pub half_barbs: u32,
}

impl BarbSymbols {
    /// Decompose a speed, largest symbols first. Calm speeds have no symbols.
    ///
    /// Speeds above [`MAX_ENCODED_KNOTS`](epd_common::wind::MAX_ENCODED_KNOTS) decompose as that maximum, so the
    /// symbol count is bounded for any input.
    pub fn for_speed(speed_knots: f64) -> Self {
        let encoded = WindSample::new(speed_knots, 0.0).encoded_speed();
        Self {
            pennants: encoded / 50,
            full_barbs: encoded % 50 / 10,
            half_barbs: encoded % 10 / 5,
        }
    }

    /// Speed the symbols encode, in knots.
    pub fn encoded_knots(&self) -> u32 {
        self.pennants * 50 + self.full_barbs * 10 + self.half_barbs * 5
    }

    /// True when the glyph has pennants or full barbs.
    pub fn has_long_symbols(&self) -> bool {
        self.pennants > 0 || self.full_barbs > 0
    }
}

/// A straight stroke in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

/// Pixel geometry of one glyph, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum BarbGlyph {
    Calm {
        bbox: BoundingBox,
    },
    Barb {
        staff: Segment,
        pennants: Vec<[Point; 3]>,
        full_barbs: Vec<Segment>,
        half_barb: Option<Segment>,
    },
}

impl BarbGlyph {
    /// Symbol counts this glyph shows.
    pub fn symbols(&self) -> BarbSymbols {
        match self {
            BarbGlyph::Calm { .. } => BarbSymbols::default(),
            BarbGlyph::Barb {
                pennants,
                full_barbs,
                half_barb,
                ..
            } => BarbSymbols {
                pennants: pennants.len() as u32,
                full_barbs: full_barbs.len() as u32,
                half_barbs: half_barb.is_some() as u32,
            },
        }
    }

    /// Issue the draw calls for this glyph.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, style: &BarbStyle) -> EpdResult<()> {
        match self {
            BarbGlyph::Calm { bbox } => canvas.draw_ellipse(*bbox, style.color, style.line_width),
            BarbGlyph::Barb {
                staff,
                pennants,
                full_barbs,
                half_barb,
            } => {
                canvas.draw_line(staff.from, staff.to, style.color, style.line_width)?;
                for triangle in pennants {
                    canvas.draw_polygon(triangle, style.color)?;
                }
                for barb in full_barbs.iter().chain(half_barb.iter()) {
                    canvas.draw_line(barb.from, barb.to, style.color, style.line_width)?;
                }
                Ok(())
            }
        }
    }
}

/// Unit vector for a math angle (0 = east, counterclockwise) on a y-down screen.
fn screen_direction(angle_rad: f64) -> (f64, f64) {
    (angle_rad.cos(), -angle_rad.sin())
}

/// Compute the glyph for a wind sample centered at `center`.
///
/// Fails with `InvalidArgument` for negative, NaN or infinite speeds.
pub fn layout_wind_barb(
    center: Point,
    sample: &WindSample,
    style: &BarbStyle,
) -> EpdResult<BarbGlyph> {
    sample.validate()?;

    let scale = style.scale;
    let (cx, cy) = (center.x as f64, center.y as f64);

    if sample.is_calm() {
        let r = CALM_RADIUS * scale;
        return Ok(BarbGlyph::Calm {
            bbox: BoundingBox::new(
                (cx - r).round() as i32,
                (cy - r).round() as i32,
                (cx + r).round() as i32,
                (cy + r).round() as i32,
            ),
        });
    }

    // Compass bearing (0 = north, clockwise) to math angle (0 = east,
    // counterclockwise). The tip points toward the bearing the wind comes from.
    let staff_angle = (90.0 - sample.normalized_direction()).to_radians();
    let (sx, sy) = screen_direction(staff_angle);
    let (bx, by) = screen_direction(staff_angle + style.barb_angle_degrees.to_radians());

    let staff_length = STAFF_LENGTH * scale;
    let half = staff_length / 2.0;
    let tip = (cx + sx * half, cy + sy * half);
    let tail = (cx - sx * half, cy - sy * half);

    let spacing = SPACING_FRACTION * staff_length;
    let barb_length = BARB_LENGTH * scale;
    let pennant_width = PENNANT_WIDTH * scale;

    // Position on the staff `d` pixels back from the tip
    let along = |d: f64| (tip.0 - sx * d, tip.1 - sy * d);
    let outward = |p: (f64, f64), len: f64| (p.0 + bx * len, p.1 + by * len);
    let px = |p: (f64, f64)| Point::rounded(p.0, p.1);

    let symbols = BarbSymbols::for_speed(sample.speed_knots);
    let mut cursor = if symbols.has_long_symbols() {
        0.0
    } else {
        HALF_BARB_INSET * scale
    };

    let mut pennants = Vec::with_capacity(symbols.pennants as usize);
    for _ in 0..symbols.pennants {
        let base = along(cursor);
        pennants.push([
            px(base),
            px(outward(base, pennant_width)),
            px(along(cursor + PENNANT_BASE_STEPS * spacing)),
        ]);
        cursor += PENNANT_ADVANCE_STEPS * spacing;
    }

    let mut full_barbs = Vec::with_capacity(symbols.full_barbs as usize);
    for _ in 0..symbols.full_barbs {
        let start = along(cursor);
        full_barbs.push(Segment {
            from: px(start),
            to: px(outward(start, barb_length)),
        });
        cursor += spacing;
    }

    let half_barb = (symbols.half_barbs > 0).then(|| {
        let start = along(cursor);
        Segment {
            from: px(start),
            to: px(outward(start, barb_length / 2.0)),
        }
    });

    Ok(BarbGlyph::Barb {
        staff: Segment {
            from: px(tail),
            to: px(tip),
        },
        pennants,
        full_barbs,
        half_barb,
    })
}

/// Draw a wind barb for `sample` centered at `center`.
///
/// Validation happens before anything is drawn, so a rejected sample leaves
/// the canvas untouched. Glyphs near an edge are not clamped.
pub fn render_wind_barb<C: Canvas + ?Sized>(
    canvas: &mut C,
    center: Point,
    sample: &WindSample,
    style: &BarbStyle,
) -> EpdResult<()> {
    let glyph = layout_wind_barb(center, sample, style)?;
    debug!(
        x = center.x,
        y = center.y,
        speed = sample.speed_knots,
        direction = sample.direction_degrees,
        encoded = glyph.symbols().encoded_knots(),
        "Drawing wind barb"
    );
    glyph.draw(canvas, style)
}
