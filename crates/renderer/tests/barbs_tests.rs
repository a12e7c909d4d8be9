//! Tests for wind barb rendering.

use epd_common::{Color, EpdError, Point, WindSample};
use renderer::barbs::{
    layout_wind_barb, render_wind_barb, BarbGlyph, BarbStyle, BarbSymbols, BARB_LENGTH,
    STAFF_LENGTH,
};
use renderer::canvas::{Canvas, DrawCommand, RecordingCanvas};
use renderer::raster::MonoCanvas;
use test_utils::{assert_approx_eq, BARB_CASES, CALM_SPEEDS, DIRECTIONS};

const CENTER: Point = Point::new(200, 150);

fn record(speed: f64, direction: f64, style: &BarbStyle) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::new(400, 300);
    render_wind_barb(&mut canvas, CENTER, &WindSample::new(speed, direction), style)
        .expect("render should succeed");
    canvas
}

fn barb_parts(speed: f64, direction: f64, style: &BarbStyle) -> BarbGlyph {
    layout_wind_barb(CENTER, &WindSample::new(speed, direction), style).unwrap()
}

/// Angle of a segment in math convention (0 = east, counterclockwise), degrees in [0, 360).
fn math_angle(from: Point, to: Point) -> f64 {
    let dx = (to.x - from.x) as f64;
    let dy = (from.y - to.y) as f64;
    dy.atan2(dx).to_degrees().rem_euclid(360.0)
}

fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

// ============================================================================
// Calm wind
// ============================================================================

#[test]
fn test_calm_draws_single_ellipse() {
    for &speed in CALM_SPEEDS {
        for &direction in DIRECTIONS {
            let canvas = record(speed, direction, &BarbStyle::default());
            assert_eq!(canvas.ellipses().len(), 1, "speed {}", speed);
            assert!(canvas.lines().is_empty(), "speed {}", speed);
            assert!(canvas.polygons().is_empty(), "speed {}", speed);
        }
    }
}

#[test]
fn test_calm_radius_scales() {
    for scale in [1.0, 2.0, 0.5] {
        let canvas = record(1.0, 0.0, &BarbStyle::default().with_scale(scale));
        let bbox = canvas.ellipses()[0];
        assert_approx_eq!(bbox.width() as f64 / 2.0, 6.0 * scale, 0.5);
        assert_approx_eq!(bbox.height() as f64 / 2.0, 6.0 * scale, 0.5);
        assert_eq!(bbox.center(), CENTER);
    }
}

#[test]
fn test_calm_is_outline_with_style() {
    let style = BarbStyle {
        line_width: 3,
        color: Color::White,
        ..BarbStyle::default()
    };
    let canvas = record(0.0, 0.0, &style);
    match &canvas.commands()[0] {
        DrawCommand::Ellipse { outline, width, .. } => {
            assert_eq!(*outline, Color::White);
            assert_eq!(*width, 3);
        }
        other => panic!("expected ellipse, got {:?}", other),
    }
}

// ============================================================================
// Staff
// ============================================================================

#[test]
fn test_staff_length_and_angle() {
    for scale in [1.0, 1.5, 2.0] {
        for &direction in DIRECTIONS {
            let canvas = record(15.0, direction, &BarbStyle::default().with_scale(scale));
            let (from, to) = canvas.lines()[0];

            assert_approx_eq!(from.distance(to), STAFF_LENGTH * scale, 1.5);

            let expected = (90.0 - direction).rem_euclid(360.0);
            let actual = math_angle(from, to);
            assert!(
                angle_diff(actual, expected) < 3.0,
                "direction {}: staff angle {} expected {}",
                direction,
                actual,
                expected
            );
        }
    }
}

#[test]
fn test_staff_is_centered() {
    for &direction in DIRECTIONS {
        let canvas = record(25.0, direction, &BarbStyle::default());
        let (from, to) = canvas.lines()[0];
        assert!((from.x + to.x - 2 * CENTER.x).abs() <= 1);
        assert!((from.y + to.y - 2 * CENTER.y).abs() <= 1);
    }
}

#[test]
fn test_exactly_one_staff_without_symbols() {
    // 3..5 knots encodes to zero: bare staff
    let canvas = record(4.0, 120.0, &BarbStyle::default());
    assert_eq!(canvas.lines().len(), 1);
    assert!(canvas.polygons().is_empty());
    assert!(canvas.ellipses().is_empty());
}

#[test]
fn test_staff_drawn_first_with_style() {
    let style = BarbStyle {
        line_width: 2,
        ..BarbStyle::default()
    };
    let canvas = record(67.0, 45.0, &style);
    match &canvas.commands()[0] {
        DrawCommand::Line { width, color, .. } => {
            assert_eq!(*width, 2);
            assert_eq!(*color, Color::Black);
        }
        other => panic!("expected staff line first, got {:?}", other),
    }
}

// ============================================================================
// Symbol decomposition
// ============================================================================

#[test]
fn test_symbol_count_law() {
    for case in BARB_CASES {
        let symbols = BarbSymbols::for_speed(case.speed_knots);
        assert_eq!(symbols.pennants, case.pennants, "speed {}", case.speed_knots);
        assert_eq!(symbols.full_barbs, case.full_barbs, "speed {}", case.speed_knots);
        assert_eq!(symbols.half_barbs, case.half_barbs, "speed {}", case.speed_knots);

        let canvas = record(case.speed_knots, 200.0, &BarbStyle::default());
        assert_eq!(canvas.polygons().len() as u32, case.pennants);
        assert_eq!(
            canvas.lines().len() as u32,
            1 + case.full_barbs + case.half_barbs,
            "speed {}",
            case.speed_knots
        );
        assert!(canvas.ellipses().is_empty());
    }
}

#[test]
fn test_encoded_speed_matches_floor_to_five() {
    for tenths in (30..2000).step_by(7) {
        let speed = tenths as f64 / 10.0;
        let glyph = barb_parts(speed, 10.0, &BarbStyle::default());
        let expected = ((speed / 5.0_f64).floor() * 5.0) as u32;
        assert_eq!(glyph.symbols().encoded_knots(), expected, "speed {}", speed);
    }
}

#[test]
fn test_sixty_seven_knots() {
    let canvas = record(67.0, 90.0, &BarbStyle::default());
    assert_eq!(canvas.polygons().len(), 1);
    // staff + one full barb + one half barb
    assert_eq!(canvas.lines().len(), 3);

    let full = canvas.lines()[1];
    let half = canvas.lines()[2];
    assert_approx_eq!(full.0.distance(full.1), BARB_LENGTH, 1.0);
    assert_approx_eq!(half.0.distance(half.1), BARB_LENGTH / 2.0, 1.0);
}

#[test]
fn test_fifty_two_knots_north() {
    let canvas = record(52.0, 0.0, &BarbStyle::default());
    let (from, to) = canvas.lines()[0];
    assert_eq!(from.x, to.x, "staff should be vertical");
    assert!(to.y < from.y, "tip should point north");
    assert_eq!(canvas.polygons().len(), 1);
    assert_eq!(canvas.lines().len(), 1);
}

// ============================================================================
// Cursor placement
// ============================================================================

#[test]
fn test_lone_half_barb_is_inset() {
    // speed 7 from 270 at scale 2: staff points west, half barb 10px in from the tip
    let style = BarbStyle::default().with_scale(2.0);
    match barb_parts(7.0, 270.0, &style) {
        BarbGlyph::Barb {
            staff,
            pennants,
            full_barbs,
            half_barb,
        } => {
            assert_eq!(staff.to, Point::new(CENTER.x - 40, CENTER.y));
            assert_eq!(staff.from, Point::new(CENTER.x + 40, CENTER.y));
            assert!(pennants.is_empty());
            assert!(full_barbs.is_empty());
            let half = half_barb.expect("half barb");
            assert_eq!(half.from, Point::new(CENTER.x - 30, CENTER.y));
            assert_approx_eq!(half.length(), BARB_LENGTH, 1.0);
        }
        other => panic!("expected barb, got {:?}", other),
    }
}

#[test]
fn test_full_barb_starts_at_tip() {
    match barb_parts(15.0, 0.0, &BarbStyle::default()) {
        BarbGlyph::Barb {
            staff,
            full_barbs,
            half_barb,
            ..
        } => {
            assert_eq!(full_barbs[0].from, staff.to);
            // next symbol one step (10% of the staff) further in
            let half = half_barb.expect("half barb");
            assert_eq!(half.from, staff.to.offset(0, 4));
        }
        other => panic!("expected barb, got {:?}", other),
    }
}

#[test]
fn test_pennant_geometry() {
    match barb_parts(67.0, 0.0, &BarbStyle::default()) {
        BarbGlyph::Barb {
            staff,
            pennants,
            full_barbs,
            ..
        } => {
            let [base, outer, back] = pennants[0];
            assert_eq!(base, staff.to);
            // base runs 0.8 steps back along the staff
            assert_eq!(back, staff.to.offset(0, 3));
            assert_approx_eq!(base.distance(outer), BARB_LENGTH, 1.0);
            // cursor moves 1.2 steps after a pennant
            assert_eq!(full_barbs[0].from, staff.to.offset(0, 5));
        }
        other => panic!("expected barb, got {:?}", other),
    }
}

#[test]
fn test_barbs_on_clockwise_side() {
    // West wind: staff points west, symbols lean north
    let canvas = record(20.0, 270.0, &BarbStyle::default());
    let (from, to) = canvas.lines()[1];
    assert!(to.y < from.y);
    assert!(to.x < from.x);

    // North wind: symbols lean east
    let canvas = record(20.0, 0.0, &BarbStyle::default());
    let (from, to) = canvas.lines()[1];
    assert!(to.x > from.x);
}

#[test]
fn test_barb_angle_sign_flips_side() {
    let style = BarbStyle {
        barb_angle_degrees: 60.0,
        ..BarbStyle::default()
    };
    let canvas = record(20.0, 0.0, &style);
    let (from, to) = canvas.lines()[1];
    assert!(to.x < from.x);
}

// ============================================================================
// Direction handling and determinism
// ============================================================================

#[test]
fn test_direction_normalization() {
    let style = BarbStyle::default();
    assert_eq!(
        record(35.0, 450.0, &style).commands(),
        record(35.0, 90.0, &style).commands()
    );
    assert_eq!(
        record(35.0, -90.0, &style).commands(),
        record(35.0, 270.0, &style).commands()
    );
}

#[test]
fn test_idempotent_raster() {
    let style = BarbStyle::default().with_scale(2.0);
    let sample = WindSample::new(67.0, 135.0);

    let mut first = MonoCanvas::new(200, 200);
    let mut second = MonoCanvas::new(200, 200);
    render_wind_barb(&mut first, Point::new(100, 100), &sample, &style).unwrap();
    render_wind_barb(&mut second, Point::new(100, 100), &sample, &style).unwrap();

    assert_eq!(first.image(), second.image());
    assert!(first.count(Color::Black) > 0);
}

#[test]
fn test_repeat_render_same_canvas_unchanged() {
    let style = BarbStyle::default();
    let sample = WindSample::new(25.0, 200.0);
    let mut canvas = MonoCanvas::new(100, 100);
    render_wind_barb(&mut canvas, Point::new(50, 50), &sample, &style).unwrap();
    let once = canvas.clone();
    render_wind_barb(&mut canvas, Point::new(50, 50), &sample, &style).unwrap();
    assert_eq!(once, canvas);
}

// ============================================================================
// Errors and edges
// ============================================================================

#[test]
fn test_negative_speed_rejected() {
    let mut canvas = RecordingCanvas::new(100, 100);
    let err = render_wind_barb(
        &mut canvas,
        CENTER,
        &WindSample::new(-3.0, 0.0),
        &BarbStyle::default(),
    )
    .unwrap_err();
    assert!(matches!(err, EpdError::InvalidArgument { .. }));
    assert!(canvas.commands().is_empty());
}

#[test]
fn test_infinite_speed_rejected() {
    for speed in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let mut canvas = RecordingCanvas::new(100, 100);
        let err = render_wind_barb(
            &mut canvas,
            CENTER,
            &WindSample::new(speed, 0.0),
            &BarbStyle::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EpdError::InvalidArgument { .. }), "speed {}", speed);
        assert!(canvas.commands().is_empty());
    }
}

#[test]
fn test_huge_speed_is_capped() {
    for speed in [1e18, f64::MAX] {
        let glyph = barb_parts(speed, 0.0, &BarbStyle::default());
        let symbols = glyph.symbols();
        assert_eq!(symbols.encoded_knots(), 300, "speed {}", speed);
        assert_eq!(symbols.pennants, 6);

        let canvas = record(speed, 0.0, &BarbStyle::default());
        assert_eq!(canvas.polygons().len(), 6);
        assert_eq!(canvas.lines().len(), 1);
    }
}

#[test]
fn test_glyph_at_canvas_corner() {
    let mut canvas = MonoCanvas::new(50, 50);
    render_wind_barb(
        &mut canvas,
        Point::new(0, 0),
        &WindSample::new(120.0, 135.0),
        &BarbStyle::default().with_scale(3.0),
    )
    .unwrap();
    assert_eq!(canvas.width(), 50);
}
