use image::Rgb;
use lexapprox_core::RevealAnalytics;
use lexapprox_core::display_label;

use crate::canvas::BLACK;
use crate::canvas::BLUE;
use crate::canvas::Canvas;
use crate::canvas::GREEN;
use crate::canvas::GREY;
use crate::canvas::LIGHT_GREY;
use crate::canvas::LinePattern;
use crate::canvas::RED;
use crate::error::PlotError;
use crate::error::Result;

pub const TRAJECTORY_WIDTH: u32 = 1200;
pub const TRAJECTORY_HEIGHT: u32 = 800;

const LEFT: f32 = 100.0;
const RIGHT: f32 = 1160.0;
const TOP: f32 = 80.0;
const BOTTOM: f32 = 700.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Circle,
    Triangle,
}

struct Series<'a> {
    label: &'static str,
    values: &'a [f32],
    color: Rgb<u8>,
    pattern: LinePattern,
    marker: Marker,
}

/// Lower bound of the y axis: one decimal below the smallest value, minus
/// a small pad. The upper bound is always 1.
pub fn y_floor(min_value: f32) -> f32 {
    (min_value * 10.0).floor() / 10.0 - 0.02
}

/// Line chart of how close each round came to the revealed target.
pub fn render_trajectory(analytics: &RevealAnalytics) -> Result<Vec<u8>> {
    let n = analytics.iterations();
    if n == 0 {
        return Err(PlotError::Empty("no iterations to chart".into()));
    }
    let y_min = y_floor(analytics.min_value());
    let y_max = 1.0f32;

    let x_at = |i: usize| -> f32 {
        if n == 1 {
            (LEFT + RIGHT) / 2.0
        } else {
            LEFT + 30.0 + i as f32 * (RIGHT - LEFT - 60.0) / (n - 1) as f32
        }
    };
    let y_at = |v: f32| -> f32 { BOTTOM - (v - y_min) / (y_max - y_min) * (BOTTOM - TOP) };

    let mut canvas = Canvas::new(TRAJECTORY_WIDTH, TRAJECTORY_HEIGHT);

    // Horizontal gridlines at every tenth inside the range.
    let mut tick = (y_min * 10.0).ceil() as i32;
    while tick <= 10 {
        let value = tick as f32 / 10.0;
        let y = y_at(value);
        canvas.hline(LEFT, RIGHT, y, LIGHT_GREY);
        let label = format!("{value:.1}");
        canvas.text(LEFT - 12.0 - Canvas::text_width(&label, 2), y - 7.0, &label, 2, BLACK, 1.0);
        tick += 1;
    }

    for i in 0..n {
        let x = x_at(i);
        canvas.vline(x, BOTTOM, BOTTOM + 8.0, BLACK);
        let label = (i + 1).to_string();
        canvas.text(x - Canvas::text_width(&label, 2) / 2.0, BOTTOM + 16.0, &label, 2, BLACK, 1.0);
    }
    canvas.rect_outline(LEFT, TOP, RIGHT, BOTTOM, BLACK);

    let axis_label = "ITERATION";
    canvas.text(
        (LEFT + RIGHT - Canvas::text_width(axis_label, 2)) / 2.0,
        BOTTOM + 52.0,
        axis_label,
        2,
        BLACK,
        1.0,
    );
    let title = format!("Target Item: {}", display_label(&analytics.target));
    canvas.text(
        (TRAJECTORY_WIDTH as f32 - Canvas::text_width(&title, 3)) / 2.0,
        TOP - 50.0,
        &title,
        3,
        BLACK,
        1.0,
    );

    let series = [
        Series {
            label: "Selected item",
            values: &analytics.y_vals_selection,
            color: BLUE,
            pattern: LinePattern::Dotted,
            marker: Marker::Triangle,
        },
        Series {
            label: "Most similar of suggested",
            values: &analytics.y_vals_closest,
            color: GREEN,
            pattern: LinePattern::Dashed,
            marker: Marker::Circle,
        },
        Series {
            label: "Average of suggested",
            values: &analytics.y_vals_suggestions_avg,
            color: RED,
            pattern: LinePattern::Solid,
            marker: Marker::Circle,
        },
    ];

    for s in &series {
        let points: Vec<(f32, f32)> = s
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (x_at(i), y_at(*v)))
            .collect();
        for pair in points.windows(2) {
            canvas.line(pair[0], pair[1], s.color, s.pattern);
        }
        for &(x, y) in &points {
            draw_marker(&mut canvas, s.marker, x, y, s.color);
        }
    }

    draw_legend(&mut canvas, &series);
    canvas.into_png()
}

fn draw_marker(canvas: &mut Canvas, marker: Marker, x: f32, y: f32, color: Rgb<u8>) {
    match marker {
        Marker::Circle => canvas.fill_circle(x, y, 6.0, color, 1.0),
        Marker::Triangle => canvas.fill_triangle(x, y, 7.0, color, 1.0),
    }
}

fn draw_legend(canvas: &mut Canvas, series: &[Series<'_>]) {
    let row_height = 28.0;
    let width = series
        .iter()
        .map(|s| Canvas::text_width(s.label, 2))
        .fold(0.0, f32::max)
        + 90.0;
    let height = row_height * series.len() as f32 + 16.0;
    let (left, top) = (RIGHT - width - 16.0, BOTTOM - height - 16.0);

    for y in top as i64..=(top + height) as i64 {
        for x in left as i64..=(left + width) as i64 {
            canvas.blend(x, y, Rgb([255, 255, 255]), 0.85);
        }
    }
    canvas.rect_outline(left, top, left + width, top + height, GREY);

    for (row, s) in series.iter().enumerate() {
        let y = top + 8.0 + row_height * row as f32 + row_height / 2.0;
        canvas.line((left + 12.0, y), (left + 60.0, y), s.color, s.pattern);
        draw_marker(canvas, s.marker, left + 36.0, y, s.color);
        canvas.text(left + 72.0, y - 7.0, s.label, 2, BLACK, 1.0);
    }
}
