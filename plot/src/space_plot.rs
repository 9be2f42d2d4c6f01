use lexapprox_core::display_label;
use tracing::debug;

use crate::canvas::BLUE;
use crate::canvas::Canvas;
use crate::canvas::GREEN;
use crate::canvas::RED;
use crate::error::Result;
use crate::projection::SpaceProjection;

pub const SPACE_PLOT_SIZE: u32 = 1200;
const MARGIN: f32 = 60.0;

/// Maps projected coordinates onto the drawable square.
struct Frame {
    min_x: f32,
    min_y: f32,
    scale_x: f32,
    scale_y: f32,
}

impl Frame {
    fn new(projection: &SpaceProjection) -> Self {
        let (min_x, max_x, min_y, max_y) = projection.bounds();
        let span = SPACE_PLOT_SIZE as f32 - 2.0 * MARGIN;
        let scale = |lo: f32, hi: f32| if hi > lo { span / (hi - lo) } else { 0.0 };
        Self {
            min_x,
            min_y,
            scale_x: scale(min_x, max_x),
            scale_y: scale(min_y, max_y),
        }
    }

    fn to_pixel(&self, (x, y): (f32, f32)) -> (f32, f32) {
        let centre = SPACE_PLOT_SIZE as f32 / 2.0;
        let px = if self.scale_x == 0.0 {
            centre
        } else {
            MARGIN + (x - self.min_x) * self.scale_x
        };
        let py = if self.scale_y == 0.0 {
            centre
        } else {
            SPACE_PLOT_SIZE as f32 - MARGIN - (y - self.min_y) * self.scale_y
        };
        (px, py)
    }
}

/// Scatter of the whole space with the current round highlighted in red and
/// the player's last pick in green. Items missing from the projection are
/// skipped.
pub fn render_space_plot(
    projection: &SpaceProjection,
    round_items: &[String],
    selected: Option<&str>,
) -> Result<Vec<u8>> {
    let mut canvas = Canvas::new(SPACE_PLOT_SIZE, SPACE_PLOT_SIZE);
    let frame = Frame::new(projection);

    for (_, point) in projection.points() {
        let (x, y) = frame.to_pixel(point);
        canvas.fill_circle(x, y, 3.0, BLUE, 0.2);
    }

    let mut skipped = 0usize;
    for item in round_items {
        let Some(point) = projection.point(item) else {
            skipped += 1;
            continue;
        };
        let (x, y) = frame.to_pixel(point);
        canvas.fill_circle(x, y, 5.0, RED, 1.0);
        canvas.text(x + 8.0, y - 7.0, &display_label(item), 2, RED, 1.0);
    }

    if let Some(item) = selected {
        match projection.point(item) {
            Some(point) => {
                let (x, y) = frame.to_pixel(point);
                canvas.fill_circle(x, y, 10.0, GREEN, 1.0);
                canvas.text(x + 14.0, y - 10.0, &display_label(item), 3, GREEN, 1.0);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "items missing from projection");
    }
    canvas.into_png()
}
