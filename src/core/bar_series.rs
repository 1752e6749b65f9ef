use serde::{Deserialize, Serialize};

use crate::core::projection::project_revealed;
use crate::core::{CoordinateTransform, DataPoint, ScreenRect};
use crate::error::{ChartError, ChartResult};

/// Bar geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub index: usize,
    pub center_x: f64,
    pub top_y: f64,
    pub baseline_y: f64,
    pub width: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn rect(self) -> ScreenRect {
        let top = self.top_y.min(self.baseline_y);
        ScreenRect::new(
            self.center_x - self.width * 0.5,
            top,
            self.width,
            (self.baseline_y - self.top_y).abs(),
        )
    }
}

/// Width of one bar: the slot minus `gap_fraction` of it on either side.
#[must_use]
pub fn bar_width(slot_width: f64, gap_fraction: f64) -> f64 {
    (slot_width * (1.0 - 2.0 * gap_fraction)).max(0.0)
}

/// Projects the revealed prefix into bars standing on the x axis.
pub fn project_bars(
    points: &[DataPoint],
    revealed: usize,
    transform: &CoordinateTransform,
    gap_fraction: f64,
) -> ChartResult<Vec<BarGeometry>> {
    if !gap_fraction.is_finite() || !(0.0..0.5).contains(&gap_fraction) {
        return Err(ChartError::InvalidData(
            "bar gap fraction must be finite and in [0, 0.5)".to_owned(),
        ));
    }

    let width = bar_width(transform.slot_width(), gap_fraction);
    let baseline_y = transform.geometry().baseline_y();
    Ok(project_revealed(points, revealed, transform)
        .into_iter()
        .map(|projected| BarGeometry {
            index: projected.index,
            center_x: projected.position.x,
            top_y: projected.position.y,
            baseline_y,
            width,
        })
        .collect())
}
