use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{CoordinateTransform, DataPoint, ScreenPoint};

/// Screen position of one plottable point, tagged with its dataset index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub index: usize,
    pub position: ScreenPoint,
}

/// Projects the first `revealed` points, dropping any that cannot be plotted.
///
/// Output keeps dataset order so consumers can pair neighbours.
#[must_use]
pub fn project_revealed(
    points: &[DataPoint],
    revealed: usize,
    transform: &CoordinateTransform,
) -> Vec<ProjectedPoint> {
    let visible = &points[..revealed.min(points.len())];

    #[cfg(feature = "parallel-projection")]
    {
        visible
            .par_iter()
            .enumerate()
            .filter_map(|(index, point)| project_single(index, point, transform))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        visible
            .iter()
            .enumerate()
            .filter_map(|(index, point)| project_single(index, point, transform))
            .collect()
    }
}

fn project_single(
    index: usize,
    point: &DataPoint,
    transform: &CoordinateTransform,
) -> Option<ProjectedPoint> {
    let position = transform.to_screen(index, point)?;
    position
        .is_finite()
        .then_some(ProjectedPoint { index, position })
}
