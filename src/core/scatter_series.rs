use serde::{Deserialize, Serialize};

use crate::core::projection::project_revealed;
use crate::core::{CoordinateTransform, DataPoint, ScreenPoint};
use crate::error::{ChartError, ChartResult};

/// Filled circle marking one scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterMarker {
    pub index: usize,
    pub center: ScreenPoint,
    pub radius: f64,
}

pub fn project_scatter(
    points: &[DataPoint],
    revealed: usize,
    transform: &CoordinateTransform,
    radius: f64,
) -> ChartResult<Vec<ScatterMarker>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ChartError::InvalidData(
            "scatter radius must be finite and > 0".to_owned(),
        ));
    }

    Ok(project_revealed(points, revealed, transform)
        .into_iter()
        .map(|projected| ScatterMarker {
            index: projected.index,
            center: projected.position,
            radius,
        })
        .collect())
}
