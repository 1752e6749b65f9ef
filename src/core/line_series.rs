use serde::{Deserialize, Serialize};

use crate::core::projection::{ProjectedPoint, project_revealed};
use crate::core::{CoordinateTransform, DataPoint, ScreenPoint};

/// Projected line segment between two consecutive plottable points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub from_index: usize,
    pub to_index: usize,
}

/// Projects the revealed prefix into adjacent segments.
///
/// A segment is only produced when both ends are revealed, so redrawing with
/// a growing prefix draws the line in progressively. Points that cannot be
/// plotted are bridged over.
#[must_use]
pub fn project_line_segments(
    points: &[DataPoint],
    revealed: usize,
    transform: &CoordinateTransform,
) -> Vec<LineSegment> {
    segments_from_projected(&project_revealed(points, revealed, transform))
}

#[must_use]
pub fn segments_from_projected(projected: &[ProjectedPoint]) -> Vec<LineSegment> {
    projected
        .windows(2)
        .map(|pair| LineSegment {
            from: pair[0].position,
            to: pair[1].position,
            from_index: pair[0].index,
            to_index: pair[1].index,
        })
        .collect()
}

/// Closed polygon under a projected line, down to `baseline_y`.
///
/// Empty when fewer than two points are available.
#[must_use]
pub fn area_path(projected: &[ProjectedPoint], baseline_y: f64) -> Vec<ScreenPoint> {
    let (Some(first), Some(last)) = (projected.first(), projected.last()) else {
        return Vec::new();
    };
    if projected.len() < 2 {
        return Vec::new();
    }

    let mut path = Vec::with_capacity(projected.len() + 2);
    path.push(ScreenPoint::new(first.position.x, baseline_y));
    path.extend(projected.iter().map(|point| point.position));
    path.push(ScreenPoint::new(last.position.x, baseline_y));
    path
}
