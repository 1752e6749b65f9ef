use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ChartType, CoordinateTransform, DataPoint, ScreenPoint, XAxisMode};
use crate::error::{ChartError, ChartResult};

/// Distances deciding whether a pointer selects a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTolerance {
    /// Max distance from a point in date/numeric line and scatter charts.
    pub point_radius_px: f64,
    /// Slack around the plot area within which pointers still resolve.
    pub outside_plot_px: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            point_radius_px: 30.0,
            outside_plot_px: 20.0,
        }
    }
}

impl HitTolerance {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.point_radius_px.is_finite()
            || self.point_radius_px <= 0.0
            || !self.outside_plot_px.is_finite()
            || self.outside_plot_px < 0.0
        {
            return Err(ChartError::InvalidConfiguration(
                "hit tolerance must be finite, radius > 0 and slack >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// What happens to the highlighted point when the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseBehavior {
    #[default]
    Clear,
    Persist,
}

/// State of one pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchState {
    pub active_point_index: Option<usize>,
    pub is_dragging: bool,
    pub last_screen_point: ScreenPoint,
}

/// Inputs a hit test reads; borrowed from the engine for one call.
#[derive(Debug, Clone, Copy)]
pub struct HitTestContext<'a> {
    pub transform: &'a CoordinateTransform,
    pub points: &'a [DataPoint],
    /// Only the first `visible_count` points can be selected.
    pub visible_count: usize,
    pub chart_type: ChartType,
}

/// Resolves screen points to dataset indices.
///
/// Gesture state is passed in and returned by value; the tester itself holds
/// only its tuning.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitTester {
    tolerance: HitTolerance,
    release: ReleaseBehavior,
}

impl HitTester {
    #[must_use]
    pub fn new(tolerance: HitTolerance, release: ReleaseBehavior) -> Self {
        Self { tolerance, release }
    }

    #[must_use]
    pub fn tolerance(self) -> HitTolerance {
        self.tolerance
    }

    #[must_use]
    pub fn release_behavior(self) -> ReleaseBehavior {
        self.release
    }

    /// Index of the point under `pointer`, if any.
    ///
    /// Index mode resolves to the nearest slot wherever the pointer is inside
    /// the (slightly inflated) plot area. Date and numeric modes also require
    /// the pointer to be near a rendered point: within half a slot
    /// horizontally for bars, within the point radius otherwise. Only the
    /// revealed prefix is searched, so a hidden point never shadows a
    /// visible one.
    #[must_use]
    pub fn resolve(self, context: HitTestContext<'_>, pointer: ScreenPoint) -> Option<usize> {
        if !pointer.is_finite() {
            return None;
        }
        let count = context.visible_count.min(context.points.len());
        if count == 0 {
            return None;
        }

        let plot = context
            .transform
            .geometry()
            .plot_rect()
            .inflate(self.tolerance.outside_plot_px);
        if !plot.contains(pointer) {
            return None;
        }

        let selectable = &context.points[..count];
        let resolved = match context.transform.mode() {
            XAxisMode::Index => context
                .transform
                .from_screen_x(pointer.x, selectable)
                .filter(|index| *index < count),
            XAxisMode::Date | XAxisMode::Numeric => {
                self.nearest_in_reach(context.transform, selectable, context.chart_type, pointer)
            }
        };
        trace!(?pointer, ?resolved, "hit test");
        resolved
    }

    /// Closest point within reach of `pointer`, the first one on ties.
    ///
    /// Bars are in reach within half a slot horizontally and compete on that
    /// distance; line and scatter points must sit within the point radius on
    /// both axes and compete on straight-line distance.
    fn nearest_in_reach(
        self,
        transform: &CoordinateTransform,
        points: &[DataPoint],
        chart_type: ChartType,
        pointer: ScreenPoint,
    ) -> Option<usize> {
        let half_slot = transform.slot_width() * 0.5;
        let radius = self.tolerance.point_radius_px;
        points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let position = transform.to_screen(index, point)?;
                let dx = (position.x - pointer.x).abs();
                let dy = (position.y - pointer.y).abs();
                let distance = match chart_type {
                    ChartType::Bar => (dx <= half_slot).then_some(dx)?,
                    ChartType::Line | ChartType::Scatter => {
                        (dx <= radius && dy <= radius).then(|| dx.hypot(dy))?
                    }
                };
                Some((index, OrderedFloat(distance)))
            })
            .min_by_key(|(_, distance)| *distance)
            .map(|(index, _)| index)
    }

    /// Starts a gesture.
    #[must_use]
    pub fn pointer_down(self, context: HitTestContext<'_>, pointer: ScreenPoint) -> TouchState {
        TouchState {
            active_point_index: self.resolve(context, pointer),
            is_dragging: false,
            last_screen_point: pointer,
        }
    }

    /// Re-resolves during a drag. Returns `None` when no gesture is active.
    #[must_use]
    pub fn pointer_move(
        self,
        context: HitTestContext<'_>,
        state: Option<TouchState>,
        pointer: ScreenPoint,
    ) -> Option<TouchState> {
        state?;
        Some(TouchState {
            active_point_index: self.resolve(context, pointer),
            is_dragging: true,
            last_screen_point: pointer,
        })
    }

    /// Ends a gesture, keeping the highlight only with `ReleaseBehavior::Persist`.
    #[must_use]
    pub fn pointer_up(self, state: Option<TouchState>, pointer: ScreenPoint) -> Option<TouchState> {
        let state = state?;
        match self.release {
            ReleaseBehavior::Clear => None,
            ReleaseBehavior::Persist => Some(TouchState {
                active_point_index: state.active_point_index,
                is_dragging: false,
                last_screen_point: pointer,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Geometry, MarginPolicy, Viewport, compute_range};

    fn setup(mode: XAxisMode, points: &[DataPoint]) -> CoordinateTransform {
        let geometry = Geometry::resolve(Viewport::new(420, 300), MarginPolicy::default(), 5);
        CoordinateTransform::new(geometry, compute_range(points, mode), mode, points.len())
    }

    fn context<'a>(
        transform: &'a CoordinateTransform,
        points: &'a [DataPoint],
        chart_type: ChartType,
    ) -> HitTestContext<'a> {
        HitTestContext {
            transform,
            points,
            visible_count: points.len(),
            chart_type,
        }
    }

    #[test]
    fn index_mode_ignores_vertical_distance() {
        let points: Vec<_> = [3.0, 9.0, 4.0].into_iter().map(DataPoint::indexed).collect();
        let transform = setup(XAxisMode::Index, &points);
        let x = transform.to_screen_x_index(1);
        let tester = HitTester::default();

        let top = ScreenPoint::new(x + 3.0, transform.geometry().top_margin);
        assert_eq!(tester.resolve(context(&transform, &points, ChartType::Line), top), Some(1));
    }

    #[test]
    fn far_outside_plot_resolves_to_none() {
        let points: Vec<_> = [3.0, 9.0].into_iter().map(DataPoint::indexed).collect();
        let transform = setup(XAxisMode::Index, &points);
        let tester = HitTester::default();
        let ctx = context(&transform, &points, ChartType::Line);

        assert_eq!(tester.resolve(ctx, ScreenPoint::new(-200.0, 50.0)), None);
        assert_eq!(tester.resolve(ctx, ScreenPoint::new(100.0, 2_000.0)), None);
        assert_eq!(tester.resolve(ctx, ScreenPoint::new(f64::NAN, 50.0)), None);
    }

    #[test]
    fn numeric_mode_requires_proximity() {
        let points = vec![DataPoint::new(1.0, 0.0), DataPoint::new(10.0, 10.0)];
        let transform = setup(XAxisMode::Numeric, &points);
        let tester = HitTester::default();
        let ctx = context(&transform, &points, ChartType::Scatter);
        let target = transform.to_screen(1, &points[1]).unwrap();

        assert_eq!(tester.resolve(ctx, target), Some(1));
        let below = ScreenPoint::new(target.x, target.y + 120.0);
        assert_eq!(tester.resolve(ctx, below), None);

        let bars = context(&transform, &points, ChartType::Bar);
        assert_eq!(tester.resolve(bars, below), Some(1));
    }

    #[test]
    fn shared_x_resolves_to_the_point_under_the_pointer() {
        let points = vec![
            DataPoint::new(0.0, 1.0),
            DataPoint::new(100.0, 1.0),
            DataPoint::new(2.0, 50.0),
        ];
        let transform = setup(XAxisMode::Numeric, &points);
        let tester = HitTester::default();
        let ctx = context(&transform, &points, ChartType::Scatter);

        let upper = transform.to_screen(1, &points[1]).unwrap();
        let lower = transform.to_screen(0, &points[0]).unwrap();
        assert_eq!(tester.resolve(ctx, upper), Some(1));
        assert_eq!(tester.resolve(ctx, lower), Some(0));
    }

    #[test]
    fn hidden_neighbour_does_not_shadow_revealed_point() {
        let points = vec![
            DataPoint::new(5.0, 0.0),
            DataPoint::new(5.0, 100.0),
            DataPoint::new(5.0, 10.0),
        ];
        let transform = setup(XAxisMode::Numeric, &points);
        let first = transform.to_screen(0, &points[0]).unwrap();
        let hidden = transform.to_screen(2, &points[2]).unwrap();
        let pointer = ScreenPoint::new(first.x + 20.0, first.y);
        assert!((hidden.x - pointer.x).abs() < 20.0);

        let mut ctx = context(&transform, &points, ChartType::Line);
        ctx.visible_count = 1;
        assert_eq!(HitTester::default().resolve(ctx, pointer), Some(0));
    }

    #[test]
    fn unrevealed_points_are_not_selectable() {
        let points: Vec<_> = [3.0, 9.0, 4.0].into_iter().map(DataPoint::indexed).collect();
        let transform = setup(XAxisMode::Index, &points);
        let mut ctx = context(&transform, &points, ChartType::Line);
        ctx.visible_count = 1;
        let pointer = ScreenPoint::new(transform.to_screen_x_index(2), 100.0);
        assert_eq!(HitTester::default().resolve(ctx, pointer), None);
    }

    #[test]
    fn gesture_lifecycle_follows_release_behavior() {
        let points: Vec<_> = [3.0, 9.0].into_iter().map(DataPoint::indexed).collect();
        let transform = setup(XAxisMode::Index, &points);
        let ctx = context(&transform, &points, ChartType::Line);
        let at = ScreenPoint::new(transform.to_screen_x_index(1), 100.0);

        let clear = HitTester::default();
        let down = clear.pointer_down(ctx, at);
        assert_eq!(down.active_point_index, Some(1));
        assert!(!down.is_dragging);
        let moved = clear.pointer_move(ctx, Some(down), at).unwrap();
        assert!(moved.is_dragging);
        assert_eq!(clear.pointer_up(Some(moved), at), None);
        assert_eq!(clear.pointer_move(ctx, None, at), None);

        let persist = HitTester::new(HitTolerance::default(), ReleaseBehavior::Persist);
        let kept = persist.pointer_up(Some(moved), at).unwrap();
        assert_eq!(kept.active_point_index, Some(1));
        assert!(!kept.is_dragging);
    }
}
