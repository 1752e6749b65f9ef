pub mod axis_scaler;
pub mod bar_series;
pub mod chart_kind;
pub mod geometry;
pub mod line_series;
pub mod primitives;
pub mod projection;
pub mod reveal;
pub mod scatter_series;
pub mod transform;
pub mod types;

pub use axis_scaler::{
    AxisRange, AxisScaleTuning, GRIDLINE_INTERVALS, GridlineValues, compute_range,
    compute_range_tuned, gridline_values,
};
pub use bar_series::{BarGeometry, bar_width, project_bars};
pub use chart_kind::{ChartType, XAxisMode};
pub use geometry::{Geometry, MarginPolicy};
pub use line_series::{LineSegment, area_path, project_line_segments};
pub use projection::{ProjectedPoint, project_revealed};
pub use reveal::{AnimationState, RevealAnimator, RevealPhase, RevealSchedule, RevealTick};
pub use scatter_series::{ScatterMarker, project_scatter};
pub use transform::{CoordinateTransform, IndexSpacing, min_x_gap};
pub use types::{DataPoint, ScreenPoint, ScreenRect, Viewport, XValue};
