use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{DataPoint, XAxisMode};
use crate::error::{ChartError, ChartResult};

/// Number of gridline intervals on each axis, independent of data size.
pub const GRIDLINE_INTERVALS: usize = 5;

pub type GridlineValues = SmallVec<[f64; GRIDLINE_INTERVALS]>;

/// Tuning knobs for automatic range computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisScaleTuning {
    /// Fraction of the data span added below the minimum and above the maximum.
    pub buffer_ratio: f64,
    /// Span used when every plotted value is zero.
    pub min_span_absolute: f64,
    /// Lowest value the y axis may show, when it does not collapse the range.
    pub floor: Option<f64>,
    /// Highest value the y axis may show, when it does not collapse the range.
    pub ceiling: Option<f64>,
}

impl Default for AxisScaleTuning {
    fn default() -> Self {
        Self {
            buffer_ratio: 0.10,
            min_span_absolute: 1.0,
            floor: None,
            ceiling: None,
        }
    }
}

impl AxisScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.buffer_ratio.is_finite() || self.buffer_ratio < 0.0 {
            return Err(ChartError::InvalidConfiguration(
                "axis buffer ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidConfiguration(
                "axis min span must be finite and > 0".to_owned(),
            ));
        }
        for (name, bound) in [("floor", self.floor), ("ceiling", self.ceiling)] {
            if bound.is_some_and(|value| !value.is_finite()) {
                return Err(ChartError::InvalidConfiguration(format!(
                    "axis {name} must be finite"
                )));
            }
        }
        if let (Some(floor), Some(ceiling)) = (self.floor, self.ceiling) {
            if floor >= ceiling {
                return Err(ChartError::InvalidConfiguration(
                    "axis floor must be below ceiling".to_owned(),
                ));
            }
        }
        Ok(self)
    }
}

/// Value ranges of both axes, derived from a dataset snapshot.
///
/// Invariants: `y_max > y_min` and `x_max >= x_min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub y_min: f64,
    pub y_max: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            y_min: 0.0,
            y_max: 1.0,
            x_min: 0.0,
            x_max: 1.0,
        }
    }
}

impl AxisRange {
    #[must_use]
    pub fn y_span(self) -> f64 {
        self.y_max - self.y_min
    }

    #[must_use]
    pub fn x_span(self) -> f64 {
        self.x_max - self.x_min
    }

    /// Values of the horizontal gridlines, bottom to top.
    #[must_use]
    pub fn horizontal_gridlines(self) -> GridlineValues {
        gridline_values(self.y_min, self.y_max)
    }

    /// Values of the vertical gridlines, left to right.
    #[must_use]
    pub fn vertical_gridlines(self) -> GridlineValues {
        gridline_values(self.x_min, self.x_max)
    }
}

/// `min + i * (max - min) / 5` for `i in 0..5`.
#[must_use]
pub fn gridline_values(min: f64, max: f64) -> GridlineValues {
    let step = (max - min) / GRIDLINE_INTERVALS as f64;
    (0..GRIDLINE_INTERVALS)
        .map(|i| min + i as f64 * step)
        .collect()
}

/// Computes axis ranges with the default tuning.
#[must_use]
pub fn compute_range(points: &[DataPoint], mode: XAxisMode) -> AxisRange {
    compute_range_tuned(points, mode, AxisScaleTuning::default())
}

/// Computes axis ranges from raw data.
///
/// The buffer is `buffer_ratio` of the data span on each side, so `[10, 20, 5]`
/// scales to `[3.5, 21.5]`. A zero span pads by a fraction of the value's
/// magnitude instead.
///
/// Points with a non-finite `y`, or without a usable `x` in date/numeric mode,
/// are left out of the scan. When nothing is left the default `[0, 1]` range
/// is returned so the caller can render its empty state.
#[must_use]
pub fn compute_range_tuned(
    points: &[DataPoint],
    mode: XAxisMode,
    tuning: AxisScaleTuning,
) -> AxisRange {
    let mut y_bounds: Option<(f64, f64)> = None;
    let mut x_bounds: Option<(f64, f64)> = None;

    for point in points {
        if !point.y.is_finite() {
            continue;
        }
        if mode.uses_x_values() {
            let Some(x) = point.x.as_f64() else {
                continue;
            };
            x_bounds = Some(extend(x_bounds, x));
        }
        y_bounds = Some(extend(y_bounds, point.y));
    }

    let Some((y_low, y_high)) = y_bounds else {
        return AxisRange::default();
    };

    let (y_min, y_max) = buffered(y_low, y_high, tuning);
    let (y_min, y_max) = clamped(y_min, y_max, tuning);

    let (x_min, x_max) = match mode {
        XAxisMode::Index => (0.0, points.len().saturating_sub(1) as f64),
        XAxisMode::Date | XAxisMode::Numeric => x_bounds.unwrap_or((0.0, 0.0)),
    };

    let range = AxisRange {
        y_min,
        y_max,
        x_min,
        x_max,
    };
    trace!(?range, ?mode, count = points.len(), "computed axis range");
    range
}

fn extend(bounds: Option<(f64, f64)>, value: f64) -> (f64, f64) {
    match bounds {
        Some((low, high)) => (low.min(value), high.max(value)),
        None => (value, value),
    }
}

fn buffered(low: f64, high: f64, tuning: AxisScaleTuning) -> (f64, f64) {
    let span = high - low;
    let basis = if span > 0.0 {
        span
    } else if low.abs() > 0.0 {
        low.abs()
    } else {
        tuning.min_span_absolute
    };

    let mut pad = basis * tuning.buffer_ratio;
    if span <= 0.0 && pad <= 0.0 {
        pad = basis * 0.5;
    }
    (low - pad, high + pad)
}

fn clamped(min: f64, max: f64, tuning: AxisScaleTuning) -> (f64, f64) {
    let mut min = min;
    let mut max = max;
    if let Some(floor) = tuning.floor {
        if min < floor && floor < max {
            min = floor;
        }
    }
    if let Some(ceiling) = tuning.ceiling {
        if max > ceiling && ceiling > min {
            max = ceiling;
        }
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn indexed(values: &[f64]) -> Vec<DataPoint> {
        values.iter().map(|value| DataPoint::indexed(*value)).collect()
    }

    #[test]
    fn buffer_is_ten_percent_of_span() {
        let range = compute_range(&indexed(&[10.0, 20.0, 5.0]), XAxisMode::Index);
        assert_relative_eq!(range.y_min, 3.5);
        assert_relative_eq!(range.y_max, 21.5);
        assert_relative_eq!(range.x_min, 0.0);
        assert_relative_eq!(range.x_max, 2.0);
    }

    #[test]
    fn equal_values_get_magnitude_buffer() {
        let range = compute_range(&indexed(&[10.0, 10.0]), XAxisMode::Index);
        assert_relative_eq!(range.y_min, 9.0);
        assert_relative_eq!(range.y_max, 11.0);
    }

    #[test]
    fn all_zero_values_use_min_span() {
        let range = compute_range(&indexed(&[0.0]), XAxisMode::Index);
        assert!(range.y_max > range.y_min);
        assert_relative_eq!(range.y_min, -0.1);
    }

    #[test]
    fn zero_buffer_still_yields_non_degenerate_range() {
        let tuning = AxisScaleTuning {
            buffer_ratio: 0.0,
            ..AxisScaleTuning::default()
        };
        let range = compute_range_tuned(&indexed(&[4.0, 4.0]), XAxisMode::Index, tuning);
        assert_relative_eq!(range.y_min, 2.0);
        assert_relative_eq!(range.y_max, 6.0);
    }

    #[test]
    fn empty_dataset_falls_back_to_unit_range() {
        assert_eq!(compute_range(&[], XAxisMode::Numeric), AxisRange::default());
        let nan_only = indexed(&[f64::NAN]);
        assert_eq!(compute_range(&nan_only, XAxisMode::Index), AxisRange::default());
    }

    #[test]
    fn numeric_mode_scans_x_and_skips_missing() {
        let points = vec![
            DataPoint::new(1.0, 4.0),
            DataPoint::indexed(100.0),
            DataPoint::new(3.0, -2.0),
        ];
        let range = compute_range(&points, XAxisMode::Numeric);
        assert_relative_eq!(range.x_min, -2.0);
        assert_relative_eq!(range.x_max, 4.0);
        assert_relative_eq!(range.y_max, 3.2);
    }

    #[test]
    fn floor_clamps_only_when_range_survives() {
        let tuning = AxisScaleTuning {
            floor: Some(0.0),
            ..AxisScaleTuning::default()
        };
        let range = compute_range_tuned(&indexed(&[0.0, 10.0]), XAxisMode::Index, tuning);
        assert_relative_eq!(range.y_min, 0.0);
        assert_relative_eq!(range.y_max, 11.0);

        let above = compute_range_tuned(&indexed(&[-5.0, -1.0]), XAxisMode::Index, tuning);
        assert!(above.y_min < -5.0);
        assert!(above.y_max < 0.0);
    }

    #[test]
    fn gridlines_are_five_even_steps_from_min() {
        let range = AxisRange {
            y_min: 0.0,
            y_max: 10.0,
            ..AxisRange::default()
        };
        assert_eq!(
            range.horizontal_gridlines().as_slice(),
            &[0.0, 2.0, 4.0, 6.0, 8.0]
        );
    }

    #[test]
    fn tuning_validation_rejects_bad_values() {
        let bad = AxisScaleTuning {
            buffer_ratio: -0.1,
            ..AxisScaleTuning::default()
        };
        assert!(bad.validate().is_err());
        let crossed = AxisScaleTuning {
            floor: Some(5.0),
            ceiling: Some(1.0),
            ..AxisScaleTuning::default()
        };
        assert!(crossed.validate().is_err());
    }
}
