//! Data-space to screen-space mapping and its inverse for hit-testing.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{AxisRange, ChartType, DataPoint, Geometry, MarginPolicy, ScreenPoint, XAxisMode};

/// Horizontal placement of indices in index mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexSpacing {
    /// First index on the left edge, last index on the right edge.
    EdgeAligned,
    /// Each index owns `chart_width / count` and sits in its middle.
    SlotCentered,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    geometry: Geometry,
    range: AxisRange,
    mode: XAxisMode,
    count: usize,
    spacing: IndexSpacing,
    x_inset: f64,
    min_x_gap: Option<f64>,
}

impl CoordinateTransform {
    #[must_use]
    pub fn new(geometry: Geometry, range: AxisRange, mode: XAxisMode, count: usize) -> Self {
        Self {
            geometry,
            range,
            mode,
            count,
            spacing: IndexSpacing::EdgeAligned,
            x_inset: 0.0,
            min_x_gap: None,
        }
    }

    /// Transform with the spacing and inset each chart type plots with.
    ///
    /// Bars use slot-centered spacing (and a half-slot inset in value modes)
    /// so no bar extends past the plot area. In value modes the slot also
    /// shrinks to the closest pair of distinct x values. Scatter points are
    /// inset by the margin policy's scatter inset.
    #[must_use]
    pub fn for_chart(
        geometry: Geometry,
        range: AxisRange,
        mode: XAxisMode,
        points: &[DataPoint],
        chart_type: ChartType,
        margins: MarginPolicy,
    ) -> Self {
        let base = Self::new(geometry, range, mode, points.len());
        match chart_type {
            ChartType::Bar => {
                let slotted = base
                    .with_index_spacing(IndexSpacing::SlotCentered)
                    .with_min_x_gap(min_x_gap(points));
                let inset = slotted.slot_width() * 0.5;
                slotted.with_x_inset(inset)
            }
            ChartType::Line => base,
            ChartType::Scatter => base.with_x_inset(margins.scatter_inset),
        }
    }

    #[must_use]
    pub fn with_index_spacing(mut self, spacing: IndexSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Smallest data-space distance between two distinct x values.
    ///
    /// Only read in date/numeric mode, where it caps [`Self::slot_width`].
    #[must_use]
    pub fn with_min_x_gap(mut self, gap: Option<f64>) -> Self {
        self.min_x_gap = gap.filter(|gap| gap.is_finite() && *gap > 0.0);
        self
    }

    /// Insets both horizontal ends. Slot-centered index spacing ignores it.
    #[must_use]
    pub fn with_x_inset(mut self, inset: f64) -> Self {
        let max_inset = self.geometry.chart_width * 0.5;
        self.x_inset = if inset.is_finite() {
            inset.clamp(0.0, max_inset)
        } else {
            0.0
        };
        self
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[must_use]
    pub fn range(&self) -> AxisRange {
        self.range
    }

    #[must_use]
    pub fn mode(&self) -> XAxisMode {
        self.mode
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    fn usable_width(&self) -> f64 {
        (self.geometry.chart_width - 2.0 * self.x_inset).max(0.0)
    }

    fn center_x(&self) -> f64 {
        self.geometry.left_margin + self.geometry.chart_width * 0.5
    }

    /// Pixel distance between two adjacent indices in index mode.
    #[must_use]
    pub fn x_unit_width(&self) -> f64 {
        match self.spacing {
            IndexSpacing::EdgeAligned if self.count >= 2 => {
                self.usable_width() / (self.count - 1) as f64
            }
            IndexSpacing::EdgeAligned => self.usable_width(),
            IndexSpacing::SlotCentered => self.geometry.chart_width / self.count.max(1) as f64,
        }
    }

    /// Horizontal space allotted to one data index.
    ///
    /// In value modes this is `chart_width / count`, capped so that two
    /// slots around the closest distinct x values never overlap once both
    /// ends are inset by half a slot. With `g = min_gap / x_span` the cap is
    /// `g * chart_width / (1 + g)`.
    #[must_use]
    pub fn slot_width(&self) -> f64 {
        match self.mode {
            XAxisMode::Index => self.x_unit_width(),
            XAxisMode::Date | XAxisMode::Numeric => {
                let width = self.geometry.chart_width;
                let even = width / self.count.max(1) as f64;
                let span = self.range.x_span();
                match self.min_x_gap {
                    Some(gap) if span > 0.0 => {
                        let ratio = gap / span;
                        even.min(ratio * width / (1.0 + ratio))
                    }
                    _ => even,
                }
            }
        }
    }

    /// `top + (1 - (y - y_min) / (y_max - y_min)) * chart_height`.
    #[must_use]
    pub fn to_screen_y(&self, y: f64) -> f64 {
        let span = self.range.y_span();
        if span <= 0.0 {
            return self.geometry.top_margin + self.geometry.chart_height * 0.5;
        }
        let normalized = (y - self.range.y_min) / span;
        self.geometry.top_margin + (1.0 - normalized) * self.geometry.chart_height
    }

    /// Screen x of a dataset position under index-mode spacing.
    #[must_use]
    pub fn to_screen_x_index(&self, index: usize) -> f64 {
        match self.spacing {
            IndexSpacing::EdgeAligned if self.count <= 1 => self.center_x(),
            IndexSpacing::EdgeAligned => {
                self.geometry.left_margin + self.x_inset + index as f64 * self.x_unit_width()
            }
            IndexSpacing::SlotCentered => {
                self.geometry.left_margin + (index as f64 + 0.5) * self.x_unit_width()
            }
        }
    }

    /// Screen x of a date/numeric x value, linear over `x_min..=x_max`.
    #[must_use]
    pub fn to_screen_x_value(&self, x: f64) -> f64 {
        let span = self.range.x_span();
        if span <= 0.0 {
            return self.center_x();
        }
        let normalized = (x - self.range.x_min) / span;
        self.geometry.left_margin + self.x_inset + normalized * self.usable_width()
    }

    /// Screen x of a point, or `None` when value modes lack a usable x.
    #[must_use]
    pub fn to_screen_x(&self, index: usize, point: &DataPoint) -> Option<f64> {
        match self.mode {
            XAxisMode::Index => Some(self.to_screen_x_index(index)),
            XAxisMode::Date | XAxisMode::Numeric => {
                point.x.as_f64().map(|x| self.to_screen_x_value(x))
            }
        }
    }

    /// Screen position of a point, or `None` when it cannot be plotted.
    #[must_use]
    pub fn to_screen(&self, index: usize, point: &DataPoint) -> Option<ScreenPoint> {
        if !point.y.is_finite() {
            return None;
        }
        let x = self.to_screen_x(index, point)?;
        Some(ScreenPoint::new(x, self.to_screen_y(point.y)))
    }

    /// Fractional dataset position under a pixel x in index mode.
    #[must_use]
    pub fn fractional_index(&self, pixel_x: f64) -> f64 {
        let unit = self.x_unit_width();
        if unit <= 0.0 || self.count <= 1 {
            return 0.0;
        }
        match self.spacing {
            IndexSpacing::EdgeAligned => {
                (pixel_x - self.geometry.left_margin - self.x_inset) / unit
            }
            IndexSpacing::SlotCentered => (pixel_x - self.geometry.left_margin) / unit - 0.5,
        }
    }

    /// Nearest valid index under a pixel x, clamped to `[0, count - 1]`.
    ///
    /// Index mode rounds the fractional position. Value modes pick the point
    /// of `points` whose projected x is closest, the first one on ties;
    /// points without x never match. Callers pass only the selectable prefix.
    #[must_use]
    pub fn from_screen_x(&self, pixel_x: f64, points: &[DataPoint]) -> Option<usize> {
        if !pixel_x.is_finite() || self.count == 0 {
            return None;
        }
        match self.mode {
            XAxisMode::Index => {
                let last = self.count - 1;
                let rounded = self.fractional_index(pixel_x).round();
                if rounded <= 0.0 {
                    Some(0)
                } else {
                    Some((rounded as usize).min(last))
                }
            }
            XAxisMode::Date | XAxisMode::Numeric => points
                .iter()
                .enumerate()
                .filter(|(_, point)| point.y.is_finite())
                .filter_map(|(index, point)| {
                    let x = self.to_screen_x_value(point.x.as_f64()?);
                    Some((index, OrderedFloat((x - pixel_x).abs())))
                })
                .min_by_key(|(_, distance)| *distance)
                .map(|(index, _)| index),
        }
    }
}

/// Smallest positive gap between sorted x values of plottable points.
#[must_use]
pub fn min_x_gap(points: &[DataPoint]) -> Option<f64> {
    let mut xs: Vec<f64> = points
        .iter()
        .filter(|point| point.y.is_finite())
        .filter_map(|point| point.x.as_f64())
        .collect();
    xs.sort_by(f64::total_cmp);
    xs.windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|gap| *gap > 0.0)
        .min_by_key(|gap| OrderedFloat(*gap))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::Viewport;

    fn geometry() -> Geometry {
        Geometry {
            chart_width: 400.0,
            chart_height: 200.0,
            left_margin: 40.0,
            top_margin: 10.0,
            h_margin: 10.0,
        }
    }

    fn range() -> AxisRange {
        AxisRange {
            y_min: 0.0,
            y_max: 100.0,
            x_min: 0.0,
            x_max: 4.0,
        }
    }

    #[test]
    fn y_axis_is_inverted() {
        let transform = CoordinateTransform::new(geometry(), range(), XAxisMode::Index, 5);
        assert_relative_eq!(transform.to_screen_y(100.0), 10.0);
        assert_relative_eq!(transform.to_screen_y(0.0), 210.0);
        assert_relative_eq!(transform.to_screen_y(25.0), 160.0);
    }

    #[test]
    fn index_mode_spaces_points_edge_to_edge() {
        let transform = CoordinateTransform::new(geometry(), range(), XAxisMode::Index, 5);
        assert_relative_eq!(transform.x_unit_width(), 100.0);
        assert_relative_eq!(transform.to_screen_x_index(0), 40.0);
        assert_relative_eq!(transform.to_screen_x_index(4), 440.0);
    }

    #[test]
    fn single_point_is_pinned_to_center() {
        let transform = CoordinateTransform::new(geometry(), range(), XAxisMode::Index, 1);
        assert_relative_eq!(transform.to_screen_x_index(0), 240.0);
        assert_eq!(transform.from_screen_x(5.0, &[]), Some(0));
    }

    #[test]
    fn slot_spacing_centers_indices_in_slots() {
        let transform = CoordinateTransform::new(geometry(), range(), XAxisMode::Index, 4)
            .with_index_spacing(IndexSpacing::SlotCentered);
        assert_relative_eq!(transform.slot_width(), 100.0);
        assert_relative_eq!(transform.to_screen_x_index(0), 90.0);
        assert_eq!(transform.from_screen_x(139.0, &[]), Some(0));
        assert_eq!(transform.from_screen_x(141.0, &[]), Some(1));
    }

    #[test]
    fn inverse_clamps_to_valid_indices() {
        let transform = CoordinateTransform::new(geometry(), range(), XAxisMode::Index, 5);
        assert_eq!(transform.from_screen_x(-500.0, &[]), Some(0));
        assert_eq!(transform.from_screen_x(5_000.0, &[]), Some(4));
        assert_eq!(transform.from_screen_x(f64::NAN, &[]), None);
    }

    #[test]
    fn numeric_mode_picks_nearest_projected_point() {
        let points = vec![
            DataPoint::new(1.0, 0.0),
            DataPoint::indexed(2.0),
            DataPoint::new(3.0, 3.0),
            DataPoint::new(4.0, 4.0),
        ];
        let transform = CoordinateTransform::new(geometry(), range(), XAxisMode::Numeric, 4);
        assert_relative_eq!(transform.to_screen_x_value(2.0), 240.0);
        assert_eq!(transform.from_screen_x(300.0, &points), Some(2));
        assert_eq!(transform.from_screen_x(100.0, &points), Some(0));
        assert_eq!(transform.to_screen(1, &points[1]), None);
    }

    #[test]
    fn value_mode_bar_slot_fits_closest_x_pair() {
        let points = vec![
            DataPoint::new(1.0, 0.0),
            DataPoint::new(2.0, 0.5),
            DataPoint::new(3.0, 10.0),
        ];
        assert_eq!(min_x_gap(&points), Some(0.5));
        assert_eq!(min_x_gap(&points[..1]), None);
        assert_eq!(
            min_x_gap(&[DataPoint::new(1.0, 4.0), DataPoint::new(2.0, 4.0)]),
            None
        );

        let range = AxisRange {
            y_min: 0.0,
            y_max: 4.0,
            x_min: 0.0,
            x_max: 10.0,
        };
        let transform = CoordinateTransform::for_chart(
            geometry(),
            range,
            XAxisMode::Numeric,
            &points,
            ChartType::Bar,
            MarginPolicy::default(),
        );
        let slot = transform.slot_width();
        assert_relative_eq!(slot, 0.05 * 400.0 / 1.05, epsilon = 1e-9);
        let gap = transform.to_screen_x_value(0.5) - transform.to_screen_x_value(0.0);
        assert!(gap >= slot - 1e-9);
    }

    #[test]
    fn scatter_inset_shrinks_usable_width() {
        let geometry = Geometry::resolve(Viewport::new(460, 250), MarginPolicy::default(), 5);
        let transform = CoordinateTransform::for_chart(
            geometry,
            range(),
            XAxisMode::Index,
            &[DataPoint::indexed(0.0); 5],
            ChartType::Scatter,
            MarginPolicy::default(),
        );
        assert_relative_eq!(transform.to_screen_x_index(0), geometry.left_margin + 10.0);
        assert_relative_eq!(
            transform.to_screen_x_index(4),
            geometry.left_margin + geometry.chart_width - 10.0
        );
    }
}
