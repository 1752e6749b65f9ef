use smallvec::SmallVec;
use tracing::warn;

use crate::core::line_series::segments_from_projected;
use crate::core::{
    ChartType, CoordinateTransform, GRIDLINE_INTERVALS, ScreenPoint, area_path, project_bars,
    project_revealed, project_scatter,
};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, CurvePrimitive, DrawCommand, DrawingSurface,
    GradientPrimitive, LinePrimitive, RectPrimitive, RenderFrame,
};

use super::render_frame_builder::LabelAnchor;
use super::{ChartEngine, ChartHost, LineStyle};

impl<H: ChartHost> ChartEngine<H> {
    pub(super) fn push_series(&self, frame: &mut RenderFrame, transform: &CoordinateTransform) {
        let revealed = self.animator.revealed_count();
        match self.config.chart_type {
            ChartType::Bar => self.push_bars(frame, transform, revealed),
            ChartType::Line => self.push_line(frame, transform, revealed),
            ChartType::Scatter => self.push_scatter(frame, transform, revealed),
        }
    }

    fn push_bars(&self, frame: &mut RenderFrame, transform: &CoordinateTransform, revealed: usize) {
        let bars = match project_bars(
            &self.points,
            revealed,
            transform,
            self.config.bar_gap_fraction,
        ) {
            Ok(bars) => bars,
            Err(err) => {
                warn!(%err, "skipping bar series");
                return;
            }
        };

        let colors = [self.config.base_color, self.config.lower_gradient_color];
        for bar in bars {
            let rect = bar.rect();
            let command = if self.config.gradient_fill && rect.height > 0.0 {
                DrawCommand::Gradient(GradientPrimitive {
                    from: ScreenPoint::new(bar.center_x, bar.top_y),
                    to: ScreenPoint::new(bar.center_x, bar.baseline_y),
                    path: rect.rounded_outline(self.config.bar_corner_radius),
                    colors,
                })
            } else {
                DrawCommand::Rect(RectPrimitive {
                    rect,
                    color: self.config.base_color,
                    corner_radius: self.config.bar_corner_radius,
                })
            };
            frame.push(CanvasLayerKind::Series, command);
        }
    }

    fn push_line(&self, frame: &mut RenderFrame, transform: &CoordinateTransform, revealed: usize) {
        let projected = project_revealed(&self.points, revealed, transform);
        let color = self.config.base_color;
        let stroke_width = self.config.line_width;

        if let [only] = projected.as_slice() {
            frame.push(
                CanvasLayerKind::Series,
                DrawCommand::Circle(CirclePrimitive {
                    center: only.position,
                    radius: stroke_width * 1.5,
                    color,
                }),
            );
            return;
        }

        if self.config.gradient_fill {
            let geometry = transform.geometry();
            let path = area_path(&projected, geometry.baseline_y());
            if !path.is_empty() {
                frame.push(
                    CanvasLayerKind::Background,
                    DrawCommand::Gradient(GradientPrimitive {
                        from: ScreenPoint::new(geometry.left_margin, geometry.top_margin),
                        to: ScreenPoint::new(geometry.left_margin, geometry.baseline_y()),
                        path,
                        colors: [color, self.config.lower_gradient_color],
                    }),
                );
            }
        }

        for segment in segments_from_projected(&projected) {
            let command = match self.config.line_style {
                LineStyle::Straight => DrawCommand::Line(LinePrimitive {
                    from: segment.from,
                    to: segment.to,
                    stroke_width,
                    color,
                }),
                LineStyle::Curved => DrawCommand::Curve(CurvePrimitive {
                    from: segment.from,
                    to: segment.to,
                    stroke_width,
                    color,
                }),
            };
            frame.push(CanvasLayerKind::Series, command);
        }
    }

    fn push_scatter(
        &self,
        frame: &mut RenderFrame,
        transform: &CoordinateTransform,
        revealed: usize,
    ) {
        let markers = match project_scatter(
            &self.points,
            revealed,
            transform,
            self.config.scatter_radius,
        ) {
            Ok(markers) => markers,
            Err(err) => {
                warn!(%err, "skipping scatter series");
                return;
            }
        };

        for marker in markers {
            frame.push(
                CanvasLayerKind::Series,
                DrawCommand::Circle(CirclePrimitive {
                    center: marker.center,
                    radius: marker.radius,
                    color: self.config.base_color,
                }),
            );
        }
    }

    /// X-axis labels: one per revealed scatter point when enabled, otherwise
    /// up to five evenly chosen indices.
    pub(super) fn push_x_labels<S: DrawingSurface + ?Sized>(
        &self,
        frame: &mut RenderFrame,
        transform: &CoordinateTransform,
        surface: &S,
    ) {
        let indices: SmallVec<[usize; GRIDLINE_INTERVALS]> =
            if self.config.chart_type == ChartType::Scatter && self.config.scatter_x_labels {
                (0..self.animator.revealed_count().min(self.points.len())).collect()
            } else {
                evenly_spaced_indices(self.points.len())
            };

        let baseline = transform.geometry().baseline_y();
        for index in indices {
            let Some(x) = self
                .points
                .get(index)
                .and_then(|point| transform.to_screen_x(index, point))
            else {
                continue;
            };
            self.push_label(
                frame,
                surface,
                self.formatter.format_x_at(&self.points, index),
                LabelAnchor::Below(ScreenPoint::new(x, baseline)),
            );
        }
    }
}

/// At most [`GRIDLINE_INTERVALS`] indices spread over `0..count`, both ends included.
fn evenly_spaced_indices(count: usize) -> SmallVec<[usize; GRIDLINE_INTERVALS]> {
    if count <= GRIDLINE_INTERVALS {
        return (0..count).collect();
    }
    let last = count - 1;
    let mut indices: SmallVec<[usize; GRIDLINE_INTERVALS]> = (0..GRIDLINE_INTERVALS)
        .map(|i| (i * last + (GRIDLINE_INTERVALS - 1) / 2) / (GRIDLINE_INTERVALS - 1))
        .collect();
    indices.dedup();
    indices
}
