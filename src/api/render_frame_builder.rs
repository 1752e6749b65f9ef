use crate::core::{CoordinateTransform, GRIDLINE_INTERVALS, ScreenPoint, ScreenRect};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, DrawCommand, DrawingSurface, FontSpec, LinePrimitive,
    RectPrimitive, RenderFrame, ReplayStats, TextPrimitive,
};

use super::{ChartEngine, ChartHost};

const LABEL_GAP_PX: f64 = 4.0;
const HIGHLIGHT_RING_PX: f64 = 4.0;
const LABEL_BOX_PADDING_PX: f64 = 4.0;
const LABEL_BOX_RADIUS_PX: f64 = 4.0;

impl<H: ChartHost> ChartEngine<H> {
    /// Builds the backend-agnostic frame for the current state.
    ///
    /// `surface` is only used to measure text. An empty dataset yields an
    /// empty frame; the empty-state message is the host's to show.
    #[must_use]
    pub fn build_render_frame<S: DrawingSurface + ?Sized>(&self, surface: &S) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        if self.points.is_empty() {
            return frame;
        }

        let transform = self.transform();
        if self.config.grid_lines_on {
            self.push_grid(&mut frame, &transform, surface);
        }
        self.push_axes(&mut frame);
        self.push_x_labels(&mut frame, &transform, surface);
        self.push_series(&mut frame, &transform);
        self.push_touch_highlight(&mut frame, &transform, surface);
        frame
    }

    /// Draws the current state onto `surface` and settles pending redraws.
    pub fn draw<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) -> ReplayStats {
        let frame = self.build_render_frame(&*surface);
        self.redraw_pending = false;
        frame.replay(surface)
    }

    pub(super) fn label_font(&self) -> FontSpec {
        FontSpec::regular(self.config.font_size_px)
    }

    pub(super) fn push_label<S: DrawingSurface + ?Sized>(
        &self,
        frame: &mut RenderFrame,
        surface: &S,
        text: String,
        anchor: LabelAnchor,
    ) {
        if text.is_empty() {
            return;
        }
        let font = self.label_font();
        let size = surface.measure_text(&text, font);
        let at = match anchor {
            LabelAnchor::LeftOf(point) => ScreenPoint::new(
                point.x - size.width - LABEL_GAP_PX,
                point.y - size.height * 0.5,
            ),
            LabelAnchor::Below(point) => {
                ScreenPoint::new(point.x - size.width * 0.5, point.y + LABEL_GAP_PX)
            }
        };
        frame.push(
            CanvasLayerKind::Axis,
            DrawCommand::Text(TextPrimitive {
                text,
                at,
                font,
                color: self.config.label_color,
            }),
        );
    }

    fn push_grid<S: DrawingSurface + ?Sized>(
        &self,
        frame: &mut RenderFrame,
        transform: &CoordinateTransform,
        surface: &S,
    ) {
        let geometry = self.geometry;
        let right = geometry.left_margin + geometry.chart_width;
        for value in self.range.horizontal_gridlines() {
            let y = transform.to_screen_y(value);
            frame.push(
                CanvasLayerKind::Grid,
                self.grid_line(
                    ScreenPoint::new(geometry.left_margin, y),
                    ScreenPoint::new(right, y),
                ),
            );
            self.push_label(
                frame,
                surface,
                self.y_label(value),
                LabelAnchor::LeftOf(ScreenPoint::new(geometry.left_margin, y)),
            );
        }

        let step = geometry.chart_width / GRIDLINE_INTERVALS as f64;
        for i in 0..GRIDLINE_INTERVALS {
            let x = geometry.left_margin + i as f64 * step;
            frame.push(
                CanvasLayerKind::Grid,
                self.grid_line(
                    ScreenPoint::new(x, geometry.top_margin),
                    ScreenPoint::new(x, geometry.baseline_y()),
                ),
            );
        }
    }

    fn grid_line(&self, from: ScreenPoint, to: ScreenPoint) -> DrawCommand {
        DrawCommand::Line(LinePrimitive {
            from,
            to,
            stroke_width: 1.0,
            color: self.config.grid_color,
        })
    }

    fn push_axes(&self, frame: &mut RenderFrame) {
        let geometry = self.geometry;
        let origin = ScreenPoint::new(geometry.left_margin, geometry.baseline_y());
        for to in [
            ScreenPoint::new(geometry.left_margin, geometry.top_margin),
            ScreenPoint::new(geometry.left_margin + geometry.chart_width, origin.y),
        ] {
            frame.push(
                CanvasLayerKind::Axis,
                DrawCommand::Line(LinePrimitive {
                    from: origin,
                    to,
                    stroke_width: 1.0,
                    color: self.config.label_color,
                }),
            );
        }
    }

    fn push_touch_highlight<S: DrawingSurface + ?Sized>(
        &self,
        frame: &mut RenderFrame,
        transform: &CoordinateTransform,
        surface: &S,
    ) {
        let Some(index) = self.touch.and_then(|touch| touch.active_point_index) else {
            return;
        };
        if !self.animator.is_revealed(index) {
            return;
        }
        let Some(position) = self
            .points
            .get(index)
            .and_then(|point| transform.to_screen(index, point))
        else {
            return;
        };

        let base = self.config.base_color;
        let marker_radius = self.config.scatter_radius;
        frame.push(
            CanvasLayerKind::Overlay,
            DrawCommand::Circle(CirclePrimitive {
                center: position,
                radius: marker_radius + HIGHLIGHT_RING_PX,
                color: Color::rgba(base.red, base.green, base.blue, 0.35),
            }),
        );

        let text = self.formatter.format_pair(&self.points, index);
        if text.is_empty() {
            return;
        }
        let font = self.label_font();
        let size = surface.measure_text(&text, font);
        let box_width = size.width + 2.0 * LABEL_BOX_PADDING_PX;
        let box_height = size.height + 2.0 * LABEL_BOX_PADDING_PX;
        let max_x = (f64::from(self.viewport.width) - box_width).max(0.0);
        let x = (position.x - box_width * 0.5).clamp(0.0, max_x);
        let y = (position.y - marker_radius - HIGHLIGHT_RING_PX - box_height).max(0.0);

        frame.push(
            CanvasLayerKind::Overlay,
            DrawCommand::Rect(RectPrimitive {
                rect: ScreenRect::new(x, y, box_width, box_height),
                color: Color::rgba(1.0, 1.0, 1.0, 0.9),
                corner_radius: LABEL_BOX_RADIUS_PX,
            }),
        );
        frame.push(
            CanvasLayerKind::Overlay,
            DrawCommand::Text(TextPrimitive {
                text,
                at: ScreenPoint::new(x + LABEL_BOX_PADDING_PX, y + LABEL_BOX_PADDING_PX),
                font,
                color: self.config.label_color,
            }),
        );
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) enum LabelAnchor {
    /// Right-aligned, vertically centered on the point.
    LeftOf(ScreenPoint),
    /// Horizontally centered just under the point.
    Below(ScreenPoint),
}
