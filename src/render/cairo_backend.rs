use cairo::{Context, LinearGradient};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, FontSpec, TextSize};

/// Cairo + Pango drawing surface over an external context, such as the one a
/// GTK `DrawingArea` draw callback receives.
#[derive(Debug)]
pub struct CairoSurface<'a> {
    context: &'a Context,
    font_family: String,
}

impl<'a> CairoSurface<'a> {
    #[must_use]
    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            font_family: "Sans".to_owned(),
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    fn layout(&self, text: &str, font: FontSpec) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(self.context);
        let weight = if font.bold { " Bold" } else { "" };
        let description =
            FontDescription::from_string(&format!("{}{weight} {}px", self.font_family, font.size_px));
        layout.set_font_description(Some(&description));
        layout.set_text(text);
        layout
    }

    fn stroke(&self, color: Color, width: f64, what: &str) -> ChartResult<()> {
        apply_color(self.context, color);
        self.context.set_line_width(width);
        self.context
            .stroke()
            .map_err(|err| map_backend_error(what, err))
    }
}

impl DrawingSurface for CairoSurface<'_> {
    fn draw_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()> {
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.stroke(color, width, "failed to stroke line")
    }

    fn draw_curve(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()> {
        // Horizontal tangents at both ends give a smooth S between samples.
        let mid_x = (from.x + to.x) * 0.5;
        self.context.move_to(from.x, from.y);
        self.context.curve_to(mid_x, from.y, mid_x, to.y, to.x, to.y);
        self.stroke(color, width, "failed to stroke curve")
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color, corner_radius: f64) -> ChartResult<()> {
        append_rect_path(self.context, rect, corner_radius);
        apply_color(self.context, color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: Color) -> ChartResult<()> {
        self.context.new_sub_path();
        self.context.arc(center.x, center.y, radius, 0.0, TAU);
        apply_color(self.context, color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err))
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: ScreenPoint,
        font: FontSpec,
        color: Color,
    ) -> ChartResult<()> {
        let layout = self.layout(text, font);
        apply_color(self.context, color);
        self.context.move_to(at.x, at.y);
        pangocairo::functions::show_layout(self.context, &layout);
        Ok(())
    }

    fn measure_text(&self, text: &str, font: FontSpec) -> TextSize {
        let (width, height) = self.layout(text, font).pixel_size();
        TextSize {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    fn apply_gradient(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        path: &[ScreenPoint],
        colors: [Color; 2],
    ) -> ChartResult<()> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(());
        };

        let gradient = LinearGradient::new(from.x, from.y, to.x, to.y);
        for (offset, color) in [(0.0, colors[0]), (1.0, colors[1])] {
            gradient.add_color_stop_rgba(offset, color.red, color.green, color.blue, color.alpha);
        }

        self.context.new_path();
        self.context.move_to(first.x, first.y);
        for point in rest {
            self.context.line_to(point.x, point.y);
        }
        self.context.close_path();
        self.context
            .set_source(&gradient)
            .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill gradient", err))
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: ScreenRect, corner_radius: f64) {
    if corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = corner_radius.min(rect.width * 0.5).min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.right();
    let bottom = rect.bottom();

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Surface(format!("{prefix}: {err}"))
}
