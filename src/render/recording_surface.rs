use crate::core::{ScreenPoint, ScreenRect};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, CurvePrimitive, DrawCommand, DrawingSurface, FontSpec,
    GradientPrimitive, LinePrimitive, RectPrimitive, TextPrimitive, TextSize,
};

/// Headless surface that records every call.
///
/// Used by tests and by hosts that only need the draw list. Text is measured
/// with a fixed per-character advance of `0.6 * size_px`.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Rect(_)))
    }

    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Circle(_)))
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Text(_)))
    }

    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Line(_) | DrawCommand::Curve(_)))
    }

    fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn draw_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()> {
        self.commands.push(DrawCommand::Line(LinePrimitive {
            from,
            to,
            stroke_width: width,
            color,
        }));
        Ok(())
    }

    fn draw_curve(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()> {
        self.commands.push(DrawCommand::Curve(CurvePrimitive {
            from,
            to,
            stroke_width: width,
            color,
        }));
        Ok(())
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color, corner_radius: f64) -> ChartResult<()> {
        self.commands.push(DrawCommand::Rect(RectPrimitive {
            rect,
            color,
            corner_radius,
        }));
        Ok(())
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: Color) -> ChartResult<()> {
        self.commands.push(DrawCommand::Circle(CirclePrimitive {
            center,
            radius,
            color,
        }));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: ScreenPoint,
        font: FontSpec,
        color: Color,
    ) -> ChartResult<()> {
        self.commands.push(DrawCommand::Text(TextPrimitive {
            text: text.to_owned(),
            at,
            font,
            color,
        }));
        Ok(())
    }

    fn measure_text(&self, text: &str, font: FontSpec) -> TextSize {
        TextSize {
            width: text.chars().count() as f64 * font.size_px * 0.6,
            height: font.size_px * 1.2,
        }
    }

    fn apply_gradient(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        path: &[ScreenPoint],
        colors: [Color; 2],
    ) -> ChartResult<()> {
        self.commands.push(DrawCommand::Gradient(GradientPrimitive {
            from,
            to,
            path: path.to_vec(),
            colors,
        }));
        Ok(())
    }
}
