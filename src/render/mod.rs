mod frame;
mod layer_stack;
mod primitives;
mod recording_surface;

pub use frame::{LayerCommands, RenderFrame, ReplayStats};
pub use layer_stack::CanvasLayerKind;
pub use primitives::{
    CirclePrimitive, Color, CurvePrimitive, DrawCommand, FontSpec, GradientPrimitive,
    LinePrimitive, RectPrimitive, TextPrimitive, TextSize,
};
pub use recording_surface::RecordingSurface;

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::ChartResult;

/// Abstract 2D drawing context the engine paints onto.
///
/// The engine never touches pixels: rasterization, fonts and anti-aliasing
/// belong to the implementor. A failing call only drops that one element.
pub trait DrawingSurface {
    fn draw_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()>;

    fn draw_curve(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        width: f64,
    ) -> ChartResult<()>;

    fn fill_rect(&mut self, rect: ScreenRect, color: Color, corner_radius: f64) -> ChartResult<()>;

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: Color) -> ChartResult<()>;

    fn draw_text(
        &mut self,
        text: &str,
        at: ScreenPoint,
        font: FontSpec,
        color: Color,
    ) -> ChartResult<()>;

    fn measure_text(&self, text: &str, font: FontSpec) -> TextSize;

    fn apply_gradient(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        path: &[ScreenPoint],
        colors: [Color; 2],
    ) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
