use tracing::warn;

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, CirclePrimitive, DrawCommand, DrawingSurface, RectPrimitive, TextPrimitive,
};

/// Commands of one paint layer, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerCommands {
    pub kind: CanvasLayerKind,
    pub commands: Vec<DrawCommand>,
}

/// Counts of a frame replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Layers are kept in canonical paint order; within a layer commands keep the
/// order they were pushed in.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerCommands>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: CanvasLayerKind::CANONICAL_ORDER
                .iter()
                .map(|kind| LayerCommands {
                    kind: *kind,
                    commands: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn push(&mut self, kind: CanvasLayerKind, command: DrawCommand) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.commands.push(command);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> &[DrawCommand] {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map(|layer| layer.commands.as_slice())
            .unwrap_or(&[])
    }

    /// All commands in paint order.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.layers.iter().flat_map(|layer| layer.commands.iter())
    }

    pub fn rects_in(&self, kind: CanvasLayerKind) -> impl Iterator<Item = &RectPrimitive> {
        self.layer(kind).iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn circles_in(&self, kind: CanvasLayerKind) -> impl Iterator<Item = &CirclePrimitive> {
        self.layer(kind).iter().filter_map(|command| match command {
            DrawCommand::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn texts_in(&self, kind: CanvasLayerKind) -> impl Iterator<Item = &TextPrimitive> {
        self.layer(kind).iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    #[must_use]
    pub fn command_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.commands.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.command_count() == 0
    }

    /// Replays every command onto `surface`.
    ///
    /// Commands that fail validation or that the surface rejects are skipped
    /// and logged; the rest of the frame is still drawn.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> ReplayStats {
        let mut stats = ReplayStats::default();
        for layer in &self.layers {
            for command in &layer.commands {
                match command.validate().and_then(|()| dispatch(surface, command)) {
                    Ok(()) => stats.drawn += 1,
                    Err(err) => {
                        warn!(layer = ?layer.kind, %err, "skipping draw command");
                        stats.skipped += 1;
                    }
                }
            }
        }
        stats
    }
}

fn dispatch<S: DrawingSurface + ?Sized>(surface: &mut S, command: &DrawCommand) -> ChartResult<()> {
    match command {
        DrawCommand::Line(line) => surface.draw_line(line.from, line.to, line.color, line.stroke_width),
        DrawCommand::Curve(curve) => {
            surface.draw_curve(curve.from, curve.to, curve.color, curve.stroke_width)
        }
        DrawCommand::Rect(rect) => surface.fill_rect(rect.rect, rect.color, rect.corner_radius),
        DrawCommand::Circle(circle) => surface.fill_circle(circle.center, circle.radius, circle.color),
        DrawCommand::Text(text) => surface.draw_text(&text.text, text.at, text.font, text.color),
        DrawCommand::Gradient(gradient) => {
            surface.apply_gradient(gradient.from, gradient.to, &gradient.path, gradient.colors)
        }
    }
}
