use serde::{Deserialize, Serialize};

/// Paint layers of one chart, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Gradient fills under the series.
    Background,
    Grid,
    Series,
    /// Axis lines and axis labels.
    Axis,
    /// Touch highlight and its label.
    Overlay,
}

impl CanvasLayerKind {
    pub const CANONICAL_ORDER: [Self; 5] = [
        Self::Background,
        Self::Grid,
        Self::Series,
        Self::Axis,
        Self::Overlay,
    ];

    #[must_use]
    pub fn paint_order(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Grid => 1,
            Self::Series => 2,
            Self::Axis => 3,
            Self::Overlay => 4,
        }
    }
}
