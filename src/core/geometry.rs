use serde::{Deserialize, Serialize};

use crate::core::{ScreenRect, Viewport};
use crate::error::{ChartError, ChartResult};

/// Fixed margin policy around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginPolicy {
    /// Space between the top of the view and the highest plotted value.
    pub top: f64,
    /// Space below the x axis reserved for x labels.
    pub bottom: f64,
    /// Space right of the plot area.
    pub right: f64,
    /// Space left of the y labels.
    pub left_space: f64,
    /// Horizontal inset keeping scatter points off both axes.
    pub scatter_inset: f64,
    /// Estimated width of one label character, used before a surface is available.
    pub label_char_width_px: f64,
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self {
            top: 10.0,
            bottom: 40.0,
            right: 10.0,
            left_space: 10.0,
            scatter_inset: 10.0,
            label_char_width_px: 6.0,
        }
    }
}

impl MarginPolicy {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("top", self.top),
            ("bottom", self.bottom),
            ("right", self.right),
            ("left_space", self.left_space),
            ("scatter_inset", self.scatter_inset),
            ("label_char_width_px", self.label_char_width_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfiguration(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Resolved plot-area layout for one view size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub chart_width: f64,
    pub chart_height: f64,
    pub left_margin: f64,
    pub top_margin: f64,
    pub h_margin: f64,
}

impl Geometry {
    /// Lays out the plot area. `widest_y_label_chars` sizes the left margin so
    /// y labels fit; the plot area never shrinks below one pixel.
    #[must_use]
    pub fn resolve(viewport: Viewport, policy: MarginPolicy, widest_y_label_chars: usize) -> Self {
        let left_margin =
            policy.left_space + widest_y_label_chars as f64 * policy.label_char_width_px;
        let chart_width = (f64::from(viewport.width) - left_margin - policy.right).max(1.0);
        let chart_height = (f64::from(viewport.height) - policy.top - policy.bottom).max(1.0);
        Self {
            chart_width,
            chart_height,
            left_margin,
            top_margin: policy.top,
            h_margin: policy.right,
        }
    }

    /// Screen y of the x axis.
    #[must_use]
    pub fn baseline_y(self) -> f64 {
        self.top_margin + self.chart_height
    }

    #[must_use]
    pub fn plot_rect(self) -> ScreenRect {
        ScreenRect::new(
            self.left_margin,
            self.top_margin,
            self.chart_width,
            self.chart_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_follow_policy_and_label_width() {
        let geometry = Geometry::resolve(Viewport::new(400, 300), MarginPolicy::default(), 5);
        assert_eq!(geometry.left_margin, 40.0);
        assert_eq!(geometry.chart_width, 350.0);
        assert_eq!(geometry.chart_height, 250.0);
        assert_eq!(geometry.baseline_y(), 260.0);
    }

    #[test]
    fn tiny_views_keep_a_positive_plot_area() {
        let geometry = Geometry::resolve(Viewport::new(10, 10), MarginPolicy::default(), 8);
        assert_eq!(geometry.chart_width, 1.0);
        assert_eq!(geometry.chart_height, 1.0);
    }

    #[test]
    fn negative_margins_are_rejected() {
        let policy = MarginPolicy {
            top: -1.0,
            ..MarginPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
