use serde::{Deserialize, Serialize};

use crate::core::{AxisScaleTuning, ChartType, MarginPolicy, XAxisMode};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HitTolerance, ReleaseBehavior};
use crate::render::Color;

use super::label_format::validate_date_format;

/// How consecutive line-chart points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Straight,
    Curved,
}

/// Everything that controls how a dataset is plotted.
///
/// Deserializes from partial JSON: missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfiguration {
    pub chart_type: ChartType,
    pub x_axis_mode: XAxisMode,
    /// Appended (or prepended) to y labels.
    pub units: String,
    /// Appended (or prepended) to numeric x labels.
    pub x_units: String,
    pub units_on_right: bool,
    pub grid_lines_on: bool,
    pub animate_reveal: bool,
    pub reveal_interval_seconds: f64,
    pub base_color: Color,
    pub lower_gradient_color: Color,
    pub scatter_radius: f64,
    /// Fraction of a slot left empty on each side of a bar, in `[0, 0.5)`.
    pub bar_gap_fraction: f64,
    pub line_style: LineStyle,
    pub gradient_fill: bool,
    pub grid_color: Color,
    pub label_color: Color,
    pub fraction_digits: u8,
    pub x_fraction_digits: u8,
    /// chrono `strftime` pattern for date-mode x labels.
    pub date_format: String,
    /// Every y value is divided by this before plotting, e.g. `100` for cents.
    pub value_divider: f64,
    pub scale_tuning: AxisScaleTuning,
    pub margins: MarginPolicy,
    pub hit_tolerance: HitTolerance,
    pub release_behavior: ReleaseBehavior,
    /// Label every scatter point on the x axis.
    pub scatter_x_labels: bool,
    pub bar_corner_radius: f64,
    pub line_width: f64,
    pub font_size_px: f64,
    pub empty_message: String,
}

impl Default for ChartConfiguration {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            x_axis_mode: XAxisMode::Index,
            units: String::new(),
            x_units: String::new(),
            units_on_right: true,
            grid_lines_on: true,
            animate_reveal: false,
            reveal_interval_seconds: 0.1,
            base_color: Color::BLUE,
            lower_gradient_color: Color::WHITE,
            scatter_radius: 7.0,
            bar_gap_fraction: 0.03,
            line_style: LineStyle::Straight,
            gradient_fill: true,
            grid_color: Color::LIGHT_GRAY,
            label_color: Color::DARK_GRAY,
            fraction_digits: 2,
            x_fraction_digits: 2,
            date_format: "%-m/%-d/%y".to_owned(),
            value_divider: 1.0,
            scale_tuning: AxisScaleTuning::default(),
            margins: MarginPolicy::default(),
            hit_tolerance: HitTolerance::default(),
            release_behavior: ReleaseBehavior::Clear,
            scatter_x_labels: true,
            bar_corner_radius: 2.0,
            line_width: 2.0,
            font_size_px: 10.0,
            empty_message: "No data".to_owned(),
        }
    }
}

impl ChartConfiguration {
    #[must_use]
    pub fn new(chart_type: ChartType, x_axis_mode: XAxisMode) -> Self {
        Self {
            chart_type,
            x_axis_mode,
            ..Self::default()
        }
    }

    /// Builds a configuration from legacy numeric chart-type and axis-mode codes.
    pub fn from_codes(chart_type: i64, x_axis_mode: i64) -> ChartResult<Self> {
        Ok(Self::new(
            ChartType::try_from(chart_type)?,
            XAxisMode::try_from(x_axis_mode)?,
        ))
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| ChartError::InvalidConfiguration(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>, units_on_right: bool) -> Self {
        self.units = units.into();
        self.units_on_right = units_on_right;
        self
    }

    #[must_use]
    pub fn with_x_units(mut self, x_units: impl Into<String>) -> Self {
        self.x_units = x_units.into();
        self
    }

    #[must_use]
    pub fn with_grid_lines(mut self, on: bool) -> Self {
        self.grid_lines_on = on;
        self
    }

    #[must_use]
    pub fn with_reveal_animation(mut self, animate: bool, interval_seconds: f64) -> Self {
        self.animate_reveal = animate;
        self.reveal_interval_seconds = interval_seconds;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, base: Color, lower_gradient: Color) -> Self {
        self.base_color = base;
        self.lower_gradient_color = lower_gradient;
        self
    }

    #[must_use]
    pub fn with_scatter_radius(mut self, radius: f64) -> Self {
        self.scatter_radius = radius;
        self
    }

    #[must_use]
    pub fn with_bar_gap_fraction(mut self, fraction: f64) -> Self {
        self.bar_gap_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    #[must_use]
    pub fn with_gradient_fill(mut self, on: bool) -> Self {
        self.gradient_fill = on;
        self
    }

    #[must_use]
    pub fn with_fraction_digits(mut self, y_digits: u8, x_digits: u8) -> Self {
        self.fraction_digits = y_digits;
        self.x_fraction_digits = x_digits;
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn with_value_divider(mut self, divider: f64) -> Self {
        self.value_divider = divider;
        self
    }

    #[must_use]
    pub fn with_scale_tuning(mut self, tuning: AxisScaleTuning) -> Self {
        self.scale_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: MarginPolicy) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_hit_tolerance(mut self, tolerance: HitTolerance) -> Self {
        self.hit_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_release_behavior(mut self, behavior: ReleaseBehavior) -> Self {
        self.release_behavior = behavior;
        self
    }

    #[must_use]
    pub fn with_scatter_x_labels(mut self, on: bool) -> Self {
        self.scatter_x_labels = on;
        self
    }

    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        positive(self.reveal_interval_seconds, "reveal interval")?;
        positive(self.scatter_radius, "scatter radius")?;
        positive(self.line_width, "line width")?;
        positive(self.font_size_px, "font size")?;
        positive(self.value_divider, "value divider")?;
        if !self.bar_gap_fraction.is_finite() || !(0.0..0.5).contains(&self.bar_gap_fraction) {
            return Err(ChartError::InvalidConfiguration(
                "bar gap fraction must be finite and in [0, 0.5)".to_owned(),
            ));
        }
        if !self.bar_corner_radius.is_finite() || self.bar_corner_radius < 0.0 {
            return Err(ChartError::InvalidConfiguration(
                "bar corner radius must be finite and >= 0".to_owned(),
            ));
        }
        for (name, color) in [
            ("base_color", self.base_color),
            ("lower_gradient_color", self.lower_gradient_color),
            ("grid_color", self.grid_color),
            ("label_color", self.label_color),
        ] {
            validate_color(name, color)?;
        }
        validate_date_format(&self.date_format)?;
        self.scale_tuning.validate()?;
        self.margins.validate()?;
        self.hit_tolerance.validate()?;
        Ok(())
    }
}

pub(super) fn validate_color(name: &str, color: Color) -> ChartResult<()> {
    color
        .validate()
        .map_err(|err| ChartError::InvalidConfiguration(format!("{name}: {err}")))
}

fn positive(value: f64, name: &str) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidConfiguration(format!(
            "{name} must be finite and > 0"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        ChartConfiguration::default().validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ChartConfiguration::from_json_str(
            r#"{"chart_type": "scatter", "x_axis_mode": "numeric", "units": "kg"}"#,
        )
        .unwrap();
        assert_eq!(config.chart_type, ChartType::Scatter);
        assert_eq!(config.x_axis_mode, XAxisMode::Numeric);
        assert_eq!(config.units, "kg");
        assert_eq!(config.scatter_radius, 7.0);
    }

    #[test]
    fn unknown_variant_is_invalid_configuration() {
        let err = ChartConfiguration::from_json_str(r#"{"chart_type": "pie"}"#).unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));
        assert!(ChartConfiguration::from_codes(1, 7).is_err());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let gap = ChartConfiguration::default().with_bar_gap_fraction(0.5);
        assert!(gap.validate().is_err());
        let interval = ChartConfiguration::default().with_reveal_animation(true, 0.0);
        assert!(interval.validate().is_err());
        let color = ChartConfiguration::default()
            .with_colors(Color::rgba(0.0, 0.0, 2.0, 1.0), Color::WHITE);
        assert!(matches!(
            color.validate(),
            Err(ChartError::InvalidConfiguration(_))
        ));
    }
}
