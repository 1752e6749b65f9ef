use serde::{Deserialize, Serialize};

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const LIGHT_GRAY: Self = Self::rgb(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
    pub const DARK_GRAY: Self = Self::rgb(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_px: f64,
    pub bold: bool,
}

impl FontSpec {
    #[must_use]
    pub const fn regular(size_px: f64) -> Self {
        Self {
            size_px,
            bold: false,
        }
    }

    #[must_use]
    pub const fn bold(size_px: f64) -> Self {
        Self {
            size_px,
            bold: true,
        }
    }
}

/// Measured extent of a rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub stroke_width: f64,
    pub color: Color,
}

/// Smoothed connection between two points; the backend picks the control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePrimitive {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub stroke_width: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub rect: ScreenRect,
    pub color: Color,
    pub corner_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center: ScreenPoint,
    pub radius: f64,
    pub color: Color,
}

/// Label whose top-left corner sits at `at`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub at: ScreenPoint,
    pub font: FontSpec,
    pub color: Color,
}

/// Linear gradient from `colors[0]` at `from` to `colors[1]` at `to`, clipped to `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientPrimitive {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub path: Vec<ScreenPoint>,
    pub colors: [Color; 2],
}

/// One drawing call against a [`crate::render::DrawingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Curve(CurvePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
    Gradient(GradientPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(LinePrimitive {
                from,
                to,
                stroke_width,
                color,
            })
            | Self::Curve(CurvePrimitive {
                from,
                to,
                stroke_width,
                color,
            }) => {
                finite_points(&[*from, *to], "line")?;
                positive(*stroke_width, "line stroke width")?;
                color.validate()
            }
            Self::Rect(rect) => {
                let ScreenRect {
                    x,
                    y,
                    width,
                    height,
                } = rect.rect;
                if ![x, y, width, height].iter().all(|value| value.is_finite())
                    || width < 0.0
                    || height < 0.0
                {
                    return Err(ChartError::InvalidData(
                        "rect must be finite with non-negative size".to_owned(),
                    ));
                }
                if !rect.corner_radius.is_finite() || rect.corner_radius < 0.0 {
                    return Err(ChartError::InvalidData(
                        "rect corner radius must be finite and >= 0".to_owned(),
                    ));
                }
                rect.color.validate()
            }
            Self::Circle(circle) => {
                finite_points(&[circle.center], "circle")?;
                positive(circle.radius, "circle radius")?;
                circle.color.validate()
            }
            Self::Text(text) => {
                if text.text.is_empty() {
                    return Err(ChartError::InvalidData(
                        "text primitive must not be empty".to_owned(),
                    ));
                }
                finite_points(&[text.at], "text")?;
                positive(text.font.size_px, "font size")?;
                text.color.validate()
            }
            Self::Gradient(gradient) => {
                if gradient.path.len() < 3 {
                    return Err(ChartError::InvalidData(
                        "gradient path needs at least three points".to_owned(),
                    ));
                }
                finite_points(&[gradient.from, gradient.to], "gradient")?;
                finite_points(&gradient.path, "gradient path")?;
                gradient.colors[0].validate()?;
                gradient.colors[1].validate()
            }
        }
    }
}

fn finite_points(points: &[ScreenPoint], what: &str) -> ChartResult<()> {
    if points.iter().all(|point| point.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

fn positive(value: f64, what: &str) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} must be finite and > 0"
        )))
    }
}
