use std::f64::consts::{FRAC_PI_2, PI};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Point in screen space: origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    #[must_use]
    pub fn contains(self, point: ScreenPoint) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Closed polygon path of the rectangle corners, clockwise from top-left.
    #[must_use]
    pub fn corners(self) -> [ScreenPoint; 4] {
        [
            ScreenPoint::new(self.x, self.y),
            ScreenPoint::new(self.right(), self.y),
            ScreenPoint::new(self.right(), self.bottom()),
            ScreenPoint::new(self.x, self.bottom()),
        ]
    }

    /// Outline with each corner replaced by a quarter arc, clockwise from the
    /// top-left arc. The radius is clamped to half the shorter side.
    #[must_use]
    pub fn rounded_outline(self, radius: f64) -> Vec<ScreenPoint> {
        const ARC_STEPS: usize = 4;

        let radius = radius.min(self.width * 0.5).min(self.height * 0.5);
        if !radius.is_finite() || radius <= 0.0 {
            return self.corners().to_vec();
        }
        let centers = [
            (self.x + radius, self.y + radius),
            (self.right() - radius, self.y + radius),
            (self.right() - radius, self.bottom() - radius),
            (self.x + radius, self.bottom() - radius),
        ];
        let mut outline = Vec::with_capacity(centers.len() * (ARC_STEPS + 1));
        for (corner, (cx, cy)) in centers.into_iter().enumerate() {
            let start = PI + corner as f64 * FRAC_PI_2;
            for step in 0..=ARC_STEPS {
                let angle = start + step as f64 * FRAC_PI_2 / ARC_STEPS as f64;
                outline.push(ScreenPoint::new(
                    cx + radius * angle.cos(),
                    cy + radius * angle.sin(),
                ));
            }
        }
        outline
    }
}

/// Horizontal value attached to a data point.
///
/// Which variant is meaningful depends on the configured x-axis mode: index
/// mode ignores it entirely, date mode reads timestamps and numeric mode reads
/// plain numbers. Dates and numbers are interchangeable through
/// [`XValue::as_f64`], where dates become unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XValue {
    #[default]
    Missing,
    Number(f64),
    Date(DateTime<Utc>),
}

impl XValue {
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Missing => None,
            Self::Number(value) if value.is_finite() => Some(value),
            Self::Number(_) => None,
            Self::Date(time) => Some(datetime_to_unix_seconds(time)),
        }
    }
}

impl From<f64> for XValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for XValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Option<f64>> for XValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

/// One sample of a dataset. Identity is its position in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub y: f64,
    #[serde(default)]
    pub x: XValue,
}

impl DataPoint {
    #[must_use]
    pub fn new(y: f64, x: impl Into<XValue>) -> Self {
        Self { y, x: x.into() }
    }

    /// Point without an x value, positioned by index only.
    #[must_use]
    pub fn indexed(y: f64) -> Self {
        Self {
            y,
            x: XValue::Missing,
        }
    }

    #[must_use]
    pub fn dated(y: f64, time: DateTime<Utc>) -> Self {
        Self {
            y,
            x: XValue::Date(time),
        }
    }

    pub fn from_decimal(value: Decimal, x: impl Into<XValue>) -> ChartResult<Self> {
        Ok(Self {
            y: decimal_to_f64(value, "value")?,
            x: x.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn rounded_outline_stays_inside_rect() {
        let rect = ScreenRect::new(10.0, 20.0, 30.0, 8.0);
        let outline = rect.rounded_outline(6.0);
        assert_eq!(outline.len(), 20);
        for point in &outline {
            assert!(point.x >= rect.x - 1e-9 && point.x <= rect.right() + 1e-9);
            assert!(point.y >= rect.y - 1e-9 && point.y <= rect.bottom() + 1e-9);
        }
        assert!(!outline.contains(&ScreenPoint::new(rect.x, rect.y)));
        assert_eq!(rect.rounded_outline(0.0), rect.corners().to_vec());
    }

    #[test]
    fn date_x_values_convert_to_unix_seconds() {
        let time = Utc.with_ymd_and_hms(2015, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(XValue::Date(time).as_f64(), Some(1_425_168_000.0));
        assert_eq!(XValue::Number(f64::NAN).as_f64(), None);
        assert_eq!(XValue::Missing.as_f64(), None);
    }

    #[test]
    fn decimal_points_keep_their_value() {
        let point = DataPoint::from_decimal(Decimal::new(1999, 2), 3.0).unwrap();
        assert!((point.y - 19.99).abs() < 1e-12);
        assert_eq!(point.x, XValue::Number(3.0));
    }

    #[test]
    fn inflated_rect_contains_nearby_points() {
        let rect = ScreenRect::new(10.0, 10.0, 100.0, 50.0);
        assert!(!rect.contains(ScreenPoint::new(5.0, 20.0)));
        assert!(rect.inflate(10.0).contains(ScreenPoint::new(5.0, 20.0)));
    }
}
