use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::{DataPoint, XAxisMode, XValue};
use crate::error::{ChartError, ChartResult};

use super::ChartConfiguration;

/// Fixed-precision number with `,` thousands grouping. Empty for non-finite input.
#[must_use]
pub fn format_number(value: f64, fraction_digits: u8) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let digits = usize::from(fraction_digits);
    let fixed = format!("{:.*}", digits, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let negative = value.is_sign_negative() && fixed.bytes().any(|byte| matches!(byte, b'1'..=b'9'));

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    let lead = integer.len() % 3;
    for (position, ch) in integer.chars().enumerate() {
        if position != 0 && (position + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn attach_units(text: String, units: &str, units_on_right: bool) -> String {
    if text.is_empty() || units.is_empty() {
        return text;
    }
    if units_on_right {
        text + units
    } else {
        let mut prefixed = String::with_capacity(units.len() + text.len());
        prefixed.push_str(units);
        prefixed.push_str(&text);
        prefixed
    }
}

/// Y-axis label: grouped fixed-precision value with units on either side.
#[must_use]
pub fn format_y(value: f64, units: &str, units_on_right: bool, fraction_digits: u8) -> String {
    attach_units(format_number(value, fraction_digits), units, units_on_right)
}

/// Checks a chrono strftime pattern without formatting anything.
pub fn validate_date_format(pattern: &str) -> ChartResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidConfiguration(format!(
            "invalid date format `{pattern}`"
        )));
    }
    Ok(())
}

fn format_date(time: DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", time.format(pattern)).is_err() {
        out.clear();
    }
    out
}

/// Turns raw values into label text for one configuration.
///
/// Never fails: missing x values, unusable numbers and out-of-range indices
/// all produce an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFormatter {
    units: String,
    x_units: String,
    units_on_right: bool,
    fraction_digits: u8,
    x_fraction_digits: u8,
    date_format: String,
    mode: XAxisMode,
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self::from_config(&ChartConfiguration::default())
    }
}

impl LabelFormatter {
    #[must_use]
    pub fn from_config(config: &ChartConfiguration) -> Self {
        Self {
            units: config.units.clone(),
            x_units: config.x_units.clone(),
            units_on_right: config.units_on_right,
            fraction_digits: config.fraction_digits,
            x_fraction_digits: config.x_fraction_digits,
            date_format: config.date_format.clone(),
            mode: config.x_axis_mode,
        }
    }

    #[must_use]
    pub fn mode(&self) -> XAxisMode {
        self.mode
    }

    #[must_use]
    pub fn format_y(&self, value: f64) -> String {
        format_y(value, &self.units, self.units_on_right, self.fraction_digits)
    }

    /// X label of the point at `index` carrying `x`.
    #[must_use]
    pub fn format_x(&self, index: usize, x: &XValue) -> String {
        match self.mode {
            XAxisMode::Index => index.to_string(),
            XAxisMode::Date => {
                let time = match *x {
                    XValue::Date(time) => Some(time),
                    XValue::Number(seconds) => unix_seconds_to_datetime(seconds),
                    XValue::Missing => None,
                };
                time.map(|time| format_date(time, &self.date_format))
                    .unwrap_or_default()
            }
            XAxisMode::Numeric => x
                .as_f64()
                .map(|value| {
                    attach_units(
                        format_number(value, self.x_fraction_digits),
                        &self.x_units,
                        self.units_on_right,
                    )
                })
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn format_x_at(&self, points: &[DataPoint], index: usize) -> String {
        points
            .get(index)
            .map(|point| self.format_x(index, &point.x))
            .unwrap_or_default()
    }

    /// `"(x, y)"` for the point at `index`.
    #[must_use]
    pub fn format_pair(&self, points: &[DataPoint], index: usize) -> String {
        let Some(point) = points.get(index) else {
            return String::new();
        };
        format!("({}, {})", self.format_x(index, &point.x), self.format_y(point.y))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn numbers_are_grouped_and_fixed() {
        assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1_000.0, 0), "-1,000");
        assert_eq!(format_number(999.0, 1), "999.0");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(f64::NAN, 2), "");
    }

    #[test]
    fn units_attach_on_configured_side() {
        assert_eq!(format_y(12.5, "kg", true, 1), "12.5kg");
        assert_eq!(format_y(12.5, "$", false, 2), "$12.50");
        assert_eq!(format_y(f64::INFINITY, "$", false, 2), "");
    }

    #[test]
    fn x_labels_follow_axis_mode() {
        let time = Utc.with_ymd_and_hms(2015, 3, 7, 12, 0, 0).unwrap();
        let dated = LabelFormatter::from_config(&ChartConfiguration::new(
            crate::core::ChartType::Line,
            XAxisMode::Date,
        ));
        assert_eq!(dated.format_x(0, &XValue::Date(time)), "3/7/15");
        assert_eq!(dated.format_x(0, &XValue::Missing), "");

        let indexed = LabelFormatter::default();
        assert_eq!(indexed.format_x(4, &XValue::Number(99.0)), "4");

        let numeric = LabelFormatter::from_config(
            &ChartConfiguration::new(crate::core::ChartType::Scatter, XAxisMode::Numeric)
                .with_x_units("s")
                .with_fraction_digits(2, 1),
        );
        assert_eq!(numeric.format_x(0, &XValue::Number(2.26)), "2.3s");
    }

    #[test]
    fn pairs_and_out_of_range_indices() {
        let points = [DataPoint::indexed(10.0), DataPoint::indexed(20.0)];
        let formatter = LabelFormatter::default();
        assert_eq!(formatter.format_pair(&points, 1), "(1, 20.00)");
        assert_eq!(formatter.format_pair(&points, 2), "");
        assert_eq!(formatter.format_x_at(&points, 9), "");
    }

    #[test]
    fn date_patterns_are_checked() {
        assert!(validate_date_format("%Y-%m-%d").is_ok());
        assert!(validate_date_format("%!").is_err());
    }
}
