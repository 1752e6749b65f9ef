use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Geometry family used to plot a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Bar,
    #[default]
    Line,
    Scatter,
}

/// Interpretation of the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxisMode {
    /// Points are evenly spaced by their position in the dataset.
    #[default]
    Index,
    /// `x` holds calendar timestamps, mapped linearly.
    Date,
    /// `x` holds plain numbers, mapped linearly.
    Numeric,
}

impl XAxisMode {
    /// Whether horizontal placement is driven by each point's `x` value.
    #[must_use]
    pub fn uses_x_values(self) -> bool {
        match self {
            Self::Index => false,
            Self::Date | Self::Numeric => true,
        }
    }
}

impl TryFrom<i64> for ChartType {
    type Error = ChartError;

    /// Legacy numeric codes: `0` bar, `1` line, `2` scatter.
    fn try_from(code: i64) -> ChartResult<Self> {
        match code {
            0 => Ok(Self::Bar),
            1 => Ok(Self::Line),
            2 => Ok(Self::Scatter),
            other => Err(ChartError::InvalidConfiguration(format!(
                "unknown chart type code {other}"
            ))),
        }
    }
}

impl TryFrom<i64> for XAxisMode {
    type Error = ChartError;

    /// Legacy numeric codes: `0` index, `1` date, `2` numeric.
    fn try_from(code: i64) -> ChartResult<Self> {
        match code {
            0 => Ok(Self::Index),
            1 => Ok(Self::Date),
            2 => Ok(Self::Numeric),
            other => Err(ChartError::InvalidConfiguration(format!(
                "unknown x-axis mode code {other}"
            ))),
        }
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(value: &str) -> ChartResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "scatter" => Ok(Self::Scatter),
            other => Err(ChartError::InvalidConfiguration(format!(
                "unknown chart type `{other}`"
            ))),
        }
    }
}

impl FromStr for XAxisMode {
    type Err = ChartError;

    fn from_str(value: &str) -> ChartResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "index" => Ok(Self::Index),
            "date" => Ok(Self::Date),
            "numeric" => Ok(Self::Numeric),
            other => Err(ChartError::InvalidConfiguration(format!(
                "unknown x-axis mode `{other}`"
            ))),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
        })
    }
}

impl fmt::Display for XAxisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Index => "index",
            Self::Date => "date",
            Self::Numeric => "numeric",
        })
    }
}
