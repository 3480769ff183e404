use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{AxisMode, ChartData, ChartSize};
use crate::error::{ViewportError, ViewportResult};

const SUGGESTED_RANGE_PADDING: f64 = 1.1;
const EMPTY_SUGGESTED_MIN: f64 = 0.0;
const EMPTY_SUGGESTED_MAX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
    PolarArea,
    Radar,
    Scatter,
    Bubble,
}

impl ChartType {
    /// Only bar and line charts get configured x/y scales and scrollbars.
    ///
    /// Scatter and bubble plot `{x, y[, r]}` points, which the category/value
    /// `ChartData` model does not carry, so they are scale-less here too.
    #[must_use]
    pub fn has_cartesian_axes(self) -> bool {
        matches!(self, ChartType::Bar | ChartType::Line)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::PolarArea => "polarArea",
            ChartType::Radar => "radar",
            ChartType::Scatter => "scatter",
            ChartType::Bubble => "bubble",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ViewportError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" => Ok(ChartType::Pie),
            "doughnut" => Ok(ChartType::Doughnut),
            "polarArea" => Ok(ChartType::PolarArea),
            "radar" => Ok(ChartType::Radar),
            "scatter" => Ok(ChartType::Scatter),
            "bubble" => Ok(ChartType::Bubble),
            other => Err(ViewportError::InvalidData(format!(
                "unknown chart type `{other}`"
            ))),
        }
    }
}

/// Per-axis bound applied after every pan/zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleLimit {
    #[default]
    None,
    /// The visible window may never leave the range fitted at construction.
    Original,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub x: ScaleLimit,
    pub y: ScaleLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelOptions {
    pub enabled: bool,
    pub speed: f64,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 0.1,
        }
    }
}

/// Engine-side zoom capabilities attached to every cartesian chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomOptions {
    pub wheel: WheelOptions,
    pub pinch_enabled: bool,
    pub drag_enabled: bool,
    /// Axes wheel, pinch and drag-rectangle zoom act on.
    pub mode: AxisMode,
    pub limits: ZoomLimits,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            wheel: WheelOptions::default(),
            pinch_enabled: true,
            drag_enabled: true,
            mode: AxisMode::X,
            limits: ZoomLimits {
                x: ScaleLimit::None,
                y: ScaleLimit::Original,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOptions {
    pub auto_skip: bool,
    pub max_ticks_limit: u32,
    pub max_rotation: u32,
    pub min_rotation: u32,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            auto_skip: true,
            max_ticks_limit: 15,
            max_rotation: 45,
            min_rotation: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    pub title: String,
    pub suggested_min: Option<f64>,
    pub suggested_max: Option<f64>,
    pub ticks: Option<TickOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartesianScales {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

/// Fully resolved construction options handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub title: String,
    pub legend: LegendPosition,
    pub scales: Option<CartesianScales>,
    pub zoom: ZoomOptions,
}

impl ChartOptions {
    #[must_use]
    pub fn build(
        kind: ChartType,
        data: &ChartData,
        x_label: &str,
        y_label: &str,
        zoom: ZoomOptions,
    ) -> Self {
        let scales = kind.has_cartesian_axes().then(|| {
            let (suggested_min, suggested_max) = suggested_value_bounds(data);
            CartesianScales {
                x: AxisOptions {
                    title: x_label.to_owned(),
                    suggested_min: None,
                    suggested_max: None,
                    ticks: Some(TickOptions::default()),
                },
                y: AxisOptions {
                    title: y_label.to_owned(),
                    suggested_min: Some(suggested_min),
                    suggested_max: Some(suggested_max),
                    ticks: None,
                },
            }
        });

        Self {
            title: format!("{y_label} over {x_label}"),
            legend: LegendPosition::Top,
            scales,
            zoom,
        }
    }
}

/// Suggested y bounds: the first dataset's extrema padded by 10%, always
/// including zero. Falls back to `(0, 10)` when it has no numeric samples.
#[must_use]
pub fn suggested_value_bounds(data: &ChartData) -> (f64, f64) {
    match data.primary_extrema() {
        Some((min, max)) => (
            min.min(0.0) * SUGGESTED_RANGE_PADDING,
            max.max(0.0) * SUGGESTED_RANGE_PADDING,
        ),
        None => (EMPTY_SUGGESTED_MIN, EMPTY_SUGGESTED_MAX),
    }
}

/// Tooltip line for one sample: `"{label}: {value:.2}"`.
#[must_use]
pub fn format_tooltip_label(dataset_label: &str, value: Option<f64>) -> String {
    let value = match value {
        Some(value) => format!("{value:.2}"),
        None => "null".to_owned(),
    };
    if dataset_label.is_empty() {
        value
    } else {
        format!("{dataset_label}: {value}")
    }
}

/// Everything the engine needs to construct one chart instance.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    pub kind: ChartType,
    pub data: &'a ChartData,
    pub options: &'a ChartOptions,
    pub size: ChartSize,
}

pub(crate) fn validate_zoom_options(options: ZoomOptions) -> ViewportResult<ZoomOptions> {
    let speed = options.wheel.speed;
    if !speed.is_finite() || speed <= 0.0 || speed >= 1.0 {
        return Err(ViewportError::Config(
            "wheel zoom speed must be in (0, 1)".to_owned(),
        ));
    }
    Ok(options)
}
