use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Chart axis identifier. Cartesian charts carry exactly one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn coordinate(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Plotting rectangle inside the drawing surface, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    #[must_use]
    pub fn center(self) -> PixelPoint {
        PixelPoint::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Pixel span an axis maps onto, ordered from domain start to domain end.
    ///
    /// The y axis grows upwards, so its domain start sits at the bottom edge.
    #[must_use]
    pub fn pixel_span(self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.left, self.right),
            Axis::Y => (self.bottom, self.top),
        }
    }
}

/// Which axes a pan or zoom gesture acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    #[default]
    X,
    Y,
    Xy,
}

impl AxisMode {
    #[must_use]
    pub fn axes(self) -> SmallVec<[Axis; 2]> {
        match self {
            AxisMode::X => SmallVec::from_slice(&[Axis::X]),
            AxisMode::Y => SmallVec::from_slice(&[Axis::Y]),
            AxisMode::Xy => SmallVec::from_slice(&Axis::ALL),
        }
    }

    #[must_use]
    pub fn includes(self, axis: Axis) -> bool {
        self.axes().contains(&axis)
    }
}

/// Discrete chart height presets offered by the size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSize {
    Small,
    #[default]
    Medium,
    Large,
    Xlarge,
}

impl ChartSize {
    #[must_use]
    pub fn height_px(self) -> u32 {
        match self {
            ChartSize::Small => 400,
            ChartSize::Medium => 600,
            ChartSize::Large => 800,
            ChartSize::Xlarge => 1000,
        }
    }

    /// Resolves a selector value; unknown names fall back to `Medium`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "small" => ChartSize::Small,
            "medium" => ChartSize::Medium,
            "large" => ChartSize::Large,
            "xlarge" => ChartSize::Xlarge,
            other => {
                tracing::debug!(size = other, "unknown chart size, using medium");
                ChartSize::Medium
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisMode, ChartSize, PlotArea};

    #[test]
    fn chart_size_heights_follow_selector_presets() {
        assert_eq!(ChartSize::from_name("small").height_px(), 400);
        assert_eq!(ChartSize::from_name("medium").height_px(), 600);
        assert_eq!(ChartSize::from_name("Large").height_px(), 800);
        assert_eq!(ChartSize::from_name("xlarge").height_px(), 1000);
        assert_eq!(ChartSize::from_name("huge"), ChartSize::Medium);
        assert_eq!(ChartSize::default().height_px(), 600);
    }

    #[test]
    fn plot_area_y_span_runs_bottom_to_top() {
        let area = PlotArea::new(10.0, 20.0, 110.0, 220.0);
        assert_eq!(area.pixel_span(Axis::Y), (220.0, 20.0));
        assert_eq!(area.center().x, 60.0);
        assert_eq!(area.center().y, 120.0);
    }

    #[test]
    fn axis_mode_expands_to_axes() {
        assert!(AxisMode::Xy.includes(Axis::X));
        assert!(AxisMode::Xy.includes(Axis::Y));
        assert!(!AxisMode::X.includes(Axis::Y));
    }
}
