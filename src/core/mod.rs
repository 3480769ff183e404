pub mod axis_scale;
pub mod chart_data;
pub mod scale;
pub mod scale_state;
pub mod types;

pub use axis_scale::AxisScale;
pub use chart_data::{ChartData, Dataset};
pub use scale::LinearScale;
pub use scale_state::{OriginalRange, ScaleState};
pub use types::{Axis, AxisMode, ChartSize, PixelPoint, PlotArea, Viewport};
