use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ViewportError, ViewportResult};

/// One series of category values. `None` marks a missing sample.
///
/// Styling keys the backend attaches (colors, border width, fill) are kept
/// verbatim in `extra` so they reach the engine untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: Vec<Option<f64>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, data: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            data,
            extra: IndexMap::new(),
        }
    }

    /// Finite numeric samples, skipping gaps.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flatten().copied().filter(|v| v.is_finite())
    }
}

/// Chart payload shared by the embedded page blob and the fetch endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    #[must_use]
    pub fn new(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self { labels, datasets }
    }

    pub fn from_json_str(input: &str) -> ViewportResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ViewportError::Decode(format!("failed to parse chart data json: {e}")))
    }

    pub fn to_json_string(&self) -> ViewportResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ViewportError::Decode(format!("failed to serialize chart data: {e}")))
    }

    /// Checks the minimum a chart needs: one dataset with at least one sample.
    pub fn validate(&self) -> ViewportResult<()> {
        if self.datasets.is_empty() {
            return Err(ViewportError::InvalidData(
                "chart data has no datasets".to_owned(),
            ));
        }
        if self.datasets.iter().all(|dataset| dataset.data.is_empty()) {
            return Err(ViewportError::InvalidData(
                "chart data has no samples".to_owned(),
            ));
        }
        Ok(())
    }

    /// Number of category slots along the x axis.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.datasets
            .iter()
            .map(|dataset| dataset.data.len())
            .chain(std::iter::once(self.labels.len()))
            .max()
            .unwrap_or(0)
    }

    /// Min/max over the first dataset's finite samples.
    #[must_use]
    pub fn primary_extrema(&self) -> Option<(f64, f64)> {
        let first = self.datasets.first()?;
        first.values().fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
    }

    /// Min/max over every dataset's finite samples.
    #[must_use]
    pub fn extrema(&self) -> Option<(f64, f64)> {
        self.datasets
            .iter()
            .flat_map(Dataset::values)
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}
