use serde::{Deserialize, Serialize};

/// One labeled sample. Treated as immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl DataPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// `{x, y}` pair accepted by the normalizer and renamed into a `DataPoint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyPoint {
    pub x: String,
    pub y: f64,
}

impl XyPoint {
    #[must_use]
    pub fn new(x: impl Into<String>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

/// Canonical ordered series consumed by every chart variant.
///
/// Order is x-axis order for line/bar charts and slice order for pie charts.
/// An empty series is valid and renders as a placeholder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSeries {
    points: Vec<DataPoint>,
}

impl ChartSeries {
    #[must_use]
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    /// Minimum and maximum value, or `None` for an empty series.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.value;
        Some(self.points.iter().fold((first, first), |(min, max), point| {
            (min.min(point.value), max.max(point.value))
        }))
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.points.iter().map(|point| point.value).sum()
    }

    /// Keeps the points whose unit equals `unit`, preserving order.
    #[must_use]
    pub fn filter_unit(self, unit: &str) -> Self {
        let points = self
            .points
            .into_iter()
            .filter(|point| point.unit.as_deref() == Some(unit))
            .collect();
        Self { points }
    }

    #[must_use]
    pub fn into_points(self) -> Vec<DataPoint> {
        self.points
    }
}

impl From<Vec<DataPoint>> for ChartSeries {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a ChartSeries {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
