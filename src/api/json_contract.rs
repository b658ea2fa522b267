use serde::{Deserialize, Serialize};

use crate::core::ChartType;
use crate::error::{ChartError, ChartResult};

/// Inbound render request.
///
/// `chart_type` stays a raw string here so that unknown tags reach
/// validation and come back as `UnsupportedChartType` instead of a parse
/// failure. Dimensions are signed for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub source_series_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

impl ChartRequest {
    #[must_use]
    pub fn new(source_series_id: impl Into<String>) -> Self {
        Self {
            source_series_id: source_series_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: impl Into<String>) -> Self {
        self.chart_type = Some(chart_type.into());
        self
    }

    #[must_use]
    pub fn with_unit_filter(mut self, unit: impl Into<String>) -> Self {
        self.unit_filter = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: i64, height: i64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidRequest(format!("failed to parse request: {e}")))
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ChartError::InvalidRequest(format!("failed to serialize request: {e}")))
    }
}

/// Outbound result, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ChartResponse {
    #[serde(rename = "ok", rename_all = "camelCase")]
    Ok {
        rendered_markup: String,
        chart_type: ChartType,
        cached: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit_filter: Option<String>,
        points_plotted: usize,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

impl ChartResponse {
    #[must_use]
    pub fn error(error: &ChartError) -> Self {
        Self::Error {
            message: error.to_string(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Ok { cached: true, .. })
    }

    #[must_use]
    pub fn rendered_markup(&self) -> Option<&str> {
        match self {
            Self::Ok {
                rendered_markup, ..
            } => Some(rendered_markup),
            Self::Error { .. } => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::Error { message } => Some(message),
        }
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ChartError::InvalidRequest(format!("failed to serialize response: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidRequest(format!("failed to parse response: {e}")))
    }
}
