use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unsupported data type: {0}")]
    UnsupportedShape(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid chart type: {0}. Valid types are: line, bar, pie")]
    UnsupportedChartType(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("series not found: {0}")]
    SeriesNotFound(String),

    #[error("no data for unit {unit}")]
    EmptyAfterFilter { unit: String },

    #[error("rate limit exceeded")]
    RateLimited,
}

impl ChartError {
    /// Returns `true` when the same request may succeed if retried later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}
