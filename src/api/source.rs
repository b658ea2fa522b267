use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::core::SeriesInput;
use crate::error::{ChartError, ChartResult};

/// Resolves a source series id to raw series input.
pub trait SeriesSource: Send + Sync {
    fn load(&self, series_id: &str) -> ChartResult<SeriesInput>;
}

impl<S: SeriesSource + ?Sized> SeriesSource for Arc<S> {
    fn load(&self, series_id: &str) -> ChartResult<SeriesInput> {
        (**self).load(series_id)
    }
}

/// Thread-safe in-process store of series keyed by id.
#[derive(Debug, Default)]
pub struct InMemorySeriesSource {
    series: RwLock<HashMap<String, SeriesInput>>,
}

impl InMemorySeriesSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `input` under `series_id`, replacing any previous series.
    pub fn insert(&self, series_id: impl Into<String>, input: impl Into<SeriesInput>) {
        let series_id = series_id.into();
        let input = input.into();
        debug!(series_id = %series_id, shape = input.shape_name(), "stored series");
        self.series
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(series_id, input);
    }

    /// Parses `json` as series input and stores it.
    pub fn insert_json(&self, series_id: impl Into<String>, json: &str) -> ChartResult<()> {
        let input = SeriesInput::from_json_str(json)?;
        self.insert(series_id, input);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SeriesSource for InMemorySeriesSource {
    fn load(&self, series_id: &str) -> ChartResult<SeriesInput> {
        self.series
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(series_id)
            .cloned()
            .ok_or_else(|| ChartError::SeriesNotFound(series_id.to_owned()))
    }
}
