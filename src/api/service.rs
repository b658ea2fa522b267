use std::sync::Arc;

#[cfg(feature = "parallel-render")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::core::{RenderOptions, normalize};
use crate::error::{ChartError, ChartResult};
use crate::render::render_chart;

use super::validation::validate_request;
use super::{
    CacheEntry, ChartRequest, ChartResponse, Clock, Fingerprint, RateLimiter, RenderCache,
    SeriesSource, ServiceConfig, SystemClock,
};

/// Request boundary: rate limiting, validation, caching and rendering.
///
/// All state is behind locks owned by the cache and the limiter, so one
/// service can be shared across threads by reference or `Arc`. No lock is
/// held while a chart renders.
#[derive(Debug)]
pub struct ChartService<S> {
    config: ServiceConfig,
    source: S,
    cache: RenderCache,
    limiter: RateLimiter,
}

impl<S: SeriesSource> ChartService<S> {
    pub fn new(source: S, config: ServiceConfig) -> ChartResult<Self> {
        Self::with_clock(source, config, Arc::new(SystemClock))
    }

    /// Builds a service whose cache TTL and rate limiter read `clock`.
    pub fn with_clock(source: S, config: ServiceConfig, clock: Arc<dyn Clock>) -> ChartResult<Self> {
        let config = config.validate()?;
        let limiter = RateLimiter::new(config.rate_limit, Arc::clone(&clock))?;
        let cache = RenderCache::new(config.cache_ttl(), clock);
        debug!(
            cache_ttl_secs = config.cache_ttl_secs,
            requests_per_minute = config.rate_limit.requests_per_minute,
            burst = config.rate_limit.burst,
            "chart service initialized"
        );
        Ok(Self {
            config,
            source,
            cache,
            limiter,
        })
    }

    #[must_use]
    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    #[must_use]
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Handles one request, reporting every failure as an error response.
    #[must_use]
    pub fn handle(&self, request: &ChartRequest) -> ChartResponse {
        into_response(self.try_handle(request))
    }

    /// Handles a JSON request body. The rate limit applies before parsing.
    #[must_use]
    pub fn handle_json(&self, body: &str) -> ChartResponse {
        into_response(self.try_handle_json(body))
    }

    pub fn try_handle(&self, request: &ChartRequest) -> ChartResult<ChartResponse> {
        self.limiter.acquire()?;
        self.process(request)
    }

    pub fn try_handle_json(&self, body: &str) -> ChartResult<ChartResponse> {
        self.limiter.acquire()?;
        let request = ChartRequest::from_json_str(body)?;
        self.process(&request)
    }

    /// Handles requests independently; responses keep request order.
    ///
    /// Each request spends its own rate-limit token.
    #[must_use]
    pub fn handle_batch(&self, requests: &[ChartRequest]) -> Vec<ChartResponse> {
        #[cfg(feature = "parallel-render")]
        {
            requests.par_iter().map(|request| self.handle(request)).collect()
        }

        #[cfg(not(feature = "parallel-render"))]
        {
            requests.iter().map(|request| self.handle(request)).collect()
        }
    }

    fn process(&self, request: &ChartRequest) -> ChartResult<ChartResponse> {
        let validated = validate_request(request, &self.config)?;
        let fingerprint = Fingerprint::new(
            &validated.source_id,
            validated.unit_filter.as_deref(),
            validated.chart_type,
            validated.width,
            validated.height,
        );

        if let Some(entry) = self.cache.lookup(&fingerprint) {
            debug!(%fingerprint, "serving cached chart");
            return Ok(ChartResponse::Ok {
                rendered_markup: entry.rendered_markup.to_string(),
                chart_type: validated.chart_type,
                cached: true,
                unit_filter: validated.unit_filter,
                points_plotted: entry.points_plotted,
            });
        }

        let mut series = normalize(self.source.load(&validated.source_id)?)?;
        if let Some(unit) = validated.unit_filter.as_deref() {
            series = series.filter_unit(unit);
            if series.is_empty() {
                return Err(ChartError::EmptyAfterFilter {
                    unit: unit.to_owned(),
                });
            }
        }

        let points_plotted = series.len();
        let options = RenderOptions::resolve(validated.overrides());
        let markup: Arc<str> = Arc::from(render_chart(series, options)?);

        self.cache.store(
            fingerprint.clone(),
            CacheEntry::new(Arc::clone(&markup), self.cache.now(), points_plotted),
        );
        debug!(%fingerprint, points_plotted, bytes = markup.len(), "rendered chart");

        Ok(ChartResponse::Ok {
            rendered_markup: markup.to_string(),
            chart_type: validated.chart_type,
            cached: false,
            unit_filter: validated.unit_filter,
            points_plotted,
        })
    }
}

fn into_response(result: ChartResult<ChartResponse>) -> ChartResponse {
    match result {
        Ok(response) => response,
        Err(error) => {
            if error.is_retryable() {
                debug!(%error, "request throttled");
            } else {
                warn!(%error, "chart request failed");
            }
            ChartResponse::error(&error)
        }
    }
}
