mod clock;
mod json_contract;
mod rate_limiter;
mod render_cache;
mod service;
mod service_config;
mod source;
mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use json_contract::{ChartRequest, ChartResponse};
pub use rate_limiter::{RateLimitConfig, RateLimiter};
pub use render_cache::{CacheEntry, Fingerprint, RenderCache, RenderCacheStats};
pub use service::ChartService;
pub use service_config::ServiceConfig;
pub use source::{InMemorySeriesSource, SeriesSource};

pub use crate::core::{ChartType, ColorScheme, Margins, OptionOverride, RenderOptions};
