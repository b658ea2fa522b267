//! svgchart: SVG chart rendering behind a cached, rate-limited request path.
//!
//! Labeled numeric series are normalized into a canonical `ChartSeries`,
//! rendered as line, bar or pie markup, and served through `ChartService`,
//! which deduplicates identical requests with a time-bounded cache.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartRequest, ChartResponse, ChartService, RenderOptions, ServiceConfig};
pub use error::{ChartError, ChartResult};
