mod axes;
mod bar;
mod line;
mod markup;
mod pie;
mod placeholder;
mod primitives;

pub use bar::{BarChart, BarGeometry};
pub use line::LineChart;
pub use markup::MarkupBuilder;
pub use pie::{NON_POSITIVE_TOTAL_MESSAGE, PieChart, PieSlice, SLICE_PALETTE};
pub use placeholder::{NO_DATA_MESSAGE, render_placeholder};
pub use primitives::{Attributes, escape_xml};

use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{ChartSeries, ChartType, OptionOverride, RenderOptions, SeriesInput, normalize};
use crate::error::ChartResult;

/// Contract implemented by every chart variant.
///
/// Rendering is pure: the same series and options always produce the same
/// markup, and an empty series renders a placeholder rather than failing.
pub trait ChartRenderer {
    fn chart_type(&self) -> ChartType;

    fn render(&self) -> ChartResult<String>;
}

/// Tagged chart variant built from a `ChartType`.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Line(LineChart),
    Bar(BarChart),
    Pie(PieChart),
}

impl Chart {
    /// Checks the canvas dimensions and picks the variant named by
    /// `options.chart_type`.
    pub fn new(series: ChartSeries, options: RenderOptions) -> ChartResult<Self> {
        options.validate()?;
        if options.chart_type.uses_axes() && !options.plot_area().is_valid() {
            debug!(
                margins = %options.margins,
                width = options.width,
                height = options.height,
                "margins leave no plot area, drawing collapsed geometry"
            );
        }
        Ok(match options.chart_type {
            ChartType::Line => Self::Line(LineChart::new(series, options)),
            ChartType::Bar => Self::Bar(BarChart::new(series, options)),
            ChartType::Pie => Self::Pie(PieChart::new(series, options)),
        })
    }

    /// Normalizes `input`, resolves `overrides` over the defaults and builds the chart.
    pub fn build(
        input: impl Into<SeriesInput>,
        chart_type: ChartType,
        overrides: impl IntoIterator<Item = OptionOverride>,
    ) -> ChartResult<Self> {
        let series = normalize(input)?;
        let options = RenderOptions::resolve(overrides).with_chart_type(chart_type);
        Self::new(series, options)
    }

    fn as_renderer(&self) -> &dyn ChartRenderer {
        match self {
            Self::Line(chart) => chart,
            Self::Bar(chart) => chart,
            Self::Pie(chart) => chart,
        }
    }
}

impl ChartRenderer for Chart {
    fn chart_type(&self) -> ChartType {
        self.as_renderer().chart_type()
    }

    fn render(&self) -> ChartResult<String> {
        let started = Instant::now();
        let markup = self.as_renderer().render()?;
        trace!(
            chart_type = %self.chart_type(),
            bytes = markup.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "rendered chart"
        );
        Ok(markup)
    }
}

/// Renders `series` with fully resolved `options`.
pub fn render_chart(series: ChartSeries, options: RenderOptions) -> ChartResult<String> {
    Chart::new(series, options)?.render()
}
