use crate::core::{ChartSeries, ChartType, PlotArea, RenderOptions, ValueScale, format_number};
use crate::error::ChartResult;
use crate::render::axes::{draw_background, draw_cartesian_frame, draw_title};
use crate::render::placeholder::{NO_DATA_MESSAGE, render_placeholder};
use crate::render::{Attributes, ChartRenderer, MarkupBuilder};

/// Share of each category slot covered by its bar; the rest is the gap.
const BAR_FILL_RATIO: f64 = 0.8;

/// Pixel rectangle of one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// One equal-width slot per category.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    series: ChartSeries,
    options: RenderOptions,
}

impl BarChart {
    #[must_use]
    pub fn new(series: ChartSeries, options: RenderOptions) -> Self {
        Self { series, options }
    }

    /// Bar rectangles in series order; empty for an empty series.
    ///
    /// When every value is equal the bars are drawn at half the plot height
    /// instead of following the padded scale.
    pub fn project_bars(&self) -> ChartResult<Vec<BarGeometry>> {
        let Some(scale) = ValueScale::from_series(&self.series)? else {
            return Ok(Vec::new());
        };
        let area = self.options.plot_area();
        let slot = slot_width(self.series.len(), area);
        let width = slot * BAR_FILL_RATIO;
        let gap = slot - width;

        Ok(self
            .series
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let height = if scale.is_uniform() {
                    area.height / 2.0
                } else {
                    scale.scaled_height(point.value, area)
                };
                BarGeometry {
                    x: area.left + index as f64 * slot + gap / 2.0,
                    y: area.bottom() - height,
                    width,
                    height,
                }
            })
            .collect())
    }
}

fn slot_width(count: usize, area: PlotArea) -> f64 {
    area.width / count.max(1) as f64
}

impl ChartRenderer for BarChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Bar
    }

    fn render(&self) -> ChartResult<String> {
        let Some(scale) = ValueScale::from_series(&self.series)? else {
            return Ok(render_placeholder(&self.options, NO_DATA_MESSAGE));
        };
        let options = &self.options;
        let area = options.plot_area();
        let slot = slot_width(self.series.len(), area);
        let bars = self.project_bars()?;

        let mut builder = MarkupBuilder::new(options.width, options.height);
        draw_background(&mut builder, options);
        draw_title(&mut builder, options);
        draw_cartesian_frame(&mut builder, options, &self.series, area, scale, |index| {
            area.left + (index as f64 + 0.5) * slot
        });

        for (point, bar) in self.series.iter().zip(&bars) {
            let value = format_number(point.value);
            let rect = Attributes::new()
                .with("class", "bar")
                .with_number("x", bar.x)
                .with_number("y", bar.y)
                .with_number("width", bar.width)
                .with_number("height", bar.height)
                .with("fill", options.colors.bar.as_str())
                .with("stroke", "none");
            let tooltip = format!("{}: {value}", point.label);
            builder.container("rect", rect, |rect| {
                rect.title(&tooltip);
            });
            builder.text(
                bar.center_x(),
                bar.y - 5.0,
                &value,
                Attributes::new()
                    .with("class", "value-label")
                    .with("text-anchor", "middle")
                    .with("font-family", "Arial")
                    .with("font-size", "10px")
                    .with("fill", options.colors.text.as_str()),
            );
        }

        Ok(builder.finish())
    }
}
