use std::fmt::Write as _;

use crate::core::{ChartSeries, ChartType, PlotArea, RenderOptions, ValueScale, format_number};
use crate::error::ChartResult;
use crate::render::axes::{draw_background, draw_cartesian_frame, draw_title};
use crate::render::placeholder::{NO_DATA_MESSAGE, render_placeholder};
use crate::render::{Attributes, ChartRenderer, MarkupBuilder};

const MARKER_RADIUS: f64 = 4.0;

/// Points at equal horizontal intervals joined by one polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    series: ChartSeries,
    options: RenderOptions,
}

impl LineChart {
    #[must_use]
    pub fn new(series: ChartSeries, options: RenderOptions) -> Self {
        Self { series, options }
    }

    /// Pixel position of every point; empty for an empty series.
    pub fn project_points(&self) -> ChartResult<Vec<(f64, f64)>> {
        let Some(scale) = ValueScale::from_series(&self.series)? else {
            return Ok(Vec::new());
        };
        let area = self.options.plot_area();
        let count = self.series.len();
        Ok(self
            .series
            .iter()
            .enumerate()
            .map(|(index, point)| {
                (
                    point_x(index, count, area),
                    scale.value_to_pixel(point.value, area),
                )
            })
            .collect())
    }
}

/// A single point sits at the plot center; otherwise points span the full width.
fn point_x(index: usize, count: usize, area: PlotArea) -> f64 {
    if count <= 1 {
        area.center_x()
    } else {
        area.left + index as f64 * area.width / (count - 1) as f64
    }
}

fn polyline(points: &[(f64, f64)]) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (index, (x, y)) in points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{command}{},{} ", format_number(*x), format_number(*y));
    }
    d.trim_end().to_owned()
}

impl ChartRenderer for LineChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Line
    }

    fn render(&self) -> ChartResult<String> {
        let Some(scale) = ValueScale::from_series(&self.series)? else {
            return Ok(render_placeholder(&self.options, NO_DATA_MESSAGE));
        };
        let options = &self.options;
        let area = options.plot_area();
        let count = self.series.len();
        let points = self.project_points()?;

        let mut builder = MarkupBuilder::new(options.width, options.height);
        draw_background(&mut builder, options);
        draw_title(&mut builder, options);
        draw_cartesian_frame(&mut builder, options, &self.series, area, scale, |index| {
            point_x(index, count, area)
        });

        builder.path(
            polyline(&points),
            Attributes::new()
                .with("class", "series-line")
                .with("fill", "none")
                .with("stroke", options.colors.line.as_str())
                .with("stroke-width", "2"),
        );

        for (point, (x, y)) in self.series.iter().zip(&points) {
            let marker = Attributes::new()
                .with("class", "point")
                .with_number("cx", *x)
                .with_number("cy", *y)
                .with_number("r", MARKER_RADIUS)
                .with("fill", options.colors.line.as_str());
            let tooltip = format!("{}: {}", point.label, format_number(point.value));
            builder.container("circle", marker, |circle| {
                circle.title(&tooltip);
            });
        }

        Ok(builder.finish())
    }
}
