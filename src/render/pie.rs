use std::f64::consts::PI;

use crate::core::{ChartSeries, ChartType, RenderOptions, format_number, format_percentage};
use crate::error::ChartResult;
use crate::render::axes::{draw_background, draw_title};
use crate::render::placeholder::{NO_DATA_MESSAGE, render_placeholder};
use crate::render::{Attributes, ChartRenderer, MarkupBuilder};

pub const NON_POSITIVE_TOTAL_MESSAGE: &str = "Pie chart requires non-negative values with a positive total";

pub const SLICE_PALETTE: [&str; 8] = [
    "#4285F4", "#34A853", "#FBBC05", "#EA4335", "#673AB7", "#3F51B5", "#2196F3", "#03A9F4",
];

/// Angle of the first slice edge: twelve o'clock, with angles growing clockwise.
const START_ANGLE_DEG: f64 = -90.0;
const LEGEND_OFFSET_FROM_RIGHT: f64 = 120.0;

/// Resolved geometry and legend data for one slice. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub share: f64,
    /// Share as a percentage rounded to one decimal; all slices sum to 100.0.
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: &'static str,
}

impl PieSlice {
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn is_large_arc(&self) -> bool {
        self.span() > 180.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    series: ChartSeries,
    options: RenderOptions,
}

impl PieChart {
    #[must_use]
    pub fn new(series: ChartSeries, options: RenderOptions) -> Self {
        Self { series, options }
    }

    /// Slices in series order, or `None` when the series is empty, holds a
    /// negative value, or sums to zero.
    #[must_use]
    pub fn slices(&self) -> Option<Vec<PieSlice>> {
        let total = self.series.total();
        if self.series.is_empty()
            || !total.is_finite()
            || total <= 0.0
            || self.series.iter().any(|point| point.value < 0.0)
        {
            return None;
        }

        let shares: Vec<f64> = self.series.iter().map(|point| point.value / total).collect();
        let percentages = rounded_percentages(&shares);

        let mut start_angle = START_ANGLE_DEG;
        let slices = self
            .series
            .iter()
            .zip(shares.iter().zip(percentages))
            .enumerate()
            .map(|(index, (point, (&share, percentage)))| {
                let end_angle = start_angle + share * 360.0;
                let slice = PieSlice {
                    label: point.label.clone(),
                    value: point.value,
                    share,
                    percentage,
                    start_angle,
                    end_angle,
                    color: SLICE_PALETTE[index % SLICE_PALETTE.len()],
                };
                start_angle = end_angle;
                slice
            })
            .collect();
        Some(slices)
    }
}

/// Rounds shares to tenths of a percent so that the results sum to 100.0.
///
/// Each share is floored, then the leftover tenths go to the largest
/// remainders (ties by position).
fn rounded_percentages(shares: &[f64]) -> Vec<f64> {
    const TENTHS: f64 = 1000.0;

    let scaled: Vec<f64> = shares.iter().map(|share| share * TENTHS).collect();
    let mut tenths: Vec<u64> = scaled.iter().map(|s| s.floor().max(0.0) as u64).collect();
    let assigned: u64 = tenths.iter().sum();
    let leftover = (TENTHS as u64).saturating_sub(assigned) as usize;

    let mut order: Vec<usize> = (0..scaled.len()).collect();
    order.sort_by(|&a, &b| {
        let rem_a = scaled[a] - scaled[a].floor();
        let rem_b = scaled[b] - scaled[b].floor();
        rem_b.total_cmp(&rem_a).then(a.cmp(&b))
    });
    for &index in order.iter().take(leftover) {
        tenths[index] += 1;
    }

    tenths.into_iter().map(|t| t as f64 / 10.0).collect()
}

fn polar(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let radians = angle_deg * PI / 180.0;
    (cx + radius * radians.cos(), cy + radius * radians.sin())
}

fn slice_path(slice: &PieSlice, cx: f64, cy: f64, radius: f64) -> String {
    let (x1, y1) = polar(cx, cy, radius, slice.start_angle);
    let (x2, y2) = polar(cx, cy, radius, slice.end_angle);
    let n = format_number;
    format!(
        "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
        n(cx),
        n(cy),
        n(x1),
        n(y1),
        n(radius),
        n(radius),
        u8::from(slice.is_large_arc()),
        n(x2),
        n(y2),
    )
}

impl ChartRenderer for PieChart {
    fn chart_type(&self) -> ChartType {
        ChartType::Pie
    }

    fn render(&self) -> ChartResult<String> {
        if self.series.is_empty() {
            return Ok(render_placeholder(&self.options, NO_DATA_MESSAGE));
        }
        let Some(slices) = self.slices() else {
            return Ok(render_placeholder(&self.options, NON_POSITIVE_TOTAL_MESSAGE));
        };

        let options = &self.options;
        let width = f64::from(options.width);
        let height = f64::from(options.height);
        let radius = width.min(height) * 0.4;
        let (cx, cy) = (width / 2.0, height / 2.0);

        let mut builder = MarkupBuilder::new(options.width, options.height);
        draw_background(&mut builder, options);
        draw_title(&mut builder, options);

        builder.group(Attributes::new().with("class", "slices"), |group| {
            for slice in &slices {
                let attrs = Attributes::new()
                    .with("class", "slice")
                    .with("fill", slice.color)
                    .with("stroke", "white")
                    .with("stroke-width", "1");
                if slice.share >= 1.0 {
                    group.circle(cx, cy, radius, attrs);
                } else if slice.share > 0.0 {
                    group.path(slice_path(slice, cx, cy, radius), attrs);
                }
            }
        });

        builder.group(Attributes::new().with("class", "legend"), |legend| {
            for (index, slice) in slices.iter().enumerate() {
                let translate = format!(
                    "translate({}, {})",
                    format_number(width - LEGEND_OFFSET_FROM_RIGHT),
                    format_number(index as f64 * 20.0 + 40.0)
                );
                legend.group(Attributes::new().with("transform", translate), |entry| {
                    entry.rect(0.0, 0.0, 10.0, 10.0, Attributes::new().with("fill", slice.color));
                    entry.text(
                        15.0,
                        9.0,
                        &format!("{} ({}%)", slice.label, format_percentage(slice.percentage)),
                        Attributes::new()
                            .with("class", "legend-label")
                            .with("font-family", "Arial")
                            .with("font-size", "12px")
                            .with("fill", options.colors.text.as_str()),
                    );
                });
            }
        });

        Ok(builder.finish())
    }
}
