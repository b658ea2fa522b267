//! Chrome shared by every variant plus the cartesian frame used by line and bar charts.

use crate::core::{ChartSeries, PlotArea, RenderOptions, ValueScale, format_number};
use crate::render::{Attributes, MarkupBuilder};

/// Horizontal grid lines (and y-axis labels) per cartesian chart.
pub(crate) const GRID_LINE_COUNT: usize = 5;
/// Maximum x-axis labels before subsampling kicks in.
pub(crate) const X_LABEL_BUDGET: usize = 7;

const FONT_FAMILY: &str = "Arial";

/// Index step between drawn x-axis labels.
#[must_use]
pub(crate) fn label_stride(count: usize) -> usize {
    if count > X_LABEL_BUDGET {
        count / X_LABEL_BUDGET
    } else {
        1
    }
}

pub(crate) fn draw_background(builder: &mut MarkupBuilder, options: &RenderOptions) {
    builder.rect(
        0.0,
        0.0,
        f64::from(options.width),
        f64::from(options.height),
        Attributes::new()
            .with("class", "background")
            .with("fill", options.colors.background.as_str()),
    );
}

pub(crate) fn draw_title(builder: &mut MarkupBuilder, options: &RenderOptions) {
    let Some(title) = options.title.as_deref() else {
        return;
    };
    builder.text(
        f64::from(options.width) / 2.0,
        20.0,
        title,
        Attributes::new()
            .with("class", "title")
            .with("text-anchor", "middle")
            .with("font-family", FONT_FAMILY)
            .with("font-size", "16px")
            .with("font-weight", "bold")
            .with("fill", options.colors.title.as_str()),
    );
}

fn label_attrs(options: &RenderOptions, anchor: &'static str, font_size: &'static str) -> Attributes {
    Attributes::new()
        .with("text-anchor", anchor)
        .with("font-family", FONT_FAMILY)
        .with("font-size", font_size)
        .with("fill", options.colors.text.as_str())
}

/// Axes, axis labels and (optionally) the grid for a line or bar chart.
///
/// `x_at` maps a point index to the x pixel its label is centered on.
pub(crate) fn draw_cartesian_frame(
    builder: &mut MarkupBuilder,
    options: &RenderOptions,
    series: &ChartSeries,
    area: PlotArea,
    scale: ValueScale,
    x_at: impl Fn(usize) -> f64,
) {
    let ticks = scale.ticks(GRID_LINE_COUNT);

    if options.show_grid {
        for &tick in &ticks {
            let y = scale.value_to_pixel(tick, area);
            builder.line(
                area.left,
                y,
                area.right(),
                y,
                Attributes::new()
                    .with("class", "grid")
                    .with("stroke", options.colors.grid.as_str())
                    .with("stroke-width", "1")
                    .with("stroke-dasharray", "5,5"),
            );
        }
    }

    let axis_attrs = || {
        Attributes::new()
            .with("class", "axis")
            .with("stroke", options.colors.axis.as_str())
            .with("stroke-width", "2")
    };
    builder.line(area.left, area.bottom(), area.right(), area.bottom(), axis_attrs());
    builder.line(area.left, area.top, area.left, area.bottom(), axis_attrs());

    for index in (0..series.len()).step_by(label_stride(series.len())) {
        builder.text(
            x_at(index),
            area.bottom() + 15.0,
            &series.points()[index].label,
            label_attrs(options, "middle", "10px").with("class", "x-tick"),
        );
    }

    for &tick in &ticks {
        builder.text(
            area.left - 5.0,
            scale.value_to_pixel(tick, area) + 3.0,
            &format_number(tick),
            label_attrs(options, "end", "10px").with("class", "y-tick"),
        );
    }

    if let Some(x_label) = options.x_label.as_deref() {
        builder.text(
            area.center_x(),
            f64::from(options.height) - 10.0,
            x_label,
            label_attrs(options, "middle", "12px").with("class", "x-label"),
        );
    }

    if let Some(y_label) = options.y_label.as_deref() {
        let center_y = area.center_y();
        builder.text(
            15.0,
            center_y,
            y_label,
            label_attrs(options, "middle", "12px")
                .with("class", "y-label")
                .with("transform", format!("rotate(-90, 15, {})", format_number(center_y))),
        );
    }
}
