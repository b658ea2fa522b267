use crate::core::RenderOptions;
use crate::render::axes::{draw_background, draw_title};
use crate::render::{Attributes, MarkupBuilder};

pub const NO_DATA_MESSAGE: &str = "No data available";

/// Background, optional title and a centered message. No axes, grid or data.
#[must_use]
pub fn render_placeholder(options: &RenderOptions, message: &str) -> String {
    let mut builder = MarkupBuilder::new(options.width, options.height);
    draw_background(&mut builder, options);
    draw_title(&mut builder, options);
    builder.text(
        f64::from(options.width) / 2.0,
        f64::from(options.height) / 2.0,
        message,
        Attributes::new()
            .with("class", "placeholder")
            .with("text-anchor", "middle")
            .with("font-family", "Arial")
            .with("font-size", "14px")
            .with("fill", "#666666"),
    );
    builder.finish()
}
