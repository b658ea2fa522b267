use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::PlotArea;
use crate::error::{ChartError, ChartResult};

pub const MIN_DIMENSION: u32 = 1;
pub const MAX_DIMENSION: u32 = 4096;

const TOP_MARGIN_WITH_TITLE: u32 = 40;
const TOP_MARGIN_WITHOUT_TITLE: u32 = 20;
const BOTTOM_MARGIN_WITH_X_LABEL: u32 = 50;
const BOTTOM_MARGIN_WITHOUT_X_LABEL: u32 = 30;
const LEFT_MARGIN_WITH_Y_LABEL: u32 = 60;
const LEFT_MARGIN_WITHOUT_Y_LABEL: u32 = 40;

/// Chart variant tag. Parsing is the single point where unknown tags are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Pie,
}

impl ChartType {
    pub const ALL: [Self; 3] = [Self::Line, Self::Bar, Self::Pie];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
        }
    }

    /// Line and bar charts draw axes inside margins; pie charts do not.
    #[must_use]
    pub const fn uses_axes(self) -> bool {
        !matches!(self, Self::Pie)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(tag: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|chart_type| chart_type.as_str() == tag)
            .ok_or_else(|| ChartError::UnsupportedChartType(tag.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub background: String,
    pub axis: String,
    pub grid: String,
    pub line: String,
    pub bar: String,
    pub text: String,
    pub title: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_owned(),
            axis: "#333333".to_owned(),
            grid: "#dddddd".to_owned(),
            line: "#3366cc".to_owned(),
            bar: "#3366cc".to_owned(),
            text: "#333333".to_owned(),
            title: "#000000".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: TOP_MARGIN_WITH_TITLE,
            right: 20,
            bottom: BOTTOM_MARGIN_WITH_X_LABEL,
            left: LEFT_MARGIN_WITH_Y_LABEL,
        }
    }
}

impl fmt::Display for Margins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top={} right={} bottom={} left={}",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Fully resolved render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub show_grid: bool,
    pub chart_type: ChartType,
    pub colors: ColorScheme,
    pub margins: Margins,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 500,
            height: 300,
            title: None,
            x_label: None,
            y_label: None,
            show_grid: true,
            chart_type: ChartType::Line,
            colors: ColorScheme::default(),
            margins: Margins::default(),
        }
    }
}

pub type OptionFn = Arc<dyn Fn(&mut RenderOptions) + Send + Sync + 'static>;

/// One independent mutation of `RenderOptions`.
///
/// Title and axis-label overrides also re-derive the matching margin.
#[derive(Clone)]
pub enum OptionOverride {
    Title(Option<String>),
    Dimensions { width: u32, height: u32 },
    XLabel(Option<String>),
    YLabel(Option<String>),
    Grid(bool),
    Colors(ColorScheme),
    Margins(Margins),
    ChartType(ChartType),
    Custom(OptionFn),
}

impl fmt::Debug for OptionOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(title) => f.debug_tuple("Title").field(title).finish(),
            Self::Dimensions { width, height } => f
                .debug_struct("Dimensions")
                .field("width", width)
                .field("height", height)
                .finish(),
            Self::XLabel(label) => f.debug_tuple("XLabel").field(label).finish(),
            Self::YLabel(label) => f.debug_tuple("YLabel").field(label).finish(),
            Self::Grid(show) => f.debug_tuple("Grid").field(show).finish(),
            Self::Colors(colors) => f.debug_tuple("Colors").field(colors).finish(),
            Self::Margins(margins) => f.debug_tuple("Margins").field(margins).finish(),
            Self::ChartType(chart_type) => f.debug_tuple("ChartType").field(chart_type).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl OptionOverride {
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self::Title(non_empty(title.into()))
    }

    #[must_use]
    pub fn x_label(label: impl Into<String>) -> Self {
        Self::XLabel(non_empty(label.into()))
    }

    #[must_use]
    pub fn y_label(label: impl Into<String>) -> Self {
        Self::YLabel(non_empty(label.into()))
    }

    #[must_use]
    pub fn custom(mutation: impl Fn(&mut RenderOptions) + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(mutation))
    }

    pub fn apply(&self, options: &mut RenderOptions) {
        match self {
            Self::Title(title) => {
                options.title = title.clone();
                options.margins.top = if options.title.is_some() {
                    TOP_MARGIN_WITH_TITLE
                } else {
                    TOP_MARGIN_WITHOUT_TITLE
                };
            }
            Self::Dimensions { width, height } => {
                options.width = *width;
                options.height = *height;
            }
            Self::XLabel(label) => {
                options.x_label = label.clone();
                options.margins.bottom = if options.x_label.is_some() {
                    BOTTOM_MARGIN_WITH_X_LABEL
                } else {
                    BOTTOM_MARGIN_WITHOUT_X_LABEL
                };
            }
            Self::YLabel(label) => {
                options.y_label = label.clone();
                options.margins.left = if options.y_label.is_some() {
                    LEFT_MARGIN_WITH_Y_LABEL
                } else {
                    LEFT_MARGIN_WITHOUT_Y_LABEL
                };
            }
            Self::Grid(show) => options.show_grid = *show,
            Self::Colors(colors) => options.colors = colors.clone(),
            Self::Margins(margins) => options.margins = *margins,
            Self::ChartType(chart_type) => options.chart_type = *chart_type,
            Self::Custom(mutation) => mutation(options),
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

impl RenderOptions {
    /// Applies `overrides` in order on top of the defaults; later ones win.
    #[must_use]
    pub fn resolve(overrides: impl IntoIterator<Item = OptionOverride>) -> Self {
        let mut options = Self::default();
        for option_override in overrides {
            option_override.apply(&mut options);
        }
        options
    }

    #[must_use]
    pub fn with(mut self, option_override: OptionOverride) -> Self {
        option_override.apply(&mut self);
        self
    }

    /// Sets the title; a non-empty title reserves a 40px top margin, else 20px.
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with(OptionOverride::title(title))
    }

    #[must_use]
    pub fn with_dimensions(self, width: u32, height: u32) -> Self {
        self.with(OptionOverride::Dimensions { width, height })
    }

    /// Sets the x-axis label; a non-empty label reserves a 50px bottom margin, else 30px.
    #[must_use]
    pub fn with_x_label(self, label: impl Into<String>) -> Self {
        self.with(OptionOverride::x_label(label))
    }

    /// Sets the y-axis label; a non-empty label reserves a 60px left margin, else 40px.
    #[must_use]
    pub fn with_y_label(self, label: impl Into<String>) -> Self {
        self.with(OptionOverride::y_label(label))
    }

    #[must_use]
    pub fn with_grid(self, show: bool) -> Self {
        self.with(OptionOverride::Grid(show))
    }

    #[must_use]
    pub fn with_colors(self, colors: ColorScheme) -> Self {
        self.with(OptionOverride::Colors(colors))
    }

    #[must_use]
    pub fn with_margins(self, margins: Margins) -> Self {
        self.with(OptionOverride::Margins(margins))
    }

    #[must_use]
    pub fn with_chart_type(self, chart_type: ChartType) -> Self {
        self.with(OptionOverride::ChartType(chart_type))
    }

    /// Canvas minus margins. Margins wider than the canvas collapse the
    /// area to zero width or height instead of going negative.
    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        let m = self.margins;
        PlotArea::new(
            f64::from(m.left),
            f64::from(m.top),
            (f64::from(self.width) - f64::from(m.left) - f64::from(m.right)).max(0.0),
            (f64::from(self.height) - f64::from(m.top) - f64::from(m.bottom)).max(0.0),
        )
    }

    /// Checks both canvas dimensions against the supported range. Margins are
    /// not checked; see [`RenderOptions::plot_area`].
    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(ChartError::InvalidConfiguration(format!(
                    "{name} must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartType, Margins, OptionOverride, RenderOptions};

    #[test]
    fn chart_type_round_trips_through_its_tag() {
        for chart_type in ChartType::ALL {
            assert_eq!(chart_type.as_str().parse::<ChartType>().ok(), Some(chart_type));
        }
        assert!("scatter".parse::<ChartType>().is_err());
        assert!("Line".parse::<ChartType>().is_err());
    }

    #[test]
    fn default_plot_area_excludes_margins() {
        let area = RenderOptions::default().plot_area();
        assert_eq!(area.left, 60.0);
        assert_eq!(area.top, 40.0);
        assert_eq!(area.width, 420.0);
        assert_eq!(area.height, 210.0);
    }

    #[test]
    fn custom_override_runs_in_sequence() {
        let options = RenderOptions::resolve([
            OptionOverride::custom(|o| o.width = 640),
            OptionOverride::Dimensions {
                width: 320,
                height: 200,
            },
        ]);
        assert_eq!(options.width, 320);
        assert_eq!(options.height, 200);
    }

    #[test]
    fn margins_that_swallow_the_canvas_collapse_the_plot_area() {
        let tiny = RenderOptions::default().with_dimensions(50, 50);
        assert!(tiny.validate().is_ok());
        let area = tiny.plot_area();
        assert_eq!((area.left, area.top), (60.0, 40.0));
        assert_eq!((area.width, area.height), (0.0, 0.0));
        assert!(!area.is_valid());

        let narrow = RenderOptions::default().with_dimensions(60, 300).plot_area();
        assert_eq!((narrow.width, narrow.height), (0.0, 210.0));
    }

    #[test]
    fn margins_display_as_key_value_pairs() {
        assert_eq!(
            Margins::default().to_string(),
            "top=40 right=20 bottom=50 left=60"
        );
    }
}
