pub mod normalize;
pub mod options;
pub mod primitives;
pub mod scale;
pub mod types;

pub use normalize::{SeriesInput, normalize};
pub use options::{
    ChartType, ColorScheme, Margins, OptionFn, OptionOverride, RenderOptions,
    MAX_DIMENSION, MIN_DIMENSION,
};
pub use primitives::{format_number, format_percentage};
pub use scale::{PlotArea, ValueScale};
pub use types::{ChartSeries, DataPoint, XyPoint};
