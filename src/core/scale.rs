use crate::core::ChartSeries;
use crate::error::{ChartError, ChartResult};

/// Pixel region inside the margins where data geometry is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.left + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        self.top + self.height / 2.0
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Padding applied on both sides of a zero-width value range.
#[must_use]
pub fn uniform_padding(value: f64) -> f64 {
    (value.abs() * 0.1).max(1.0)
}

/// Linear value-to-pixel mapping along the y axis.
///
/// A zero-width range is widened by [`uniform_padding`] so `min < max`
/// always holds after construction. Spans are computed on halved bounds, so
/// any pair of finite values maps to finite pixels even when `max - min`
/// would overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    min: f64,
    max: f64,
    uniform: bool,
}

impl ValueScale {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidValue(
                "scale bounds must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(ChartError::InvalidValue(format!(
                "scale min {min} exceeds max {max}"
            )));
        }

        if min == max {
            let padding = uniform_padding(min);
            return Ok(Self {
                min: (min - padding).max(f64::MIN),
                max: (max + padding).min(f64::MAX),
                uniform: true,
            });
        }

        Ok(Self {
            min,
            max,
            uniform: false,
        })
    }

    /// Fits the scale to the series, or `None` for an empty series.
    pub fn from_series(series: &ChartSeries) -> ChartResult<Option<Self>> {
        series
            .value_range()
            .map(|(min, max)| Self::new(min, max))
            .transpose()
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// `true` when every value in the source range was equal.
    #[must_use]
    pub fn is_uniform(self) -> bool {
        self.uniform
    }

    fn half_span(self) -> f64 {
        self.max / 2.0 - self.min / 2.0
    }

    /// Height in pixels of `value` above the bottom of `area`.
    #[must_use]
    pub fn scaled_height(self, value: f64, area: PlotArea) -> f64 {
        (value / 2.0 - self.min / 2.0) / self.half_span() * area.height
    }

    #[must_use]
    pub fn value_to_pixel(self, value: f64, area: PlotArea) -> f64 {
        area.bottom() - self.scaled_height(value, area)
    }

    /// `count` evenly spaced values from `min` to `max`, both inclusive.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => (0..count)
                .map(|i| {
                    let t = i as f64 / (count - 1) as f64;
                    self.min * (1.0 - t) + self.max * t
                })
                .collect(),
        }
    }
}
