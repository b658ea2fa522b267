use crate::core::{ChartType, OptionOverride};
use crate::error::{ChartError, ChartResult};

use super::{ChartRequest, ServiceConfig};

/// A request that passed validation, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ValidatedRequest {
    pub source_id: String,
    pub unit_filter: Option<String>,
    pub chart_type: ChartType,
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

impl ValidatedRequest {
    /// Overrides applied on top of `RenderOptions::default()`.
    ///
    /// Titles and labels are only applied when present, so absent ones keep
    /// the default margins.
    pub fn overrides(&self) -> Vec<OptionOverride> {
        let mut overrides = vec![
            OptionOverride::ChartType(self.chart_type),
            OptionOverride::Dimensions {
                width: self.width,
                height: self.height,
            },
        ];
        if let Some(title) = &self.title {
            overrides.push(OptionOverride::title(title.clone()));
        }
        if let Some(label) = &self.x_label {
            overrides.push(OptionOverride::x_label(label.clone()));
        }
        if let Some(label) = &self.y_label {
            overrides.push(OptionOverride::y_label(label.clone()));
        }
        overrides
    }
}

pub(super) fn validate_request(
    request: &ChartRequest,
    config: &ServiceConfig,
) -> ChartResult<ValidatedRequest> {
    let source_id = request.source_series_id.trim();
    if source_id.is_empty() {
        return Err(ChartError::InvalidRequest(
            "sourceSeriesId must not be empty".to_owned(),
        ));
    }

    let chart_type = match request.chart_type.as_deref() {
        None | Some("") => ChartType::default(),
        Some(tag) => tag.parse()?,
    };

    let width = resolve_dimension("width", request.width, config.default_width, config)?;
    let height = resolve_dimension("height", request.height, config.default_height, config)?;

    Ok(ValidatedRequest {
        source_id: source_id.to_owned(),
        unit_filter: non_empty(request.unit_filter.as_deref()),
        chart_type,
        width,
        height,
        title: non_empty(request.title.as_deref()),
        x_label: non_empty(request.x_label.as_deref()),
        y_label: non_empty(request.y_label.as_deref()),
    })
}

/// Absent or zero means "use the configured default".
fn resolve_dimension(
    name: &str,
    requested: Option<i64>,
    default: u32,
    config: &ServiceConfig,
) -> ChartResult<u32> {
    let Some(value) = requested else {
        return Ok(default);
    };
    let max = config.max_dimension;
    if !(0..=i64::from(max)).contains(&value) {
        return Err(ChartError::InvalidConfiguration(format!(
            "{name} must be between 0 and {max}, got {value}"
        )));
    }
    match u32::try_from(value) {
        Ok(0) => Ok(default),
        Ok(value) => Ok(value),
        Err(_) => Err(ChartError::InvalidConfiguration(format!(
            "{name} is out of range: {value}"
        ))),
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|text| !text.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::validate_request;
    use crate::api::{ChartRequest, ServiceConfig};
    use crate::core::ChartType;
    use crate::error::ChartError;

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        let validated =
            validate_request(&ChartRequest::new("temps"), &ServiceConfig::default())
                .expect("valid");
        assert_eq!(validated.chart_type, ChartType::Line);
        assert_eq!((validated.width, validated.height), (800, 400));
        assert_eq!(validated.unit_filter, None);
    }

    #[test]
    fn zero_dimensions_mean_default() {
        let request = ChartRequest::new("temps").with_dimensions(0, 250);
        let validated = validate_request(&request, &ServiceConfig::default()).expect("valid");
        assert_eq!((validated.width, validated.height), (800, 250));
    }

    #[test]
    fn out_of_range_dimensions_are_rejected() {
        for (width, height) in [(-1, 100), (100, 4097)] {
            let request = ChartRequest::new("temps").with_dimensions(width, height);
            assert!(matches!(
                validate_request(&request, &ServiceConfig::default()),
                Err(ChartError::InvalidConfiguration(_))
            ));
        }
        let request = ChartRequest::new("temps").with_dimensions(4096, 4096);
        assert!(validate_request(&request, &ServiceConfig::default()).is_ok());
    }

    #[test]
    fn unknown_chart_type_is_named_in_the_error() {
        let request = ChartRequest::new("temps").with_chart_type("scatter");
        let err = validate_request(&request, &ServiceConfig::default()).expect_err("invalid");
        assert_eq!(
            err.to_string(),
            "invalid chart type: scatter. Valid types are: line, bar, pie"
        );
    }

    #[test]
    fn blank_source_id_is_rejected() {
        let request = ChartRequest::new("  ");
        assert!(matches!(
            validate_request(&request, &ServiceConfig::default()),
            Err(ChartError::InvalidRequest(_))
        ));
    }
}
