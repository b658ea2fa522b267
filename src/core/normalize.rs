use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::core::{ChartSeries, DataPoint, XyPoint};
use crate::error::{ChartError, ChartResult};

/// Raw series shapes accepted at the rendering boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesInput {
    /// Label to value mapping; sorted by label during normalization.
    Mapping(IndexMap<String, f64>),
    /// Already canonical points; passed through unchanged.
    Points(Vec<DataPoint>),
    /// `{x, y}` pairs renamed into points.
    Pairs(Vec<XyPoint>),
    /// Loosely-typed `[label, value]` rows.
    Rows(Vec<Vec<Value>>),
}

impl SeriesInput {
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Points(_) => "points",
            Self::Pairs(_) => "pairs",
            Self::Rows(_) => "rows",
        }
    }

    /// Classifies a JSON document into one of the supported shapes.
    ///
    /// - object of numbers -> `Mapping`
    /// - array of arrays -> `Rows`
    /// - array of objects carrying `x` -> `Pairs`
    /// - array of objects carrying `label` -> `Points`
    /// - empty array -> empty `Points`
    pub fn from_json(value: &Value) -> ChartResult<Self> {
        match value {
            Value::Object(map) => {
                let mut mapping = IndexMap::with_capacity(map.len());
                for (label, value) in map {
                    let number = value.as_f64().ok_or_else(|| {
                        ChartError::UnsupportedShape(format!(
                            "mapping value for `{label}` is not a number"
                        ))
                    })?;
                    mapping.insert(label.clone(), number);
                }
                Ok(Self::Mapping(mapping))
            }
            Value::Array(items) => match items.first() {
                None => Ok(Self::Points(Vec::new())),
                Some(Value::Array(_)) => rows_from_json(items),
                Some(Value::Object(first)) if first.contains_key("x") => {
                    serde_json::from_value(value.clone())
                        .map(Self::Pairs)
                        .map_err(|e| ChartError::UnsupportedShape(format!("malformed pairs: {e}")))
                }
                Some(Value::Object(first)) if first.contains_key("label") => {
                    serde_json::from_value(value.clone())
                        .map(Self::Points)
                        .map_err(|e| ChartError::UnsupportedShape(format!("malformed points: {e}")))
                }
                Some(other) => Err(ChartError::UnsupportedShape(format!(
                    "array of {}",
                    json_kind(other)
                ))),
            },
            other => Err(ChartError::UnsupportedShape(json_kind(other).to_owned())),
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::UnsupportedShape(format!("malformed json: {e}")))?;
        Self::from_json(&value)
    }
}

fn rows_from_json(items: &[Value]) -> ChartResult<SeriesInput> {
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(row) => rows.push(row.clone()),
            other => {
                return Err(ChartError::UnsupportedShape(format!(
                    "mixed rows: found {}",
                    json_kind(other)
                )));
            }
        }
    }
    Ok(SeriesInput::Rows(rows))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<&Value> for SeriesInput {
    type Error = ChartError;

    fn try_from(value: &Value) -> ChartResult<Self> {
        Self::from_json(value)
    }
}

impl From<IndexMap<String, f64>> for SeriesInput {
    fn from(mapping: IndexMap<String, f64>) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<HashMap<String, f64>> for SeriesInput {
    fn from(mapping: HashMap<String, f64>) -> Self {
        Self::Mapping(mapping.into_iter().collect())
    }
}

impl From<BTreeMap<String, f64>> for SeriesInput {
    fn from(mapping: BTreeMap<String, f64>) -> Self {
        Self::Mapping(mapping.into_iter().collect())
    }
}

impl From<Vec<DataPoint>> for SeriesInput {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::Points(points)
    }
}

impl From<ChartSeries> for SeriesInput {
    fn from(series: ChartSeries) -> Self {
        Self::Points(series.into_points())
    }
}

impl From<Vec<XyPoint>> for SeriesInput {
    fn from(pairs: Vec<XyPoint>) -> Self {
        Self::Pairs(pairs)
    }
}

impl From<Vec<Vec<Value>>> for SeriesInput {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        Self::Rows(rows)
    }
}

/// Converts any supported shape into a canonical `ChartSeries`.
///
/// Fails without partial output when a value cannot be read as a finite number.
pub fn normalize(input: impl Into<SeriesInput>) -> ChartResult<ChartSeries> {
    let input = input.into();
    let shape = input.shape_name();
    let points = match input {
        SeriesInput::Mapping(mapping) => {
            let mut points: Vec<DataPoint> = mapping
                .into_iter()
                .map(|(label, value)| DataPoint::new(label, value))
                .collect();
            points.sort_by(|a, b| a.label.cmp(&b.label));
            points
        }
        SeriesInput::Points(points) => points,
        SeriesInput::Pairs(pairs) => pairs
            .into_iter()
            .map(|pair| DataPoint::new(pair.x, pair.y))
            .collect(),
        SeriesInput::Rows(rows) => rows_to_points(rows)?,
    };

    if let Some(point) = points.iter().find(|point| !point.value.is_finite()) {
        return Err(ChartError::InvalidValue(format!(
            "value for `{}` must be finite",
            point.label
        )));
    }

    debug!(shape, count = points.len(), "normalized series");
    Ok(ChartSeries::new(points))
}

fn rows_to_points(rows: Vec<Vec<Value>>) -> ChartResult<Vec<DataPoint>> {
    let mut points = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let [label, value, ..] = row.as_slice() else {
            trace!(index, len = row.len(), "skipping short row");
            continue;
        };
        points.push(DataPoint::new(coerce_label(label), coerce_value(value)?));
    }
    Ok(points)
}

fn coerce_label(value: &Value) -> String {
    match value {
        Value::String(label) => label.clone(),
        other => other.to_string(),
    }
}

fn coerce_value(value: &Value) -> ChartResult<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|number| number.is_finite())
        .ok_or_else(|| ChartError::InvalidValue(format!("invalid value type: {value}")))
}
