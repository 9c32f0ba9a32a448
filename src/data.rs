//! Data adapter: raw rows in, filtered and sorted data points out.

use serde::Serialize;
use serde_json::{Map, Value};

/// One raw data row, as handed over by the data source
pub type Row = Map<String, Value>;

/// Which row fields feed value, argument and color
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMapping {
    pub value_field: String,
    pub argument_field: String,
    pub color_field: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            value_field: "val".to_string(),
            argument_field: "arg".to_string(),
            color_field: "color".to_string(),
        }
    }
}

/// A row that survived filtering
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    pub value: f64,
    pub argument: String,
    pub color: Option<String>,
}

impl DataPoint {
    pub fn new(value: f64) -> Self {
        DataPoint {
            value,
            argument: String::new(),
            color: None,
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = argument.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Parse a JSON array of objects into rows; non-object entries are skipped.
pub fn rows_from_json(source: &str) -> Result<Vec<Row>, serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(source)?;
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect())
}

/// Keep rows with a numeric, finite, non-negative value; optionally sort
/// them by value, largest first. The sort is stable.
pub fn collect_points(rows: &[Row], fields: &FieldMapping, sort: bool) -> Vec<DataPoint> {
    let mut points: Vec<DataPoint> = rows
        .iter()
        .filter_map(|row| {
            let Some(value) = row.get(&fields.value_field).and_then(numeric) else {
                crate::log::trace!(?row, "dropping row without a usable value");
                return None;
            };
            Some(DataPoint {
                value,
                argument: row
                    .get(&fields.argument_field)
                    .map(display)
                    .unwrap_or_default(),
                color: row
                    .get(&fields.color_field)
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect();

    if sort {
        points.sort_by(|a, b| b.value.total_cmp(&a.value));
    }
    points
}

fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
