use crate::models::{
    ForecastRow, HourlyColumns, NoaaPrediction, NoaaResponse, TidePrediction,
};
use serde_json::Value;

/// Transposes Open-Meteo's columnar hourly series into at most `hours` rows.
///
/// Rows are driven by the `time` column; any other column that is absent,
/// short, or null at an index yields `None` for that field.
pub fn format_hourly_rows(columns: &HourlyColumns, hours: usize) -> Vec<ForecastRow> {
    let time = columns.time.as_deref().unwrap_or_default();
    let n = hours.min(time.len());

    (0..n)
        .map(|i| ForecastRow {
            time: time[i].clone(),
            wind_kts: value_at(&columns.wind_speed_10m, i),
            gust_kts: value_at(&columns.wind_gusts_10m, i),
            wind_deg: value_at(&columns.wind_direction_10m, i),
            wave_m: value_at(&columns.wave_height, i),
            swell_period_s: value_at(&columns.wave_period, i),
            swell_deg: value_at(&columns.wave_direction, i),
        })
        .collect()
}

fn value_at(column: &Option<Vec<Option<f64>>>, i: usize) -> Option<f64> {
    column.as_ref().and_then(|c| c.get(i).copied().flatten())
}

/// Renames NOAA's compact prediction fields and coerces heights to numbers.
pub fn format_tide_predictions(predictions: Vec<NoaaPrediction>) -> Vec<TidePrediction> {
    predictions
        .into_iter()
        .map(|p| TidePrediction {
            height: p.v.as_ref().and_then(parse_height),
            time: p.t,
            kind: p.kind,
        })
        .collect()
}

fn parse_height(raw: &Value) -> Option<f64> {
    let height = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    height.filter(|h| h.is_finite())
}

/// Message of an error NOAA embedded in an otherwise successful response.
///
/// NOAA reports `{"error": {"message": ...}}`; a bare string is accepted too,
/// and anything else falls back to a generic message.
pub fn embedded_error_message(response: &NoaaResponse) -> Option<String> {
    let error = response.error.as_ref()?;

    let message = match error {
        Value::Null | Value::Bool(false) => return None,
        Value::String(message) => Some(message.clone()),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };

    Some(message.unwrap_or_else(|| "NOAA returned an error".to_string()))
}
