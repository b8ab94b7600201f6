use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Open-Meteo Marine API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MarineResponse {
    #[serde(default)]
    pub hourly: Option<HourlyColumns>,
}

/// Parallel hourly series, aligned by index with `time`.
#[derive(Debug, Default, Deserialize)]
pub struct HourlyColumns {
    #[serde(default)]
    pub time: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub wind_speed_10m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wind_gusts_10m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wind_direction_10m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wave_height: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wave_direction: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wave_period: Option<Vec<Option<f64>>>,
}

// ============================================================================
// NOAA Tides & Currents API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct NoaaResponse {
    #[serde(default)]
    pub predictions: Option<Vec<NoaaPrediction>>,
    /// Present on 200 responses that carry a provider-level failure.
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct NoaaPrediction {
    #[serde(default)]
    pub t: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Height, normally a decimal string but occasionally a bare number.
    #[serde(default)]
    pub v: Option<Value>,
}

// ============================================================================
// Gateway Response Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discovery {
    pub name: String,
    pub version: String,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub time: Option<String>,
    pub wind_kts: Option<f64>,
    pub gust_kts: Option<f64>,
    pub wind_deg: Option<f64>,
    pub wave_m: Option<f64>,
    pub swell_period_s: Option<f64>,
    pub swell_deg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotForecast {
    pub lat: f64,
    pub lon: f64,
    /// Number of rows actually produced, which can be below the requested window.
    pub hours: usize,
    pub hourly: Vec<ForecastRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidePrediction {
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// `None` when the provider sent a height that is not a number.
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidePredictions {
    pub station_id: String,
    pub begin_date: String,
    pub end_date: String,
    pub predictions: Vec<TidePrediction>,
}

// ============================================================================
// Inbound Request Models
// ============================================================================

/// Raw `/spot.forecast` query string, validated by [`crate::query::ForecastQuery`].
#[derive(Debug, Default)]
pub struct ForecastParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub hours: Option<String>,
}

/// Keeps the first value of a repeated key, ignoring unknown keys.
impl FromIterator<(String, String)> for ForecastParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut params.lat,
                "lon" => &mut params.lon,
                "hours" => &mut params.hours,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Raw `/tide.predictions` query string, validated by [`crate::query::TideQuery`].
#[derive(Debug, Default)]
pub struct TideParams {
    pub station_id: Option<String>,
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
    pub time_zone: Option<String>,
    pub units: Option<String>,
}

/// Keeps the first value of a repeated key, ignoring unknown keys.
impl FromIterator<(String, String)> for TideParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "station_id" => &mut params.station_id,
                "begin_date" => &mut params.begin_date,
                "end_date" => &mut params.end_date,
                "time_zone" => &mut params.time_zone,
                "units" => &mut params.units,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SpotForecastRequest {
    /// Latitude of the spot in decimal degrees
    pub lat: f64,
    /// Longitude of the spot in decimal degrees
    pub lon: f64,
    /// Forecast window in hours (1-168, default 48)
    pub hours: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TidePredictionsRequest {
    /// NOAA station id, e.g. "9414290"
    pub station_id: String,
    /// First day, formatted YYYYMMDD
    pub begin_date: String,
    /// Last day, formatted YYYYMMDD
    pub end_date: String,
    /// "gmt" or "lst_ldt" (default)
    pub time_zone: Option<String>,
    /// "english" or "metric" (default)
    pub units: Option<String>,
}
