//! Validation of inbound parameters into upstream-ready queries.

use crate::constants::{DEFAULT_HOURS, DEFAULT_TIME_ZONE, DEFAULT_UNITS, MAX_HOURS, MIN_HOURS};
use crate::error::GatewayError;
use crate::models::{ForecastParams, SpotForecastRequest, TideParams, TidePredictionsRequest};

pub const COORDINATES_REQUIRED: &str = "lat and lon are required numbers";
pub const TIDE_FIELDS_REQUIRED: &str = "station_id, begin_date, end_date are required";

/// A validated spot forecast request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
    pub hours: u32,
}

impl ForecastQuery {
    /// Builds a query from already-typed inputs, clamping `hours`.
    pub fn new(lat: f64, lon: f64, hours: Option<f64>) -> Result<Self, GatewayError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(GatewayError::validation(COORDINATES_REQUIRED));
        }

        Ok(Self {
            lat,
            lon,
            hours: clamp_hours(hours),
        })
    }

    pub fn from_params(params: &ForecastParams) -> Result<Self, GatewayError> {
        let lat = parse_number(params.lat.as_deref());
        let lon = parse_number(params.lon.as_deref());

        match (lat, lon) {
            (Some(lat), Some(lon)) => Self::new(lat, lon, parse_number(params.hours.as_deref())),
            _ => Err(GatewayError::validation(COORDINATES_REQUIRED)),
        }
    }
}

impl TryFrom<SpotForecastRequest> for ForecastQuery {
    type Error = GatewayError;

    fn try_from(request: SpotForecastRequest) -> Result<Self, Self::Error> {
        Self::new(request.lat, request.lon, request.hours)
    }
}

/// Effective forecast window: `[MIN_HOURS, MAX_HOURS]`, or the default when absent.
///
/// Fractional windows round up so a partially requested hour still gets its row.
pub fn clamp_hours(requested: Option<f64>) -> u32 {
    match requested.filter(|h| h.is_finite()) {
        Some(hours) => hours.clamp(f64::from(MIN_HOURS), f64::from(MAX_HOURS)).ceil() as u32,
        None => DEFAULT_HOURS,
    }
}

// An empty value counts as absent, so `hours=` falls back to the default rather than clamping to 1.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
}

/// A validated tide prediction request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TideQuery {
    pub station_id: String,
    pub begin_date: String,
    pub end_date: String,
    pub time_zone: String,
    pub units: String,
}

impl TideQuery {
    pub fn from_params(params: TideParams) -> Result<Self, GatewayError> {
        let required = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        match (
            required(params.station_id),
            required(params.begin_date),
            required(params.end_date),
        ) {
            (Some(station_id), Some(begin_date), Some(end_date)) => Ok(Self {
                station_id,
                begin_date,
                end_date,
                time_zone: params
                    .time_zone
                    .unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string()),
                units: params.units.unwrap_or_else(|| DEFAULT_UNITS.to_string()),
            }),
            _ => Err(GatewayError::validation(TIDE_FIELDS_REQUIRED)),
        }
    }
}

impl TryFrom<TidePredictionsRequest> for TideQuery {
    type Error = GatewayError;

    fn try_from(request: TidePredictionsRequest) -> Result<Self, Self::Error> {
        Self::from_params(TideParams {
            station_id: Some(request.station_id),
            begin_date: Some(request.begin_date),
            end_date: Some(request.end_date),
            time_zone: request.time_zone,
            units: request.units,
        })
    }
}
