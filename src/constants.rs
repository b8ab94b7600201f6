/// User agent string for HTTP requests
pub const USER_AGENT: &str = "kitesurf-forecast-mcp/0.1.0";

/// Name advertised by the discovery route and the MCP server info
pub const SERVICE_NAME: &str = "Kitesurf Forecast MCP";

/// Open-Meteo Marine forecast endpoint
pub const OPEN_METEO_MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

/// NOAA CO-OPS data getter endpoint
pub const NOAA_DATAGETTER_URL: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

/// Application name NOAA asks callers to identify themselves with
pub const NOAA_APPLICATION: &str = "kitesurf-mcp";

/// Tool names, shared by discovery and the MCP tool router
pub const SPOT_FORECAST_TOOL: &str = "spot.forecast";
pub const TIDE_PREDICTIONS_TOOL: &str = "tide.predictions";

/// Forecast window bounds, in hours
pub const DEFAULT_HOURS: u32 = 48;
pub const MIN_HOURS: u32 = 1;
pub const MAX_HOURS: u32 = 168;

/// Hourly series requested from Open-Meteo Marine
pub const MARINE_HOURLY_FIELDS: [&str; 6] = [
    "wind_speed_10m",
    "wind_gusts_10m",
    "wind_direction_10m",
    "wave_height",
    "wave_direction",
    "wave_period",
];

pub const DEFAULT_TIME_ZONE: &str = "lst_ldt";
pub const DEFAULT_UNITS: &str = "metric";
