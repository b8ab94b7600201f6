use anyhow::Result;
use reqwest::Client;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::config::UpstreamEndpoints;
use crate::constants::{
    MARINE_HOURLY_FIELDS, NOAA_APPLICATION, SERVICE_NAME, SPOT_FORECAST_TOOL,
    TIDE_PREDICTIONS_TOOL, USER_AGENT,
};
use crate::error::GatewayError;
use crate::formatters::{embedded_error_message, format_hourly_rows, format_tide_predictions};
use crate::models::{
    Discovery, MarineResponse, NoaaResponse, SpotForecast, SpotForecastRequest,
    TidePredictions, TidePredictionsRequest,
};
use crate::query::{ForecastQuery, TideQuery};

const OPEN_METEO: &str = "Open-Meteo";
const NOAA: &str = "NOAA";

/// Forecast and tide adapters, shared by the HTTP routes and the MCP tools
#[derive(Clone)]
pub struct KitesurfService {
    client: Arc<Client>,
    endpoints: Arc<UpstreamEndpoints>,
    tool_router: ToolRouter<Self>,
}

impl KitesurfService {
    /// Creates a new service instance calling the given provider endpoints
    pub fn new(endpoints: UpstreamEndpoints) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoints: Arc::new(endpoints),
            tool_router: Self::tool_router(),
        })
    }

    /// Makes one HTTP GET request and deserializes the JSON response.
    ///
    /// A non-2xx status becomes an upstream error labelled with `provider`;
    /// transport and decoding failures are left unclassified.
    async fn make_request<T, Q>(&self, provider: &str, url: &str, query: &Q) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} request failed with status: {}", provider, status);
            return Err(GatewayError::upstream(format!("{} {}", provider, status.as_u16())));
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Static self-description listing the callable tools
    pub fn describe(&self) -> Discovery {
        Discovery {
            name: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            tools: vec![
                SPOT_FORECAST_TOOL.to_string(),
                TIDE_PREDICTIONS_TOOL.to_string(),
            ],
        }
    }

    /// Gets hourly wind and wave rows for a spot from Open-Meteo Marine
    pub async fn get_spot_forecast(&self, query: &ForecastQuery) -> Result<SpotForecast, GatewayError> {
        tracing::info!(
            "Getting spot forecast for coordinates: {}, {} ({}h)",
            query.lat,
            query.lon,
            query.hours
        );

        let params = [
            ("latitude", query.lat.to_string()),
            ("longitude", query.lon.to_string()),
            ("hourly", MARINE_HOURLY_FIELDS.join(",")),
            ("wind_speed_unit", "kn".to_string()),
            ("timezone", "auto".to_string()),
        ];

        let response: MarineResponse = self
            .make_request(OPEN_METEO, &self.endpoints.marine_api_url, &params)
            .await?;

        let hourly = format_hourly_rows(&response.hourly.unwrap_or_default(), query.hours as usize);
        tracing::debug!("Open-Meteo returned {} usable rows", hourly.len());

        Ok(SpotForecast {
            lat: query.lat,
            lon: query.lon,
            hours: hourly.len(),
            hourly,
        })
    }

    /// Gets high/low tide predictions for a NOAA station
    pub async fn get_tide_predictions(&self, query: &TideQuery) -> Result<TidePredictions, GatewayError> {
        tracing::info!(
            "Getting tide predictions for station {} from {} to {}",
            query.station_id,
            query.begin_date,
            query.end_date
        );

        let params = [
            ("product", "predictions"),
            ("application", NOAA_APPLICATION),
            ("format", "json"),
            ("interval", "hilo"),
            ("datum", "MLLW"),
            ("time_zone", query.time_zone.as_str()),
            ("units", query.units.as_str()),
            ("begin_date", query.begin_date.as_str()),
            ("end_date", query.end_date.as_str()),
            ("station", query.station_id.as_str()),
        ];

        let response: NoaaResponse = self
            .make_request(NOAA, &self.endpoints.tides_api_url, &params)
            .await?;

        if let Some(message) = embedded_error_message(&response) {
            tracing::warn!("NOAA reported an error for station {}: {}", query.station_id, message);
            return Err(GatewayError::upstream(message));
        }

        Ok(TidePredictions {
            station_id: query.station_id.clone(),
            begin_date: query.begin_date.clone(),
            end_date: query.end_date.clone(),
            predictions: format_tide_predictions(response.predictions.unwrap_or_default()),
        })
    }
}

#[tool_handler]
impl ServerHandler for KitesurfService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVICE_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Marine forecasts from Open-Meteo and tide predictions from NOAA, \
                reshaped for kitesurf spot planning."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl KitesurfService {
    /// Hourly wind and wave forecast for a spot
    #[tool(
        name = "spot.forecast",
        description = "Get an hourly wind and wave forecast for a spot. Provide lat and lon in decimal degrees and optionally hours (1-168, default 48). Wind speeds are in knots."
    )]
    async fn spot_forecast(
        &self,
        Parameters(request): Parameters<SpotForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        let query = ForecastQuery::try_from(request)?;
        let forecast = self.get_spot_forecast(&query).await?;

        Ok(CallToolResult::success(vec![Content::json(forecast)?]))
    }

    /// High/low tide predictions for a NOAA station
    #[tool(
        name = "tide.predictions",
        description = "Get high/low tide predictions (MLLW datum) for a NOAA station. Provide station_id, begin_date and end_date as YYYYMMDD; time_zone (gmt or lst_ldt) and units (english or metric) are optional."
    )]
    async fn tide_predictions(
        &self,
        Parameters(request): Parameters<TidePredictionsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let query = TideQuery::try_from(request)?;
        let predictions = self.get_tide_predictions(&query).await?;

        Ok(CallToolResult::success(vec![Content::json(predictions)?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{header, StatusCode},
        routing::get,
        Router,
    };
    use rmcp::model::ErrorCode;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    const UNREACHABLE: &str = "http://127.0.0.1:1/unreachable";

    type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn spawn_upstream(status: StatusCode, body: Value) -> (String, SeenQueries) {
        let seen: SeenQueries = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let body = body.to_string();

        let app = Router::new().route(
            "/upstream",
            get(move |Query(query): Query<HashMap<String, String>>| {
                let recorder = recorder.clone();
                let body = body.clone();
                async move {
                    recorder.lock().unwrap().push(query);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/upstream", addr), seen)
    }

    fn service(marine_api_url: &str, tides_api_url: &str) -> KitesurfService {
        KitesurfService::new(UpstreamEndpoints {
            marine_api_url: marine_api_url.to_string(),
            tides_api_url: tides_api_url.to_string(),
        })
        .unwrap()
    }

    fn tool_json(result: &CallToolResult) -> Value {
        let text = &result.content[0].as_text().unwrap().text;
        serde_json::from_str(text).unwrap()
    }

    fn marine_body() -> Value {
        json!({
            "hourly": {
                "time": ["2025-06-01T00:00", "2025-06-01T01:00", "2025-06-01T02:00"],
                "wind_speed_10m": [14.2, 15.8, 17.1],
                "wave_height": [1.1, 1.2]
            }
        })
    }

    #[tokio::test]
    async fn test_spot_forecast_tool_matches_adapter_output() {
        let (url, seen) = spawn_upstream(StatusCode::OK, marine_body()).await;
        let service = service(&url, UNREACHABLE);

        let result = service
            .spot_forecast(Parameters(SpotForecastRequest {
                lat: 36.6,
                lon: -121.9,
                hours: None,
            }))
            .await
            .unwrap();

        let direct = service
            .get_spot_forecast(&ForecastQuery::new(36.6, -121.9, None).unwrap())
            .await
            .unwrap();

        assert_eq!(tool_json(&result), serde_json::to_value(&direct).unwrap());
        assert_eq!(tool_json(&result)["hours"], 3);
        assert_eq!(tool_json(&result)["hourly"][2]["wave_m"], Value::Null);
        assert_eq!(seen.lock().unwrap()[0]["wind_speed_unit"], "kn");
    }

    #[tokio::test]
    async fn test_spot_forecast_tool_clamps_hours() {
        let (url, _) = spawn_upstream(StatusCode::OK, marine_body()).await;
        let service = service(&url, UNREACHABLE);

        let result = service
            .spot_forecast(Parameters(SpotForecastRequest {
                lat: 36.6,
                lon: -121.9,
                hours: Some(0.0),
            }))
            .await
            .unwrap();

        let body = tool_json(&result);
        assert_eq!(body["hours"], 1);
        assert_eq!(body["hourly"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_spot_forecast_tool_rejects_non_finite_coordinates() {
        let service = service(UNREACHABLE, UNREACHABLE);

        let err = service
            .spot_forecast(Parameters(SpotForecastRequest {
                lat: f64::NAN,
                lon: 2.0,
                hours: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "lat and lon are required numbers");
    }

    #[tokio::test]
    async fn test_spot_forecast_tool_upstream_failure_is_internal_error() {
        let (url, _) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;
        let service = service(&url, UNREACHABLE);

        let err = service
            .spot_forecast(Parameters(SpotForecastRequest {
                lat: 1.0,
                lon: 2.0,
                hours: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "Open-Meteo 503");
    }

    #[tokio::test]
    async fn test_tide_predictions_tool() {
        let upstream = json!({
            "predictions": [{ "t": "2025-01-01 04:12", "v": "1.23", "type": "H" }]
        });
        let (url, seen) = spawn_upstream(StatusCode::OK, upstream).await;
        let service = service(UNREACHABLE, &url);

        let result = service
            .tide_predictions(Parameters(TidePredictionsRequest {
                station_id: "9414290".to_string(),
                begin_date: "20250101".to_string(),
                end_date: "20250102".to_string(),
                time_zone: Some("gmt".to_string()),
                units: None,
            }))
            .await
            .unwrap();

        assert_eq!(
            tool_json(&result),
            json!({
                "station_id": "9414290",
                "begin_date": "20250101",
                "end_date": "20250102",
                "predictions": [{ "time": "2025-01-01 04:12", "type": "H", "height": 1.23 }]
            })
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0]["time_zone"], "gmt");
        assert_eq!(seen[0]["units"], "metric");
    }

    #[tokio::test]
    async fn test_tide_predictions_tool_validation_and_embedded_error() {
        let service_without_upstream = service(UNREACHABLE, UNREACHABLE);
        let err = service_without_upstream
            .tide_predictions(Parameters(TidePredictionsRequest {
                station_id: String::new(),
                begin_date: "20250101".to_string(),
                end_date: "20250102".to_string(),
                time_zone: None,
                units: None,
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "station_id, begin_date, end_date are required");

        let upstream = json!({ "error": { "message": "Station not found" } });
        let (url, _) = spawn_upstream(StatusCode::OK, upstream).await;
        let err = service(UNREACHABLE, &url)
            .tide_predictions(Parameters(TidePredictionsRequest {
                station_id: "0".to_string(),
                begin_date: "20250101".to_string(),
                end_date: "20250102".to_string(),
                time_zone: None,
                units: None,
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "Station not found");
    }
}
