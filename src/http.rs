//! JSON routes over HTTP.

use axum::{
    extract::{FromRequestParts, Query, State},
    http::{request::Parts, Uri},
    routing::any,
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::error::GatewayError;
use crate::models::{Discovery, ForecastParams, SpotForecast, TideParams, TidePredictions};
use crate::query::{ForecastQuery, TideQuery};
use crate::service::KitesurfService;

/// Prefix the routes were historically served under as a serverless function
pub const LEGACY_PREFIX: &str = "/api/index";

/// Builds the gateway route table.
///
/// Routes match on path alone; the method is not checked.
pub fn router(service: KitesurfService) -> Router {
    Router::new()
        .merge(tool_routes())
        .nest(LEGACY_PREFIX, tool_routes())
        .route(&format!("{}/", LEGACY_PREFIX), any(discovery))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

fn tool_routes() -> Router<KitesurfService> {
    Router::new()
        .route("/", any(discovery))
        .route("/spot.forecast", any(spot_forecast))
        .route("/tide.predictions", any(tide_predictions))
}

/// Query string as ordered key/value pairs.
///
/// Decoding failures are reported in the gateway's JSON error shape.
pub struct QueryPairs<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryPairs<T>
where
    S: Send + Sync,
    T: FromIterator<(String, String)>,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::validation(rejection.body_text()))?;

        Ok(Self(pairs.into_iter().collect()))
    }
}

/// GET / - Tool discovery
async fn discovery(State(service): State<KitesurfService>) -> Json<Discovery> {
    Json(service.describe())
}

/// GET /spot.forecast?lat=..&lon=..&hours=..
async fn spot_forecast(
    State(service): State<KitesurfService>,
    QueryPairs(params): QueryPairs<ForecastParams>,
) -> Result<Json<SpotForecast>, GatewayError> {
    let query = ForecastQuery::from_params(&params)?;
    let forecast = service.get_spot_forecast(&query).await?;
    Ok(Json(forecast))
}

/// GET /tide.predictions?station_id=..&begin_date=..&end_date=..
async fn tide_predictions(
    State(service): State<KitesurfService>,
    QueryPairs(params): QueryPairs<TideParams>,
) -> Result<Json<TidePredictions>, GatewayError> {
    let query = TideQuery::from_params(params)?;
    let predictions = service.get_tide_predictions(&query).await?;
    Ok(Json(predictions))
}

async fn not_found(uri: Uri) -> GatewayError {
    GatewayError::not_found(uri.path())
}
