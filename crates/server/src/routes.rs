pub mod vehicles;

use std::any::Any;
use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{error, Level};
use utoipa::OpenApi;

use common::types::Health;
use service::vehicle::service::VehicleService;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

/// Shared handler state: the vehicle service behind its capability trait.
#[derive(Clone)]
pub struct ServerState {
    pub vehicles: Arc<dyn VehicleService>,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "handler panicked");
    JsonApiError::internal().into_response()
}

/// Build the full application router: vehicle routes plus health and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // static segments (fuel-type, dimensions, ...) win over `:id` in axum's matcher
    let vehicle_routes = Router::new()
        .route("/vehicles", get(vehicles::get_all).post(vehicles::create))
        .route(
            "/vehicles/brand/:brand/between/:start_year/:end_year",
            get(vehicles::get_by_brand_and_range_year),
        )
        .route("/vehicles/color/:color/year/:year", get(vehicles::get_by_color_and_year))
        .route("/vehicles/average-speed/brand/:brand", get(vehicles::get_average_speed_by_brand))
        .route("/vehicles/:id/update-speed", patch(vehicles::update_max_speed))
        .route("/vehicles/fuel-type/:type", get(vehicles::get_by_fuel_type))
        .route("/vehicles/:id", delete(vehicles::delete))
        .route("/vehicles/transmission/:type", get(vehicles::get_by_transmission_type))
        .route("/vehicles/:id/update-fuel", patch(vehicles::update_fuel_type))
        .route(
            "/vehicles/average-capacity/brand/:brand",
            get(vehicles::get_average_capacity_by_brand),
        )
        .route("/vehicles/dimensions", get(vehicles::get_by_dimensions))
        .route("/vehicles/weight", get(vehicles::get_by_weight_range));

    // last layer added sees the request first: trace, cors, panic recovery
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(vehicle_routes)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
