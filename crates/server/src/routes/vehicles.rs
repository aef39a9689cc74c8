use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::types::Envelope;
use models::Vehicle;
use serde::Deserialize;
use serde_json::{json, Value};
use service::{errors::ServiceError, vehicle::VehicleIndex};
use tracing::info;

use crate::errors::{
    JsonApiError, INVALID_BODY, INVALID_DIMENSION, INVALID_ID, INVALID_QUERY_PARAM,
    INVALID_YEAR, MISSING_HEIGHT_AND_WIDTH, MISSING_WEIGHT_RANGE,
};
use crate::routes::ServerState;

type Collection = Json<Envelope<VehicleIndex>>;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DimensionsQuery {
    /// `<min>-<max>`
    pub height: Option<String>,
    /// `<min>-<max>`
    pub width: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeightQuery {
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMaxSpeedInput {
    pub max_speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFuelTypeInput {
    pub fuel_type: String,
}

fn collection(v: VehicleIndex) -> Collection {
    let count = v.len();
    Json(Envelope::collection(v, count))
}

fn parse_id(raw: &str) -> Result<u32, JsonApiError> {
    raw.parse::<u32>().map_err(|_| JsonApiError::bad_request(INVALID_ID))
}

fn parse_year(raw: &str) -> Result<i32, JsonApiError> {
    raw.parse::<i32>().map_err(|_| JsonApiError::bad_request(INVALID_YEAR))
}

fn parse_number(raw: &str) -> Result<f64, JsonApiError> {
    raw.trim().parse::<f64>().map_err(|_| JsonApiError::bad_request(INVALID_QUERY_PARAM))
}

/// Split a `<min>-<max>` query value into its two bounds.
pub(crate) fn split_range(raw: &str) -> Result<(f64, f64), JsonApiError> {
    let parts: Vec<&str> = raw.split('-').collect();
    let [min, max] = parts.as_slice() else {
        return Err(JsonApiError::bad_request(INVALID_DIMENSION));
    };
    Ok((parse_number(min)?, parse_number(max)?))
}

/// Any decode failure (bad JSON, missing key, wrong type) maps to the same 400.
fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, JsonApiError> {
    serde_json::from_slice(body).map_err(|_| JsonApiError::bad_request(INVALID_BODY))
}

#[utoipa::path(
    get, path = "/vehicles", tag = "vehicles",
    responses((status = 200, description = "All vehicles keyed by id"))
)]
pub async fn get_all(State(state): State<ServerState>) -> Result<Collection, JsonApiError> {
    Ok(collection(state.vehicles.find_all().await?))
}

#[utoipa::path(
    post, path = "/vehicles", tag = "vehicles",
    request_body = crate::openapi::VehicleDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid body or missing required field"),
        (status = 409, description = "Id or registration already taken")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope<Vehicle>>), JsonApiError> {
    let vehicle = Vehicle::from_create_payload(&body).map_err(ServiceError::from)?;
    let created = state.vehicles.create(vehicle).await?;
    info!(id = created.id, "vehicle created via api");
    Ok((StatusCode::CREATED, Json(Envelope::success(created))))
}

#[utoipa::path(
    get, path = "/vehicles/brand/{brand}/between/{start_year}/{end_year}", tag = "vehicles",
    params(
        ("brand" = String, Path, description = "Exact brand"),
        ("start_year" = i32, Path, description = "Inclusive lower year"),
        ("end_year" = i32, Path, description = "Inclusive upper year")
    ),
    responses(
        (status = 200, description = "Matching vehicles"),
        (status = 400, description = "Year must be a number"),
        (status = 404, description = "No match")
    )
)]
pub async fn get_by_brand_and_range_year(
    State(state): State<ServerState>,
    Path((brand, start_year, end_year)): Path<(String, String, String)>,
) -> Result<Collection, JsonApiError> {
    let start_year = parse_year(&start_year)?;
    let end_year = parse_year(&end_year)?;
    let found = state.vehicles.find_by_brand_and_range_year(&brand, start_year, end_year).await?;
    Ok(collection(found))
}

#[utoipa::path(
    get, path = "/vehicles/color/{color}/year/{year}", tag = "vehicles",
    params(
        ("color" = String, Path, description = "Exact color"),
        ("year" = i32, Path, description = "Fabrication year")
    ),
    responses(
        (status = 200, description = "Matching vehicles"),
        (status = 400, description = "Year must be a number"),
        (status = 404, description = "No match")
    )
)]
pub async fn get_by_color_and_year(
    State(state): State<ServerState>,
    Path((color, year)): Path<(String, String)>,
) -> Result<Collection, JsonApiError> {
    let year = parse_year(&year)?;
    if year < 0 {
        return Err(JsonApiError::bad_request(INVALID_YEAR));
    }
    Ok(collection(state.vehicles.find_by_color_and_year(&color, year).await?))
}

#[utoipa::path(
    get, path = "/vehicles/average-speed/brand/{brand}", tag = "vehicles",
    params(("brand" = String, Path, description = "Exact brand")),
    responses(
        (status = 200, description = "Average max speed"),
        (status = 404, description = "No vehicle of that brand")
    )
)]
pub async fn get_average_speed_by_brand(
    State(state): State<ServerState>,
    Path(brand): Path<String>,
) -> Result<Json<Envelope<Value>>, JsonApiError> {
    let average = state.vehicles.find_average_speed_by_brand(&brand).await?;
    Ok(Json(Envelope::success(json!({"brand": brand, "average_speed": average}))))
}

#[utoipa::path(
    patch, path = "/vehicles/{id}/update-speed", tag = "vehicles",
    params(("id" = u32, Path, description = "Vehicle id")),
    request_body = crate::openapi::UpdateMaxSpeedDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid body or speed out of range"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_max_speed(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Envelope<Vehicle>>, JsonApiError> {
    let id = parse_id(&id)?;
    let input: UpdateMaxSpeedInput = parse_body(&body)?;
    let updated = state.vehicles.update_max_speed(id, input.max_speed).await?;
    Ok(Json(Envelope::success(updated)))
}

#[utoipa::path(
    get, path = "/vehicles/fuel-type/{type}", tag = "vehicles",
    params(("type" = String, Path, description = "Exact fuel type")),
    responses(
        (status = 200, description = "Matching vehicles"),
        (status = 404, description = "No match")
    )
)]
pub async fn get_by_fuel_type(
    State(state): State<ServerState>,
    Path(fuel_type): Path<String>,
) -> Result<Collection, JsonApiError> {
    Ok(collection(state.vehicles.find_by_fuel_type(&fuel_type).await?))
}

#[utoipa::path(
    delete, path = "/vehicles/{id}", tag = "vehicles",
    params(("id" = u32, Path, description = "Vehicle id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    state.vehicles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/vehicles/transmission/{type}", tag = "vehicles",
    params(("type" = String, Path, description = "Exact transmission type")),
    responses(
        (status = 200, description = "Matching vehicles"),
        (status = 404, description = "No match")
    )
)]
pub async fn get_by_transmission_type(
    State(state): State<ServerState>,
    Path(transmission): Path<String>,
) -> Result<Collection, JsonApiError> {
    Ok(collection(state.vehicles.find_by_transmission_type(&transmission).await?))
}

#[utoipa::path(
    patch, path = "/vehicles/{id}/update-fuel", tag = "vehicles",
    params(("id" = u32, Path, description = "Vehicle id")),
    request_body = crate::openapi::UpdateFuelTypeDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid body or fuel type"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_fuel_type(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Envelope<Vehicle>>, JsonApiError> {
    let id = parse_id(&id)?;
    let input: UpdateFuelTypeInput = parse_body(&body)?;
    let updated = state.vehicles.update_fuel_type(id, &input.fuel_type).await?;
    Ok(Json(Envelope::success(updated)))
}

#[utoipa::path(
    get, path = "/vehicles/average-capacity/brand/{brand}", tag = "vehicles",
    params(("brand" = String, Path, description = "Exact brand")),
    responses(
        (status = 200, description = "Average passenger capacity"),
        (status = 404, description = "No vehicle of that brand")
    )
)]
pub async fn get_average_capacity_by_brand(
    State(state): State<ServerState>,
    Path(brand): Path<String>,
) -> Result<Json<Envelope<Value>>, JsonApiError> {
    let average = state.vehicles.find_average_capacity_by_brand(&brand).await?;
    Ok(Json(Envelope::success(json!({"brand": brand, "average_capacity": average}))))
}

#[utoipa::path(
    get, path = "/vehicles/dimensions", tag = "vehicles",
    params(DimensionsQuery),
    responses(
        (status = 200, description = "Matching vehicles"),
        (status = 400, description = "Missing or malformed range"),
        (status = 404, description = "No match")
    )
)]
pub async fn get_by_dimensions(
    State(state): State<ServerState>,
    Query(q): Query<DimensionsQuery>,
) -> Result<Collection, JsonApiError> {
    // both ranges are mandatory; an empty value counts as missing
    let (height, width) = match (q.height.as_deref(), q.width.as_deref()) {
        (Some(h), Some(w)) if !h.is_empty() && !w.is_empty() => (h, w),
        _ => return Err(JsonApiError::bad_request(MISSING_HEIGHT_AND_WIDTH)),
    };
    let (min_height, max_height) = split_range(height)?;
    let (min_width, max_width) = split_range(width)?;
    Ok(collection(
        state.vehicles.find_by_dimensions(min_height, max_height, min_width, max_width).await?,
    ))
}

#[utoipa::path(
    get, path = "/vehicles/weight", tag = "vehicles",
    params(WeightQuery),
    responses(
        (status = 200, description = "Matching vehicles"),
        (status = 400, description = "Missing or malformed bound"),
        (status = 404, description = "No match")
    )
)]
pub async fn get_by_weight_range(
    State(state): State<ServerState>,
    Query(q): Query<WeightQuery>,
) -> Result<Collection, JsonApiError> {
    let (min, max) = match (q.min.as_deref(), q.max.as_deref()) {
        (Some(min), Some(max)) if !min.is_empty() && !max.is_empty() => (min, max),
        _ => return Err(JsonApiError::bad_request(MISSING_WEIGHT_RANGE)),
    };
    let (min, max) = (parse_number(min)?, parse_number(max)?);
    Ok(collection(state.vehicles.find_by_weight_range(min, max).await?))
}
