use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Vehicle as exchanged over HTTP; dimensions are flattened.
#[derive(ToSchema)]
pub struct VehicleDoc {
    pub id: Option<u32>,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub year: i32,
    pub passengers: Option<i32>,
    pub max_speed: Option<f64>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
}

#[derive(ToSchema)]
pub struct UpdateMaxSpeedDoc { pub max_speed: f64 }

#[derive(ToSchema)]
pub struct UpdateFuelTypeDoc {
    /// One of gasoline, diesel, biodiesel, gas (any case)
    pub fuel_type: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::vehicles::get_all,
        crate::routes::vehicles::create,
        crate::routes::vehicles::get_by_brand_and_range_year,
        crate::routes::vehicles::get_by_color_and_year,
        crate::routes::vehicles::get_average_speed_by_brand,
        crate::routes::vehicles::update_max_speed,
        crate::routes::vehicles::get_by_fuel_type,
        crate::routes::vehicles::delete,
        crate::routes::vehicles::get_by_transmission_type,
        crate::routes::vehicles::update_fuel_type,
        crate::routes::vehicles::get_average_capacity_by_brand,
        crate::routes::vehicles::get_by_dimensions,
        crate::routes::vehicles::get_by_weight_range,
    ),
    components(
        schemas(
            HealthResponse,
            VehicleDoc,
            UpdateMaxSpeedDoc,
            UpdateFuelTypeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "vehicles")
    )
)]
pub struct ApiDoc;
