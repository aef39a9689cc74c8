use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Inclusive bounds accepted by the max speed update.
pub const MAX_SPEED_RANGE: RangeInclusive<f64> = 0.0..=500.0;

/// Fuel types accepted by the fuel update, in canonical spelling.
pub const FUEL_TYPES: [&str; 4] = ["gasoline", "diesel", "biodiesel", "gas"];

/// Fields that must be present in a creation payload, checked in this order.
pub const REQUIRED_FIELDS: [&str; 5] = ["brand", "model", "registration", "color", "year"];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

/// A vehicle record. JSON field names follow the public API shape,
/// with dimensions flattened into the top-level object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    /// 0 means "not assigned yet"
    pub id: u32,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    #[serde(rename = "year")]
    pub fabrication_year: i32,
    #[serde(rename = "passengers")]
    pub capacity: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

impl Vehicle {
    /// Parse a creation payload: must be a JSON object carrying every
    /// [`REQUIRED_FIELDS`] entry; everything else defaults. A `null` value
    /// counts as present for the required check and then takes the zero value.
    pub fn from_create_payload(body: &[u8]) -> Result<Self, ModelError> {
        let mut value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ModelError::Validation(e.to_string()))?;
        let obj = value
            .as_object_mut()
            .ok_or_else(|| ModelError::Validation("body must be a JSON object".into()))?;
        check_required_fields(obj, &REQUIRED_FIELDS)?;
        obj.retain(|_, v| !v.is_null());
        serde_json::from_value(value).map_err(|e| ModelError::Validation(e.to_string()))
    }
}

/// Report the first field in `fields` missing from `obj`.
pub fn check_required_fields(
    obj: &serde_json::Map<String, serde_json::Value>,
    fields: &[&str],
) -> Result<(), ModelError> {
    match fields.iter().find(|f| !obj.contains_key(**f)) {
        Some(missing) => Err(ModelError::MissingField((*missing).to_string())),
        None => Ok(()),
    }
}

pub fn is_valid_max_speed(value: f64) -> bool {
    MAX_SPEED_RANGE.contains(&value)
}

/// Case-insensitive lookup into [`FUEL_TYPES`].
pub fn canonical_fuel_type(value: &str) -> Option<&'static str> {
    FUEL_TYPES.iter().copied().find(|f| f.eq_ignore_ascii_case(value))
}
