pub mod repository;
pub mod service;

use std::collections::HashMap;

use models::Vehicle;

/// Query results: an independent copy of the matching records keyed by id.
pub type VehicleIndex = HashMap<u32, Vehicle>;
