//! Vehicle store and service layer.
//! - `vehicle::repository` owns the records and every query/mutation primitive.
//! - `vehicle::service` is the capability interface the HTTP layer depends on.
//! - `loader` seeds the store from a JSON file at startup.

pub mod errors;
pub mod loader;
pub mod vehicle;
