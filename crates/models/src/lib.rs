pub mod errors;
pub mod vehicle;

pub use vehicle::{Dimensions, Vehicle};
