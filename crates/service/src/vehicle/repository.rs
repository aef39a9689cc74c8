use std::sync::Arc;

use async_trait::async_trait;
use models::{vehicle, Vehicle};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::vehicle::VehicleIndex;

/// Store primitives over the vehicle collection.
///
/// Every read hands back owned copies; the only mutations are
/// `create`, `update_max_speed`, `update_fuel_type` and `delete`.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_all(&self) -> Result<VehicleIndex, ServiceError>;
    async fn find_by_id(&self, id: u32) -> Result<Vehicle, ServiceError>;
    /// Insert a vehicle, assigning an id when `vehicle.id == 0`. Returns the stored copy.
    async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, ServiceError>;
    async fn find_by_color_and_year(
        &self,
        color: &str,
        year: i32,
    ) -> Result<VehicleIndex, ServiceError>;
    /// Both year bounds are inclusive.
    async fn find_by_brand_and_range_year(
        &self,
        brand: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<VehicleIndex, ServiceError>;
    async fn find_average_speed_by_brand(&self, brand: &str) -> Result<f64, ServiceError>;
    async fn find_average_capacity_by_brand(&self, brand: &str) -> Result<f64, ServiceError>;
    async fn find_by_fuel_type(&self, fuel_type: &str) -> Result<VehicleIndex, ServiceError>;
    async fn find_by_transmission_type(
        &self,
        transmission: &str,
    ) -> Result<VehicleIndex, ServiceError>;
    /// Inclusive ranges over height and width.
    async fn find_by_dimensions(
        &self,
        min_height: f64,
        max_height: f64,
        min_width: f64,
        max_width: f64,
    ) -> Result<VehicleIndex, ServiceError>;
    async fn find_by_weight_range(
        &self,
        min_weight: f64,
        max_weight: f64,
    ) -> Result<VehicleIndex, ServiceError>;
    /// Set the max speed and return the updated copy, taken under the same write lock.
    async fn update_max_speed(&self, id: u32, max_speed: f64) -> Result<Vehicle, ServiceError>;
    /// Set the fuel type (stored in canonical spelling) and return the updated copy.
    async fn update_fuel_type(&self, id: u32, fuel_type: &str) -> Result<Vehicle, ServiceError>;
    async fn delete(&self, id: u32) -> Result<(), ServiceError>;
}

struct Table {
    vehicles: VehicleIndex,
    /// Next auto-assigned id; never moves backwards, so deleted ids are not reused.
    next_id: u32,
}

/// In-memory store backed by a map keyed by vehicle id.
#[derive(Clone)]
pub struct VehicleMap {
    inner: Arc<RwLock<Table>>,
}

impl VehicleMap {
    /// Wrap an initial data set as-is.
    pub fn new(db: VehicleIndex) -> Self {
        let next_id = db.keys().copied().max().map_or(1, |max| max.saturating_add(1));
        Self { inner: Arc::new(RwLock::new(Table { vehicles: db, next_id })) }
    }

    async fn filter<F>(&self, pred: F) -> Result<VehicleIndex, ServiceError>
    where
        F: Fn(&Vehicle) -> bool + Send,
    {
        let table = self.inner.read().await;
        let found: VehicleIndex = table
            .vehicles
            .iter()
            .filter(|(_, v)| pred(*v))
            .map(|(id, v)| (*id, v.clone()))
            .collect();
        if found.is_empty() {
            return Err(ServiceError::NotFound);
        }
        Ok(found)
    }

    async fn average_by_brand<F>(&self, brand: &str, field: F) -> Result<f64, ServiceError>
    where
        F: Fn(&Vehicle) -> f64 + Send,
    {
        let table = self.inner.read().await;
        let (sum, count) = table
            .vehicles
            .values()
            .filter(|v| v.brand == brand)
            .fold((0.0, 0usize), |(sum, count), v| (sum + field(v), count + 1));
        if count == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(sum / count as f64)
    }
}

impl Default for VehicleMap {
    fn default() -> Self { Self::new(VehicleIndex::new()) }
}

#[async_trait]
impl VehicleRepository for VehicleMap {
    async fn find_all(&self) -> Result<VehicleIndex, ServiceError> {
        let table = self.inner.read().await;
        Ok(table.vehicles.clone())
    }

    async fn find_by_id(&self, id: u32) -> Result<Vehicle, ServiceError> {
        let table = self.inner.read().await;
        table.vehicles.get(&id).cloned().ok_or(ServiceError::NotFound)
    }

    async fn create(&self, mut vehicle: Vehicle) -> Result<Vehicle, ServiceError> {
        let mut table = self.inner.write().await;
        if vehicle.id == 0 {
            vehicle.id = table.next_id;
        }
        let duplicated = table.vehicles.contains_key(&vehicle.id)
            || table.vehicles.values().any(|v| v.registration == vehicle.registration);
        if duplicated {
            debug!(
                id = vehicle.id,
                registration = %vehicle.registration,
                "vehicle_create_conflict"
            );
            return Err(ServiceError::AlreadyExists);
        }
        if vehicle.id >= table.next_id {
            table.next_id = vehicle
                .id
                .checked_add(1)
                .ok_or_else(|| ServiceError::Internal("vehicle id space exhausted".into()))?;
        }
        table.vehicles.insert(vehicle.id, vehicle.clone());
        info!(id = vehicle.id, registration = %vehicle.registration, "vehicle_created");
        Ok(vehicle)
    }

    async fn find_by_color_and_year(
        &self,
        color: &str,
        year: i32,
    ) -> Result<VehicleIndex, ServiceError> {
        self.filter(|v| v.color == color && v.fabrication_year == year).await
    }

    async fn find_by_brand_and_range_year(
        &self,
        brand: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<VehicleIndex, ServiceError> {
        let years = start_year..=end_year;
        self.filter(|v| v.brand == brand && years.contains(&v.fabrication_year)).await
    }

    async fn find_average_speed_by_brand(&self, brand: &str) -> Result<f64, ServiceError> {
        self.average_by_brand(brand, |v| v.max_speed).await
    }

    async fn find_average_capacity_by_brand(&self, brand: &str) -> Result<f64, ServiceError> {
        self.average_by_brand(brand, |v| f64::from(v.capacity)).await
    }

    async fn find_by_fuel_type(&self, fuel_type: &str) -> Result<VehicleIndex, ServiceError> {
        self.filter(|v| v.fuel_type == fuel_type).await
    }

    async fn find_by_transmission_type(
        &self,
        transmission: &str,
    ) -> Result<VehicleIndex, ServiceError> {
        self.filter(|v| v.transmission == transmission).await
    }

    async fn find_by_dimensions(
        &self,
        min_height: f64,
        max_height: f64,
        min_width: f64,
        max_width: f64,
    ) -> Result<VehicleIndex, ServiceError> {
        self.filter(|v| {
            (min_height..=max_height).contains(&v.dimensions.height)
                && (min_width..=max_width).contains(&v.dimensions.width)
        })
        .await
    }

    async fn find_by_weight_range(
        &self,
        min_weight: f64,
        max_weight: f64,
    ) -> Result<VehicleIndex, ServiceError> {
        self.filter(|v| (min_weight..=max_weight).contains(&v.weight)).await
    }

    async fn update_max_speed(&self, id: u32, max_speed: f64) -> Result<Vehicle, ServiceError> {
        // range is checked before the lookup
        if !vehicle::is_valid_max_speed(max_speed) {
            return Err(ServiceError::InvalidRange);
        }
        let mut table = self.inner.write().await;
        let found = table.vehicles.get_mut(&id).ok_or(ServiceError::NotFound)?;
        found.max_speed = max_speed;
        info!(id, max_speed, "vehicle_max_speed_updated");
        Ok(found.clone())
    }

    async fn update_fuel_type(&self, id: u32, fuel_type: &str) -> Result<Vehicle, ServiceError> {
        let mut table = self.inner.write().await;
        let found = table.vehicles.get_mut(&id).ok_or(ServiceError::NotFound)?;
        let canonical =
            vehicle::canonical_fuel_type(fuel_type).ok_or(ServiceError::InvalidFuelType)?;
        found.fuel_type = canonical.to_string();
        info!(id, fuel_type = canonical, "vehicle_fuel_type_updated");
        Ok(found.clone())
    }

    async fn delete(&self, id: u32) -> Result<(), ServiceError> {
        let mut table = self.inner.write().await;
        table.vehicles.remove(&id).ok_or(ServiceError::NotFound)?;
        info!(id, "vehicle_deleted");
        Ok(())
    }
}
