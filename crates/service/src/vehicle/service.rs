use std::sync::Arc;

use async_trait::async_trait;
use models::Vehicle;
use tracing::instrument;

use crate::errors::ServiceError;
use crate::vehicle::repository::VehicleRepository;
use crate::vehicle::VehicleIndex;

/// Capability interface consumed by the HTTP layer.
///
/// Mirrors [`VehicleRepository`] one to one; handlers only ever see this trait.
#[async_trait]
pub trait VehicleService: Send + Sync {
    async fn find_all(&self) -> Result<VehicleIndex, ServiceError>;
    async fn find_by_id(&self, id: u32) -> Result<Vehicle, ServiceError>;
    async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, ServiceError>;
    async fn find_by_color_and_year(
        &self,
        color: &str,
        year: i32,
    ) -> Result<VehicleIndex, ServiceError>;
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
    async fn update_max_speed(&self, id: u32, max_speed: f64) -> Result<Vehicle, ServiceError>;
    async fn update_fuel_type(&self, id: u32, fuel_type: &str) -> Result<Vehicle, ServiceError>;
    async fn delete(&self, id: u32) -> Result<(), ServiceError>;
}

/// Default service: forwards every call to the repository unchanged.
pub struct VehicleDefault<R: VehicleRepository> {
    repo: Arc<R>,
}

impl<R: VehicleRepository> VehicleDefault<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

#[async_trait]
impl<R: VehicleRepository> VehicleService for VehicleDefault<R> {
    async fn find_all(&self) -> Result<VehicleIndex, ServiceError> { self.repo.find_all().await }

    async fn find_by_id(&self, id: u32) -> Result<Vehicle, ServiceError> {
        self.repo.find_by_id(id).await
    }

    #[instrument(skip(self, vehicle), fields(registration = %vehicle.registration))]
    async fn create(&self, vehicle: Vehicle) -> Result<Vehicle, ServiceError> {
        self.repo.create(vehicle).await
    }

    async fn find_by_color_and_year(
        &self,
        color: &str,
        year: i32,
    ) -> Result<VehicleIndex, ServiceError> {
        self.repo.find_by_color_and_year(color, year).await
    }

    async fn find_by_brand_and_range_year(
        &self,
        brand: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<VehicleIndex, ServiceError> {
        self.repo.find_by_brand_and_range_year(brand, start_year, end_year).await
    }

    async fn find_average_speed_by_brand(&self, brand: &str) -> Result<f64, ServiceError> {
        self.repo.find_average_speed_by_brand(brand).await
    }

    async fn find_average_capacity_by_brand(&self, brand: &str) -> Result<f64, ServiceError> {
        self.repo.find_average_capacity_by_brand(brand).await
    }

    async fn find_by_fuel_type(&self, fuel_type: &str) -> Result<VehicleIndex, ServiceError> {
        self.repo.find_by_fuel_type(fuel_type).await
    }

    async fn find_by_transmission_type(
        &self,
        transmission: &str,
    ) -> Result<VehicleIndex, ServiceError> {
        self.repo.find_by_transmission_type(transmission).await
    }

    async fn find_by_dimensions(
        &self,
        min_height: f64,
        max_height: f64,
        min_width: f64,
        max_width: f64,
    ) -> Result<VehicleIndex, ServiceError> {
        self.repo.find_by_dimensions(min_height, max_height, min_width, max_width).await
    }

    async fn find_by_weight_range(
        &self,
        min_weight: f64,
        max_weight: f64,
    ) -> Result<VehicleIndex, ServiceError> {
        self.repo.find_by_weight_range(min_weight, max_weight).await
    }

    #[instrument(skip(self))]
    async fn update_max_speed(&self, id: u32, max_speed: f64) -> Result<Vehicle, ServiceError> {
        self.repo.update_max_speed(id, max_speed).await
    }

    #[instrument(skip(self))]
    async fn update_fuel_type(&self, id: u32, fuel_type: &str) -> Result<Vehicle, ServiceError> {
        self.repo.update_fuel_type(id, fuel_type).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u32) -> Result<(), ServiceError> { self.repo.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::repository::VehicleMap;

    fn service() -> VehicleDefault<VehicleMap> {
        VehicleDefault::new(Arc::new(VehicleMap::default()))
    }

    fn car(registration: &str) -> Vehicle {
        Vehicle {
            brand: "Renault".into(),
            registration: registration.into(),
            max_speed: 170.0,
            capacity: 4,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn forwards_to_repository() -> anyhow::Result<()> {
        let svc = service();
        let created = svc.create(car("R-1")).await?;
        assert_eq!(created.id, 1);
        assert_eq!(svc.find_all().await?.len(), 1);
        assert_eq!(svc.find_by_id(1).await?.registration, "R-1");
        assert_eq!(svc.find_average_speed_by_brand("Renault").await?, 170.0);
        assert_eq!(svc.find_average_capacity_by_brand("Renault").await?, 4.0);

        assert_eq!(svc.update_max_speed(1, 120.0).await?.max_speed, 120.0);
        let updated = svc.update_fuel_type(1, "GASOLINE").await?;
        assert_eq!(updated, svc.find_by_id(1).await?);
        assert_eq!(updated.max_speed, 120.0);
        assert_eq!(updated.fuel_type, "gasoline");

        svc.delete(1).await?;
        assert!(matches!(svc.find_by_id(1).await, Err(ServiceError::NotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn passes_errors_through_unchanged() {
        let svc = service();
        svc.create(car("R-1")).await.unwrap();
        assert!(matches!(svc.create(car("R-1")).await, Err(ServiceError::AlreadyExists)));
        assert!(matches!(svc.update_max_speed(9, 600.0).await, Err(ServiceError::InvalidRange)));
        let res = svc.update_fuel_type(1, "hydrogen").await;
        assert!(matches!(res, Err(ServiceError::InvalidFuelType)));
        assert!(matches!(svc.find_by_fuel_type("diesel").await, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let svc: Arc<dyn VehicleService> = Arc::new(service());
        svc.create(car("R-9")).await.unwrap();
        assert_eq!(svc.find_by_weight_range(0.0, 0.0).await.unwrap().len(), 1);
    }
}
