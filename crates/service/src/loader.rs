//! Initial data loader.
//!
//! Reads a JSON array of vehicles and indexes it by id for the store constructor.

use std::collections::HashSet;
use std::path::PathBuf;

use models::Vehicle;
use tokio::fs;
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::vehicle::VehicleIndex;

pub struct VehicleJsonFile {
    path: PathBuf,
}

impl VehicleJsonFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Load and index the file. Records without an id, or repeating an id or
    /// a registration already taken by an earlier record, are skipped.
    pub async fn load(&self) -> Result<VehicleIndex, ServiceError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| ServiceError::internal(&format!("read {}", self.path.display()), e))?;
        let records: Vec<Vehicle> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::internal(&format!("parse {}", self.path.display()), e))?;

        let total = records.len();
        let mut db = VehicleIndex::with_capacity(total);
        let mut registrations = HashSet::with_capacity(total);
        for v in records {
            if v.id == 0 {
                warn!(registration = %v.registration, "skipping vehicle without id");
                continue;
            }
            if db.contains_key(&v.id) {
                warn!(id = v.id, "skipping vehicle with duplicated id");
                continue;
            }
            if !registrations.insert(v.registration.clone()) {
                warn!(
                    id = v.id,
                    registration = %v.registration,
                    "skipping vehicle with duplicated registration"
                );
                continue;
            }
            db.insert(v.id, v);
        }
        info!(path = %self.path.display(), total, loaded = db.len(), "vehicle data loaded");
        Ok(db)
    }
}
