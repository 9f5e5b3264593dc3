use chrono::Utc;
use showroom_core::{
    models::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle},
    AppError,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use validator::Validate;

use crate::latency::SimulatedLatency;

/// Repository for vehicle listings
#[derive(Clone)]
pub struct VehicleRepository {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
    latency: SimulatedLatency,
}

impl VehicleRepository {
    pub fn new(latency: SimulatedLatency, seed: Vec<Vehicle>) -> Self {
        Self {
            vehicles: Arc::new(RwLock::new(seed)),
            latency,
        }
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "vehicles", db.operation = "select"))]
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Vehicle>, AppError> {
        self.latency.wait("list vehicles", cancel).await?;
        Ok(self.vehicles.read().await.clone())
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "vehicles", db.operation = "select"))]
    pub async fn featured(&self, cancel: &CancellationToken) -> Result<Vec<Vehicle>, AppError> {
        self.latency.wait("list featured vehicles", cancel).await?;
        Ok(self
            .vehicles
            .read()
            .await
            .iter()
            .filter(|v| v.featured)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "vehicles", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid, cancel: &CancellationToken) -> Result<Option<Vehicle>, AppError> {
        self.latency.wait("get vehicle", cancel).await?;
        Ok(self
            .vehicles
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    #[tracing::instrument(skip(self, req, cancel), fields(db.table = "vehicles", db.operation = "insert"))]
    pub async fn create(
        &self,
        req: CreateVehicleRequest,
        cancel: &CancellationToken,
    ) -> Result<Vehicle, AppError> {
        req.validate()?;
        self.latency.wait("create vehicle", cancel).await?;

        let vehicle = Vehicle::from_request(req, Utc::now());
        self.vehicles.write().await.push(vehicle.clone());

        tracing::info!(vehicle_id = %vehicle.id, title = %vehicle.title, "Vehicle created");
        Ok(vehicle)
    }

    #[tracing::instrument(skip(self, req, cancel), fields(db.table = "vehicles", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateVehicleRequest,
        cancel: &CancellationToken,
    ) -> Result<Vehicle, AppError> {
        req.validate()?;
        self.latency.wait("update vehicle", cancel).await?;

        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))?;
        vehicle.apply_update(req, Utc::now());

        Ok(vehicle.clone())
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "vehicles", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<(), AppError> {
        self.latency.wait("delete vehicle", cancel).await?;

        let mut vehicles = self.vehicles.write().await;
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        if vehicles.len() == before {
            return Err(AppError::NotFound(format!("Vehicle {} not found", id)));
        }

        tracing::info!(vehicle_id = %id, "Vehicle deleted");
        Ok(())
    }
}
