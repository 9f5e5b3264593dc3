//! Vehicle and page services used by the public site and the admin forms.

use chrono::Utc;
use showroom_core::{
    models::{
        Asset, CreatePageRequest, CreateVehicleRequest, FuelType, Page, PageStatus, Seo,
        Transmission, UpdatePageRequest, UpdateVehicleRequest, Vehicle, VehicleStatus,
    },
    AppError,
};
use showroom_media::Confirmation;
use showroom_store::{PageRepository, VehicleRepository};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub const VEHICLE_SAVE_FAILED_MESSAGE: &str = "Failed to save vehicle. Please try again.";
pub const PAGE_SAVE_FAILED_MESSAGE: &str = "Failed to save page. Please try again.";

/// Validation and slug conflicts are reported as-is; anything else a form
/// only shows as a generic message.
fn generic_save_error(err: AppError, message: &str) -> AppError {
    match err {
        AppError::InvalidInput(_) | AppError::Conflict(_) | AppError::NotFound(_) => err,
        other => {
            tracing::warn!(error = %other, "Save failed");
            AppError::SaveFailed(message.to_string())
        }
    }
}

/// Vehicle shown on a detail page
#[derive(Debug, Clone)]
pub struct VehicleDetail {
    pub vehicle: Vehicle,
    /// True when the requested id was unknown and sample content is shown
    pub placeholder: bool,
}

fn placeholder_vehicle(id: Uuid) -> Vehicle {
    let now = Utc::now();
    Vehicle {
        id,
        title: "Vehicle details coming soon".to_string(),
        brand: "Showroom".to_string(),
        model: "Sample".to_string(),
        year: 2024,
        price: 0,
        mileage_km: 0,
        fuel: FuelType::Petrol,
        transmission: Transmission::Automatic,
        description: "This listing is being prepared. Browse our other vehicles in the meantime."
            .to_string(),
        features: Vec::new(),
        images: Vec::new(),
        seo: Seo::default(),
        featured: false,
        status: VehicleStatus::Available,
        created_at: now,
        updated_at: now,
    }
}

#[derive(Clone)]
pub struct VehicleCatalog {
    repo: VehicleRepository,
}

impl VehicleCatalog {
    pub fn new(repo: VehicleRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Vehicle>, AppError> {
        self.repo.list(cancel).await
    }

    pub async fn featured(&self, cancel: &CancellationToken) -> Result<Vec<Vehicle>, AppError> {
        self.repo.featured(cancel).await
    }

    pub async fn get(&self, id: Uuid, cancel: &CancellationToken) -> Result<Option<Vehicle>, AppError> {
        self.repo.get(id, cancel).await
    }

    /// Detail page content. Unknown ids fall back to placeholder content
    /// rather than a not-found state.
    pub async fn detail_or_placeholder(
        &self,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<VehicleDetail, AppError> {
        match self.repo.get(id, cancel).await? {
            Some(vehicle) => Ok(VehicleDetail {
                vehicle,
                placeholder: false,
            }),
            None => {
                tracing::debug!(vehicle_id = %id, "Unknown vehicle, showing placeholder");
                Ok(VehicleDetail {
                    vehicle: placeholder_vehicle(id),
                    placeholder: true,
                })
            }
        }
    }

    pub async fn create(
        &self,
        req: CreateVehicleRequest,
        cancel: &CancellationToken,
    ) -> Result<Vehicle, AppError> {
        self.repo
            .create(req, cancel)
            .await
            .map_err(|e| generic_save_error(e, VEHICLE_SAVE_FAILED_MESSAGE))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateVehicleRequest,
        cancel: &CancellationToken,
    ) -> Result<Vehicle, AppError> {
        self.repo
            .update(id, req, cancel)
            .await
            .map_err(|e| generic_save_error(e, VEHICLE_SAVE_FAILED_MESSAGE))
    }

    pub async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<(), AppError> {
        self.repo.delete(id, cancel).await
    }

    /// Append the images picked in the media manager to a vehicle's gallery.
    /// Documents and images already in the gallery are skipped.
    pub async fn attach_images(
        &self,
        id: Uuid,
        confirmation: &Confirmation,
        cancel: &CancellationToken,
    ) -> Result<Vehicle, AppError> {
        let vehicle = self
            .repo
            .get(id, cancel)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))?;

        let mut images = vehicle.images;
        for url in image_urls(&confirmation.assets) {
            if !images.contains(&url) {
                images.push(url);
            }
        }

        self.update(
            id,
            UpdateVehicleRequest {
                images: Some(images),
                ..Default::default()
            },
            cancel,
        )
        .await
    }
}

#[derive(Clone)]
pub struct PageCatalog {
    repo: PageRepository,
}

impl PageCatalog {
    pub fn new(repo: PageRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Page>, AppError> {
        self.repo.list(cancel).await
    }

    /// Published pages only, as the public site sees them.
    pub async fn published(&self, cancel: &CancellationToken) -> Result<Vec<Page>, AppError> {
        let mut pages = self.repo.list(cancel).await?;
        pages.retain(|p| p.status == PageStatus::Published);
        Ok(pages)
    }

    pub async fn get_by_slug(
        &self,
        slug: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Page>, AppError> {
        self.repo.get_by_slug(slug, cancel).await
    }

    pub async fn create(
        &self,
        req: CreatePageRequest,
        cancel: &CancellationToken,
    ) -> Result<Page, AppError> {
        self.repo
            .create(req, cancel)
            .await
            .map_err(|e| generic_save_error(e, PAGE_SAVE_FAILED_MESSAGE))
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: UpdatePageRequest,
        cancel: &CancellationToken,
    ) -> Result<Page, AppError> {
        self.repo
            .update(id, req, cancel)
            .await
            .map_err(|e| generic_save_error(e, PAGE_SAVE_FAILED_MESSAGE))
    }

    pub async fn publish(&self, id: Uuid, cancel: &CancellationToken) -> Result<Page, AppError> {
        self.repo.set_status(id, PageStatus::Published, cancel).await
    }

    pub async fn unpublish(&self, id: Uuid, cancel: &CancellationToken) -> Result<Page, AppError> {
        self.repo.set_status(id, PageStatus::Draft, cancel).await
    }

    pub async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<(), AppError> {
        self.repo.delete(id, cancel).await
    }
}

/// Image URLs of a picker confirmation, in pick order.
pub fn image_urls(assets: &[Asset]) -> Vec<String> {
    assets
        .iter()
        .filter(|a| a.is_image())
        .map(|a| a.url.clone())
        .collect()
}
