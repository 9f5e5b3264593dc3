use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::seo::Seo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

/// Vehicle listing shown on the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    /// Price in whole currency units
    pub price: u32,
    pub mileage_km: u32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    pub description: String,
    pub features: Vec<String>,
    /// Image URLs, first one is the cover
    pub images: Vec<String>,
    pub seo: Seo,
    pub featured: bool,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Request DTO for creating a vehicle
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Brand must be between 1 and 100 characters"))]
    pub brand: String,
    #[validate(length(min = 1, max = 100, message = "Model must be between 1 and 100 characters"))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub year: u16,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: u32,
    #[serde(default)]
    pub mileage_km: u32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "At most 50 features"))]
    pub features: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 30, message = "At most 30 images"))]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub seo: Seo,
    #[serde(default)]
    pub featured: bool,
}

/// Request DTO for updating a vehicle; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateVehicleRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Brand must be between 1 and 100 characters"))]
    pub brand: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Model must be between 1 and 100 characters"))]
    pub model: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub year: Option<u16>,
    #[serde(default)]
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: Option<u32>,
    #[serde(default)]
    pub mileage_km: Option<u32>,
    #[serde(default)]
    pub fuel: Option<FuelType>,
    #[serde(default)]
    pub transmission: Option<Transmission>,
    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    #[validate(length(max = 30, message = "At most 30 images"))]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    #[validate(nested)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub status: Option<VehicleStatus>,
}

impl Vehicle {
    pub fn from_request(req: CreateVehicleRequest, now: DateTime<Utc>) -> Self {
        Vehicle {
            id: Uuid::new_v4(),
            title: req.title,
            brand: req.brand,
            model: req.model,
            year: req.year,
            price: req.price,
            mileage_km: req.mileage_km,
            fuel: req.fuel,
            transmission: req.transmission,
            description: req.description,
            features: req.features,
            images: req.images,
            seo: req.seo,
            featured: req.featured,
            status: VehicleStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, req: UpdateVehicleRequest, now: DateTime<Utc>) {
        if let Some(title) = req.title {
            self.title = title;
        }
        if let Some(brand) = req.brand {
            self.brand = brand;
        }
        if let Some(model) = req.model {
            self.model = model;
        }
        if let Some(year) = req.year {
            self.year = year;
        }
        if let Some(price) = req.price {
            self.price = price;
        }
        if let Some(mileage_km) = req.mileage_km {
            self.mileage_km = mileage_km;
        }
        if let Some(fuel) = req.fuel {
            self.fuel = fuel;
        }
        if let Some(transmission) = req.transmission {
            self.transmission = transmission;
        }
        if let Some(description) = req.description {
            self.description = description;
        }
        if let Some(features) = req.features {
            self.features = features;
        }
        if let Some(images) = req.images {
            self.images = images;
        }
        if let Some(seo) = req.seo {
            self.seo = seo;
        }
        if let Some(featured) = req.featured {
            self.featured = featured;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateVehicleRequest {
        CreateVehicleRequest {
            title: "2021 Audi A4 Avant".to_string(),
            brand: "Audi".to_string(),
            model: "A4".to_string(),
            year: 2021,
            price: 32_500,
            mileage_km: 41_000,
            fuel: FuelType::Diesel,
            transmission: Transmission::Automatic,
            description: String::new(),
            features: vec![],
            images: vec![],
            seo: Seo::default(),
            featured: false,
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(request().validate().is_ok());

        let mut bad_year = request();
        bad_year.year = 1850;
        assert!(bad_year.validate().is_err());

        let mut empty_title = request();
        empty_title.title = String::new();
        assert!(empty_title.validate().is_err());

        let mut long_seo = request();
        long_seo.seo.meta_title = Some("x".repeat(71));
        assert!(long_seo.validate().is_err());
    }

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let now = Utc::now();
        let mut vehicle = Vehicle::from_request(request(), now);
        vehicle.apply_update(
            UpdateVehicleRequest {
                price: Some(29_900),
                status: Some(VehicleStatus::Reserved),
                ..Default::default()
            },
            now,
        );
        assert_eq!(vehicle.price, 29_900);
        assert_eq!(vehicle.status, VehicleStatus::Reserved);
        assert_eq!(vehicle.title, "2021 Audi A4 Avant");
    }

    #[test]
    fn test_update_request_changes_identity_fields() {
        let now = Utc::now();
        let mut vehicle = Vehicle::from_request(request(), now);
        let req: UpdateVehicleRequest = serde_json::from_str(
            r#"{"brand":"Tesla","model":"Model 3","year":2025,"fuel":"electric","transmission":"automatic"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        vehicle.apply_update(req, now);
        assert_eq!(vehicle.brand, "Tesla");
        assert_eq!(vehicle.model, "Model 3");
        assert_eq!(vehicle.year, 2025);
        assert_eq!(vehicle.fuel, FuelType::Electric);
        assert_eq!(vehicle.transmission, Transmission::Automatic);
        assert_eq!(vehicle.price, 32_500);
    }

    #[test]
    fn test_update_request_rejects_unknown_keys_and_bad_values() {
        assert!(serde_json::from_str::<UpdateVehicleRequest>(r#"{"colour":"red"}"#).is_err());

        let bad_year = UpdateVehicleRequest {
            year: Some(1850),
            ..Default::default()
        };
        assert!(bad_year.validate().is_err());

        let empty_brand = UpdateVehicleRequest {
            brand: Some(String::new()),
            ..Default::default()
        };
        assert!(empty_brand.validate().is_err());
    }
}
