use showroom_core::{
    models::{Asset, Folder, LocalizationMap},
    AppError,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::latency::SimulatedLatency;

#[derive(Default)]
struct AssetTable {
    /// Newest first: uploads are prepended
    assets: Vec<Asset>,
    folders: Vec<Folder>,
    localizations: HashMap<Uuid, LocalizationMap>,
}

/// Repository for media assets, their folders, and localized metadata
#[derive(Clone)]
pub struct AssetRepository {
    table: Arc<RwLock<AssetTable>>,
    latency: SimulatedLatency,
}

impl AssetRepository {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            table: Arc::new(RwLock::new(AssetTable::default())),
            latency,
        }
    }

    /// Repository pre-filled with the given records, in the given order.
    /// Later duplicates of an id are dropped.
    pub fn with_seed(latency: SimulatedLatency, assets: Vec<Asset>, folders: Vec<Folder>) -> Self {
        let mut unique: Vec<Asset> = Vec::with_capacity(assets.len());
        for asset in assets {
            if unique.iter().any(|a| a.id == asset.id) {
                tracing::warn!(asset_id = %asset.id, "Dropping duplicate seed asset");
                continue;
            }
            unique.push(asset);
        }

        Self {
            table: Arc::new(RwLock::new(AssetTable {
                assets: unique,
                folders,
                localizations: HashMap::new(),
            })),
            latency,
        }
    }

    pub fn latency(&self) -> SimulatedLatency {
        self.latency
    }

    /// Current contents in store order, without simulated latency.
    pub async fn snapshot(&self) -> Vec<Asset> {
        self.table.read().await.assets.clone()
    }

    /// Load all assets as a simulated backend call.
    #[tracing::instrument(skip(self, cancel), fields(db.table = "assets", db.operation = "select"))]
    pub async fn fetch_all(&self, cancel: &CancellationToken) -> Result<Vec<Asset>, AppError> {
        self.latency.wait("fetch assets", cancel).await?;
        Ok(self.snapshot().await)
    }

    pub async fn get(&self, id: Uuid) -> Option<Asset> {
        self.table
            .read()
            .await
            .assets
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    /// Fetch several assets, in the order of `ids`; unknown ids are skipped.
    pub async fn get_many(&self, ids: &[Uuid]) -> Vec<Asset> {
        let table = self.table.read().await;
        ids.iter()
            .filter_map(|id| table.assets.iter().find(|a| a.id == *id).cloned())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.assets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Prepend assets, keeping their relative order.
    #[tracing::instrument(skip(self, assets), fields(db.table = "assets", db.operation = "insert", count = assets.len()))]
    pub async fn insert_front(&self, assets: Vec<Asset>) -> Result<(), AppError> {
        let mut table = self.table.write().await;
        for (i, asset) in assets.iter().enumerate() {
            let clashes = table.assets.iter().any(|a| a.id == asset.id)
                || assets[..i].iter().any(|a| a.id == asset.id);
            if clashes {
                return Err(AppError::Conflict(format!(
                    "Asset id {} already exists",
                    asset.id
                )));
            }
        }
        let mut merged = assets;
        merged.append(&mut table.assets);
        table.assets = merged;
        Ok(())
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "assets", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<Asset, AppError> {
        self.latency.wait("delete asset", cancel).await?;

        let mut table = self.table.write().await;
        let index = table
            .assets
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))?;
        let removed = table.assets.remove(index);
        table.localizations.remove(&id);

        tracing::info!(asset_id = %id, name = %removed.name, "Asset deleted");
        Ok(removed)
    }

    pub async fn folders(&self) -> Vec<Folder> {
        self.table.read().await.folders.clone()
    }

    /// Stored localized metadata of an asset (empty map if none saved yet).
    pub async fn localizations(&self, id: Uuid) -> Result<LocalizationMap, AppError> {
        let table = self.table.read().await;
        if !table.assets.iter().any(|a| a.id == id) {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(table.localizations.get(&id).cloned().unwrap_or_default())
    }

    /// Replace the localized metadata of an asset as a simulated backend call.
    #[tracing::instrument(skip(self, map, cancel), fields(db.table = "asset_localizations", db.operation = "upsert", db.record_id = %id))]
    pub async fn save_localizations(
        &self,
        id: Uuid,
        map: LocalizationMap,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        self.latency.wait("save localizations", cancel).await?;

        let mut table = self.table.write().await;
        if !table.assets.iter().any(|a| a.id == id) {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        let locales = map.len();
        table.localizations.insert(id, map);

        tracing::info!(asset_id = %id, locales, "Localized metadata saved");
        Ok(())
    }
}
