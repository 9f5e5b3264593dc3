//! Media manager state: the current view, the selection, and how a
//! confirmation is handed back to an embedding form.

use showroom_core::{
    models::{Asset, AssetQuery, Folder},
    AppError,
};
use showroom_store::AssetRepository;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::query;
use crate::selection::{Selection, SelectionMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerMode {
    /// Standalone library page
    Browse,
    /// Embedded in another form to pick assets for it
    Picker { multiple: bool },
}

impl ManagerMode {
    fn selection_mode(self) -> SelectionMode {
        match self {
            ManagerMode::Browse => SelectionMode::Multiple,
            ManagerMode::Picker { multiple: true } => SelectionMode::Multiple,
            ManagerMode::Picker { multiple: false } => SelectionMode::Single,
        }
    }
}

/// Result of `MediaManager::confirm`
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// Selected assets, in pick order
    pub assets: Vec<Asset>,
    /// Whether the embedding picker should close
    pub close: bool,
}

pub struct MediaManager {
    repo: AssetRepository,
    query: AssetQuery,
    selection: Selection,
    mode: ManagerMode,
}

impl MediaManager {
    pub fn new(repo: AssetRepository, mode: ManagerMode) -> Self {
        Self {
            repo,
            query: AssetQuery::default(),
            selection: Selection::new(mode.selection_mode()),
            mode,
        }
    }

    /// Use an explicit selection mode instead of the one implied by `mode`.
    pub fn with_selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.selection = Selection::new(selection_mode);
        self
    }

    pub fn mode(&self) -> ManagerMode {
        self.mode
    }

    pub fn repository(&self) -> &AssetRepository {
        &self.repo
    }

    pub fn query(&self) -> &AssetQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: AssetQuery) {
        self.query = query;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Assets as they should be shown for the current query.
    pub async fn view(&self) -> Vec<Asset> {
        query::list(&self.repo.snapshot().await, &self.query)
    }

    /// Load the library as a simulated backend call, then apply the query.
    pub async fn refresh(&self, cancel: &CancellationToken) -> Result<Vec<Asset>, AppError> {
        let assets = self.repo.fetch_all(cancel).await?;
        Ok(query::list(&assets, &self.query))
    }

    pub async fn folders(&self) -> Vec<Folder> {
        self.repo.folders().await
    }

    /// Click on an asset. Returns whether it is selected afterwards.
    pub async fn toggle(&mut self, id: Uuid) -> Result<bool, AppError> {
        if self.repo.get(id).await.is_none() {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(self.selection.toggle(id))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Emit the selected assets. In picker mode the caller should close the
    /// picker afterwards.
    pub async fn confirm(&self) -> Confirmation {
        let assets = self.repo.get_many(self.selection.ids()).await;
        Confirmation {
            assets,
            close: matches!(self.mode, ManagerMode::Picker { .. }),
        }
    }

    /// Delete every selected asset. Stops at the first failure; assets
    /// already removed stay removed and leave the selection.
    #[tracing::instrument(skip(self, cancel), fields(selected = self.selection.len()))]
    pub async fn delete_selected(&mut self, cancel: &CancellationToken) -> Result<Vec<Asset>, AppError> {
        let ids = self.selection.ids().to_vec();
        let mut deleted = Vec::with_capacity(ids.len());
        let mut outcome = Ok(());

        for id in ids {
            match self.repo.delete(id, cancel).await {
                Ok(asset) => deleted.push(asset),
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }

        self.selection
            .retain(|id| !deleted.iter().any(|asset| asset.id == id));
        outcome.map(|()| deleted)
    }
}
