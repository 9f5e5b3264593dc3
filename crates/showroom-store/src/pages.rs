use chrono::Utc;
use showroom_core::{
    models::{CreatePageRequest, Page, PageStatus, UpdatePageRequest},
    AppError,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use validator::Validate;

use crate::latency::SimulatedLatency;

/// Repository for CMS pages. Slugs are unique.
#[derive(Clone)]
pub struct PageRepository {
    pages: Arc<RwLock<Vec<Page>>>,
    latency: SimulatedLatency,
}

impl PageRepository {
    pub fn new(latency: SimulatedLatency, seed: Vec<Page>) -> Self {
        Self {
            pages: Arc::new(RwLock::new(seed)),
            latency,
        }
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "pages", db.operation = "select"))]
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Page>, AppError> {
        self.latency.wait("list pages", cancel).await?;
        Ok(self.pages.read().await.clone())
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "pages", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid, cancel: &CancellationToken) -> Result<Option<Page>, AppError> {
        self.latency.wait("get page", cancel).await?;
        Ok(self.pages.read().await.iter().find(|p| p.id == id).cloned())
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "pages", db.operation = "select"))]
    pub async fn get_by_slug(
        &self,
        slug: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Page>, AppError> {
        self.latency.wait("get page by slug", cancel).await?;
        Ok(self
            .pages
            .read()
            .await
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    #[tracing::instrument(skip(self, req, cancel), fields(db.table = "pages", db.operation = "insert"))]
    pub async fn create(
        &self,
        req: CreatePageRequest,
        cancel: &CancellationToken,
    ) -> Result<Page, AppError> {
        req.validate()?;
        self.latency.wait("create page", cancel).await?;

        let mut pages = self.pages.write().await;
        if pages.iter().any(|p| p.slug == req.slug) {
            return Err(AppError::Conflict(format!(
                "A page with slug '{}' already exists",
                req.slug
            )));
        }
        let page = Page::from_request(req, Utc::now());
        pages.push(page.clone());

        tracing::info!(page_id = %page.id, slug = %page.slug, "Page created");
        Ok(page)
    }

    #[tracing::instrument(skip(self, req, cancel), fields(db.table = "pages", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        req: UpdatePageRequest,
        cancel: &CancellationToken,
    ) -> Result<Page, AppError> {
        req.validate()?;
        self.latency.wait("update page", cancel).await?;

        let mut pages = self.pages.write().await;
        if let Some(slug) = req.slug.as_deref() {
            if pages.iter().any(|p| p.slug == slug && p.id != id) {
                return Err(AppError::Conflict(format!(
                    "A page with slug '{}' already exists",
                    slug
                )));
            }
        }
        let page = pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", id)))?;
        page.apply_update(req, Utc::now());

        Ok(page.clone())
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "pages", db.operation = "update", db.record_id = %id))]
    pub async fn set_status(
        &self,
        id: Uuid,
        status: PageStatus,
        cancel: &CancellationToken,
    ) -> Result<Page, AppError> {
        self.latency.wait("set page status", cancel).await?;

        let mut pages = self.pages.write().await;
        let page = pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", id)))?;
        page.status = status;
        page.updated_at = Utc::now();

        tracing::info!(page_id = %id, status = ?status, "Page status changed");
        Ok(page.clone())
    }

    #[tracing::instrument(skip(self, cancel), fields(db.table = "pages", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<(), AppError> {
        self.latency.wait("delete page", cancel).await?;

        let mut pages = self.pages.write().await;
        let before = pages.len();
        pages.retain(|p| p.id != id);
        if pages.len() == before {
            return Err(AppError::NotFound(format!("Page {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_core::models::{Block, Document, Seo};

    fn request(slug: &str) -> CreatePageRequest {
        CreatePageRequest {
            title: "About us".to_string(),
            slug: slug.to_string(),
            content: Document::new(vec![Block::paragraph("Family owned since 1987.")]),
            seo: Seo::default(),
        }
    }

    #[tokio::test]
    async fn test_slug_uniqueness() {
        let repo = PageRepository::new(SimulatedLatency::none(), vec![]);
        let cancel = CancellationToken::new();

        let about = repo.create(request("about"), &cancel).await.unwrap();
        assert!(matches!(
            repo.create(request("about"), &cancel).await,
            Err(AppError::Conflict(_))
        ));

        let contact = repo.create(request("contact"), &cancel).await.unwrap();
        let rename = repo
            .update(
                contact.id,
                UpdatePageRequest {
                    slug: Some("about".to_string()),
                    ..Default::default()
                },
                &cancel,
            )
            .await;
        assert!(matches!(rename, Err(AppError::Conflict(_))));

        // Re-saving a page under its own slug is fine
        let same = repo
            .update(
                about.id,
                UpdatePageRequest {
                    slug: Some("about".to_string()),
                    ..Default::default()
                },
                &cancel,
            )
            .await;
        assert!(same.is_ok());
    }

    #[tokio::test]
    async fn test_publish_and_lookup() {
        let repo = PageRepository::new(SimulatedLatency::none(), vec![]);
        let cancel = CancellationToken::new();

        let page = repo.create(request("financing"), &cancel).await.unwrap();
        assert_eq!(page.status, PageStatus::Draft);

        repo.set_status(page.id, PageStatus::Published, &cancel)
            .await
            .unwrap();
        let found = repo.get_by_slug("financing", &cancel).await.unwrap().unwrap();
        assert_eq!(found.status, PageStatus::Published);

        repo.delete(page.id, &cancel).await.unwrap();
        assert!(repo.get(page.id, &cancel).await.unwrap().is_none());
    }
}
