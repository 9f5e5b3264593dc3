//! Simulated upload pipeline.
//!
//! No bytes leave the machine: a run ticks progress up to 100% on a fixed
//! timer, then turns every file handle into an `Asset` pointing at a local
//! `blob:` reference and prepends the batch to the store.

use chrono::Utc;
use showroom_core::{
    constants::{PLACEHOLDER_IMAGE_HEIGHT, PLACEHOLDER_IMAGE_WIDTH, UPLOAD_PROGRESS_STEP},
    models::{Asset, Dimensions},
    AppError, SiteConfig,
};
use showroom_store::AssetRepository;
use std::path::Path;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Handle to a file picked on the local machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Read name and size from disk; the content type is derived from the
    /// extension.
    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(AppError::InvalidInput(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid filename: {}", path.display())))?
            .to_string();
        let mime_type = content_type_for(&name).to_string();

        Ok(Self {
            name,
            mime_type,
            size_bytes: metadata.len(),
        })
    }
}

/// Content type for a filename, by extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {name} is {size} bytes (max: {max} bytes)")]
    FileTooLarge { name: String, size: u64, max: u64 },

    #[error("Invalid content type: {content_type} for {name} (allowed: {allowed:?})")]
    InvalidContentType {
        name: String,
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid file extension: {name} (allowed: {allowed:?})")]
    InvalidExtension { name: String, allowed: Vec<String> },

    #[error("Empty file: {0}")]
    EmptyFile(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Optional upload checks. Content types match exactly, by a `type/*`
/// wildcard, or anything with `*/*`.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size: u64,
    allowed_content_types: Vec<String>,
    allowed_extensions: Option<Vec<String>>,
}

impl UploadPolicy {
    pub fn new(max_file_size: u64, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.to_lowercase())
                .collect(),
            allowed_extensions: None,
        }
    }

    /// Also require one of these filename extensions (without the dot).
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = Some(
            extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        );
        self
    }

    pub fn validate(&self, file: &LocalFile) -> Result<(), ValidationError> {
        if file.size_bytes == 0 {
            return Err(ValidationError::EmptyFile(file.name.clone()));
        }
        if file.size_bytes > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                name: file.name.clone(),
                size: file.size_bytes,
                max: self.max_file_size,
            });
        }

        if let Some(ref extensions) = self.allowed_extensions {
            let extension = Path::new(&file.name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_default();
            if !extensions.contains(&extension) {
                return Err(ValidationError::InvalidExtension {
                    name: file.name.clone(),
                    allowed: extensions.clone(),
                });
            }
        }

        let content_type = file.mime_type.to_lowercase();
        let allowed = self.allowed_content_types.iter().any(|ct| match ct.strip_suffix("/*") {
            Some("*") => true,
            Some(prefix) => content_type
                .split_once('/')
                .is_some_and(|(major, _)| major == prefix),
            None => *ct == content_type,
        });
        if !allowed {
            return Err(ValidationError::InvalidContentType {
                name: file.name.clone(),
                content_type: file.mime_type.clone(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }
}

/// Drives simulated uploads into an `AssetRepository`
#[derive(Debug, Clone)]
pub struct UploadSimulator {
    tick: Duration,
    step: u8,
    policy: Option<UploadPolicy>,
}

impl UploadSimulator {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            step: UPLOAD_PROGRESS_STEP,
            policy: None,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.upload_tick)
    }

    /// Reject batches containing files the policy refuses. Without a policy
    /// every batch is accepted.
    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Number of ticks a run takes to reach 100%.
    pub fn ticks(&self) -> u32 {
        let step = u32::from(self.step.max(1));
        100u32.div_ceil(step)
    }

    /// Upload without observing progress.
    pub async fn upload(
        &self,
        repo: &AssetRepository,
        files: Vec<LocalFile>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Asset>, AppError> {
        let (progress, _) = watch::channel(0);
        self.upload_with_progress(repo, files, &progress, cancel).await
    }

    /// Run the simulated upload, publishing progress percentages on
    /// `progress`. Returns the created assets, already prepended to `repo`.
    /// A cancelled run leaves the store untouched.
    #[tracing::instrument(skip_all, fields(upload.files = files.len()))]
    pub async fn upload_with_progress(
        &self,
        repo: &AssetRepository,
        files: Vec<LocalFile>,
        progress: &watch::Sender<u8>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Asset>, AppError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref policy) = self.policy {
            for file in &files {
                policy.validate(file)?;
            }
        }

        let mut percent: u8 = 0;
        progress.send_replace(percent);

        let mut ticker = tokio::time::interval(self.tick);
        // The first tick of an interval fires immediately
        ticker.tick().await;

        while percent < 100 {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(progress = percent, "Upload cancelled");
                    return Err(AppError::Cancelled("upload".to_string()));
                }
                _ = ticker.tick() => {
                    percent = percent.saturating_add(self.step.max(1)).min(100);
                    progress.send_replace(percent);
                    tracing::trace!(progress = percent, "Upload progress");
                }
            }
        }

        let uploaded_at = Utc::now().date_naive();
        let assets: Vec<Asset> = files
            .into_iter()
            .map(|file| {
                let placeholder = Dimensions {
                    width: PLACEHOLDER_IMAGE_WIDTH,
                    height: PLACEHOLDER_IMAGE_HEIGHT,
                };
                Asset::new(
                    file.name,
                    file.mime_type,
                    file.size_bytes,
                    format!("blob:showroom/{}", Uuid::new_v4()),
                    uploaded_at,
                    Some(placeholder),
                )
            })
            .collect();

        repo.insert_front(assets.clone()).await?;

        tracing::info!(count = assets.len(), "Upload completed");
        Ok(assets)
    }
}

impl Default for UploadSimulator {
    fn default() -> Self {
        Self::new(showroom_core::constants::DEFAULT_UPLOAD_TICK)
    }
}
