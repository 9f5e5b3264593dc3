//! Per-asset localization panel.

use async_trait::async_trait;
use showroom_core::{
    models::{LocalizationMap, LocalizedMetadata, MetadataField, TranslationStatus},
    AppError, Locale,
};
use showroom_store::{AssetRepository, SimulatedLatency};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Message shown when the persistence callback fails
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save translations. Please try again.";

/// Destination of a saved locale map
#[async_trait]
pub trait LocalizationSink: Send + Sync {
    async fn persist(
        &self,
        asset_id: Uuid,
        map: LocalizationMap,
        cancel: &CancellationToken,
    ) -> anyhow::Result<()>;
}

#[async_trait]
impl LocalizationSink for AssetRepository {
    async fn persist(
        &self,
        asset_id: Uuid,
        map: LocalizationMap,
        cancel: &CancellationToken,
    ) -> anyhow::Result<()> {
        self.save_localizations(asset_id, map, cancel).await?;
        Ok(())
    }
}

/// Editing state for the localized metadata of one asset
#[derive(Debug, Clone)]
pub struct LocalizationPanel {
    asset_id: Uuid,
    default_locale: String,
    entries: LocalizationMap,
    open: bool,
    error: Option<String>,
    latency: SimulatedLatency,
}

fn canonical_code(code: &str) -> &str {
    Locale::find(code).map(|l| l.code).unwrap_or(code)
}

impl LocalizationPanel {
    pub fn new(
        asset_id: Uuid,
        default_locale: impl Into<String>,
        entries: LocalizationMap,
        latency: SimulatedLatency,
    ) -> Self {
        let default_locale = canonical_code(&default_locale.into()).to_string();
        Self {
            asset_id,
            default_locale,
            entries,
            open: true,
            error: None,
            latency,
        }
    }

    /// Open the panel on the metadata currently stored for `asset_id`.
    pub async fn load(
        repo: &AssetRepository,
        asset_id: Uuid,
        default_locale: impl Into<String>,
    ) -> Result<Self, AppError> {
        let entries = repo.localizations(asset_id).await?;
        Ok(Self::new(asset_id, default_locale, entries, repo.latency()))
    }

    pub fn asset_id(&self) -> Uuid {
        self.asset_id
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn entries(&self) -> &LocalizationMap {
        &self.entries
    }

    pub fn entry(&self, locale: &str) -> Option<&LocalizedMetadata> {
        self.entries.get(locale)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    /// Upsert one field. Any value is accepted, including blank text.
    /// Supported codes are stored in their canonical case.
    pub fn set_field(&mut self, locale: &str, field: MetadataField, value: impl Into<String>) {
        self.entries
            .entry(canonical_code(locale).to_string())
            .or_default()
            .set(field, value.into());
    }

    pub fn classify(&self, locale: &str) -> TranslationStatus {
        match self.entries.get(locale) {
            None => TranslationStatus::NotTranslated,
            Some(meta) if MetadataField::ALL.iter().all(|f| meta.is_filled(*f)) => {
                TranslationStatus::Complete
            }
            Some(_) => TranslationStatus::Incomplete,
        }
    }

    /// Status of every supported locale, in table order.
    pub fn statuses(&self) -> Vec<(&'static Locale, TranslationStatus)> {
        showroom_core::SUPPORTED_LOCALES
            .iter()
            .map(|locale| (locale, self.classify(locale.code)))
            .collect()
    }

    /// Required fields still empty in the default locale. Advisory only,
    /// saving is never blocked.
    pub fn missing_required(&self) -> Vec<MetadataField> {
        let default = self.entries.get(&self.default_locale);
        MetadataField::REQUIRED
            .into_iter()
            .filter(|f| !default.is_some_and(|meta| meta.is_filled(*f)))
            .collect()
    }

    /// Fill `locales` with placeholder text derived from the default
    /// locale: each filled default field becomes `"<flag> <value>"`.
    ///
    /// The default locale itself is skipped. Unknown locale codes are
    /// rejected before the simulated delay starts.
    #[tracing::instrument(skip(self, cancel), fields(asset_id = %self.asset_id))]
    pub async fn auto_translate(
        &mut self,
        locales: &[&str],
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, AppError> {
        let mut targets: Vec<&'static Locale> = Vec::with_capacity(locales.len());
        for code in locales {
            let locale = Locale::find(code)
                .ok_or_else(|| AppError::InvalidInput(format!("Unsupported locale: {}", code)))?;
            if locale.code.eq_ignore_ascii_case(&self.default_locale) {
                continue;
            }
            if !targets.iter().any(|t| t.code == locale.code) {
                targets.push(locale);
            }
        }

        self.latency.wait("auto-translate", cancel).await?;

        let source = self
            .entries
            .get(&self.default_locale)
            .cloned()
            .unwrap_or_default();

        let mut translated = Vec::with_capacity(targets.len());
        for locale in targets {
            let mut filled_any = false;
            for field in MetadataField::ALL {
                if !source.is_filled(field) {
                    continue;
                }
                if let Some(value) = source.get(field) {
                    self.set_field(locale.code, field, format!("{} {}", locale.flag, value));
                    filled_any = true;
                }
            }
            if filled_any {
                translated.push(locale.code.to_string());
            }
        }

        tracing::debug!(locales = ?translated, "Placeholder translations generated");
        Ok(translated)
    }

    /// Hand the whole locale map to `sink`. The panel closes on success;
    /// on failure it stays open with a generic error message.
    #[tracing::instrument(skip(self, sink, cancel), fields(asset_id = %self.asset_id, locales = self.entries.len()))]
    pub async fn save(
        &mut self,
        sink: &dyn LocalizationSink,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        self.error = None;
        match sink.persist(self.asset_id, self.entries.clone(), cancel).await {
            Ok(()) => {
                self.open = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saving localized metadata failed");
                self.error = Some(SAVE_FAILED_MESSAGE.to_string());
                Err(AppError::SaveFailed(SAVE_FAILED_MESSAGE.to_string()))
            }
        }
    }
}
