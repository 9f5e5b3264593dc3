use showroom_core::{models::Asset, AppError, ErrorMetadata, LogLevel, SiteConfig};
use showroom_site::{PageCatalog, SessionStore, VehicleCatalog};
use showroom_store::{seed, AssetRepository, PageRepository, SimulatedLatency, VehicleRepository};
use uuid::Uuid;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Human-readable byte size (B, KB, MB, GB with one decimal).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// In-process back-office seeded with the sample data
pub struct Showroom {
    pub config: SiteConfig,
    pub assets: AssetRepository,
    pub vehicles: VehicleCatalog,
    pub pages: PageCatalog,
    pub sessions: SessionStore,
}

impl Showroom {
    pub fn seeded(config: SiteConfig) -> Self {
        let latency = SimulatedLatency::new(config.simulated_latency);
        Self {
            assets: AssetRepository::with_seed(
                latency,
                seed::sample_assets(),
                seed::sample_folders(),
            ),
            vehicles: VehicleCatalog::new(VehicleRepository::new(latency, seed::sample_vehicles())),
            pages: PageCatalog::new(PageRepository::new(latency, seed::sample_pages())),
            sessions: SessionStore::new(),
            config,
        }
    }

    /// Find an asset by id or exact name.
    pub async fn find_asset(&self, key: &str) -> Result<Asset, AppError> {
        let found = match key.parse::<Uuid>() {
            Ok(id) => self.assets.get(id).await,
            Err(_) => self
                .assets
                .snapshot()
                .await
                .into_iter()
                .find(|a| a.name == key),
        };
        found.ok_or_else(|| AppError::NotFound(format!("Asset {} not found", key)))
    }
}

/// User-facing report for a failed command. `AppError`s are shown through
/// their client message and error code, with the full chain going to the log.
pub fn report_error(err: &anyhow::Error) -> String {
    let Some(app) = err.downcast_ref::<AppError>() else {
        tracing::error!(error = ?err, "Command failed");
        return format!("Error: {:#}", err);
    };

    let code = app.error_code();
    let recoverable = app.is_recoverable();
    let details = app.detailed_message();
    match app.log_level() {
        LogLevel::Debug => tracing::debug!(code, recoverable, %details, "Command failed"),
        LogLevel::Warn => tracing::warn!(code, recoverable, %details, "Command failed"),
        LogLevel::Error => tracing::error!(code, recoverable, %details, "Command failed"),
    }

    let mut report = format!("Error [{}]: {}", code, app.client_message());
    if let Some(action) = app.suggested_action() {
        report.push_str(&format!("\n  Hint: {}", action));
    }
    report
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
