//! Showroom CLI: drives the back-office against the seeded in-memory store.
//!
//! Configuration comes from the environment (a `.env` file is honoured).
//! Every invocation starts from the sample data; nothing is persisted.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use showroom_cli::{format_size, init_tracing, report_error, truncate_string, Showroom};
use showroom_core::{
    models::{AssetQuery, MetadataField, SortDirection, SortKey, TypeFilter},
    SiteConfig,
};
use showroom_media::{
    upload::LocalFile, LocalizationPanel, ManagerMode, MediaManager, UploadPolicy, UploadSimulator,
};
use showroom_site::{write_export_fixups, Authenticator};
use showroom_store::CancellationToken;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "showroom", about = "Showroom back-office CLI")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Media library operations
    Media {
        #[command(subcommand)]
        sub: MediaCommands,
    },
    /// Vehicle listings
    Vehicles {
        #[command(subcommand)]
        sub: VehicleCommands,
    },
    /// CMS pages
    Pages {
        #[command(subcommand)]
        sub: PageCommands,
    },
    /// Write .nojekyll and 404.html into a static export directory
    ExportFixups {
        /// Export output directory
        dir: PathBuf,
    },
    /// Check the demo admin credentials
    Login {
        #[arg(long, env = "SHOWROOM_LOGIN_EMAIL")]
        email: String,
        #[arg(long, env = "SHOWROOM_LOGIN_PASSWORD")]
        password: String,
    },
}

#[derive(Subcommand)]
enum MediaCommands {
    /// List assets with search, type filter and sorting
    List {
        /// Case-insensitive substring of the asset name
        #[arg(long, default_value = "")]
        search: String,
        /// Filter by type: all, image, document
        #[arg(long, default_value = "all")]
        r#type: TypeFilter,
        /// Sort key: name, date, size
        #[arg(long, default_value = "date")]
        sort: SortKey,
        /// Sort direction: asc, desc
        #[arg(long, default_value = "desc")]
        direction: SortDirection,
    },
    /// List folders with their file counts
    Folders,
    /// Simulate uploading local files
    Upload {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Reject files larger than this many bytes
        #[arg(long)]
        max_size: Option<u64>,
        /// Allowed content types (e.g. image/*); repeatable
        #[arg(long = "allow")]
        allowed: Vec<String>,
        /// Allowed filename extensions (e.g. jpg); repeatable
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },
    /// Fill placeholder translations for an asset
    Translate {
        /// Asset id or exact name
        asset: String,
        /// Target locale codes; repeatable
        #[arg(long = "locale", required = true)]
        locales: Vec<String>,
        /// Default-locale title
        #[arg(long)]
        title: Option<String>,
        /// Default-locale alt text
        #[arg(long)]
        alt: Option<String>,
        /// Default-locale description
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
enum VehicleCommands {
    /// List vehicles
    List {
        /// Only featured vehicles
        #[arg(long)]
        featured: bool,
    },
    /// Show one vehicle; unknown ids show placeholder content
    Show { id: Uuid },
}

#[derive(Subcommand)]
enum PageCommands {
    /// List pages
    List {
        /// Only published pages
        #[arg(long)]
        published: bool,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn print_assets(assets: &[showroom_core::models::Asset]) {
    if assets.is_empty() {
        println!("No assets found.");
        return;
    }
    println!(
        "{:<36} {:<30} {:<9} {:>10} {:>12}",
        "ID", "Name", "Type", "Size", "Uploaded"
    );
    println!("{}", "-".repeat(101));
    for asset in assets {
        println!(
            "{:<36} {:<30} {:<9} {:>10} {:>12}",
            asset.id.to_string(),
            truncate_string(&asset.name, 30),
            asset.kind().to_string(),
            format_size(asset.size_bytes),
            asset.uploaded_at.format("%Y-%m-%d").to_string()
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", report_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SiteConfig::from_env().context("Invalid configuration")?;
    tracing::debug!(environment = %config.environment, "Configuration loaded");

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let showroom = Showroom::seeded(config);
    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Media { sub } => run_media(&showroom, sub, json, &cancel).await?,
        Commands::Vehicles { sub } => match sub {
            VehicleCommands::List { featured } => {
                let vehicles = if featured {
                    showroom.vehicles.featured(&cancel).await?
                } else {
                    showroom.vehicles.list(&cancel).await?
                };
                if json {
                    print_json(&vehicles)?;
                } else {
                    println!(
                        "{:<36} {:<30} {:>6} {:>10} {:>10}",
                        "ID", "Title", "Year", "Price", "Km"
                    );
                    println!("{}", "-".repeat(96));
                    for v in &vehicles {
                        println!(
                            "{:<36} {:<30} {:>6} {:>10} {:>10}",
                            v.id.to_string(),
                            truncate_string(&v.title, 30),
                            v.year,
                            v.price,
                            v.mileage_km
                        );
                    }
                }
            }
            VehicleCommands::Show { id } => {
                let detail = showroom.vehicles.detail_or_placeholder(id, &cancel).await?;
                if json {
                    print_json(&serde_json::json!({
                        "placeholder": detail.placeholder,
                        "vehicle": detail.vehicle,
                    }))?;
                } else {
                    let v = &detail.vehicle;
                    if detail.placeholder {
                        println!("(placeholder content)");
                    }
                    println!("{} ({} {}, {})", v.title, v.brand, v.model, v.year);
                    println!("Price: {}  Mileage: {} km", v.price, v.mileage_km);
                    println!("{}", v.description);
                    for url in &v.images {
                        let allowed = if showroom.config.is_image_url_allowed(url) {
                            ""
                        } else {
                            " (blocked by image domain allowlist)"
                        };
                        println!("  image: {}{}", url, allowed);
                    }
                }
            }
        },
        Commands::Pages { sub } => match sub {
            PageCommands::List { published } => {
                let pages = if published {
                    showroom.pages.published(&cancel).await?
                } else {
                    showroom.pages.list(&cancel).await?
                };
                if json {
                    print_json(&pages)?;
                } else {
                    for page in &pages {
                        println!(
                            "{:<10} {:<30} {}",
                            format!("{:?}", page.status).to_lowercase(),
                            truncate_string(&page.title, 30),
                            showroom.config.route(&page.slug)
                        );
                    }
                }
            }
        },
        Commands::ExportFixups { dir } => {
            let written = write_export_fixups(&dir, &showroom.config).await?;
            if json {
                print_json(&serde_json::json!({
                    "nojekyll": written.nojekyll,
                    "not_found": written.not_found,
                }))?;
            } else {
                println!("Wrote {}", written.nojekyll.display());
                println!("Wrote {}", written.not_found.display());
            }
        }
        Commands::Login { email, password } => {
            let auth = Authenticator::new(&showroom.config, showroom.sessions.clone());
            let session = auth.login(&email, &password).await?;
            if json {
                print_json(&session)?;
            } else {
                println!("Welcome, {} <{}>", session.display_name, session.user_email);
            }
        }
    }

    Ok(())
}

async fn run_media(
    showroom: &Showroom,
    sub: MediaCommands,
    json: bool,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    match sub {
        MediaCommands::List {
            search,
            r#type,
            sort,
            direction,
        } => {
            let mut manager = MediaManager::new(showroom.assets.clone(), ManagerMode::Browse);
            manager.set_query(
                AssetQuery::default()
                    .search(search)
                    .of_type(r#type)
                    .sorted(sort, direction),
            );
            let assets = manager.refresh(cancel).await?;
            if json {
                print_json(&assets)?;
            } else {
                print_assets(&assets);
            }
        }
        MediaCommands::Folders => {
            let folders = showroom.assets.folders().await;
            if json {
                print_json(&folders)?;
            } else {
                for folder in &folders {
                    println!(
                        "{:<20} {:>5} files  {}",
                        folder.name, folder.file_count, folder.path
                    );
                }
            }
        }
        MediaCommands::Upload {
            paths,
            max_size,
            allowed,
            extensions,
        } => {
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                files.push(LocalFile::from_path(path).await?);
            }

            let mut simulator = UploadSimulator::from_config(&showroom.config);
            if max_size.is_some() || !allowed.is_empty() || !extensions.is_empty() {
                let allowed = if allowed.is_empty() {
                    vec!["*/*".to_string()]
                } else {
                    allowed
                };
                let mut policy = UploadPolicy::new(max_size.unwrap_or(u64::MAX), allowed);
                if !extensions.is_empty() {
                    policy = policy.with_extensions(extensions);
                }
                simulator = simulator.with_policy(policy);
            }

            let (progress_tx, mut progress_rx) = watch::channel(0u8);
            let reporter = tokio::spawn(async move {
                while progress_rx.changed().await.is_ok() {
                    let percent = *progress_rx.borrow_and_update();
                    tracing::info!(progress = percent, "Uploading");
                }
            });

            let created = simulator
                .upload_with_progress(&showroom.assets, files, &progress_tx, cancel)
                .await;
            drop(progress_tx);
            reporter.await.ok();
            let created = created?;

            if json {
                print_json(&created)?;
            } else {
                println!("Uploaded {} file(s)", created.len());
                print_assets(&showroom.assets.snapshot().await);
            }
        }
        MediaCommands::Translate {
            asset,
            locales,
            title,
            alt,
            description,
        } => {
            let asset = showroom.find_asset(&asset).await?;
            let default_locale = showroom.config.default_locale.clone();
            let mut panel =
                LocalizationPanel::load(&showroom.assets, asset.id, &default_locale).await?;

            for (field, value) in [
                (MetadataField::Title, title),
                (MetadataField::AltText, alt),
                (MetadataField::Description, description),
            ] {
                if let Some(value) = value {
                    panel.set_field(&default_locale, field, value);
                }
            }
            for field in panel.missing_required() {
                tracing::warn!(%field, locale = %default_locale, "Required field is empty");
            }

            let targets: Vec<&str> = locales.iter().map(String::as_str).collect();
            panel.auto_translate(&targets, cancel).await?;
            panel.save(&showroom.assets, cancel).await?;

            if json {
                print_json(panel.entries())?;
            } else {
                println!("{}", asset.name);
                for (locale, status) in panel.statuses() {
                    println!("  {} {:<10} {}", locale.flag, locale.name, status);
                }
            }
        }
    }
    Ok(())
}
