//! Configuration module
//!
//! Build-time and demo settings for the site: the base path and asset prefix
//! switched by build environment, the image domain allowlist, simulated
//! latency, and the demo admin credentials.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::constants::{DEFAULT_LOCALE, DEFAULT_SIMULATED_LATENCY, DEFAULT_UPLOAD_TICK};
use crate::locale::Locale;

const DEFAULT_PRODUCTION_BASE_PATH: &str = "/showroom";
const DEFAULT_IMAGE_DOMAINS: &str = "images.unsplash.com";
const DEFAULT_ADMIN_EMAIL: &str = "admin@dealership.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_DISPLAY_NAME: &str = "Admin User";

/// Build environment, selecting the base path and asset prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEnvironment {
    Development,
    Production,
}

impl FromStr for BuildEnvironment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(BuildEnvironment::Production),
            "development" | "dev" | "test" => Ok(BuildEnvironment::Development),
            _ => Err(anyhow::anyhow!("Invalid environment: {}", s)),
        }
    }
}

impl fmt::Display for BuildEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildEnvironment::Development => write!(f, "development"),
            BuildEnvironment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub environment: BuildEnvironment,
    /// Path prefix every route is served under; empty in development
    pub base_path: String,
    /// Prefix for static assets; follows `base_path` unless overridden
    pub asset_prefix: String,
    /// Hosts remote images may be loaded from
    pub image_domains: Vec<String>,
    pub default_locale: String,
    pub simulated_latency: Duration,
    pub upload_tick: Duration,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_display_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            environment: BuildEnvironment::Development,
            base_path: String::new(),
            asset_prefix: String::new(),
            image_domains: vec![DEFAULT_IMAGE_DOMAINS.to_string()],
            default_locale: DEFAULT_LOCALE.to_string(),
            simulated_latency: DEFAULT_SIMULATED_LATENCY,
            upload_tick: DEFAULT_UPLOAD_TICK,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            admin_display_name: DEFAULT_ADMIN_DISPLAY_NAME.to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match var("ENVIRONMENT").or_else(|| var("APP_ENV")) {
            Some(value) => value.parse()?,
            None => BuildEnvironment::Development,
        };

        let base_path = match environment {
            BuildEnvironment::Production => var("SHOWROOM_BASE_PATH")
                .unwrap_or_else(|| DEFAULT_PRODUCTION_BASE_PATH.to_string()),
            BuildEnvironment::Development => String::new(),
        };
        let asset_prefix = var("SHOWROOM_ASSET_PREFIX").unwrap_or_else(|| base_path.clone());

        let image_domains = var("SHOWROOM_IMAGE_DOMAINS")
            .unwrap_or_else(|| DEFAULT_IMAGE_DOMAINS.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let simulated_latency = match var("SIMULATED_LATENCY_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .map_err(|_| anyhow::anyhow!("SIMULATED_LATENCY_MS must be an integer"))?,
            ),
            None => DEFAULT_SIMULATED_LATENCY,
        };
        let upload_tick = match var("UPLOAD_TICK_MS") {
            Some(ms) => Duration::from_millis(
                ms.parse()
                    .map_err(|_| anyhow::anyhow!("UPLOAD_TICK_MS must be an integer"))?,
            ),
            None => DEFAULT_UPLOAD_TICK,
        };

        // Stored as the canonical code so locale keys never differ in case
        let default_locale = var("DEFAULT_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let default_locale = Locale::find(default_locale.trim())
            .map(|l| l.code.to_string())
            .unwrap_or(default_locale);

        let config = SiteConfig {
            environment,
            base_path,
            asset_prefix,
            image_domains,
            default_locale,
            simulated_latency,
            upload_tick,
            admin_email: var("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: var("ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            admin_display_name: var("ADMIN_DISPLAY_NAME")
                .unwrap_or_else(|| DEFAULT_ADMIN_DISPLAY_NAME.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for (name, prefix) in [
            ("SHOWROOM_BASE_PATH", &self.base_path),
            ("SHOWROOM_ASSET_PREFIX", &self.asset_prefix),
        ] {
            if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
                return Err(anyhow::anyhow!(
                    "{} must start with '/' and must not end with '/'",
                    name
                ));
            }
            if let Some(bad) = prefix
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '~')))
            {
                return Err(anyhow::anyhow!(
                    "{} may only contain URL path characters, got '{}'",
                    name,
                    bad
                ));
            }
        }

        match Locale::find(&self.default_locale) {
            Some(locale) if locale.code == self.default_locale => {}
            Some(locale) => {
                return Err(anyhow::anyhow!(
                    "DEFAULT_LOCALE must be written '{}', got '{}'",
                    locale.code,
                    self.default_locale
                ));
            }
            None => {
                return Err(anyhow::anyhow!(
                    "DEFAULT_LOCALE '{}' is not a supported locale",
                    self.default_locale
                ));
            }
        }

        if let Some(bad) = self.image_domains.iter().find(|d| d.contains("://")) {
            return Err(anyhow::anyhow!(
                "SHOWROOM_IMAGE_DOMAINS entries must be bare hosts, got '{}'",
                bad
            ));
        }

        if self.admin_email.is_empty() || self.admin_password.is_empty() {
            return Err(anyhow::anyhow!(
                "ADMIN_EMAIL and ADMIN_PASSWORD must not be empty"
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == BuildEnvironment::Production
    }

    /// Prefix a site-relative route with the base path.
    pub fn route(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        if self.base_path.is_empty() {
            path
        } else if path == "/" {
            format!("{}/", self.base_path)
        } else {
            format!("{}{}", self.base_path, path)
        }
    }

    /// Whether a remote image URL may be rendered, per the domain allowlist.
    /// Site-relative paths are always allowed.
    pub fn is_image_url_allowed(&self, raw: &str) -> bool {
        if raw.starts_with('/') && !raw.starts_with("//") {
            return true;
        }
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url
                .host_str()
                .map(|host| self.image_domains.iter().any(|d| d == host))
                .unwrap_or(false),
            _ => false,
        }
    }
}
