//! Showroom Core Library
//!
//! This crate provides core domain models, error types, configuration, and the
//! supported locale table that are shared across all Showroom components.

pub mod config;
pub mod constants;
pub mod error;
pub mod locale;
pub mod models;

// Re-export commonly used types
pub use config::{BuildEnvironment, SiteConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use locale::{Locale, SUPPORTED_LOCALES};
