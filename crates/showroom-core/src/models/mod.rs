//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod asset;
mod document;
mod folder;
mod localization;
mod page;
mod seo;
mod session;
mod vehicle;

pub use asset::*;
pub use document::*;
pub use folder::*;
pub use localization::*;
pub use page::*;
pub use seo::*;
pub use session::*;
pub use vehicle::*;
