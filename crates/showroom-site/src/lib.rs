//! Showroom Site Library
//!
//! Everything around the media manager: the demo admin session and route
//! guard, vehicle and page services, page document editing, and the static
//! export fixups.

pub mod auth;
pub mod catalog;
pub mod editor;
pub mod export;

pub use auth::{AdminGuard, Authenticator, GuardDecision, SessionStore};
pub use catalog::{PageCatalog, VehicleCatalog, VehicleDetail};
pub use editor::{apply, EditCommand};
pub use export::{write_export_fixups, ExportFixups};
