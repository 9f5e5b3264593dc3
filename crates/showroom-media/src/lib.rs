//! Showroom Media Library
//!
//! The media asset manager of the admin area: a filtered and sorted view over
//! the asset store, a selection model for standalone browsing and picker
//! mode, a simulated upload pipeline, and the per-asset localization panel.

pub mod localization;
pub mod manager;
pub mod query;
pub mod selection;
pub mod upload;

pub use localization::{LocalizationPanel, LocalizationSink};
pub use manager::{Confirmation, ManagerMode, MediaManager};
pub use query::list;
pub use selection::{Selection, SelectionMode};
pub use upload::{LocalFile, UploadPolicy, UploadSimulator, ValidationError};
