//! Showroom Store Library
//!
//! In-memory repositories standing in for the future REST backend. Every
//! repository call that would be a network round-trip awaits a configurable
//! simulated latency and can be cancelled through a `CancellationToken`.
//! Nothing here survives a process restart.

pub mod assets;
pub mod latency;
pub mod pages;
pub mod seed;
pub mod vehicles;

pub use assets::AssetRepository;
pub use latency::SimulatedLatency;
pub use pages::PageRepository;
pub use vehicles::VehicleRepository;
pub use tokio_util::sync::CancellationToken;
