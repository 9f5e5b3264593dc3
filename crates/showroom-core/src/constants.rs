//! Application-wide constants.

use std::time::Duration;

/// Locale whose metadata seeds auto-translation and defines completeness rules.
pub const DEFAULT_LOCALE: &str = "en";

/// Latency applied to every simulated backend call unless configured otherwise.
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(500);

/// Interval between two upload progress ticks.
pub const DEFAULT_UPLOAD_TICK: Duration = Duration::from_millis(200);

/// Percentage points added to upload progress on each tick.
pub const UPLOAD_PROGRESS_STEP: u8 = 10;

/// Placeholder dimensions given to freshly uploaded images.
pub const PLACEHOLDER_IMAGE_WIDTH: u32 = 1920;
pub const PLACEHOLDER_IMAGE_HEIGHT: u32 = 1080;

/// Route prefix guarded by the admin session.
pub const ADMIN_ROUTE_PREFIX: &str = "/admin";

/// Login page, reachable without a session.
pub const ADMIN_LOGIN_ROUTE: &str = "/admin/login";

/// Generic message returned for any credential mismatch.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
