use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in admin, created on successful login and dropped on logout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_email: String,
    pub display_name: String,
    pub started_at: DateTime<Utc>,
}
