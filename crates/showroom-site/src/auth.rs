//! Demo admin authentication and the admin route guard.
//!
//! There is exactly one account, taken from `SiteConfig`. A successful login
//! puts a `Session` into the shared `SessionStore`; logging out removes it.
//! The guard is evaluated once per navigation.

use chrono::Utc;
use showroom_core::{
    constants::{ADMIN_LOGIN_ROUTE, ADMIN_ROUTE_PREFIX, INVALID_CREDENTIALS_MESSAGE},
    models::Session,
    AppError, SiteConfig,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Shared holder of the current admin session
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }

    async fn begin(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    /// End the session. Returns the session that was active, if any.
    pub async fn logout(&self) -> Option<Session> {
        let previous = self.inner.write().await.take();
        if let Some(ref session) = previous {
            tracing::info!(user = %session.user_email, "Admin logged out");
        }
        previous
    }
}

pub struct Authenticator {
    email: String,
    password: String,
    display_name: String,
    sessions: SessionStore,
}

impl Authenticator {
    pub fn new(config: &SiteConfig, sessions: SessionStore) -> Self {
        Self {
            email: config.admin_email.clone(),
            password: config.admin_password.clone(),
            display_name: config.admin_display_name.clone(),
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Check the credentials and start a session. Email comparison ignores
    /// case and surrounding whitespace; the password must match exactly.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let email_ok = secure_compare(&email.trim().to_lowercase(), &self.email.to_lowercase());
        let password_ok = secure_compare(password, &self.password);

        if !(email_ok && password_ok) {
            tracing::warn!("Admin login rejected");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string()));
        }

        let session = Session {
            user_email: self.email.clone(),
            display_name: self.display_name.clone(),
            started_at: Utc::now(),
        };
        self.sessions.begin(session.clone()).await;

        tracing::info!(user = %session.user_email, "Admin logged in");
        Ok(session)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Navigate to this route instead
    Redirect(String),
}

/// Protects admin routes
#[derive(Clone)]
pub struct AdminGuard {
    sessions: SessionStore,
}

impl AdminGuard {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }

    /// Decide one navigation to `path` (site-relative, without base path).
    pub async fn check(&self, path: &str) -> GuardDecision {
        if !requires_session(path) || self.sessions.is_authenticated().await {
            return GuardDecision::Allow;
        }
        tracing::debug!(path, "Redirecting unauthenticated navigation");
        GuardDecision::Redirect(ADMIN_LOGIN_ROUTE.to_string())
    }
}

fn requires_session(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    if path == ADMIN_LOGIN_ROUTE {
        return false;
    }
    path == ADMIN_ROUTE_PREFIX
        || path
            .strip_prefix(ADMIN_ROUTE_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}
