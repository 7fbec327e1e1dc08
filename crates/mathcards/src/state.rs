//! Application state and shared resources.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::practice::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Practice sessions, kept for the lifetime of the process
    pub sessions: Arc<SessionStore>,

    /// Unix timestamp of startup
    pub started_at: i64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let sessions = Arc::new(SessionStore::new(&config.practice));

        Self {
            config: Arc::new(config),
            sessions,
            started_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Seconds since startup
    pub fn uptime_secs(&self) -> u64 {
        let now = chrono::Utc::now().timestamp();
        u64::try_from(now - self.started_at).unwrap_or(0)
    }
}
