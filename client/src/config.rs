use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Overall timeout for a single request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wait after a manual scan before re-reading dashboard stats.
pub const STATS_REFRESH_DELAY: Duration = Duration::from_secs(2);

pub const CALLBACK_SUCCESS_REDIRECT_DELAY: Duration = Duration::from_secs(2);
pub const CALLBACK_FAILURE_REDIRECT_DELAY: Duration = Duration::from_secs(3);

pub const NOTICE_CLEAR_DELAY: Duration = Duration::from_secs(3);

/// Wait after an OAuth redirect before re-reading the profile.
pub const PROFILE_RELOAD_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        // A browser bundle has no process environment, so the URL is fixed at build time.
        let base_url = option_env!("AUTOREPLY_API_URL").unwrap_or(DEFAULT_API_BASE_URL);
        Self::new(base_url)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
