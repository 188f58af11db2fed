use std::time::Duration;

use crate::api::ApiClient;
use crate::config::{CALLBACK_FAILURE_REDIRECT_DELAY, CALLBACK_SUCCESS_REDIRECT_DELAY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackStatus {
    Processing,
    Connected,
    Failed(String),
}

impl CallbackStatus {
    pub fn message(&self) -> &str {
        match self {
            CallbackStatus::Processing => "Connecting your Gmail account...",
            CallbackStatus::Connected => "Gmail connected successfully! Redirecting...",
            CallbackStatus::Failed(message) => message,
        }
    }

    /// How long to show the outcome before returning to the dashboard.
    pub fn redirect_delay(&self) -> Option<Duration> {
        match self {
            CallbackStatus::Processing => None,
            CallbackStatus::Connected => Some(CALLBACK_SUCCESS_REDIRECT_DELAY),
            CallbackStatus::Failed(_) => Some(CALLBACK_FAILURE_REDIRECT_DELAY),
        }
    }
}

/// Hands the provider's `code` to the backend. `error` and `code` are the raw
/// query values, empty when absent.
pub async fn finalize(api: &ApiClient, code: &str, error: &str) -> CallbackStatus {
    if !error.is_empty() {
        tracing::warn!(%error, "gmail authorization was not granted");
        return CallbackStatus::Failed("Gmail connection was cancelled or denied.".to_string());
    }
    if code.is_empty() {
        return CallbackStatus::Failed("No authorization code received.".to_string());
    }

    match api.gmail_callback(code).await {
        Ok(()) => CallbackStatus::Connected,
        Err(err) => CallbackStatus::Failed(err.to_string()),
    }
}
