use autoreply_types::{GmailStatus, UserProfile};

use crate::api::ApiClient;
use crate::error::{ActionError, ApiError, FormError};
use crate::notice::Notice;

pub const DISCONNECT_PROMPT: &str = "Are you sure you want to disconnect Gmail?";

/// Commands the backend accepts in reply to a WhatsApp notification.
pub const WHATSAPP_COMMANDS: [(&str, &str); 3] = [
    ("approve <draft-id>", "send the drafted reply"),
    ("reject <draft-id>", "discard the draft"),
    ("edit <draft-id> <message>", "send <message> instead"),
];

/// Result of the provider redirect, as written into the settings URL by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthOutcome {
    Connected,
    Failed(String),
}

impl OAuthOutcome {
    /// Reads the `gmail` and `error` query values. Empty means absent.
    pub fn from_query(gmail: &str, error: &str) -> Option<Self> {
        if gmail == "connected" {
            Some(OAuthOutcome::Connected)
        } else if !error.is_empty() {
            Some(OAuthOutcome::Failed(error.to_string()))
        } else {
            None
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            OAuthOutcome::Connected => {
                Notice::success("Gmail connected successfully! You can now scan your inbox.")
            }
            OAuthOutcome::Failed(code) => Notice::error(format!("Failed to connect Gmail: {code}")),
        }
    }
}

/// Strips spaces and dashes, e.g. "+1 555-000-1111" to "+15550001111".
pub fn normalize_whatsapp_number(number: &str) -> String {
    number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

pub fn validate_profile(profile: &UserProfile) -> Result<(), FormError> {
    if profile.name.trim().is_empty() {
        return Err(FormError::Required("Name"));
    }

    if let Some(number) = &profile.whatsapp_number {
        let number = normalize_whatsapp_number(number);
        if !number.is_empty() {
            let digits = number
                .strip_prefix('+')
                .ok_or(FormError::InvalidWhatsappNumber)?;
            let valid = (8..=15).contains(&digits.len())
                && digits.chars().all(|c| c.is_ascii_digit());
            if !valid {
                return Err(FormError::InvalidWhatsappNumber);
            }
        }
    }

    Ok(())
}

/// Validates, normalizes and PUTs the whole profile.
pub async fn save_profile(
    api: &ApiClient,
    profile: &UserProfile,
) -> Result<UserProfile, ActionError> {
    validate_profile(profile)?;

    let mut profile = profile.clone();
    profile.name = profile.name.trim().to_string();
    profile.whatsapp_number = profile
        .whatsapp_number
        .as_deref()
        .map(normalize_whatsapp_number)
        .filter(|number| !number.is_empty());

    Ok(api.update_profile(&profile).await?)
}

/// The provider URL to send the browser to.
pub async fn connect_gmail(api: &ApiClient) -> Result<String, ApiError> {
    let auth = api.gmail_auth_url().await?;
    tracing::info!("redirecting to gmail authorization");
    Ok(auth.url)
}

/// Disconnects after `confirm` agrees. Returns whether a request was made.
pub async fn disconnect_gmail(
    api: &ApiClient,
    confirm: impl FnOnce(&str) -> bool,
) -> Result<bool, ApiError> {
    if !confirm(DISCONNECT_PROMPT) {
        return Ok(false);
    }
    api.disconnect_gmail().await?;
    Ok(true)
}

pub async fn gmail_status(api: &ApiClient) -> Result<GmailStatus, ApiError> {
    api.gmail_status().await
}
