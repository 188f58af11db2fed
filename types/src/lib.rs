use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire schema version sent with every request.
pub const API_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown scan period: {0}")]
    Period(String),
    #[error("unknown draft status: {0}")]
    Status(String),
    #[error("unknown reply tone: {0}")]
    Tone(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Formal,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Casual, Tone::Friendly, Tone::Formal];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Friendly => "Friendly",
            Tone::Formal => "Formal",
        }
    }
}

impl FromStr for Tone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| ParseError::Tone(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPreferences {
    pub tone: Tone,
    pub sign_off: String,
    pub signature: String,
}

impl Default for EmailPreferences {
    fn default() -> Self {
        Self {
            tone: Tone::Professional,
            sign_off: "Best regards".to_string(),
            signature: String::new(),
        }
    }
}

/// The signed-in user's profile. `email` is owned by the backend and never edited here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub whatsapp_number: Option<String>,
    pub email_preferences: EmailPreferences,
    pub gmail_connected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmailAuthUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmailStatus {
    pub connected: bool,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl ScanPeriod {
    pub const ALL: [ScanPeriod; 3] = [ScanPeriod::Day, ScanPeriod::Week, ScanPeriod::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            ScanPeriod::Day => "day",
            ScanPeriod::Week => "week",
            ScanPeriod::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScanPeriod::Day => "Last 24 hours",
            ScanPeriod::Week => "Last 7 days",
            ScanPeriod::Month => "Last 30 days",
        }
    }
}

impl fmt::Display for ScanPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanPeriod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScanPeriod::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| ParseError::Period(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub drafts_created: u32,
    pub processed: u32,
    pub skipped: u32,
    pub errors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScanSettings {
    pub enabled: bool,
    pub interval_minutes: u32,
    pub last_run_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalRequest {
    pub interval_minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub drafts_created: u32,
    pub emails_sent: u32,
    pub drafts_rejected: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub pending_drafts: u32,
    pub sent_drafts: u32,
    pub rejected_drafts: u32,
    pub total_drafts: u32,
    pub this_week: WeeklyStats,
    pub gmail_connected: bool,
}

impl DashboardStats {
    /// Share of decided drafts that were sent, in whole percent.
    pub fn approval_rate(&self) -> u32 {
        let decided = u64::from(self.sent_drafts) + u64::from(self.rejected_drafts);
        if decided == 0 {
            return 0;
        }
        ((self.sent_drafts as f64 / decided as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    pub created: u32,
    pub sent: u32,
    pub rejected: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(String);

impl DraftId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DraftId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DraftId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Pending,
    Sent,
    Rejected,
    Edited,
}

impl DraftStatus {
    pub const ALL: [DraftStatus; 4] = [
        DraftStatus::Pending,
        DraftStatus::Sent,
        DraftStatus::Rejected,
        DraftStatus::Edited,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DraftStatus::Pending => "pending",
            DraftStatus::Sent => "sent",
            DraftStatus::Rejected => "rejected",
            DraftStatus::Edited => "edited",
        }
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseError::Status(s.to_string()))
    }
}

/// A backend-generated reply awaiting a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: DraftId,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub recipient_email: String,
    pub subject: String,
    pub original_body: String,
    pub draft_body: String,
    pub status: DraftStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn is_pending(&self) -> bool {
        self.status == DraftStatus::Pending
    }

    pub fn sender(&self) -> &str {
        self.sender_name.as_deref().unwrap_or(&self.sender_email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftList {
    pub drafts: Vec<Draft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftEnvelope {
    pub draft: Draft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDraftRequest {
    pub edited_body: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftFilter {
    pub status: Option<DraftStatus>,
    pub period: Option<ScanPeriod>,
}

impl DraftFilter {
    pub fn pending(period: ScanPeriod) -> Self {
        Self {
            status: Some(DraftStatus::Pending),
            period: Some(period),
        }
    }

    pub fn is_pending_only(&self) -> bool {
        self.status == Some(DraftStatus::Pending)
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
