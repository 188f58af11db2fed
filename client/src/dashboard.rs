use autoreply_types::{AutoScanSettings, DashboardStats, ScanPeriod, ScanResult, TimelineEntry};

use crate::api::ApiClient;
use crate::error::{ActionError, ApiError, FormError};
use crate::notice::Notice;

/// Auto-scan intervals offered to the user, in minutes.
pub const INTERVAL_CHOICES: [u32; 6] = [5, 10, 15, 30, 60, 120];

pub const TIMELINE_DAYS: u32 = 7;

/// Everything the dashboard reads on mount. Each part fails independently.
#[derive(Debug)]
pub struct DashboardLoad {
    pub stats: Result<DashboardStats, ApiError>,
    pub auto_scan: Result<AutoScanSettings, ApiError>,
    pub timeline: Result<Vec<TimelineEntry>, ApiError>,
}

pub async fn load(api: &ApiClient) -> DashboardLoad {
    let (stats, auto_scan, timeline) = futures::join!(
        api.dashboard_stats(),
        api.auto_scan_settings(),
        api.timeline(TIMELINE_DAYS)
    );
    DashboardLoad {
        stats,
        auto_scan,
        timeline,
    }
}

pub async fn scan(api: &ApiClient, period: ScanPeriod) -> Result<ScanResult, ApiError> {
    let result = api.scan_inbox(period).await?;
    tracing::info!(
        %period,
        created = result.drafts_created,
        processed = result.processed,
        skipped = result.skipped,
        errors = result.errors,
        "inbox scan finished"
    );
    Ok(result)
}

pub fn scan_notice(result: &ScanResult) -> Notice {
    let message = format!(
        "Scan complete: {} new drafts created, {} processed, {} skipped, {} errors.",
        result.drafts_created, result.processed, result.skipped, result.errors
    );
    if result.errors > 0 {
        Notice::info(message)
    } else {
        Notice::success(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Manual,
    Auto,
}

impl ScanMode {
    pub fn label(self) -> &'static str {
        match self {
            ScanMode::Manual => "Manual",
            ScanMode::Auto => "Auto",
        }
    }
}

/// Auto-scan switch state. The mode only changes when a backend response is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoScanControl {
    settings: Option<AutoScanSettings>,
    busy: bool,
}

impl AutoScanControl {
    pub fn new(settings: Option<AutoScanSettings>) -> Self {
        Self {
            settings,
            busy: false,
        }
    }

    pub fn settings(&self) -> Option<&AutoScanSettings> {
        self.settings.as_ref()
    }

    pub fn mode(&self) -> ScanMode {
        match &self.settings {
            Some(settings) if settings.enabled => ScanMode::Auto,
            _ => ScanMode::Manual,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Marks a request in flight. Returns false if one already is.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Applies the result of a toggle.
    pub fn settle(&mut self, result: Result<AutoScanSettings, ActionError>) -> Notice {
        self.apply(result, "Failed to update auto scan", |settings| {
            if settings.enabled {
                format!(
                    "Auto scan is on. The inbox is checked every {} minutes.",
                    settings.interval_minutes
                )
            } else {
                "Auto scan is off. Scans run only when you start them.".to_string()
            }
        })
    }

    /// Applies the result of an interval change.
    pub fn settle_interval(&mut self, result: Result<AutoScanSettings, ActionError>) -> Notice {
        self.apply(result, "Failed to change scan interval", |settings| {
            format!("Scan interval set to {} minutes.", settings.interval_minutes)
        })
    }

    fn apply(
        &mut self,
        result: Result<AutoScanSettings, ActionError>,
        failure_context: &str,
        success: impl FnOnce(&AutoScanSettings) -> String,
    ) -> Notice {
        self.busy = false;
        match result {
            Ok(settings) => {
                let notice = Notice::success(success(&settings));
                self.settings = Some(settings);
                notice
            }
            Err(err) => Notice::failure(failure_context, err),
        }
    }
}

pub fn validate_interval(minutes: u32) -> Result<u32, FormError> {
    if INTERVAL_CHOICES.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(FormError::InvalidInterval(minutes))
    }
}

pub async fn toggle_auto_scan(api: &ApiClient) -> Result<AutoScanSettings, ActionError> {
    Ok(api.toggle_auto_scan().await?)
}

pub async fn change_interval(
    api: &ApiClient,
    minutes: u32,
) -> Result<AutoScanSettings, ActionError> {
    let minutes = validate_interval(minutes)?;
    Ok(api.set_auto_scan_interval(minutes).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::testing::MockBackend;

    const STATS: &str = r#"{"pendingDrafts":2,"sentDrafts":3,"rejectedDrafts":1,"totalDrafts":6,
        "thisWeek":{"draftsCreated":6,"emailsSent":3,"draftsRejected":1},"gmailConnected":true}"#;

    fn manual() -> AutoScanSettings {
        AutoScanSettings {
            enabled: false,
            interval_minutes: 15,
            last_run_at: None,
        }
    }

    #[tokio::test]
    async fn test_load_parts_fail_independently() {
        let backend = MockBackend::start()
            .with("GET", "/stats/dashboard", 200, STATS)
            .with("GET", "/email/auto-scan/settings", 500, r#"{"error":"boom"}"#)
            .with(
                "GET",
                "/stats/timeline",
                200,
                r#"{"timeline":[{"date":"2026-10-18","created":2,"sent":1,"rejected":0}]}"#,
            )
            .await;
        let api = backend.client(Session::in_memory());

        let loaded = load(&api).await;

        assert_eq!(loaded.stats.unwrap().pending_drafts, 2);
        assert!(loaded.auto_scan.is_err());
        assert_eq!(loaded.timeline.unwrap().len(), 1);
        assert!(
            backend
                .requests()
                .iter()
                .any(|request| request.uri == "/stats/timeline?days=7")
        );
    }

    #[tokio::test]
    async fn test_toggle_label_changes_only_after_response() {
        let backend = MockBackend::start()
            .with(
                "POST",
                "/email/auto-scan/toggle",
                200,
                r#"{"enabled":true,"intervalMinutes":15,"lastRunAt":null}"#,
            )
            .await;
        let api = backend.client(Session::in_memory());
        let mut control = AutoScanControl::new(Some(manual()));

        assert!(control.begin());
        assert!(!control.begin());
        assert_eq!(control.mode().label(), "Manual");

        let result = toggle_auto_scan(&api).await;
        assert_eq!(control.mode().label(), "Manual");

        let notice = control.settle(result);
        assert_eq!(control.mode().label(), "Auto");
        assert!(!control.is_busy());
        assert!(!notice.is_error());
    }

    #[tokio::test]
    async fn test_failed_toggle_keeps_mode() {
        let backend = MockBackend::start()
            .with("POST", "/email/auto-scan/toggle", 500, r#"{"error":"scheduler down"}"#)
            .await;
        let api = backend.client(Session::in_memory());
        let mut control = AutoScanControl::new(Some(manual()));

        control.begin();
        let notice = control.settle(toggle_auto_scan(&api).await);

        assert_eq!(control.mode(), ScanMode::Manual);
        assert_eq!(notice.message, "Failed to update auto scan: scheduler down");
        assert!(notice.is_error());
    }

    #[tokio::test]
    async fn test_interval_change_applies_backend_value() {
        let backend = MockBackend::start()
            .with(
                "PUT",
                "/email/auto-scan/interval",
                200,
                r#"{"enabled":false,"intervalMinutes":60,"lastRunAt":"2026-10-18T08:00:00Z"}"#,
            )
            .await;
        let api = backend.client(Session::in_memory());
        let mut control = AutoScanControl::new(Some(manual()));

        control.begin();
        let notice = control.settle_interval(change_interval(&api, 60).await);

        assert_eq!(notice.message, "Scan interval set to 60 minutes.");
        assert_eq!(control.settings().map(|s| s.interval_minutes), Some(60));
        assert_eq!(control.mode(), ScanMode::Manual);
    }

    #[tokio::test]
    async fn test_interval_outside_choices_is_not_sent() {
        let backend = MockBackend::start().await;
        let api = backend.client(Session::in_memory());

        let err = change_interval(&api, 7).await.unwrap_err();

        assert_eq!(err, ActionError::Form(FormError::InvalidInterval(7)));
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn test_scan_notice() {
        let notice = scan_notice(&ScanResult {
            drafts_created: 2,
            processed: 10,
            skipped: 8,
            errors: 0,
        });
        assert_eq!(
            notice.message,
            "Scan complete: 2 new drafts created, 10 processed, 8 skipped, 0 errors."
        );
        assert!(!notice.is_error());
    }
}
