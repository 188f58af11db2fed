use std::rc::Rc;

use autoreply_types::{
    API_VERSION, AuthResponse, AutoScanSettings, DashboardStats, Draft, DraftEnvelope, DraftFilter,
    DraftId, DraftList, EditDraftRequest, ErrorBody, GmailAuthUrl, GmailStatus, IntervalRequest,
    LoginRequest, RegisterRequest, ScanPeriod, ScanResult, Timeline, TimelineEntry, UserProfile,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;

pub const API_VERSION_HEADER: &str = "X-Api-Version";

/// HTTP client for the auto-responder backend.
///
/// Attaches the session's bearer token to every request. A 401 response clears
/// the session and runs the unauthorized hook before the error is returned.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ClientConfig,
    session: Session,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Session) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            session,
            on_unauthorized: None,
        }
    }

    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(self.request(Method::POST, "/auth/register").json(request))
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(self.request(Method::POST, "/auth/login").json(request))
            .await
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.fetch(self.request(Method::GET, "/auth/profile")).await
    }

    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError> {
        self.fetch(self.request(Method::PUT, "/auth/profile").json(profile))
            .await
    }

    pub async fn gmail_auth_url(&self) -> Result<GmailAuthUrl, ApiError> {
        self.fetch(self.request(Method::GET, "/gmail/auth-url")).await
    }

    pub async fn gmail_status(&self) -> Result<GmailStatus, ApiError> {
        self.fetch(self.request(Method::GET, "/gmail/status")).await
    }

    pub async fn disconnect_gmail(&self) -> Result<(), ApiError> {
        self.fire(self.request(Method::POST, "/gmail/disconnect"))
            .await
    }

    pub async fn gmail_callback(&self, code: &str) -> Result<(), ApiError> {
        self.fire(
            self.request(Method::GET, "/gmail/callback")
                .query(&[("code", code)]),
        )
        .await
    }

    pub async fn scan_inbox(&self, period: ScanPeriod) -> Result<ScanResult, ApiError> {
        self.fetch(
            self.request(Method::POST, "/email/scan")
                .query(&[("period", period.as_str())]),
        )
        .await
    }

    pub async fn pending_drafts(&self, period: ScanPeriod) -> Result<Vec<Draft>, ApiError> {
        let list: DraftList = self
            .fetch(
                self.request(Method::GET, "/email/drafts/pending")
                    .query(&[("period", period.as_str())]),
            )
            .await?;
        Ok(list.drafts)
    }

    /// Drafts matching `filter`. A pending-only filter uses the dedicated pending endpoint.
    pub async fn list_drafts(&self, filter: DraftFilter) -> Result<Vec<Draft>, ApiError> {
        if filter.is_pending_only() {
            return self.pending_drafts(filter.period.unwrap_or(ScanPeriod::Week)).await;
        }

        let mut query = Vec::new();
        if let Some(status) = filter.status {
            query.push(("status", status.as_str()));
        }
        if let Some(period) = filter.period {
            query.push(("period", period.as_str()));
        }

        let list: DraftList = self
            .fetch(self.request(Method::GET, "/email/drafts").query(&query))
            .await?;
        Ok(list.drafts)
    }

    pub async fn draft(&self, id: &DraftId) -> Result<Draft, ApiError> {
        let url = self.draft_url(id, None)?;
        let envelope: DraftEnvelope = self.fetch(self.request_url(Method::GET, url)).await?;
        Ok(envelope.draft)
    }

    pub async fn approve_draft(&self, id: &DraftId) -> Result<Draft, ApiError> {
        let url = self.draft_url(id, Some("approve"))?;
        let envelope: DraftEnvelope = self.fetch(self.request_url(Method::POST, url)).await?;
        Ok(envelope.draft)
    }

    pub async fn reject_draft(&self, id: &DraftId) -> Result<Draft, ApiError> {
        let url = self.draft_url(id, Some("reject"))?;
        let envelope: DraftEnvelope = self.fetch(self.request_url(Method::POST, url)).await?;
        Ok(envelope.draft)
    }

    pub async fn edit_draft(&self, id: &DraftId, edited_body: &str) -> Result<Draft, ApiError> {
        let url = self.draft_url(id, Some("edit"))?;
        let body = EditDraftRequest {
            edited_body: edited_body.to_string(),
        };
        let envelope: DraftEnvelope = self
            .fetch(self.request_url(Method::POST, url).json(&body))
            .await?;
        Ok(envelope.draft)
    }

    pub async fn auto_scan_settings(&self) -> Result<AutoScanSettings, ApiError> {
        self.fetch(self.request(Method::GET, "/email/auto-scan/settings"))
            .await
    }

    pub async fn toggle_auto_scan(&self) -> Result<AutoScanSettings, ApiError> {
        self.fetch(self.request(Method::POST, "/email/auto-scan/toggle"))
            .await
    }

    pub async fn set_auto_scan_interval(
        &self,
        interval_minutes: u32,
    ) -> Result<AutoScanSettings, ApiError> {
        let body = IntervalRequest { interval_minutes };
        self.fetch(
            self.request(Method::PUT, "/email/auto-scan/interval")
                .json(&body),
        )
        .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.fetch(self.request(Method::GET, "/stats/dashboard")).await
    }

    pub async fn timeline(&self, days: u32) -> Result<Vec<TimelineEntry>, ApiError> {
        let timeline: Timeline = self
            .fetch(
                self.request(Method::GET, "/stats/timeline")
                    .query(&[("days", days)]),
            )
            .await?;
        Ok(timeline.timeline)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_url(method, self.config.url(path))
    }

    fn request_url(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        let request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_VERSION_HEADER, API_VERSION.to_string())
            .timeout(self.config.timeout);

        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// `/email/drafts/<id>[/<action>]` with the id percent-encoded as one segment.
    fn draft_url(&self, id: &DraftId, action: Option<&str>) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.config.url("/email/drafts"))
            .map_err(|err| ApiError::InvalidRequest(err.to_string()))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidRequest(format!("base URL {} cannot hold a path", self.config.base_url))
            })?;
            segments.push(id.as_str());
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let url = response.url().path().to_string();
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::error!(path = %url, error = %err, "response did not match schema");
            ApiError::Decode(err.to_string())
        })
    }

    async fn fire(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        tracing::debug!(%method, %path, "sending request");

        let response = self.client.execute(request).await.map_err(|err| {
            tracing::error!(%method, %path, error = %err, "no response from server");
            ApiError::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%method, %path, status = status.as_u16(), "response received");
            return Ok(response);
        }

        let message = error_message(response).await;
        tracing::warn!(%method, %path, status = status.as_u16(), %message, "request failed");

        if status == StatusCode::UNAUTHORIZED {
            self.session.sign_out();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(ApiError::Unauthorized { message });
        }

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

async fn error_message(response: Response) -> String {
    let fallback = response
        .status()
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();

    match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|body| body.error)
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBackend, draft_json};
    use std::cell::Cell;
    use std::time::Duration;

    #[tokio::test]
    async fn test_bearer_token_is_attached_when_signed_in() {
        let backend = MockBackend::start()
            .with(
                "GET",
                "/stats/dashboard",
                200,
                r#"{"pendingDrafts":3,"sentDrafts":5,"rejectedDrafts":1,"totalDrafts":9,
                    "thisWeek":{"draftsCreated":4,"emailsSent":2,"draftsRejected":0},
                    "gmailConnected":true}"#,
            )
            .await;
        let session = Session::in_memory();
        session.sign_in("tok-1");
        let api = backend.client(session);

        let stats = api.dashboard_stats().await.unwrap();
        assert_eq!(stats.pending_drafts, 3);
        assert!(stats.gmail_connected);

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok-1"));
        assert_eq!(requests[0].api_version.as_deref(), Some("1"));
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let backend = MockBackend::start()
            .with("POST", "/auth/login", 200, r#"{"token":"t"}"#)
            .await;
        let api = backend.client(Session::in_memory());

        let request = LoginRequest {
            email: "a@example.com".to_string(),
            password: "pw".to_string(),
        };
        api.login(&request).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].authorization, None);
        assert_eq!(
            requests[0].body,
            r#"{"email":"a@example.com","password":"pw"}"#
        );
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token_and_runs_hook() {
        let backend = MockBackend::start()
            .with("GET", "/auth/profile", 401, r#"{"error":"Token expired"}"#)
            .await;
        let session = Session::in_memory();
        session.sign_in("stale");

        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let api = backend
            .client(session.clone())
            .on_unauthorized(move || counter.set(counter.get() + 1));

        let err = api.profile().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Unauthorized {
                message: "Token expired".to_string()
            }
        );
        assert!(!session.is_authenticated());
        assert_eq!(fired.get(), 1);
    }

    #[tokio::test]
    async fn test_server_error_carries_backend_message() {
        let backend = MockBackend::start()
            .with("POST", "/email/scan", 500, r#"{"error":"Gmail not connected"}"#)
            .await;
        let session = Session::in_memory();
        session.sign_in("tok");
        let api = backend.client(session.clone());

        let err = api.scan_inbox(ScanPeriod::Day).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                message: "Gmail not connected".to_string()
            }
        );
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_error_without_body_uses_reason_phrase() {
        let backend = MockBackend::start()
            .with("GET", "/gmail/status", 503, "")
            .await;
        let api = backend.client(Session::in_memory());

        let err = api.gmail_status().await.unwrap_err();
        assert_eq!(err.to_string(), "Service Unavailable");
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_a_decode_error() {
        let backend = MockBackend::start()
            .with("GET", "/email/auto-scan/settings", 200, r#"{"enabled":"yes"}"#)
            .await;
        let api = backend.client(Session::in_memory());

        let err = api.auto_scan_settings().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        let api = ApiClient::new(
            ClientConfig::new(MockBackend::unreachable_url().await),
            Session::in_memory(),
        );

        let err = api.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let config = ClientConfig::new(MockBackend::stalled_url().await)
            .with_timeout(Duration::from_millis(200));
        let api = ApiClient::new(config, Session::in_memory());

        let err = api.dashboard_stats().await.unwrap_err();
        assert_eq!(err, ApiError::Timeout);
        assert_eq!(err.to_string(), "The server took too long to respond");
    }

    #[tokio::test]
    async fn test_query_parameters_are_encoded() {
        let backend = MockBackend::start()
            .with("GET", "/gmail/callback", 200, "{}")
            .with(
                "POST",
                "/email/scan",
                200,
                r#"{"draftsCreated":1,"processed":4,"skipped":3,"errors":0}"#,
            )
            .await;
        let api = backend.client(Session::in_memory());

        api.gmail_callback("4/0A&b=c").await.unwrap();
        let result = api.scan_inbox(ScanPeriod::Month).await.unwrap();
        assert_eq!(result.drafts_created, 1);

        let requests = backend.requests();
        assert_eq!(requests[0].uri, "/gmail/callback?code=4%2F0A%26b%3Dc");
        assert_eq!(requests[1].uri, "/email/scan?period=month");
    }

    #[tokio::test]
    async fn test_draft_routes() {
        let backend = MockBackend::start()
            .with("GET", "/email/drafts/D1", 200, &format!(r#"{{"draft":{}}}"#, draft_json("D1", "pending")))
            .with("POST", "/email/drafts/D1/edit", 200, &format!(r#"{{"draft":{}}}"#, draft_json("D1", "edited")))
            .await;
        let api = backend.client(Session::in_memory());
        let id = DraftId::new("D1");

        let draft = api.draft(&id).await.unwrap();
        assert!(draft.is_pending());

        let edited = api.edit_draft(&id, "New reply").await.unwrap();
        assert_eq!(edited.status, autoreply_types::DraftStatus::Edited);

        let requests = backend.requests();
        assert_eq!(requests[1].method, "POST");
        assert_eq!(requests[1].body, r#"{"editedBody":"New reply"}"#);
    }

    #[tokio::test]
    async fn test_list_drafts_by_status() {
        let backend = MockBackend::start()
            .with("GET", "/email/drafts", 200, &format!(r#"{{"drafts":[{}]}}"#, draft_json("D9", "sent")))
            .with("GET", "/email/drafts/pending", 200, r#"{"drafts":[]}"#)
            .await;
        let api = backend.client(Session::in_memory());

        let sent = api
            .list_drafts(DraftFilter {
                status: Some(autoreply_types::DraftStatus::Sent),
                period: Some(ScanPeriod::Week),
            })
            .await
            .unwrap();
        assert_eq!(sent.len(), 1);

        let pending = api
            .list_drafts(DraftFilter::pending(ScanPeriod::Day))
            .await
            .unwrap();
        assert!(pending.is_empty());

        let requests = backend.requests();
        assert_eq!(requests[0].uri, "/email/drafts?status=sent&period=week");
        assert_eq!(requests[1].uri, "/email/drafts/pending?period=day");
    }

    #[tokio::test]
    async fn test_interval_update_body() {
        let backend = MockBackend::start()
            .with(
                "PUT",
                "/email/auto-scan/interval",
                200,
                r#"{"enabled":true,"intervalMinutes":30,"lastRunAt":null}"#,
            )
            .await;
        let api = backend.client(Session::in_memory());

        let settings = api.set_auto_scan_interval(30).await.unwrap();
        assert_eq!(settings.interval_minutes, 30);
        assert_eq!(backend.requests()[0].body, r#"{"intervalMinutes":30}"#);
    }
}
