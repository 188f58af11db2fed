//! In-process stand-in for the backend, used by the async tests.

use std::collections::HashMap;
use std::future::IntoFuture;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use futures::future::LocalBoxFuture;
use tokio::net::TcpListener;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
    pub api_version: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

type Routes = HashMap<(String, String), (u16, String)>;

struct MockState {
    routes: Routes,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Default)]
pub struct MockBackendBuilder {
    routes: Routes,
}

impl MockBackendBuilder {
    /// Answer `method path` (query ignored) with `status` and a JSON `body`.
    pub fn with(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    async fn serve(self) -> MockBackend {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(MockState {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(respond).with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockBackend {
            base_url: format!("http://{addr}"),
            state,
        }
    }
}

impl IntoFuture for MockBackendBuilder {
    type Output = MockBackend;
    type IntoFuture = LocalBoxFuture<'static, MockBackend>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.serve())
    }
}

pub struct MockBackend {
    base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub fn start() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    pub fn client(&self, session: Session) -> ApiClient {
        ApiClient::new(ClientConfig::new(self.base_url.clone()), session)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// A URL nothing is listening on.
    pub async fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    /// A URL that accepts connections and never answers.
    pub async fn stalled_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                open.push(stream);
            }
        });

        format!("http://{addr}")
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        uri: uri.to_string(),
        authorization: header_value("authorization"),
        api_version: header_value("x-api-version"),
        content_type: header_value("content-type"),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    match state
        .routes
        .get(&(method.to_string(), uri.path().to_string()))
    {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!(r#"{{"error":"no mock for {method} {}"}}"#, uri.path()),
        )
            .into_response(),
    }
}

pub fn draft_json(id: &str, status: &str) -> String {
    format!(
        r#"{{"id":"{id}","senderEmail":"alice@example.com","recipientEmail":"me@example.com",
            "subject":"Lunch?","originalBody":"Are you free tomorrow?","draftBody":"Yes, noon works.",
            "status":"{status}","createdAt":"2026-10-01T12:00:00Z","updatedAt":"2026-10-01T12:00:00Z"}}"#
    )
}
