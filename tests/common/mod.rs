//! Shared test infrastructure.
//!
//! `StubApi` serves canned makechat API responses from an actix-web server
//! bound to an ephemeral port, and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::Value;

use makechat_admin::api_client::ApiClient;
use makechat_admin::auth::session::SessionContext;
use makechat_admin::collection::{CollectionState, RemoteCollection};
use makechat_admin::models::Resource;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_USER: &str = "admin";
pub const PLAIN_USER: &str = "alice";

/// Nothing listens here, so every request fails to connect.
pub const DEAD_API_URL: &str = "http://127.0.0.1:1";

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn admin_session() -> SessionContext {
    SessionContext::new(ADMIN_USER, true)
}

pub fn plain_session() -> SessionContext {
    SessionContext::new(PLAIN_USER, false)
}

pub fn dead_client() -> ApiClient {
    ApiClient::new(DEAD_API_URL, Some(Duration::from_secs(2))).expect("Failed to build client")
}

// ============================================================================
// STUB MAKECHAT API
// ============================================================================

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub set_cookie: Option<String>,
    pub delay: Option<Duration>,
}

impl StubResponse {
    pub fn json(body: Value) -> Self {
        Self { status: 200, body: body.to_string(), set_cookie: None, delay: None }
    }

    pub fn status(code: u16) -> Self {
        Self { status: code, body: "{}".to_string(), set_cookie: None, delay: None }
    }

    pub fn with_cookie(mut self, cookie: &str) -> Self {
        self.set_cookie = Some(cookie.to_string());
        self
    }

    /// Hold the response back, for racing a slow fetch against a fast one.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub cookie: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct StubState {
    routes: HashMap<String, StubResponse>,
    requests: Vec<RecordedRequest>,
}

pub struct StubApi {
    pub base_url: String,
    state: Arc<Mutex<StubState>>,
}

impl StubApi {
    /// Start a stub server. Must run inside an actix system
    /// (`#[actix_web::test]`).
    pub fn start() -> Self {
        let state = Arc::new(Mutex::new(StubState::default()));
        let data = web::Data::from(Arc::clone(&state));

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(stub_handler))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind stub API");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self { base_url: format!("http://{addr}"), state }
    }

    /// Serve `response` for every request to `path`, replacing any earlier one.
    pub fn route(&self, path: &str, response: StubResponse) {
        self.state
            .lock()
            .expect("stub state poisoned")
            .routes
            .insert(path.to_string(), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().expect("stub state poisoned").requests.clone()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, Some(Duration::from_secs(5))).expect("Failed to build client")
    }
}

async fn stub_handler(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<Mutex<StubState>>,
) -> HttpResponse {
    let route = {
        let mut state = state.lock().expect("stub state poisoned");
        state.requests.push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            cookie: req
                .headers()
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .map(String::from),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
        state.routes.get(req.path()).cloned()
    };

    match route {
        Some(resp) => {
            if let Some(delay) = resp.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(resp.status).expect("invalid stub status");
            let mut builder = HttpResponse::build(status);
            if let Some(cookie) = resp.set_cookie {
                builder.insert_header(("Set-Cookie", cookie));
            }
            builder.content_type("application/json").body(resp.body)
        }
        None => HttpResponse::NotFound().finish(),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Wait until the collection's current fetch has finished and return the
/// resulting state.
pub async fn settle<T: Resource>(collection: &RemoteCollection<T>) -> CollectionState<T> {
    let mut changes = collection.subscribe();
    let state = tokio::time::timeout(SETTLE_TIMEOUT, changes.wait_for(|s| s.is_settled()))
        .await
        .expect("collection did not settle in time")
        .expect("collection dropped");
    state.clone()
}

/// A `{ "items": [...] }` list response.
pub fn envelope(items: Value) -> StubResponse {
    StubResponse::json(serde_json::json!({ "items": items }))
}
