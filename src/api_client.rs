use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::cookie::time::OffsetDateTime;
use reqwest::header::{ACCEPT, COOKIE, SET_COOKIE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::errors::FetchError;

/// Name of the cookie the makechat API uses for its sessions.
pub const SESSION_COOKIE: &str = "session";

/// Thin reqwest wrapper for the makechat JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Attach the upstream session cookie sent with every request.
    pub fn with_session(mut self, session: Option<String>) -> Self {
        self.session = session;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let req = self.http.get(self.url(path)).header(ACCEPT, "application/json");
        match &self.session {
            Some(value) => req.header(COOKIE, format!("{SESSION_COOKIE}={value}")),
            None => req,
        }
    }

    /// GET a JSON document. Non-2xx responses become [`FetchError::Status`].
    pub async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let resp = self.get(path).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp.json::<Value>().await?)
    }

    /// `POST /api/login` and return the value of the `session` cookie the
    /// API sets on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, FetchError> {
        let payload = serde_json::json!({ "username": username, "password": password });
        let resp = self
            .http
            .post(self.url("/api/login"))
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(session_cookie_value)
            .ok_or_else(|| FetchError::MalformedResponse("login response set no session cookie".to_string()))
    }

    /// `GET /api/login`: `Ok(true)` when the API accepts our session cookie,
    /// `Ok(false)` on 401.
    pub async fn check_session(&self) -> Result<bool, FetchError> {
        let resp = self.get("/api/login").send().await?;
        match resp.status() {
            s if s.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            s => Err(FetchError::Status(s.as_u16())),
        }
    }
}

/// Extract the session value from a `Set-Cookie` header line. Cookies the
/// server has already expired (`Max-Age` of zero or less, or an `Expires` in
/// the past) are not a session.
fn session_cookie_value(header: &str) -> Option<String> {
    let cookie = Cookie::parse(header).ok()?;
    if cookie.name() != SESSION_COOKIE || cookie.value().is_empty() {
        return None;
    }
    if cookie.max_age().is_some_and(|age| !age.is_positive()) {
        return None;
    }
    if cookie.expires_datetime().is_some_and(|at| at <= OffsetDateTime::now_utc()) {
        return None;
    }
    Some(cookie.value().to_string())
}
