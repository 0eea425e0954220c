use std::sync::Arc;
use std::time::Duration;

use adopta_config::{ApiConfig, AppConfig, CsrfConfig};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderName, HeaderValue, ACCEPT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{flatten_error, ApiError, ApiResult};

const CSRF_PATH: &str = "auth/csrf/";

pub(crate) enum Body {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Shared HTTP client for the adoption service.
pub struct ApiClient {
    http: Client,
    jar: Arc<Jar>,
    base_url: Url,
    csrf_cookie: String,
    csrf_header: HeaderName,
}

impl ApiClient {
    pub fn new(api: &ApiConfig, csrf: &CsrfConfig) -> ApiResult<Self> {
        // a trailing slash makes `join` keep the last path segment
        let base = format!("{}/", api.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        let csrf_header = HeaderName::from_bytes(csrf.header_name.as_bytes())
            .map_err(|err| ApiError::InvalidUrl(format!("bad csrf header name: {err}")))?;

        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(api.request_timeout_seconds))
            .user_agent(api.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            jar,
            base_url,
            csrf_cookie: csrf.cookie_name.clone(),
            csrf_header,
        })
    }

    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        Self::new(&config.api, &config.csrf)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current value of the CSRF cookie, if the service has set one
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let cookies = header.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == self.csrf_cookie).then(|| value.to_string())
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(Method::GET, path, Body::Empty).await?;
        decode(body)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_value(payload)
            .map_err(|err| ApiError::Transport(format!("could not encode request: {err}")))?;
        let body = self.send(Method::POST, path, Body::Json(payload)).await?;
        decode(body)
    }

    pub(crate) async fn send_form<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> ApiResult<T> {
        let body = self.send(method, path, Body::Multipart(form)).await?;
        decode(body)
    }

    /// Issue a request and return its JSON body, `None` for 204 or an empty body.
    pub(crate) async fn send(&self, method: Method, path: &str, body: Body) -> ApiResult<Option<Value>> {
        let url = self.url(path)?;
        let mutating = matches!(
            method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        );

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");

        if mutating {
            match self.ensure_csrf_token().await? {
                Some(token) => match HeaderValue::from_str(&token) {
                    Ok(value) => request = request.header(self.csrf_header.clone(), value),
                    Err(_) => warn!("csrf cookie holds an invalid header value"),
                },
                None => warn!(path, "no csrf token available, sending without it"),
            }
        }

        request = match body {
            Body::Empty => request,
            Body::Json(payload) => request.json(&payload),
            Body::Multipart(form) => request.multipart(form),
        };

        debug!(%method, path, "sending request");
        let response = request.send().await?;
        read_body(response).await
    }

    async fn ensure_csrf_token(&self) -> ApiResult<Option<String>> {
        if let Some(token) = self.csrf_token() {
            return Ok(Some(token));
        }

        debug!("csrf cookie missing, asking the service for one");
        let url = self.url(CSRF_PATH)?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Transport(format!(
                "could not obtain a csrf token ({})",
                response.status()
            )));
        }

        Ok(self.csrf_token())
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }
}

async fn read_body(response: reqwest::Response) -> ApiResult<Option<Value>> {
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let text = response.text().await?;
    let body = if text.trim().is_empty() {
        None
    } else {
        let parsed = serde_json::from_str::<Value>(&text).map_err(|_| {
            ApiError::Transport(format!("service answered {status} with a non-JSON body"))
        })?;
        Some(parsed)
    };

    if !status.is_success() {
        let message = flatten_error(body.as_ref());
        debug!(status = status.as_u16(), %message, "service rejected request");
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

fn decode<T: DeserializeOwned>(body: Option<Value>) -> ApiResult<T> {
    serde_json::from_value(body.unwrap_or(Value::Null))
        .map_err(|err| ApiError::Transport(format!("unexpected response shape: {err}")))
}
