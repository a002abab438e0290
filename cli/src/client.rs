//! Native seams: reqwest-backed [`HttpClient`] and tokio [`Timer`].

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde_json::Value;
use storefront_widgets::env::{HttpClient, HttpError, Timer};

use crate::CliError;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// JSON client rooted at the storefront's base URL.
///
/// Mirrors `fetch`: the body decides the outcome, not the status code.
pub struct ReqwestClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestClient {
    /// # Errors
    ///
    /// Returns [`CliError`] for an unparseable base URL, a cookie with
    /// invalid header characters, or a client build failure.
    pub fn new(base_url: &str, session_cookie: Option<&str>) -> Result<Self, CliError> {
        reqwest::Url::parse(base_url).map_err(|_| CliError::InvalidBaseUrl(base_url.to_owned()))?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn url(&self, path: &str) -> Result<String, HttpError> {
        if !path.starts_with('/') {
            return Err(HttpError::InvalidUrl(path.to_owned()));
        }
        Ok(format!("{}{path}", self.base_url))
    }

    async fn decode(response: reqwest::Response) -> Result<Value, HttpError> {
        let status = response.status();
        let body = response.json::<Value>().await.map_err(|e| HttpError::Decode(e.to_string()))?;
        tracing::debug!(status = status.as_u16(), "response decoded");
        Ok(body)
    }
}

#[async_trait(?Send)]
impl HttpClient for ReqwestClient {
    async fn get_json(&self, path: &str) -> Result<Value, HttpError> {
        let url = self.url(path)?;
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, HttpError> {
        let url = self.url(path)?;
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        Self::decode(response).await
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
