//! JSON-over-HTTP client shared by the reporting API and BigQuery
//!
//! Every request carries the bearer token of the client's `Authenticator`,
//! waits on the optional rate limiter and, when retries are enabled, is
//! repeated on 429, 5xx and connection failures with exponential backoff.
//! No request timeout is set: calls wait as long as the transport allows.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Seconds to wait after a 429 that carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Prefix for request paths that are not absolute URLs
    pub base_url: Option<String>,
    /// Extra attempts after a retryable failure; 0 fails on the first one
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each further one
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub rate_limit: Option<RateLimiterConfig>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            max_retries: 0,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            rate_limit: None,
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl HttpClientConfig {
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Backoff starts at `initial` and is capped at `max`
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query string and body of a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Outcome of one attempt that did not produce a usable response
enum Failure {
    /// Worth another attempt after `delay`
    Retryable { error: Error, delay: Duration },
    Fatal(Error),
}

pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Unauthenticated client
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: None,
            rate_limiter,
        })
    }

    /// Client whose requests carry a token minted from `auth`
    pub fn with_auth(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let mut http = Self::with_config(config)?;
        http.authenticator = Some(Authenticator::new(auth, http.client.clone()));
        Ok(http)
    }

    /// Establish the authenticated session before the first API call
    pub async fn initialize_auth(&self) -> Result<()> {
        match &self.authenticator {
            Some(auth) => auth.initialize().await,
            None => Ok(()),
        }
    }

    pub async fn post_json<T: DeserializeOwned>(&self, url: &str, body: Value) -> Result<T> {
        self.request_json(Method::POST, url, RequestConfig::new().json(body))
            .await
    }

    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        self.request_json(Method::GET, url, config).await
    }

    /// Send a request and decode the JSON body of the success response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, url, config).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("Unexpected response from {url}: {e}")))
    }

    /// Send a request, retrying retryable failures up to `max_retries` times
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let url = self.build_url(url);
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            match self.attempt(&method, &url, &config, attempt).await {
                Ok(response) => {
                    debug!("{} {} -> {}", method, url, response.status());
                    return Ok(response);
                }
                Err(Failure::Retryable { error, delay }) if attempt < max_retries => {
                    attempt += 1;
                    warn!(
                        "{} {} failed ({}), retry {}/{} in {:?}",
                        method, url, error, attempt, max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(Failure::Retryable { error, .. } | Failure::Fatal(error)) => return Err(error),
            }
        }
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        config: &RequestConfig,
        attempt: u32,
    ) -> std::result::Result<Response, Failure> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.clone(), url);
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(body) = &config.body {
            req = req.json(body);
        }
        if let Some(auth) = &self.authenticator {
            req = auth.apply(req).await.map_err(Failure::Fatal)?;
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) if e.is_connect() || e.is_timeout() => {
                return Err(Failure::Retryable {
                    error: Error::Http(e),
                    delay: self.calculate_backoff(attempt),
                })
            }
            Err(e) => return Err(Failure::Fatal(Error::Http(e))),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_seconds = retry_after(&response);
            return Err(Failure::Retryable {
                error: Error::RateLimited {
                    retry_after_seconds,
                },
                delay: Duration::from_secs(retry_after_seconds),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let error = Error::http_status(status.as_u16(), body);
        if status.is_server_error() {
            Err(Failure::Retryable {
                error,
                delay: self.calculate_backoff(attempt),
            })
        } else {
            Err(Failure::Fatal(error))
        }
    }

    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }

    /// Exponential backoff for the given zero-based retry, capped at `max_backoff`
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = self
            .config
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}

fn retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECONDS)
}
