//! HTTP client module
//!
//! Provides the HTTP client shared by the reporting API and the BigQuery
//! warehouse.
//!
//! # Features
//!
//! - **Authentication**: Bearer tokens from the auth module
//! - **Optional Retries**: Disabled unless a retry count is configured,
//!   exponential backoff between attempts
//! - **Rate Limiting**: Token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::RateLimiterConfig;
