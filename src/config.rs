//! Environment configuration
//!
//! The loader reads the service-account key location and, optionally, API
//! endpoint overrides from the process environment.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use std::path::PathBuf;

/// Environment variable holding the service-account key path
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Environment variable overriding the Analytics Reporting API endpoint
pub const REPORTING_URL_ENV: &str = "ANALYTICS_REPORTING_URL";

/// Environment variable overriding the BigQuery API endpoint
pub const BIGQUERY_URL_ENV: &str = "BIGQUERY_URL";

/// Default Analytics Reporting API endpoint
pub const DEFAULT_REPORTING_URL: &str = "https://analyticsreporting.googleapis.com";

/// Default BigQuery API endpoint
pub const DEFAULT_BIGQUERY_URL: &str = "https://bigquery.googleapis.com";

/// Settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path to the service-account key file
    pub credentials_path: PathBuf,
    /// Base URL of the Analytics Reporting API
    pub reporting_url: String,
    /// Base URL of the BigQuery API
    pub bigquery_url: String,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials_path = lookup(CREDENTIALS_ENV)
            .none_if_empty()
            .map(PathBuf::from)
            .ok_or_else(|| Error::missing_config(CREDENTIALS_ENV))?;

        let reporting_url = lookup(REPORTING_URL_ENV)
            .none_if_empty()
            .unwrap_or_else(|| DEFAULT_REPORTING_URL.to_string());
        let bigquery_url = lookup(BIGQUERY_URL_ENV)
            .none_if_empty()
            .unwrap_or_else(|| DEFAULT_BIGQUERY_URL.to_string());

        for (field, value) in [
            (REPORTING_URL_ENV, &reporting_url),
            (BIGQUERY_URL_ENV, &bigquery_url),
        ] {
            url::Url::parse(value).map_err(|e| Error::invalid_config(field, e.to_string()))?;
        }

        Ok(Self {
            credentials_path,
            reporting_url,
            bigquery_url,
        })
    }
}
