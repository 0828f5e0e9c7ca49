//! Service-account key files
//!
//! Google service-account keys are JSON documents carrying the signing key
//! and the token endpoint. They are turned into an `AuthConfig` bound to the
//! requested scopes.

use super::types::AuthConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Read-only scope for the Analytics Reporting API
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

/// Read/write scope for BigQuery
pub const BIGQUERY_SCOPE: &str = "https://www.googleapis.com/auth/bigquery";

/// Lifetime requested for signed assertions (Google caps it at one hour)
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

/// Parsed service-account key file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Service account e-mail, used as the JWT issuer
    pub client_email: String,
    /// PEM-encoded RSA private key
    pub private_key: String,
    /// OAuth2 token endpoint
    pub token_uri: String,
    /// Key identifier
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// Owning project
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ServiceAccountKey {
    /// Load a key from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::service_account_key(&display, e.to_string()))?;

        Self::from_json(&content).map_err(|e| match e {
            Error::ServiceAccountKey { message, .. } => Error::service_account_key(display, message),
            other => other,
        })
    }

    /// Parse a key from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let key: Self = serde_json::from_str(json)
            .map_err(|e| Error::service_account_key("<inline>", e.to_string()))?;

        for (field, value) in [
            ("client_email", &key.client_email),
            ("private_key", &key.private_key),
            ("token_uri", &key.token_uri),
        ] {
            if value.trim().is_empty() {
                return Err(Error::service_account_key(
                    "<inline>",
                    format!("field '{field}' is empty"),
                ));
            }
        }

        Ok(key)
    }

    /// Credentials for a token carrying the given scopes
    pub fn auth_config(&self, scopes: &[&str]) -> AuthConfig {
        AuthConfig {
            issuer: self.client_email.clone(),
            private_key: self.private_key.clone(),
            key_id: self.private_key_id.clone(),
            scope: scopes.join(" "),
            token_url: self.token_uri.clone(),
            assertion_lifetime_seconds: ASSERTION_LIFETIME_SECONDS,
        }
    }
}
