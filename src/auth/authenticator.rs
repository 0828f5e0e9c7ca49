//! Access tokens for outgoing requests
//!
//! A signed assertion is exchanged at the token endpoint (JWT-bearer grant)
//! and the resulting token is cached until it nears expiry.

use super::types::{AccessToken, AuthConfig};
use crate::error::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Attaches a bearer token to requests, minting a new one when needed
pub struct Authenticator {
    config: AuthConfig,
    token: RwLock<Option<AccessToken>>,
    http_client: Client,
}

impl Authenticator {
    /// `http_client` is used for the token exchange only
    pub fn new(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            token: RwLock::new(None),
            http_client,
        }
    }

    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.access_token().await?;
        Ok(req.bearer_auth(token))
    }

    /// Fetch a token up front so credential problems surface immediately
    pub async fn initialize(&self) -> Result<()> {
        self.access_token().await.map(drop)
    }

    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if !token.is_stale() {
                return Ok(token.value.clone());
            }
        }

        let mut slot = self.token.write().await;
        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = slot.as_ref() {
            if !token.is_stale() {
                return Ok(token.value.clone());
            }
        }

        let token = self.exchange(&sign_assertion(&self.config)?).await?;
        let value = token.value.clone();
        *slot = Some(token);
        Ok(value)
    }

    async fn exchange(&self, assertion: &str) -> Result<AccessToken> {
        debug!("Exchanging JWT assertion at {}", self.config.token_url);

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::jwt(format!(
                "token endpoint answered {}: {body}",
                status.as_u16()
            )));
        }

        let granted: TokenResponse = response.json().await?;
        Ok(AccessToken::new(granted.access_token, granted.expires_in))
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

/// Sign the RS256 assertion presented to the token endpoint
pub(crate) fn sign_assertion(config: &AuthConfig) -> Result<String> {
    let iat = Utc::now().timestamp();
    let claims = AssertionClaims {
        iss: &config.issuer,
        scope: &config.scope,
        aud: &config.token_url,
        iat,
        exp: iat + config.assertion_lifetime_seconds,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid.clone_from(&config.key_id);

    let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())
        .map_err(|e| Error::jwt(format!("Invalid private key: {e}")))?;

    encode(&header, &claims, &key).map_err(|e| Error::jwt(format!("Failed to encode JWT: {e}")))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}
