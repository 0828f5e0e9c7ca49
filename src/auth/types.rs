//! Auth configuration types

use chrono::{DateTime, Duration, Utc};

/// Tokens this close to expiry are treated as already expired
const REFRESH_MARGIN_SECONDS: i64 = 30;

/// Service-account credentials bound to a set of scopes
///
/// The signed assertion names `token_url` as its audience and is exchanged
/// there for an access token.
#[derive(Clone)]
pub struct AuthConfig {
    /// Service account e-mail (iss claim)
    pub issuer: String,
    /// PEM-encoded RSA key the assertion is signed with
    pub private_key: String,
    /// Key identifier placed in the JWT header
    pub key_id: Option<String>,
    /// Space-separated OAuth scopes
    pub scope: String,
    /// OAuth2 token endpoint, also the assertion audience
    pub token_url: String,
    pub assertion_lifetime_seconds: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("key_id", &self.key_id)
            .field("scope", &self.scope)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// Access token handed out by the token endpoint
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    /// `None` when the endpoint did not report a lifetime
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Token valid for `expires_in` seconds from now, or indefinitely
    pub fn new(value: String, expires_in: Option<i64>) -> Self {
        Self {
            value,
            expires_at: expires_in.map(|seconds| Utc::now() + Duration::seconds(seconds)),
        }
    }

    /// Whether the token must be replaced before the next request
    pub fn is_stale(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            Utc::now() + Duration::seconds(REFRESH_MARGIN_SECONDS) >= expires_at
        })
    }
}
