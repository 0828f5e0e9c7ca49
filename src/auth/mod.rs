//! Authentication module
//!
//! Builds the authenticated session every Google API call goes through.
//!
//! A service-account key file is turned into an `AuthConfig`; the
//! `Authenticator` exchanges the signed assertion for an access token, caches
//! it and attaches it to outgoing requests.

mod authenticator;
mod service_account;
mod types;

pub use authenticator::Authenticator;
pub use service_account::{ServiceAccountKey, ANALYTICS_READONLY_SCOPE, BIGQUERY_SCOPE};
pub use types::{AccessToken, AuthConfig};

#[cfg(test)]
mod tests;
