//! Shared fixtures for unit tests

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Service-account key with a throwaway RSA key
const SERVICE_ACCOUNT_FIXTURE: &str = include_str!("../tests/fixtures/service_account.json");

/// The fixture key pointed at a custom token endpoint
pub fn service_account_json(token_uri: &str) -> String {
    let mut key: Value = serde_json::from_str(SERVICE_ACCOUNT_FIXTURE).unwrap();
    key["token_uri"] = json!(token_uri);
    key.to_string()
}

/// Write the fixture key into `dir` and return its path
pub fn write_service_account(dir: &Path, token_uri: &str) -> PathBuf {
    let path = dir.join("service_account.json");
    std::fs::write(&path, service_account_json(token_uri)).unwrap();
    path
}

/// Mount a token endpoint that hands out `token`
pub async fn mount_token_endpoint(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("jwt-bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}
