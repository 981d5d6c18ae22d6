use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::http_client::http_client;

pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a Google service-account key file that the token exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

pub fn load_service_account(path: &Path) -> Result<ServiceAccountKey> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading service account key {}", path.display()))?;
    parse_service_account_json(&raw)
}

pub fn parse_service_account_json(raw: &str) -> Result<ServiceAccountKey> {
    let key: ServiceAccountKey =
        serde_json::from_str(raw).context("invalid service account key json")?;
    if key.client_email.trim().is_empty() {
        bail!("service account key has no client_email");
    }
    if key.private_key.trim().is_empty() {
        bail!("service account key has no private_key");
    }
    Ok(key)
}

pub fn assertion_claims(key: &ServiceAccountKey, scope: &str, now: i64) -> AssertionClaims {
    AssertionClaims {
        iss: key.client_email.clone(),
        scope: scope.to_string(),
        aud: key.token_uri.clone(),
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    }
}

pub fn sign_assertion(key: &ServiceAccountKey, claims: &AssertionClaims) -> Result<String> {
    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("service account private_key is not a valid RSA PEM")?;
    encode(&Header::new(Algorithm::RS256), claims, &signing_key)
        .context("failed signing service account assertion")
}

/// Trades a signed assertion for a short-lived bearer token. One request, no retry.
pub fn fetch_access_token(key: &ServiceAccountKey, scope: &str) -> Result<String> {
    let claims = assertion_claims(key, scope, Utc::now().timestamp());
    let assertion = sign_assertion(key, &claims)?;
    let resp = http_client()?
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .context("token request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading token body")?;
    if !status.is_success() {
        bail!(
            "token endpoint http {status}: {}",
            body.chars().take(200).collect::<String>()
        );
    }
    parse_token_json(&body)
}

pub fn parse_token_json(raw: &str) -> Result<String> {
    let parsed: TokenResponse = serde_json::from_str(raw).context("invalid token json")?;
    match parsed.access_token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => bail!("token response has no access_token"),
    }
}
