use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("dugout-terminal/", env!("CARGO_PKG_VERSION"));

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client. Every request is bounded by `DASH_HTTP_TIMEOUT_SECS`
/// unless the caller sets a per-request timeout; nothing is retried.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(default_timeout_secs()))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build http client")
    })
}

fn default_timeout_secs() -> u64 {
    std::env::var("DASH_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
        .max(1)
}
