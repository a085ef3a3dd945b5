use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PER_PAGE: u64 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client-side configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the LinkUp API, without a trailing slash.
    pub api_url: String,
    /// Page size used for feed pagination.
    pub per_page: u64,
    /// Hard deadline for every request. A request past the deadline is
    /// aborted so the feed controller can clear its in-flight marker.
    pub request_timeout: Duration,
    /// Where the bearer token is persisted between runs.
    pub token_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("LINKUP_API_URL")
            .context("LINKUP_API_URL not set")?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let per_page = match env::var("LINKUP_PER_PAGE") {
            Ok(raw) => raw
                .parse()
                .context("LINKUP_PER_PAGE must be a positive integer")?,
            Err(_) => DEFAULT_PER_PAGE,
        };

        let timeout_secs = match env::var("LINKUP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .context("LINKUP_TIMEOUT_SECS must be a positive integer")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let token_path = env::var("LINKUP_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_path());

        Ok(ClientConfig {
            api_url,
            per_page,
            request_timeout: Duration::from_secs(timeout_secs),
            token_path,
        })
    }
}

fn default_token_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".linkup_token")
}
