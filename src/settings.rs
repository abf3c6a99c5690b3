use std::{path::PathBuf, time::Duration};

use crate::summary::DEFAULT_SUMMARY_FILE;

pub const API_TOKEN_ENV: &str = "OKTA_API_TOKEN";
pub const DEFAULT_BASE_URL: &str = "https://dev-14159127-admin.okta.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything an operation needs to reach the provider, built once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
    pub summary_file: PathBuf,
    pub verbose: bool,
}

impl Settings {
    pub fn new<U, T>(base_url: U, api_token: T) -> Self
    where
        U: Into<String>,
        T: Into<String>,
    {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            summary_file: PathBuf::from(DEFAULT_SUMMARY_FILE),
            verbose: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_summary_file<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.summary_file = path.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// The API token from the environment, if set and non-empty.
pub fn api_token_from_env() -> Option<String> {
    std::env::var(API_TOKEN_ENV).ok().filter(|token| !token.is_empty())
}
