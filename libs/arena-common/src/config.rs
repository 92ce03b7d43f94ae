// Judge configuration, read once from the environment at startup

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://judge0-ce.p.rapidapi.com";

/// Placeholder credential shipped with demo deployments; treated as absent
pub const DEMO_API_KEY: &str = "demo-key";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// What to do when a configured judge fails mid-run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Return the failure to the caller
    #[default]
    Surface,
    /// Log it and answer with a simulated result instead
    Simulate,
}

impl FromStr for FallbackPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "surface" => Ok(Self::Surface),
            "simulate" => Ok(Self::Simulate),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface => write!(f, "surface"),
            Self::Simulate => write!(f, "simulate"),
        }
    }
}

#[derive(Clone)]
pub struct JudgeConfig {
    pub api_url: String,
    pub api_host: String,
    pub api_key: Option<String>,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub request_timeout: Duration,
    pub on_error: FallbackPolicy,
    pub test_concurrency: usize,
}

// Hand-written so the credential never reaches a log line
impl fmt::Debug for JudgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JudgeConfig")
            .field("api_url", &self.api_url)
            .field("api_host", &self.api_host)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("poll_interval", &self.poll_interval)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .field("request_timeout", &self.request_timeout)
            .field("on_error", &self.on_error)
            .field("test_concurrency", &self.test_concurrency)
            .finish()
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_host: host_of(DEFAULT_API_URL),
            api_key: None,
            poll_interval: Duration::from_millis(1000),
            max_poll_attempts: 10,
            request_timeout: Duration::from_millis(10_000),
            on_error: FallbackPolicy::Surface,
            test_concurrency: 1,
        }
    }
}

impl JudgeConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("JUDGE0_API_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let api_host = lookup("JUDGE0_API_HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| host_of(&api_url));

        let usable_key = |key: &str| {
            lookup(key)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty() && k != DEMO_API_KEY)
        };
        let api_key = usable_key("JUDGE0_API_KEY").or_else(|| usable_key("RAPIDAPI_KEY"));

        let poll_ms: u64 = parse_or(&lookup, "JUDGE_POLL_INTERVAL_MS", 1000)?;
        let max_poll_attempts: u32 = parse_or(&lookup, "JUDGE_MAX_POLL_ATTEMPTS", 10)?;
        let timeout_ms: u64 = parse_or(&lookup, "JUDGE_REQUEST_TIMEOUT_MS", 10_000)?;
        let test_concurrency: usize = parse_or(&lookup, "JUDGE_TEST_CONCURRENCY", 1)?;

        let on_error = match lookup("JUDGE_ON_ERROR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "JUDGE_ON_ERROR",
                value: raw,
            })?,
            None => FallbackPolicy::default(),
        };

        Ok(Self {
            api_url,
            api_host,
            api_key,
            poll_interval: Duration::from_millis(poll_ms),
            max_poll_attempts: max_poll_attempts.max(1),
            request_timeout: Duration::from_millis(timeout_ms),
            on_error,
            test_concurrency: test_concurrency.max(1),
        })
    }

    /// A usable credential is present, so the remote judge will be used
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self.api_host = host_of(&self.api_url);
        self
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

/// Host (and port) portion of a URL, e.g. "judge0-ce.p.rapidapi.com"
fn host_of(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}
