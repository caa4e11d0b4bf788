//! KSeF client configuration.
//!
//! Defaults point at the demo environment. Override via environment
//! variables or explicit construction for test/production.

use url::Url;

/// Public KSeF environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KsefEnvironment {
    /// Integration sandbox with fictitious data.
    Test,
    /// Pre-production environment with production rules.
    #[default]
    Demo,
    /// Legally binding production environment.
    Production,
}

impl KsefEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Test => "https://ksef-test.mf.gov.pl/api/",
            Self::Demo => "https://ksef-demo.mf.gov.pl/api/",
            Self::Production => "https://ksef.mf.gov.pl/api/",
        }
    }
}

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the KSeF API.
#[derive(Debug, Clone)]
pub struct KsefConfig {
    /// API root; endpoint paths are resolved relative to it.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl KsefConfig {
    /// Configuration for one of the public environments.
    pub fn for_environment(environment: KsefEnvironment) -> Result<Self, ConfigError> {
        Self::with_base_url(environment.base_url())
    }

    /// Configuration for an arbitrary API root (e.g. a local mock server).
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Override the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `KSEF_BASE_URL` (default: the demo environment)
    /// - `KSEF_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("KSEF_BASE_URL")
            .unwrap_or_else(|| KsefEnvironment::default().base_url().to_string());
        let timeout_secs = match lookup("KSEF_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: parse_base_url("KSEF_BASE_URL", &base_url)?,
            timeout_secs,
        })
    }
}

/// Parse an API root. A missing trailing slash is added so that relative
/// endpoint paths resolve below the root instead of replacing its last segment.
fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            name.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("KSEF_TIMEOUT_SECS must be a whole number of seconds, got '{0}'")]
    InvalidTimeout(String),
}
