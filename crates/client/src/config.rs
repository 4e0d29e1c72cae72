use std::time::Duration;

/// Default lifetime of cached entity details, in seconds.
const DEFAULT_DETAIL_CACHE_TTL_SECS: u64 = 60;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin, e.g. `https://api.museum.example/api/v1`.
    pub api_base_url: String,
    /// Anonymous bearer token used for public artifact viewing.
    pub public_visitor_token: Option<String>,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    /// Lifetime of cached entity details (`Duration::ZERO` = no expiry).
    pub detail_cache_ttl: Duration,
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

impl ClientConfig {
    /// Configuration with defaults for everything but the base URL.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            public_visitor_token: None,
            request_timeout: None,
            detail_cache_ttl: Duration::from_secs(DEFAULT_DETAIL_CACHE_TTL_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                        | Required | Default |
    /// |--------------------------------|----------|---------|
    /// | `VITE_API_BASE_URL`            | **yes**  | --      |
    /// | `VITE_PUBLIC_VISITOR_TOKEN`    | no       | --      |
    /// | `MUSEUM_REQUEST_TIMEOUT_SECS`  | no       | none    |
    /// | `MUSEUM_DETAIL_CACHE_TTL_SECS` | no       | `60`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = get("VITE_API_BASE_URL").ok_or(ConfigError::Missing("VITE_API_BASE_URL"))?;
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "VITE_API_BASE_URL",
                value: api_base_url,
            });
        }

        let mut config = Self::new(api_base_url);
        config.public_visitor_token = get("VITE_PUBLIC_VISITOR_TOKEN");

        if let Some(raw) = get("MUSEUM_REQUEST_TIMEOUT_SECS") {
            let secs = parse_secs("MUSEUM_REQUEST_TIMEOUT_SECS", &raw)?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(raw) = get("MUSEUM_DETAIL_CACHE_TTL_SECS") {
            config.detail_cache_ttl =
                Duration::from_secs(parse_secs("MUSEUM_DETAIL_CACHE_TTL_SECS", &raw)?);
        }

        Ok(config)
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.to_string(),
    })
}
