use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("event slug cannot be empty")]
    EmptyEventSlug,

    #[error("request timeout cannot be 0")]
    ZeroTimeout,

    #[error("max in-flight requests cannot be 0")]
    ZeroInFlight,
}

/// Client configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Node API endpoint settings
    pub api: ApiConfig,
    /// Event subtree games are resolved under
    pub event: EventConfig,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        Url::parse(&self.api.base_url)
            .map_err(|e| ValidationError::InvalidBaseUrl(e.to_string()))?;

        if self.event.slug.is_empty() {
            return Err(ValidationError::EmptyEventSlug);
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ValidationError::ZeroTimeout);
        }

        if self.api.max_in_flight == 0 {
            return Err(ValidationError::ZeroInFlight);
        }

        Ok(())
    }
}

/// Node API endpoint configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the node API, e.g. `https://api.ldjam.com/vx/node2/`
    pub base_url: String,

    /// Per-request timeout, covering the response body as well
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Upper bound on concurrent author fetches; 1 means strictly sequential
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_in_flight() -> usize {
    4
}

/// Identifies the event subtree games are resolved under, e.g. slug
/// `ludum-dare`, number `48`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EventConfig {
    pub slug: String,
    pub number: u32,
}
