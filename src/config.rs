use std::{fmt::Display, str::FromStr, time::Duration};

use bon::Builder;
use url::Url;

use crate::errors::{Error, Result};

/// Environment variable holding the API bearer token.
pub const API_KEY_ENV: &str = "DODO_PAYMENTS_API_KEY";
/// Environment variable selecting `live_mode` or `test_mode`.
pub const ENVIRONMENT_ENV: &str = "DODO_PAYMENTS_ENVIRONMENT";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "DODO_PAYMENTS_BASE_URL";

/// Default request timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Which Dodo Payments deployment requests go to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    LiveMode,
    TestMode,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::LiveMode => "https://live.dodopayments.com",
            Environment::TestMode => "https://test.dodopayments.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::LiveMode => "live_mode",
            Environment::TestMode => "test_mode",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "live_mode" => Ok(Environment::LiveMode),
            "test_mode" => Ok(Environment::TestMode),
            other => Err(Error::InvalidConfiguration {
                message: format!("unknown environment {other:?}; expected live_mode or test_mode"),
            }),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client configuration.
#[derive(Builder, Clone)]
pub struct ClientConfig {
    /// Bearer token sent with every request.
    #[builder(into)]
    pub bearer_token: String,
    /// Deployment to talk to when no `base_url` override is set.
    #[builder(default)]
    pub environment: Environment,
    /// Overrides the environment's base URL.
    pub base_url: Option<Url>,
    /// Per-request timeout.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl ClientConfig {
    /// Reads configuration from `DODO_PAYMENTS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bearer_token = lookup(API_KEY_ENV)
            .filter(|token| !token.trim().is_empty())
            .ok_or(Error::MissingConfiguration { name: API_KEY_ENV })?;
        let environment = lookup(ENVIRONMENT_ENV)
            .map(|env| env.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();
        let base_url = lookup(BASE_URL_ENV).map(|url| Url::parse(&url)).transpose()?;

        Ok(ClientConfig {
            bearer_token,
            environment,
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// The base URL requests are resolved against.
    pub fn resolved_base_url(&self) -> Result<Url> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Ok(Url::parse(self.environment.base_url())?),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("bearer_token", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
