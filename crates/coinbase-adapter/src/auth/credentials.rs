/*
[INPUT]:  API key/secret and REST/feed hosts (explicit or from the environment)
[OUTPUT]: Immutable credentials and versioned absolute URLs
[POS]:    Auth layer - credential storage and endpoint resolution
[UPDATE]: When adding credential sources or changing URL joining rules
*/

use std::fmt;

use crate::http::ApiGeneration;

/// Default REST host
pub const DEFAULT_REST_HOST: &str = "https://api.coinbase.com";
/// Default WebSocket feed host
pub const DEFAULT_FEED_HOST: &str = "wss://advanced-trade-ws.coinbase.com";

const ENV_API_KEY: &str = "API_KEY";
const ENV_API_SECRET: &str = "API_SECRET";
const ENV_API_REST: &str = "API_REST";
const ENV_API_FEED: &str = "API_FEED";

/// API credentials and hosts
///
/// The secret is only reachable through [`Credentials::secret`] and is redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
    rest_host: String,
    feed_host: String,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        rest_host: impl Into<String>,
        feed_host: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            rest_host: rest_host.into(),
            feed_host: feed_host.into(),
        }
    }

    /// Create credentials for the default public hosts
    pub fn with_default_hosts(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::new(key, secret, DEFAULT_REST_HOST, DEFAULT_FEED_HOST)
    }

    /// Load credentials from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present. Reads
    /// `API_KEY`, `API_SECRET`, `API_REST` and `API_FEED`; missing key or secret become
    /// empty strings, missing hosts fall back to the public defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            key: lookup(ENV_API_KEY).unwrap_or_default(),
            secret: lookup(ENV_API_SECRET).unwrap_or_default(),
            rest_host: lookup(ENV_API_REST).unwrap_or_else(|| DEFAULT_REST_HOST.to_string()),
            feed_host: lookup(ENV_API_FEED).unwrap_or_else(|| DEFAULT_FEED_HOST.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn rest_host(&self) -> &str {
        &self.rest_host
    }

    pub fn feed_host(&self) -> &str {
        &self.feed_host
    }

    /// Build the absolute URL for a raw endpoint path under the given API generation.
    ///
    /// No validation is performed; malformed paths are joined as-is.
    pub fn resolve_url(&self, generation: ApiGeneration, raw_path: &str) -> String {
        let path = generation.resolve_path(raw_path);
        format!(
            "{}/{}",
            self.rest_host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("rest_host", &self.rest_host)
            .field("feed_host", &self.feed_host)
            .finish()
    }
}
