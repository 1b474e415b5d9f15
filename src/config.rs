use std::env;

use url::Url;

use crate::services::graphql::DEFAULT_TIMEOUT_MS;

/// Public demo backend used when no endpoint is configured.
pub const DEFAULT_WORDPRESS_GRAPHQL_URL: &str =
    "https://dev-wp-nextjs-starter-be.pantheonsite.io/graphql";

/// Application configuration loaded from environment variables
///
/// Read once at startup and injected into the services; never re-read.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream WordPress GraphQL endpoint
    pub graphql_url: String,
    /// Optional bearer credential for the upstream
    pub graphql_token: Option<String>,
    /// Origin of the endpoint, used to absolutize relative post uris.
    /// None when the endpoint does not parse as a URL.
    pub graphql_origin: Option<String>,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let graphql_url = env::var("WORDPRESS_GRAPHQL_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_WORDPRESS_GRAPHQL_URL.to_string());

        let graphql_token = env::var("WORDPRESS_GRAPHQL_TOKEN")
            .ok()
            .filter(|v| !v.is_empty());

        let request_timeout_ms = env::var("WORDPRESS_GRAPHQL_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("WORDPRESS_GRAPHQL_TIMEOUT_MS"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let graphql_origin = derive_origin(&graphql_url);

        Ok(Self {
            graphql_url,
            graphql_token,
            graphql_origin,
            request_timeout_ms,
            host,
            port,
        })
    }

    /// Test configuration pointed at a specific endpoint.
    #[cfg(test)]
    pub(crate) fn for_endpoint(endpoint: &str) -> Self {
        Self {
            graphql_url: endpoint.to_string(),
            graphql_token: None,
            graphql_origin: derive_origin(endpoint),
            request_timeout_ms: 2000,
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Origin (scheme + host + port) of a URL, or None when it has no usable one.
fn derive_origin(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    origin
        .is_tuple()
        .then(|| origin.ascii_serialization())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
