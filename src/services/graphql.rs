//! GraphQL gateway helper.
//!
//! Issues a single POST request against a configured GraphQL endpoint, bound
//! by a per-request deadline, and normalizes success, partial failure, and
//! transport failure into one uniform result. The helper never returns an
//! error to its caller: every failure mode is folded into the returned
//! [`GraphQLResult`].

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 8000;

/// Cache behavior requested from intermediaries for one outbound call.
///
/// Rendered as a `Cache-Control` request header; [`CacheMode::NoStore`] is the
/// default and asks every hop not to cache or reuse the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Send `Cache-Control: no-store`.
    NoStore,
    /// Send no cache directive.
    Default,
}

/// A single outbound GraphQL call.
#[derive(Debug, Clone)]
pub struct GraphQLRequest {
    pub endpoint: String,
    pub query: String,
    pub variables: Option<Value>,
    pub token: Option<String>,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    pub cache: CacheMode,
}

impl GraphQLRequest {
    pub fn new(endpoint: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: query.into(),
            variables: None,
            token: None,
            headers: Vec::new(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            cache: CacheMode::NoStore,
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.cache = cache;
        self
    }
}

/// One entry of a GraphQL protocol `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<PathSegment>>,
    #[serde(default)]
    pub extensions: Option<serde_json::Map<String, Value>>,
}

impl GraphQLError {
    fn from_message(message: String) -> Self {
        Self {
            message,
            path: None,
            extensions: None,
        }
    }
}

/// A segment of a GraphQL error path: a field name or a list index.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(u64),
    Key(String),
}

/// Uniform outcome of a gateway call.
///
/// `status` is always populated, synthesized as 504 for timeouts and 500 for
/// other transport failures. `data` and `errors` may both be absent, e.g. for
/// a 2xx response whose body is not JSON.
#[derive(Debug)]
pub struct GraphQLResult<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
    pub status: u16,
}

impl<T> GraphQLResult<T> {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errs| !errs.is_empty())
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .as_ref()
            .map(|errs| errs.iter().map(|e| e.message.clone()).collect())
            .unwrap_or_default()
    }
}

/// Wire shape of a GraphQL-over-HTTP response body.
#[derive(Debug, Deserialize)]
struct GraphQLEnvelope<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

/// Stateless gateway issuing one POST per [`GraphQLRequest`].
#[derive(Clone)]
pub struct GraphQLGateway {
    client: reqwest::Client,
}

impl Default for GraphQLGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphQLGateway {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Send one GraphQL request and normalize the outcome.
    ///
    /// Timeouts map to status 504, other transport or decode failures to 500;
    /// protocol errors pass through verbatim. The per-request deadline is
    /// owned by the request future, so it is released on every exit path.
    pub async fn send<T: DeserializeOwned>(&self, request: GraphQLRequest) -> GraphQLResult<T> {
        let timeout_ms = request.timeout.as_millis() as u64;
        match self.dispatch(request).await {
            Ok(result) => result,
            Err(err) => {
                let result = classify_failure(&err, timeout_ms);
                tracing::warn!(status = result.status, "GraphQL transport failure: {err}");
                result
            }
        }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: GraphQLRequest,
    ) -> Result<GraphQLResult<T>, reqwest::Error> {
        let body = serde_json::json!({
            "query": request.query,
            "variables": request.variables,
        });

        let mut builder = self
            .client
            .post(&request.endpoint)
            .timeout(request.timeout)
            .header(CONTENT_TYPE, "application/json");

        if request.cache == CacheMode::NoStore {
            builder = builder.header(CACHE_CONTROL, "no-store");
        }
        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.json(&body).send().await?;
        let status = response.status().as_u16();

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.to_ascii_lowercase().contains("application/json"));

        if !is_json {
            return Ok(GraphQLResult {
                data: None,
                errors: synthesize_http_failure(status),
                status,
            });
        }

        let envelope: GraphQLEnvelope<T> = response.json().await?;

        Ok(GraphQLResult {
            data: envelope.data,
            errors: envelope
                .errors
                .or_else(|| synthesize_http_failure(status)),
            status,
        })
    }
}

/// A non-2xx status without protocol errors becomes a single synthetic error.
fn synthesize_http_failure(status: u16) -> Option<Vec<GraphQLError>> {
    if (200..300).contains(&status) {
        None
    } else {
        Some(vec![GraphQLError::from_message(format!(
            "GraphQL request failed with status {status}"
        ))])
    }
}

fn classify_failure<T>(err: &reqwest::Error, timeout_ms: u64) -> GraphQLResult<T> {
    let (status, message) = if err.is_timeout() {
        (
            504,
            format!("GraphQL request timed out after {timeout_ms}ms"),
        )
    } else {
        (500, err.to_string())
    };

    GraphQLResult {
        data: None,
        errors: Some(vec![GraphQLError::from_message(message)]),
        status,
    }
}
