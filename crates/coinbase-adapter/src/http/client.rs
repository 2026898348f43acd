/*
[INPUT]:  Credentials, API generation and HTTP configuration (timeouts, rate limit, encodings)
[OUTPUT]: Signed, rate-limited GET/POST/PUT/DELETE exchanges as raw responses
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, Request};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::auth::Credentials;
use crate::http::pagination::PaginationProtocol;
use crate::http::{ApiGeneration, ApiResponse, CoinbaseError, RateLimit, RequestSigner, Result};

/// Where GET parameters are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GetEncoding {
    /// URL query string
    Query,
    /// JSON request body (signed along with the path)
    JsonBody,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub rate_limit: RateLimit,
    /// Overrides [`ApiGeneration::default_get_encoding`]
    pub get_encoding: Option<GetEncoding>,
    /// Overrides [`ApiGeneration::default_pagination`]
    pub pagination: Option<PaginationProtocol>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            rate_limit: RateLimit::default(),
            get_encoding: None,
            pagination: None,
        }
    }
}

/// Main HTTP client for the Coinbase REST API
///
/// Requests are issued one at a time through a single pooled `reqwest::Client`.
#[derive(Debug)]
pub struct CoinbaseClient {
    http_client: Client,
    generation: ApiGeneration,
    signer: RequestSigner,
    rate_limit: RateLimit,
    timeout: Duration,
    get_encoding: GetEncoding,
    pagination: PaginationProtocol,
}

impl CoinbaseClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials, generation: ApiGeneration) -> Result<Self> {
        Self::with_config(credentials, generation, ClientConfig::default())
    }

    /// Client for the `/v2` API with offset pagination
    pub fn legacy(credentials: Credentials) -> Result<Self> {
        Self::new(credentials, ApiGeneration::V2)
    }

    /// Client for the `/api/v3/brokerage` API with cursor pagination
    pub fn advanced(credentials: Credentials) -> Result<Self> {
        Self::new(credentials, ApiGeneration::V3)
    }

    /// Create a new client with custom configuration
    pub fn with_config(
        credentials: Credentials,
        generation: ApiGeneration,
        config: ClientConfig,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| CoinbaseError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            generation,
            signer: RequestSigner::new(credentials),
            rate_limit: config.rate_limit,
            timeout: config.timeout,
            get_encoding: config
                .get_encoding
                .unwrap_or_else(|| generation.default_get_encoding()),
            pagination: config
                .pagination
                .unwrap_or_else(|| generation.default_pagination()),
        })
    }

    pub fn generation(&self) -> ApiGeneration {
        self.generation
    }

    pub fn credentials(&self) -> &Credentials {
        self.signer.credentials()
    }

    pub fn get_encoding(&self) -> GetEncoding {
        self.get_encoding
    }

    pub fn pagination(&self) -> PaginationProtocol {
        self.pagination
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        self.credentials().resolve_url(self.generation, path)
    }

    /// GET; `data` goes to the query string or JSON body per [`GetEncoding`]
    pub async fn get(&self, path: &str, data: Option<&Value>) -> Result<ApiResponse> {
        self.send(Method::GET, path, data, self.get_encoding).await
    }

    /// POST with `data` as JSON body
    pub async fn post(&self, path: &str, data: Option<&Value>) -> Result<ApiResponse> {
        self.send(Method::POST, path, data, GetEncoding::JsonBody)
            .await
    }

    /// PUT with `data` as JSON body
    pub async fn put(&self, path: &str, data: Option<&Value>) -> Result<ApiResponse> {
        self.send(Method::PUT, path, data, GetEncoding::JsonBody)
            .await
    }

    /// DELETE with `data` as JSON body
    pub async fn delete(&self, path: &str, data: Option<&Value>) -> Result<ApiResponse> {
        self.send(Method::DELETE, path, data, GetEncoding::JsonBody)
            .await
    }

    /// Release the connection pool
    pub fn close(self) {
        debug!(generation = ?self.generation, "closing client");
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
        encoding: GetEncoding,
    ) -> Result<ApiResponse> {
        self.rate_limit.wait().await;

        let request = self.build_request(method, path, data, encoding)?;
        debug!(
            method = %request.method(),
            url = %request.url(),
            encoding = ?encoding,
            "sending request"
        );

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| CoinbaseError::from_transport(e, self.timeout))?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| CoinbaseError::from_transport(e, self.timeout))?;

        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        Ok(ApiResponse::new(status, url, body))
    }

    /// Build the final request, then sign its path and body bytes.
    ///
    /// Only the URL path enters the prehash; the query string is sent unsigned. Coinbase's
    /// V2 API validates signatures over path plus query, so authenticated V2 GETs that carry
    /// query parameters (including `starting_after` on follow-up pages) may be rejected with
    /// 401 by the live service. Use [`GetEncoding::JsonBody`] where the endpoint accepts it.
    fn build_request(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
        encoding: GetEncoding,
    ) -> Result<Request> {
        let mut builder = self.http_client.request(method, self.url(path));
        if let Some(data) = data {
            builder = match encoding {
                GetEncoding::Query => builder.query(&query_pairs(data)?),
                GetEncoding::JsonBody => builder.json(data),
            };
        }
        let mut request = builder.build()?;

        let body = request.body().and_then(|body| body.as_bytes());
        let signed = self
            .signer
            .sign_request(request.method().as_str(), request.url().path(), body);
        let headers = self.signer.headers(&signed)?;
        for (name, value) in headers.iter() {
            request.headers_mut().insert(name.clone(), value.clone());
        }

        Ok(request)
    }
}

/// Flatten a JSON object into query pairs.
///
/// Strings are sent verbatim, nulls are skipped and arrays expand into one pair per
/// element (`k=a&k=b`). Nested objects have no query form and are rejected.
fn query_pairs(data: &Value) -> Result<Vec<(String, String)>> {
    let Value::Object(map) = data else {
        return Err(CoinbaseError::Config(
            "GET query parameters must be a JSON object".to_string(),
        ));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push((key.clone(), scalar_query_value(key, item)?));
                }
            }
            Value::Null => {}
            other => pairs.push((key.clone(), scalar_query_value(key, other)?)),
        }
    }
    Ok(pairs)
}

fn scalar_query_value(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        _ => Err(CoinbaseError::Config(format!(
            "GET query parameter '{key}' must be a scalar or an array of scalars"
        ))),
    }
}
