/*
[INPUT]:  Completed HTTP exchanges (status, final URL, body text)
[OUTPUT]: Raw responses with lazy JSON decoding
[POS]:    HTTP layer - response surface shared by transport and pagination
[UPDATE]: When exposing more response metadata (headers, latency)
*/

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::Result;

/// A raw HTTP response
///
/// Returned for every status code; callers decide how to treat non-200 responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: StatusCode,
    url: String,
    body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Anything other than 200 OK
    pub fn is_error(&self) -> bool {
        self.status != StatusCode::OK
    }

    /// Decode the body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decode the body as untyped JSON; an empty body decodes to `null`
    pub fn payload(&self) -> Result<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        self.json()
    }
}

/// True for payloads that carry nothing: `null`, `{}`, `[]`, `""` and `false`
pub(crate) fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}
