/*
[INPUT]:  Credentials, HTTP method, request path and body bytes
[OUTPUT]: Signed requests and CB-ACCESS-* authentication headers
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use chrono::Utc;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use crate::auth::{Credentials, sign};
use crate::http::{CoinbaseError, Result};

pub const ACCESS_KEY_HEADER: HeaderName = HeaderName::from_static("cb-access-key");
pub const ACCESS_SIGN_HEADER: HeaderName = HeaderName::from_static("cb-access-sign");
pub const ACCESS_TIMESTAMP_HEADER: HeaderName = HeaderName::from_static("cb-access-timestamp");
pub const VERSION_HEADER: HeaderName = HeaderName::from_static("cb-version");

/// Value sent in `CB-VERSION`
pub const API_VERSION_DATE: &str = "2021-08-03";

/// Static user agent identifying the client and its version
pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// A request prehash together with its timestamp and signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Vec<u8>>,
    pub timestamp: i64,
    pub signature: String,
}

/// Signs outgoing requests for authenticated endpoints
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    /// Create a new request signer for the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign a request using the current wall-clock second
    pub fn sign_request(&self, method: &str, path: &str, body: Option<&[u8]>) -> SignedRequest {
        self.sign_request_at(Utc::now().timestamp(), method, path, body)
    }

    /// Sign a request at a fixed timestamp
    pub fn sign_request_at(
        &self,
        timestamp: i64,
        method: &str,
        path: &str,
        body: Option<&[u8]>,
    ) -> SignedRequest {
        let signature = sign(self.credentials.secret(), timestamp, method, path, body);
        SignedRequest {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
            body: body.map(<[u8]>::to_vec),
            timestamp,
            signature,
        }
    }

    /// Authentication headers for a signed request.
    ///
    /// `CB-ACCESS-TIMESTAMP` always carries the timestamp the signature was computed with.
    pub fn headers(&self, signed: &SignedRequest) -> Result<HeaderMap> {
        build_headers(self.credentials.key(), signed.timestamp, &signed.signature)
    }
}

/// Build the fixed authentication header set
pub fn build_headers(api_key: &str, timestamp: i64, signature: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(6);
    headers.insert(USER_AGENT, header_value(&user_agent())?);
    headers.insert(ACCESS_KEY_HEADER, header_value(api_key)?);
    headers.insert(ACCESS_SIGN_HEADER, header_value(signature)?);
    headers.insert(ACCESS_TIMESTAMP_HEADER, HeaderValue::from(timestamp));
    headers.insert(VERSION_HEADER, HeaderValue::from_static(API_VERSION_DATE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| CoinbaseError::Config("header value contains invalid characters".to_string()))
}
