/*
[INPUT]:  Endpoint path, optional page parameters, client GET transport
[OUTPUT]: Ordered raw page responses for a fully enumerated collection
[POS]:    HTTP layer - pagination engine for offset (V2) and cursor (V3) collections
[UPDATE]: When pagination envelopes or terminal conditions change
*/

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::http::response::is_empty_payload;
use crate::http::{ApiResponse, CoinbaseClient, CoinbaseError, Result};

const OFFSET_PAGE_LIMIT: u32 = 25;
const CURSOR_PAGE_LIMIT: u32 = 50;

/// Envelope scheme used to walk a paged collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationProtocol {
    /// `{ data, pagination: { next_uri, next_starting_after } }`
    OffsetStyle,
    /// `{ has_next, cursor, <items> }`
    CursorStyle,
}

impl PaginationProtocol {
    /// Page size seeded when the caller supplies no parameters
    pub fn default_limit(self) -> u32 {
        match self {
            PaginationProtocol::OffsetStyle => OFFSET_PAGE_LIMIT,
            PaginationProtocol::CursorStyle => CURSOR_PAGE_LIMIT,
        }
    }
}

/// Request parameters for one page fetch.
///
/// Advancing produces a new value; a run never mutates the caller's parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageParams(Map<String, Value>);

impl PageParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters holding only a page size
    pub fn with_limit(limit: u32) -> Self {
        Self::new().with("limit", limit)
    }

    /// Copy of these parameters with `key` set to `value`
    pub fn with(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut next = self.0.clone();
        next.insert(key.to_string(), value.into());
        Self(next)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for PageParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Outcome of inspecting one successful page
#[derive(Debug, PartialEq)]
enum Step {
    /// Keep the page and fetch again with the given parameters
    Continue(PageParams),
    /// Keep the page and stop
    Last,
    /// Stop without keeping the page
    Done,
}

/// Drives repeated GET calls until a collection is exhausted
#[derive(Debug)]
pub struct Paginator<'a> {
    client: &'a CoinbaseClient,
    protocol: PaginationProtocol,
    cancel: Option<CancellationToken>,
}

impl<'a> Paginator<'a> {
    /// Paginator using the client's configured protocol
    pub fn new(client: &'a CoinbaseClient) -> Self {
        Self {
            client,
            protocol: client.pagination(),
            cancel: None,
        }
    }

    pub fn protocol(mut self, protocol: PaginationProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Abort the run with [`CoinbaseError::Cancelled`] once `token` fires.
    ///
    /// Checked before every page fetch; an in-flight request is not interrupted.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Fetch every page of `path`.
    ///
    /// Empty parameters are seeded with the protocol's default limit. A non-200 response ends
    /// the run immediately and is returned alone.
    pub async fn run(&self, path: &str, params: Option<PageParams>) -> Result<Vec<ApiResponse>> {
        let mut params = match params {
            Some(params) if !params.is_empty() => params,
            _ => PageParams::with_limit(self.protocol.default_limit()),
        };
        let mut pages = Vec::new();

        loop {
            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                return Err(CoinbaseError::Cancelled {
                    path: path.to_string(),
                    pages: pages.len(),
                });
            }

            let response = self.client.get(path, Some(&params.to_value())).await?;
            if response.status() != StatusCode::OK {
                debug!(
                    path,
                    status = response.status().as_u16(),
                    "pagination aborted on error response"
                );
                return Ok(vec![response]);
            }

            let payload = response.payload()?;
            if is_empty_payload(&payload) {
                debug!(path, "empty page, stopping");
                break;
            }

            let step = match self.protocol {
                PaginationProtocol::OffsetStyle => offset_step(path, &payload, &params)?,
                PaginationProtocol::CursorStyle => cursor_step(path, &payload, &params)?,
            };

            match step {
                Step::Continue(next) => {
                    pages.push(response);
                    debug!(path, pages = pages.len(), "fetched page");
                    params = next;
                }
                Step::Last => {
                    pages.push(response);
                    break;
                }
                Step::Done => break,
            }
        }

        info!(path, protocol = ?self.protocol, pages = pages.len(), "pagination complete");
        Ok(pages)
    }
}

impl CoinbaseClient {
    /// Paginator bound to this client
    pub fn paginator(&self) -> Paginator<'_> {
        Paginator::new(self)
    }

    /// Fetch every page of `path` using the configured protocol
    pub async fn page(&self, path: &str, params: Option<PageParams>) -> Result<Vec<ApiResponse>> {
        self.paginator().run(path, params).await
    }
}

fn offset_step(path: &str, payload: &Value, params: &PageParams) -> Result<Step> {
    let pagination = payload
        .get("pagination")
        .filter(|value| !value.is_null())
        .ok_or_else(|| unsupported(path, "pagination"))?;

    if is_unset(pagination.get("next_uri")) {
        return Ok(Step::Last);
    }

    match pagination.get("next_starting_after") {
        Some(next) if !is_empty_payload(next) => {
            Ok(Step::Continue(params.with("starting_after", next.clone())))
        }
        _ => {
            warn!(path, "next_uri present without next_starting_after, stopping");
            Ok(Step::Last)
        }
    }
}

fn cursor_step(path: &str, payload: &Value, params: &PageParams) -> Result<Step> {
    let has_next = payload
        .get("has_next")
        .ok_or_else(|| unsupported(path, "has_next"))?;

    // The terminal page is not kept
    if is_empty_payload(has_next) {
        return Ok(Step::Done);
    }

    let cursor = payload
        .get("cursor")
        .ok_or_else(|| unsupported(path, "cursor"))?;

    if params.get("cursor") == Some(cursor) {
        warn!(path, cursor = %cursor, "cursor did not advance, stopping");
        return Ok(Step::Done);
    }

    Ok(Step::Continue(params.with("cursor", cursor.clone())))
}

fn is_unset(value: Option<&Value>) -> bool {
    value.is_none_or(is_empty_payload)
}

fn unsupported(path: &str, field: &'static str) -> CoinbaseError {
    CoinbaseError::PaginationUnsupported {
        path: path.to_string(),
        field,
    }
}

/// Concatenate the `key` item arrays of every page, in page order
pub fn collect_items(pages: &[ApiResponse], key: &str) -> Result<Vec<Value>> {
    let mut items = Vec::new();
    for page in pages {
        let mut payload = page.payload()?;
        match payload.get_mut(key).map(Value::take) {
            Some(Value::Array(page_items)) => items.extend(page_items),
            _ => {
                return Err(CoinbaseError::InvalidResponse(format!(
                    "page from {} has no '{key}' array",
                    page.url()
                )));
            }
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_limits() {
        assert_eq!(PaginationProtocol::OffsetStyle.default_limit(), 25);
        assert_eq!(PaginationProtocol::CursorStyle.default_limit(), 50);
    }

    #[test]
    fn test_page_params_with_does_not_mutate() {
        let base = PageParams::with_limit(25);
        let next = base.with("starting_after", "abc");

        assert_eq!(base.to_value(), json!({"limit": 25}));
        assert_eq!(next.to_value(), json!({"limit": 25, "starting_after": "abc"}));
    }

    #[test]
    fn test_offset_step_terminal_on_null_next_uri() {
        let payload = json!({
            "data": [{"id": "a"}],
            "pagination": {"limit": 25, "next_uri": null, "next_starting_after": null}
        });
        let step = offset_step("/v2/accounts", &payload, &PageParams::with_limit(25)).unwrap();
        assert_eq!(step, Step::Last);
    }

    #[test]
    fn test_offset_step_advances() {
        let payload = json!({
            "data": [{"id": "a"}],
            "pagination": {
                "limit": 25,
                "next_uri": "/v2/accounts?starting_after=a",
                "next_starting_after": "a"
            }
        });
        let step = offset_step("/v2/accounts", &payload, &PageParams::with_limit(25)).unwrap();
        assert_eq!(
            step,
            Step::Continue(PageParams::with_limit(25).with("starting_after", "a"))
        );
    }

    #[test]
    fn test_offset_step_missing_envelope() {
        let payload = json!({"data": [{"id": "a"}]});
        let err = offset_step("/v2/accounts", &payload, &PageParams::new()).unwrap_err();
        assert!(matches!(
            err,
            CoinbaseError::PaginationUnsupported { field: "pagination", .. }
        ));
    }

    #[test]
    fn test_offset_step_without_starting_after_stops() {
        let payload = json!({
            "pagination": {"next_uri": "/v2/accounts?page=2", "next_starting_after": null}
        });
        let step = offset_step("/v2/accounts", &payload, &PageParams::new()).unwrap();
        assert_eq!(step, Step::Last);
    }

    #[test]
    fn test_cursor_step_has_next_false_drops_page() {
        let payload = json!({"has_next": false, "cursor": "", "accounts": [{"uuid": "x"}]});
        let step = cursor_step("/api/v3/brokerage/accounts", &payload, &PageParams::new()).unwrap();
        assert_eq!(step, Step::Done);
    }

    #[test]
    fn test_cursor_step_advances() {
        let payload = json!({"has_next": true, "cursor": "c1", "accounts": []});
        let params = PageParams::with_limit(50);
        let step = cursor_step("/api/v3/brokerage/accounts", &payload, &params).unwrap();
        assert_eq!(step, Step::Continue(params.with("cursor", "c1")));
    }

    #[test]
    fn test_cursor_step_stall_guard() {
        let payload = json!({"has_next": true, "cursor": "c1", "accounts": []});
        let params = PageParams::with_limit(50).with("cursor", "c1");
        let step = cursor_step("/api/v3/brokerage/accounts", &payload, &params).unwrap();
        assert_eq!(step, Step::Done);
    }

    #[test]
    fn test_cursor_step_missing_envelope() {
        let payload = json!({"accounts": []});
        let err = cursor_step("/api/v3/brokerage/accounts", &payload, &PageParams::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CoinbaseError::PaginationUnsupported { field: "has_next", .. }
        ));
    }

    #[test]
    fn test_cursor_step_missing_cursor() {
        let payload = json!({"has_next": true, "accounts": []});
        let err = cursor_step("/api/v3/brokerage/accounts", &payload, &PageParams::new())
            .unwrap_err();
        assert!(err.is_protocol_error());
    }

    #[test]
    fn test_collect_items() {
        let pages = vec![
            ApiResponse::new(StatusCode::OK, "u1", r#"{"data":[{"id":"a"},{"id":"b"}]}"#),
            ApiResponse::new(StatusCode::OK, "u2", r#"{"data":[{"id":"c"}]}"#),
        ];
        let items = collect_items(&pages, "data").unwrap();
        assert_eq!(items, vec![json!({"id": "a"}), json!({"id": "b"}), json!({"id": "c"})]);
    }

    #[test]
    fn test_collect_items_missing_key() {
        let pages = vec![ApiResponse::new(StatusCode::OK, "u1", r#"{"accounts":[]}"#)];
        let err = collect_items(&pages, "data").unwrap_err();
        assert!(matches!(err, CoinbaseError::InvalidResponse(_)));
    }
}
