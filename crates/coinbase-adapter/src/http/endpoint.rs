/*
[INPUT]:  Raw endpoint paths ("/accounts", "products/BTC-USD")
[OUTPUT]: Versioned request paths and per-generation transport defaults
[POS]:    HTTP layer - API generation selection and path normalization
[UPDATE]: When adding an API generation or changing path prefixes
*/

use serde::{Deserialize, Serialize};

use super::client::GetEncoding;
use super::pagination::PaginationProtocol;

const V2_PREFIX: &str = "/v2";
const V3_PREFIX: &str = "/api/v3";
const V3_BROKERAGE_PREFIX: &str = "/api/v3/brokerage";

/// Coinbase API generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiGeneration {
    /// Sign In With Coinbase API (`/v2/...`), offset pagination
    V2,
    /// Advanced Trade brokerage API (`/api/v3/brokerage/...`), cursor pagination
    V3,
}

impl ApiGeneration {
    /// Normalize a raw path into this generation's versioned path.
    ///
    /// Paths already carrying the version prefix are returned unchanged, which makes
    /// the operation idempotent.
    pub fn resolve_path(self, raw_path: &str) -> String {
        let (version_prefix, join_prefix) = match self {
            ApiGeneration::V2 => (V2_PREFIX, V2_PREFIX),
            ApiGeneration::V3 => (V3_PREFIX, V3_BROKERAGE_PREFIX),
        };
        if raw_path.starts_with(version_prefix) {
            return raw_path.to_string();
        }
        format!("{join_prefix}/{}", raw_path.trim_start_matches('/'))
    }

    /// GET parameter encoding used unless overridden in the client config
    pub fn default_get_encoding(self) -> GetEncoding {
        match self {
            ApiGeneration::V2 => GetEncoding::Query,
            ApiGeneration::V3 => GetEncoding::JsonBody,
        }
    }

    /// Pagination protocol used unless overridden in the client config
    pub fn default_pagination(self) -> PaginationProtocol {
        match self {
            ApiGeneration::V2 => PaginationProtocol::OffsetStyle,
            ApiGeneration::V3 => PaginationProtocol::CursorStyle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiGeneration::V2, "/time", "/v2/time")]
    #[case(ApiGeneration::V2, "accounts", "/v2/accounts")]
    #[case(ApiGeneration::V2, "//accounts", "/v2/accounts")]
    #[case(ApiGeneration::V2, "/v2/accounts", "/v2/accounts")]
    #[case(ApiGeneration::V3, "/products/BTC-USD", "/api/v3/brokerage/products/BTC-USD")]
    #[case(ApiGeneration::V3, "accounts", "/api/v3/brokerage/accounts")]
    #[case(ApiGeneration::V3, "/api/v3/brokerage/accounts", "/api/v3/brokerage/accounts")]
    fn test_resolve_path(
        #[case] generation: ApiGeneration,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(generation.resolve_path(raw), expected);
    }

    #[rstest]
    #[case("/time")]
    #[case("accounts/abc/transactions")]
    #[case("")]
    #[case("/")]
    #[case("v2x")]
    #[case("/api/v3/brokerage/orders/historical/batch")]
    #[case("products?product_type=SPOT")]
    fn test_resolve_path_idempotent(
        #[case] raw: &str,
        #[values(ApiGeneration::V2, ApiGeneration::V3)] generation: ApiGeneration,
    ) {
        let once = generation.resolve_path(raw);
        assert_eq!(generation.resolve_path(&once), once);
    }

    #[test]
    fn test_generation_defaults() {
        assert_eq!(ApiGeneration::V2.default_get_encoding(), GetEncoding::Query);
        assert_eq!(ApiGeneration::V3.default_get_encoding(), GetEncoding::JsonBody);
        assert_eq!(
            ApiGeneration::V2.default_pagination(),
            PaginationProtocol::OffsetStyle
        );
        assert_eq!(
            ApiGeneration::V3.default_pagination(),
            PaginationProtocol::CursorStyle
        );
    }
}
