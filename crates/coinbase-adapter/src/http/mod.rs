/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: Signed HTTP exchanges, raw responses and paginated collections
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding transport features or changing client behavior
*/

pub mod client;
pub mod endpoint;
pub mod error;
pub mod pagination;
pub mod rate_limit;
pub mod response;
pub mod signature;

pub use error::{CoinbaseError, Result};
pub use signature::{RequestSigner, SignedRequest};

pub use client::{ClientConfig, CoinbaseClient, GetEncoding};
pub use endpoint::ApiGeneration;
pub use pagination::{PageParams, PaginationProtocol, Paginator, collect_items};
pub use rate_limit::RateLimit;
pub use response::ApiResponse;
