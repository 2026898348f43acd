/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Coinbase adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;

// Re-export commonly used types from auth
pub use auth::{Credentials, sign};

// Re-export commonly used types from http
pub use http::{
    ApiGeneration,
    ApiResponse,
    ClientConfig,
    CoinbaseClient,
    CoinbaseError,
    GetEncoding,
    PageParams,
    PaginationProtocol,
    Paginator,
    RateLimit,
    RequestSigner,
    Result,
    SignedRequest,
    collect_items,
};
