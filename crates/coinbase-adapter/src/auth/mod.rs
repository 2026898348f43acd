/*
[INPUT]:  API key/secret and host configuration
[OUTPUT]: Credentials, resolved URLs and HMAC signatures
[POS]:    Auth layer - handles Coinbase API key authentication
[UPDATE]: When credential sources or signature methods change
*/

pub mod credentials;
pub mod signer;

pub use credentials::{Credentials, DEFAULT_FEED_HOST, DEFAULT_REST_HOST};
pub use signer::sign;
