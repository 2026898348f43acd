/*
[INPUT]:  API secret, timestamp, HTTP method, request path and body bytes
[OUTPUT]: Lowercase hex HMAC-SHA256 signatures
[POS]:    Auth layer - cryptographic signing for request authentication
[UPDATE]: When changing signing algorithm or prehash format
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a request.
///
/// Prehash is `timestamp || UPPERCASE(method) || path || body`. The body is taken as UTF-8
/// (lossy) and an absent body contributes nothing. Headers and query strings are never signed.
pub fn sign(secret: &str, timestamp: i64, method: &str, path: &str, body: Option<&[u8]>) -> String {
    let body = body.map(String::from_utf8_lossy).unwrap_or_default();
    let message = format!("{timestamp}{}{path}{body}", method.to_ascii_uppercase());
    hmac_sha256_hex(secret.as_bytes(), message.as_bytes())
}

fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
