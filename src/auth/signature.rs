//! HMAC-SHA512 command signatures.
//!
//! The tag a client sends is `base64url(hex(HMAC-SHA512(secret, canonical)))`.
//! Transport decoding happens in the gate; this module only ever sees the
//! hex text and compares it in constant time.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::config::SharedSecret;

type HmacSha512 = Hmac<Sha512>;

/// Lowercase hex of `HMAC-SHA512(secret, canonical)`.
pub fn hex_digest(canonical: &[u8], secret: &SharedSecret) -> String {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(canonical);
    hex::encode(mac.finalize().into_bytes())
}

/// Check `signature` (hex text, already transport-decoded) against the
/// digest of `canonical`.
///
/// The comparison touches every byte regardless of where the first mismatch
/// is. A length mismatch returns `false` straight away; the expected length
/// (128) is public.
pub fn verify(canonical: &[u8], signature: &[u8], secret: &SharedSecret) -> bool {
    let expected = hex_digest(canonical, secret);
    expected.as_bytes().ct_eq(signature).into()
}

/// Produce the `signature` header value for `canonical`. Used by clients
/// and tests; the server only verifies.
pub fn sign(canonical: &[u8], secret: &SharedSecret) -> String {
    URL_SAFE.encode(hex_digest(canonical, secret))
}
