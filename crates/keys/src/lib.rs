#![forbid(unsafe_code)]

//! # Chronicle Keys
//!
//! Re-encodes a modern compressed public key (`PUB_K1_…`) into the legacy
//! checksummed text format (`ALA…`) still expected by pre-upgrade consumers.
//!
//! The two encodings share the 33 raw key bytes but disagree on the checksum
//! algorithm, so the legacy checksum is recomputed rather than carried over.
//! Input that does not carry the modern prefix is passed through verbatim;
//! the conversion is idempotent on its own output.

use chronicle_types::error::KeyError;
use ripemd::{Digest, Ripemd160};

/// Prefix tag of the modern compressed-key text encoding.
pub const MODERN_KEY_PREFIX: &str = "PUB_K1_";
/// Prefix tag of the legacy text encoding.
pub const LEGACY_KEY_PREFIX: &str = "ALA";

/// Decoded modern payload length: 33 key bytes plus a 4-byte checksum.
const DECODED_KEY_LEN: usize = 37;
/// Checksum length shared by both encodings.
const CHECKSUM_LEN: usize = 4;

/// Converts a modern encoded public key into its legacy form.
///
/// A key without the [`MODERN_KEY_PREFIX`] is returned unchanged: already
/// legacy or an unrecognized format, either way not this function's business.
/// A key *with* the prefix must decode cleanly; a malformed payload in
/// historical data is a data-integrity fault that the caller is expected to
/// surface, not mask.
pub fn convert_to_legacy_key(key: &str) -> Result<String, KeyError> {
    let Some(payload) = key.strip_prefix(MODERN_KEY_PREFIX) else {
        return Ok(key.to_string());
    };

    let decoded = bs58::decode(payload)
        .into_vec()
        .map_err(|e| KeyError::Base58(e.to_string()))?;
    if decoded.len() != DECODED_KEY_LEN {
        return Err(KeyError::Length {
            expected: DECODED_KEY_LEN,
            got: decoded.len(),
        });
    }

    // The trailing 4 bytes are the modern checksum; the legacy checksum is
    // the first 4 bytes of RIPEMD-160 over the raw key bytes alone.
    let key_bytes = &decoded[..DECODED_KEY_LEN - CHECKSUM_LEN];
    let digest = Ripemd160::digest(key_bytes);

    let mut merged = Vec::with_capacity(DECODED_KEY_LEN);
    merged.extend_from_slice(key_bytes);
    merged.extend_from_slice(&digest[..CHECKSUM_LEN]);

    Ok(format!(
        "{}{}",
        LEGACY_KEY_PREFIX,
        bs58::encode(merged).into_string()
    ))
}
