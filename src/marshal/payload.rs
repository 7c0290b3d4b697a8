//! base64 payload decoding.
//!
//! Cohort expressions arrive base64-encoded so arbitrary JSON survives SQL
//! quoting. Decoding follows DuckDB's `from_base64`: standard alphabet,
//! padding required.

use base64::{engine::general_purpose, Engine as _};

use crate::error::{CirceError, Result};

/// Decode a base64 payload, rejecting an empty result.
pub fn decode_payload(function: &'static str, encoded: &str) -> Result<Vec<u8>> {
    let decoded = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|source| CirceError::Base64Decode { function, source })?;

    if decoded.is_empty() {
        return Err(CirceError::EmptyPayload { function });
    }
    Ok(decoded)
}
