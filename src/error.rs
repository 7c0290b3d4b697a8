//! Error types for the circe extension.
//!
//! Every message starts with the SQL function that failed (or
//! `circe functions:` for loader failures shared by all of them), since the
//! text is what DuckDB shows to the user.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CirceError>;

#[derive(Debug, Error)]
pub enum CirceError {
    #[error(
        "circe functions: native circe library not found (tried {}); build it first with 'make circe-native'",
        .tried.join(", ")
    )]
    LibraryNotFound { tried: Vec<String> },

    #[error(
        "circe functions: failed to load embedded native circe library and no external library found (tried {}); rebuild or disable embedding",
        .tried.join(", ")
    )]
    EmbeddedLibraryUnavailable { tried: Vec<String> },

    #[error("{function}: symbol {symbol} not found in native circe library")]
    MissingSymbol {
        function: &'static str,
        symbol: &'static str,
    },

    #[error("circe functions: failed to create Graal isolate (rc={rc})")]
    IsolateCreation { rc: i32 },

    #[error("{function}: base64 decode failed: {source}")]
    Base64Decode {
        function: &'static str,
        source: base64::DecodeError,
    },

    #[error("{function}: decoded JSON empty")]
    EmptyPayload { function: &'static str },

    #[error("{function}: argument contains a NUL byte at offset {offset}")]
    InteriorNul { function: &'static str, offset: usize },

    #[error("{function}: native function returned null")]
    NullResult { function: &'static str },
}
