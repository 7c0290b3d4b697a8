//! Circe - DuckDB extension for the native Circe cohort-SQL library
//!
//! This crate registers SQL scalar functions that forward to a Graal-compiled
//! native library implementing cohort-to-SQL conversion and SQL dialect
//! translation. The crate itself only:
//!
//! 1. **Locates** the native library (embedded blob or filesystem search)
//! 2. **Bridges** its C ABI into DuckDB's scalar function convention
//! 3. **Marshals** strings and base64 payloads across that boundary
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `functions` - `VScalar` implementations and registration
//! - `runtime` - shared Graal isolate, created lazily and used serially
//! - `loader` - library search, embedded extraction, symbol resolution
//! - `marshal` - C string and base64 conversion
//! - `config` - environment-driven loader settings
//! - `logging` - structured logging with call context
//! - `error` - the crate error type

use std::error::Error;

use duckdb::Connection;
use duckdb_loadable_macros::duckdb_entrypoint_c_api;

pub mod config;
pub mod error;
pub mod functions;
pub mod loader;
pub mod logging;
pub mod marshal;
pub mod runtime;

pub const EXTENSION_NAME: &str = "circe";
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the extension-level logger
fn init_logger() {
    let env = env_logger::Env::new().filter_or(config::LOG_ENV, config::DEFAULT_LOG_FILTER);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// Extension entrypoint, called by DuckDB on `LOAD circe`.
///
/// Registers the functions only. The native library is loaded by the first
/// forwarding call, so a missing library never prevents `LOAD`.
///
/// # Safety
/// Called by DuckDB with a valid connection for the loading database.
#[duckdb_entrypoint_c_api(ext_name = "circe", min_duckdb_version = "v1.3.0")]
pub unsafe fn extension_entrypoint(con: Connection) -> Result<(), Box<dyn Error>> {
    init_logger();

    functions::register(&con)?;

    log::info!(
        "EXTENSION_LOADED name={} version={} functions={:?}",
        EXTENSION_NAME,
        EXTENSION_VERSION,
        functions::registered_names()
    );

    Ok(())
}
