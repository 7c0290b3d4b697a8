//! Introspection functions.
//!
//! - `circe_native_library()` - which native library is active
//! - `circe_version()` - the extension version

use std::error::Error;

use duckdb::core::{DataChunkHandle, LogicalTypeId};
use duckdb::vscalar::{ScalarFunctionSignature, VScalar};
use duckdb::vtab::arrow::WritableVector;

use crate::logging::structured::LogContext;
use crate::runtime::ensure_loaded;

use super::rows::{map_rows, write_varchar};

pub struct CirceNativeLibrary;

impl CirceNativeLibrary {
    pub const NAME: &'static str = "circe_native_library";
}

impl VScalar for CirceNativeLibrary {
    type State = ();

    unsafe fn invoke(
        _: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let source = ensure_loaded()?.source().to_string();
        let rows = map_rows(LogContext::new(Self::NAME), &[], input.len(), |_| {
            Ok(source.clone())
        })?;
        write_varchar(output, &rows);
        Ok(())
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        vec![ScalarFunctionSignature::exact(
            vec![],
            LogicalTypeId::Varchar.into(),
        )]
    }
}

/// `circe_version()` - the extension version, independent of the native
/// library.
pub struct CirceVersion;

impl CirceVersion {
    pub const NAME: &'static str = "circe_version";
}

pub fn version_text() -> &'static str {
    crate::EXTENSION_VERSION
}

impl VScalar for CirceVersion {
    type State = ();

    unsafe fn invoke(
        _: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let rows = map_rows(LogContext::new(Self::NAME), &[], input.len(), |_| {
            Ok(version_text().to_string())
        })?;
        write_varchar(output, &rows);
        Ok(())
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        vec![ScalarFunctionSignature::exact(
            vec![],
            LogicalTypeId::Varchar.into(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_crate_version() {
        assert_eq!(version_text(), env!("CARGO_PKG_VERSION"));
        assert!(!version_text().is_empty());
    }
}
