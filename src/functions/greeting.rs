//! Functions that answer without the native library.

use std::error::Error;

use duckdb::core::{DataChunkHandle, LogicalTypeId};
use duckdb::vscalar::{ScalarFunctionSignature, VScalar};
use duckdb::vtab::arrow::WritableVector;

use crate::logging::structured::LogContext;

use super::rows::{map_rows, read_varchar, write_varchar};

/// `circe_hello(name)` -> `Circe <name>`.
pub struct CirceHello;

impl CirceHello {
    pub const NAME: &'static str = "circe_hello";
}

pub fn hello(name: &str) -> String {
    format!("Circe {}", name)
}

impl VScalar for CirceHello {
    type State = ();

    unsafe fn invoke(
        _: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let columns = [read_varchar(input, 0)];
        let rows = map_rows(LogContext::new(Self::NAME), &columns, input.len(), |args| {
            Ok(hello(args[0]))
        })?;
        write_varchar(output, &rows);
        Ok(())
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        vec![ScalarFunctionSignature::exact(
            vec![LogicalTypeId::Varchar.into()],
            LogicalTypeId::Varchar.into(),
        )]
    }
}

/// `circe_openssl_version(name)` -> greeting plus the linked OpenSSL version.
#[cfg(feature = "openssl")]
pub struct CirceOpenSslVersion;

#[cfg(feature = "openssl")]
impl CirceOpenSslVersion {
    pub const NAME: &'static str = "circe_openssl_version";
}

#[cfg(feature = "openssl")]
pub fn openssl_greeting(name: &str) -> String {
    format!(
        "Circe {}, my linked OpenSSL version is {}",
        name,
        openssl::version::version()
    )
}

#[cfg(feature = "openssl")]
impl VScalar for CirceOpenSslVersion {
    type State = ();

    unsafe fn invoke(
        _: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let columns = [read_varchar(input, 0)];
        let rows = map_rows(LogContext::new(Self::NAME), &columns, input.len(), |args| {
            Ok(openssl_greeting(args[0]))
        })?;
        write_varchar(output, &rows);
        Ok(())
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        vec![ScalarFunctionSignature::exact(
            vec![LogicalTypeId::Varchar.into()],
            LogicalTypeId::Varchar.into(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello() {
        assert_eq!(hello("Sam"), "Circe Sam");
        assert_eq!(hello(""), "Circe ");
    }

    #[cfg(feature = "openssl")]
    #[test]
    fn test_openssl_greeting() {
        let text = openssl_greeting("Sam");
        assert!(text.starts_with("Circe Sam, my linked OpenSSL version is "));
        assert!(text.contains("SSL"));
    }
}
