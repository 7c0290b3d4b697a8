//! Native entry points and their resolution.
//!
//! The library is a Graal native image. Every entry point takes the isolate
//! thread handle first and returns a `char*` it owns, or null on failure.

use std::os::raw::{c_char, c_int, c_void};

use libloading::Library;

use crate::error::{CirceError, Result};

/// Opaque `graal_isolate_t`.
#[repr(C)]
pub struct GraalIsolate {
    _private: [u8; 0],
}

/// Opaque `graal_isolatethread_t`.
#[repr(C)]
pub struct GraalIsolateThread {
    _private: [u8; 0],
}

pub type BuildCohortSqlFn =
    unsafe extern "C" fn(*mut GraalIsolateThread, *mut c_char, *mut c_char) -> *mut c_char;
pub type SqlRenderFn =
    unsafe extern "C" fn(*mut GraalIsolateThread, *mut c_char, *mut c_char) -> *mut c_char;
pub type SqlTranslateFn =
    unsafe extern "C" fn(*mut GraalIsolateThread, *mut c_char, *mut c_char) -> *mut c_char;
pub type SqlRenderTranslateFn = unsafe extern "C" fn(
    *mut GraalIsolateThread,
    *mut c_char,
    *mut c_char,
    *mut c_char,
) -> *mut c_char;
pub type CreateIsolateFn = unsafe extern "C" fn(
    *mut c_void,
    *mut *mut GraalIsolate,
    *mut *mut GraalIsolateThread,
) -> c_int;

/// Required symbols in resolution order, with the function blamed when one
/// is missing.
pub const REQUIRED_SYMBOLS: [(&str, &str); 5] = [
    ("circe_build_cohort_sql", "circe_json_to_sql"),
    ("circe_sql_render", "circe_sql_render"),
    ("circe_sql_translate", "circe_sql_translate"),
    ("circe_sql_render_translate", "circe_sql_render_translate"),
    ("graal_create_isolate", "circe functions"),
];

/// Function table for the native library.
///
/// Pointers are only valid while the library they came from stays loaded.
#[derive(Debug, Clone, Copy)]
pub struct NativeApi {
    pub build_cohort_sql: BuildCohortSqlFn,
    pub sql_render: SqlRenderFn,
    pub sql_translate: SqlTranslateFn,
    pub sql_render_translate: SqlRenderTranslateFn,
    pub create_isolate: CreateIsolateFn,
}

impl NativeApi {
    /// Resolve all five entry points; any missing one fails the whole load.
    ///
    /// # Safety
    /// The symbols must have the signatures declared above, and `library`
    /// must outlive every use of the returned table.
    pub unsafe fn resolve(library: &Library) -> Result<Self> {
        let [build, render, translate, render_translate, create] = REQUIRED_SYMBOLS;
        Ok(Self {
            build_cohort_sql: lookup(library, build)?,
            sql_render: lookup(library, render)?,
            sql_translate: lookup(library, translate)?,
            sql_render_translate: lookup(library, render_translate)?,
            create_isolate: lookup(library, create)?,
        })
    }
}

unsafe fn lookup<T: Copy>(
    library: &Library,
    (symbol, function): (&'static str, &'static str),
) -> Result<T> {
    match library.get::<T>(symbol.as_bytes()) {
        Ok(sym) => {
            log::debug!("NATIVE_SYMBOL_RESOLVED symbol={}", symbol);
            Ok(*sym)
        }
        Err(e) => {
            log::error!("NATIVE_SYMBOL_MISSING symbol={} error={}", symbol, e);
            Err(CirceError::MissingSymbol { function, symbol })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_symbols_order() {
        let symbols: Vec<&str> = REQUIRED_SYMBOLS.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            symbols,
            vec![
                "circe_build_cohort_sql",
                "circe_sql_render",
                "circe_sql_translate",
                "circe_sql_render_translate",
                "graal_create_isolate",
            ]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_foreign_library_missing_first_symbol() {
        let library = crate::loader::search::open_local(std::path::Path::new("libc.so.6")).unwrap();
        let err = unsafe { NativeApi::resolve(&library) }.unwrap_err();
        match err {
            CirceError::MissingSymbol { function, symbol } => {
                assert_eq!(function, "circe_json_to_sql");
                assert_eq!(symbol, "circe_build_cohort_sql");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
