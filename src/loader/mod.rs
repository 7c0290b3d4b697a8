//! Native library loading.
//!
//! Resolution order:
//! 1. Embedded blob (feature `embedded-native`, unless disabled at runtime)
//! 2. `CIRCE_NATIVE_LIB` paths
//! 3. Built-in candidate paths
//!
//! The first library that opens wins. Symbols are resolved separately by
//! [`symbols::NativeApi::resolve`].

pub mod embedded;
pub mod search;
pub mod symbols;

use std::fmt;
use std::path::PathBuf;

use libloading::Library;

use crate::config::LoaderConfig;
use crate::error::{CirceError, Result};

pub use symbols::NativeApi;

/// Where the active native library came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    Embedded,
    Path(PathBuf),
}

impl fmt::Display for LibrarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibrarySource::Embedded => write!(f, "embedded"),
            LibrarySource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// An opened native library and its origin.
#[derive(Debug)]
pub struct LoadedLibrary {
    pub library: Library,
    pub source: LibrarySource,
}

/// Locate and open the native circe library.
pub fn load_library(config: &LoaderConfig) -> Result<LoadedLibrary> {
    let embedded_available = config.use_embedded && embedded::blob().is_some();

    if embedded_available {
        if let Some(library) = embedded::load() {
            log::info!("NATIVE_LIBRARY_LOADED source=embedded");
            return Ok(LoadedLibrary {
                library,
                source: LibrarySource::Embedded,
            });
        }
        log::warn!("EMBEDDED_LIBRARY_FALLBACK reason=load_failed");
    }

    let candidates = config.candidates();
    match search::open_first(&candidates) {
        Ok((library, path)) => {
            log::info!("NATIVE_LIBRARY_LOADED path={}", path.display());
            Ok(LoadedLibrary {
                library,
                source: LibrarySource::Path(path),
            })
        }
        Err(tried) => {
            log::error!("NATIVE_LIBRARY_NOT_FOUND tried={:?}", tried);
            if embedded_available {
                Err(CirceError::EmbeddedLibraryUnavailable { tried })
            } else {
                Err(CirceError::LibraryNotFound { tried })
            }
        }
    }
}
