//! Embedded native library extraction.
//!
//! With the `embedded-native` feature the shared object is compiled into the
//! extension. `dlopen` needs a file, so the blob is written to a private temp
//! file, opened, and the file is unlinked straight away; the mapping stays
//! valid after the unlink.

use std::io::{self, Write};
use std::path::Path;

use libloading::Library;

use super::search::open_local;

#[cfg(feature = "embedded-native")]
static NATIVE_BLOB: &[u8] = include_bytes!(env!("CIRCE_EMBEDDED_NATIVE_LIB_PATH"));

/// The compiled-in library, if there is a non-empty one.
pub fn blob() -> Option<&'static [u8]> {
    #[cfg(feature = "embedded-native")]
    {
        if !NATIVE_BLOB.is_empty() {
            return Some(NATIVE_BLOB);
        }
    }
    None
}

/// Load the embedded library, logging why when it can't be.
pub fn load() -> Option<Library> {
    let blob = blob()?;
    match load_blob_in(&std::env::temp_dir(), blob) {
        Ok(library) => Some(library),
        Err(e) => {
            log::warn!("EMBEDDED_LIBRARY_LOAD_FAILED bytes={} error={}", blob.len(), e);
            None
        }
    }
}

/// Write `blob` to `circe-native-XXXXXX.so` under `dir` and open it.
///
/// The temp file is removed before returning, on success and failure.
pub fn load_blob_in(dir: &Path, blob: &[u8]) -> io::Result<Library> {
    let mut file = tempfile::Builder::new()
        .prefix("circe-native-")
        .suffix(".so")
        .rand_bytes(6)
        .tempfile_in(dir)?;

    file.write_all(blob)?;
    file.as_file().sync_all()?;

    let opened = open_local(file.path());
    file.close()?;

    opened.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[cfg(not(feature = "embedded-native"))]
    #[test]
    fn test_no_blob_without_feature() {
        assert!(blob().is_none());
        assert!(load().is_none());
    }

    #[test]
    fn test_garbage_blob_fails_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_blob_in(dir.path(), b"definitely not a shared object").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(dir_is_empty(dir.path()));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_real_library_loads_and_cleans_up() {
        // libanl is tiny and has no constructors worth worrying about.
        let source = [
            "/lib/x86_64-linux-gnu/libanl.so.1",
            "/usr/lib/x86_64-linux-gnu/libanl.so.1",
            "/lib/aarch64-linux-gnu/libanl.so.1",
            "/usr/lib64/libanl.so.1",
            "/lib64/libanl.so.1",
        ]
        .iter()
        .map(Path::new)
        .find(|p| p.is_file());
        let Some(source) = source else {
            return;
        };
        let bytes = std::fs::read(source).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let library = load_blob_in(dir.path(), &bytes).unwrap();
        assert!(dir_is_empty(dir.path()));
        drop(library);
    }
}
