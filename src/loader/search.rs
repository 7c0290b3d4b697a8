//! Filesystem search for the native library.

use std::path::{Path, PathBuf};

use libloading::Library;

/// Open the first candidate that loads.
///
/// Returns every attempted path (in order) when none of them load.
pub fn open_first(candidates: &[PathBuf]) -> Result<(Library, PathBuf), Vec<String>> {
    let mut tried = Vec::with_capacity(candidates.len());

    for path in candidates {
        match open_local(path) {
            Ok(library) => return Ok((library, path.clone())),
            Err(e) => {
                log::debug!("NATIVE_LIBRARY_CANDIDATE path={} error={}", path.display(), e);
                tried.push(path.display().to_string());
            }
        }
    }

    Err(tried)
}

/// Open a shared object lazily and without exporting its symbols globally.
#[cfg(unix)]
pub fn open_local(path: &Path) -> Result<Library, libloading::Error> {
    use libloading::os::unix::{Library as UnixLibrary, RTLD_LAZY, RTLD_LOCAL};

    // SAFETY: the circe native library has no load-time initializers that
    // depend on the caller; running them is the same as dlopen in C.
    unsafe { UnixLibrary::open(Some(path), RTLD_LAZY | RTLD_LOCAL) }.map(Library::from)
}

#[cfg(not(unix))]
pub fn open_local(path: &Path) -> Result<Library, libloading::Error> {
    // SAFETY: see the unix variant.
    unsafe { Library::new(path) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_missing_reports_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![dir.path().join("first.so"), dir.path().join("second.so")];

        let tried = open_first(&candidates).unwrap_err();
        assert_eq!(
            tried,
            vec![
                candidates[0].display().to_string(),
                candidates[1].display().to_string()
            ]
        );
    }

    #[test]
    fn test_not_a_library_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("libcirce-native.so");
        std::fs::write(&bogus, b"not an elf").unwrap();

        let tried = open_first(&[bogus.clone()]).unwrap_err();
        assert_eq!(tried, vec![bogus.display().to_string()]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_first_loadable_wins() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![dir.path().join("missing.so"), PathBuf::from("libc.so.6")];

        let (_library, path) = open_first(&candidates).unwrap();
        assert_eq!(path, PathBuf::from("libc.so.6"));
    }
}
