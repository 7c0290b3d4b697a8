//! Loader configuration.
//!
//! Everything is read from the process environment at the moment the native
//! library is first needed, so a session can set `CIRCE_NATIVE_LIB` before
//! its first `circe_*` call.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Extra library paths, searched before the defaults. Uses `PATH` syntax.
pub const NATIVE_LIB_ENV: &str = "CIRCE_NATIVE_LIB";

/// Skip the embedded library even when it was compiled in.
pub const DISABLE_EMBEDDED_ENV: &str = "CIRCE_DISABLE_EMBEDDED";

/// `env_logger` filter for the extension's log output.
pub const LOG_ENV: &str = "CIRCE_LOG";

/// Default log filter when `CIRCE_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Built-in search order. Relative entries resolve against the working
/// directory; bare file names go through the dynamic linker search path.
pub const DEFAULT_CANDIDATES: [&str; 6] = [
    "./circe-be/native-libs/libcirce-native-lib.so",
    "./circe-be/native-libs/linux-x86_64/libcirce-native-lib.so",
    "./circe-be/native-libs/libcirce-native.so",
    "./circe-be/native-libs/linux-x86_64/libcirce-native.so",
    "libcirce-native-lib.so",
    "libcirce-native.so",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub extra_candidates: Vec<PathBuf>,
    pub use_embedded: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extra_candidates: Vec::new(),
            use_embedded: true,
        }
    }
}

impl LoaderConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var_os(NATIVE_LIB_ENV),
            env::var_os(DISABLE_EMBEDDED_ENV),
        )
    }

    fn from_vars(native_lib: Option<OsString>, disable_embedded: Option<OsString>) -> Self {
        let extra_candidates = native_lib
            .map(|paths| {
                env::split_paths(&paths)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let use_embedded = !disable_embedded.as_deref().is_some_and(is_truthy);

        Self {
            extra_candidates,
            use_embedded,
        }
    }

    /// Full filesystem search order: overrides first, then the defaults.
    pub fn candidates(&self) -> Vec<PathBuf> {
        self.extra_candidates
            .iter()
            .cloned()
            .chain(DEFAULT_CANDIDATES.iter().map(PathBuf::from))
            .collect()
    }
}

fn is_truthy(value: &OsStr) -> bool {
    matches!(
        value.to_string_lossy().trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
