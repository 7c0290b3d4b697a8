//! Lazily initialized shared runtime.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loader::{load_library, NativeApi};

use super::native::NativeRuntime;

lazy_static! {
    static ref NATIVE_RUNTIME: Mutex<Option<Arc<NativeRuntime>>> = Mutex::new(None);
}

/// Get the shared runtime, loading the library and creating the isolate on
/// first use.
///
/// Concurrent first callers wait on the lock, so only one isolate is ever
/// created. A failed load leaves the slot empty and the next call retries.
pub fn ensure_loaded() -> Result<Arc<NativeRuntime>> {
    ensure_loaded_in(&NATIVE_RUNTIME, || start_runtime(&LoaderConfig::from_env()))
}

/// Fill `slot` with `start` unless it already holds a runtime.
///
/// The lock is held across `start`, so it runs at most once per empty slot.
fn ensure_loaded_in<F>(
    slot: &Mutex<Option<Arc<NativeRuntime>>>,
    start: F,
) -> Result<Arc<NativeRuntime>>
where
    F: FnOnce() -> Result<NativeRuntime>,
{
    let mut slot = slot.lock();
    if let Some(runtime) = slot.as_ref() {
        return Ok(Arc::clone(runtime));
    }

    let runtime = Arc::new(start()?);
    *slot = Some(Arc::clone(&runtime));
    Ok(runtime)
}

fn start_runtime(config: &LoaderConfig) -> Result<NativeRuntime> {
    let loaded = load_library(config)?;
    // SAFETY: the symbol signatures are the native library's published ABI,
    // and the library moves into the runtime together with the table.
    let api = unsafe { NativeApi::resolve(&loaded.library)? };
    NativeRuntime::start(api, Some(loaded.library), loaded.source)
}
