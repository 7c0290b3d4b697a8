//! C string conversion for native calls.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::error::{CirceError, Result};

/// Convert an argument into a NUL-terminated C string.
///
/// Rejects embedded NUL bytes: the native side would stop reading there and
/// silently act on a truncated argument.
pub fn to_c_string(function: &'static str, value: impl Into<Vec<u8>>) -> Result<CString> {
    CString::new(value).map_err(|e| CirceError::InteriorNul {
        function,
        offset: e.nul_position(),
    })
}

/// Copy a string returned by the native library.
///
/// A null pointer is the native library's only failure signal. The memory
/// belongs to the native isolate and is not freed here.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn from_native(function: &'static str, ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(CirceError::NullResult { function });
    }
    Ok(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}
