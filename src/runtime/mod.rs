//! Process-wide native runtime.
//!
//! The native library and its Graal isolate are created once, lazily, on the
//! first call that needs them, then shared for the life of the process.
//!
//! - `native` - the isolate handle and the marshalled entry points
//! - `global` - the lazily initialized shared instance

pub mod global;
pub mod native;

pub use global::*;
pub use native::*;
