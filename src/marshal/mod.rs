//! String marshalling between DuckDB values and the native C ABI.
//!
//! - `cstring` - NUL-terminated arguments in, owned `String` results out
//! - `payload` - base64 decoding of cohort expression payloads

pub mod cstring;
pub mod payload;

pub use cstring::*;
pub use payload::*;
