//! Build script for the embedded native library feature.
//!
//! When `embedded-native` is enabled, resolves `CIRCE_EMBEDDED_NATIVE_LIB` to an
//! absolute path and hands it to the crate as `CIRCE_EMBEDDED_NATIVE_LIB_PATH`
//! for `include_bytes!`. Uses only Cargo-provided env vars otherwise.
use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=CIRCE_EMBEDDED_NATIVE_LIB");

    if env::var_os("CARGO_FEATURE_EMBEDDED_NATIVE").is_none() {
        return;
    }

    let Some(raw) = env::var_os("CIRCE_EMBEDDED_NATIVE_LIB") else {
        panic!(
            "feature `embedded-native` requires CIRCE_EMBEDDED_NATIVE_LIB to point at the \
             native circe shared object (e.g. circe-be/native-libs/libcirce-native-lib.so)"
        );
    };

    let mut path = PathBuf::from(raw);
    if path.is_relative() {
        let manifest_dir =
            PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
        path = manifest_dir.join(path);
    }
    if !path.is_file() {
        panic!(
            "CIRCE_EMBEDDED_NATIVE_LIB does not name a file: {}\n\
             Fix: build the native library first ('make circe-native') or disable the \
             `embedded-native` feature.",
            path.display()
        );
    }

    println!("cargo:rerun-if-changed={}", path.display());
    println!(
        "cargo:rustc-env=CIRCE_EMBEDDED_NATIVE_LIB_PATH={}",
        path.display()
    );
}
