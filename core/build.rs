// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=POST_LIB_DIR");

    if env::var("CARGO_FEATURE_LIBPOST").is_err() {
        return;
    }

    if let Ok(dir) = env::var("POST_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir);
    }
    println!("cargo:rustc-link-lib=dylib=post");
}
