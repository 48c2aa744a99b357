//! Build script for pulse-pico2
//!
//! Puts `memory.x` on the linker search path and selects the linker scripts.

use std::path::PathBuf;
use std::{env, fs};

fn main() {
    // Host builds (clippy, docs) have nothing to link
    if env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default() != "arm" {
        return;
    }

    let Ok(out_dir) = env::var("OUT_DIR") else {
        println!("cargo:warning=OUT_DIR not set, memory.x not copied");
        return;
    };
    let out_path = PathBuf::from(out_dir);

    if let Err(e) = fs::write(out_path.join("memory.x"), include_bytes!("memory.x")) {
        println!("cargo:warning=Failed to copy memory.x: {}", e);
        return;
    }
    println!("cargo:rustc-link-search={}", out_path.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
}
