use std::process::Command;

/// Captures build metadata and exposes it to the crate through `ODX_*` env vars.
///
/// - Git commit hash (short form), "unknown" outside a checkout
/// - Build timestamp (UTC, RFC3339)
/// - Rust compiler version
/// - Target triple the crate is compiled for
fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let build_time = chrono::Utc::now().to_rfc3339();

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|e| {
            eprintln!("Warning: Failed to get rustc version: {}", e);
            "unknown".to_string()
        });

    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=ODX_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=ODX_BUILD_TIME_UTC={}", build_time);
    println!("cargo:rustc-env=ODX_RUSTC_VERSION={}", rustc_version);
    println!("cargo:rustc-env=ODX_TARGET={}", target);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-changed=build.rs");
}
