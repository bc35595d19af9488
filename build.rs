use std::env;
use std::process::Command;

fn main() {
    // Only look up the git hash for release builds or when explicitly requested.
    let profile = env::var("PROFILE").unwrap_or_default();
    let force_hash = env::var("BUILD_VERSION_WITH_HASH").is_ok();

    let mut git_commit = String::from("dev");

    if profile == "release" || force_hash {
        let git_output = Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output();

        match git_output {
            Ok(output) if output.status.success() => {
                let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !hash.is_empty() {
                    git_commit = hash;
                }
            }
            Ok(output) => {
                eprintln!(
                    "cargo:warning=Failed to get git hash: {}",
                    String::from_utf8_lossy(&output.stderr)
                );
            }
            Err(_) => {
                eprintln!("cargo:warning=Failed to execute git command. Is git installed and in PATH?");
            }
        }
    }

    // `rustc -V` of the toolchain compiling this crate
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("-V")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=MCLI_GIT_COMMIT={}", git_commit);
    println!("cargo:rustc-env=MCLI_RUSTC_VERSION={}", rustc_version);

    // Re-run build script if git HEAD changes (important for hash updates)
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/packed-refs");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
