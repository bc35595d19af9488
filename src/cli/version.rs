use crate::config::TOOL_NAME;
use std::env::consts::{ARCH, OS};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_COMMIT: &str = env!("MCLI_GIT_COMMIT");
pub const RUSTC_VERSION: &str = env!("MCLI_RUSTC_VERSION");
const COMPILER: &str = "rustc";

/// The block printed for `--version`.
pub fn formatted_version() -> String {
    format!(
        "{tool} version: {version}\n\
         git version: {commit}\n\
         Rust version: {rustc}\n   \
         os: {os}\n   \
         arch: {arch}\n   \
         compiler: {compiler}\n",
        tool = TOOL_NAME,
        version = VERSION,
        commit = GIT_COMMIT,
        rustc = RUSTC_VERSION,
        os = OS,
        arch = ARCH,
        compiler = COMPILER,
    )
}
