use colored::*;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let parsed = match mongocli::cli::parse(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        // Prints help, usage errors and exits with clap's status code
        Err(e) => e.exit(),
    };

    let default_level = if parsed.debug() {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var("MCLI_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = mongocli::cli::run(parsed).await {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}
