//! `atlas` command group.

mod catalog;
mod clusters;
mod dbusers;
mod shell;
mod whitelist;

use super::error::CliError;
use super::Context;
use catalog::Catalog;
use clap::{ArgMatches, Command};

pub const USE: &str = "atlas";

pub fn builder() -> Command {
    let catalog = Catalog::discover();

    Command::new(USE)
        .about("Atlas operations")
        .long_about("Manage your clusters, database users and network access in MongoDB Atlas.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(clusters::builder(&catalog))
        .subcommand(dbusers::builder())
        .subcommand(whitelist::builder())
        .subcommand(shell::builder())
}

pub async fn run(matches: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((clusters::USE, m)) => clusters::run(m, ctx).await,
        Some((dbusers::USE, m)) => dbusers::run(m, ctx).await,
        Some((whitelist::USE, m)) => whitelist::run(m, ctx).await,
        Some((shell::USE, m)) => shell::run(m),
        _ => Err(CliError::OperationFailed(
            "missing atlas subcommand".to_string(),
        )),
    }
}
