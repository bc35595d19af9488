use crate::cli::error::CliError;
use crate::cli::{flags, project_id_arg, string, value, Context};
use crate::validate;
use clap::{Arg, ArgMatches, Command};
use std::net::IpAddr;

pub const USE: &str = "whitelist";

const CREATE: &str = "create";
const LIST: &str = "list";

const IP_ADDRESS: &str = "ipAddress";
const CIDR_BLOCK: &str = "cidrBlock";
const ENTRY_TYPES: [&str; 2] = [IP_ADDRESS, CIDR_BLOCK];

pub fn builder() -> Command {
    Command::new(USE)
        .about("Manage the IP whitelist for your project")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CREATE)
                .about("Add an entry to the project IP whitelist")
                .arg(
                    Arg::new(flags::ENTRY)
                        .required(true)
                        .help("IP address or CIDR block to allow."),
                )
                .arg(
                    Arg::new(flags::TYPE)
                        .long(flags::TYPE)
                        .default_value(IP_ADDRESS)
                        .help(format!("Type of entry: {}.", ENTRY_TYPES.join(", "))),
                )
                .arg(
                    Arg::new(flags::COMMENT)
                        .long(flags::COMMENT)
                        .help("Optional description of the entry."),
                )
                .arg(project_id_arg()),
        )
        .subcommand(
            Command::new(LIST)
                .alias("ls")
                .about("List the IP whitelist entries for your project")
                .arg(project_id_arg()),
        )
}

pub async fn run(matches: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((CREATE, m)) => create(m, ctx).await,
        Some((LIST, m)) => list(m, ctx).await,
        _ => Err(CliError::OperationFailed(
            "missing whitelist subcommand".to_string(),
        )),
    }
}

fn validate_entry(entry: &str, entry_type: &str) -> Result<(), CliError> {
    let valid = match entry_type {
        CIDR_BLOCK => entry.split_once('/').is_some_and(|(ip, bits)| {
            let max = match ip.parse::<IpAddr>() {
                Ok(IpAddr::V4(_)) => 32,
                Ok(IpAddr::V6(_)) => 128,
                Err(_) => return false,
            };
            bits.parse::<u8>().is_ok_and(|b| b <= max)
        }),
        _ => entry.parse::<IpAddr>().is_ok(),
    };

    if valid {
        Ok(())
    } else {
        Err(CliError::OperationFailed(format!(
            "'{}' is not a valid {}",
            entry, entry_type
        )))
    }
}

async fn create(m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    let entry_type = string(m, flags::TYPE).unwrap_or(IP_ADDRESS);
    validate::flag_in_slice(entry_type, flags::TYPE, &ENTRY_TYPES)?;
    let entry = string(m, flags::ENTRY).unwrap_or_default();
    validate_entry(entry, entry_type)?;
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    validate::credentials(&ctx.config)?;

    let request = ctx
        .request("atlas whitelist create")
        .param(flags::PROJECT_ID, ctx.project_id(m)?)
        .param(entry_type, entry)
        .param_opt(flags::COMMENT, string(m, flags::COMMENT));
    ctx.backend.execute(request).await
}

async fn list(m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    validate::credentials(&ctx.config)?;

    let request = ctx
        .request("atlas whitelist list")
        .param(flags::PROJECT_ID, ctx.project_id(m)?);
    ctx.backend.execute(request).await
}
