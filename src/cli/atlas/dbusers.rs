use crate::cli::error::CliError;
use crate::cli::{flags, project_id_arg, string, value, Context};
use crate::validate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use dialoguer::Password;

pub const USE: &str = "dbusers";

const CREATE: &str = "create";
const LIST: &str = "list";
const DELETE: &str = "delete";

const BUILT_IN_ROLES: [&str; 5] = [
    "atlasAdmin",
    "readWriteAnyDatabase",
    "readAnyDatabase",
    "clusterMonitor",
    "backup",
];

fn username_arg() -> Arg {
    Arg::new(flags::USERNAME)
        .long(flags::USERNAME)
        .short(flags::USERNAME_SHORT)
        .required(true)
        .help("Username for authenticating to MongoDB.")
}

pub fn builder() -> Command {
    Command::new(USE)
        .alias("dbuser")
        .about("Manage database users for your project")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CREATE)
                .about("Create a database user for your project")
                .arg(username_arg())
                .arg(
                    Arg::new(flags::PASSWORD)
                        .long(flags::PASSWORD)
                        .short(flags::PASSWORD_SHORT)
                        .help(flags::usage::PASSWORD),
                )
                .arg(
                    Arg::new(flags::ROLE)
                        .long(flags::ROLE)
                        .action(ArgAction::Append)
                        .required(true)
                        .help(format!(
                            "User's roles, either a built-in role ({}) or roleName@dbName.",
                            BUILT_IN_ROLES.join(", ")
                        )),
                )
                .arg(project_id_arg()),
        )
        .subcommand(
            Command::new(LIST)
                .alias("ls")
                .about("List database users for your project")
                .arg(project_id_arg()),
        )
        .subcommand(
            Command::new(DELETE)
                .alias("rm")
                .about("Delete a database user for your project")
                .arg(
                    Arg::new(flags::USERNAME)
                        .required(true)
                        .help("Username to delete."),
                )
                .arg(project_id_arg()),
        )
}

pub async fn run(matches: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((CREATE, m)) => create(m, ctx).await,
        Some((LIST, m)) => list(m, ctx).await,
        Some((DELETE, m)) => delete(m, ctx).await,
        _ => Err(CliError::OperationFailed(
            "missing dbusers subcommand".to_string(),
        )),
    }
}

fn validate_role(role: &str) -> Result<(), CliError> {
    match role.split_once('@') {
        Some((name, db)) if !name.is_empty() && !db.is_empty() => Ok(()),
        Some(_) => Err(CliError::OperationFailed(format!(
            "invalid role \"{}\", expected roleName@dbName",
            role
        ))),
        None => Ok(validate::flag_in_slice(role, flags::ROLE, &BUILT_IN_ROLES)?),
    }
}

async fn create(m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    validate::db_username(&value(m, flags::USERNAME))?;
    let roles: Vec<&str> = m
        .get_many::<String>(flags::ROLE)
        .map(|roles| roles.map(String::as_str).collect())
        .unwrap_or_default();
    roles.iter().try_for_each(|role| validate_role(role))?;
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    validate::credentials(&ctx.config)?;
    let project_id = ctx.project_id(m)?;

    // Prompt last so nothing is asked for a command that would fail anyway
    let password = match string(m, flags::PASSWORD) {
        Some(p) => p.to_string(),
        None => Password::new().with_prompt("Password").interact()?,
    };

    let request = ctx
        .request("atlas dbusers create")
        .param(flags::PROJECT_ID, project_id)
        .param_opt(flags::USERNAME, string(m, flags::USERNAME))
        .param(flags::ROLE, roles.join(","))
        .secret(flags::PASSWORD, password);
    ctx.backend.execute(request).await
}

async fn list(m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    validate::credentials(&ctx.config)?;

    let request = ctx
        .request("atlas dbusers list")
        .param(flags::PROJECT_ID, ctx.project_id(m)?);
    ctx.backend.execute(request).await
}

async fn delete(m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    validate::db_username(&value(m, flags::USERNAME))?;
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    validate::credentials(&ctx.config)?;

    let request = ctx
        .request("atlas dbusers delete")
        .param(flags::PROJECT_ID, ctx.project_id(m)?)
        .param_opt(flags::USERNAME, string(m, flags::USERNAME));
    ctx.backend.execute(request).await
}
