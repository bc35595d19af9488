//! `ops-manager` command group.

use super::error::CliError;
use super::{flags, project_id_arg, string, value, Context};
use crate::config::Property;
use crate::validate::{self, Candidate, ValidationError, ValidationResult};
use clap::{Arg, ArgMatches, Command};

pub const USE: &str = "ops-manager";

const CLUSTERS: &str = "clusters";
const OWNER: &str = "owner";
const AUTOMATION: &str = "automation";

pub fn builder() -> Command {
    Command::new(USE)
        .alias("om")
        .about("Ops Manager operations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CLUSTERS)
                .about("Manage clusters for your project")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .alias("ls")
                        .about("List clusters for your project")
                        .arg(project_id_arg()),
                )
                .subcommand(
                    Command::new("describe")
                        .alias("get")
                        .about("Describe a cluster")
                        .arg(Arg::new(flags::NAME).required(true).help("Name of the cluster."))
                        .arg(project_id_arg()),
                ),
        )
        .subcommand(
            Command::new(OWNER)
                .about("Manage the first user of an Ops Manager installation")
                .subcommand_required(true)
                .subcommand(
                    Command::new("create")
                        .about("Create the first user for Ops Manager")
                        .arg(
                            Arg::new(flags::EMAIL)
                                .long(flags::EMAIL)
                                .required(true)
                                .help("Address used to contact the user."),
                        )
                        .arg(
                            Arg::new(flags::PASSWORD)
                                .long(flags::PASSWORD)
                                .short(flags::PASSWORD_SHORT)
                                .required(true)
                                .help("User's password."),
                        )
                        .arg(
                            Arg::new(flags::FIRST_NAME)
                                .long(flags::FIRST_NAME)
                                .required(true)
                                .help("First name of the user."),
                        )
                        .arg(
                            Arg::new(flags::LAST_NAME)
                                .long(flags::LAST_NAME)
                                .required(true)
                                .help("Last name of the user."),
                        )
                        .arg(
                            Arg::new(flags::OPS_MANAGER_URL)
                                .long(flags::OPS_MANAGER_URL)
                                .help("URL of the Ops Manager installation, ending with '/'. Defaults to the profile's ops_manager_url."),
                        ),
                ),
        )
        .subcommand(
            Command::new(AUTOMATION)
                .about("Manage the automation configuration of your project")
                .subcommand_required(true)
                .subcommand(
                    Command::new("status")
                        .about("Show the automation goal and last reported state")
                        .arg(project_id_arg()),
                ),
        )
}

pub async fn run(matches: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    let Some((group, m)) = matches.subcommand() else {
        return Err(CliError::OperationFailed(
            "missing ops-manager subcommand".to_string(),
        ));
    };

    match (group, m.subcommand()) {
        (CLUSTERS, Some(("list", m))) => project_scoped("ops-manager clusters list", m, ctx).await,
        (CLUSTERS, Some(("describe", m))) => {
            validate::cluster_name(&value(m, flags::NAME))?;
            validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
            validate::credentials(&ctx.config)?;
            let request = ctx
                .request("ops-manager clusters describe")
                .param(flags::PROJECT_ID, ctx.project_id(m)?)
                .param_opt(flags::NAME, string(m, flags::NAME));
            ctx.backend.execute(request).await
        }
        (OWNER, Some(("create", m))) => create_owner(m, ctx).await,
        (AUTOMATION, Some(("status", m))) => {
            project_scoped("ops-manager automation status", m, ctx).await
        }
        (other, _) => Err(CliError::OperationFailed(format!(
            "missing {} subcommand",
            other
        ))),
    }
}

async fn project_scoped(command: &str, m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    validate::credentials(&ctx.config)?;
    let request = ctx
        .request(command)
        .param(flags::PROJECT_ID, ctx.project_id(m)?);
    ctx.backend.execute(request).await
}

fn required_url(value: &Candidate<'_>) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::Required {
            what: "Ops Manager URL",
        });
    }
    Ok(())
}

/// The first user is created before any API key exists, so no credentials are needed.
async fn create_owner(m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    validate::optional_url(&value(m, flags::OPS_MANAGER_URL))?;
    let url = match string(m, flags::OPS_MANAGER_URL).filter(|u| !u.is_empty()) {
        Some(url) => url.to_string(),
        None => {
            let url = ctx.config.get(Property::OpsManagerUrl).unwrap_or_default();
            validate::all(&Candidate::from(&url), &[required_url, validate::url])?;
            url
        }
    };

    let request = ctx
        .request("ops-manager owner create")
        .param(flags::OPS_MANAGER_URL, url)
        .param_opt(flags::EMAIL, string(m, flags::EMAIL))
        .param_opt(flags::FIRST_NAME, string(m, flags::FIRST_NAME))
        .param_opt(flags::LAST_NAME, string(m, flags::LAST_NAME))
        .secret(flags::PASSWORD, string(m, flags::PASSWORD).unwrap_or_default());
    ctx.backend.execute(request).await
}

#[cfg(test)]
mod tests {
    use super::super::testing::{exec, with_credentials, PROJECT};
    use super::*;
    use crate::config::Config;
    use std::collections::HashMap;

    const OWNER_ARGS: [&str; 11] = [
        "ops-manager", "owner", "create", "--email", "a@example.com", "--password", "x",
        "--firstName", "Ada", "--lastName", "Lovelace",
    ];

    #[tokio::test]
    async fn test_owner_create_without_credentials() {
        let mut args = OWNER_ARGS.to_vec();
        args.extend(["--opsManagerUrl", "http://localhost:8080/"]);

        let (result, requests) = exec(&args, Config::empty()).await;
        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(requests[0].params["opsManagerUrl"], "http://localhost:8080/");
    }

    #[tokio::test]
    async fn test_owner_create_rejects_url_without_slash() {
        let mut args = OWNER_ARGS.to_vec();
        args.extend(["--opsManagerUrl", "http://localhost:8080"]);

        let (result, requests) = exec(&args, Config::empty()).await;
        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::InvalidFormat { .. }))
        ));
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_owner_create_needs_some_url() {
        let (result, requests) = exec(&OWNER_ARGS, Config::empty()).await;
        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::Required {
                what: "Ops Manager URL"
            }))
        ));
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_owner_create_uses_profile_url() {
        let config = Config::empty().with_env(HashMap::from([(
            "MCLI_OPS_MANAGER_URL".to_string(),
            "http://om.example.com:8080/".to_string(),
        )]));

        let (result, requests) = exec(&OWNER_ARGS, config).await;
        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(requests[0].params["opsManagerUrl"], "http://om.example.com:8080/");
        assert_eq!(requests[0].secret_value("password"), Some("x"));
    }

    #[tokio::test]
    async fn test_automation_status() {
        let (result, requests) = exec(
            &["ops-manager", "automation", "status", "--projectId", PROJECT],
            with_credentials(),
        )
        .await;
        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(requests[0].command, "ops-manager automation status");
    }
}
