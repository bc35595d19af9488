//! `iam` command group: projects and organizations.

use super::error::CliError;
use super::{flags, org_id_arg, string, value, Context};
use crate::validate;
use clap::{Arg, ArgMatches, Command};

pub const USE: &str = "iam";

const PROJECTS: &str = "projects";
const ORGANIZATIONS: &str = "organizations";

fn resource(name: &'static str, alias: &'static str, what: &str, create: Command) -> Command {
    Command::new(name)
        .alias(alias)
        .about(format!("Manage your {}", what))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(create)
        .subcommand(
            Command::new("list")
                .alias("ls")
                .about(format!("List your {}", what)),
        )
        .subcommand(
            Command::new("delete")
                .alias("rm")
                .about(format!("Delete one of your {}", what))
                .arg(Arg::new(flags::ID).required(true).help("Identifier to delete.")),
        )
}

pub fn builder() -> Command {
    Command::new(USE)
        .about("Organization and project operations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            resource(
                PROJECTS,
                "project",
                "projects",
                Command::new("create")
                    .about("Create a project")
                    .arg(Arg::new(flags::NAME).required(true).help("Name of the project."))
                    .arg(org_id_arg()),
            )
            .mut_subcommand("list", |list| list.arg(org_id_arg())),
        )
        .subcommand(resource(
            ORGANIZATIONS,
            "orgs",
            "organizations",
            Command::new("create")
                .about("Create an organization")
                .arg(Arg::new(flags::NAME).required(true).help("Name of the organization.")),
        ))
}

pub async fn run(matches: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    let Some((group, m)) = matches.subcommand() else {
        return Err(CliError::OperationFailed("missing iam subcommand".to_string()));
    };
    let Some((action, m)) = m.subcommand() else {
        return Err(CliError::OperationFailed(format!(
            "missing {} subcommand",
            group
        )));
    };

    let command = format!("{} {} {}", USE, group, action);

    let request = match (group, action) {
        (PROJECTS, "create") => {
            validate::optional_object_id(&value(m, flags::ORG_ID))?;
            ctx.request(&command)
                .param(flags::ORG_ID, ctx.org_id(m)?)
                .param_opt(flags::NAME, string(m, flags::NAME))
        }
        (PROJECTS, "list") => {
            validate::optional_object_id(&value(m, flags::ORG_ID))?;
            ctx.request(&command)
                .param_opt(flags::ORG_ID, string(m, flags::ORG_ID))
        }
        (ORGANIZATIONS, "create") => ctx
            .request(&command)
            .param_opt(flags::NAME, string(m, flags::NAME)),
        (_, "delete") => {
            validate::object_id(&value(m, flags::ID))?;
            ctx.request(&command).param_opt(flags::ID, string(m, flags::ID))
        }
        _ => ctx.request(&command),
    };

    validate::credentials(&ctx.config)?;
    ctx.backend.execute(request).await
}

#[cfg(test)]
mod tests {
    use super::super::testing::{exec, with_credentials, ORG};
    use super::*;
    use crate::validate::ValidationError;

    #[tokio::test]
    async fn test_create_project() {
        let (result, requests) = exec(
            &["iam", "projects", "create", "myProject", "--orgId", ORG],
            with_credentials(),
        )
        .await;

        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(requests[0].command, "iam projects create");
        assert_eq!(requests[0].params["orgId"], ORG);
        assert_eq!(requests[0].params["name"], "myProject");
    }

    #[tokio::test]
    async fn test_create_project_requires_org() {
        let (result, requests) =
            exec(&["iam", "projects", "create", "myProject"], with_credentials()).await;

        assert!(matches!(result, Err(CliError::MissingOrgId)));
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_valid_id() {
        let (result, _) = exec(&["iam", "orgs", "delete", ""], with_credentials()).await;
        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::Required { .. }))
        ));

        let (result, _) = exec(&["iam", "projects", "rm", "abc"], with_credentials()).await;
        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::InvalidFormat { .. }))
        ));
    }

    #[tokio::test]
    async fn test_list_organizations() {
        let (result, requests) = exec(&["iam", "organizations", "list"], with_credentials()).await;
        assert!(result.is_ok());
        assert_eq!(requests[0].command, "iam organizations list");
    }
}
