//! `config` command group: manage profiles in the configuration file.

use super::error::CliError;
use super::{flags, string, ui};
use crate::config::{Property, SERVICES};
use crate::validate::{self, Candidate};
use clap::{Arg, ArgMatches, Command};
use dialoguer::{Input, Password, Select};
use tracing::info;

pub const USE: &str = "config";

const SET: &str = "set";
const LIST: &str = "list";
const DESCRIBE: &str = "describe";
const DELETE: &str = "delete";

pub fn builder() -> Command {
    Command::new(USE)
        .about("Configure a profile to store access settings for your MongoDB deployment")
        .long_about(
            "Configure settings in a user profile.\n\
             All settings are optional. You can specify settings individually by running:\n  \
             $ mongocli config set --help",
        )
        .subcommand(
            Command::new(SET)
                .about("Configure specific properties of a profile")
                .arg(
                    Arg::new(flags::PROPERTY)
                        .required(true)
                        .help(format!("Property to set: {}.", Property::names().join(", "))),
                )
                .arg(Arg::new(flags::VALUE).required(true).help("Value for the property.")),
        )
        .subcommand(
            Command::new(LIST)
                .alias("ls")
                .about("List available profiles"),
        )
        .subcommand(
            Command::new(DESCRIBE)
                .alias("get")
                .about("Return the profile you specify")
                .arg(Arg::new(flags::NAME).required(true).help("Name of the profile.")),
        )
        .subcommand(
            Command::new(DELETE)
                .alias("rm")
                .about("Delete a profile")
                .arg(Arg::new(flags::NAME).required(true).help("Name of the profile.")),
        )
}

pub fn run(matches: &ArgMatches, ctx: &mut super::Context) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((SET, m)) => set(m, ctx),
        Some((LIST, _)) => {
            println!(
                "{}",
                ui::profiles_table(ctx.config.profile_names(), ctx.config.profile_name())
            );
            Ok(())
        }
        Some((DESCRIBE, m)) => describe(m, ctx),
        Some((DELETE, m)) => {
            let name = string(m, flags::NAME).unwrap_or_default();
            ctx.config.delete_profile(name)?;
            ctx.config.save()?;
            println!("{}", ui::format_success(&format!("Profile '{}' deleted", name)));
            Ok(())
        }
        _ => setup(ctx),
    }
}

/// Checks a value against the rules of the property it is assigned to.
fn validate_property(property: Property, value: &str) -> Result<(), CliError> {
    let candidate = Candidate::from(value);
    match property {
        Property::OpsManagerUrl => validate::url(&candidate)?,
        Property::ProjectId | Property::OrgId => validate::object_id(&candidate)?,
        Property::Service => validate::flag_in_slice(value, Property::Service.name(), &SERVICES)?,
        Property::PublicApiKey | Property::PrivateApiKey => {}
    }
    Ok(())
}

fn set(m: &ArgMatches, ctx: &mut super::Context) -> Result<(), CliError> {
    let name = string(m, flags::PROPERTY).unwrap_or_default();
    validate::flag_in_slice(name, flags::PROPERTY, &Property::names())?;
    let value = string(m, flags::VALUE).unwrap_or_default();

    // flag_in_slice above guarantees the lookup succeeds
    if let Some(property) = Property::from_name(name) {
        validate_property(property, value)?;
        ctx.config.set(property, value);
        ctx.config.save()?;
        info!(profile = %ctx.config.profile_name(), property = name, "property updated");
        println!(
            "{}",
            ui::format_success(&format!("Updated property '{}'", name))
        );
    }
    Ok(())
}

fn describe(m: &ArgMatches, ctx: &mut super::Context) -> Result<(), CliError> {
    let name = string(m, flags::NAME).unwrap_or_default();
    let profile = ctx
        .config
        .profile(name)
        .ok_or_else(|| crate::config::ConfigError::ProfileNotFound(name.to_string()))?;

    println!("{}", ui::format_header(&format!("Profile {}:", name)));
    println!(
        "{}",
        ui::properties_table(Property::ALL.into_iter().map(|p| (p, profile.get(p))))
    );
    Ok(())
}

/// Interactive setup of the active profile.
fn setup(ctx: &mut super::Context) -> Result<(), CliError> {
    println!(
        "{}",
        ui::format_header(&format!(
            "Configuring profile '{}'",
            ctx.config.profile_name()
        ))
    );
    println!(
        "{}",
        ui::format_warning("Press Enter to keep the current value or leave a setting empty.")
    );

    let current = |p: Property| ctx.config.get(p).unwrap_or_default();
    let service_index = SERVICES
        .iter()
        .position(|s| *s == current(Property::Service))
        .unwrap_or(0);
    let service = SERVICES[Select::new()
        .with_prompt("Service")
        .items(&SERVICES)
        .default(service_index)
        .interact()?];

    let public_key: String = Input::new()
        .with_prompt("Public API Key")
        .with_initial_text(current(Property::PublicApiKey))
        .allow_empty(true)
        .interact_text()?;
    let private_key = Password::new()
        .with_prompt("Private API Key")
        .allow_empty_password(true)
        .interact()?;

    let ops_manager_url: String = if service == crate::config::OPS_MANAGER_SERVICE {
        Input::new()
            .with_prompt("URL to Access Ops Manager")
            .with_initial_text(current(Property::OpsManagerUrl))
            .allow_empty(true)
            .validate_with(|input: &String| {
                validate::optional_url(&Candidate::from(input)).map_err(|e| e.to_string())
            })
            .interact_text()?
    } else {
        String::new()
    };

    let project_id: String = Input::new()
        .with_prompt("Default Project ID")
        .with_initial_text(current(Property::ProjectId))
        .allow_empty(true)
        .validate_with(|input: &String| {
            validate::optional_object_id(&Candidate::from(input)).map_err(|e| e.to_string())
        })
        .interact_text()?;
    let org_id: String = Input::new()
        .with_prompt("Default Org ID")
        .with_initial_text(current(Property::OrgId))
        .allow_empty(true)
        .validate_with(|input: &String| {
            validate::optional_object_id(&Candidate::from(input)).map_err(|e| e.to_string())
        })
        .interact_text()?;

    let updates = [
        (Property::Service, service.to_string()),
        (Property::PublicApiKey, public_key),
        (Property::PrivateApiKey, private_key),
        (Property::OpsManagerUrl, ops_manager_url),
        (Property::ProjectId, project_id),
        (Property::OrgId, org_id),
    ];
    for (property, value) in updates {
        if !value.is_empty() {
            ctx.config.set(property, value);
        }
    }
    ctx.config.save()?;

    println!(
        "{}",
        ui::format_success("Your profile is now configured.")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::exec;
    use crate::config::Config;
    use crate::validate::ValidationError;
    use tempfile::TempDir;

    #[test]
    fn test_validate_property() {
        assert!(validate_property(Property::OpsManagerUrl, "http://om.example.com/").is_ok());
        assert!(validate_property(Property::OpsManagerUrl, "http://om.example.com").is_err());
        assert!(validate_property(Property::ProjectId, "5e9f088b4797476aa0a5d56a").is_ok());
        assert!(validate_property(Property::OrgId, "nope").is_err());
        assert!(validate_property(Property::Service, "cloud").is_ok());
        assert!(validate_property(Property::Service, "on-prem").is_err());
        assert!(validate_property(Property::PublicApiKey, "anything").is_ok());
    }

    #[tokio::test]
    async fn test_set_persists_property() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let config = Config::from_path(&path, Some("work")).unwrap();

        let (result, _) = exec(
            &["config", "set", "project_id", "5e9f088b4797476aa0a5d56a"],
            config,
        )
        .await;
        assert!(result.is_ok(), "{:?}", result);

        let reloaded = Config::from_path(&path, Some("work")).unwrap();
        assert_eq!(
            reloaded.get(Property::ProjectId).as_deref(),
            Some("5e9f088b4797476aa0a5d56a")
        );
    }

    #[tokio::test]
    async fn test_set_rejects_unknown_property() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_path(dir.path().join("config.yaml"), None).unwrap();

        let (result, _) = exec(&["config", "set", "colour", "blue"], config).await;
        assert!(matches!(
            result,
            Err(CliError::Validation(ValidationError::InvalidValue { .. }))
        ));
        assert!(!dir.path().join("config.yaml").exists());
    }

    #[tokio::test]
    async fn test_describe_missing_profile() {
        let (result, _) = exec(&["config", "describe", "ghost"], Config::empty()).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
