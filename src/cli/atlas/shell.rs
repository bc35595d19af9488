use crate::cli::error::CliError;
use crate::cli::{flags, string, value};
use crate::mongosh;
use crate::validate;
use clap::{Arg, ArgMatches, Command};
use dialoguer::Password;
use tracing::debug;

pub const USE: &str = "shell";

const MONGODB_SCHEMES: [&str; 2] = ["mongodb", "mongodb+srv"];

pub fn builder() -> Command {
    Command::new(USE)
        .about("Open a MongoDB Shell session to a cluster")
        .long_about("Open a MongoDB Shell session to a cluster. Requires mongosh to be installed and available in PATH.")
        .arg(
            Arg::new(flags::CONNECTION_STRING)
                .required(true)
                .help("Connection string of the cluster, e.g. mongodb+srv://cluster0.example.net/"),
        )
        .arg(
            Arg::new(flags::USERNAME)
                .long(flags::USERNAME)
                .short(flags::USERNAME_SHORT)
                .required(true)
                .help("Database user to authenticate as."),
        )
        .arg(
            Arg::new(flags::PASSWORD)
                .long(flags::PASSWORD)
                .short(flags::PASSWORD_SHORT)
                .help(flags::usage::PASSWORD),
        )
}

fn validate_connection_string(uri: &str) -> Result<(), CliError> {
    let scheme = uri.split_once("://").map(|(scheme, _)| scheme);
    match scheme {
        Some(s) if MONGODB_SCHEMES.contains(&s) => Ok(()),
        _ => Err(CliError::OperationFailed(format!(
            "'{}' is not a valid connection string, expected {}://...",
            uri,
            MONGODB_SCHEMES.join(":// or ")
        ))),
    }
}

/// Replaces this process with `mongosh`; only returns on failure.
pub fn run(m: &ArgMatches) -> Result<(), CliError> {
    let uri = string(m, flags::CONNECTION_STRING).unwrap_or_default();
    validate_connection_string(uri)?;
    validate::db_username(&value(m, flags::USERNAME))?;
    let username = string(m, flags::USERNAME).unwrap_or_default();

    let binary = mongosh::locate()?;
    debug!(binary = %binary.display(), "found mongosh");

    let password = match string(m, flags::PASSWORD) {
        Some(p) => p.to_string(),
        None => Password::new().with_prompt("Password").interact()?,
    };

    match mongosh::run(&binary, username, &password, uri)? {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_connection_string() {
        assert!(validate_connection_string("mongodb://localhost:27017/").is_ok());
        assert!(validate_connection_string("mongodb+srv://cluster0.example.net/").is_ok());
        assert!(validate_connection_string("http://cluster0.example.net/").is_err());
        assert!(validate_connection_string("cluster0").is_err());
    }
}
