use super::error::CliError;
use super::flags;
use crate::config::TOOL_NAME;
use clap::{Arg, ArgMatches, Command};
use clap_complete::Shell;
use std::io;

pub const USE: &str = "completion";

const SHELLS: [&str; 4] = ["bash", "zsh", "fish", "powershell"];

pub fn builder() -> Command {
    Command::new(USE)
        .about("Generate shell completion scripts")
        .long_about(format!(
            "Generate shell completion scripts for {tool} commands.\n\
             The output of this command will be computer code and is meant to be saved to a\n\
             file or immediately evaluated by an interactive shell.\n\n\
             Supported shells: {shells}.",
            tool = TOOL_NAME,
            shells = SHELLS.join(", ")
        ))
        .override_usage(format!("{} {} <bash|zsh|fish|powershell>", TOOL_NAME, USE))
        .arg(
            Arg::new(flags::SHELL)
                .required(true)
                .num_args(1)
                .value_name("SHELL"),
        )
}

fn shell(name: &str) -> Result<Shell, CliError> {
    match name {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" => Ok(Shell::PowerShell),
        other => Err(CliError::UnsupportedShell(other.to_string())),
    }
}

/// Writes the script for the requested shell to stdout.
pub fn run(matches: &ArgMatches, root: &mut Command) -> Result<(), CliError> {
    let name = super::string(matches, flags::SHELL).unwrap_or_default();
    let shell = shell(name)?;
    clap_complete::generate(shell, root, TOOL_NAME, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{exec, with_credentials};
    use super::*;

    #[test]
    fn test_known_shells() {
        for name in SHELLS {
            assert!(shell(name).is_ok(), "{} should be supported", name);
        }
    }

    #[tokio::test]
    async fn test_unsupported_shell() {
        let (result, _) = exec(&["completion", "tcsh"], with_credentials()).await;
        match result {
            Err(CliError::UnsupportedShell(name)) => assert_eq!(name, "tcsh"),
            other => panic!("expected unsupported shell error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generates_script() {
        let (result, requests) = exec(&["completion", "bash"], with_credentials()).await;
        assert!(result.is_ok());
        assert!(requests.is_empty());
    }
}
