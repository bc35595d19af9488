use super::flags;
use crate::config::ConfigError;
use crate::mongosh::MongoshError;
use crate::validate::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mongosh(#[from] MongoshError),

    #[error("unsupported shell type \"{0}\"")]
    UnsupportedShell(String),

    #[error("required flag(s) \"{}\" not set", flags::PROJECT_ID)]
    MissingProjectId,

    #[error("required flag(s) \"{}\" not set", flags::ORG_ID)]
    MissingOrgId,

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Prompt(err.to_string())
    }
}
