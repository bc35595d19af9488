use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{found}' is an invalid type, expected {expected}")]
    InvalidType {
        found: &'static str,
        expected: &'static str,
    },

    #[error("'{value}' {reason}")]
    InvalidFormat { value: String, reason: String },

    #[error("invalid value \"{value}\" for flag \"{flag}\", valid values are: {valid}")]
    InvalidValue {
        flag: String,
        value: String,
        valid: String,
    },

    #[error("a value for {what} is required")]
    Required { what: &'static str },

    #[error("path '{}' does not exist or is not readable", .0.display())]
    NotFound(PathBuf),

    #[error(
        "missing credentials for profile \"{profile}\", set them with \"mongocli config\" or the MCLI_PUBLIC_API_KEY and MCLI_PRIVATE_API_KEY environment variables"
    )]
    MissingCredentials { profile: String },
}
