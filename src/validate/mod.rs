//! Flag value validators.
//!
//! Every validator takes a [`Candidate`] (or plain typed arguments where the
//! flag is always a string) and returns `Ok(())` or a [`ValidationError`]
//! whose message is shown to the user verbatim.

mod error;

pub use error::ValidationError;

use crate::config::Config;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;
use url::Url;

pub type ValidationResult = Result<(), ValidationError>;

/// Signature shared by the single-value validators, used by [`all`].
pub type Validator = fn(&Candidate<'_>) -> ValidationResult;

lazy_static! {
    static ref OBJECT_ID: Regex = Regex::new(r"^[0-9a-fA-F]{24}$").expect("valid regex");
    static ref CLUSTER_NAME: Regex = Regex::new(r"^[A-Za-z0-9-]+$").expect("valid regex");
    static ref DB_USERNAME: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex");
}

/// A flag value as seen before validation.
///
/// Flags may be unset, set to a string, or (for values coming from
/// configuration or typed parsers) hold something that is not a string at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    Str(&'a str),
    Absent,
    /// A non-string value, tagged with its type name.
    Other(&'static str),
}

impl<'a> Candidate<'a> {
    /// `Absent` and `Str("")` both count as "not provided".
    pub fn is_empty(&self) -> bool {
        matches!(self, Candidate::Absent | Candidate::Str(""))
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Candidate::Str(s) => Some(*s),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Candidate::Str(_) => "string",
            Candidate::Absent => "nil",
            Candidate::Other(name) => *name,
        }
    }

    fn require_str(&self) -> Result<&'a str, ValidationError> {
        self.as_str().ok_or(ValidationError::InvalidType {
            found: self.type_name(),
            expected: "a string",
        })
    }
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(value: &'a str) -> Self {
        Candidate::Str(value)
    }
}

impl<'a> From<&'a String> for Candidate<'a> {
    fn from(value: &'a String) -> Self {
        Candidate::Str(value.as_str())
    }
}

impl<'a, T> From<Option<T>> for Candidate<'a>
where
    T: Into<Candidate<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Candidate::Absent)
    }
}

impl From<i64> for Candidate<'_> {
    fn from(_: i64) -> Self {
        Candidate::Other("integer")
    }
}

impl From<bool> for Candidate<'_> {
    fn from(_: bool) -> Self {
        Candidate::Other("bool")
    }
}

/// Runs every validator in order and stops at the first failure.
pub fn all(value: &Candidate<'_>, validators: &[Validator]) -> ValidationResult {
    validators.iter().try_for_each(|validator| validator(value))
}

/// An absolute URL ending with `/`.
pub fn url(value: &Candidate<'_>) -> ValidationResult {
    let s = value.require_str().inspect_err(log_failure)?;

    if let Err(e) = Url::parse(s) {
        let err = ValidationError::InvalidFormat {
            value: s.to_string(),
            reason: format!("is not a valid URL: {}", e),
        };
        log_failure(&err);
        return Err(err);
    }

    if !s.ends_with('/') {
        let err = ValidationError::InvalidFormat {
            value: s.to_string(),
            reason: "should have a trailing '/'".to_string(),
        };
        log_failure(&err);
        return Err(err);
    }

    Ok(())
}

/// Like [`url`], but an unset or empty value is accepted.
pub fn optional_url(value: &Candidate<'_>) -> ValidationResult {
    if value.is_empty() {
        return Ok(());
    }
    url(value)
}

/// A 24 character hexadecimal identifier.
pub fn object_id(value: &Candidate<'_>) -> ValidationResult {
    if value.is_empty() {
        return Err(ValidationError::Required { what: "ID" });
    }
    let s = value.require_str()?;

    if !OBJECT_ID.is_match(s) {
        let err = ValidationError::InvalidFormat {
            value: s.to_string(),
            reason: "is not a valid ID".to_string(),
        };
        log_failure(&err);
        return Err(err);
    }
    Ok(())
}

/// Like [`object_id`], but an unset or empty value is accepted.
pub fn optional_object_id(value: &Candidate<'_>) -> ValidationResult {
    if value.is_empty() {
        return Ok(());
    }
    object_id(value)
}

/// Cluster names: ASCII letters, digits and hyphens.
pub fn cluster_name(value: &Candidate<'_>) -> ValidationResult {
    charset(value, &CLUSTER_NAME, "cluster name", "letters, numbers and hyphens")
}

/// Database usernames: ASCII letters, digits, hyphens and underscores.
pub fn db_username(value: &Candidate<'_>) -> ValidationResult {
    charset(
        value,
        &DB_USERNAME,
        "database username",
        "letters, numbers, hyphens and underscores",
    )
}

fn charset(
    value: &Candidate<'_>,
    pattern: &Regex,
    what: &'static str,
    allowed: &str,
) -> ValidationResult {
    if let Candidate::Absent = value {
        return Err(ValidationError::Required { what });
    }
    let s = value.require_str()?;

    if !pattern.is_match(s) {
        let err = ValidationError::InvalidFormat {
            value: s.to_string(),
            reason: format!("is not a valid {}, only {} are allowed", what, allowed),
        };
        log_failure(&err);
        return Err(err);
    }
    Ok(())
}

/// `value` must be one of `valid_values`; `flag` names the flag in the error.
pub fn flag_in_slice<S: AsRef<str>>(value: &str, flag: &str, valid_values: &[S]) -> ValidationResult {
    if valid_values.iter().any(|v| v.as_ref() == value) {
        return Ok(());
    }

    let err = ValidationError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
        valid: valid_values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", "),
    };
    log_failure(&err);
    Err(err)
}

/// The path must exist and be readable by the current user.
pub fn path<P: AsRef<Path>>(value: P) -> ValidationResult {
    let p = value.as_ref();
    let readable = match fs::metadata(p) {
        Ok(meta) if meta.is_dir() => fs::read_dir(p).is_ok(),
        Ok(_) => fs::File::open(p).is_ok(),
        Err(_) => false,
    };

    if readable {
        Ok(())
    } else {
        let err = ValidationError::NotFound(p.to_path_buf());
        log_failure(&err);
        Err(err)
    }
}

/// Both API keys must be set, either in the active profile or the environment.
///
/// Whether the keys are actually accepted is only known on the first API call.
pub fn credentials(config: &Config) -> ValidationResult {
    if config.credentials().is_complete() {
        return Ok(());
    }
    let err = ValidationError::MissingCredentials {
        profile: config.profile_name().to_string(),
    };
    log_failure(&err);
    Err(err)
}

fn log_failure(err: &ValidationError) {
    debug!(error = %err, "validation failed");
}
