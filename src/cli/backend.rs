use super::error::CliError;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

const REDACTED: &str = "[REDACTED]";

/// A fully validated command invocation, ready for the API client.
///
/// Secrets appear in `params` as a redacted placeholder; their values are
/// only reachable through [`Request::secret_value`].
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    pub command: String,
    pub profile: String,
    pub params: BTreeMap<String, String>,
    #[serde(skip)]
    secrets: BTreeMap<String, String>,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("command", &self.command)
            .field("profile", &self.profile)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Request {
    pub fn new(command: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            profile: profile.into(),
            params: BTreeMap::new(),
            secrets: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn param_opt(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Carries a secret for the backend; output only ever shows the placeholder.
    pub fn secret(mut self, key: &str, value: impl Into<String>) -> Self {
        self.secrets.insert(key.to_string(), value.into());
        self.param(key, REDACTED)
    }

    pub fn secret_value(&self, key: &str) -> Option<&str> {
        self.secrets.get(key).map(String::as_str)
    }
}

/// Business logic behind the validated command surface.
#[async_trait]
pub trait Backend {
    async fn execute(&self, request: Request) -> Result<(), CliError>;
}

/// Prints each request as JSON instead of calling the API.
pub struct DryRunBackend;

#[async_trait]
impl Backend for DryRunBackend {
    async fn execute(&self, request: Request) -> Result<(), CliError> {
        info!(command = %request.command, profile = %request.profile, "dispatching request");
        println!("{}", DryRunBackend::render(&request)?);
        Ok(())
    }
}

impl DryRunBackend {
    fn render(request: &Request) -> Result<String, CliError> {
        serde_json::to_string_pretty(request)
            .map_err(|e| CliError::OperationFailed(format!("Failed to encode request: {}", e)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = Request::new("atlas clusters list", "default")
            .param("projectId", "5e9f088b4797476aa0a5d56a")
            .param_opt("tier", None::<String>)
            .secret("password", "s3cret");

        assert_eq!(req.params.len(), 2);
        assert_eq!(req.params["password"], REDACTED);
        assert_eq!(req.secret_value("password"), Some("s3cret"));
        assert!(!req.params.contains_key("tier"));
    }

    #[test]
    fn test_secrets_stay_out_of_output() {
        let req = Request::new("atlas dbusers create", "default")
            .param("username", "admin")
            .secret("password", "s3cret");

        let body = DryRunBackend::render(&req).unwrap();
        assert!(body.contains(REDACTED));
        assert!(!body.contains("s3cret"));
        assert!(!format!("{:?}", req).contains("s3cret"));
    }

    #[tokio::test]
    async fn test_dry_run_succeeds() {
        let req = Request::new("iam projects list", "default");
        assert!(DryRunBackend.execute(req).await.is_ok());
    }
}
