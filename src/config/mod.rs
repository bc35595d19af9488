//! Profile configuration.
//!
//! Profiles live in a YAML file keyed by profile name. Any property can be
//! overridden through an `MCLI_`-prefixed environment variable, which always
//! wins over the file.

mod error;

pub use error::{ConfigError, ConfigResult};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TOOL_NAME: &str = "mongocli";
pub const DEFAULT_PROFILE: &str = "default";
pub const ENV_PREFIX: &str = "MCLI_";
pub const CONFIG_PATH_ENV: &str = "MCLI_CONFIG_PATH";

pub const CLOUD_SERVICE: &str = "cloud";
pub const CLOUD_MANAGER_SERVICE: &str = "cloud-manager";
pub const OPS_MANAGER_SERVICE: &str = "ops-manager";
pub const SERVICES: [&str; 3] = [CLOUD_SERVICE, CLOUD_MANAGER_SERVICE, OPS_MANAGER_SERVICE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    PublicApiKey,
    PrivateApiKey,
    OpsManagerUrl,
    ProjectId,
    OrgId,
    Service,
}

impl Property {
    pub const ALL: [Property; 6] = [
        Property::PublicApiKey,
        Property::PrivateApiKey,
        Property::OpsManagerUrl,
        Property::ProjectId,
        Property::OrgId,
        Property::Service,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::PublicApiKey => "public_api_key",
            Property::PrivateApiKey => "private_api_key",
            Property::OpsManagerUrl => "ops_manager_url",
            Property::ProjectId => "project_id",
            Property::OrgId => "org_id",
            Property::Service => "service",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }

    /// e.g. `MCLI_PUBLIC_API_KEY`
    pub fn env_var(self) -> String {
        format!("{}{}", ENV_PREFIX, self.name().to_uppercase())
    }

    pub fn is_secret(self) -> bool {
        matches!(self, Property::PublicApiKey | Property::PrivateApiKey)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ops_manager_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl Profile {
    pub fn get(&self, property: Property) -> Option<&str> {
        let value = match property {
            Property::PublicApiKey => &self.public_api_key,
            Property::PrivateApiKey => &self.private_api_key,
            Property::OpsManagerUrl => &self.ops_manager_url,
            Property::ProjectId => &self.project_id,
            Property::OrgId => &self.org_id,
            Property::Service => &self.service,
        };
        value.as_deref()
    }

    pub fn set(&mut self, property: Property, value: String) {
        let slot = match property {
            Property::PublicApiKey => &mut self.public_api_key,
            Property::PrivateApiKey => &mut self.private_api_key,
            Property::OpsManagerUrl => &mut self.ops_manager_url,
            Property::ProjectId => &mut self.project_id,
            Property::OrgId => &mut self.org_id,
            Property::Service => &mut self.service,
        };
        *slot = Some(value);
    }
}

/// The API key pair of the active profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub public_api_key: Option<String>,
    pub private_api_key: Option<String>,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        let present = |key: &Option<String>| key.as_deref().is_some_and(|k| !k.is_empty());
        present(&self.public_api_key) && present(&self.private_api_key)
    }
}

/// Configuration for one invocation: all profiles from the file, the name of
/// the selected profile and a snapshot of the `MCLI_` environment.
#[derive(Debug, Clone)]
pub struct Config {
    path: Option<PathBuf>,
    profile_name: String,
    profiles: BTreeMap<String, Profile>,
    env: HashMap<String, String>,
}

impl Config {
    /// No backing file, no profiles, no environment overrides.
    pub fn empty() -> Self {
        Self {
            path: None,
            profile_name: DEFAULT_PROFILE.to_string(),
            profiles: BTreeMap::new(),
            env: HashMap::new(),
        }
    }

    /// `$MCLI_CONFIG_PATH`, or `config.yaml` under the user config directory.
    pub fn default_path() -> ConfigResult<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        dirs::config_dir()
            .map(|dir| dir.join(TOOL_NAME).join("config.yaml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Loads the default config file and the process environment.
    pub fn load(profile: Option<&str>) -> ConfigResult<Self> {
        let path = Self::default_path()?;
        Ok(Self::from_path(path, profile)?.with_env(std::env::vars()))
    }

    /// A missing file is treated as an empty configuration.
    pub fn from_path(path: impl Into<PathBuf>, profile: Option<&str>) -> ConfigResult<Self> {
        let path = path.into();
        let profiles = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Ok(Self {
            path: Some(path),
            profile_name: profile
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PROFILE)
                .to_string(),
            profiles,
            env: HashMap::new(),
        })
    }

    /// Replaces the environment snapshot; only `MCLI_` variables are kept.
    pub fn with_env<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.env = vars
            .into_iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        self
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Resolves a property for the active profile; the environment wins when set.
    pub fn get(&self, property: Property) -> Option<String> {
        if let Some(value) = self.env.get(&property.env_var()) {
            if !value.is_empty() {
                return Some(value.clone());
            }
        }
        self.profiles
            .get(&self.profile_name)
            .and_then(|profile| profile.get(property))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            public_api_key: self.get(Property::PublicApiKey),
            private_api_key: self.get(Property::PrivateApiKey),
        }
    }

    /// Sets a property on the active profile, creating the profile if needed.
    pub fn set(&mut self, property: Property, value: impl Into<String>) {
        self.profiles
            .entry(self.profile_name.clone())
            .or_default()
            .set(property, value.into());
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn delete_profile(&mut self, name: &str) -> ConfigResult<()> {
        self.profiles
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    pub fn save(&self) -> ConfigResult<()> {
        let path = self.path.as_ref().ok_or(ConfigError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(&self.profiles)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
default:
  public_api_key: file-public
  private_api_key: file-private
  project_id: 5e9f088b4797476aa0a5d56a
onprem:
  ops_manager_url: http://localhost:8080/
  service: ops-manager
"#;

    fn write_sample(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("config.yaml");
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_path(dir.path().join("nope.yaml"), None).unwrap();

        assert_eq!(config.profile_name(), DEFAULT_PROFILE);
        assert_eq!(config.profile_names().count(), 0);
        assert!(!config.credentials().is_complete());
    }

    #[test]
    fn test_reads_selected_profile() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir);

        let config = Config::from_path(&path, None).unwrap();
        assert_eq!(config.get(Property::PublicApiKey).as_deref(), Some("file-public"));
        assert!(config.credentials().is_complete());

        let config = Config::from_path(&path, Some("onprem")).unwrap();
        assert_eq!(config.profile_name(), "onprem");
        assert_eq!(config.get(Property::Service).as_deref(), Some("ops-manager"));
        assert!(!config.credentials().is_complete());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir);

        let config = Config::from_path(&path, None).unwrap().with_env(vec![
            ("MCLI_PUBLIC_API_KEY".to_string(), "env-public".to_string()),
            ("MCLI_PRIVATE_API_KEY".to_string(), String::new()),
            ("UNRELATED".to_string(), "ignored".to_string()),
        ]);

        assert_eq!(config.get(Property::PublicApiKey).as_deref(), Some("env-public"));
        // An empty variable does not mask the file value
        assert_eq!(config.get(Property::PrivateApiKey).as_deref(), Some("file-private"));
    }

    #[test]
    fn test_set_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::from_path(&path, Some("work")).unwrap();
        config.set(Property::OrgId, "5e9f088b4797476aa0a5d56b");
        config.save().unwrap();

        let reloaded = Config::from_path(&path, Some("work")).unwrap();
        assert_eq!(
            reloaded.get(Property::OrgId).as_deref(),
            Some("5e9f088b4797476aa0a5d56b")
        );
        assert_eq!(reloaded.profile_names().collect::<Vec<_>>(), vec!["work"]);
    }

    #[test]
    fn test_delete_profile() {
        let dir = TempDir::new().unwrap();
        let path = write_sample(&dir);
        let mut config = Config::from_path(&path, None).unwrap();

        config.delete_profile("onprem").unwrap();
        assert!(config.profile("onprem").is_none());
        assert!(matches!(
            config.delete_profile("onprem"),
            Err(ConfigError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default: [not, a, profile").unwrap();

        assert!(matches!(
            Config::from_path(&path, None),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_property_names() {
        assert_eq!(Property::from_name("org_id"), Some(Property::OrgId));
        assert_eq!(Property::from_name("nope"), None);
        assert_eq!(Property::PrivateApiKey.env_var(), "MCLI_PRIVATE_API_KEY");
    }
}
