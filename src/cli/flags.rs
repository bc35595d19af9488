// Flag names shared across commands
pub const PROFILE: &str = "profile";
pub const PROFILE_SHORT: char = 'P';
pub const VERSION: &str = "version";
pub const VERSION_SHORT: char = 'v';
pub const DEBUG: &str = "debug";

pub const PROJECT_ID: &str = "projectId";
pub const ORG_ID: &str = "orgId";
pub const NAME: &str = "name";
pub const ID: &str = "id";

pub const PROVIDER: &str = "provider";
pub const REGION: &str = "region";
pub const TIER: &str = "tier";
pub const MEMBERS: &str = "members";
pub const DISK_SIZE_GB: &str = "diskSizeGB";
pub const MDB_VERSION: &str = "mdbVersion";

pub const USERNAME: &str = "username";
pub const USERNAME_SHORT: char = 'u';
pub const PASSWORD: &str = "password";
pub const PASSWORD_SHORT: char = 'p';
pub const ROLE: &str = "role";

pub const ENTRY: &str = "entry";
pub const TYPE: &str = "type";
pub const COMMENT: &str = "comment";

pub const EMAIL: &str = "email";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const OPS_MANAGER_URL: &str = "opsManagerUrl";

pub const CONNECTION_STRING: &str = "connectionString";
pub const PROPERTY: &str = "property";
pub const VALUE: &str = "value";
pub const SHELL: &str = "shell";

pub mod usage {
    pub const PROFILE: &str = "Profile to use from your configuration file.";
    pub const PROJECT_ID: &str =
        "Project ID to use. Overrides the settings in the configuration file or environment variable.";
    pub const ORG_ID: &str =
        "Organization ID to use. Overrides the settings in the configuration file or environment variable.";
    pub const DEBUG: &str = "Log debug output to stderr.";
    pub const VERSION: &str = "Print version information.";
    pub const PASSWORD: &str = "User's password. Prompted for when omitted.";
}
