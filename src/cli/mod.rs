pub mod atlas;
pub mod backend;
pub mod builder;
mod completion;
mod config;
pub mod error;
pub mod flags;
mod iam;
mod opsmanager;
mod ui;
pub mod version;

use crate::config::{Config, Property, TOOL_NAME};
use crate::validate::{self, Candidate};
use backend::{Backend, DryRunBackend, Request};
use clap::{Arg, ArgMatches, Command};
use error::CliError;
use tracing::debug;

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub config: Config,
    pub backend: Box<dyn Backend + Send + Sync>,
}

impl Context {
    pub fn new(config: Config, backend: Box<dyn Backend + Send + Sync>) -> Self {
        Self { config, backend }
    }

    pub fn request(&self, command: &str) -> Request {
        Request::new(command, self.config.profile_name())
    }

    /// `--projectId`, falling back to the profile.
    pub fn project_id(&self, matches: &ArgMatches) -> Result<String, CliError> {
        self.resolve_id(matches, flags::PROJECT_ID, Property::ProjectId)?
            .ok_or(CliError::MissingProjectId)
    }

    /// `--orgId`, falling back to the profile.
    pub fn org_id(&self, matches: &ArgMatches) -> Result<String, CliError> {
        self.resolve_id(matches, flags::ORG_ID, Property::OrgId)?
            .ok_or(CliError::MissingOrgId)
    }

    fn resolve_id(
        &self,
        matches: &ArgMatches,
        flag: &str,
        property: Property,
    ) -> Result<Option<String>, CliError> {
        let id = match string(matches, flag).filter(|s| !s.is_empty()) {
            Some(id) => Some(id.to_string()),
            None => self.config.get(property),
        };
        if let Some(id) = &id {
            validate::object_id(&Candidate::from(id))?;
        }
        Ok(id)
    }
}

pub(crate) fn project_id_arg() -> Arg {
    Arg::new(flags::PROJECT_ID)
        .long(flags::PROJECT_ID)
        .help(flags::usage::PROJECT_ID)
        .num_args(1)
}

pub(crate) fn org_id_arg() -> Arg {
    Arg::new(flags::ORG_ID)
        .long(flags::ORG_ID)
        .help(flags::usage::ORG_ID)
        .num_args(1)
}

/// A string argument, or `None` when unset (or not declared on this command).
pub(crate) fn string<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a str> {
    matches
        .try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(String::as_str)
}

pub(crate) fn value<'a>(matches: &'a ArgMatches, id: &str) -> Candidate<'a> {
    Candidate::from(string(matches, id))
}

pub(crate) fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

/// The assembled tree together with the parsed arguments.
pub struct Parsed {
    root: Command,
    matches: ArgMatches,
}

impl Parsed {
    pub fn wants_version(&self) -> bool {
        flag(&self.matches, flags::VERSION)
    }

    pub fn debug(&self) -> bool {
        flag(&self.matches, flags::DEBUG)
    }

    pub fn profile(&self) -> Option<&str> {
        string(&self.matches, flags::PROFILE)
    }

    pub fn root(&self) -> &Command {
        &self.root
    }

    /// Help and completion output work without reading the config file.
    pub fn needs_config(&self) -> bool {
        !matches!(self.matches.subcommand_name(), None | Some(completion::USE))
    }
}

/// Assembles the tree for `args` (without the program name) and parses them.
pub fn parse<I, S>(args: I) -> Result<Parsed, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let root = builder::builder(&args);
    let matches = root
        .clone()
        .try_get_matches_from(std::iter::once(TOOL_NAME.to_string()).chain(args))?;
    Ok(Parsed { root, matches })
}

/// Runs a parsed invocation against the real configuration.
pub async fn run(parsed: Parsed) -> Result<(), CliError> {
    if parsed.wants_version() {
        print!("{}", version::formatted_version());
        return Ok(());
    }

    let config = if parsed.needs_config() {
        let config = Config::load(parsed.profile())?;
        debug!(profile = %config.profile_name(), "configuration loaded");
        config
    } else {
        Config::empty()
    };
    let mut ctx = Context::new(config, Box::new(DryRunBackend));
    execute(parsed, &mut ctx).await
}

pub async fn execute(parsed: Parsed, ctx: &mut Context) -> Result<(), CliError> {
    let Parsed { mut root, matches } = parsed;

    match matches.subcommand() {
        Some((config::USE, m)) => config::run(m, ctx),
        Some((atlas::USE, m)) => atlas::run(m, ctx).await,
        Some((opsmanager::USE, m)) => opsmanager::run(m, ctx).await,
        Some((iam::USE, m)) => iam::run(m, ctx).await,
        Some((completion::USE, m)) => completion::run(m, &mut root),
        Some((other, _)) => Err(CliError::OperationFailed(format!(
            "unknown command \"{}\"",
            other
        ))),
        None => {
            root.print_help()?;
            Ok(())
        }
    }
}
