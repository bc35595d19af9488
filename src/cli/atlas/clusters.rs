use super::catalog::{Catalog, MDB_VERSIONS, TIERS};
use crate::cli::error::CliError;
use crate::cli::{flags, project_id_arg, string, value, Context};
use crate::validate;
use clap::{value_parser, Arg, ArgMatches, Command};
use tracing::info;

pub const USE: &str = "clusters";

const CREATE: &str = "create";
const LIST: &str = "list";
const DESCRIBE: &str = "describe";
const DELETE: &str = "delete";

const DEFAULT_TIER: &str = "M2";
const DEFAULT_MEMBERS: u32 = 3;
const DEFAULT_DISK_SIZE_GB: u32 = 2;
const DEFAULT_MDB_VERSION: &str = "4.4";

fn name_arg() -> Arg {
    Arg::new(flags::NAME)
        .required(true)
        .help("Name of the cluster.")
}

pub fn builder(catalog: &Catalog) -> Command {
    let providers = catalog.providers();
    let regions = providers
        .iter()
        .map(|p| format!("{}: {}", p, catalog.regions(p).join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    Command::new(USE)
        .alias("cluster")
        .about("Manage clusters for your project")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CREATE)
                .about("Create a MongoDB cluster")
                .arg(name_arg())
                .arg(project_id_arg())
                .arg(
                    Arg::new(flags::PROVIDER)
                        .long(flags::PROVIDER)
                        .required(true)
                        .help(format!("Name of your cloud service provider: {}.", providers.join(", "))),
                )
                .arg(
                    Arg::new(flags::REGION)
                        .long(flags::REGION)
                        .required(true)
                        .help("Physical location of your cluster.")
                        .long_help(format!("Physical location of your cluster.\n\n{}", regions)),
                )
                .arg(
                    Arg::new(flags::TIER)
                        .long(flags::TIER)
                        .default_value(DEFAULT_TIER)
                        .help(format!("Tier for each data-bearing server: {}.", TIERS.join(", "))),
                )
                .arg(
                    Arg::new(flags::MEMBERS)
                        .long(flags::MEMBERS)
                        .short('m')
                        .value_parser(value_parser!(u32))
                        .default_value("3")
                        .help("Number of members in the replica set."),
                )
                .arg(
                    Arg::new(flags::DISK_SIZE_GB)
                        .long(flags::DISK_SIZE_GB)
                        .value_parser(value_parser!(u32))
                        .default_value("2")
                        .help("Capacity, in gigabytes, of the host's root volume."),
                )
                .arg(
                    Arg::new(flags::MDB_VERSION)
                        .long(flags::MDB_VERSION)
                        .default_value(DEFAULT_MDB_VERSION)
                        .help("MongoDB version of the cluster."),
                ),
        )
        .subcommand(
            Command::new(LIST)
                .alias("ls")
                .about("List clusters for your project")
                .arg(project_id_arg()),
        )
        .subcommand(
            Command::new(DESCRIBE)
                .alias("get")
                .about("Describe a cluster")
                .arg(name_arg())
                .arg(project_id_arg()),
        )
        .subcommand(
            Command::new(DELETE)
                .alias("rm")
                .about("Delete a cluster")
                .arg(name_arg())
                .arg(project_id_arg()),
        )
}

pub async fn run(matches: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((CREATE, m)) => create(m, ctx).await,
        Some((LIST, m)) => list(m, ctx).await,
        Some((DESCRIBE, m)) => by_name(DESCRIBE, m, ctx).await,
        Some((DELETE, m)) => by_name(DELETE, m, ctx).await,
        _ => Err(CliError::OperationFailed(
            "missing clusters subcommand".to_string(),
        )),
    }
}

async fn create(m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    let catalog = Catalog::discover();

    validate::cluster_name(&value(m, flags::NAME))?;
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    let provider = string(m, flags::PROVIDER).unwrap_or_default();
    validate::flag_in_slice(provider, flags::PROVIDER, &catalog.providers())?;
    let region = string(m, flags::REGION).unwrap_or_default();
    validate::flag_in_slice(region, flags::REGION, catalog.regions(provider))?;
    let tier = string(m, flags::TIER).unwrap_or(DEFAULT_TIER);
    validate::flag_in_slice(tier, flags::TIER, &TIERS)?;
    let mdb_version = string(m, flags::MDB_VERSION).unwrap_or(DEFAULT_MDB_VERSION);
    validate::flag_in_slice(mdb_version, flags::MDB_VERSION, &MDB_VERSIONS)?;
    validate::credentials(&ctx.config)?;

    let project_id = ctx.project_id(m)?;
    let members = m.get_one::<u32>(flags::MEMBERS).copied().unwrap_or(DEFAULT_MEMBERS);
    let disk = m
        .get_one::<u32>(flags::DISK_SIZE_GB)
        .copied()
        .unwrap_or(DEFAULT_DISK_SIZE_GB);

    info!(project_id = %project_id, provider, region, "creating cluster");
    let request = ctx
        .request("atlas clusters create")
        .param(flags::PROJECT_ID, project_id)
        .param_opt(flags::NAME, string(m, flags::NAME))
        .param(flags::PROVIDER, provider)
        .param(flags::REGION, region)
        .param(flags::TIER, tier)
        .param(flags::MEMBERS, members.to_string())
        .param(flags::DISK_SIZE_GB, disk.to_string())
        .param(flags::MDB_VERSION, mdb_version);
    ctx.backend.execute(request).await
}

async fn list(m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    validate::credentials(&ctx.config)?;

    let request = ctx
        .request("atlas clusters list")
        .param(flags::PROJECT_ID, ctx.project_id(m)?);
    ctx.backend.execute(request).await
}

async fn by_name(action: &str, m: &ArgMatches, ctx: &mut Context) -> Result<(), CliError> {
    validate::cluster_name(&value(m, flags::NAME))?;
    validate::optional_object_id(&value(m, flags::PROJECT_ID))?;
    validate::credentials(&ctx.config)?;

    let request = ctx
        .request(&format!("atlas clusters {}", action))
        .param(flags::PROJECT_ID, ctx.project_id(m)?)
        .param_opt(flags::NAME, string(m, flags::NAME));
    ctx.backend.execute(request).await
}
