//! Assembles the command tree for one invocation.
//!
//! Building the `atlas` group is comparatively slow: its cluster flags are
//! generated from the provider catalog. The tree is therefore assembled from
//! the first argument, and `atlas` is only attached when the invocation can
//! reach it.

use super::{atlas, completion, config, flags, iam, opsmanager};
use crate::config::TOOL_NAME;
use clap::{Arg, ArgAction, Command};
use tracing::debug;

/// Top-level command groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Config,
    Atlas,
    OpsManager,
    Iam,
    Completion,
}

impl Group {
    pub fn name(self) -> &'static str {
        match self {
            Group::Config => config::USE,
            Group::Atlas => atlas::USE,
            Group::OpsManager => opsmanager::USE,
            Group::Iam => iam::USE,
            Group::Completion => completion::USE,
        }
    }

    fn command(self) -> Command {
        match self {
            Group::Config => config::builder(),
            Group::Atlas => atlas::builder(),
            Group::OpsManager => opsmanager::builder(),
            Group::Iam => iam::builder(),
            Group::Completion => completion::builder(),
        }
    }
}

/// What to attach to the root command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembly {
    /// `--version` only: a bare root with no subcommands.
    VersionOnly,
    Groups(Vec<Group>),
}

impl Assembly {
    pub fn includes(&self, group: Group) -> bool {
        match self {
            Assembly::VersionOnly => false,
            Assembly::Groups(groups) => groups.contains(&group),
        }
    }
}

/// First arguments that need the `atlas` group in the tree.
const ATLAS_TRIGGERS: [&str; 6] = [
    atlas::USE,
    "help",
    "--help",
    "-h",
    completion::USE,
    "__complete",
];

/// Decides which groups to register, from the arguments alone.
pub fn select_groups<S: AsRef<str>>(args: &[S]) -> Assembly {
    let first = args.first().map(AsRef::as_ref);

    if matches!(first, Some("--version") | Some("-v")) {
        return Assembly::VersionOnly;
    }

    let with_atlas = match first {
        None => true,
        Some(arg) => ATLAS_TRIGGERS.contains(&arg),
    };

    let mut groups = vec![Group::Config];
    if with_atlas {
        groups.push(Group::Atlas);
    }
    groups.extend([Group::OpsManager, Group::Iam, Group::Completion]);
    Assembly::Groups(groups)
}

/// Materializes the selected groups under the root command.
pub fn build(assembly: &Assembly) -> Command {
    debug!(?assembly, "assembling command tree");
    let root = root();

    match assembly {
        Assembly::VersionOnly => root,
        Assembly::Groups(groups) => groups
            .iter()
            .fold(root, |root, group| {
                debug!(group = group.name(), "attaching group");
                root.subcommand(group.command())
            }),
    }
}

/// `select_groups` followed by `build`.
pub fn builder<S: AsRef<str>>(args: &[S]) -> Command {
    build(&select_groups(args))
}

fn root() -> Command {
    Command::new(TOOL_NAME)
        .about("CLI tool to manage your MongoDB Cloud")
        .long_about(format!(
            "Use {} command help for information on a specific command",
            TOOL_NAME
        ))
        .after_help(format!(
            "Display the help menu for the config command\n  $ {} config --help",
            TOOL_NAME
        ))
        .disable_version_flag(true)
        .arg(
            Arg::new(flags::VERSION)
                .long(flags::VERSION)
                .short(flags::VERSION_SHORT)
                .help(flags::usage::VERSION)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(flags::PROFILE)
                .long(flags::PROFILE)
                .short(flags::PROFILE_SHORT)
                .help(flags::usage::PROFILE)
                .global(true)
                .num_args(1),
        )
        .arg(
            Arg::new(flags::DEBUG)
                .long(flags::DEBUG)
                .help(flags::usage::DEBUG)
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_subcommand(cmd: &Command, name: &str) -> bool {
        cmd.get_subcommands().any(|c| c.get_name() == name)
    }

    #[test]
    fn test_select_groups_decision_table() {
        let with_atlas: Vec<Vec<&str>> = vec![
            vec![],
            vec!["atlas"],
            vec!["help"],
            vec!["--help"],
            vec!["-h"],
            vec!["completion", "bash"],
            vec!["__complete"],
        ];
        for args in &with_atlas {
            assert!(
                select_groups(args.as_slice()).includes(Group::Atlas),
                "atlas expected for {:?}",
                args
            );
        }

        let without_atlas: Vec<Vec<&str>> = vec![
            vec!["somethingelse"],
            vec!["iam", "projects"],
            vec!["config"],
            vec!["--profile", "atlas"],
        ];
        for args in &without_atlas {
            let assembly = select_groups(args.as_slice());
            assert!(!assembly.includes(Group::Atlas), "no atlas for {:?}", args);
            assert!(assembly.includes(Group::Config));
            assert!(assembly.includes(Group::OpsManager));
            assert!(assembly.includes(Group::Iam));
            assert!(assembly.includes(Group::Completion));
        }
    }

    #[test]
    fn test_select_groups_version() {
        assert_eq!(select_groups(&["--version"]), Assembly::VersionOnly);
        assert_eq!(select_groups(&["-v"]), Assembly::VersionOnly);
        // Only the first argument is inspected
        assert_ne!(select_groups(&["iam", "--version"]), Assembly::VersionOnly);
    }

    #[test]
    fn test_group_names_match_commands() {
        let groups = [
            Group::Config,
            Group::Atlas,
            Group::OpsManager,
            Group::Iam,
            Group::Completion,
        ];
        for group in groups {
            assert_eq!(group.command().get_name(), group.name());
        }
    }

    #[test]
    fn test_empty_args_include_atlas() {
        let empty: [String; 0] = [];
        let cmd = builder(&empty);
        assert!(has_subcommand(&cmd, atlas::USE));
        assert!(has_subcommand(&cmd, config::USE));
        assert!(has_subcommand(&cmd, completion::USE));
    }

    #[test]
    fn test_unrelated_command_skips_atlas() {
        let cmd = builder(&["somethingelse"]);
        assert!(!has_subcommand(&cmd, atlas::USE));
        assert!(has_subcommand(&cmd, opsmanager::USE));
        assert!(has_subcommand(&cmd, iam::USE));
    }

    #[test]
    fn test_version_root_has_no_children() {
        let cmd = builder(&["--version"]);
        assert_eq!(cmd.get_subcommands().count(), 0);
    }

    #[test]
    fn test_full_tree_is_consistent() {
        let empty: [&str; 0] = [];
        builder(&empty).debug_assert();
        builder(&["--version"]).debug_assert();
    }
}
