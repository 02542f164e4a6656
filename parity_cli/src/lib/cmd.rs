//! Commands for Parity CLI
//!

use std::path::PathBuf;

use clap::{self, Args, Parser, Subcommand, ValueEnum};

use parity_core::logging::LevelFilter;

/// Parity: compare Salesforce profile permissions side by side
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
pub(crate) struct ParityArgs {
    #[clap(subcommand)]
    pub(crate) command: ParityCommand,
    #[clap(global = true, short = 'v', long)]
    pub(crate) log_level: Option<LevelFilter>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ParityCommand {
    /// Compare the permissions of two or more profiles
    Compare {
        /// Profile IDs (2 to 10)
        #[clap(required_unless_present = "from", conflicts_with = "from")]
        profile_ids: Vec<String>,
        /// Compare saved normalized profiles instead of fetching
        #[clap(long, num_args = 1..)]
        from: Vec<PathBuf>,
        /// Also list permissions that are identical across profiles
        #[clap(long, value_parser, default_value = "false")]
        include_unchanged: bool,
        /// Output format
        #[clap(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
        #[clap(flatten)]
        project: ProjectArgs,
    },
    /// Fetch profiles and print their normalized documents as JSON
    Normalize {
        /// Profile IDs (1 to 10)
        #[clap(required = true)]
        profile_ids: Vec<String>,
        /// Write the documents to this file instead of stdout
        #[clap(short, long)]
        out: Option<PathBuf>,
        #[clap(flatten)]
        project: ProjectArgs,
    },
    /// Check the connection to the org
    Check {
        #[clap(flatten)]
        project: ProjectArgs,
    },
}

/// Where to find the project config and credentials
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ProjectArgs {
    /// Path to the project config
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Path to the connector credentials
    #[clap(long)]
    pub(crate) credentials: Option<PathBuf>,
    /// Name of the connector entry in the credentials file
    #[clap(long, default_value = "salesforce")]
    pub(crate) connector: String,
}

/// How comparison results are printed
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Colored, grouped by category
    Text,
    /// The full comparison result as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_parses_ids_and_flags() {
        let args = ParityArgs::try_parse_from([
            "parity",
            "compare",
            "00e000000000001",
            "00e000000000002",
            "--include-unchanged",
            "--format",
            "json",
            "-v",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.log_level, Some(LevelFilter::DEBUG));
        match args.command {
            ParityCommand::Compare {
                profile_ids,
                include_unchanged,
                format,
                project,
                ..
            } => {
                assert_eq!(profile_ids.len(), 2);
                assert!(include_unchanged);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(project.connector, "salesforce");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn compare_from_files_needs_no_ids() {
        let args =
            ParityArgs::try_parse_from(["parity", "compare", "--from", "a.json", "b.json"]).unwrap();

        match args.command {
            ParityCommand::Compare {
                profile_ids, from, ..
            } => {
                assert!(profile_ids.is_empty());
                assert_eq!(from.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn compare_without_input_fails() {
        assert!(ParityArgs::try_parse_from(["parity", "compare"]).is_err());
    }

    #[test]
    fn normalize_takes_an_output_file() {
        let args = ParityArgs::try_parse_from([
            "parity",
            "normalize",
            "00e000000000001",
            "--out",
            "profiles.json",
            "--credentials",
            "creds.yaml",
        ])
        .unwrap();

        match args.command {
            ParityCommand::Normalize {
                out, project, ..
            } => {
                assert_eq!(out, Some(PathBuf::from("profiles.json")));
                assert_eq!(project.credentials, Some(PathBuf::from("creds.yaml")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
