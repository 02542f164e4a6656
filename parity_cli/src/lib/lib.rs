//! Full CLI library for Parity
//!

#![deny(missing_docs)]

mod check;
mod cmd;
mod compare;
mod ids;
mod normalize;
mod source;

use anyhow::Result;
use clap::Parser;

use parity_core::{logging, CompareOptions};

use cmd::{ParityArgs, ParityCommand};

/// Main CLI entrypoint.
pub async fn cli() -> Result<()> {
    let args = ParityArgs::parse();
    logging::setup(args.log_level);

    match &args.command {
        ParityCommand::Compare {
            profile_ids,
            from,
            include_unchanged,
            format,
            project,
        } => {
            let options = CompareOptions {
                include_unchanged: *include_unchanged,
            };
            if from.is_empty() {
                compare::compare_live(profile_ids, options, *format, project).await?;
            } else {
                compare::compare_saved(from, options, *format)?;
            }
        }
        ParityCommand::Normalize {
            profile_ids,
            out,
            project,
        } => {
            normalize::normalize(profile_ids, out, project).await?;
        }
        ParityCommand::Check { project } => {
            check::check(project).await?;
        }
    }

    Ok(())
}
