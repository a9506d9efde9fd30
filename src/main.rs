//! Workspace directory initializer entrypoint.

mod error;
mod initializer;
mod logging;
mod paths;
mod profile;

use anyhow::Result;
use clap::Parser;
use std::ffi::OsString;
use std::iter;
use tracing::{debug, error};

use crate::error::InitError;
use crate::initializer::Initializer;
use crate::profile::resolve_profile;

/// CLI arguments: every argument is a directory to create.
#[derive(Parser, Debug)]
#[command(
    name = "workspace-init",
    about = "Create directories that are relative or under the workspace root",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Directories to create; absolute paths outside the workspace root are skipped
    #[arg(value_name = "PATH")]
    paths: Vec<OsString>,
}

impl Args {
    /// Parse process arguments so that every one of them, including `--`
    /// and hyphen-leading values, is read as a path.
    fn parse_literal() -> Self {
        Self::parse_literal_from(std::env::args_os())
    }

    fn parse_literal_from<I>(argv: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .unwrap_or_else(|| OsString::from("workspace-init"));
        Self::parse_from(
            iter::once(program)
                .chain(iter::once(OsString::from("--")))
                .chain(argv),
        )
    }
}

fn main() {
    let args = Args::parse_literal();
    logging::init_logging();

    if let Err(err) = run(args) {
        let code = err
            .downcast_ref::<InitError>()
            .map_or(1, InitError::exit_code);
        error!("{err}");
        std::process::exit(code);
    }
}

/// Materialize every sanctioned path, stopping at the first failure.
fn run(args: Args) -> Result<()> {
    let profile = resolve_profile();
    debug!(root = %profile.workspace_root, style = ?profile.style, "resolved platform profile");

    let report = Initializer::new(profile).run(args.paths)?;
    debug!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        "workspace initialized"
    );
    Ok(())
}
