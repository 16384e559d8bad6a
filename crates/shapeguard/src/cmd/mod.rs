use clap::{ArgGroup, Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod routes;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a request body against a schema.
    Check(CheckArgs),
    /// List routes in a schema directory.
    Routes(RoutesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::Routes(args) => routes::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["schema", "schema_dir"])))]
pub struct CheckArgs {
    /// Schema file (JSON).
    #[arg(long, value_name = "FILE", conflicts_with_all = ["schema_dir", "route"])]
    pub schema: Option<PathBuf>,
    /// Directory of `<route>.schema.json` files.
    #[arg(long, value_name = "DIR", requires = "route")]
    pub schema_dir: Option<PathBuf>,
    /// Route to validate against (with --schema-dir).
    #[arg(long, requires = "schema_dir")]
    pub route: Option<String>,
    /// Request body file (JSON). Reads stdin when omitted.
    #[arg(long, value_name = "FILE")]
    pub body: Option<PathBuf>,
    /// Reject top-level fields the schema does not declare.
    #[arg(long)]
    pub strict: bool,
    /// Report errors without halting (exit 0).
    #[arg(long)]
    pub transfer: bool,
    /// Message catalog overrides (JSON object of key -> template).
    #[arg(long, value_name = "FILE")]
    pub locales: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Schema directory to load.
    pub dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
