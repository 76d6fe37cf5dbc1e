use crate::env::RenderFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "moltbot-env",
    version,
    about = "Resolve worker bindings into the moltbot container environment"
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved container environment.
    Build(BuildOpts),
    /// Report problems with the worker environment.
    Check(CheckOpts),
    /// Run a command with the resolved container environment applied.
    Exec(ExecOpts),
    Version,
}

#[derive(clap::Args)]
pub struct BuildOpts {
    #[arg(short, long, env = "MOLTBOT_ENV_FILE")]
    pub config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = RenderFormat::Dotenv)]
    pub format: RenderFormat,
    /// Mask credential values.
    #[arg(long)]
    pub redact: bool,
}

#[derive(clap::Args)]
pub struct CheckOpts {
    #[arg(short, long, env = "MOLTBOT_ENV_FILE")]
    pub config: Option<PathBuf>,
    /// Print diagnostics as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct ExecOpts {
    #[arg(short, long, env = "MOLTBOT_ENV_FILE")]
    pub config: Option<PathBuf>,
    /// Start from an empty environment instead of the inherited one.
    #[arg(long)]
    pub clean: bool,
    /// Program and arguments, after `--`.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
