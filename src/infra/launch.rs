//! Launch the downstream command with a resolved container environment.

use crate::config::CLEAN_ENV_KEEP;
use crate::env::{keys, EnvVars};
use std::ffi::OsString;
use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, info};

/// Environment variable names that must never be passed to child processes.
/// These can be used for code injection, credential theft, or privilege escalation.
const DANGEROUS_ENV_VARS: &[&str] = &[
    "NODE_OPTIONS",
    "BASH_ENV",
    "SHELLOPTS",
    "PS4",
    "SSLKEYLOGFILE",
    "ENV",
    "PROMPT_COMMAND",
    "PERL5OPT",
    "PERL5LIB",
    "RUBYOPT",
    "PYTHONSTARTUP",
    "PYTHONPATH",
    "NODE_PATH",
    "CDPATH",
    "GLOBIGNORE",
];

/// Environment variable prefixes that indicate dangerous variables.
const DANGEROUS_ENV_PREFIXES: &[&str] = &["DYLD_", "LD_", "BASH_FUNC_"];

/// Check if an inherited variable must be dropped before launch.
fn is_dangerous_env_var(name: &str) -> bool {
    DANGEROUS_ENV_VARS.contains(&name)
        || DANGEROUS_ENV_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

/// Build the command for `program args` with `vars` applied.
///
/// Inherited variables pass through unless dangerous or managed by the
/// resolver; with `clean` only [`CLEAN_ENV_KEEP`] survives. The child sees
/// exactly `vars` for every name the resolver reads or writes.
pub fn build_command(program: &str, args: &[String], vars: &EnvVars, clean: bool) -> Command {
    build_command_from(program, args, vars, clean, std::env::vars_os())
}

fn build_command_from<I>(
    program: &str,
    args: &[String],
    vars: &EnvVars,
    clean: bool,
    parent: I,
) -> Command
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);

    cmd.env_clear();
    for (key, value) in parent {
        let Some(name) = key.to_str() else { continue };
        let keep = if clean {
            CLEAN_ENV_KEEP.contains(&name)
        } else {
            !is_dangerous_env_var(name) && !keys::is_managed(name)
        };
        if keep {
            cmd.env(&key, &value);
        }
    }

    cmd.envs(vars);
    cmd
}

/// Run `program args` to completion and return its exit code.
///
/// A child terminated by a signal reports `128 + signal` on Unix.
pub async fn run_with_env(
    program: &str,
    args: &[String],
    vars: &EnvVars,
    clean: bool,
) -> Result<i32> {
    info!(program, vars = vars.len(), clean, "launching with container environment");
    let status = build_command(program, args, vars, clean)
        .status()
        .await
        .with_context(|| format!("Failed to launch '{program}'"))?;
    debug!(?status, "child exited");

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Ok(128 + signal);
        }
    }
    Ok(status.code().unwrap_or(1))
}
