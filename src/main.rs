use clap::Parser;
use moltbot_env::cli::{Cli, Commands};
use moltbot_env::config::{validate_worker_env, Severity, WorkerEnv};
use moltbot_env::env::{build_env_vars, render_env_vars};
use moltbot_env::infra::launch::run_with_env;
use moltbot_env::logging;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match cli.command {
        Commands::Build(opts) => {
            let env = WorkerEnv::load(opts.config.as_deref())?;
            for diagnostic in validate_worker_env(&env) {
                warn!("{diagnostic}");
            }
            let vars = build_env_vars(&env);
            info!(count = vars.len(), "Resolved container environment");
            print!("{}", render_env_vars(&vars, opts.format, opts.redact)?);
        }
        Commands::Check(opts) => {
            let env = WorkerEnv::load(opts.config.as_deref())?;
            let diagnostics = validate_worker_env(&env);
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&diagnostics)?);
            } else if diagnostics.is_empty() {
                println!("Worker environment looks good");
            } else {
                for diagnostic in &diagnostics {
                    println!("{diagnostic}");
                }
            }
            if diagnostics.iter().any(|d| d.severity == Severity::Error) {
                std::process::exit(1);
            }
        }
        Commands::Exec(opts) => {
            let env = WorkerEnv::load(opts.config.as_deref())?;
            let vars = build_env_vars(&env);
            let (program, args) = opts
                .command
                .split_first()
                .ok_or_else(|| anyhow::anyhow!("No command given"))?;
            let code = run_with_env(program, args, &vars, opts.clean).await?;
            std::process::exit(code);
        }
        Commands::Version => {
            println!("moltbot-env {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
