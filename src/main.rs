use clap::Parser;

use stencil::cli::{self, Cli, Commands};
use stencil::config::Environment;
use stencil::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The --env flag must take effect before the config loader picks the
    // environment-specific file.
    if let Some(env) = &cli.env {
        let env: Environment = env.clone().into();
        unsafe {
            std::env::set_var(Environment::ENV_VAR, env.as_str());
        }
    }

    let settings = cli::load_and_merge_config(&cli)?;

    cli::init_logger_from_settings(&settings)?;

    cli::execute_command(&cli, settings.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Command failed: {}", e))?;

    // Dry runs and migrations have already completed inside the executor.
    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) | Some(Commands::Migrate { .. }) => Ok(()),
        Some(Commands::Serve { .. }) | None => Server::new(settings).run().await,
    }
}
