use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use wolfbot::channels::CliChannel;
use wolfbot::config::BotConfig;
use wolfbot::handler::{self, CommandHandler};
use wolfbot::setup::setup_role_pool;
use wolfbot::store::{LibSqlBackend, RoleStore};

#[derive(Parser)]
#[command(name = "wolfbot", version, about = "Werewolf game bot")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Answer game commands typed on stdin (default).
    Run,
    /// Recreate the role pool table and seed it.
    Setup,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = BotConfig::from_env().context("reading WOLFBOT_* configuration")?;

    let store = LibSqlBackend::new_local(&config.db_path)
        .await
        .with_context(|| format!("opening database at {}", config.db_path.display()))?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Setup => {
            setup_role_pool(&store).await.context("seeding role pool")?;
            eprintln!("Role pool ready in {}", config.db_path.display());
            store.close();
        }
        Command::Run => {
            let interpreter = config.interpreter().context("loading lookup tables")?;
            eprintln!("🐺 wolfbot v{}", env!("CARGO_PKG_VERSION"));
            eprintln!("   Prefix: {}", interpreter.prefix());
            eprintln!("   Database: {}", config.db_path.display());
            eprintln!("   Mention players as <@id>. Ctrl-D to exit.\n");

            let store: Arc<dyn RoleStore> = Arc::new(store);
            let handler = CommandHandler::new(interpreter, store);
            handler::run(&handler, &CliChannel::new()).await?;
        }
    }

    Ok(())
}
