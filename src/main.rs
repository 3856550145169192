use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use corkboard::app::AppContext;
use corkboard::cli::{commands, Cli, Commands};
use corkboard::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config, cli.db)?;

    match cli.command {
        Commands::Sync => {
            commands::sync(&ctx).await?;
        }
        Commands::List => {
            commands::list(&ctx)?;
        }
        Commands::Add {
            user_id,
            title,
            body,
        } => {
            commands::add(&ctx, user_id, title, body)?;
        }
        Commands::Remove { id } => {
            commands::remove(&ctx, id)?;
        }
        Commands::Tui => {
            corkboard::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
