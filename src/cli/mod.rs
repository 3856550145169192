pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "corkboard")]
#[command(about = "A cached posts manager for the terminal", long_about = None)]
pub struct Cli {
    /// Path to the SQLite database (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub db: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch posts from the remote source and refresh the local cache
    Sync,
    /// List cached posts
    List,
    /// Add a post to the local cache
    Add {
        /// Author id for the new post
        #[arg(long)]
        user_id: i64,

        /// Post title
        #[arg(long)]
        title: String,

        /// Post body
        #[arg(long)]
        body: String,
    },
    /// Remove a cached post by id
    Remove {
        /// Id of the post to remove
        id: i64,
    },
    /// Launch the TUI
    Tui,
}
