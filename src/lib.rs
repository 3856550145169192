//! # Corkboard
//!
//! A cached posts manager for the terminal: fetches a post collection from
//! a remote REST endpoint, mirrors it into a local SQLite cache, and serves
//! a searchable, editable table UI.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → SyncEngine → Store → TUI
//! ```
//!
//! - [`fetcher`]: HTTP client decoding the remote JSON collection
//! - [`sync`]: snapshot comparison and full-overwrite cache refresh
//! - [`store`]: SQLite persistence layer
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Refresh the cache from the remote source
//! corkboard sync
//!
//! # List cached posts
//! corkboard list
//!
//! # Launch the TUI
//! corkboard tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// store, fetcher, sync engine.
pub mod app;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `sync` - Refresh the cache from the remote source
/// - `list` - List cached posts
/// - `add` / `remove` - Edit the cache by hand
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/corkboard/config.toml`: remote endpoint, client
/// timeout, sync cadence.
pub mod config;

/// Core domain models.
///
/// - [`Post`](domain::Post): a cached post record
/// - [`NewPost`](domain::NewPost): a locally authored post awaiting an id
/// - [`Snapshot`](domain::Snapshot): the last-fetched collection
pub mod domain;

/// HTTP fetching of the remote post collection.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait, mockable in tests
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// Cache synchronization.
///
/// [`SyncEngine`](sync::SyncEngine) fetches the remote collection, compares
/// it against the last-seen snapshot, and overwrites the store when it
/// differs. At most one sync runs at a time.
pub mod sync;

/// Terminal user interface.
///
/// Search box, posts table, download gauge, status bar, and a modal add
/// dialog. A periodic timer drives background syncs through the same
/// engine as the manual download key.
pub mod tui;
