//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "gamestore")]
#[command(about = "Browse and maintain the federated game catalog", long_about = None)]
pub(crate) struct Cli {
    /// Primary SQLite database (overrides settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Legacy document snapshot, YAML (overrides settings.toml)
    #[arg(long, global = true)]
    pub legacy: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter, sort and paging flags for `games`.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct GameListArgs {
    /// Case-sensitive name fragment
    #[arg(short, long)]
    pub name: Option<String>,

    /// Genre ids (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub genre: Vec<Uuid>,

    /// Platform ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub platform: Vec<Uuid>,

    /// Publisher id
    #[arg(long)]
    pub publisher: Option<Uuid>,

    /// Minimum price (inclusive)
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price (inclusive)
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Recency bucket: last-week, last-month, last-year, 2-years, 3-years
    #[arg(long)]
    pub published_within: Option<String>,

    /// Sort mode: most-popular, most-commented, price-asc, price-desc, new
    #[arg(short, long)]
    pub sort: Option<String>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size: a positive number or "all"
    #[arg(long)]
    pub page_size: Option<String>,

    /// Include soft-deleted games
    #[arg(long)]
    pub show_deleted: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List games from both stores
    Games {
        #[command(flatten)]
        args: GameListArgs,
    },

    /// Show one game by key
    Game {
        key: String,

        /// Include a soft-deleted game
        #[arg(long)]
        show_deleted: bool,
    },

    /// List genres
    Genres,

    /// List publishers
    Publishers,

    /// List orders, newest first
    Orders,

    /// Show comments on a game
    Comments { key: String },

    /// Comment on a game (migrates legacy-only games)
    Comment {
        key: String,

        #[arg(short, long)]
        author: String,

        #[arg(short, long)]
        body: String,
    },

    /// Copy legacy games into the primary store
    Migrate {
        /// Game key to migrate
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        key: Option<String>,

        /// Migrate every legacy game
        #[arg(long)]
        all: bool,
    },

    /// Record one view of a game
    View { key: String },

    /// Adjust units in stock by a (possibly negative) delta
    Stock {
        key: String,

        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Soft-delete a game (migrates legacy-only games first)
    Delete { key: String },

    /// Count games across both stores
    Stats,

    /// Show or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    /// Commands that can change legacy documents or their change log.
    pub(crate) fn mutates_legacy(&self) -> bool {
        matches!(self, Commands::View { .. } | Commands::Stock { .. })
    }
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings
    Show,
    /// Print the settings file path
    Path,
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
