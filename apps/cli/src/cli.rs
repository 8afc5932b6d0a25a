//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AddAssetArgs, LoginArgs, PriceArgs, RegisterArgs};

/// Wealthtrack - portfolio tracking from the terminal
#[derive(Parser)]
#[command(name = "wealthtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Backend base URL (overrides WT_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file location (overrides WT_SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign in with email and password
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Profile,

    /// Portfolio totals, holdings and analytics
    Dashboard,

    /// Manage tracked assets
    #[command(subcommand)]
    Assets(AssetCommands),

    /// Look up the current price of a symbol
    Price(PriceArgs),
}

impl Commands {
    /// True for commands that establish a session rather than use one.
    pub fn signs_in(&self) -> bool {
        matches!(self, Commands::Login(_) | Commands::Register(_))
    }
}

#[derive(Subcommand)]
pub enum AssetCommands {
    /// List all assets
    List,

    /// Show one asset with its current valuation
    Show {
        /// Asset id
        id: String,
    },

    /// Add an asset
    Add(AddAssetArgs),

    /// Delete an asset
    Delete {
        /// Asset id
        id: String,
    },
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
