//! Wealthtrack CLI - portfolio tracking against a Wealthtrack backend.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password may also come from WT_PASSWORD)
//! wealthtrack login jane@example.com --password secret
//!
//! # Portfolio overview with analytics
//! wealthtrack dashboard
//!
//! # Track a new position
//! wealthtrack assets add BTC --name Bitcoin --type crypto --quantity 0.5 --price 30000
//!
//! # Machine-readable output
//! wealthtrack --format json assets list
//! ```

use clap::Parser;

mod cli;
mod commands;
mod config;
mod main_lib;
mod output;

use cli::{Cli, Commands};
use config::Config;
use main_lib::{build_state, init_tracing, AppState};
use wealthtrack_core::session::SessionServiceTrait;
use wealthtrack_core::PortfolioServiceTrait;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config =
        Config::from_env()?.with_overrides(cli.api_url.clone(), cli.session_file.clone());
    init_tracing(config.log_format);

    let state = build_state(&config)?;
    let format = cli.format;
    let signs_in = cli.command.signs_in();

    let result = match cli.command {
        Commands::Register(args) => commands::auth::register(&state, args, format).await,
        Commands::Login(args) => commands::auth::login(&state, args, format).await,
        Commands::Logout => commands::auth::logout(&state, format),
        Commands::Profile => commands::auth::profile(&state, format).await,
        Commands::Dashboard => commands::dashboard::execute(&state, format).await,
        Commands::Assets(command) => commands::assets::execute(&state, command, format).await,
        Commands::Price(args) => commands::price::execute(&state, args, format).await,
    };

    if let Err(err) = &result {
        match auth_failure(err, signs_in) {
            Some(AuthFailure::BadCredentials) => {
                output::print_error("Invalid email or password.");
                std::process::exit(1);
            }
            Some(AuthFailure::SessionExpired) => {
                forget_session(&state);
                output::print_error("Session expired or missing. Run `wealthtrack login` first.");
                std::process::exit(2);
            }
            None => {}
        }
    }
    result
}

#[derive(Debug, PartialEq, Eq)]
enum AuthFailure {
    /// Login or registration was rejected; any stored session stays.
    BadCredentials,
    SessionExpired,
}

fn auth_failure(err: &anyhow::Error, signs_in: bool) -> Option<AuthFailure> {
    let unauthorized = err
        .downcast_ref::<wealthtrack_core::Error>()
        .is_some_and(wealthtrack_core::Error::is_unauthorized);
    match (unauthorized, signs_in) {
        (false, _) => None,
        (true, true) => Some(AuthFailure::BadCredentials),
        (true, false) => Some(AuthFailure::SessionExpired),
    }
}

fn forget_session(state: &AppState) {
    state.portfolio_service.clear();
    if let Err(e) = state.session_service.logout() {
        tracing::warn!("Failed to clear stored session: {}", e);
    }
}
