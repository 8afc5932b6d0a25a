//! Account commands: register, login, logout and profile.

use anyhow::Result;
use clap::Args;

use wealthtrack_core::session::SessionServiceTrait;
use wealthtrack_core::users::User;
use wealthtrack_core::PortfolioServiceTrait;

use crate::cli::OutputFormat;
use crate::main_lib::AppState;
use crate::output::{print_info, print_json, print_success, print_table, KeyValue};

/// Arguments for the register command.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password (at least 6 characters)
    #[arg(short, long, env = "WT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address
    pub email: String,

    /// Password
    #[arg(short, long, env = "WT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn register(state: &AppState, args: RegisterArgs, format: OutputFormat) -> Result<()> {
    let user = state
        .session_service
        .register(&args.name, &args.email, &args.password)
        .await?;
    print_user(&user, format, "Account created")
}

pub async fn login(state: &AppState, args: LoginArgs, format: OutputFormat) -> Result<()> {
    let user = state
        .session_service
        .login(&args.email, &args.password)
        .await?;
    print_user(&user, format, "Signed in")
}

pub fn logout(state: &AppState, format: OutputFormat) -> Result<()> {
    let was_signed_in = state.session_service.is_authenticated()?;
    state.session_service.logout()?;
    state.portfolio_service.clear();

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "signedOut": was_signed_in })),
        OutputFormat::Table => {
            if was_signed_in {
                print_success("Signed out");
            } else {
                print_info("No active session");
            }
            Ok(())
        }
    }
}

pub async fn profile(state: &AppState, format: OutputFormat) -> Result<()> {
    let user = state.session_service.refresh_profile().await?;
    match format {
        OutputFormat::Json => print_json(&user),
        OutputFormat::Table => {
            print_table(&user_rows(&user));
            Ok(())
        }
    }
}

fn print_user(user: &User, format: OutputFormat, verb: &str) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(user),
        OutputFormat::Table => {
            print_success(&format!("{} as {} <{}>", verb, user.name, user.email));
            Ok(())
        }
    }
}

fn user_rows(user: &User) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Name", user.name.clone()),
        KeyValue::new("Email", user.email.clone()),
        KeyValue::new("Id", user.id.clone()),
    ];
    if let Some(created_at) = user.created_at {
        rows.push(KeyValue::new(
            "Member since",
            created_at.format("%Y-%m-%d").to_string(),
        ));
    }
    rows
}
