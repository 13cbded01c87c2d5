//! `users` — command-line front end for the user-record API.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`Config`] from environment variables.
//! 3. Initialise logging to stderr.
//! 4. Ask for confirmation before a delete, unless `--yes` was given.
//! 5. Execute the action and print the resulting screen.

mod config;
mod telemetry;

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::protocol::UserPayload;
use users_client::{
    app::{self, Action, Screen},
    prompt::{self, DELETE_PROMPT},
    render::Notification,
    UserClient,
};

/// Manage user records stored encrypted by the API
#[derive(Parser)]
#[command(name = "users")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the API (overrides API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every user as stored (encrypted fields)
    List,
    /// Show one user with decrypted fields
    Get {
        id: i64,
    },
    /// Create a user
    Create {
        #[arg(allow_hyphen_values = true)]
        user_name: String,
        #[arg(allow_hyphen_values = true)]
        password: String,
    },
    /// Overwrite both fields of a user
    Edit {
        id: i64,
        #[arg(allow_hyphen_values = true)]
        user_name: String,
        #[arg(allow_hyphen_values = true)]
        password: String,
    },
    /// Delete a user after confirmation
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl From<Commands> for Action {
    fn from(command: Commands) -> Self {
        match command {
            Commands::List => Action::List,
            Commands::Get { id } => Action::Show(id),
            Commands::Create {
                user_name,
                password,
            } => Action::Create(UserPayload::new(user_name, password)),
            Commands::Edit {
                id,
                user_name,
                password,
            } => Action::Edit(id, UserPayload::new(user_name, password)),
            Commands::Delete { id, .. } => Action::Delete(id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let cfg = config::Config::from_env(cli.api).map_err(|e| {
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;
    telemetry::init(&cfg.log_level)?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.request_timeout_secs))
        .build()
        .context("failed to build HTTP client")?;
    let client = UserClient::with_http(http, &cfg.api_base_url);

    let screen = if needs_confirmation(&cli.command)
        && !prompt::confirm(DELETE_PROMPT, io::stdin().lock(), io::stderr())?
    {
        Screen::cancelled()
    } else {
        app::execute(&client, cli.command.into()).await
    };

    for notification in &screen.notifications {
        match notification {
            Notification::Success(_) => println!("{notification}"),
            Notification::Warning(_) | Notification::Error(_) => eprintln!("{notification}"),
        }
    }
    if let Some(body) = &screen.body {
        print!("{body}");
    }

    Ok(if screen.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn needs_confirmation(command: &Commands) -> bool {
    matches!(command, Commands::Delete { yes: false, .. })
}
