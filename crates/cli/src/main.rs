//! Ngantri CLI - database migrations and queue management.
//!
//! # Usage
//!
//! ```bash
//! # Apply schema and session-store migrations
//! ngantri-cli migrate
//!
//! # Issue a ticket for today (e.g. from a kiosk script)
//! ngantri-cli queue issue
//!
//! # Show a day's queue (today by default)
//! ngantri-cli queue list --date 2024-06-01
//!
//! # Mark a ticket served, or put it back to waiting
//! ngantri-cli queue mark 5f0c7c1e-8a7e-4a43-9d55-0a1f1f0a6a11
//! ngantri-cli queue mark 5f0c7c1e-8a7e-4a43-9d55-0a1f1f0a6a11 waiting
//!
//! # Delete a day's tickets and restart its numbering, or everything with --all
//! ngantri-cli queue reset --date 2024-06-01
//! ```
//!
//! Configuration is read from the same environment variables as the server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ngantri_core::QueueStatus;

mod commands;

#[derive(Parser)]
#[command(name = "ngantri-cli")]
#[command(author, version, about = "Ngantri operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the daily queue
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },
}

#[derive(Subcommand)]
enum QueueAction {
    /// Issue the next number for today
    Issue,
    /// List a day's tickets
    List {
        /// Business date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Set a ticket's status
    Mark {
        /// Ticket id
        id: String,

        /// New status (`waiting` or `served`)
        #[arg(default_value_t = QueueStatus::Served)]
        status: QueueStatus,
    },
    /// Delete tickets and restart numbering
    Reset {
        /// Business date (YYYY-MM-DD), defaults to today
        #[arg(short, long, conflicts_with = "all")]
        date: Option<NaiveDate>,

        /// Delete every day's tickets
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Queue { action } => match action {
            QueueAction::Issue => commands::queue::issue().await?,
            QueueAction::List { date } => commands::queue::list(date).await?,
            QueueAction::Mark { id, status } => commands::queue::mark(&id, status).await?,
            QueueAction::Reset { date, all } => commands::queue::reset(date, all).await?,
        },
    }
    Ok(())
}
