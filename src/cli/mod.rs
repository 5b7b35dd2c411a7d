pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "massage-admin")]
#[command(about = "Massage shop admin - staff login and guarded access to shop records")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, conflicts_with = "json", help = "Output in human-readable text format (default)")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Check where navigating to a path would land")]
    Open {
        #[arg(help = "Destination path, e.g. /customers")]
        path: String,
    },

    #[command(about = "List destinations available to the current session")]
    Menu,

    #[command(about = "Customer records (admin)")]
    Customers {
        #[command(subcommand)]
        cmd: commands::records::ListCommands,
    },

    #[command(about = "Therapist records (admin)")]
    Therapists {
        #[command(subcommand)]
        cmd: commands::records::ListCommands,
    },

    #[command(about = "Customer management records (admin)")]
    Records {
        #[command(subcommand)]
        cmd: commands::records::ListCommands,
    },

    #[command(about = "Reservations")]
    Reservations {
        #[command(subcommand)]
        cmd: commands::records::ReservationCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    use crate::client::Resource;

    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Open { path } => commands::navigate::open(&path, output_format),
        Commands::Menu => commands::navigate::menu(output_format),
        Commands::Customers { cmd } => {
            commands::records::handle_list(Resource::Customers, cmd, output_format).await
        }
        Commands::Therapists { cmd } => {
            commands::records::handle_list(Resource::Therapists, cmd, output_format).await
        }
        Commands::Records { cmd } => {
            commands::records::handle_list(Resource::ManagementRecords, cmd, output_format).await
        }
        Commands::Reservations { cmd } => commands::records::handle_reservations(cmd, output_format).await,
    }
}
