use std::io::{self, BufRead, Write};

use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{get_config_dir, open_gate, open_gate_for_reset};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::client::{submit_login, ApiClient};
use crate::config::config;
use crate::session::SessionState;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the shop server")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let app = config();

    match cmd {
        AuthCommands::Login { username, password } => {
            let mut gate = open_gate_for_reset(app)?;
            let client = ApiClient::new(&app.api)?;
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };

            let role = submit_login(&mut gate, &client, &username, &password).await?;

            output_success(
                &output_format,
                &format!("Logged in as {} ({})", username, role),
                Some(json!({ "username": username, "role": role })),
            )
        }
        AuthCommands::Logout => {
            let mut gate = open_gate_for_reset(app)?;
            gate.logout()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let mut gate = open_gate(app)?;
            let authenticated = gate.is_authenticated()?;
            let config_dir = get_config_dir(app)?;

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({
                        "authenticated": authenticated,
                        "state": gate.state().to_string(),
                        "role": gate.state().role(),
                        "server": app.api.base_url,
                        "config_dir": config_dir,
                    }))?);
                }
                OutputFormat::Text => {
                    match gate.state() {
                        SessionState::Authenticated(session) => {
                            println!("Logged in as {}", session.role());
                        }
                        _ => println!("Not logged in"),
                    }
                    println!("Server: {}", app.api.base_url);
                    println!("Config: {}", config_dir.display());
                }
            }
            Ok(())
        }
    }
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
