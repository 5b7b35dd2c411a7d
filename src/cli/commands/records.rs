use chrono::NaiveDate;
use clap::Subcommand;

use crate::cli::commands::navigate::output_navigation;
use crate::cli::config::open_gate;
use crate::cli::utils::output_collection;
use crate::cli::OutputFormat;
use crate::client::{ApiClient, ApiError, Resource};
use crate::config::config;
use crate::routes::{self, Navigation, RouteTable};

#[derive(Subcommand)]
pub enum ListCommands {
    #[command(about = "List all records")]
    List,
}

#[derive(Subcommand)]
pub enum ReservationCommands {
    #[command(about = "List reservations")]
    List {
        #[arg(long, help = "Only reservations on this day (YYYY-MM-DD)")]
        date: Option<NaiveDate>,
    },
}

pub async fn handle_list(
    resource: Resource,
    cmd: ListCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ListCommands::List => fetch(resource, None, output_format).await,
    }
}

pub async fn handle_reservations(cmd: ReservationCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ReservationCommands::List { date } => {
            let date = date.map(|d| d.format("%Y-%m-%d").to_string());
            fetch(Resource::Reservations, date.as_deref(), output_format).await
        }
    }
}

/// Guard the resource's destination, then fetch it with the session token.
/// A redirect is reported the same way `open` reports it.
async fn fetch(resource: Resource, date: Option<&str>, output_format: OutputFormat) -> anyhow::Result<()> {
    let app = config();
    let mut gate = open_gate(app)?;
    let table = RouteTable::standard(&app.routes);

    let navigation = routes::navigate(&mut gate, &table, resource.route_path())?;
    if let Navigation::Redirect { .. } = navigation {
        return output_navigation(&output_format, &navigation);
    }

    let token = gate
        .state()
        .session()
        .map(|s| s.token().to_string())
        .ok_or(ApiError::NotAuthenticated)?;

    let client = ApiClient::new(&app.api)?;
    let items = client.list(resource, &token, date).await?;

    let name = resource.api_path().trim_start_matches("api/");
    output_collection(&output_format, name, &items)
}
