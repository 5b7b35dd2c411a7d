use serde_json::json;

use crate::cli::config::open_gate;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::routes::{self, Navigation, RouteTable};

/// Print where a navigation request ends up
pub fn output_navigation(output_format: &OutputFormat, navigation: &Navigation) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(navigation)?);
        }
        OutputFormat::Text => match navigation {
            Navigation::Render(route) => println!("{} ({})", route.title, route.path),
            Navigation::Redirect { to, .. } => println!("→ redirected to {}", to),
        },
    }
    Ok(())
}

pub fn open(path: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let app = config();
    let mut gate = open_gate(app)?;
    let table = RouteTable::standard(&app.routes);

    let navigation = routes::navigate(&mut gate, &table, path)?;
    output_navigation(&output_format, &navigation)
}

pub fn menu(output_format: OutputFormat) -> anyhow::Result<()> {
    let app = config();
    let mut gate = open_gate(app)?;
    let table = RouteTable::standard(&app.routes);

    let entries = routes::menu(&mut gate, &table)?;
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "menu": entries }))?);
        }
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("Not logged in");
            }
            for route in entries {
                println!("{:<20} {}", route.title, route.path);
            }
        }
    }
    Ok(())
}
