use clap::Parser;
use massage_admin::cli::{utils::report_error, Cli, OutputFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so MASSAGE_API_URL and friends apply before config is read
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = massage_admin::cli::run(cli).await {
        report_error(&output_format, &e)?;
        std::process::exit(1);
    }

    Ok(())
}
