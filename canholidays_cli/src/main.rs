mod commands;
mod output;

use anyhow::Result;
use canholidays_lib::Config;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "canholidays")]
#[command(about = "Canadian public holidays by year and province")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Override the holiday API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one province's holidays for a year
    List(commands::list::ListArgs),
    /// List province and territory codes
    Provinces,
    /// Interactive mode: type years and switch provinces
    Watch(commands::watch::WatchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("canholidays=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    tracing::debug!("Using holiday API at {}", config.base_url);

    match &cli.command {
        Commands::List(args) => commands::list::run(args, &config, format).await?,
        Commands::Provinces => commands::provinces::run(format)?,
        Commands::Watch(args) => commands::watch::run(args, &config, format).await?,
    }

    Ok(())
}
