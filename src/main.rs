use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};

use meetup_map::apis::DirectoryClient;
use meetup_map::app::PresentationService;
use meetup_map::config::Config;
use meetup_map::constants::DEFAULT_RADIUS;
use meetup_map::map::project;
use meetup_map::server::{start_server, AppState};
use meetup_map::{logging, metrics};

#[derive(Parser)]
#[command(name = "meetup_map")]
#[command(about = "Find meetup groups near a zip code and show them on a map")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web page
    Serve {
        /// Port to listen on (defaults to server.port from config.toml)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Search once and print the groups found
    Search {
        /// Zip code to search around
        location: String,
        /// Search radius in miles
        #[arg(long, default_value_t = DEFAULT_RADIUS)]
        radius: u32,
        /// Print the map projection as JSON instead of the listing
        #[arg(long)]
        json: bool,
    },
}

async fn run_search(config: &Config, location: &str, radius: u32, json: bool) -> anyhow::Result<()> {
    config.require_api_key()?;
    let client = DirectoryClient::new(&config.directory)?;
    let presenter = PresentationService::new(Arc::new(client));

    let catalog = presenter.find_groups(location, radius).await?;
    let projection = project(&catalog)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }

    for group in &catalog {
        println!("{group}\n");
    }
    println!(
        "{} groups, map centered on ({}, {})",
        catalog.len(),
        projection.center.latitude,
        projection.center.longitude
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve { port } => {
            metrics::init_metrics();
            let state = AppState::from_config(&config)?;
            let port = port.unwrap_or(config.server.port);
            info!("Serving meetup map for default location {}", state.default_location);
            start_server(state, port).await?;
        }
        Commands::Search {
            location,
            radius,
            json,
        } => {
            if let Err(e) = run_search(&config, &location, radius, json).await {
                error!("Search failed: {}", e);
                return Err(e);
            }
        }
    }
    Ok(())
}
