//! Wayline CLI
//!
//! Command-line interface for the route planner: address suggestions,
//! route finding, and device-location checks.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::error::ApplicationError;
use application::ports::SuggestionPort;
use application::{DeviceLocator, TripPlanner};
use clap::{Parser, Subcommand};
use domain::{AddressSuggestion, GeoLocation};
use infrastructure::{
    AppConfig, ConfiguredLocationProvider, GeoapifyRoutingAdapter, GeoapifySuggestionAdapter,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Wayline CLI
#[derive(Parser)]
#[command(name = "wayline")]
#[command(version, about = "Wayline route planner CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the configuration file (default: wayline.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up address suggestions for partial text
    Suggest {
        /// Partial address text
        query: String,

        /// Bias results towards a "lat,lon" coordinate
        #[arg(long)]
        bias: Option<String>,
    },

    /// Find a driving route between two addresses
    ///
    /// Each address is resolved to its best autocomplete match first.
    Route {
        /// Origin address text
        origin: String,

        /// Destination address text
        destination: String,
    },

    /// Resolve the configured device location
    Locate,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse a "lat,lon" pair from the command line
fn parse_coordinate(raw: &str) -> anyhow::Result<GeoLocation> {
    let (lat, lon) = raw
        .split_once(',')
        .context("coordinate must be \"lat,lon\"")?;
    let latitude: f64 = lat.trim().parse().context("invalid latitude")?;
    let longitude: f64 = lon.trim().parse().context("invalid longitude")?;
    GeoLocation::new(latitude, longitude).map_err(anyhow::Error::from)
}

/// Resolve free text to its best autocomplete match
async fn resolve_address(
    port: &dyn SuggestionPort,
    query: &str,
) -> anyhow::Result<AddressSuggestion> {
    let mut suggestions = port.suggest(query, None).await?;
    if suggestions.is_empty() {
        anyhow::bail!("No address found for \"{query}\"");
    }
    Ok(suggestions.remove(0))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config =
        AppConfig::load_with(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Err(err) = config.validate() {
        anyhow::bail!("Invalid configuration: {err}");
    }

    match cli.command {
        Commands::Suggest { query, bias } => {
            let adapter = GeoapifySuggestionAdapter::new(&config.geoapify)?;
            let bias = bias.as_deref().map(parse_coordinate).transpose()?;

            let suggestions = adapter.suggest(&query, bias).await?;
            if suggestions.is_empty() {
                println!("No suggestions for \"{query}\"");
            }
            for (index, suggestion) in suggestions.iter().enumerate() {
                println!("{}. {} ({})", index + 1, suggestion.label, suggestion.location);
            }
        },

        Commands::Route {
            origin,
            destination,
        } => {
            let suggestions = GeoapifySuggestionAdapter::new(&config.geoapify)?;
            let routing = Arc::new(GeoapifyRoutingAdapter::new(&config.geoapify)?);
            let planner = TripPlanner::new(routing);

            let origin_match = resolve_address(&suggestions, &origin).await?;
            println!("Origin:      {}", origin_match.label);
            let destination_match = resolve_address(&suggestions, &destination).await?;
            println!("Destination: {}", destination_match.label);

            planner.set_origin(Some(origin_match.location)).await;
            planner.set_destination(Some(destination_match.location)).await;

            match planner.find_route().await {
                Ok(route) => {
                    println!("Route:       {}", route.format_summary());
                    if let (Some(start), Some(end)) = (route.start(), route.end()) {
                        println!("  from {start}");
                        println!("  to   {end}");
                    }
                },
                Err(err @ ApplicationError::RouteNotFound { .. }) => {
                    println!("{err}");
                    std::process::exit(1);
                },
                Err(err) => return Err(err.into()),
            }
        },

        Commands::Locate => {
            let provider = Arc::new(ConfiguredLocationProvider::from_config(&config.location));
            let locator = DeviceLocator::new(provider, config.location.timeout_secs);

            match locator.current_location().await {
                Ok(location) => println!("Device location: {location}"),
                Err(err) => {
                    println!("{err}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
