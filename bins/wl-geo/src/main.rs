//! wl-geo - Wanderlust geo toolkit
//!
//! Distances, nearby search and geocoding from the command line.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use wanderlust_cli::OutputFormat;
use wanderlust_geo::Coordinate;
use wanderlust_telemetry::TelemetryConfig;

mod args;
mod commands;
mod config;

use args::{parse_coordinate, parse_km, OriginArgs};
use commands::{distance, explore, format, geocode, locate, nearby, reverse, App};
use config::AppConfig;

const VERBOSE_FILTER: &str = "wl_geo=debug,wanderlust_geo=debug,wanderlust_locate=debug,wanderlust_telemetry=debug";

/// Distances, nearby search and geocoding for Wanderlust
#[derive(Parser)]
#[command(name = "wl-geo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file (defaults to ./wanderlust.toml, then the user config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Nominatim-compatible geocoder base URL
    #[arg(long, global = true, value_name = "URL")]
    geocoder_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two points
    Distance {
        /// Start as LAT,LON
        #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,

        /// End as LAT,LON
        #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,
    },

    /// Render a distance in kilometers for display
    Format {
        /// Distance in kilometers
        #[arg(value_parser = parse_km)]
        km: f64,
    },

    /// Posts within a radius of an origin
    Nearby {
        /// JSON array of post rows ("-" for stdin)
        posts: PathBuf,

        #[command(flatten)]
        origin: OriginArgs,

        /// Search radius in kilometers
        #[arg(short, long, default_value = "10", value_parser = parse_km)]
        radius: f64,

        /// Closest first instead of feed order
        #[arg(short, long)]
        sort: bool,

        /// Show at most this many posts
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Search posts by text, optionally near an origin
    Explore {
        /// JSON array of post rows ("-" for stdin)
        posts: PathBuf,

        /// Text to match in captions, place names and tags
        #[arg(short, long)]
        query: Option<String>,

        #[command(flatten)]
        origin: OriginArgs,

        /// Search radius in kilometers, when an origin is given
        #[arg(short, long, default_value = "25", value_parser = parse_km)]
        radius: f64,

        /// Closest first instead of feed order
        #[arg(short, long)]
        sort: bool,
    },

    /// Look up the coordinates of a place
    Geocode {
        /// Place name or address
        query: String,
    },

    /// Look up the place name at a coordinate
    Reverse {
        /// Coordinate as LAT,LON
        #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
        at: Coordinate,
    },

    /// Show the current position
    Locate {
        /// Also reverse geocode the position
        #[arg(short, long)]
        name: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(url) = &cli.geocoder_url {
        config.geocoder.base_url = url.clone();
    }

    let telemetry = if cli.verbose {
        TelemetryConfig {
            log_level: VERBOSE_FILTER.to_string(),
            ..config.log.clone()
        }
    } else {
        config.log.clone()
    };
    if let Err(e) = wanderlust_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let app = App::new(config, cli.format);

    let result = match cli.command {
        Commands::Distance { from, to } => distance::run(from, to, app.format),

        Commands::Format { km } => format::run(km, app.format),

        Commands::Nearby { posts, origin, radius, sort, limit } => {
            let args = nearby::NearbyArgs {
                posts: &posts,
                origin: &origin,
                radius_km: radius,
                sort,
                limit,
            };
            nearby::run(&app, args).await
        }

        Commands::Explore { posts, query, origin, radius, sort } => {
            let args = explore::ExploreArgs {
                posts: &posts,
                text: query.as_deref(),
                origin: &origin,
                radius_km: radius,
                sort,
            };
            explore::run(&app, args).await
        }

        Commands::Geocode { query } => geocode::run(&app, &query).await,

        Commands::Reverse { at } => reverse::run(&app, at).await,

        Commands::Locate { name } => locate::run(&app, name).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
