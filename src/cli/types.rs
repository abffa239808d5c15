//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level command line.
#[derive(Parser)]
#[command(name = "daytrip")]
#[command(about = "Daytrip - budget-constrained day itinerary recommender", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .daytrip/config.yaml and .daytrip/local.yaml)
    #[arg(short, long, global = true, env = "DAYTRIP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the gateway server
    Serve(ServeArgs),

    /// Submit a budget and start a new itinerary session
    Recommend(RecommendArgs),

    /// Show another itinerary, excluding venues already shown
    Regenerate,

    /// Open the venue on a carousel page
    Select {
        /// Carousel page (0 = food, 1 = cafe, 2 = activity)
        index: usize,
    },

    /// Show the current itinerary
    Show,

    /// Forget the stored session
    Reset,
}

/// Run the gateway server
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Submit a budget and start a new itinerary session
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Latitude of the starting point
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the starting point
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Total budget for the whole party
    #[arg(short, long)]
    pub budget: u64,

    /// Party size
    #[arg(short, long, default_value = "1")]
    pub people: u32,

    /// Search radius in metres (defaults to the configured radius)
    #[arg(short, long)]
    pub radius: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "daytrip",
            "recommend",
            "--lat",
            "37.56",
            "--lng",
            "126.97",
            "--budget",
            "120000",
            "-p",
            "2",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Recommend(args) => {
                assert_eq!(args.budget, 120_000);
                assert_eq!(args.people, 2);
                assert!(args.radius.is_none());
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_parse_select_and_config() {
        let cli =
            Cli::try_parse_from(["daytrip", "--config", "custom.yaml", "select", "2"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert!(matches!(cli.command, Commands::Select { index: 2 }));
    }

    #[test]
    fn test_recommend_requires_budget() {
        assert!(Cli::try_parse_from(["daytrip", "recommend", "--lat", "1", "--lng", "2"]).is_err());
    }
}
