//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands and the
//! conversions from their arguments to library types.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::filter::FilterSpec;
use crate::flight::StopBucket;
use crate::search::{SearchRequest, TripType};

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Origin airport or city
    #[arg(long, default_value = "")]
    pub from: String,

    /// Destination airport or city
    #[arg(long, default_value = "")]
    pub to: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub depart: Option<NaiveDate>,

    /// Return date (YYYY-MM-DD), ignored for one-way trips
    #[arg(long = "return")]
    pub return_date: Option<NaiveDate>,

    /// Number of passengers
    #[arg(short, long, default_value_t = 1)]
    pub passengers: u32,

    /// Search one-way instead of round trip
    #[arg(long)]
    pub one_way: bool,

    /// Keep flights with these stop counts: direct, 1, 2+ (repeatable)
    #[arg(short, long = "stops", value_name = "STOPS", value_parser = parse_stop_bucket)]
    pub stops: Vec<StopBucket>,

    /// Keep flights from these airlines (repeatable, exact name)
    #[arg(short, long = "airline", value_name = "NAME")]
    pub airlines: Vec<String>,

    /// Keep flights at or below this price
    #[arg(short, long, value_name = "PRICE")]
    pub max_price: Option<u32>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl SearchCommand {
    /// Build the search request from the form arguments.
    #[must_use]
    pub fn request(&self) -> SearchRequest {
        let trip_type = if self.one_way {
            TripType::OneWay
        } else {
            TripType::RoundTrip
        };
        SearchRequest {
            origin: self.from.clone(),
            destination: self.to.clone(),
            depart_date: self.depart,
            return_date: match trip_type {
                TripType::OneWay => None,
                TripType::RoundTrip => self.return_date,
            },
            passengers: self.passengers,
            trip_type,
        }
    }

    /// Build the filter selection from the filter arguments.
    #[must_use]
    pub fn filters(&self) -> FilterSpec {
        let mut spec = FilterSpec {
            stops: self.stops.iter().copied().collect(),
            airlines: self.airlines.iter().cloned().collect(),
            max_price: None,
        };
        if let Some(price) = self.max_price {
            spec.set_max_price(price);
        }
        spec
    }
}

fn parse_stop_bucket(s: &str) -> Result<StopBucket, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per flight
    Plain,
    /// Aligned table
    #[default]
    Table,
    /// JSON array
    Json,
}

impl OutputFormat {
    /// Parse a configured format name, falling back to the default.
    #[must_use]
    pub fn from_config(name: &str) -> Self {
        Self::from_str(name, true).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};
    use crate::filter::PRICE_CEILING;

    fn search(args: &[&str]) -> SearchCommand {
        let mut argv = vec!["flights", "search"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Search(cmd) => cmd,
            other => panic!("Expected search command, got {other:?}"),
        }
    }

    #[test]
    fn test_request_round_trip() {
        let cmd = search(&[
            "--from", "JFK", "--to", "LAX", "--depart", "2024-05-01", "--return", "2024-05-08",
            "-p", "2",
        ]);
        let request = cmd.request();

        assert_eq!(request.origin, "JFK");
        assert_eq!(request.destination, "LAX");
        assert_eq!(request.depart_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(request.return_date, NaiveDate::from_ymd_opt(2024, 5, 8));
        assert_eq!(request.passengers, 2);
        assert_eq!(request.trip_type, TripType::RoundTrip);
    }

    #[test]
    fn test_request_one_way_drops_return() {
        let cmd = search(&["--one-way", "--return", "2024-05-08"]);
        let request = cmd.request();

        assert_eq!(request.trip_type, TripType::OneWay);
        assert!(request.return_date.is_none());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = Cli::try_parse_from(["flights", "search", "--depart", "tomorrow"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_filters_from_args() {
        let cmd = search(&[
            "-s", "direct", "-s", "2+", "-a", "Delta", "-a", "United Airlines", "-m", "500",
        ]);
        let spec = cmd.filters();

        assert!(spec.stops.contains(&StopBucket::Direct));
        assert!(spec.stops.contains(&StopBucket::TwoPlus));
        assert_eq!(spec.airlines.len(), 2);
        assert_eq!(spec.max_price, Some(500));
    }

    #[test]
    fn test_filters_max_price_at_ceiling_is_unset() {
        let ceiling = PRICE_CEILING.to_string();
        let cmd = search(&["--max-price", &ceiling]);
        assert!(cmd.filters().is_unfiltered());
    }

    #[test]
    fn test_unknown_stop_bucket_is_rejected() {
        let result = Cli::try_parse_from(["flights", "search", "--stops", "many"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("PLAIN"), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_config("bogus"), OutputFormat::Table);
    }
}
