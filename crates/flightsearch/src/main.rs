//! `flights` - CLI for flightsearch
//!
//! This binary is the presentation shell: it submits a search, applies the
//! requested filters and prints the visible flights.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;

use flightsearch::cli::{Cli, Command, ConfigCommand, OutputFormat, SearchCommand};
use flightsearch::{init_logging, Config, FlightRecord, SearchSession, StaticFlightSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Path and validate must work even when the config file is broken.
    if !cli.requires_config() {
        if let Command::Config(config_cmd) = cli.command {
            inspect_config(cli.config, config_cmd);
        }
        return Ok(());
    }

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Search(search_cmd) => handle_search(&config, &search_cmd).await,
        Command::Airlines => {
            handle_airlines(&config);
            Ok(())
        }
        Command::Config(config_cmd) => handle_config(&config, &config_cmd),
    }
}

async fn handle_search(
    config: &Config,
    cmd: &SearchCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = StaticFlightSource::new().with_delay(config.search_delay());
    let mut session = SearchSession::with_airlines(config.filters.airlines.clone());

    let request = cmd.request();
    let filters = cmd.filters();
    for airline in &filters.airlines {
        if !session.known_airlines().contains(airline) {
            tracing::warn!(airline = %airline, "Airline is not in the configured list");
        }
    }

    session.submit(&source, &request).await?;
    let visible = session.set_filters(filters);

    let format = cmd
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(visible)?),
        OutputFormat::Table => print_table(visible),
        OutputFormat::Plain => print_plain(visible),
    }
    Ok(())
}

fn print_table(flights: &[FlightRecord]) {
    if flights.is_empty() {
        println!("No flights found matching your filters.");
        return;
    }

    let airline_width = flights
        .iter()
        .map(|f| f.airline.len())
        .max()
        .unwrap_or(0)
        .max("Airline".len());

    println!(
        "{:<airline_width$}  {:<7}  {:<14}  {:<14}  {:<8}  {:<8}  {:>6}",
        "Airline", "Flight", "Departs", "Arrives", "Duration", "Stops", "Price"
    );
    println!("{}", "-".repeat(airline_width + 71));
    for flight in flights {
        println!(
            "{:<airline_width$}  {:<7}  {:<14}  {:<14}  {:<8}  {:<8}  {:>6}",
            flight.airline,
            flight.flight_number,
            format!("{} {}", flight.departure.airport, flight.departure.time),
            format!("{} {}", flight.arrival.airport, flight.arrival.time),
            flight.duration,
            flight.stops_label(),
            format!("${}", flight.price),
        );
    }
}

fn print_plain(flights: &[FlightRecord]) {
    if flights.is_empty() {
        println!("No flights found matching your filters.");
        return;
    }

    for flight in flights {
        println!(
            "{} {} {} {} -> {} {} ({}, {}) ${}",
            flight.airline,
            flight.flight_number,
            flight.departure.airport,
            flight.departure.time,
            flight.arrival.airport,
            flight.arrival.time,
            flight.duration,
            flight.stops_label(),
            flight.price,
        );
    }
}

fn handle_airlines(config: &Config) {
    for airline in &config.filters.airlines {
        println!("{airline}");
    }
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    if let ConfigCommand::Show { json } = cmd {
        if *json {
            println!("{}", serde_json::to_string_pretty(config)?);
        } else {
            println!("Current Configuration");
            println!("=====================");
            println!();
            println!("[Search]");
            println!("  Delay (ms):    {}", config.search.delay_ms);
            println!();
            println!("[Filters]");
            println!("  Airlines:      {}", config.filters.airlines.join(", "));
            println!();
            println!("[Output]");
            println!("  Format:        {}", config.output.format);
        }
    }
    Ok(())
}

fn inspect_config(global: Option<PathBuf>, cmd: ConfigCommand) {
    match cmd {
        ConfigCommand::Path => {
            let path = global.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.or(global).unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
        ConfigCommand::Show { .. } => {}
    }
}
