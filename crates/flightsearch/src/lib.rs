//! `flightsearch` - Flight search with client-side result filtering
//!
//! This library provides the search trigger, the filter engine and the
//! session state behind a flight search interface. A search replaces the
//! session's candidate set; filters narrow it to the visible subset.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod flight;
pub mod logging;
pub mod search;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::{apply_filters, FilterSpec, PRICE_CEILING};
pub use flight::{Endpoint, FlightRecord, StopBucket};
pub use logging::init_logging;
pub use search::{FlightSource, SearchRequest, StaticFlightSource, TripType};
pub use session::SearchSession;
