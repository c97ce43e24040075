//! Core flight types for flightsearch.
//!
//! This module defines the flight record produced by a search, the
//! stop-count buckets the filter panel works with, and the built-in
//! dataset served by the static flight source.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One end of a flight: an airport code and a display time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Airport code, e.g. `JFK`.
    pub airport: String,
    /// Local time in display form, e.g. `08:00 AM`.
    pub time: String,
}

impl Endpoint {
    /// Create a new endpoint.
    #[must_use]
    pub fn new(airport: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            airport: airport.into(),
            time: time.into(),
        }
    }
}

/// A single flight returned by a search.
///
/// Records are immutable once produced by a [`FlightSource`](crate::search::FlightSource);
/// the filter engine only ever clones the ones that survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Unique identifier within one candidate set.
    pub id: String,

    /// Airline name, matched exactly by the airline filter.
    pub airline: String,

    /// Marketing flight number, e.g. `UA123`.
    pub flight_number: String,

    /// Where and when the flight leaves.
    pub departure: Endpoint,

    /// Where and when the flight lands.
    pub arrival: Endpoint,

    /// Duration in display form (`3h 00m`). Not parsed.
    pub duration: String,

    /// Fare in whole currency units.
    pub price: u32,

    /// Number of intermediate stops.
    pub stops: u32,
}

impl FlightRecord {
    /// The stop bucket this flight falls into.
    #[must_use]
    pub fn stop_bucket(&self) -> StopBucket {
        StopBucket::of(self.stops)
    }

    /// Human-readable stop count as shown on a result card.
    #[must_use]
    pub fn stops_label(&self) -> String {
        match self.stops {
            0 => "Direct".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{n} stops"),
        }
    }
}

/// Stop-count classification used by the filter panel.
///
/// The three buckets partition the non-negative integers, so every flight
/// belongs to exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StopBucket {
    /// No stops.
    #[serde(rename = "Direct")]
    Direct,
    /// Exactly one stop.
    #[serde(rename = "1 Stop")]
    OneStop,
    /// Two or more stops.
    #[serde(rename = "2+ Stops")]
    TwoPlus,
}

impl StopBucket {
    /// All buckets, in display order.
    pub const ALL: [StopBucket; 3] = [Self::Direct, Self::OneStop, Self::TwoPlus];

    /// Classify a stop count.
    #[must_use]
    pub fn of(stops: u32) -> Self {
        match stops {
            0 => Self::Direct,
            1 => Self::OneStop,
            _ => Self::TwoPlus,
        }
    }

    /// Check whether a stop count belongs to this bucket.
    #[must_use]
    pub fn contains(self, stops: u32) -> bool {
        match self {
            Self::Direct => stops == 0,
            Self::OneStop => stops == 1,
            Self::TwoPlus => stops >= 2,
        }
    }

    /// The label shown next to the checkbox.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::OneStop => "1 Stop",
            Self::TwoPlus => "2+ Stops",
        }
    }
}

impl std::fmt::Display for StopBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StopBucket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "1 stop" | "1" | "one-stop" => Ok(Self::OneStop),
            "2+ stops" | "2+" | "two-plus" => Ok(Self::TwoPlus),
            _ => Err(Error::UnknownStopBucket(s.to_string())),
        }
    }
}

/// The built-in dataset served by the static flight source.
#[must_use]
pub fn sample_flights() -> Vec<FlightRecord> {
    vec![
        FlightRecord {
            id: "1".to_string(),
            airline: "United Airlines".to_string(),
            flight_number: "UA123".to_string(),
            departure: Endpoint::new("JFK", "08:00 AM"),
            arrival: Endpoint::new("LAX", "11:00 AM"),
            duration: "3h 00m".to_string(),
            price: 299,
            stops: 0,
        },
        FlightRecord {
            id: "2".to_string(),
            airline: "Delta".to_string(),
            flight_number: "DL456".to_string(),
            departure: Endpoint::new("JFK", "10:30 AM"),
            arrival: Endpoint::new("LAX", "2:30 PM"),
            duration: "4h 00m".to_string(),
            price: 275,
            stops: 1,
        },
        FlightRecord {
            id: "3".to_string(),
            airline: "American Airlines".to_string(),
            flight_number: "AA789".to_string(),
            departure: Endpoint::new("JFK", "2:00 PM"),
            arrival: Endpoint::new("LAX", "5:00 PM"),
            duration: "3h 00m".to_string(),
            price: 325,
            stops: 0,
        },
    ]
}

/// Airlines offered in the filter panel.
///
/// This list is static configuration, not derived from search results.
#[must_use]
pub fn default_airlines() -> Vec<String> {
    vec![
        "United Airlines".to_string(),
        "Delta".to_string(),
        "American Airlines".to_string(),
    ]
}
