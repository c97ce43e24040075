//! Flight search sources.
//!
//! This module defines the search request type and the [`FlightSource`]
//! trait that inventory providers implement, along with the built-in
//! [`StaticFlightSource`] that serves a fixed dataset after a delay.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::flight::{sample_flights, FlightRecord};

/// Default delay before the static source answers.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(1000);

/// Whether the trip includes a return leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TripType {
    /// Outbound only.
    OneWay,
    /// Outbound and return.
    #[default]
    RoundTrip,
}

impl TripType {
    /// The other trip type.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::OneWay => Self::RoundTrip,
            Self::RoundTrip => Self::OneWay,
        }
    }
}

impl std::fmt::Display for TripType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneWay => write!(f, "One Way"),
            Self::RoundTrip => write!(f, "Round Trip"),
        }
    }
}

/// Criteria submitted from the search form.
///
/// No field is validated; empty airports and missing dates are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Origin airport or city.
    pub origin: String,

    /// Destination airport or city.
    pub destination: String,

    /// Outbound date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depart_date: Option<NaiveDate>,

    /// Return date, only meaningful for round trips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,

    /// Number of travellers.
    pub passengers: u32,

    /// One-way or round trip.
    pub trip_type: TripType,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            depart_date: None,
            return_date: None,
            passengers: 1,
            trip_type: TripType::RoundTrip,
        }
    }
}

impl SearchRequest {
    /// Create a request between two airports with default options.
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Switch between one-way and round trip.
    ///
    /// Switching to one-way drops the return date.
    pub fn toggle_trip_type(&mut self) {
        self.trip_type = self.trip_type.toggle();
        if self.trip_type == TripType::OneWay {
            self.return_date = None;
        }
    }
}

/// A provider of flight inventory.
///
/// The result of a search always replaces the caller's previous candidate
/// set. An empty list is a successful search with no results.
#[async_trait::async_trait]
pub trait FlightSource: Send + Sync {
    /// The name of this source (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Look up flights for the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot answer, such as on a network
    /// failure or a date range it rejects.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<FlightRecord>>;
}

/// A source that answers every request with the same dataset after a fixed delay.
#[derive(Debug, Clone)]
pub struct StaticFlightSource {
    flights: Vec<FlightRecord>,
    delay: Duration,
}

impl StaticFlightSource {
    /// Create a source serving the built-in sample dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::with_flights(sample_flights())
    }

    /// Create a source serving the given dataset.
    #[must_use]
    pub fn with_flights(flights: Vec<FlightRecord>) -> Self {
        Self {
            flights,
            delay: DEFAULT_SEARCH_DELAY,
        }
    }

    /// Set the response delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The response delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The dataset this source serves.
    #[must_use]
    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }
}

impl Default for StaticFlightSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FlightSource for StaticFlightSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<FlightRecord>> {
        debug!(
            origin = %request.origin,
            destination = %request.destination,
            passengers = request.passengers,
            trip_type = %request.trip_type,
            delay = ?self.delay,
            "Searching static dataset"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        info!(count = self.flights.len(), "Search complete");
        Ok(self.flights.clone())
    }
}
