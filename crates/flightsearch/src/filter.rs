//! Client-side filtering of search results.
//!
//! Filtering narrows the full candidate set of a search along three
//! independent dimensions:
//!
//! - **Stops**: keep flights in any of the selected stop buckets.
//! - **Airlines**: keep flights operated by one of the selected airlines.
//! - **Price**: keep flights at or below a maximum fare.
//!
//! A dimension with nothing selected does not filter at all. The visible
//! subset is always recomputed from the full candidate set.
//!
//! # Example
//!
//! ```
//! use flightsearch::filter::{apply_filters, FilterSpec};
//! use flightsearch::flight::{sample_flights, StopBucket};
//!
//! let spec = FilterSpec::default().with_stop(StopBucket::Direct);
//! let visible = apply_filters(&sample_flights(), &spec);
//! assert_eq!(visible.len(), 2);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::flight::{FlightRecord, StopBucket};

/// Upper end of the price slider. A slider value at or above this is "no limit".
pub const PRICE_CEILING: u32 = 2000;

/// The user's current filter selection.
///
/// A `max_price` at or above [`PRICE_CEILING`] is treated as unset, however
/// the spec was built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterSpec {
    /// Selected stop buckets. Empty means no stop filter.
    pub stops: BTreeSet<StopBucket>,

    /// Selected airline names. Empty means no airline filter.
    pub airlines: BTreeSet<String>,

    /// Maximum fare, inclusive. `None` means no price filter.
    pub max_price: Option<u32>,
}

impl FilterSpec {
    /// Create an unfiltered spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop bucket to the selection.
    #[must_use]
    pub fn with_stop(mut self, bucket: StopBucket) -> Self {
        self.stops.insert(bucket);
        self
    }

    /// Add an airline to the selection.
    #[must_use]
    pub fn with_airline(mut self, airline: impl Into<String>) -> Self {
        self.airlines.insert(airline.into());
        self
    }

    /// Set the maximum price using slider semantics (see [`set_max_price`](Self::set_max_price)).
    #[must_use]
    pub fn with_max_price(mut self, price: u32) -> Self {
        self.set_max_price(price);
        self
    }

    /// Select the bucket if unselected, deselect it otherwise.
    pub fn toggle_stop(&mut self, bucket: StopBucket) {
        if !self.stops.remove(&bucket) {
            self.stops.insert(bucket);
        }
    }

    /// Select the airline if unselected, deselect it otherwise.
    pub fn toggle_airline(&mut self, airline: &str) {
        if !self.airlines.remove(airline) {
            self.airlines.insert(airline.to_string());
        }
    }

    /// Set the maximum price from a slider value.
    ///
    /// Values at or above [`PRICE_CEILING`] clear the price filter.
    pub fn set_max_price(&mut self, price: u32) {
        self.max_price = (price < PRICE_CEILING).then_some(price);
    }

    /// Remove the price limit.
    pub fn clear_max_price(&mut self) {
        self.max_price = None;
    }

    /// The price limit in effect, ignoring values at or above the ceiling.
    #[must_use]
    pub fn effective_max_price(&self) -> Option<u32> {
        self.max_price.filter(|max| *max < PRICE_CEILING)
    }

    /// The value the price slider should show.
    #[must_use]
    pub fn slider_price(&self) -> u32 {
        self.effective_max_price().unwrap_or(PRICE_CEILING)
    }

    /// Check whether no dimension is filtering.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.stops.is_empty() && self.airlines.is_empty() && self.effective_max_price().is_none()
    }

    /// Check whether a flight passes every active dimension.
    #[must_use]
    pub fn matches(&self, flight: &FlightRecord) -> bool {
        self.matches_stops(flight) && self.matches_airline(flight) && self.matches_price(flight)
    }

    fn matches_stops(&self, flight: &FlightRecord) -> bool {
        self.stops.is_empty() || self.stops.iter().any(|b| b.contains(flight.stops))
    }

    fn matches_airline(&self, flight: &FlightRecord) -> bool {
        self.airlines.is_empty() || self.airlines.contains(&flight.airline)
    }

    fn matches_price(&self, flight: &FlightRecord) -> bool {
        self.effective_max_price().map_or(true, |max| flight.price <= max)
    }
}

/// Compute the visible subset of `candidates` under `spec`.
///
/// The result preserves the relative order of `candidates`. An empty result
/// is a normal outcome.
#[must_use]
pub fn apply_filters(candidates: &[FlightRecord], spec: &FilterSpec) -> Vec<FlightRecord> {
    if spec.is_unfiltered() {
        trace!(count = candidates.len(), "No filters active");
        return candidates.to_vec();
    }

    let visible: Vec<FlightRecord> = candidates
        .iter()
        .filter(|flight| spec.matches(flight))
        .cloned()
        .collect();

    debug!(
        candidates = candidates.len(),
        visible = visible.len(),
        stops = spec.stops.len(),
        airlines = spec.airlines.len(),
        max_price = ?spec.effective_max_price(),
        "Filters applied"
    );
    visible
}
