//! Search session state.
//!
//! A [`SearchSession`] owns everything one user session needs: the
//! candidate set from the latest search, the current filter selection and
//! the visible subset derived from the two. Every mutation recomputes the
//! visible subset from the full candidate set.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::filter::{apply_filters, FilterSpec};
use crate::flight::{default_airlines, FlightRecord, StopBucket};
use crate::search::{FlightSource, SearchRequest};

/// State for one search session.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    candidates: Vec<FlightRecord>,
    visible: Vec<FlightRecord>,
    filters: FilterSpec,
    known_airlines: Vec<String>,
    is_loading: bool,
    has_searched: bool,
}

impl SearchSession {
    /// Create a session offering the default airline list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_airlines(default_airlines())
    }

    /// Create a session offering the given airline list in the filter panel.
    #[must_use]
    pub fn with_airlines(known_airlines: Vec<String>) -> Self {
        Self {
            known_airlines,
            ..Self::default()
        }
    }

    /// Run a search and replace the candidate set with its result.
    ///
    /// Shorthand for [`begin_search`](Self::begin_search), awaiting the
    /// source, then [`complete_search`](Self::complete_search).
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchPending`] if a search is already in flight, or
    /// the source's error. The previous candidate set is kept on error.
    pub async fn submit(
        &mut self,
        source: &dyn FlightSource,
        request: &SearchRequest,
    ) -> Result<&[FlightRecord]> {
        self.begin_search()?;
        debug!(source = source.name(), "Search started");
        let result = source.search(request).await;
        self.complete_search(result)
    }

    /// Mark a search as in flight.
    ///
    /// Callers that drive the source themselves call this before awaiting it
    /// and [`complete_search`](Self::complete_search) afterwards, so
    /// [`is_loading`](Self::is_loading) can be read in between.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SearchPending`] if a search is already in flight.
    pub fn begin_search(&mut self) -> Result<()> {
        if self.is_loading {
            return Err(Error::SearchPending);
        }
        self.is_loading = true;
        Ok(())
    }

    /// Finish the in-flight search with the source's result.
    ///
    /// A successful result replaces the candidate set and the current
    /// filters are reapplied to it.
    ///
    /// # Errors
    ///
    /// Returns the source's error. The previous candidate set is kept.
    pub fn complete_search(
        &mut self,
        result: Result<Vec<FlightRecord>>,
    ) -> Result<&[FlightRecord]> {
        self.is_loading = false;

        match result {
            Ok(flights) => {
                debug!(
                    count = flights.len(),
                    replaced = self.candidates.len(),
                    "Replacing candidate set"
                );
                self.candidates = flights;
                self.has_searched = true;
                Ok(self.refresh())
            }
            Err(e) => {
                warn!(error = %e, "Search failed");
                Err(e)
            }
        }
    }

    /// Abandon the in-flight search without touching the candidate set.
    pub fn cancel_search(&mut self) {
        if self.is_loading {
            debug!("Search cancelled");
        }
        self.is_loading = false;
    }

    /// Replace the filter selection wholesale.
    pub fn set_filters(&mut self, filters: FilterSpec) -> &[FlightRecord] {
        self.filters = filters;
        self.refresh()
    }

    /// Toggle a stop bucket.
    pub fn toggle_stop(&mut self, bucket: StopBucket) -> &[FlightRecord] {
        self.filters.toggle_stop(bucket);
        self.refresh()
    }

    /// Toggle an airline.
    pub fn toggle_airline(&mut self, airline: &str) -> &[FlightRecord] {
        self.filters.toggle_airline(airline);
        self.refresh()
    }

    /// Move the price slider.
    pub fn set_max_price(&mut self, price: u32) -> &[FlightRecord] {
        self.filters.set_max_price(price);
        self.refresh()
    }

    fn refresh(&mut self) -> &[FlightRecord] {
        self.visible = apply_filters(&self.candidates, &self.filters);
        &self.visible
    }

    /// The full result of the latest search.
    #[must_use]
    pub fn candidates(&self) -> &[FlightRecord] {
        &self.candidates
    }

    /// The candidates that pass the current filters.
    #[must_use]
    pub fn visible(&self) -> &[FlightRecord] {
        &self.visible
    }

    /// The current filter selection.
    #[must_use]
    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// Airlines offered in the filter panel.
    #[must_use]
    pub fn known_airlines(&self) -> &[String] {
        &self.known_airlines
    }

    /// Whether a search is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether any search has completed.
    #[must_use]
    pub fn has_searched(&self) -> bool {
        self.has_searched
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::filter::PRICE_CEILING;
    use crate::flight::sample_flights;
    use crate::search::StaticFlightSource;

    struct FailingSource;

    #[async_trait::async_trait]
    impl FlightSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn search(&self, _request: &SearchRequest) -> Result<Vec<FlightRecord>> {
            Err(Error::network_failure("failing", "connection reset"))
        }
    }

    fn instant_source(flights: Vec<FlightRecord>) -> StaticFlightSource {
        StaticFlightSource::with_flights(flights).with_delay(Duration::ZERO)
    }

    fn ids(flights: &[FlightRecord]) -> Vec<&str> {
        flights.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_new_session() {
        let session = SearchSession::new();
        assert!(session.candidates().is_empty());
        assert!(session.visible().is_empty());
        assert!(session.filters().is_unfiltered());
        assert!(!session.is_loading());
        assert!(!session.has_searched());
        assert_eq!(session.known_airlines().len(), 3);
    }

    #[test]
    fn test_with_airlines() {
        let session = SearchSession::with_airlines(vec!["Lufthansa".to_string()]);
        assert_eq!(session.known_airlines(), ["Lufthansa".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_populates_candidates() {
        let mut session = SearchSession::new();
        let source = instant_source(sample_flights());

        let visible = session
            .submit(&source, &SearchRequest::default())
            .await
            .unwrap();
        assert_eq!(visible.len(), 3);

        assert!(session.has_searched());
        assert!(!session.is_loading());
        assert_eq!(session.candidates(), sample_flights().as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_with_default_source_delay() {
        let mut session = SearchSession::new();
        let source = StaticFlightSource::new();
        let start = tokio::time::Instant::now();

        session
            .submit(&source, &SearchRequest::new("JFK", "LAX"))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(session.visible().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_is_loading_while_search_pending() {
        let mut session = SearchSession::new();
        let source = StaticFlightSource::new();
        let request = SearchRequest::new("JFK", "LAX");

        session.begin_search().unwrap();
        let mut pending = source.search(&request);

        // Halfway through the delay the source has not answered yet.
        let early = tokio::time::timeout(Duration::from_millis(500), &mut pending).await;
        assert!(early.is_err());
        assert!(session.is_loading());
        assert!(!session.has_searched());

        let visible = session.complete_search(pending.await).unwrap();
        assert_eq!(visible.len(), 3);
        assert!(!session.is_loading());
        assert!(session.has_searched());
    }

    #[test]
    fn test_begin_search_rejects_second_search() {
        let mut session = SearchSession::new();
        session.begin_search().unwrap();

        let err = session.begin_search().unwrap_err();
        assert!(matches!(err, Error::SearchPending));
        assert!(session.is_loading());
    }

    #[tokio::test]
    async fn test_submit_rejected_while_search_pending() {
        let mut session = SearchSession::new();
        session.begin_search().unwrap();

        let result = session
            .submit(&instant_source(sample_flights()), &SearchRequest::default())
            .await;

        assert!(matches!(result, Err(Error::SearchPending)));
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn test_complete_search_error_clears_loading() {
        let mut session = SearchSession::new();
        session.begin_search().unwrap();

        let result = session.complete_search(Err(Error::network_failure("x", "down")));

        assert!(result.is_err());
        assert!(!session.is_loading());
        assert!(session.begin_search().is_ok());
    }

    #[test]
    fn test_cancel_search_allows_new_search() {
        let mut session = SearchSession::new();
        session.begin_search().unwrap();
        session.cancel_search();

        assert!(!session.is_loading());
        assert!(!session.has_searched());
        assert!(session.begin_search().is_ok());
    }

    #[tokio::test]
    async fn test_set_filters_ignores_max_price_at_ceiling() {
        let mut session = SearchSession::new();
        let mut expensive = sample_flights().remove(0);
        expensive.price = 2500;
        session
            .submit(&instant_source(vec![expensive]), &SearchRequest::default())
            .await
            .unwrap();

        let visible = session.set_filters(FilterSpec {
            max_price: Some(PRICE_CEILING),
            ..FilterSpec::default()
        });
        assert_eq!(visible.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_replaces_previous_candidates() {
        let mut session = SearchSession::new();
        session
            .submit(&instant_source(sample_flights()), &SearchRequest::default())
            .await
            .unwrap();

        let mut replacement = sample_flights().remove(1);
        replacement.id = "9".to_string();
        session
            .submit(&instant_source(vec![replacement]), &SearchRequest::default())
            .await
            .unwrap();

        assert_eq!(ids(session.candidates()), vec!["9"]);
        assert_eq!(ids(session.visible()), vec!["9"]);
    }

    #[tokio::test]
    async fn test_submit_reapplies_current_filters() {
        let mut session = SearchSession::new();
        session.toggle_airline("Delta");
        assert!(session.visible().is_empty());

        session
            .submit(&instant_source(sample_flights()), &SearchRequest::default())
            .await
            .unwrap();

        assert_eq!(ids(session.visible()), vec!["2"]);
        assert_eq!(session.candidates().len(), 3);
    }

    #[tokio::test]
    async fn test_submit_error_keeps_previous_candidates() {
        let mut session = SearchSession::new();
        session
            .submit(&instant_source(sample_flights()), &SearchRequest::default())
            .await
            .unwrap();

        let err = session
            .submit(&FailingSource, &SearchRequest::default())
            .await
            .unwrap_err();

        assert!(err.is_source_error());
        assert!(!session.is_loading());
        assert_eq!(session.candidates().len(), 3);
        assert_eq!(session.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_submit_error_before_any_search() {
        let mut session = SearchSession::new();
        let result = session.submit(&FailingSource, &SearchRequest::default()).await;

        assert!(result.is_err());
        assert!(!session.has_searched());
    }

    #[tokio::test]
    async fn test_filters_recompute_from_full_candidates() {
        let mut session = SearchSession::new();
        session
            .submit(&instant_source(sample_flights()), &SearchRequest::default())
            .await
            .unwrap();

        assert_eq!(ids(session.toggle_stop(StopBucket::Direct)), vec!["1", "3"]);
        assert_eq!(ids(session.set_max_price(300)), vec!["1"]);

        // Loosening a filter brings back flights an earlier narrowing removed.
        assert_eq!(ids(session.toggle_stop(StopBucket::Direct)), vec!["1", "2"]);
        assert_eq!(ids(session.set_max_price(2000)), vec!["1", "2", "3"]);
        assert!(session.filters().is_unfiltered());
    }

    #[tokio::test]
    async fn test_set_filters_replaces_wholesale() {
        let mut session = SearchSession::new();
        session
            .submit(&instant_source(sample_flights()), &SearchRequest::default())
            .await
            .unwrap();
        session.toggle_stop(StopBucket::OneStop);

        let visible = session.set_filters(FilterSpec::new().with_airline("American Airlines"));
        assert_eq!(ids(visible), vec!["3"]);
        assert!(session.filters().stops.is_empty());
    }

    #[tokio::test]
    async fn test_empty_visible_subset_is_valid() {
        let mut session = SearchSession::new();
        session
            .submit(&instant_source(sample_flights()), &SearchRequest::default())
            .await
            .unwrap();

        assert!(session.toggle_stop(StopBucket::TwoPlus).is_empty());
        assert_eq!(session.candidates().len(), 3);
    }
}
