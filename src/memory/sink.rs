//! Event sinks.

use tracing::info;

use crate::domain::MarketEvent;
use crate::traits::EventSink;

/// Keeps every event in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    events: Vec<MarketEvent>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// The most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&MarketEvent> {
        self.events.last()
    }

    /// Removes and returns every recorded event.
    pub fn drain(&mut self) -> Vec<MarketEvent> {
        core::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: MarketEvent) {
        self.events.push(event);
    }
}

/// Writes each event as an `info` record under the `term_market::events`
/// target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: MarketEvent) {
        info!(target: "term_market::events", event = event.name(), "{event}");
    }
}
