//! Fire-and-forget notification sink.

use crate::domain::MarketEvent;

/// Receives market notifications after an operation commits.
///
/// Sinks cannot fail and cannot influence the operation that produced
/// the event.
pub trait EventSink {
    /// Publishes `event`.
    fn emit(&mut self, event: MarketEvent);
}
