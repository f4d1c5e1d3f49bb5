//! The rater contract.

use fleet_core::Tick;
use fleet_routing::Event;

use crate::RatingResult;

/// What a rater judges the run by.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RatingCriteria {
    AmountDelivered,
    InTime,
    TravelDistance,
}

impl std::fmt::Display for RatingCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingCriteria::AmountDelivered => write!(f, "amount-delivered"),
            RatingCriteria::InTime => write!(f, "in-time"),
            RatingCriteria::TravelDistance => write!(f, "travel-distance"),
        }
    }
}

/// Observes each tick's events and produces a score in `[0, 1]`.
pub trait Rater {
    /// Digest one tick's events.
    ///
    /// Fails only on a broken event stream (delivery before receipt,
    /// arrivals over unknown edges) — those abort the run.
    fn on_tick(&mut self, events: &[Event], tick: Tick) -> RatingResult<()>;

    /// The score accumulated so far, in `[0, 1]`.
    fn score(&self) -> f64;

    fn criteria(&self) -> RatingCriteria;
}
