//! Scores the fraction of orders that made it to their doorsteps.

use std::collections::BTreeSet;

use fleet_core::{OrderId, Tick};
use fleet_routing::Event;

use crate::rater::{Rater, RatingCriteria};
use crate::{RatingError, RatingResult};

/// With tolerance factor `f`, the score is
/// `1 − undelivered / (total · (1 − f))`, clamped to 0 once the undelivered
/// count exceeds the tolerated amount.
pub struct AmountDeliveredRater {
    factor: f64,
    orders_seen: u64,
    undelivered: BTreeSet<OrderId>,
}

impl AmountDeliveredRater {
    /// `factor` is the fraction of orders expected to be delivered; it must
    /// lie in `[0, 1]`.
    pub fn new(factor: f64) -> RatingResult<Self> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(RatingError::FactorOutOfRange(factor));
        }
        Ok(Self {
            factor,
            orders_seen: 0,
            undelivered: BTreeSet::new(),
        })
    }
}

impl Rater for AmountDeliveredRater {
    fn on_tick(&mut self, events: &[Event], _tick: Tick) -> RatingResult<()> {
        for event in events {
            match event {
                Event::DeliverOrder { order, .. } => {
                    if !self.undelivered.remove(&order.id()) {
                        return Err(RatingError::DeliverBeforeReceive(order.id()));
                    }
                }
                Event::OrderReceived { order, .. } => {
                    self.undelivered.insert(order.id());
                    self.orders_seen += 1;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn score(&self) -> f64 {
        let undelivered = self.undelivered.len() as f64;
        let max_undelivered = self.orders_seen as f64 * (1.0 - self.factor);
        if undelivered > max_undelivered || max_undelivered == 0.0 {
            return 0.0;
        }
        1.0 - undelivered / max_undelivered
    }

    fn criteria(&self) -> RatingCriteria {
        RatingCriteria::AmountDelivered
    }
}
