//! Scores delivery punctuality.

use std::collections::BTreeSet;

use fleet_core::{OrderId, Tick};
use fleet_routing::Event;

use crate::rater::{Rater, RatingCriteria};
use crate::{RatingError, RatingResult};

/// Per delivered order, the ticks outside its window beyond
/// `ignored_ticks_off` count against the score, capped at `max_ticks_off`.
/// Orders received but never delivered count the full cap.  The final score
/// is `1 − total / (max_ticks_off · orders)`.
pub struct InTimeRater {
    ignored_ticks_off: u64,
    max_ticks_off: u64,
    total_ticks_off: u64,
    orders_delivered: u64,
    undelivered: BTreeSet<OrderId>,
}

impl InTimeRater {
    /// `max_ticks_off` must be positive; `ignored_ticks_off` may be zero.
    pub fn new(ignored_ticks_off: u64, max_ticks_off: u64) -> RatingResult<Self> {
        if max_ticks_off == 0 {
            return Err(RatingError::NonPositiveMaxTicksOff);
        }
        Ok(Self {
            ignored_ticks_off,
            max_ticks_off,
            total_ticks_off: 0,
            orders_delivered: 0,
            undelivered: BTreeSet::new(),
        })
    }
}

impl Rater for InTimeRater {
    fn on_tick(&mut self, events: &[Event], _tick: Tick) -> RatingResult<()> {
        for event in events {
            match event {
                Event::DeliverOrder { order, .. } => {
                    if !self.undelivered.remove(&order.id()) {
                        return Err(RatingError::DeliverBeforeReceive(order.id()));
                    }
                    let actual = order
                        .actual_delivery_tick()
                        .ok_or(RatingError::MissingDeliveryTick(order.id()))?;
                    let off = order.delivery_interval().ticks_off(actual);
                    let counted = off.saturating_sub(self.ignored_ticks_off).min(self.max_ticks_off);
                    self.total_ticks_off += counted;
                    self.orders_delivered += 1;
                }
                Event::OrderReceived { order, .. } => {
                    self.undelivered.insert(order.id());
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn score(&self) -> f64 {
        let total_orders = self.orders_delivered + self.undelivered.len() as u64;
        let max_total = self.max_ticks_off * total_orders;
        if max_total == 0 {
            return 0.0;
        }
        let actual_total = self.total_ticks_off + self.undelivered.len() as u64 * self.max_ticks_off;
        1.0 - actual_total as f64 / max_total as f64
    }

    fn criteria(&self) -> RatingCriteria {
        RatingCriteria::InTime
    }
}
