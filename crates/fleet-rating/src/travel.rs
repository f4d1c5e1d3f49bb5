//! Scores total travel distance against a per-order worst case.

use std::sync::Arc;

use fleet_core::{Location, Tick};
use fleet_region::{PathCalculator, Region};
use fleet_routing::Event;

use crate::rater::{Rater, RatingCriteria};
use crate::{RatingError, RatingResult};

/// Every delivered order adds twice its restaurant→target shortest-path
/// duration to the worst-case budget; every node arrival adds the traversed
/// edge's duration to the actual total.  Score:
/// `1 − actual / (worst · factor)`, 0 once the budget is blown.
pub struct TravelDistanceRater<P> {
    region: Arc<Region>,
    paths: P,
    factor: f64,
    worst: u64,
    actual: u64,
}

impl<P: PathCalculator> TravelDistanceRater<P> {
    /// `factor` scales the worst-case budget and must be positive.
    pub fn new(region: Arc<Region>, paths: P, factor: f64) -> RatingResult<Self> {
        if !(factor > 0.0) {
            return Err(RatingError::FactorOutOfRange(factor));
        }
        Ok(Self {
            region,
            paths,
            factor,
            worst: 0,
            actual: 0,
        })
    }

    /// Shortest-path duration between two nodes; 0 when unreachable.
    fn shortest_duration(&self, from: Location, to: Location) -> RatingResult<u64> {
        let mut duration = 0u64;
        let mut previous = from;
        for node in self.paths.path(&self.region, from, to) {
            let edge = self
                .region
                .edge(previous, node)
                .ok_or(RatingError::UnknownEdge {
                    a: previous,
                    b: node,
                })?;
            duration += edge.duration();
            previous = node;
        }
        Ok(duration)
    }
}

impl<P: PathCalculator> Rater for TravelDistanceRater<P> {
    fn on_tick(&mut self, events: &[Event], _tick: Tick) -> RatingResult<()> {
        for event in events {
            match event {
                Event::DeliverOrder { order, .. } => {
                    self.worst +=
                        2 * self.shortest_duration(order.restaurant(), order.location())?;
                }
                Event::ArrivedAtNode { last_edge, .. } => {
                    let edge = self.region.edge(last_edge.0, last_edge.1).ok_or(
                        RatingError::UnknownEdge {
                            a: last_edge.0,
                            b: last_edge.1,
                        },
                    )?;
                    self.actual += edge.duration();
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn score(&self) -> f64 {
        let budget = self.worst as f64 * self.factor;
        if self.actual as f64 >= budget || budget == 0.0 {
            return 0.0;
        }
        1.0 - self.actual as f64 / budget
    }

    fn criteria(&self) -> RatingCriteria {
        RatingCriteria::TravelDistance
    }
}
