//! Fluent builder for a [`Simulation`].

use fleet_core::{SimConfig, Tick};
use fleet_dispatch::DeliveryService;
use fleet_order::OrderGenerator;
use fleet_rating::Rater;
use fleet_region::PathCalculator;

use crate::Simulation;

/// Assembles a [`Simulation`] from its injected parts.
///
/// # Required inputs
///
/// - [`SimConfig`] — run length and seed
/// - [`DeliveryService`] — manager + dispatchers, fully wired
/// - `G: OrderGenerator` — the order stream
///
/// Raters are optional; a simulation without raters runs fine and simply
/// reports no scores.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimulationBuilder::new(config, service, generator)
///     .rater(Box::new(AmountDeliveredRater::new(0.99)?))
///     .rater(Box::new(InTimeRater::new(5, 25)?))
///     .build();
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimulationBuilder<P, G> {
    config: SimConfig,
    service: DeliveryService<P>,
    generator: G,
    raters: Vec<Box<dyn Rater>>,
}

impl<P: PathCalculator, G: OrderGenerator> SimulationBuilder<P, G> {
    pub fn new(config: SimConfig, service: DeliveryService<P>, generator: G) -> Self {
        Self {
            config,
            service,
            generator,
            raters: Vec::new(),
        }
    }

    /// Attach a rater.  May be called repeatedly; scores are reported in
    /// attachment order.
    pub fn rater(mut self, rater: Box<dyn Rater>) -> Self {
        self.raters.push(rater);
        self
    }

    pub fn build(self) -> Simulation<P, G> {
        Simulation {
            config: self.config,
            service: self.service,
            generator: self.generator,
            raters: self.raters,
            current_tick: Tick::ZERO,
        }
    }
}
