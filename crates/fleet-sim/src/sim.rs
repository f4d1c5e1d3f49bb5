//! The `Simulation` runner.

use fleet_core::{SimConfig, Tick};
use fleet_dispatch::DeliveryService;
use fleet_order::OrderGenerator;
use fleet_rating::{Rater, RatingCriteria};
use fleet_region::PathCalculator;

use crate::observer::SimObserver;
use crate::SimResult;

/// Drives the delivery service from tick 0 to the configured end, feeding
/// generated orders in and event lists out to the raters and the observer.
///
/// Create via [`SimulationBuilder`][crate::SimulationBuilder].
pub struct Simulation<P, G> {
    pub(crate) config: SimConfig,
    pub(crate) service: DeliveryService<P>,
    pub(crate) generator: G,
    pub(crate) raters: Vec<Box<dyn Rater>>,
    pub(crate) current_tick: Tick,
}

impl<P: PathCalculator, G: OrderGenerator> Simulation<P, G> {
    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.current_tick < self.config.end_tick() {
            self.tick_once(observer)?;
        }
        observer.on_sim_end(self.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores the end
    /// tick).  Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick_once(observer)?;
        }
        Ok(())
    }

    fn tick_once<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.current_tick;
        observer.on_tick_start(now);

        let orders = self.generator.generate_orders(now);
        let events = self.service.tick(now, orders)?;
        for rater in &mut self.raters {
            rater.on_tick(&events, now)?;
        }

        observer.on_tick_end(now, &events);
        self.current_tick = now + 1;
        Ok(())
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn service(&self) -> &DeliveryService<P> {
        &self.service
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Final (or running) score per configured rater.
    pub fn scores(&self) -> Vec<(RatingCriteria, f64)> {
        self.raters
            .iter()
            .map(|r| (r.criteria(), r.score()))
            .collect()
    }

    /// Rewind to tick 0 and clear all service state.
    ///
    /// Rater state is not rewound — build fresh raters for a fresh scoring
    /// run.
    pub fn reset(&mut self) {
        self.service.reset();
        self.current_tick = Tick::ZERO;
    }

    /// Orders still waiting in dispatcher pending lists, for end-of-run
    /// reporting.
    pub fn pending_order_count(&self) -> usize {
        self.service.pending_orders().len()
    }
}
