//! Simulation observer trait for progress reporting and data collection.

use fleet_core::Tick;
use fleet_routing::Event;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at tick
/// boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, events: &[Event]) {
///         if !events.is_empty() {
///             println!("{tick}: {} events", events.len());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before order generation.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the events it produced.
    fn on_tick_end(&mut self, _tick: Tick, _events: &[Event]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
