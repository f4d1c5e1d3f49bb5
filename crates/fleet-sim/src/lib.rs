//! `fleet-sim` — the tick loop that drives everything else.
//!
//! # Per-tick data flow
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Generate — ask the OrderGenerator for the tick's orders.
//!   ② Dispatch — DeliveryService::tick: advance vehicles, feed events
//!                back into dispatcher membership, plan and send routes,
//!                rebalance idle vehicles.
//!   ③ Rate     — every Rater digests the tick's event list.
//!   ④ Observe  — observer hooks fire for progress/output.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`sim`]      | `Simulation` — the runner                              |
//! | [`builder`]  | `SimulationBuilder`                                    |
//! | [`observer`] | `SimObserver` trait, `NoopObserver`                    |
//! | [`output`]   | `EventWriter`, `CsvEventWriter`, `EventLogObserver`    |
//! | [`error`]    | `SimError`, `OutputError`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let manager = VehicleManager::new(region.clone(), DijkstraPaths);
//! let service = DeliveryService::new(manager, DispatchConfig::default());
//! let generator = FridayOrderGenerator::builder().seed(42).build(&region)?;
//! let mut sim = SimulationBuilder::new(config, service, generator)
//!     .rater(Box::new(InTimeRater::new(5, 25)?))
//!     .build();
//! sim.run(&mut NoopObserver)?;
//! for (criteria, score) in sim.scores() {
//!     println!("{criteria}: {score:.3}");
//! }
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod output;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimulationBuilder;
pub use error::{OutputError, OutputResult, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use output::{CsvEventWriter, EventLogObserver, EventWriter};
pub use sim::Simulation;
