//! `fleet-core` — foundational types for the `fleetsim` delivery simulator.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It
//! intentionally has no `fleet-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `VehicleId`, `OrderId`                                  |
//! | [`location`]  | `Location` — integer grid coordinate                    |
//! | [`time`]      | `Tick`, `TickInterval`                                  |
//! | [`distance`]  | `DistanceCalculator`, Euclidean/Manhattan impls         |
//! | [`order`]     | `ConfirmedOrder`                                        |
//! | [`config`]    | `SimConfig`, `DispatchConfig`                           |
//! | [`rng`]       | `SimRng` (seeded, deterministic)                        |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the public value types.  |

pub mod config;
pub mod distance;
pub mod error;
pub mod ids;
pub mod location;
pub mod order;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DispatchConfig, SimConfig};
pub use distance::{DistanceCalculator, EuclideanDistance, ManhattanDistance};
pub use error::{CoreError, CoreResult};
pub use ids::{OrderId, VehicleId};
pub use location::Location;
pub use order::ConfirmedOrder;
pub use rng::SimRng;
pub use time::{Tick, TickInterval};
