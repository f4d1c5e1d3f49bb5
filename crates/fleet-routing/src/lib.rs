//! `fleet-routing` — vehicles, occupancy, and per-tick movement.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`event`]    | `Event` — everything the manager reports per tick        |
//! | [`occupied`] | `Occupancy` handle, `Occupied` per-component registry    |
//! | [`vehicle`]  | `Vehicle`, `Path`, `ArrivalAction`                       |
//! | [`manager`]  | `VehicleManager` — owns region, vehicles, occupancy      |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                       |
//!
//! # Movement model
//!
//! A vehicle advances exactly one graph component per tick: from a node onto
//! the connecting edge, then from the edge onto the next node.  Edge
//! durations are **planning and scoring** costs only — they never stretch
//! the two-transition traversal.  Keep this in mind when reading the
//! dispatcher: it reasons in duration units while the state machine steps in
//! components.

pub mod error;
pub mod event;
pub mod manager;
pub mod occupied;
pub mod vehicle;


pub use error::{RoutingError, RoutingResult};
pub use event::Event;
pub use manager::VehicleManager;
pub use occupied::{Occupancy, Occupied, VehicleStats};
pub use vehicle::{ArrivalAction, Path, Vehicle};
