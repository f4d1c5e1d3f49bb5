//! `fleet-dispatch` — order-to-route planning and fleet coordination.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`route`]      | `RouteNode` + route cost functions                     |
//! | [`dispatcher`] | `RestaurantDispatcher` — incremental order insertion   |
//! | [`service`]    | `DeliveryService` — manager + dispatchers + rebalancer |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                   |
//!
//! # Planning model
//!
//! Each restaurant owns one dispatcher.  A dispatcher keeps a planned route
//! per present vehicle (empty route = idle) and inserts every incoming
//! order into the cheapest position across three strategies: a fresh route,
//! a merge onto an existing stop, or a detour spliced in after any existing
//! stop.  Orders whose windows are still too far out ride in a pending list
//! and are re-attempted every tick — that retry loop is the only retry
//! mechanism in the system.
//!
//! All route costs are sums of edge durations rooted at the managing
//! restaurant; the vehicle state machine itself moves one component per
//! tick regardless of duration.

pub mod dispatcher;
pub mod error;
pub mod route;
pub mod service;

#[cfg(test)]
mod tests;

pub use dispatcher::RestaurantDispatcher;
pub use error::{DispatchError, DispatchResult};
pub use route::{
    delivery_duration, route_distance, route_weight, ticks_until_off, total_ticks_off, RouteNode,
};
pub use service::DeliveryService;
