use fleet_core::{Location, OrderId};
use fleet_routing::RoutingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("route legs {a} and {b} are not adjacent")]
    RouteNotAdjacent { a: Location, b: Location },

    #[error("order {0} does not appear on the route")]
    OrderNotInRoute(OrderId),

    #[error("no dispatcher manages a restaurant at {0}")]
    NoDispatcherFor(Location),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
