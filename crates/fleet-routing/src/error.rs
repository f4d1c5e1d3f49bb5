use fleet_core::{CoreError, Location, OrderId, VehicleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("vehicle {0} not found")]
    UnknownVehicle(VehicleId),

    #[error("no node at {0}")]
    UnknownNode(Location),

    #[error("node at {0} is not a restaurant")]
    NotARestaurant(Location),

    #[error("node at {0} is not a neighborhood")]
    NotANeighborhood(Location),

    #[error("no edge between {a} and {b}")]
    MissingEdge { a: Location, b: Location },

    #[error("occupancy registry missing for a region component")]
    UnknownComponent,

    #[error("vehicle {vehicle} is not on the expected component")]
    VehicleNotOnComponent { vehicle: VehicleId },

    #[error("vehicle {vehicle} is not at node {node}")]
    VehicleNotAtNode { vehicle: VehicleId, node: Location },

    #[error("vehicle {vehicle} cannot move to its own node {node}")]
    MoveToCurrentNode { vehicle: VehicleId, node: Location },

    #[error("vehicle {vehicle} overloaded at {load}")]
    VehicleOverloaded { vehicle: VehicleId, load: f64 },

    #[error("order {order} is not loaded on vehicle {vehicle}")]
    OrderNotLoaded { vehicle: VehicleId, order: OrderId },

    #[error("order {0} delivered before it was received")]
    DeliverBeforeReceive(OrderId),

    #[error("vehicle capacity must be positive, got {0}")]
    NonPositiveCapacity(f64),

    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
