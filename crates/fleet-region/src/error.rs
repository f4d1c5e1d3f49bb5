use fleet_core::Location;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("edge endpoints out of order: {a} > {b}")]
    EdgeEndpointsOutOfOrder { a: Location, b: Location },

    #[error("edge {a}-{b} must have a positive duration")]
    NonPositiveDuration { a: Location, b: Location },

    #[error("edge '{name}' references {endpoint}, which has no node")]
    UnknownEndpoint { name: String, endpoint: Location },

    #[error("edge '{name}' connects {at} to itself")]
    SelfLoop { name: String, at: Location },

    #[error("duplicate edge between {a} and {b}")]
    DuplicateEdge { a: Location, b: Location },
}

pub type RegionResult<T> = Result<T, RegionError>;
