use fleet_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("region has no restaurants to order from")]
    NoRestaurants,

    #[error("region has no neighborhoods to deliver to")]
    NoNeighborhoods,

    #[error("restaurant '{0}' has an empty menu")]
    EmptyMenu(String),

    #[error("maximum order weight must be positive, got {0}")]
    NonPositiveMaxWeight(f64),

    #[error("standard deviation must be positive and finite, got {0}")]
    InvalidStandardDeviation(f64),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type OrderResult<T> = Result<T, OrderError>;
