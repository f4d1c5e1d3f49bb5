use fleet_core::{Location, OrderId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RatingError {
    #[error("rating factor out of range: {0}")]
    FactorOutOfRange(f64),

    #[error("max ticks off must be positive")]
    NonPositiveMaxTicksOff,

    #[error("order {0} delivered before it was received")]
    DeliverBeforeReceive(OrderId),

    #[error("delivered order {0} carries no delivery tick")]
    MissingDeliveryTick(OrderId),

    #[error("event references unknown edge {a}-{b}")]
    UnknownEdge { a: Location, b: Location },
}

pub type RatingResult<T> = Result<T, RatingError>;
