//! Base error type.
//!
//! Sub-crates define their own error enums and either wrap `CoreError` as a
//! variant or convert it via `From`.  Both patterns are used; prefer
//! whichever keeps error sites clean.

use thiserror::Error;

use crate::{OrderId, Tick};

/// Errors raised by the foundational value types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid tick interval: start {start} is after end {end}")]
    InvalidInterval { start: Tick, end: Tick },

    #[error("order weight must be positive, got {0}")]
    NonPositiveWeight(f64),

    #[error("order {0} already has a delivery tick")]
    AlreadyDelivered(OrderId),
}

/// Shorthand result type for this crate.
pub type CoreResult<T> = Result<T, CoreError>;
