//! `fleet-rating` — scores a run from its event stream.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`rater`]   | The `Rater` trait + `RatingCriteria`                   |
//! | [`amount`]  | `AmountDeliveredRater`                                 |
//! | [`in_time`] | `InTimeRater`                                          |
//! | [`travel`]  | `TravelDistanceRater`                                  |
//! | [`error`]   | `RatingError`, `RatingResult<T>`                       |
//!
//! Raters are passive observers: they receive each tick's event list,
//! accumulate counters, and produce a final score in `[0, 1]`.  They never
//! influence the simulation.  A `DeliverOrder` with no preceding
//! `OrderReceived` is a broken event stream and fails the run.

pub mod amount;
pub mod error;
pub mod in_time;
pub mod rater;
pub mod travel;


pub use amount::AmountDeliveredRater;
pub use error::{RatingError, RatingResult};
pub use in_time::InTimeRater;
pub use rater::{Rater, RatingCriteria};
pub use travel::TravelDistanceRater;
