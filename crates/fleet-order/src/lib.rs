//! `fleet-order` — the order stream fed into the delivery service.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`generator`] | The `OrderGenerator` trait                            |
//! | [`friday`]    | `FridayOrderGenerator` + builder                      |
//! | [`error`]     | `OrderError`, `OrderResult<T>`                        |
//!
//! Generators are pure with respect to the tick: the whole order timetable
//! is drawn up front from a seeded RNG, so asking for the same tick twice
//! returns the same orders and two generators with the same seed and region
//! produce identical streams.

pub mod error;
pub mod friday;
pub mod generator;


pub use error::{OrderError, OrderResult};
pub use friday::{FridayGeneratorBuilder, FridayOrderGenerator};
pub use generator::OrderGenerator;
