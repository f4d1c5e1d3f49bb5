//! The order-generator contract.

use fleet_core::{ConfirmedOrder, Tick};

/// Supplies the orders that become known at a given tick.
///
/// Implementations must be pure functions of the tick: repeated calls with
/// the same tick return the same orders.
pub trait OrderGenerator {
    /// The orders arriving at `tick`.  Empty past the generator's horizon.
    fn generate_orders(&self, tick: Tick) -> Vec<ConfirmedOrder>;
}
