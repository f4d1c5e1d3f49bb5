//! Identifier newtypes.
//!
//! Both ids are `Copy + Ord + Hash` so they can serve as map keys and
//! sorted collection elements without ceremony.  Vehicle processing order
//! and dispatcher tie-breaking both rely on the `Ord` impls being the
//! plain integer order.  The inner integer is `pub` for display and
//! logging; nothing else is needed of an id here.

use std::fmt;

/// Identity of a delivery vehicle.  Vehicles are always processed in
/// ascending id order, which is what makes tick results deterministic.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

/// Identity of a confirmed order.  Assigned sequentially by the order
/// generator; used for load/unload and event bookkeeping.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderId(pub u32);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{}", self.0)
    }
}
