//! Events emitted by the vehicle manager.
//!
//! Events are plain data, produced in emission order (vehicles processed in
//! ascending id order; within a vehicle, in the order the state machine
//! produces them).  External consumers — the delivery service and the
//! raters — drive all their bookkeeping off this list.

use fleet_core::{ConfirmedOrder, Location, Tick, VehicleId};

/// Something that happened during a manager tick.
#[derive(Clone, PartialEq, Debug)]
pub enum Event {
    /// A vehicle entered the simulation, at its starting restaurant.
    /// Emitted once per vehicle, on the first tick.
    Spawn {
        vehicle: VehicleId,
        node: Location,
        tick: Tick,
    },

    /// A vehicle stepped off an edge onto a node.
    ArrivedAtNode {
        vehicle: VehicleId,
        node: Location,
        /// The edge just traversed, ascending endpoints.
        last_edge: (Location, Location),
        tick: Tick,
    },

    /// Emitted in addition to [`Event::ArrivedAtNode`] when the node is a
    /// restaurant.  The delivery service uses this to hand the vehicle back
    /// to the restaurant's dispatcher.
    ArrivedAtRestaurant {
        vehicle: VehicleId,
        restaurant: Location,
        tick: Tick,
    },

    /// An order was loaded onto a vehicle for the first time.
    OrderReceived { order: ConfirmedOrder, tick: Tick },

    /// An order reached its neighborhood.  The carried order has its
    /// `actual_delivery_tick` stamped.
    DeliverOrder {
        vehicle: VehicleId,
        order: ConfirmedOrder,
        tick: Tick,
    },
}

impl Event {
    /// The tick the event was emitted at.
    pub fn tick(&self) -> Tick {
        match self {
            Event::Spawn { tick, .. }
            | Event::ArrivedAtNode { tick, .. }
            | Event::ArrivedAtRestaurant { tick, .. }
            | Event::OrderReceived { tick, .. }
            | Event::DeliverOrder { tick, .. } => *tick,
        }
    }

    /// Short kind tag, used by the CSV event log.
    pub fn label(&self) -> &'static str {
        match self {
            Event::Spawn { .. } => "spawn",
            Event::ArrivedAtNode { .. } => "arrived_at_node",
            Event::ArrivedAtRestaurant { .. } => "arrived_at_restaurant",
            Event::OrderReceived { .. } => "order_received",
            Event::DeliverOrder { .. } => "deliver_order",
        }
    }
}
