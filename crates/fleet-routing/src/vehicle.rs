//! Per-vehicle state: loaded orders and the move queue.

use std::collections::VecDeque;
use std::fmt;

use fleet_core::{ConfirmedOrder, Location, OrderId, Tick, VehicleId};

use crate::manager::VehicleManager;
use crate::occupied::Occupancy;
use crate::RoutingResult;

/// One-shot callback fired when a vehicle finishes a [`Path`].
///
/// Runs synchronously inside the vehicle's move step, after the finished
/// path has been popped from the queue, so it may freely re-enter the
/// manager — typically to deliver the orders planned for that node.
pub type ArrivalAction<P> =
    Box<dyn FnOnce(&mut VehicleManager<P>, VehicleId, Tick) -> RoutingResult<()>>;

// ── Path ─────────────────────────────────────────────────────────────────────

/// A queued leg of travel: the nodes still to enter (next first) and an
/// optional arrival action.
pub struct Path<P> {
    nodes: VecDeque<Location>,
    on_arrival: Option<ArrivalAction<P>>,
}

impl<P> Path<P> {
    pub(crate) fn new(nodes: VecDeque<Location>, on_arrival: Option<ArrivalAction<P>>) -> Self {
        Self { nodes, on_arrival }
    }

    /// Nodes still to enter, in traversal order.
    #[inline]
    pub fn nodes(&self) -> &VecDeque<Location> {
        &self.nodes
    }

    pub(crate) fn pop_node(&mut self) -> Option<Location> {
        self.nodes.pop_front()
    }

    pub(crate) fn into_arrival_action(self) -> Option<ArrivalAction<P>> {
        self.on_arrival
    }
}

impl<P> fmt::Debug for Path<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("nodes", &self.nodes)
            .field("has_arrival_action", &self.on_arrival.is_some())
            .finish()
    }
}

// ── Vehicle ──────────────────────────────────────────────────────────────────

/// A delivery vehicle.
///
/// Owned exclusively by the [`VehicleManager`]; the dispatcher refers to
/// vehicles by id only.
pub struct Vehicle<P> {
    id: VehicleId,
    capacity: f64,
    starting_restaurant: Location,
    occupancy: Occupancy,
    orders: Vec<ConfirmedOrder>,
    pub(crate) move_queue: VecDeque<Path<P>>,
    pub(crate) spawned: bool,
}

impl<P> Vehicle<P> {
    pub(crate) fn new(id: VehicleId, capacity: f64, starting_restaurant: Location) -> Self {
        Self {
            id,
            capacity,
            starting_restaurant,
            occupancy: Occupancy::Node(starting_restaurant),
            orders: Vec::new(),
            move_queue: VecDeque::new(),
            spawned: false,
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Maximum total order weight this vehicle can carry.
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// The restaurant the vehicle entered the simulation at.  Fixed for the
    /// whole run; `reset` returns the vehicle here.
    #[inline]
    pub fn starting_restaurant(&self) -> Location {
        self.starting_restaurant
    }

    #[inline]
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub(crate) fn set_occupancy(&mut self, occupancy: Occupancy) {
        self.occupancy = occupancy;
    }

    /// Currently loaded orders.
    #[inline]
    pub fn orders(&self) -> &[ConfirmedOrder] {
        &self.orders
    }

    /// Sum of loaded order weights.
    pub fn current_weight(&self) -> f64 {
        self.orders.iter().map(ConfirmedOrder::weight).sum()
    }

    /// Queued travel legs, front first.
    #[inline]
    pub fn queued_paths(&self) -> &VecDeque<Path<P>> {
        &self.move_queue
    }

    /// Attach an order, enforcing capacity.
    ///
    /// Two checks, in order: the loaded-order *count* against the capacity
    /// (a count compared against a weight limit — see DESIGN.md), then the
    /// combined weight.
    pub(crate) fn load_order(&mut self, order: ConfirmedOrder) -> RoutingResult<()> {
        if self.orders.len() as f64 >= self.capacity {
            return Err(crate::RoutingError::VehicleOverloaded {
                vehicle: self.id,
                load: self.orders.len() as f64,
            });
        }
        let new_weight = self.current_weight() + order.weight();
        if new_weight > self.capacity {
            return Err(crate::RoutingError::VehicleOverloaded {
                vehicle: self.id,
                load: new_weight,
            });
        }
        self.orders.push(order);
        Ok(())
    }

    /// Detach an order by identity.
    pub(crate) fn unload_order(&mut self, order: OrderId) -> Option<ConfirmedOrder> {
        let idx = self.orders.iter().position(|o| o.id() == order)?;
        Some(self.orders.remove(idx))
    }

    /// Return to the starting restaurant; drop all orders and queued moves.
    pub(crate) fn reset(&mut self) {
        self.occupancy = Occupancy::Node(self.starting_restaurant);
        self.orders.clear();
        self.move_queue.clear();
    }
}

impl<P> fmt::Debug for Vehicle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vehicle")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("occupancy", &self.occupancy)
            .field("orders", &self.orders.len())
            .field("queued_paths", &self.move_queue.len())
            .finish()
    }
}
