//! The vehicle manager: region + vehicles + occupancy + per-tick movement.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use fleet_core::{ConfirmedOrder, Location, OrderId, Tick, VehicleId};
use fleet_region::{PathCalculator, Region};

use crate::event::Event;
use crate::occupied::{Occupancy, Occupied};
use crate::vehicle::{ArrivalAction, Path, Vehicle};
use crate::{RoutingError, RoutingResult};

/// Owns the region (shared read-only), the path calculator, every vehicle,
/// and one [`Occupied`] registry per graph component.
///
/// # Type parameter
///
/// `P` is the routing algorithm (e.g. [`fleet_region::DijkstraPaths`]).
/// Swapping it is a compile-time choice with no runtime overhead.
///
/// # Event buffering
///
/// Events raised *between* ticks (order loads performed by the dispatcher)
/// are buffered and returned at the front of the next tick's batch, so the
/// returned list is always in emission order and `OrderReceived` precedes
/// the matching `DeliverOrder`.
pub struct VehicleManager<P> {
    region: Arc<Region>,
    paths: P,
    vehicles: BTreeMap<VehicleId, Vehicle<P>>,
    node_occupancy: BTreeMap<Location, Occupied>,
    edge_occupancy: BTreeMap<(Location, Location), Occupied>,
    /// Orders that have produced an `OrderReceived` event.
    received_orders: BTreeSet<OrderId>,
    events: Vec<Event>,
    next_vehicle_id: u32,
}

enum Step {
    Idle,
    FinishPath,
    EnterEdge(Location),
    EnterNode(Location),
}

impl<P: PathCalculator> VehicleManager<P> {
    /// Create a manager with no vehicles.
    pub fn new(region: Arc<Region>, paths: P) -> Self {
        let node_occupancy = region
            .nodes()
            .map(|n| (n.location(), Occupied::new(Occupancy::Node(n.location()))))
            .collect();
        let edge_occupancy = region
            .edges()
            .map(|e| {
                let key = (e.location_a(), e.location_b());
                (key, Occupied::new(Occupancy::Edge(key.0, key.1)))
            })
            .collect();
        Self {
            region,
            paths,
            vehicles: BTreeMap::new(),
            node_occupancy,
            edge_occupancy,
            received_orders: BTreeSet::new(),
            events: Vec::new(),
            next_vehicle_id: 0,
        }
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register a vehicle at its starting restaurant.
    ///
    /// The vehicle occupies the restaurant node immediately; its `Spawn`
    /// event is emitted on the first tick it takes part in.
    pub fn add_vehicle(
        &mut self,
        starting_restaurant: Location,
        capacity: f64,
    ) -> RoutingResult<VehicleId> {
        if !(capacity > 0.0) {
            return Err(RoutingError::NonPositiveCapacity(capacity));
        }
        match self.region.node(starting_restaurant) {
            None => return Err(RoutingError::UnknownNode(starting_restaurant)),
            Some(n) if !n.is_restaurant() => {
                return Err(RoutingError::NotARestaurant(starting_restaurant));
            }
            Some(_) => {}
        }

        let id = VehicleId(self.next_vehicle_id);
        self.next_vehicle_id += 1;
        self.vehicles
            .insert(id, Vehicle::new(id, capacity, starting_restaurant));
        self.occupied_node_mut(starting_restaurant)?
            .add_vehicle(id, Tick::ZERO, None);
        Ok(id)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn region(&self) -> &Arc<Region> {
        &self.region
    }

    #[inline]
    pub fn paths(&self) -> &P {
        &self.paths
    }

    pub fn vehicle(&self, id: VehicleId) -> RoutingResult<&Vehicle<P>> {
        self.vehicles
            .get(&id)
            .ok_or(RoutingError::UnknownVehicle(id))
    }

    /// All vehicles, ascending by id.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle<P>> {
        self.vehicles.values()
    }

    pub fn vehicle_ids(&self) -> Vec<VehicleId> {
        self.vehicles.keys().copied().collect()
    }

    pub fn occupied_node(&self, loc: Location) -> Option<&Occupied> {
        self.node_occupancy.get(&loc)
    }

    /// Order-insensitive edge occupancy lookup.
    pub fn occupied_edge(&self, a: Location, b: Location) -> Option<&Occupied> {
        self.edge_occupancy.get(&ordered(a, b))
    }

    /// Ids of the vehicles currently on the node at `loc`, ascending.
    pub fn vehicles_at(&self, loc: Location) -> Vec<VehicleId> {
        self.node_occupancy
            .get(&loc)
            .map(|occ| occ.vehicles().collect())
            .unwrap_or_default()
    }

    // ── Per-tick advance ──────────────────────────────────────────────────

    /// Advance every vehicle one step, in ascending id order, and return the
    /// tick's events (including any buffered between-tick events).
    pub fn tick(&mut self, tick: Tick) -> RoutingResult<Vec<Event>> {
        for id in self.vehicle_ids() {
            let spawn_node = {
                let v = self.vehicle_mut(id)?;
                if v.spawned {
                    None
                } else {
                    v.spawned = true;
                    Some(v.starting_restaurant())
                }
            };
            if let Some(node) = spawn_node {
                self.events.push(Event::Spawn {
                    vehicle: id,
                    node,
                    tick,
                });
            }
            self.step_vehicle(id, tick)?;
        }
        Ok(std::mem::take(&mut self.events))
    }

    /// One state-machine step for one vehicle.
    ///
    /// - empty move queue: nothing to do
    /// - head path exhausted: pop it and run its arrival action; with no
    ///   action, recurse so the next path starts this very tick
    /// - on a node: enter the edge towards the path's next node
    /// - on an edge: enter the next node (consuming it from the path)
    fn step_vehicle(&mut self, id: VehicleId, tick: Tick) -> RoutingResult<()> {
        let step = {
            let v = self.vehicle(id)?;
            match v.move_queue.front() {
                None => Step::Idle,
                Some(path) => match path.nodes().front().copied() {
                    None => Step::FinishPath,
                    Some(next) => match v.occupancy() {
                        Occupancy::Node(_) => Step::EnterEdge(next),
                        Occupancy::Edge(..) => Step::EnterNode(next),
                    },
                },
            }
        };

        match step {
            Step::Idle => Ok(()),
            Step::FinishPath => {
                let Some(path) = self.vehicle_mut(id)?.move_queue.pop_front() else {
                    return Ok(());
                };
                match path.into_arrival_action() {
                    Some(action) => action(self, id, tick),
                    None => self.step_vehicle(id, tick),
                }
            }
            Step::EnterEdge(next) => self.enter_edge(id, next, tick),
            Step::EnterNode(next) => {
                if let Some(path) = self.vehicle_mut(id)?.move_queue.front_mut() {
                    path.pop_node();
                }
                self.enter_node(id, next, tick)
            }
        }
    }

    fn enter_edge(&mut self, id: VehicleId, next: Location, tick: Tick) -> RoutingResult<()> {
        let current = match self.vehicle(id)?.occupancy() {
            Occupancy::Node(loc) => loc,
            Occupancy::Edge(..) => {
                return Err(RoutingError::InvariantViolation(
                    "entering an edge requires being on a node",
                ));
            }
        };
        let key = match self.region.edge(current, next) {
            Some(e) => (e.location_a(), e.location_b()),
            None => return Err(RoutingError::MissingEdge { a: current, b: next }),
        };

        self.occupied_node_mut(current)?
            .remove_vehicle(id)
            .ok_or(RoutingError::VehicleNotOnComponent { vehicle: id })?;
        self.occupied_edge_mut(key)?
            .add_vehicle(id, tick, Some(Occupancy::Node(current)));
        self.vehicle_mut(id)?
            .set_occupancy(Occupancy::Edge(key.0, key.1));
        Ok(())
    }

    fn enter_node(&mut self, id: VehicleId, node: Location, tick: Tick) -> RoutingResult<()> {
        let key = match self.vehicle(id)?.occupancy() {
            Occupancy::Edge(a, b) => (a, b),
            Occupancy::Node(_) => {
                return Err(RoutingError::InvariantViolation(
                    "entering a node requires being on an edge",
                ));
            }
        };

        self.occupied_edge_mut(key)?
            .remove_vehicle(id)
            .ok_or(RoutingError::VehicleNotOnComponent { vehicle: id })?;
        self.occupied_node_mut(node)?
            .add_vehicle(id, tick, Some(Occupancy::Edge(key.0, key.1)));
        self.vehicle_mut(id)?.set_occupancy(Occupancy::Node(node));

        self.events.push(Event::ArrivedAtNode {
            vehicle: id,
            node,
            last_edge: key,
            tick,
        });
        if self.region.node(node).is_some_and(|n| n.is_restaurant()) {
            self.events.push(Event::ArrivedAtRestaurant {
                vehicle: id,
                restaurant: node,
                tick,
            });
        }
        Ok(())
    }

    // ── Move planning ─────────────────────────────────────────────────────

    /// Append a travel leg to `target`, planned from wherever the queue
    /// currently ends (the vehicle's node if the queue is empty).
    ///
    /// Rejects `target == current node` when the queue is empty.  An
    /// unreachable `target` queues an empty leg — callers that care check
    /// reachability first.
    pub fn move_queued(
        &mut self,
        id: VehicleId,
        target: Location,
        on_arrival: Option<ArrivalAction<P>>,
    ) -> RoutingResult<()> {
        if self.region.node(target).is_none() {
            return Err(RoutingError::UnknownNode(target));
        }

        let start = {
            let v = self.vehicle(id)?;
            if v.move_queue.is_empty() {
                match v.occupancy() {
                    Occupancy::Node(loc) if loc == target => {
                        return Err(RoutingError::MoveToCurrentNode {
                            vehicle: id,
                            node: target,
                        });
                    }
                    Occupancy::Node(loc) => loc,
                    Occupancy::Edge(..) => {
                        return Err(RoutingError::InvariantViolation(
                            "vehicle on an edge with an empty move queue",
                        ));
                    }
                }
            } else if let Some(tail) = v
                .move_queue
                .iter()
                .rev()
                .find_map(|p| p.nodes().back().copied())
            {
                tail
            } else {
                match v.occupancy() {
                    Occupancy::Node(loc) => loc,
                    Occupancy::Edge(..) => {
                        return Err(RoutingError::InvariantViolation(
                            "vehicle on an edge with no queued nodes",
                        ));
                    }
                }
            }
        };

        let nodes = self.paths.path(&self.region, start, target);
        self.vehicle_mut(id)?
            .move_queue
            .push_back(Path::new(nodes, on_arrival));
        Ok(())
    }

    /// Discard the queue and replan to `target` immediately.
    ///
    /// A vehicle mid-edge first gets a one-step leg to the edge's far
    /// endpoint (opposite its previous node) — it cannot reverse mid-edge —
    /// and the new plan starts from there.
    pub fn move_direct(
        &mut self,
        id: VehicleId,
        target: Location,
        on_arrival: Option<ArrivalAction<P>>,
    ) -> RoutingResult<()> {
        if self.region.node(target).is_none() {
            return Err(RoutingError::UnknownNode(target));
        }

        let escape = {
            let v = self.vehicle(id)?;
            match v.occupancy() {
                Occupancy::Node(_) => None,
                Occupancy::Edge(a, b) => {
                    let occ = self
                        .edge_occupancy
                        .get(&(a, b))
                        .ok_or(RoutingError::UnknownComponent)?;
                    let stats = occ
                        .stats(id)
                        .ok_or(RoutingError::VehicleNotOnComponent { vehicle: id })?;
                    let prev = match stats.previous {
                        Some(Occupancy::Node(p)) => p,
                        _ => {
                            return Err(RoutingError::InvariantViolation(
                                "previous component of an edge occupant must be a node",
                            ));
                        }
                    };
                    Some(if prev == a { b } else { a })
                }
            }
        };

        let v = self.vehicle_mut(id)?;
        v.move_queue.clear();
        if let Some(far) = escape {
            v.move_queue
                .push_back(Path::new(VecDeque::from([far]), None));
        }
        self.move_queued(id, target, on_arrival)
    }

    // ── Loading and delivery ──────────────────────────────────────────────

    /// Load `order` onto `vehicle` at the restaurant node `restaurant`.
    ///
    /// Emits `OrderReceived` the first time the order is seen.  Fails when
    /// the node is not a restaurant, the vehicle is elsewhere, or capacity
    /// would be exceeded.
    pub fn load_order(
        &mut self,
        restaurant: Location,
        vehicle: VehicleId,
        order: ConfirmedOrder,
        tick: Tick,
    ) -> RoutingResult<()> {
        match self.region.node(restaurant) {
            None => return Err(RoutingError::UnknownNode(restaurant)),
            Some(n) if !n.is_restaurant() => {
                return Err(RoutingError::NotARestaurant(restaurant));
            }
            Some(_) => {}
        }
        if self.vehicle(vehicle)?.occupancy() != Occupancy::Node(restaurant) {
            return Err(RoutingError::VehicleNotAtNode {
                vehicle,
                node: restaurant,
            });
        }

        let event_copy = order.clone();
        self.vehicle_mut(vehicle)?.load_order(order)?;
        if self.received_orders.insert(event_copy.id()) {
            self.events.push(Event::OrderReceived {
                order: event_copy,
                tick,
            });
        }
        Ok(())
    }

    /// Deliver a loaded order at the neighborhood the vehicle stands on.
    ///
    /// Stamps the order's delivery tick and emits `DeliverOrder`.  A
    /// delivery with no preceding `OrderReceived` is a fatal invariant
    /// violation.
    pub fn deliver_order(
        &mut self,
        vehicle: VehicleId,
        order: OrderId,
        tick: Tick,
    ) -> RoutingResult<()> {
        let at = match self.vehicle(vehicle)?.occupancy() {
            Occupancy::Node(loc) => loc,
            Occupancy::Edge(..) => {
                return Err(RoutingError::InvariantViolation(
                    "cannot deliver while traversing an edge",
                ));
            }
        };
        match self.region.node(at) {
            None => return Err(RoutingError::UnknownNode(at)),
            Some(n) if !n.is_neighborhood() => {
                return Err(RoutingError::NotANeighborhood(at));
            }
            Some(_) => {}
        }
        if !self.received_orders.contains(&order) {
            return Err(RoutingError::DeliverBeforeReceive(order));
        }

        let mut delivered = self
            .vehicle_mut(vehicle)?
            .unload_order(order)
            .ok_or(RoutingError::OrderNotLoaded { vehicle, order })?;
        delivered.mark_delivered(tick)?;
        self.events.push(Event::DeliverOrder {
            vehicle,
            order: delivered,
            tick,
        });
        Ok(())
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Return every vehicle to its starting restaurant with no orders and no
    /// queued moves, and drop all buffered events.  The region is untouched.
    pub fn reset(&mut self) {
        for occ in self.node_occupancy.values_mut() {
            occ.clear();
        }
        for occ in self.edge_occupancy.values_mut() {
            occ.clear();
        }
        for v in self.vehicles.values_mut() {
            v.reset();
            if let Some(occ) = self.node_occupancy.get_mut(&v.starting_restaurant()) {
                occ.add_vehicle(v.id(), Tick::ZERO, None);
            }
        }
        self.events.clear();
        self.received_orders.clear();
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn vehicle_mut(&mut self, id: VehicleId) -> RoutingResult<&mut Vehicle<P>> {
        self.vehicles
            .get_mut(&id)
            .ok_or(RoutingError::UnknownVehicle(id))
    }

    fn occupied_node_mut(&mut self, loc: Location) -> RoutingResult<&mut Occupied> {
        self.node_occupancy
            .get_mut(&loc)
            .ok_or(RoutingError::UnknownComponent)
    }

    fn occupied_edge_mut(&mut self, key: (Location, Location)) -> RoutingResult<&mut Occupied> {
        self.edge_occupancy
            .get_mut(&key)
            .ok_or(RoutingError::UnknownComponent)
    }
}

#[inline]
fn ordered(a: Location, b: Location) -> (Location, Location) {
    if a <= b { (a, b) } else { (b, a) }
}
