//! Per-restaurant order planning.

use std::collections::BTreeMap;

use fleet_core::{ConfirmedOrder, DispatchConfig, Location, Tick, VehicleId};
use fleet_region::{PathCalculator, Region};
use fleet_routing::VehicleManager;

use crate::route::{
    delivery_duration, route_distance, route_weight, ticks_until_off, total_ticks_off, RouteNode,
};
use crate::DispatchResult;

/// Outcome of comparing a candidate route against the current best.
enum RouteCmp {
    /// The current best stays.
    Keep,
    /// The candidate becomes the best.
    Switch,
    /// The candidate would deliver the order before its window opens —
    /// abort the whole search and park the order as pending.
    Break,
}

/// Plans routes for the vehicles currently at one restaurant.
///
/// State is deliberately small: a planned route per present vehicle (empty
/// = idle), the vehicles expected to arrive here later, and the orders that
/// could not be scheduled yet.  Routes are keyed by vehicle id in an
/// ordered map so that candidate evaluation and send-out both run in a
/// reproducible order.
pub struct RestaurantDispatcher {
    restaurant: Location,
    planned_routes: BTreeMap<VehicleId, Vec<RouteNode>>,
    queued_vehicles: Vec<VehicleId>,
    pending_orders: Vec<ConfirmedOrder>,
}

impl RestaurantDispatcher {
    pub fn new(restaurant: Location) -> Self {
        Self {
            restaurant,
            planned_routes: BTreeMap::new(),
            queued_vehicles: Vec::new(),
            pending_orders: Vec::new(),
        }
    }

    /// The restaurant this dispatcher manages.
    #[inline]
    pub fn restaurant(&self) -> Location {
        self.restaurant
    }

    // ── Vehicle membership ────────────────────────────────────────────────

    /// Register a vehicle as present and idle.  Called on spawn and on
    /// every arrival at this restaurant; an arriving vehicle starts with a
    /// fresh empty route.
    pub fn add_vehicle(&mut self, vehicle: VehicleId) {
        self.planned_routes.insert(vehicle, Vec::new());
        self.queued_vehicles.retain(|&q| q != vehicle);
    }

    /// Drop a vehicle and its planned route.
    pub fn remove_vehicle(&mut self, vehicle: VehicleId) {
        self.planned_routes.remove(&vehicle);
    }

    /// Record a vehicle expected to arrive here once its current trip ends.
    pub fn add_queued_vehicle(&mut self, vehicle: VehicleId) {
        self.queued_vehicles.push(vehicle);
    }

    /// Vehicles expected but not yet present.
    #[inline]
    pub fn queued_vehicles(&self) -> &[VehicleId] {
        &self.queued_vehicles
    }

    /// The count the send-out and rebalancing policies compare against:
    /// vehicles expected to become available here.
    #[inline]
    pub fn total_available(&self) -> usize {
        self.queued_vehicles.len()
    }

    /// Present vehicles with an empty planned route, ascending by id.
    pub fn idle_vehicles(&self) -> Vec<VehicleId> {
        self.planned_routes
            .iter()
            .filter(|(_, route)| route.is_empty())
            .map(|(&v, _)| v)
            .collect()
    }

    /// The lowest-id idle vehicle, if any.
    pub fn first_idle(&self) -> Option<VehicleId> {
        self.planned_routes
            .iter()
            .find(|(_, route)| route.is_empty())
            .map(|(&v, _)| v)
    }

    /// The planned route for `vehicle`, when it is present.
    pub fn planned_route(&self, vehicle: VehicleId) -> Option<&[RouteNode]> {
        self.planned_routes.get(&vehicle).map(Vec::as_slice)
    }

    /// Orders waiting to be scheduled.
    #[inline]
    pub fn pending_orders(&self) -> &[ConfirmedOrder] {
        &self.pending_orders
    }

    pub(crate) fn take_route(&mut self, vehicle: VehicleId) -> Option<Vec<RouteNode>> {
        self.planned_routes.remove(&vehicle)
    }

    // ── Per-tick planning ─────────────────────────────────────────────────

    /// Re-attempt pending orders, accept the new ones, and return the
    /// vehicles whose routes are due to leave.
    ///
    /// A route leaves when its remaining slack drops below
    /// `config.send_out_slack_ticks` or its weight reaches
    /// `config.send_out_weight_frac` of the vehicle capacity.
    pub fn tick<P: PathCalculator>(
        &mut self,
        manager: &VehicleManager<P>,
        now: Tick,
        new_orders: Vec<ConfirmedOrder>,
        config: &DispatchConfig,
    ) -> DispatchResult<Vec<VehicleId>> {
        // Draining first means an order deferred again this tick is not
        // retried until the next one.
        for order in std::mem::take(&mut self.pending_orders) {
            self.accept_order(manager, order, now)?;
        }
        for order in new_orders {
            self.accept_order(manager, order, now)?;
        }

        let region = manager.region();
        let mut due = Vec::new();
        for (&vehicle, route) in &self.planned_routes {
            if route.is_empty() {
                continue;
            }
            let slack = ticks_until_off(region, self.restaurant, route, now)?;
            let capacity = manager.vehicle(vehicle)?.capacity();
            if slack < config.send_out_slack_ticks
                || route_weight(route) >= config.send_out_weight_frac * capacity
            {
                due.push(vehicle);
            }
        }
        Ok(due)
    }

    /// Find the best `(vehicle, route)` insertion for `order` and commit it.
    ///
    /// Three candidate shapes are tried per vehicle: a fresh route when its
    /// plan is empty, a merge when the target is already a stop, and a
    /// detour spliced in after every existing stop.  The first candidate
    /// that would arrive before the window opens aborts the entire search
    /// and parks the order as pending — even when another vehicle still had
    /// a feasible insertion.  A committed plan must also arrive strictly
    /// after the window opens relative to `now`; otherwise the order waits.
    pub fn accept_order<P: PathCalculator>(
        &mut self,
        manager: &VehicleManager<P>,
        order: ConfirmedOrder,
        now: Tick,
    ) -> DispatchResult<()> {
        let region = manager.region();
        // One shortest-path fan-in to the target, reused by every detour
        // candidate below.
        let paths = manager.paths().all_paths_to(region, order.location());

        let mut best: Option<(VehicleId, Vec<RouteNode>)> = None;

        for (&vehicle, route) in &self.planned_routes {
            let capacity = manager.vehicle(vehicle)?.capacity();
            if route_weight(route) + order.weight() > capacity {
                continue;
            }

            // Idle vehicle: a fresh route straight to the target.
            if route.is_empty() {
                let path = manager.paths().path(region, self.restaurant, order.location());
                if path.is_empty() {
                    continue;
                }
                let mut candidate: Vec<RouteNode> =
                    path.iter().map(|&loc| RouteNode::passthrough(loc)).collect();
                if let Some(last) = candidate.last_mut() {
                    last.orders.push(order.clone());
                }
                match self.compare_route(region, best.as_ref().map(|(_, r)| r.as_slice()), &candidate, &order, now)? {
                    RouteCmp::Break => {
                        self.pending_orders.push(order);
                        return Ok(());
                    }
                    RouteCmp::Switch => best = Some((vehicle, candidate)),
                    RouteCmp::Keep => {}
                }
                continue;
            }

            // Target already on the route: add the order to that stop.
            if let Some(idx) = route.iter().position(|rn| rn.location == order.location()) {
                let mut candidate = route.clone();
                candidate[idx].orders.push(order.clone());
                match self.compare_route(region, best.as_ref().map(|(_, r)| r.as_slice()), &candidate, &order, now)? {
                    RouteCmp::Break => {
                        self.pending_orders.push(order);
                        return Ok(());
                    }
                    RouteCmp::Switch => best = Some((vehicle, candidate)),
                    RouteCmp::Keep => {}
                }
                continue;
            }

            // Detour after every existing stop: out to the target, then back
            // towards the stop's successor.
            for i in 0..route.len() {
                let attachment = route[i].location;
                let Some(to_target) = paths.get(&attachment) else {
                    continue;
                };
                if to_target.is_empty() {
                    continue;
                }
                let mut insert: Vec<RouteNode> = to_target
                    .iter()
                    .map(|&loc| RouteNode::passthrough(loc))
                    .collect();
                if let Some(last) = insert.last_mut() {
                    last.orders.push(order.clone());
                }

                if i + 1 < route.len() {
                    let successor = route[i + 1].location;
                    let Some(from_successor) = paths.get(&successor) else {
                        continue;
                    };
                    let mut back: Vec<RouteNode> = from_successor
                        .iter()
                        .map(|&loc| RouteNode::passthrough(loc))
                        .collect();
                    // The last node is the delivery stop itself, already at
                    // the end of `insert`; walk the rest in reverse to get
                    // back towards the successor.
                    back.pop();
                    back.reverse();
                    insert.extend(back);
                }

                let mut candidate = route.clone();
                candidate.splice(i + 1..i + 1, insert);
                match self.compare_route(region, best.as_ref().map(|(_, r)| r.as_slice()), &candidate, &order, now)? {
                    RouteCmp::Break => {
                        self.pending_orders.push(order);
                        return Ok(());
                    }
                    RouteCmp::Switch => best = Some((vehicle, candidate)),
                    RouteCmp::Keep => {}
                }
            }
        }

        match best {
            None => self.pending_orders.push(order),
            Some((vehicle, candidate)) => {
                let duration = delivery_duration(region, self.restaurant, &candidate, &order)?;
                // Strictly later than the window start — at the boundary the
                // order keeps waiting one more tick.
                if now + duration > order.delivery_interval().start() {
                    self.planned_routes.insert(vehicle, candidate);
                } else {
                    self.pending_orders.push(order);
                }
            }
        }
        Ok(())
    }

    fn compare_route(
        &self,
        region: &Region,
        old: Option<&[RouteNode]>,
        new: &[RouteNode],
        order: &ConfirmedOrder,
        now: Tick,
    ) -> DispatchResult<RouteCmp> {
        let duration = delivery_duration(region, self.restaurant, new, order)?;
        if now + duration < order.delivery_interval().start() {
            return Ok(RouteCmp::Break);
        }
        let Some(old) = old else {
            return Ok(RouteCmp::Switch);
        };

        let old_off = total_ticks_off(region, self.restaurant, old, now)?;
        let new_off = total_ticks_off(region, self.restaurant, new, now)?;

        // Both on time: the shorter plan wins.
        if old_off == 0 && new_off == 0 {
            let old_distance = route_distance(region, self.restaurant, old)?;
            let new_distance = route_distance(region, self.restaurant, new)?;
            return Ok(if new_distance < old_distance {
                RouteCmp::Switch
            } else {
                RouteCmp::Keep
            });
        }

        Ok(if new_off < old_off {
            RouteCmp::Switch
        } else {
            RouteCmp::Keep
        })
    }
}
