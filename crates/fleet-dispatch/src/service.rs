//! The delivery service: vehicle manager + one dispatcher per restaurant.

use std::collections::BTreeMap;

use fleet_core::{ConfirmedOrder, DispatchConfig, Location, OrderId, Tick, VehicleId};
use fleet_region::PathCalculator;
use fleet_routing::{ArrivalAction, Event, VehicleManager};

use crate::dispatcher::RestaurantDispatcher;
use crate::{DispatchError, DispatchResult};

/// Owns the [`VehicleManager`] and a [`RestaurantDispatcher`] per
/// restaurant, and drives one simulation tick end to end:
///
/// 1. advance all vehicles (collecting the tick's events),
/// 2. feed `Spawn`/`ArrivedAtRestaurant` events back into dispatcher
///    membership,
/// 3. route new orders to the owning restaurant's dispatcher and tick each
///    dispatcher,
/// 4. send out every route that is due,
/// 5. rebalance idle vehicles across restaurants (when enabled).
pub struct DeliveryService<P> {
    manager: VehicleManager<P>,
    dispatchers: Vec<RestaurantDispatcher>,
    config: DispatchConfig,
}

impl<P: PathCalculator> DeliveryService<P> {
    /// Wrap a manager.  One dispatcher is created per restaurant, seeded
    /// with the vehicles currently standing there.
    pub fn new(manager: VehicleManager<P>, config: DispatchConfig) -> Self {
        let mut service = Self {
            manager,
            dispatchers: Vec::new(),
            config,
        };
        service.create_dispatchers();
        service
    }

    fn create_dispatchers(&mut self) {
        self.dispatchers.clear();
        let restaurants: Vec<Location> = self
            .manager
            .region()
            .restaurants()
            .map(|n| n.location())
            .collect();
        for restaurant in restaurants {
            let mut dispatcher = RestaurantDispatcher::new(restaurant);
            for vehicle in self.manager.vehicles_at(restaurant) {
                dispatcher.add_vehicle(vehicle);
            }
            self.dispatchers.push(dispatcher);
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn manager(&self) -> &VehicleManager<P> {
        &self.manager
    }

    /// Dispatchers, ascending by restaurant location.
    #[inline]
    pub fn dispatchers(&self) -> &[RestaurantDispatcher] {
        &self.dispatchers
    }

    #[inline]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub(crate) fn dispatcher_mut(
        &mut self,
        restaurant: Location,
    ) -> Option<&mut RestaurantDispatcher> {
        self.dispatchers
            .iter_mut()
            .find(|d| d.restaurant() == restaurant)
    }

    /// Orders currently waiting across all dispatchers.
    pub fn pending_orders(&self) -> Vec<&ConfirmedOrder> {
        self.dispatchers
            .iter()
            .flat_map(|d| d.pending_orders().iter())
            .collect()
    }

    // ── Per-tick drive ────────────────────────────────────────────────────

    /// Run one tick and return the events it produced.
    pub fn tick(
        &mut self,
        now: Tick,
        new_orders: Vec<ConfirmedOrder>,
    ) -> DispatchResult<Vec<Event>> {
        let events = self.manager.tick(now)?;
        self.handle_events(&events)?;

        let mut grouped: BTreeMap<Location, Vec<ConfirmedOrder>> = BTreeMap::new();
        for order in new_orders {
            if !self
                .dispatchers
                .iter()
                .any(|d| d.restaurant() == order.restaurant())
            {
                return Err(DispatchError::NoDispatcherFor(order.restaurant()));
            }
            grouped.entry(order.restaurant()).or_default().push(order);
        }

        for i in 0..self.dispatchers.len() {
            let restaurant = self.dispatchers[i].restaurant();
            let orders = grouped.remove(&restaurant).unwrap_or_default();
            let due = {
                let dispatcher = &mut self.dispatchers[i];
                dispatcher.tick(&self.manager, now, orders, &self.config)?
            };
            for vehicle in due {
                self.send_out(i, vehicle, now)?;
            }
        }

        if self.config.rebalance_enabled {
            self.rebalance()?;
        }
        Ok(events)
    }

    /// Hand arriving and spawning vehicles to the restaurant's dispatcher.
    fn handle_events(&mut self, events: &[Event]) -> DispatchResult<()> {
        for event in events {
            let (vehicle, restaurant) = match event {
                Event::ArrivedAtRestaurant {
                    vehicle,
                    restaurant,
                    ..
                } => (*vehicle, *restaurant),
                Event::Spawn { vehicle, node, .. } => (*vehicle, *node),
                _ => continue,
            };
            let dispatcher = self
                .dispatchers
                .iter_mut()
                .find(|d| d.restaurant() == restaurant)
                .ok_or(DispatchError::NoDispatcherFor(restaurant))?;
            dispatcher.add_vehicle(vehicle);
        }
        Ok(())
    }

    /// Load a due route onto its vehicle and queue the trip: one leg per
    /// order-bearing stop (delivering that stop's orders on arrival), then
    /// a final leg to the restaurant expecting the fewest vehicles.
    fn send_out(&mut self, idx: usize, vehicle: VehicleId, now: Tick) -> DispatchResult<()> {
        let Some(route) = self.dispatchers[idx].take_route(vehicle) else {
            return Ok(());
        };
        let restaurant = self.dispatchers[idx].restaurant();

        for route_node in &route {
            if route_node.orders.is_empty() {
                continue;
            }
            for order in &route_node.orders {
                self.manager
                    .load_order(restaurant, vehicle, order.clone(), now)?;
            }
            let order_ids: Vec<OrderId> = route_node.orders.iter().map(|o| o.id()).collect();
            let deliver: ArrivalAction<P> = Box::new(move |manager, v, tick| {
                for order in order_ids {
                    manager.deliver_order(v, order, tick)?;
                }
                Ok(())
            });
            self.manager
                .move_queued(vehicle, route_node.location, Some(deliver))?;
        }

        // The emptiest-looking restaurant wins; first in location order on a
        // tie.  The sender itself is a candidate.
        let mut target = 0;
        for j in 1..self.dispatchers.len() {
            if self.dispatchers[j].total_available() < self.dispatchers[target].total_available() {
                target = j;
            }
        }
        self.manager
            .move_queued(vehicle, self.dispatchers[target].restaurant(), None)?;
        self.dispatchers[target].add_queued_vehicle(vehicle);
        Ok(())
    }

    /// Top idle-poor restaurants up to `floor(total_idle / restaurants)`
    /// by pulling idle vehicles out of other dispatchers.
    ///
    /// The donor guard compares the donor's *expected-arrivals* count
    /// against the share target, not its idle surplus (see DESIGN.md).  A
    /// qualifying donor with no idle vehicle left simply stops donating.
    fn rebalance(&mut self) -> DispatchResult<()> {
        if self.dispatchers.is_empty() {
            return Ok(());
        }
        let total_idle: usize = self
            .dispatchers
            .iter()
            .map(|d| d.idle_vehicles().len())
            .sum();
        let target = total_idle / self.dispatchers.len();

        for i in 0..self.dispatchers.len() {
            let mut deficit = target.saturating_sub(self.dispatchers[i].idle_vehicles().len());
            if deficit == 0 {
                continue;
            }
            for j in 0..self.dispatchers.len() {
                if j == i {
                    continue;
                }
                while self.dispatchers[j].total_available() < target && deficit > 0 {
                    let Some(vehicle) = self.dispatchers[j].first_idle() else {
                        break;
                    };
                    let destination = self.dispatchers[i].restaurant();
                    self.manager.move_queued(vehicle, destination, None)?;
                    self.dispatchers[i].add_queued_vehicle(vehicle);
                    self.dispatchers[j].remove_vehicle(vehicle);
                    deficit -= 1;
                }
            }
        }
        Ok(())
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Clear all run state: vehicles return to their starting restaurants,
    /// dispatchers are rebuilt, pending orders are dropped.  The region is
    /// untouched.
    pub fn reset(&mut self) {
        self.manager.reset();
        self.create_dispatchers();
    }
}
