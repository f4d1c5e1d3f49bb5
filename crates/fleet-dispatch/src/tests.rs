//! Unit and scenario tests for fleet-dispatch.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use fleet_core::{ConfirmedOrder, Location, OrderId, Tick, TickInterval};
    use fleet_region::{DijkstraPaths, Region, RegionBuilder};
    use fleet_routing::VehicleManager;

    pub const R: Location = Location { x: 0, y: 0 };
    pub const A: Location = Location { x: 1, y: 0 };
    pub const B: Location = Location { x: 0, y: 1 };

    /// Triangle: restaurant R, neighborhoods A and B, all edges duration 1.
    pub fn triangle() -> Region {
        let mut b = RegionBuilder::new();
        b.add_restaurant("R", R, vec!["pizza".into()]);
        b.add_neighborhood("A", A);
        b.add_neighborhood("B", B);
        b.add_edge_with_duration("R-A", R, A, 1);
        b.add_edge_with_duration("R-B", R, B, 1);
        b.add_edge_with_duration("A-B", A, B, 1);
        b.build().unwrap()
    }

    /// Chain R - A - B - C, all edges duration 1.
    pub fn chain() -> (Region, [Location; 4]) {
        let n = [
            Location::new(0, 0),
            Location::new(1, 0),
            Location::new(2, 0),
            Location::new(3, 0),
        ];
        let mut b = RegionBuilder::new();
        b.add_restaurant("R", n[0], vec!["pizza".into()]);
        b.add_neighborhood("A", n[1]);
        b.add_neighborhood("B", n[2]);
        b.add_neighborhood("C", n[3]);
        b.add_edge_with_duration("RA", n[0], n[1], 1);
        b.add_edge_with_duration("AB", n[1], n[2], 1);
        b.add_edge_with_duration("BC", n[2], n[3], 1);
        (b.build().unwrap(), n)
    }

    /// Chain R - A - B plus a spur C hanging off A, all edges duration 1.
    pub fn spur() -> (Region, [Location; 4]) {
        let n = [
            Location::new(0, 0), // R
            Location::new(1, 0), // A
            Location::new(2, 0), // B
            Location::new(1, 1), // C
        ];
        let mut b = RegionBuilder::new();
        b.add_restaurant("R", n[0], vec!["pizza".into()]);
        b.add_neighborhood("A", n[1]);
        b.add_neighborhood("B", n[2]);
        b.add_neighborhood("C", n[3]);
        b.add_edge_with_duration("RA", n[0], n[1], 1);
        b.add_edge_with_duration("AB", n[1], n[2], 1);
        b.add_edge_with_duration("AC", n[1], n[3], 1);
        (b.build().unwrap(), n)
    }

    pub fn manager_on(region: Region) -> VehicleManager<DijkstraPaths> {
        VehicleManager::new(Arc::new(region), DijkstraPaths)
    }

    pub fn order(
        id: u32,
        target: Location,
        restaurant: Location,
        window: (u64, u64),
        weight: f64,
    ) -> ConfirmedOrder {
        ConfirmedOrder::new(
            OrderId(id),
            target,
            restaurant,
            TickInterval::new(Tick(window.0), Tick(window.1)).unwrap(),
            vec!["pizza".into()],
            weight,
        )
        .unwrap()
    }
}

#[cfg(test)]
mod costs {
    use fleet_core::Tick;

    use super::helpers::{chain, order, triangle, A, B, R};
    use crate::route::{
        delivery_duration, route_distance, route_weight, ticks_until_off, total_ticks_off,
        RouteNode,
    };
    use crate::DispatchError;

    #[test]
    fn weight_sums_all_stops() {
        let mut route = vec![RouteNode::passthrough(A), RouteNode::passthrough(B)];
        route[0].orders.push(order(0, A, R, (0, 10), 1.5));
        route[1].orders.push(order(1, B, R, (0, 10), 2.0));
        assert!((route_weight(&route) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn distance_walks_from_restaurant_root() {
        let region = triangle();
        let route = vec![RouteNode::passthrough(A), RouteNode::passthrough(B)];
        assert_eq!(route_distance(&region, R, &route).unwrap(), 2);
    }

    #[test]
    fn non_adjacent_legs_are_an_error() {
        let (region, n) = chain();
        let route = vec![RouteNode::passthrough(n[3])]; // R and C share no edge
        assert!(matches!(
            route_distance(&region, n[0], &route),
            Err(DispatchError::RouteNotAdjacent { .. })
        ));
    }

    #[test]
    fn delivery_duration_stops_at_target() {
        let region = triangle();
        let mut route = vec![RouteNode::passthrough(A), RouteNode::passthrough(B)];
        let o = order(0, B, R, (0, 10), 1.0);
        route[1].orders.push(o.clone());
        assert_eq!(delivery_duration(&region, R, &route, &o).unwrap(), 2);
    }

    #[test]
    fn delivery_duration_requires_target_on_route() {
        let region = triangle();
        let route = vec![RouteNode::passthrough(A)];
        let o = order(0, B, R, (0, 10), 1.0);
        assert!(matches!(
            delivery_duration(&region, R, &route, &o),
            Err(DispatchError::OrderNotInRoute(_))
        ));
    }

    #[test]
    fn total_ticks_off_sums_early_and_late() {
        let region = triangle();
        let mut route = vec![RouteNode::passthrough(A), RouteNode::passthrough(B)];
        // Arrives at A at tick 1 — 4 ticks early for [5, 6].
        route[0].orders.push(order(0, A, R, (5, 6), 1.0));
        // Arrives at B at tick 2 — 1 tick late for [0, 1].
        route[1].orders.push(order(1, B, R, (0, 1), 1.0));
        assert_eq!(total_ticks_off(&region, R, &route, Tick(0)).unwrap(), 5);
    }

    #[test]
    fn slack_is_min_over_orders() {
        let region = triangle();
        let mut route = vec![RouteNode::passthrough(A), RouteNode::passthrough(B)];
        route[0].orders.push(order(0, A, R, (0, 9), 1.0)); // arrival 1, slack 8
        route[1].orders.push(order(1, B, R, (0, 5), 1.0)); // arrival 2, slack 3
        assert_eq!(ticks_until_off(&region, R, &route, Tick(0)).unwrap(), 3);
    }

    #[test]
    fn slack_zero_once_window_closed() {
        let region = triangle();
        let mut route = vec![RouteNode::passthrough(A)];
        route[0].orders.push(order(0, A, R, (2, 5), 1.0));
        assert_eq!(ticks_until_off(&region, R, &route, Tick(10)).unwrap(), 0);
    }

    #[test]
    fn orderless_route_is_unconstrained() {
        let region = triangle();
        let route = vec![RouteNode::passthrough(A), RouteNode::passthrough(B)];
        assert_eq!(
            ticks_until_off(&region, R, &route, Tick(0)).unwrap(),
            u64::MAX
        );
    }
}

#[cfg(test)]
mod insertion {
    use fleet_core::{DispatchConfig, Tick};

    use super::helpers::{manager_on, order, spur, triangle, A, B, R};
    use crate::RestaurantDispatcher;

    #[test]
    fn fresh_route_for_idle_vehicle() {
        let mut m = manager_on(triangle());
        let v = m.add_vehicle(R, 10.0).unwrap();
        let mut d = RestaurantDispatcher::new(R);
        d.add_vehicle(v);

        d.accept_order(&m, order(0, A, R, (2, 10), 1.0), Tick(2)).unwrap();
        let route = d.planned_route(v).unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(route[0].location, A);
        assert_eq!(route[0].orders.len(), 1);
    }

    #[test]
    fn repeated_target_merges_onto_existing_stop() {
        let mut m = manager_on(triangle());
        let v = m.add_vehicle(R, 10.0).unwrap();
        let mut d = RestaurantDispatcher::new(R);
        d.add_vehicle(v);

        d.accept_order(&m, order(0, A, R, (2, 10), 1.0), Tick(2)).unwrap();
        d.accept_order(&m, order(1, A, R, (2, 10), 1.0), Tick(2)).unwrap();
        let route = d.planned_route(v).unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(route[0].orders.len(), 2);
    }

    #[test]
    fn second_target_appended_after_tail() {
        let mut m = manager_on(triangle());
        let v = m.add_vehicle(R, 10.0).unwrap();
        let mut d = RestaurantDispatcher::new(R);
        d.add_vehicle(v);

        d.accept_order(&m, order(0, A, R, (2, 10), 1.0), Tick(2)).unwrap();
        d.accept_order(&m, order(1, B, R, (2, 10), 1.0), Tick(2)).unwrap();
        let route = d.planned_route(v).unwrap();
        let stops: Vec<_> = route.iter().map(|rn| rn.location).collect();
        assert_eq!(stops, vec![A, B]);
        assert_eq!(route[1].orders[0].id().0, 1);
    }

    #[test]
    fn insertion_is_deterministic() {
        let build = || {
            let mut m = manager_on(triangle());
            let v = m.add_vehicle(R, 10.0).unwrap();
            let mut d = RestaurantDispatcher::new(R);
            d.add_vehicle(v);
            d.accept_order(&m, order(0, A, R, (2, 10), 1.0), Tick(2)).unwrap();
            d.accept_order(&m, order(1, B, R, (2, 10), 1.0), Tick(2)).unwrap();
            d.planned_route(v)
                .unwrap()
                .iter()
                .map(|rn| rn.location)
                .collect::<Vec<_>>()
        };
        let first = build();
        for _ in 0..5 {
            assert_eq!(build(), first);
        }
    }

    #[test]
    fn detour_spliced_mid_route_with_return_segment() {
        // Route [A, B] along the chain; an order to the spur C is cheapest
        // as a detour after A: out to C, back to A, then on to B.
        let (region, n) = spur();
        let (r, a, b, c) = (n[0], n[1], n[2], n[3]);
        let mut m = manager_on(region);
        let v = m.add_vehicle(r, 10.0).unwrap();
        let mut d = RestaurantDispatcher::new(r);
        d.add_vehicle(v);

        d.accept_order(&m, order(0, a, r, (0, 100), 1.0), Tick(0)).unwrap();
        d.accept_order(&m, order(1, b, r, (0, 100), 1.0), Tick(0)).unwrap();
        d.accept_order(&m, order(2, c, r, (0, 100), 1.0), Tick(0)).unwrap();

        let route = d.planned_route(v).unwrap();
        let stops: Vec<_> = route.iter().map(|rn| rn.location).collect();
        assert_eq!(stops, vec![a, c, a, b]);
        assert_eq!(route[1].orders[0].id().0, 2);
        // The revisited A is a pass-through; the original stops keep their
        // orders.
        assert!(route[2].orders.is_empty());
        assert_eq!(route[0].orders[0].id().0, 0);
        assert_eq!(route[3].orders[0].id().0, 1);
    }

    #[test]
    fn shorter_plan_wins_when_both_on_time() {
        // Appending C at the tail (distance 3) must beat the detour that
        // doubles back (distance 4).
        let (region, n) = super::helpers::chain();
        let (r, a, b, c) = (n[0], n[1], n[2], n[3]);
        let mut m = manager_on(region);
        let v = m.add_vehicle(r, 10.0).unwrap();
        let mut d = RestaurantDispatcher::new(r);
        d.add_vehicle(v);

        d.accept_order(&m, order(0, a, r, (0, 100), 1.0), Tick(0)).unwrap();
        d.accept_order(&m, order(1, b, r, (0, 100), 1.0), Tick(0)).unwrap();
        d.accept_order(&m, order(2, c, r, (0, 100), 1.0), Tick(0)).unwrap();

        let stops: Vec<_> = d
            .planned_route(v)
            .unwrap()
            .iter()
            .map(|rn| rn.location)
            .collect();
        assert_eq!(stops, vec![a, b, c]);
    }

    #[test]
    fn over_capacity_order_waits_for_another_vehicle() {
        let mut m = manager_on(triangle());
        let v0 = m.add_vehicle(R, 1.0).unwrap();
        let mut d = RestaurantDispatcher::new(R);
        d.add_vehicle(v0);
        let cfg = DispatchConfig::default();

        d.tick(
            &m,
            Tick(2),
            vec![
                order(0, A, R, (2, 10), 1.0),
                order(1, B, R, (2, 10), 1.0),
            ],
            &cfg,
        )
        .unwrap();
        assert_eq!(d.planned_route(v0).unwrap().len(), 1);
        assert_eq!(d.pending_orders().len(), 1);

        // A second vehicle shows up; the retry loop picks the order up.
        let v1 = m.add_vehicle(R, 1.0).unwrap();
        d.add_vehicle(v1);
        d.tick(&m, Tick(3), vec![], &cfg).unwrap();
        assert!(d.pending_orders().is_empty());
        assert_eq!(d.planned_route(v1).unwrap().len(), 1);
        assert_eq!(d.planned_route(v1).unwrap()[0].location, B);
    }

    #[test]
    fn far_future_window_stays_pending_until_it_nears() {
        let mut m = manager_on(triangle());
        let v = m.add_vehicle(R, 10.0).unwrap();
        let mut d = RestaurantDispatcher::new(R);
        d.add_vehicle(v);
        let cfg = DispatchConfig::default();

        d.tick(&m, Tick(0), vec![order(0, A, R, (100, 110), 1.0)], &cfg)
            .unwrap();
        assert_eq!(d.pending_orders().len(), 1);

        // One edge away: the plan would arrive at t+1, which is strictly
        // after the window start only from tick 100 on.
        for t in 1..=99 {
            d.tick(&m, Tick(t), vec![], &cfg).unwrap();
            assert_eq!(d.pending_orders().len(), 1, "tick {t}");
            assert!(d.planned_route(v).unwrap().is_empty(), "tick {t}");
        }
        d.tick(&m, Tick(100), vec![], &cfg).unwrap();
        assert!(d.pending_orders().is_empty());
        assert_eq!(d.planned_route(v).unwrap()[0].location, A);
    }

    #[test]
    fn first_too_early_candidate_aborts_search() {
        // The first candidate that would land before its window aborts the
        // whole evaluation, discarding an already-found feasible insertion
        // on an earlier vehicle.
        let r = R;
        let a = A;
        let b = B;
        let mut builder = fleet_region::RegionBuilder::new();
        builder.add_restaurant("R", r, vec!["pizza".into()]);
        builder.add_neighborhood("A", a);
        builder.add_neighborhood("B", b);
        builder.add_edge_with_duration("RA", r, a, 8);
        builder.add_edge_with_duration("RB", r, b, 2);
        let mut m = manager_on(builder.build().unwrap());
        let v0 = m.add_vehicle(r, 10.0).unwrap();
        let v1 = m.add_vehicle(r, 10.0).unwrap();
        let mut d = RestaurantDispatcher::new(r);
        d.add_vehicle(v0);
        d.add_vehicle(v1);

        // v0 ends up with a slow route to A.
        d.accept_order(&m, order(0, a, r, (7, 30), 1.0), Tick(0)).unwrap();
        assert_eq!(d.planned_route(v0).unwrap().len(), 1);

        // Order to B: the detour via v0 arrives at tick 18 (feasible), but
        // v1's fresh 2-tick route is evaluated later, lands before tick 6,
        // and aborts — the feasible v0 insertion is thrown away.
        d.accept_order(&m, order(1, b, r, (6, 40), 1.0), Tick(0)).unwrap();
        assert_eq!(d.pending_orders().len(), 1);
        assert_eq!(d.planned_route(v0).unwrap().len(), 1);
        assert!(d.planned_route(v1).unwrap().is_empty());
    }
}

#[cfg(test)]
mod send_out {
    use std::sync::Arc;

    use fleet_core::{DispatchConfig, Tick};
    use fleet_region::DijkstraPaths;
    use fleet_routing::{Event, VehicleManager};

    use super::helpers::{order, triangle, A, R};
    use crate::DeliveryService;

    #[test]
    fn tight_window_is_planned_sent_and_delivered_in_window() {
        let mut m = VehicleManager::new(Arc::new(triangle()), DijkstraPaths);
        let v = m.add_vehicle(R, 10.0).unwrap();
        let mut service = DeliveryService::new(m, DispatchConfig::default());

        let mut all_events = Vec::new();
        for t in 0..=7 {
            let orders = if t == 0 {
                vec![order(0, A, R, (2, 5), 1.0)]
            } else {
                vec![]
            };
            all_events.extend(service.tick(Tick(t), orders).unwrap());
        }

        let received_at = all_events
            .iter()
            .find_map(|e| match e {
                Event::OrderReceived { tick, .. } => Some(*tick),
                _ => None,
            })
            .expect("order was never loaded");
        let (delivered_at, delivered) = all_events
            .iter()
            .find_map(|e| match e {
                Event::DeliverOrder { tick, order, .. } => Some((*tick, order.clone())),
                _ => None,
            })
            .expect("order was never delivered");

        assert!(received_at < delivered_at);
        assert_eq!(delivered.actual_delivery_tick(), Some(delivered_at));
        assert!(delivered.delivery_interval().contains(delivered_at));

        // The vehicle returned to its restaurant and is idle again.
        let d = &service.dispatchers()[0];
        assert_eq!(d.planned_route(v).map(<[_]>::len), Some(0));
        assert_eq!(d.total_available(), 0);
        assert!(service.pending_orders().is_empty());
    }

    #[test]
    fn weight_threshold_triggers_send_out() {
        let mut m = VehicleManager::new(Arc::new(triangle()), DijkstraPaths);
        let v = m.add_vehicle(R, 1.0).unwrap();
        let mut service = DeliveryService::new(m, DispatchConfig::default());

        // Window far out (slack large), but the order fills 100% >= 95% of
        // capacity, so the route leaves immediately after planning.
        service
            .tick(Tick(0), vec![order(0, A, R, (0, 500), 1.0)])
            .unwrap();
        assert!(service.dispatchers()[0].planned_route(v).is_none());
        assert_eq!(service.dispatchers()[0].total_available(), 1);
    }
}

#[cfg(test)]
mod rebalance {
    use std::sync::Arc;

    use fleet_core::{DispatchConfig, Location, Tick, VehicleId};
    use fleet_region::{DijkstraPaths, Region, RegionBuilder};
    use fleet_routing::{Event, VehicleManager};

    use crate::DeliveryService;

    const R1: Location = Location { x: 0, y: 0 };
    const R2: Location = Location { x: 2, y: 0 };

    fn two_restaurants() -> Region {
        let mut b = RegionBuilder::new();
        b.add_restaurant("R1", R1, vec!["pizza".into()]);
        b.add_restaurant("R2", R2, vec!["noodles".into()]);
        b.add_edge_with_duration("R1-R2", R1, R2, 2);
        b.build().unwrap()
    }

    #[test]
    fn idle_surplus_migrates_and_registers_on_arrival() {
        let mut m = VehicleManager::new(Arc::new(two_restaurants()), DijkstraPaths);
        let v0 = m.add_vehicle(R1, 10.0).unwrap();
        m.add_vehicle(R1, 10.0).unwrap();
        m.add_vehicle(R1, 10.0).unwrap();
        let mut service = DeliveryService::new(m, DispatchConfig::default());

        service.tick(Tick(0), vec![]).unwrap();
        // Three idle across two restaurants → share 1; R2 was short one and
        // received the lowest-id idle vehicle.
        assert_eq!(service.dispatchers()[1].total_available(), 1);
        assert_eq!(service.dispatchers()[1].queued_vehicles(), &[v0]);
        assert!(service.dispatchers()[0].planned_route(v0).is_none());

        // While v0 is in transit it counts as idle nowhere, so the next
        // tick's rebalance sends a second vehicle after it.
        service.tick(Tick(1), vec![]).unwrap();
        assert_eq!(service.dispatchers()[1].total_available(), 2);

        let events = service.tick(Tick(2), vec![]).unwrap();
        assert!(events.iter().any(|e| matches!(
            e,
            Event::ArrivedAtRestaurant { vehicle, restaurant, .. }
                if *vehicle == v0 && *restaurant == R2
        )));
        // Arrival turned the first queued vehicle into a present idle one;
        // the second is still on the road.
        assert!(service.dispatchers()[1].planned_route(v0).is_some());
        assert_eq!(service.dispatchers()[1].total_available(), 1);
    }

    #[test]
    fn donor_with_expected_arrivals_at_share_stops_donating() {
        // The donor guard compares the donor's expected-arrivals count
        // against the share target, inverted from what one would expect of
        // a "has surplus" check (flagged in DESIGN.md).  A donor already
        // expecting its share donates nothing, and the recipient stays
        // short.
        let mut m = VehicleManager::new(Arc::new(two_restaurants()), DijkstraPaths);
        m.add_vehicle(R1, 10.0).unwrap();
        m.add_vehicle(R1, 10.0).unwrap();
        let mut service = DeliveryService::new(m, DispatchConfig::default());
        service
            .dispatcher_mut(R1)
            .unwrap()
            .add_queued_vehicle(VehicleId(90));

        service.tick(Tick(0), vec![]).unwrap();
        assert_eq!(service.dispatchers()[1].total_available(), 0);
        assert_eq!(service.dispatchers()[0].idle_vehicles().len(), 2);
    }

    #[test]
    fn disabled_rebalancer_leaves_fleets_alone() {
        let mut m = VehicleManager::new(Arc::new(two_restaurants()), DijkstraPaths);
        m.add_vehicle(R1, 10.0).unwrap();
        m.add_vehicle(R1, 10.0).unwrap();
        let config = DispatchConfig {
            rebalance_enabled: false,
            ..DispatchConfig::default()
        };
        let mut service = DeliveryService::new(m, config);

        service.tick(Tick(0), vec![]).unwrap();
        assert_eq!(service.dispatchers()[0].idle_vehicles().len(), 2);
        assert_eq!(service.dispatchers()[1].total_available(), 0);
    }
}

#[cfg(test)]
mod reset {
    use std::sync::Arc;

    use fleet_core::{DispatchConfig, Tick};
    use fleet_region::DijkstraPaths;
    use fleet_routing::VehicleManager;

    use super::helpers::{order, triangle, A, R};
    use crate::DeliveryService;

    #[test]
    fn reset_rebuilds_dispatchers_and_clears_pending() {
        let mut m = VehicleManager::new(Arc::new(triangle()), DijkstraPaths);
        let v = m.add_vehicle(R, 10.0).unwrap();
        let mut service = DeliveryService::new(m, DispatchConfig::default());

        for t in 0..4 {
            let orders = if t == 0 {
                vec![
                    order(0, A, R, (2, 5), 1.0),
                    order(1, A, R, (200, 210), 1.0),
                ]
            } else {
                vec![]
            };
            service.tick(Tick(t), orders).unwrap();
        }
        assert!(!service.pending_orders().is_empty());

        service.reset();
        assert!(service.pending_orders().is_empty());
        let d = &service.dispatchers()[0];
        assert_eq!(d.planned_route(v).map(<[_]>::len), Some(0));
        assert_eq!(d.total_available(), 0);

        // A no-order run after reset is completely silent.
        for t in 0..3 {
            assert!(service.tick(Tick(t), vec![]).unwrap().is_empty());
        }
    }
}
