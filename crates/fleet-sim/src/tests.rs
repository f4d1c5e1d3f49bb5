//! Integration tests for fleet-sim.

#[cfg(test)]
mod helpers {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use fleet_core::{
        ConfirmedOrder, DispatchConfig, Location, OrderId, SimConfig, Tick, TickInterval,
    };
    use fleet_dispatch::DeliveryService;
    use fleet_order::OrderGenerator;
    use fleet_region::{DijkstraPaths, Region, RegionBuilder};
    use fleet_routing::{Event, VehicleManager};

    use crate::SimObserver;

    pub const R: Location = Location { x: 0, y: 0 };
    pub const A: Location = Location { x: 1, y: 0 };
    pub const B: Location = Location { x: 0, y: 1 };

    pub fn triangle() -> Arc<Region> {
        let mut b = RegionBuilder::new();
        b.add_restaurant("R", R, vec!["pizza".into()]);
        b.add_neighborhood("A", A);
        b.add_neighborhood("B", B);
        b.add_edge_with_duration("R-A", R, A, 1);
        b.add_edge_with_duration("R-B", R, B, 1);
        b.add_edge_with_duration("A-B", A, B, 1);
        Arc::new(b.build().unwrap())
    }

    /// Four-node city with two restaurants, richly connected so every order
    /// is routable.
    pub fn city() -> Arc<Region> {
        let r1 = Location::new(0, 0);
        let r2 = Location::new(3, 0);
        let n1 = Location::new(1, 1);
        let n2 = Location::new(2, -1);
        let mut b = RegionBuilder::new();
        b.add_restaurant("R1", r1, vec!["pizza".into(), "calzone".into()]);
        b.add_restaurant("R2", r2, vec!["ramen".into()]);
        b.add_neighborhood("N1", n1);
        b.add_neighborhood("N2", n2);
        b.add_edge_with_duration("r1n1", r1, n1, 2);
        b.add_edge_with_duration("r1n2", r1, n2, 3);
        b.add_edge_with_duration("r2n1", r2, n1, 3);
        b.add_edge_with_duration("r2n2", r2, n2, 2);
        b.add_edge_with_duration("n1n2", n1, n2, 2);
        Arc::new(b.build().unwrap())
    }

    pub fn service_on(
        region: Arc<Region>,
        vehicles: &[(Location, f64)],
    ) -> DeliveryService<DijkstraPaths> {
        let mut manager = VehicleManager::new(region, DijkstraPaths);
        for &(at, capacity) in vehicles {
            manager.add_vehicle(at, capacity).unwrap();
        }
        DeliveryService::new(manager, DispatchConfig::default())
    }

    pub fn sim_config(total_ticks: u64) -> SimConfig {
        SimConfig {
            total_ticks,
            seed: 42,
        }
    }

    /// Generator with a fixed, hand-written timetable.
    pub struct FixedOrders(pub BTreeMap<Tick, Vec<ConfirmedOrder>>);

    impl FixedOrders {
        pub fn single(order: ConfirmedOrder, at: Tick) -> Self {
            let mut map = BTreeMap::new();
            map.insert(at, vec![order]);
            Self(map)
        }
    }

    impl OrderGenerator for FixedOrders {
        fn generate_orders(&self, tick: Tick) -> Vec<ConfirmedOrder> {
            self.0.get(&tick).cloned().unwrap_or_default()
        }
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

    /// Observer that records every event for later inspection.
    #[derive(Default)]
    pub struct Recorder {
        pub events: Vec<Event>,
        pub ticks: u64,
    }

    impl SimObserver for Recorder {
        fn on_tick_end(&mut self, _tick: Tick, events: &[Event]) {
            self.events.extend_from_slice(events);
            self.ticks += 1;
        }
    }
}

#[cfg(test)]
mod runs {
    use fleet_core::Tick;
    use fleet_rating::{AmountDeliveredRater, InTimeRater};
    use fleet_routing::Event;

    use super::helpers::{order, service_on, sim_config, triangle, FixedOrders, Recorder, A, R};
    use crate::{NoopObserver, SimulationBuilder};

    #[test]
    fn run_ticks_advances_the_clock() {
        let service = service_on(triangle(), &[(R, 10.0)]);
        let generator = FixedOrders::single(order(0, A, R, (2, 5), 1.0), Tick(0));
        let mut sim = SimulationBuilder::new(sim_config(100), service, generator).build();

        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(8));
    }

    #[test]
    fn tight_window_order_scores_perfect_in_time() {
        let service = service_on(triangle(), &[(R, 10.0)]);
        let generator = FixedOrders::single(order(0, A, R, (2, 5), 1.0), Tick(0));
        let mut sim = SimulationBuilder::new(sim_config(20), service, generator)
            .rater(Box::new(InTimeRater::new(0, 25).unwrap()))
            .rater(Box::new(AmountDeliveredRater::new(0.99).unwrap()))
            .build();

        let mut recorder = Recorder::default();
        sim.run(&mut recorder).unwrap();

        let delivered = recorder.events.iter().find_map(|e| match e {
            Event::DeliverOrder { order, .. } => Some(order.clone()),
            _ => None,
        });
        let delivered = delivered.expect("order was never delivered");
        let tick = delivered.actual_delivery_tick().unwrap();
        assert!(delivered.delivery_interval().contains(tick));

        for (_, score) in sim.scores() {
            assert!((score - 1.0).abs() < 1e-9);
        }
        assert_eq!(sim.pending_order_count(), 0);
    }

    #[test]
    fn observer_sees_every_tick() {
        let service = service_on(triangle(), &[(R, 10.0)]);
        let generator = FixedOrders::single(order(0, A, R, (2, 5), 1.0), Tick(0));
        let mut sim = SimulationBuilder::new(sim_config(10), service, generator).build();

        let mut recorder = Recorder::default();
        sim.run(&mut recorder).unwrap();
        assert_eq!(recorder.ticks, 10);
    }

    #[test]
    fn reset_rewinds_clock_and_state() {
        let service = service_on(triangle(), &[(R, 10.0)]);
        let generator = FixedOrders::single(order(0, A, R, (2, 5), 1.0), Tick(0));
        let mut sim = SimulationBuilder::new(sim_config(10), service, generator).build();

        sim.run(&mut NoopObserver).unwrap();
        sim.reset();
        assert_eq!(sim.current_tick(), Tick(0));
        assert_eq!(sim.pending_order_count(), 0);
    }
}

#[cfg(test)]
mod determinism {
    use fleet_order::FridayOrderGenerator;

    use super::helpers::{city, service_on, sim_config, Recorder};
    use crate::SimulationBuilder;

    #[test]
    fn same_seed_same_event_stream() {
        let run = || {
            let region = city();
            let vehicles: Vec<_> = region
                .restaurants()
                .map(|r| (r.location(), 5.0))
                .collect();
            let service = service_on(region.clone(), &vehicles);
            let generator = FridayOrderGenerator::builder()
                .order_count(25)
                .last_tick(40)
                .max_weight(2.0)
                .seed(42)
                .build(&region)
                .unwrap();
            let mut sim = SimulationBuilder::new(sim_config(60), service, generator).build();
            let mut recorder = Recorder::default();
            sim.run(&mut recorder).unwrap();
            recorder.events
        };

        let first = run();
        let second = run();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod output {
    use std::fs;

    use fleet_core::Tick;

    use super::helpers::{order, service_on, sim_config, triangle, FixedOrders, A, R};
    use crate::{CsvEventWriter, EventLogObserver, SimulationBuilder};

    #[test]
    fn csv_log_contains_the_delivery() {
        let dir = std::env::temp_dir().join(format!("fleetsim-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("events.csv");

        let service = service_on(triangle(), &[(R, 10.0)]);
        let generator = FixedOrders::single(order(0, A, R, (2, 5), 1.0), Tick(0));
        let mut sim = SimulationBuilder::new(sim_config(10), service, generator).build();

        let writer = CsvEventWriter::new(&path).unwrap();
        let mut observer = EventLogObserver::new(writer);
        sim.run(&mut observer).unwrap();
        assert!(observer.take_error().is_none());

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("tick,event,vehicle,order,x,y"));
        assert!(contents.contains("spawn"));
        assert!(contents.contains("order_received"));
        assert!(contents.contains("deliver_order"));

        fs::remove_dir_all(&dir).ok();
    }
}
