//! friday — end-to-end fleetsim demo.
//!
//! Simulates a Friday evening of deliveries in a small synthetic city:
//! two restaurants, four vehicles, 300 orders whose due times cluster
//! around the middle of the evening.  Writes the full event log to
//! `out/events.csv` and prints the three scores.

mod region;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use fleet_core::{DispatchConfig, SimConfig, Tick};
use fleet_dispatch::DeliveryService;
use fleet_order::FridayOrderGenerator;
use fleet_rating::{AmountDeliveredRater, InTimeRater, TravelDistanceRater};
use fleet_region::DijkstraPaths;
use fleet_routing::{Event, VehicleManager};
use fleet_sim::{CsvEventWriter, EventLogObserver, EventWriter, SimObserver, SimulationBuilder};

use region::{build_city, NOODLE_BAR, PIZZERIA};

// ── Run parameters ────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const LAST_ORDER_TICK: u64 = 480;
const TOTAL_TICKS: u64 = 600; // leave room for the evening's tail
const ORDER_COUNT: u32 = 300;
const VEHICLE_CAPACITY: f64 = 5.0;
const OUT_DIR: &str = "out";

// ── Progress + event log in one observer ──────────────────────────────────────

struct Progress<W: EventWriter> {
    log: EventLogObserver<W>,
    delivered: u64,
}

impl<W: EventWriter> SimObserver for Progress<W> {
    fn on_tick_end(&mut self, tick: Tick, events: &[Event]) {
        self.delivered += events
            .iter()
            .filter(|e| matches!(e, Event::DeliverOrder { .. }))
            .count() as u64;
        self.log.on_tick_end(tick, events);
        if tick.0 > 0 && tick.0 % 120 == 0 {
            println!("  {tick}: {} orders delivered so far", self.delivered);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.log.on_sim_end(final_tick);
    }
}

fn main() -> Result<()> {
    let region = Arc::new(build_city()?);

    let mut manager = VehicleManager::new(region.clone(), DijkstraPaths);
    for restaurant in [PIZZERIA, PIZZERIA, NOODLE_BAR, NOODLE_BAR] {
        manager.add_vehicle(restaurant, VEHICLE_CAPACITY)?;
    }
    let service = DeliveryService::new(manager, DispatchConfig::default());

    let generator = FridayOrderGenerator::builder()
        .order_count(ORDER_COUNT)
        .delivery_interval(15)
        .max_weight(1.5)
        .standard_deviation(0.3)
        .last_tick(LAST_ORDER_TICK)
        .seed(SEED)
        .build(&region)?;

    let config = SimConfig {
        total_ticks: TOTAL_TICKS,
        seed: SEED,
    };
    let mut sim = SimulationBuilder::new(config, service, generator)
        .rater(Box::new(AmountDeliveredRater::new(0.99)?))
        .rater(Box::new(InTimeRater::new(5, 25)?))
        .rater(Box::new(TravelDistanceRater::new(
            region.clone(),
            DijkstraPaths,
            0.5,
        )?))
        .build();

    fs::create_dir_all(OUT_DIR)?;
    let writer = CsvEventWriter::new(&Path::new(OUT_DIR).join("events.csv"))?;
    let mut observer = Progress {
        log: EventLogObserver::new(writer),
        delivered: 0,
    };

    println!(
        "simulating {TOTAL_TICKS} ticks, {ORDER_COUNT} orders, {} vehicles",
        sim.service().manager().vehicles().count()
    );
    let started = Instant::now();
    sim.run(&mut observer)?;
    if let Some(err) = observer.log.take_error() {
        return Err(err.into());
    }
    println!(
        "done in {:.1?} — {} orders delivered, {} still pending",
        started.elapsed(),
        observer.delivered,
        sim.pending_order_count()
    );

    for (criteria, score) in sim.scores() {
        println!("  {criteria}: {score:.3}");
    }
    println!("event log: {OUT_DIR}/events.csv");
    Ok(())
}
