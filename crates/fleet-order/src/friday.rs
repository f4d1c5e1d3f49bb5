//! Friday-evening order generator.
//!
//! Models the order volume of an average Friday evening: delivery times
//! cluster around the middle of the run, drawn from a truncated normal
//! distribution.  Restaurants, neighborhoods, menu picks, and weights are
//! uniform.  Everything is drawn up front from one seeded RNG, so the
//! stream is a pure function of (seed, region, parameters).

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::Normal;

use fleet_core::{ConfirmedOrder, Location, OrderId, SimRng, Tick, TickInterval};
use fleet_region::Region;

use crate::generator::OrderGenerator;
use crate::{OrderError, OrderResult};

/// Pre-generated Friday-evening order timetable.
///
/// Create via [`FridayOrderGenerator::builder`].
pub struct FridayOrderGenerator {
    orders: BTreeMap<Tick, Vec<ConfirmedOrder>>,
}

impl FridayOrderGenerator {
    pub fn builder() -> FridayGeneratorBuilder {
        FridayGeneratorBuilder::default()
    }

    /// Total number of generated orders across all ticks.
    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

impl OrderGenerator for FridayOrderGenerator {
    fn generate_orders(&self, tick: Tick) -> Vec<ConfirmedOrder> {
        self.orders.get(&tick).cloned().unwrap_or_default()
    }
}

/// Fluent builder for [`FridayOrderGenerator`].
///
/// # Defaults
///
/// | Parameter            | Default |
/// |----------------------|---------|
/// | `order_count`        | 1000    |
/// | `delivery_interval`  | 15      |
/// | `max_weight`         | 0.5     |
/// | `standard_deviation` | 0.5     |
/// | `last_tick`          | 480     |
/// | `seed`               | 0       |
pub struct FridayGeneratorBuilder {
    order_count: u32,
    delivery_interval: u64,
    max_weight: f64,
    standard_deviation: f64,
    last_tick: u64,
    seed: u64,
}

impl Default for FridayGeneratorBuilder {
    fn default() -> Self {
        Self {
            order_count: 1000,
            delivery_interval: 15,
            max_weight: 0.5,
            standard_deviation: 0.5,
            last_tick: 480,
            seed: 0,
        }
    }
}

impl FridayGeneratorBuilder {
    /// Total orders the generator will produce over the whole run.
    pub fn order_count(mut self, count: u32) -> Self {
        self.order_count = count;
        self
    }

    /// Length of each order's delivery window in ticks.
    pub fn delivery_interval(mut self, ticks: u64) -> Self {
        self.delivery_interval = ticks;
        self
    }

    /// Upper bound (exclusive) on order weights.
    pub fn max_weight(mut self, weight: f64) -> Self {
        self.max_weight = weight;
        self
    }

    /// Standard deviation of the delivery-time distribution, as a fraction
    /// of the run length.
    pub fn standard_deviation(mut self, sd: f64) -> Self {
        self.standard_deviation = sd;
        self
    }

    /// The last tick orders may become due at.
    pub fn last_tick(mut self, tick: u64) -> Self {
        self.last_tick = tick;
        self
    }

    /// RNG seed.  Identical seeds produce identical order streams.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draw the full timetable against `region`.
    ///
    /// # Errors
    ///
    /// The region must have at least one restaurant (with a non-empty menu)
    /// and one neighborhood; weights and the standard deviation must be
    /// positive.
    pub fn build(self, region: &Region) -> OrderResult<FridayOrderGenerator> {
        let restaurants: Vec<_> = region.restaurants().collect();
        let neighborhoods: Vec<Location> =
            region.neighborhoods().map(|n| n.location()).collect();
        if restaurants.is_empty() {
            return Err(OrderError::NoRestaurants);
        }
        if neighborhoods.is_empty() {
            return Err(OrderError::NoNeighborhoods);
        }
        for restaurant in &restaurants {
            if restaurant.menu().is_none_or(<[String]>::is_empty) {
                return Err(OrderError::EmptyMenu(restaurant.name().to_owned()));
            }
        }
        if !(self.max_weight > 0.0) {
            return Err(OrderError::NonPositiveMaxWeight(self.max_weight));
        }
        let normal = Normal::new(0.5, self.standard_deviation)
            .map_err(|_| OrderError::InvalidStandardDeviation(self.standard_deviation))?;

        let mut rng = SimRng::new(self.seed);
        let mut orders: BTreeMap<Tick, Vec<ConfirmedOrder>> = BTreeMap::new();

        for i in 0..self.order_count {
            // Rejection-sample a due tick inside [0, last_tick].
            let due = loop {
                let t = (rng.inner().sample(normal) * self.last_tick as f64) as i64;
                if (0..=self.last_tick as i64).contains(&t) {
                    break Tick(t as u64);
                }
            };

            let restaurant = restaurants[rng.gen_range(0..restaurants.len())];
            let target = neighborhoods[rng.gen_range(0..neighborhoods.len())];
            let menu = restaurant.menu().unwrap_or_default();
            let food_count = rng.gen_range(1..10usize);
            let food = (0..food_count)
                .map(|_| menu[rng.gen_range(0..menu.len())].clone())
                .collect();
            let weight = loop {
                let w: f64 = rng.gen_range(0.0..self.max_weight);
                if w > 0.0 {
                    break w;
                }
            };

            let interval = TickInterval::new(due, due + self.delivery_interval)?;
            let order = ConfirmedOrder::new(
                OrderId(i),
                target,
                restaurant.location(),
                interval,
                food,
                weight,
            )?;
            orders.entry(due).or_default().push(order);
        }

        Ok(FridayOrderGenerator { orders })
    }
}
