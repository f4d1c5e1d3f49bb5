//! Planned routes and their cost functions.
//!
//! A route is an ordered list of [`RouteNode`]s, implicitly rooted at the
//! managing restaurant (the root is not the first element).  Consecutive
//! entries — including the root and the first entry — must be adjacent in
//! the region graph; every cost function walks the legs and treats a
//! missing edge as a fatal invariant violation.

use fleet_core::{ConfirmedOrder, Location, Tick};
use fleet_region::Region;

use crate::{DispatchError, DispatchResult};

/// One stop of a planned route: a node and the orders to drop off there.
///
/// Pass-through stops (nodes crossed only to reach a later stop) carry no
/// orders.
#[derive(Clone, PartialEq, Debug)]
pub struct RouteNode {
    pub location: Location,
    pub orders: Vec<ConfirmedOrder>,
}

impl RouteNode {
    /// A stop with nothing to deliver.
    pub fn passthrough(location: Location) -> Self {
        Self {
            location,
            orders: Vec::new(),
        }
    }
}

/// Sum of the loaded order weights across the route.
pub fn route_weight(route: &[RouteNode]) -> f64 {
    route
        .iter()
        .flat_map(|rn| rn.orders.iter())
        .map(ConfirmedOrder::weight)
        .sum()
}

/// Sum of edge durations along the route, starting at `root`.
pub fn route_distance(region: &Region, root: Location, route: &[RouteNode]) -> DispatchResult<u64> {
    let mut distance = 0u64;
    let mut previous = root;
    for rn in route {
        distance += leg(region, previous, rn.location)?;
        previous = rn.location;
    }
    Ok(distance)
}

/// Cumulative duration up to the first stop at the order's target.
///
/// Fails when the target is not on the route at all.
pub fn delivery_duration(
    region: &Region,
    root: Location,
    route: &[RouteNode],
    order: &ConfirmedOrder,
) -> DispatchResult<u64> {
    let mut distance = 0u64;
    let mut previous = root;
    for rn in route {
        distance += leg(region, previous, rn.location)?;
        previous = rn.location;
        if rn.location == order.location() {
            return Ok(distance);
        }
    }
    Err(DispatchError::OrderNotInRoute(order.id()))
}

/// Sum over every order of how far outside its window the route would
/// deliver it, departing at `now`.
pub fn total_ticks_off(
    region: &Region,
    root: Location,
    route: &[RouteNode],
    now: Tick,
) -> DispatchResult<u64> {
    let mut distance = 0u64;
    let mut ticks_off = 0u64;
    let mut previous = root;
    for rn in route {
        distance += leg(region, previous, rn.location)?;
        previous = rn.location;
        let arrival = now + distance;
        for order in &rn.orders {
            ticks_off += order.delivery_interval().ticks_off(arrival);
        }
    }
    Ok(ticks_off)
}

/// Minimum remaining slack before some order of the route turns late,
/// departing at `now`: per order, zero once its window end has passed,
/// otherwise the ticks left until it does; reduced by `min`.
///
/// Returns `u64::MAX` when no order constrains the route, so the slack
/// send-out trigger never fires for order-less routes — the weight trigger
/// governs those.
pub fn ticks_until_off(
    region: &Region,
    root: Location,
    route: &[RouteNode],
    now: Tick,
) -> DispatchResult<u64> {
    let mut distance = 0u64;
    let mut slack = u64::MAX;
    let mut previous = root;
    for rn in route {
        distance += leg(region, previous, rn.location)?;
        previous = rn.location;
        let arrival = now + distance;
        for order in &rn.orders {
            slack = slack.min(order.delivery_interval().end().since(arrival));
        }
    }
    Ok(slack)
}

fn leg(region: &Region, a: Location, b: Location) -> DispatchResult<u64> {
    region
        .edge(a, b)
        .map(|e| e.duration())
        .ok_or(DispatchError::RouteNotAdjacent { a, b })
}
