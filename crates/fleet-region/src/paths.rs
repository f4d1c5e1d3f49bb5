//! Shortest-path calculation over the region graph.
//!
//! # Pluggability
//!
//! The vehicle manager and dispatcher call routing via the
//! [`PathCalculator`] trait, so a different algorithm (A*, precomputed
//! all-pairs tables) can be swapped in without touching the core.  The
//! default [`DijkstraPaths`] is sufficient for region-sized graphs.
//!
//! # Determinism
//!
//! Edge durations are the weights.  Ties between equal-cost frontier
//! entries are broken by `Location` order (the heap key is
//! `(cost, location)`), so dispatcher decisions built on these paths are
//! reproducible across runs.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};

use fleet_core::Location;

use crate::region::Region;

/// Pluggable shortest-path engine.
pub trait PathCalculator {
    /// The node sequence strictly after `from`, ending at `to`.
    ///
    /// Returns an empty deque when `to` is unreachable or equals `from` —
    /// callers treat both as "nowhere to go", not as an error.
    fn path(&self, region: &Region, from: Location, to: Location) -> VecDeque<Location>;

    /// For every node that can reach `target`, the shortest node sequence
    /// from that node to `target` (exclusive of the node, inclusive of
    /// `target`).  The entry for `target` itself is empty.
    fn all_paths_to(
        &self,
        region: &Region,
        target: Location,
    ) -> BTreeMap<Location, VecDeque<Location>>;
}

/// Standard Dijkstra over the region's adjacency sets.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraPaths;

impl PathCalculator for DijkstraPaths {
    fn path(&self, region: &Region, from: Location, to: Location) -> VecDeque<Location> {
        if from == to || region.node(from).is_none() || region.node(to).is_none() {
            return VecDeque::new();
        }
        let prev = dijkstra(region, from, Some(to));
        reconstruct(&prev, from, to)
    }

    fn all_paths_to(
        &self,
        region: &Region,
        target: Location,
    ) -> BTreeMap<Location, VecDeque<Location>> {
        let mut out = BTreeMap::new();
        if region.node(target).is_none() {
            return out;
        }

        // The graph is undirected, so one full expansion from the target
        // yields the tree of shortest paths *to* it: walking a node's
        // predecessor chain back towards the target is exactly the node
        // sequence a vehicle would drive.
        let prev = dijkstra(region, target, None);
        for node in region.nodes() {
            let loc = node.location();
            if loc == target {
                out.insert(loc, VecDeque::new());
            } else if prev.contains_key(&loc) {
                out.insert(loc, chain_to_source(&prev, target, loc));
            }
        }
        out
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Run Dijkstra from `source`; returns the predecessor map.
///
/// With `stop_at` set, the search terminates as soon as that node is
/// settled; otherwise the whole reachable component is expanded.
fn dijkstra(
    region: &Region,
    source: Location,
    stop_at: Option<Location>,
) -> BTreeMap<Location, Location> {
    let mut dist: BTreeMap<Location, u64> = BTreeMap::new();
    let mut prev: BTreeMap<Location, Location> = BTreeMap::new();

    dist.insert(source, 0);

    // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key Location ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u64, Location)>> = BinaryHeap::new();
    heap.push(Reverse((0, source)));

    while let Some(Reverse((cost, loc))) = heap.pop() {
        if stop_at == Some(loc) {
            break;
        }
        // Skip stale heap entries.
        if dist.get(&loc).is_some_and(|&d| cost > d) {
            continue;
        }

        let Some(node) = region.node(loc) else { continue };
        for &neighbor in node.connections() {
            let Some(edge) = region.edge(loc, neighbor) else { continue };
            let new_cost = cost.saturating_add(edge.duration());

            if dist.get(&neighbor).is_none_or(|&d| new_cost < d) {
                dist.insert(neighbor, new_cost);
                prev.insert(neighbor, loc);
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    prev
}

/// Trace `prev` back from `to` and emit the node sequence after `from`.
fn reconstruct(
    prev: &BTreeMap<Location, Location>,
    from: Location,
    to: Location,
) -> VecDeque<Location> {
    let mut nodes = VecDeque::new();
    let mut cur = to;
    loop {
        nodes.push_front(cur);
        match prev.get(&cur) {
            Some(&p) if p == from => return nodes,
            Some(&p) => cur = p,
            // `to` was never reached.
            None => return VecDeque::new(),
        }
    }
}

/// Node sequence from `node` to `source` along the predecessor chain of a
/// search that started at `source` (exclusive of `node`).
fn chain_to_source(
    prev: &BTreeMap<Location, Location>,
    source: Location,
    node: Location,
) -> VecDeque<Location> {
    let mut nodes = VecDeque::new();
    let mut cur = node;
    while let Some(&p) = prev.get(&cur) {
        nodes.push_back(p);
        if p == source {
            break;
        }
        cur = p;
    }
    nodes
}
