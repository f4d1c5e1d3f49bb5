//! Validating region construction.

use std::collections::{BTreeMap, BTreeSet};

use fleet_core::{DistanceCalculator, EuclideanDistance, Location};

use crate::region::{edge_key, Edge, Node, NodeKind, Region};
use crate::{RegionError, RegionResult};

/// Construct a [`Region`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and undirected edges in any order.  `build()`
/// checks that every edge references existing nodes, derives each node's
/// connection set from the edges, and produces the immutable region.
///
/// Edge durations default to the configured [`DistanceCalculator`]
/// (Euclidean unless overridden);
/// [`add_edge_with_duration`](Self::add_edge_with_duration) pins an
/// explicit value.
///
/// # Example
///
/// ```
/// use fleet_core::Location;
/// use fleet_region::RegionBuilder;
///
/// let mut b = RegionBuilder::new();
/// b.add_restaurant("Pizzeria", Location::new(0, 0), vec!["margherita".into()]);
/// b.add_neighborhood("Old Town", Location::new(3, 4));
/// b.add_edge("Main St", Location::new(0, 0), Location::new(3, 4));
/// let region = b.build().unwrap();
/// assert_eq!(region.edge(Location::new(3, 4), Location::new(0, 0)).unwrap().duration(), 5);
/// ```
pub struct RegionBuilder {
    distance: Box<dyn DistanceCalculator>,
    nodes: BTreeMap<Location, (String, NodeKind)>,
    edges: Vec<RawEdge>,
}

struct RawEdge {
    name: String,
    a: Location,
    b: Location,
    duration: Option<u64>,
}

impl RegionBuilder {
    /// A builder deriving default edge durations with [`EuclideanDistance`].
    pub fn new() -> Self {
        Self::with_distance_calculator(Box::new(EuclideanDistance))
    }

    /// A builder deriving default edge durations with `distance`.
    pub fn with_distance_calculator(distance: Box<dyn DistanceCalculator>) -> Self {
        Self {
            distance,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Add a plain intersection node.
    pub fn add_junction(&mut self, name: impl Into<String>, loc: Location) -> &mut Self {
        self.nodes.insert(loc, (name.into(), NodeKind::Junction));
        self
    }

    /// Add a restaurant node with its menu.
    pub fn add_restaurant(
        &mut self,
        name: impl Into<String>,
        loc: Location,
        menu: Vec<String>,
    ) -> &mut Self {
        self.nodes.insert(loc, (name.into(), NodeKind::Restaurant { menu }));
        self
    }

    /// Add a neighborhood node.
    pub fn add_neighborhood(&mut self, name: impl Into<String>, loc: Location) -> &mut Self {
        self.nodes.insert(loc, (name.into(), NodeKind::Neighborhood));
        self
    }

    /// Add an undirected edge whose duration comes from the distance
    /// calculator at build time.
    pub fn add_edge(&mut self, name: impl Into<String>, a: Location, b: Location) -> &mut Self {
        self.edges.push(RawEdge { name: name.into(), a, b, duration: None });
        self
    }

    /// Add an undirected edge with an explicit duration in ticks.
    pub fn add_edge_with_duration(
        &mut self,
        name: impl Into<String>,
        a: Location,
        b: Location,
        duration: u64,
    ) -> &mut Self {
        self.edges.push(RawEdge { name: name.into(), a, b, duration: Some(duration) });
        self
    }

    /// Validate and produce the immutable [`Region`].
    ///
    /// # Errors
    ///
    /// - an edge references a location with no node
    /// - an edge connects a location to itself
    /// - two edges connect the same pair of locations
    /// - an explicit duration is zero
    pub fn build(self) -> RegionResult<Region> {
        let mut edges: BTreeMap<(Location, Location), Edge> = BTreeMap::new();
        let mut connections: BTreeMap<Location, BTreeSet<Location>> = BTreeMap::new();

        for raw in self.edges {
            for endpoint in [raw.a, raw.b] {
                if !self.nodes.contains_key(&endpoint) {
                    return Err(RegionError::UnknownEndpoint { name: raw.name, endpoint });
                }
            }
            if raw.a == raw.b {
                return Err(RegionError::SelfLoop { name: raw.name, at: raw.a });
            }

            let (a, b) = edge_key(raw.a, raw.b);
            let duration = raw
                .duration
                .unwrap_or_else(|| self.distance.distance(a, b));
            if edges
                .insert((a, b), Edge::new(raw.name, a, b, duration)?)
                .is_some()
            {
                return Err(RegionError::DuplicateEdge { a, b });
            }

            connections.entry(a).or_default().insert(b);
            connections.entry(b).or_default().insert(a);
        }

        let nodes = self
            .nodes
            .into_iter()
            .map(|(loc, (name, kind))| {
                let conns = connections.remove(&loc).unwrap_or_default();
                (loc, Node::new(name, loc, conns, kind))
            })
            .collect();

        Ok(Region::from_parts(nodes, edges))
    }
}

impl Default for RegionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
