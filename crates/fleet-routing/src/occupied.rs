//! Occupancy tracking — which vehicles are where.
//!
//! The back-reference between vehicles and the components they sit on is
//! broken with handles: a vehicle stores an [`Occupancy`] (a location or a
//! location pair), and the manager owns one [`Occupied`] registry per
//! component, keyed the same way.  Each vehicle appears in exactly one
//! `Occupied` at any instant; the manager's transition code removes it from
//! the source and inserts it into the destination before any callback runs.

use std::collections::BTreeMap;

use fleet_core::{Location, Tick, VehicleId};

// ── Occupancy handle ──────────────────────────────────────────────────────────

/// Where a vehicle currently is: a node, or an edge (ascending endpoints).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Occupancy {
    Node(Location),
    Edge(Location, Location),
}

// ── Per-component registry ────────────────────────────────────────────────────

/// Per-vehicle bookkeeping inside an [`Occupied`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VehicleStats {
    /// The tick the vehicle entered this component.
    pub arrival_tick: Tick,
    /// The component the vehicle came from.  `None` for the initial
    /// placement at the starting restaurant.
    pub previous: Option<Occupancy>,
}

/// The set of vehicles currently on one node or edge.
#[derive(Clone, PartialEq, Debug)]
pub struct Occupied {
    component: Occupancy,
    vehicles: BTreeMap<VehicleId, VehicleStats>,
}

impl Occupied {
    pub(crate) fn new(component: Occupancy) -> Self {
        Self {
            component,
            vehicles: BTreeMap::new(),
        }
    }

    /// The component this registry tracks.
    #[inline]
    pub fn component(&self) -> Occupancy {
        self.component
    }

    pub(crate) fn add_vehicle(
        &mut self,
        vehicle: VehicleId,
        arrival_tick: Tick,
        previous: Option<Occupancy>,
    ) {
        self.vehicles.insert(
            vehicle,
            VehicleStats {
                arrival_tick,
                previous,
            },
        );
    }

    pub(crate) fn remove_vehicle(&mut self, vehicle: VehicleId) -> Option<VehicleStats> {
        self.vehicles.remove(&vehicle)
    }

    pub(crate) fn clear(&mut self) {
        self.vehicles.clear();
    }

    /// Vehicles present, in ascending id order.
    pub fn vehicles(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicles.keys().copied()
    }

    /// Stats for one present vehicle.
    pub fn stats(&self, vehicle: VehicleId) -> Option<&VehicleStats> {
        self.vehicles.get(&vehicle)
    }

    pub fn contains(&self, vehicle: VehicleId) -> bool {
        self.vehicles.contains_key(&vehicle)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
