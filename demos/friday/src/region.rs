//! A small synthetic city: two restaurants, four neighborhoods, and a
//! couple of junctions knitting them together.

use fleet_core::Location;
use fleet_region::{Region, RegionBuilder, RegionResult};

pub const PIZZERIA: Location = Location { x: 0, y: 0 };
pub const NOODLE_BAR: Location = Location { x: 8, y: 2 };

pub fn build_city() -> RegionResult<Region> {
    let old_town = Location::new(2, 3);
    let harbor = Location::new(1, -3);
    let heights = Location::new(7, 5);
    let east_end = Location::new(9, -1);
    let cross_a = Location::new(3, 0);
    let cross_b = Location::new(6, 1);

    let mut b = RegionBuilder::new();
    b.add_restaurant(
        "Pizzeria Sole",
        PIZZERIA,
        vec![
            "margherita".into(),
            "funghi".into(),
            "calzone".into(),
            "quattro stagioni".into(),
        ],
    );
    b.add_restaurant(
        "Noodle Bar",
        NOODLE_BAR,
        vec!["shoyu ramen".into(), "udon".into(), "gyoza".into()],
    );
    b.add_neighborhood("Old Town", old_town);
    b.add_neighborhood("Harbor", harbor);
    b.add_neighborhood("Heights", heights);
    b.add_neighborhood("East End", east_end);
    b.add_junction("Cross A", cross_a);
    b.add_junction("Cross B", cross_b);

    // Durations fall out of the Euclidean default.
    b.add_edge("Sole-OldTown", PIZZERIA, old_town);
    b.add_edge("Sole-Harbor", PIZZERIA, harbor);
    b.add_edge("Sole-CrossA", PIZZERIA, cross_a);
    b.add_edge("CrossA-Harbor", cross_a, harbor);
    b.add_edge("CrossA-CrossB", cross_a, cross_b);
    b.add_edge("CrossB-OldTown", cross_b, old_town);
    b.add_edge("CrossB-Heights", cross_b, heights);
    b.add_edge("CrossB-Noodle", cross_b, NOODLE_BAR);
    b.add_edge("Noodle-Heights", NOODLE_BAR, heights);
    b.add_edge("Noodle-EastEnd", NOODLE_BAR, east_end);
    b.add_edge("CrossA-EastEnd", cross_a, east_end);
    b.build()
}
