//! `fleet-region` — the immutable region graph and routing over it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`region`]  | `Region`, `Node`, `NodeKind`, `Edge`                      |
//! | [`builder`] | `RegionBuilder` — validating construction                 |
//! | [`paths`]   | `PathCalculator` trait, `DijkstraPaths`                   |
//! | [`error`]   | `RegionError`, `RegionResult<T>`                          |
//!
//! # Design
//!
//! The graph is an arena keyed by [`Location`](fleet_core::Location): nodes
//! live in an ordered map from location to node, edges in an ordered map
//! from the ascending `(a, b)` location pair.  Everything that iterates the
//! region therefore does so in a fixed, reproducible order — a property the
//! dispatcher's tie-breaking depends on.
//!
//! A `Region` is immutable once built.  Do not construct one directly; use
//! [`RegionBuilder`].

pub mod builder;
pub mod error;
pub mod paths;
pub mod region;


pub use builder::RegionBuilder;
pub use error::{RegionError, RegionResult};
pub use paths::{DijkstraPaths, PathCalculator};
pub use region::{Edge, Node, NodeKind, Region};
