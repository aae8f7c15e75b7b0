//! Artist records to weighted genre-similarity graph.
//!
//! Construction is one-directional: [`ArtistRecord`]s are turned into a
//! [`GraphModel`] by [`build`], and [`NeighborIndex::build`] derives the
//! adjacency used for hover highlighting. The model is immutable once built.

mod builder;
mod color;
mod neighbors;
mod types;

pub use builder::build;
pub use color::{UNKNOWN_GENRE, color_for};
pub use neighbors::{IndexedGraph, NeighborIndex};
pub use types::{ArtistRecord, EdgeKey, GraphEdge, GraphModel, GraphNode};
