use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::types::GraphModel;

/// A built model paired with its adjacency, shared read-only by the canvas
/// and the panels beside it.
#[derive(Clone, Debug, Default)]
pub struct IndexedGraph {
	/// The built graph.
	pub model: Arc<GraphModel>,
	/// Adjacency of [`IndexedGraph::model`].
	pub neighbors: Arc<NeighborIndex>,
}

impl IndexedGraph {
	/// Indexes `model` once and wraps both for sharing.
	pub fn new(model: GraphModel) -> Self {
		let neighbors = Arc::new(NeighborIndex::build(&model));
		Self {
			model: Arc::new(model),
			neighbors,
		}
	}
}

/// Adjacent node ids for every node of a [`GraphModel`].
///
/// Built once per model; the model never changes afterwards, so there is no
/// incremental update path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborIndex {
	adjacent: HashMap<String, HashSet<String>>,
}

impl NeighborIndex {
	/// Every node of `model` gets an entry, isolated ones an empty set.
	pub fn build(model: &GraphModel) -> Self {
		let mut adjacent = model
			.nodes
			.iter()
			.map(|node| (node.id.clone(), HashSet::new()))
			.collect::<HashMap<_, _>>();

		for edge in &model.edges {
			adjacent
				.entry(edge.source.clone())
				.or_default()
				.insert(edge.target.clone());
			adjacent
				.entry(edge.target.clone())
				.or_default()
				.insert(edge.source.clone());
		}

		Self { adjacent }
	}

	/// Neighbors of `id`; `None` only for ids that are not in the model.
	pub fn neighbors(&self, id: &str) -> Option<&HashSet<String>> {
		self.adjacent.get(id)
	}

	/// Number of neighbors; zero for unknown ids.
	pub fn degree(&self, id: &str) -> usize {
		self.neighbors(id).map_or(0, HashSet::len)
	}

	/// Number of indexed nodes.
	pub fn len(&self) -> usize {
		self.adjacent.len()
	}

	/// True for an index over an empty model.
	pub fn is_empty(&self) -> bool {
		self.adjacent.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{ArtistRecord, build};

	fn record(id: &str, genres: &[&str]) -> ArtistRecord {
		ArtistRecord {
			id: id.into(),
			name: id.into(),
			genres: genres.iter().map(|g| g.to_string()).collect(),
			image_url: None,
			popularity: 0,
		}
	}

	fn set(ids: &[&str]) -> HashSet<String> {
		ids.iter().map(|id| id.to_string()).collect()
	}

	#[test]
	fn isolated_node_has_empty_entry() {
		let model = build(&[
			record("A", &["rock", "pop"]),
			record("B", &["pop", "jazz"]),
			record("C", &["classical"]),
		]);
		let index = NeighborIndex::build(&model);

		assert_eq!(index.len(), 3);
		assert_eq!(index.neighbors("A"), Some(&set(&["B"])));
		assert_eq!(index.neighbors("B"), Some(&set(&["A"])));
		assert_eq!(index.neighbors("C"), Some(&HashSet::new()));
		assert_eq!(index.neighbors("missing"), None);
	}

	#[test]
	fn adjacency_is_symmetric_and_complete() {
		let model = build(&[
			record("A", &["x", "y"]),
			record("B", &["y"]),
			record("C", &["x"]),
			record("D", &["z"]),
		]);
		let index = NeighborIndex::build(&model);

		for node in &model.nodes {
			let expected = model
				.edges
				.iter()
				.filter_map(|edge| {
					if edge.source == node.id {
						Some(edge.target.clone())
					} else if edge.target == node.id {
						Some(edge.source.clone())
					} else {
						None
					}
				})
				.collect::<HashSet<_>>();
			assert_eq!(index.neighbors(&node.id), Some(&expected), "{}", node.id);
		}
		assert_eq!(index.degree("A"), 2);
		assert_eq!(index.degree("D"), 0);
	}

	#[test]
	fn rebuilding_gives_the_same_index() {
		let model = build(&[record("A", &["x"]), record("B", &["x"])]);
		assert_eq!(NeighborIndex::build(&model), NeighborIndex::build(&model));
	}

	#[test]
	fn indexed_graph_indexes_its_own_model() {
		let graph = IndexedGraph::new(build(&[record("A", &["x"]), record("B", &["x"])]));
		assert_eq!(graph.neighbors.len(), graph.model.nodes.len());
		assert_eq!(graph.neighbors.degree("A"), 1);
	}

	#[test]
	fn empty_model_gives_empty_index() {
		assert!(NeighborIndex::build(&GraphModel::default()).is_empty());
	}
}
