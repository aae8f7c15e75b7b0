use std::collections::HashSet;

use log::info;

use super::color::color_for;
use super::types::{ArtistRecord, GraphEdge, GraphModel, GraphNode};

/// Turns the fetched artists into nodes, linking every pair that shares a genre.
///
/// Ids are unique in the result: a repeated id keeps its first record and the
/// rest are dropped, so no edge ever joins a node to itself.
///
/// Edge discovery is a plain pairwise scan, O(n² · g) for n artists with g
/// genres each. That is fine for one page of top artists (n ≤ 50); a caller
/// with a much larger catalog should index artists by genre first.
pub fn build(records: &[ArtistRecord]) -> GraphModel {
	let mut seen = HashSet::new();
	let records = records
		.iter()
		.filter(|record| seen.insert(record.id.as_str()))
		.collect::<Vec<_>>();
	let nodes = records.iter().copied().map(to_node).collect::<Vec<_>>();
	let genre_sets = records.iter().copied().map(genre_set).collect::<Vec<_>>();

	let mut edges = Vec::new();
	for (i, source) in records.iter().enumerate() {
		for (j, target) in records.iter().enumerate().skip(i + 1) {
			let shared = genre_sets[i].intersection(&genre_sets[j]).count();
			if shared > 0 {
				edges.push(GraphEdge {
					source: source.id.clone(),
					target: target.id.clone(),
					weight: shared,
				});
			}
		}
	}

	info!(
		"Built artist graph: {} nodes, {} edges",
		nodes.len(),
		edges.len()
	);
	GraphModel { nodes, edges }
}

fn genre_set(record: &ArtistRecord) -> HashSet<&str> {
	record.genres.iter().map(String::as_str).collect()
}

fn to_node(record: &ArtistRecord) -> GraphNode {
	GraphNode {
		id: record.id.clone(),
		name: record.name.clone(),
		image_url: record.image_url.clone(),
		weight: record.popularity.min(100),
		genres: record.genres.clone(),
		color: color_for(record.genres.first().map(String::as_str)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{NeighborIndex, UNKNOWN_GENRE};

	fn artist(id: &str, genres: &[&str]) -> ArtistRecord {
		ArtistRecord {
			id: id.into(),
			name: format!("Artist {id}"),
			genres: genres.iter().map(|g| g.to_string()).collect(),
			image_url: None,
			popularity: 50,
		}
	}

	#[test]
	fn empty_input_yields_empty_graph() {
		let model = build(&[]);
		assert!(model.nodes.is_empty());
		assert!(model.edges.is_empty());
	}

	#[test]
	fn shared_genre_links_pair_and_isolates_the_rest() {
		let model = build(&[
			artist("A", &["rock", "pop"]),
			artist("B", &["pop", "jazz"]),
			artist("C", &["classical"]),
		]);

		assert_eq!(model.nodes.len(), 3);
		assert_eq!(
			model.edges,
			vec![GraphEdge {
				source: "A".into(),
				target: "B".into(),
				weight: 1,
			}]
		);
		assert!(!model.edges.iter().any(|edge| edge.touches("C")));
	}

	#[test]
	fn weight_counts_every_shared_genre() {
		let model = build(&[
			artist("A", &["rock", "pop", "indie"]),
			artist("B", &["indie", "pop", "rock", "folk"]),
		]);
		assert_eq!(model.edges.len(), 1);
		assert_eq!(model.edges[0].weight, 3);
	}

	#[test]
	fn genre_matching_is_case_sensitive() {
		let model = build(&[artist("A", &["Rock"]), artist("B", &["rock"])]);
		assert!(model.edges.is_empty());
	}

	#[test]
	fn edges_exist_exactly_for_overlapping_pairs() {
		let records = [
			artist("A", &["a", "b"]),
			artist("B", &["b", "c"]),
			artist("C", &["c", "a"]),
			artist("D", &["d"]),
			artist("E", &[]),
		];
		let model = build(&records);

		for (i, left) in records.iter().enumerate() {
			for right in records.iter().skip(i + 1) {
				let expected = left
					.genres
					.iter()
					.filter(|g| right.genres.contains(g))
					.count();
				let found = model
					.edges
					.iter()
					.filter(|edge| {
						(edge.source == left.id && edge.target == right.id)
							|| (edge.source == right.id && edge.target == left.id)
					})
					.collect::<Vec<_>>();
				if expected == 0 {
					assert!(found.is_empty(), "{} - {}", left.id, right.id);
				} else {
					assert_eq!(found.len(), 1, "{} - {}", left.id, right.id);
					assert_eq!(found[0].weight, expected);
				}
			}
		}
		assert!(model.edges.iter().all(|edge| edge.source != edge.target));
	}

	#[test]
	fn repeated_id_keeps_first_record_and_never_self_links() {
		let mut dup = artist("A", &["rock", "pop"]);
		dup.name = "Impostor".into();
		let model = build(&[artist("A", &["rock"]), artist("B", &["rock"]), dup]);

		assert_eq!(model.nodes.len(), 2);
		assert_eq!(model.nodes[0].name, "Artist A");
		assert_eq!(model.edges.len(), 1);
		assert!(model.edges.iter().all(|edge| edge.source != edge.target));

		let neighbors = NeighborIndex::build(&model);
		assert!(!neighbors.neighbors("A").is_some_and(|set| set.contains("A")));
	}

	#[test]
	fn source_precedes_target_in_input_order() {
		let model = build(&[artist("Z", &["x"]), artist("A", &["x"])]);
		assert_eq!(model.edges[0].source, "Z");
		assert_eq!(model.edges[0].target, "A");
	}

	#[test]
	fn node_takes_popularity_image_and_primary_genre_color() {
		let mut record = artist("A", &["shoegaze", "dream pop"]);
		record.popularity = 73;
		record.image_url = Some("https://i.scdn.co/image/abc".into());

		let model = build(&[record, artist("B", &[])]);
		let a = &model.nodes[0];
		assert_eq!(a.weight, 73);
		assert_eq!(a.image_url.as_deref(), Some("https://i.scdn.co/image/abc"));
		assert_eq!(a.color, color_for(Some("shoegaze")));
		assert_eq!(a.genres, vec!["shoegaze", "dream pop"]);

		let b = &model.nodes[1];
		assert_eq!(b.image_url, None);
		assert_eq!(b.color, color_for(Some(UNKNOWN_GENRE)));
	}
}
