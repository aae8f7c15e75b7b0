use serde::Deserialize;

/// One upstream catalog entry for an artist the user listens to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
	/// Upstream artist id, unique within one catalog.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Genre tags in upstream order; the first is the primary genre.
	#[serde(default)]
	pub genres: Vec<String>,
	/// Portrait URL, if the catalog has one.
	#[serde(default)]
	pub image_url: Option<String>,
	/// Upstream popularity score, nominally `0..=100`.
	#[serde(default)]
	pub popularity: u8,
}

/// One artist in the graph. Never mutated after [`build`](super::build).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Same id as the record it came from.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Portrait URL, if any.
	pub image_url: Option<String>,
	/// Popularity in `0..=100`.
	pub weight: u8,
	/// Genre tags, primary first.
	pub genres: Vec<String>,
	/// `#RRGGBB`, derived from the primary genre.
	pub color: String,
}

/// Undirected; `source`/`target` follow input order of the pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Id of the earlier artist of the pair.
	pub source: String,
	/// Id of the later artist of the pair.
	pub target: String,
	/// Number of shared genres, always at least 1.
	pub weight: usize,
}

impl GraphEdge {
	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

/// Identity of an edge: its position in [`GraphModel::edges`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub usize);

/// Nodes and undirected edges of the genre-similarity graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphModel {
	/// One node per distinct artist id, in input order.
	pub nodes: Vec<GraphNode>,
	/// At most one edge per unordered pair; [`EdgeKey`] indexes into this.
	pub edges: Vec<GraphEdge>,
}

impl GraphModel {
	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Whether a node with `id` exists.
	pub fn contains(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	/// True when there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Edges incident to `id`, keyed by position.
	pub fn incident_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = EdgeKey> + 'a {
		self.edges
			.iter()
			.enumerate()
			.filter(move |(_, edge)| edge.touches(id))
			.map(|(i, _)| EdgeKey(i))
	}
}
