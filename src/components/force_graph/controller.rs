//! Transient view state and the commands that drive the viewport.
//!
//! [`InteractionController`] owns [`InteractionState`] and is the only thing
//! that mutates it. Viewport movement is delegated to an injected
//! [`Viewport`], so the controller never holds a reference back to the
//! renderer.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::graph::{EdgeKey, GraphModel, GraphNode, IndexedGraph, NeighborIndex};

/// Zoom factor applied by one zoom-in or zoom-out step.
pub const ZOOM_STEP: f64 = 1.5;
/// Duration of a zoom step.
pub const ZOOM_DURATION_MS: u32 = 500;
/// Zoom level a selected node is shown at.
pub const FOCUS_ZOOM: f64 = 3.0;
/// Duration of the flight to a selected node.
pub const FOCUS_DURATION_MS: u32 = 1000;
/// Duration of a fit-to-view.
pub const FIT_DURATION_MS: u32 = 1000;

/// Viewport capability supplied by the rendering surface.
///
/// Commands are fire-and-forget; durations are animation hints.
pub trait Viewport {
	/// Current zoom factor.
	fn zoom(&self) -> f64;
	/// Zooms to `k` about the viewport center.
	fn set_zoom(&mut self, k: f64, duration_ms: u32);
	/// Centers on the node's current simulated position.
	fn center_on(&mut self, node_id: &str, k: f64, duration_ms: u32);
	/// Frames every node.
	fn fit_to_view(&mut self, duration_ms: u32);
}

/// Hover highlight and selection, read by the painter every frame.
///
/// The highlight sets are empty exactly when nothing is hovered; otherwise
/// they hold the hovered node, its neighbors and its incident edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
	/// Node under the pointer.
	pub hovered: Option<String>,
	/// Hovered node plus its neighbors.
	pub highlighted_nodes: HashSet<String>,
	/// Edges incident to the hovered node.
	pub highlighted_edges: HashSet<EdgeKey>,
	/// Node shown in the detail panel.
	pub selected: Option<String>,
}

impl InteractionState {
	/// Whether `id` is the hovered node.
	pub fn is_hovered(&self, id: &str) -> bool {
		self.hovered.as_deref() == Some(id)
	}

	/// Something is hovered and `id` is outside its neighborhood.
	pub fn is_dimmed(&self, id: &str) -> bool {
		self.hovered.is_some() && !self.highlighted_nodes.contains(id)
	}
}

/// Turns pointer events and control commands into [`InteractionState`]
/// changes and [`Viewport`] calls.
pub struct InteractionController<V> {
	model: Arc<GraphModel>,
	neighbors: Arc<NeighborIndex>,
	state: InteractionState,
	viewport: V,
}

impl<V: Viewport> InteractionController<V> {
	/// Starts with nothing hovered or selected.
	pub fn new(graph: IndexedGraph, viewport: V) -> Self {
		Self {
			model: graph.model,
			neighbors: graph.neighbors,
			state: InteractionState::default(),
			viewport,
		}
	}

	/// Replaces the hover highlight; `None` clears it.
	pub fn hover(&mut self, node_id: Option<&str>) {
		if self.state.hovered.as_deref() == node_id {
			return;
		}
		self.state.highlighted_nodes.clear();
		self.state.highlighted_edges.clear();
		self.state.hovered = node_id.map(str::to_owned);

		let Some(id) = node_id else {
			return;
		};
		self.state.highlighted_nodes.insert(id.to_owned());
		if let Some(adjacent) = self.neighbors.neighbors(id) {
			self.state.highlighted_nodes.extend(adjacent.iter().cloned());
		}
		self.state.highlighted_edges.extend(self.model.incident_edges(id));
	}

	/// Selects and flies to `node_id`. Ids outside the model are ignored.
	pub fn click(&mut self, node_id: &str) -> bool {
		if !self.model.contains(node_id) {
			return false;
		}
		self.state.selected = Some(node_id.to_owned());
		self.viewport.center_on(node_id, FOCUS_ZOOM, FOCUS_DURATION_MS);
		true
	}

	/// Clears the selection and fits the view.
	pub fn background_click(&mut self) {
		self.state.selected = None;
		self.viewport.fit_to_view(FIT_DURATION_MS);
	}

	/// Selects the first node, in model order, whose name contains `query`
	/// ignoring case. A miss changes nothing.
	pub fn search(&mut self, query: &str) -> Option<&GraphNode> {
		if query.is_empty() {
			return None;
		}
		let needle = query.to_lowercase();
		let Some(found) = self
			.model
			.nodes
			.iter()
			.position(|node| node.name.to_lowercase().contains(&needle))
		else {
			debug!("No artist matches {query:?}");
			return None;
		};

		let id = self.model.nodes[found].id.clone();
		self.click(&id);
		self.model.nodes.get(found)
	}

	/// One [`ZOOM_STEP`] closer.
	pub fn zoom_in(&mut self) {
		let k = self.viewport.zoom() * ZOOM_STEP;
		self.viewport.set_zoom(k, ZOOM_DURATION_MS);
	}

	/// One [`ZOOM_STEP`] further out.
	pub fn zoom_out(&mut self) {
		let k = self.viewport.zoom() / ZOOM_STEP;
		self.viewport.set_zoom(k, ZOOM_DURATION_MS);
	}

	/// Fits the view without touching the selection.
	pub fn reset_view(&mut self) {
		self.viewport.fit_to_view(FIT_DURATION_MS);
	}

	/// Current hover and selection.
	pub fn state(&self) -> &InteractionState {
		&self.state
	}

	/// The selected node, if any.
	pub fn selected(&self) -> Option<&GraphNode> {
		self.state
			.selected
			.as_deref()
			.and_then(|id| self.model.node(id))
	}

	/// The graph being interacted with.
	pub fn model(&self) -> &Arc<GraphModel> {
		&self.model
	}

	/// Adjacency used for hover highlighting.
	pub fn neighbors(&self) -> &Arc<NeighborIndex> {
		&self.neighbors
	}

	/// The injected viewport.
	pub fn viewport(&self) -> &V {
		&self.viewport
	}

	/// Mutable access for direct manipulation such as wheel zoom.
	pub fn viewport_mut(&mut self) -> &mut V {
		&mut self.viewport
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{ArtistRecord, build};

	#[derive(Clone, Debug, PartialEq)]
	enum Command {
		SetZoom(f64, u32),
		CenterOn(String, f64, u32),
		Fit(u32),
	}

	#[derive(Default)]
	struct RecordingViewport {
		k: f64,
		commands: Vec<Command>,
	}

	impl Viewport for RecordingViewport {
		fn zoom(&self) -> f64 {
			self.k
		}

		fn set_zoom(&mut self, k: f64, duration_ms: u32) {
			self.k = k;
			self.commands.push(Command::SetZoom(k, duration_ms));
		}

		fn center_on(&mut self, node_id: &str, k: f64, duration_ms: u32) {
			self.commands
				.push(Command::CenterOn(node_id.into(), k, duration_ms));
		}

		fn fit_to_view(&mut self, duration_ms: u32) {
			self.commands.push(Command::Fit(duration_ms));
		}
	}

	fn record(id: &str, name: &str, genres: &[&str]) -> ArtistRecord {
		ArtistRecord {
			id: id.into(),
			name: name.into(),
			genres: genres.iter().map(|g| g.to_string()).collect(),
			image_url: None,
			popularity: 40,
		}
	}

	fn controller(records: &[ArtistRecord]) -> InteractionController<RecordingViewport> {
		let viewport = RecordingViewport {
			k: 1.0,
			..Default::default()
		};
		InteractionController::new(IndexedGraph::new(build(records)), viewport)
	}

	fn sample() -> InteractionController<RecordingViewport> {
		controller(&[
			record("A", "Alpha", &["rock", "pop"]),
			record("B", "Beta", &["pop", "jazz"]),
			record("C", "Gamma", &["classical"]),
			record("D", "Delta", &["jazz"]),
		])
	}

	fn ids(ids: &[&str]) -> HashSet<String> {
		ids.iter().map(|id| id.to_string()).collect()
	}

	#[test]
	fn hover_highlights_node_and_neighbors() {
		let mut ctl = sample();
		ctl.hover(Some("B"));

		let state = ctl.state();
		assert_eq!(state.hovered.as_deref(), Some("B"));
		assert_eq!(state.highlighted_nodes, ids(&["A", "B", "D"]));

		let edges = state
			.highlighted_edges
			.iter()
			.map(|key| &ctl.model().edges[key.0])
			.collect::<Vec<_>>();
		assert_eq!(edges.len(), 2);
		assert!(edges.iter().all(|edge| edge.touches("B")));
	}

	#[test]
	fn hover_isolated_node_highlights_only_itself() {
		let mut ctl = sample();
		ctl.hover(Some("C"));
		assert_eq!(ctl.state().highlighted_nodes, ids(&["C"]));
		assert!(ctl.state().highlighted_edges.is_empty());
	}

	#[test]
	fn hover_exit_clears_highlights() {
		let mut ctl = sample();
		ctl.hover(Some("A"));
		ctl.hover(None);
		assert_eq!(ctl.state().hovered, None);
		assert!(ctl.state().highlighted_nodes.is_empty());
		assert!(ctl.state().highlighted_edges.is_empty());
	}

	#[test]
	fn moving_hover_replaces_previous_highlight() {
		let mut ctl = sample();
		ctl.hover(Some("A"));
		ctl.hover(Some("D"));
		assert_eq!(ctl.state().highlighted_nodes, ids(&["B", "D"]));
	}

	#[test]
	fn hover_does_not_touch_selection_or_viewport() {
		let mut ctl = sample();
		ctl.click("A");
		ctl.hover(Some("C"));
		assert_eq!(ctl.state().selected.as_deref(), Some("A"));
		assert_eq!(ctl.viewport().commands.len(), 1);
	}

	#[test]
	fn click_selects_and_centers() {
		let mut ctl = sample();
		assert!(ctl.click("B"));
		assert_eq!(ctl.state().selected.as_deref(), Some("B"));
		assert_eq!(ctl.selected().map(|node| node.name.as_str()), Some("Beta"));
		assert_eq!(
			ctl.viewport().commands,
			vec![Command::CenterOn("B".into(), 3.0, 1000)]
		);
	}

	#[test]
	fn click_on_unknown_node_is_ignored() {
		let mut ctl = sample();
		assert!(!ctl.click("nope"));
		assert_eq!(ctl.state().selected, None);
		assert!(ctl.viewport().commands.is_empty());
	}

	#[test]
	fn background_click_always_clears_selection() {
		let mut ctl = sample();
		ctl.background_click();
		assert_eq!(ctl.state().selected, None);

		ctl.click("A");
		ctl.background_click();
		ctl.background_click();
		assert_eq!(ctl.state().selected, None);
		assert_eq!(
			ctl.viewport().commands,
			vec![
				Command::Fit(1000),
				Command::CenterOn("A".into(), 3.0, 1000),
				Command::Fit(1000),
				Command::Fit(1000),
			]
		);
	}

	#[test]
	fn search_takes_first_match_in_node_order() {
		let mut ctl = controller(&[
			record("1", "Jazz Hands", &[]),
			record("2", "Buzz", &[]),
			record("3", "Orchestra", &[]),
		]);
		let found = ctl.search("zz").map(|node| node.id.clone());
		assert_eq!(found.as_deref(), Some("1"));
		assert_eq!(ctl.state().selected.as_deref(), Some("1"));
		assert_eq!(
			ctl.viewport().commands,
			vec![Command::CenterOn("1".into(), 3.0, 1000)]
		);
	}

	#[test]
	fn search_ignores_case() {
		let mut ctl = sample();
		assert_eq!(ctl.search("gAmM").map(|node| node.id.as_str()), Some("C"));
	}

	#[test]
	fn search_miss_and_empty_query_are_no_ops() {
		let mut ctl = sample();
		ctl.click("A");
		assert!(ctl.search("zzz").is_none());
		assert!(ctl.search("").is_none());
		assert_eq!(ctl.state().selected.as_deref(), Some("A"));
		assert_eq!(ctl.viewport().commands.len(), 1);
	}

	#[test]
	fn zoom_steps_scale_current_zoom() {
		let mut ctl = sample();
		ctl.zoom_in();
		ctl.zoom_in();
		ctl.zoom_out();
		assert_eq!(
			ctl.viewport().commands,
			vec![
				Command::SetZoom(1.5, 500),
				Command::SetZoom(2.25, 500),
				Command::SetZoom(1.5, 500),
			]
		);
		assert_eq!(ctl.state(), &InteractionState::default());
	}

	#[test]
	fn reset_view_fits_without_touching_state() {
		let mut ctl = sample();
		ctl.click("D");
		ctl.reset_view();
		assert_eq!(ctl.state().selected.as_deref(), Some("D"));
		assert_eq!(ctl.viewport().commands.last(), Some(&Command::Fit(1000)));
	}

	#[test]
	fn dimming_follows_hover() {
		let mut ctl = sample();
		assert!(!ctl.state().is_dimmed("C"));
		ctl.hover(Some("A"));
		assert!(ctl.state().is_dimmed("C"));
		assert!(!ctl.state().is_dimmed("B"));
		assert!(ctl.state().is_hovered("A"));
	}
}
