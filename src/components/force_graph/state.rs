use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use web_sys::HtmlImageElement;

use crate::graph::{EdgeKey, GraphNode, IndexedGraph};

use super::camera::{Bounds, Camera};
use super::controller::InteractionController;
use super::style::node_radius;

/// Pointer travel, in pixels, below which a press/release counts as a click.
const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// What a released pointer amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Release {
	Click(String),
	BackgroundClick,
	/// Drag end; the node stays pinned where it was dropped.
	Pinned(String),
	None,
}

/// Renderer-side state: force simulation, camera, pointer gestures and the
/// per-node image side table. The [`GraphNode`] values inside the simulation
/// are never mutated; position and pin flag live in the simulation's own
/// node data.
pub struct ForceGraphState {
	pub graph: ForceGraph<GraphNode, EdgeKey>,
	pub controller: InteractionController<Camera>,
	pub drag: DragState,
	pub pan: PanState,
	pub images: HashMap<String, HtmlImageElement>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
}

impl ForceGraphState {
	pub fn new(data: IndexedGraph, width: f64, height: f64) -> Self {
		let model = data.model.clone();
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();

		let count = model.nodes.len().max(1) as f64;
		for (i, node) in model.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: node.clone(),
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for (i, edge) in model.edges.iter().enumerate() {
			let ends = (id_to_idx.get(&edge.source), id_to_idx.get(&edge.target));
			if let (Some(&src), Some(&tgt)) = ends {
				let data = EdgeData {
					user_data: EdgeKey(i),
				};
				graph.add_edge(src, tgt, data);
			}
		}

		Self {
			graph,
			controller: InteractionController::new(data, Camera::new(width, height)),
			drag: DragState::default(),
			pan: PanState::default(),
			images: HashMap::new(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	pub fn camera(&self) -> &Camera {
		self.controller.viewport()
	}

	pub fn camera_mut(&mut self) -> &mut Camera {
		self.controller.viewport_mut()
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	fn positions(&self) -> HashMap<String, (f64, f64)> {
		let mut positions = HashMap::with_capacity(self.controller.model().nodes.len());
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.data.user_data.id.clone(),
				(node.x() as f64, node.y() as f64),
			);
		});
		positions
	}

	fn bounds(positions: &HashMap<String, (f64, f64)>) -> Option<Bounds> {
		positions.values().fold(None, |acc, &(x, y)| {
			Some(match acc {
				None => (x, y, x, y),
				Some((min_x, min_y, max_x, max_y)) => {
					(min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
				}
			})
		})
	}

	/// Topmost node under the screen point, using the drawn radius.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.camera().screen_to_world(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node_radius(node.data.user_data.weight) {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id_at(&self, sx: f64, sy: f64) -> Option<String> {
		self.node_at_position(sx, sy).and_then(|i| self.id_of(i))
	}

	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			let (nx, ny) = self.node_position(idx).unwrap_or_default();
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				moved: false,
				start_x: x,
				start_y: y,
				node_start_x: nx as f32,
				node_start_y: ny as f32,
			};
		} else {
			let transform = self.camera().transform;
			self.pan = PanState {
				active: true,
				moved: false,
				start_x: x,
				start_y: y,
				transform_start_x: transform.x,
				transform_start_y: transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_id_at(x, y);
			self.controller.hover(hovered.as_deref());
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			if !self.drag.moved && travelled(self.drag.start_x, self.drag.start_y, x, y) {
				self.drag.moved = true;
			}
			if !self.drag.moved {
				return;
			}
			let k = self.camera().transform.k;
			let (nx, ny) = (
				self.drag.node_start_x + ((x - self.drag.start_x) / k) as f32,
				self.drag.node_start_y + ((y - self.drag.start_y) / k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			if !self.pan.moved && travelled(self.pan.start_x, self.pan.start_y, x, y) {
				self.pan.moved = true;
			}
			if self.pan.moved {
				let (tx, ty) = (
					self.pan.transform_start_x + (x - self.pan.start_x),
					self.pan.transform_start_y + (y - self.pan.start_y),
				);
				self.camera_mut().pan_to(tx, ty);
			}
		}
	}

	/// Ends the current gesture and feeds clicks to the controller.
	pub fn release(&mut self) -> Release {
		let drag = std::mem::take(&mut self.drag);
		let pan = std::mem::take(&mut self.pan);

		if drag.active {
			let id = drag.node_idx.and_then(|idx| self.id_of(idx));
			return match (id, drag.moved) {
				(Some(id), true) => Release::Pinned(id),
				(Some(id), false) => {
					self.controller.click(&id);
					Release::Click(id)
				}
				(None, _) => Release::None,
			};
		}
		if pan.active && !pan.moved {
			self.controller.background_click();
			return Release::BackgroundClick;
		}
		Release::None
	}

	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.controller.hover(None);
	}

	fn id_of(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn tick(&mut self, dt: f32) {
		if self.animation_running {
			self.graph.update(dt);
		}
		self.flow_time += dt as f64;

		if self.camera().is_flying() {
			let positions = self.positions();
			let bounds = Self::bounds(&positions);
			let dt_ms = f64::from(dt) * 1000.0;
			self.camera_mut().advance(dt_ms, |id| positions.get(id).copied(), bounds);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.camera_mut().resize(width, height);
	}
}

fn travelled(x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
	(x1 - x0).hypot(y1 - y0) > CLICK_SLOP
}
