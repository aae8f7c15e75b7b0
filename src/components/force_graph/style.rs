//! Per-frame styling decisions, kept free of canvas calls so the painter
//! stays a thin loop over these values.

use crate::graph::{EdgeKey, GraphNode};

use super::controller::InteractionState;

pub const MIN_RADIUS: f64 = 4.0;
pub const LABEL_SCALE: f64 = 2.5;
pub const DIMMED_OPACITY: f64 = 0.1;
pub const HOVER_GLOW: f64 = 40.0;
pub const BASE_GLOW: f64 = 20.0;

/// How one node should be painted this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawIntent {
	/// World-space radius, from popularity.
	pub radius: f64,
	/// Shadow blur of the glow.
	pub glow_radius: f64,
	/// `1.0`, or dimmed while another neighborhood is hovered.
	pub opacity: f64,
	/// Name label below the node.
	pub show_label: bool,
	/// Outline ring around the hovered node.
	pub stroke_highlight: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeIntent {
	pub alpha: f64,
	pub width: f64,
	/// Flow particles travelling source to target; zero draws none.
	pub particles: u32,
}

/// World-space radius for a popularity weight.
pub fn node_radius(weight: u8) -> f64 {
	(f64::from(weight) / 10.0 * 1.5).max(MIN_RADIUS)
}

/// Draw intent for `node` given the interaction state and the current zoom.
///
/// Labels show for the hovered node and for every node once zoomed past
/// [`LABEL_SCALE`].
pub fn style_for(node: &GraphNode, state: &InteractionState, render_scale: f64) -> DrawIntent {
	let hovered = state.is_hovered(&node.id);
	let dimmed = state.is_dimmed(&node.id);

	DrawIntent {
		radius: node_radius(node.weight),
		glow_radius: if dimmed {
			0.0
		} else if hovered {
			HOVER_GLOW
		} else {
			BASE_GLOW
		},
		opacity: if dimmed { DIMMED_OPACITY } else { 1.0 },
		show_label: hovered || render_scale > LABEL_SCALE,
		stroke_highlight: hovered,
	}
}

pub fn edge_style(key: EdgeKey, state: &InteractionState) -> EdgeIntent {
	if state.highlighted_edges.contains(&key) {
		EdgeIntent {
			alpha: 0.8,
			width: 2.0,
			particles: 4,
		}
	} else {
		EdgeIntent {
			alpha: 0.1,
			width: 1.0,
			particles: 0,
		}
	}
}
