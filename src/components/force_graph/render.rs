use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::graph::GraphNode;

use super::state::ForceGraphState;
use super::style::{DrawIntent, edge_style, style_for};

const BACKGROUND: &str = "#050505";
const PARTICLE_SPEED: f64 = 0.4;

pub fn render(state: &mut ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let transform = state.camera().transform;
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	draw_edges(state, ctx);
	load_images(state);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.camera().transform.k;
	let interaction = state.controller.state();

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let intent = edge_style(edge.user_data, interaction);

		ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", intent.alpha));
		ctx.set_line_width(intent.width / k);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();

		if intent.particles == 0 {
			return;
		}
		ctx.set_fill_style_str(&n1.data.user_data.color);
		for p in 0..intent.particles {
			let t = (state.flow_time * PARTICLE_SPEED + p as f64 / intent.particles as f64).fract();
			ctx.begin_path();
			let _ = ctx.arc(
				x1 + (x2 - x1) * t,
				y1 + (y2 - y1) * t,
				2.0 / k.max(0.5),
				0.0,
				2.0 * PI,
			);
			ctx.fill();
		}
	});
}

/// Starts an image load the first time a node with an image is seen.
fn load_images(state: &mut ForceGraphState) {
	let mut pending = Vec::new();
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		if let Some(url) = &info.image_url
			&& !state.images.contains_key(&info.id)
		{
			pending.push((info.id.clone(), url.clone()));
		}
	});

	for (id, url) in pending {
		let Ok(img) = HtmlImageElement::new() else {
			continue;
		};
		img.set_cross_origin(Some("anonymous"));
		img.set_src(&url);
		state.images.insert(id, img);
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.camera().transform.k;
	let interaction = state.controller.state();

	// Dimmed nodes first so the highlighted cluster paints on top.
	for lit in [false, true] {
		state.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			if interaction.is_dimmed(&info.id) == lit {
				return;
			}
			let intent = style_for(info, interaction, k);
			draw_node(
				ctx,
				info,
				&intent,
				(node.x() as f64, node.y() as f64),
				k,
				&state.images,
			);
		});
	}
	ctx.set_global_alpha(1.0);
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &GraphNode,
	intent: &DrawIntent,
	(x, y): (f64, f64),
	k: f64,
	images: &HashMap<String, HtmlImageElement>,
) {
	let r = intent.radius;
	ctx.set_global_alpha(intent.opacity);

	ctx.set_shadow_color(&node.color);
	ctx.set_shadow_blur(intent.glow_radius);
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.color);
	ctx.fill();
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_color("transparent");

	if let Some(img) = images.get(&node.id)
		&& img.complete()
		&& img.natural_width() > 0
	{
		ctx.save();
		ctx.begin_path();
		let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		ctx.clip();
		let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
			img,
			x - r,
			y - r,
			r * 2.0,
			r * 2.0,
		);
		ctx.restore();
	}

	if intent.stroke_highlight {
		ctx.begin_path();
		let _ = ctx.arc(x, y, r + 2.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
	}

	if intent.show_label {
		let font_size = 12.0 / k;
		ctx.set_font(&format!("{font_size}px sans-serif"));
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		let _ = ctx.fill_text(&node.name, x, y + r + font_size);
	}
}
