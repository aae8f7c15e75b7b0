use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use crate::graph::IndexedGraph;

use super::camera::Camera;
use super::controller::InteractionController;
use super::render;
use super::state::{ForceGraphState, Release};

/// Longest simulation step taken after a stalled frame (e.g. background tab).
const MAX_FRAME_SECS: f64 = 0.05;

/// Imperative surface of a mounted [`ForceGraphCanvas`], for the controls
/// and panels that sit beside it.
///
/// Every call goes through the interaction controller and mirrors the
/// resulting selection into [`GraphHandle::selected`].
#[derive(Clone)]
pub struct GraphHandle {
	state: Rc<RefCell<Option<ForceGraphState>>>,
	selected: RwSignal<Option<String>>,
}

impl Default for GraphHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl GraphHandle {
	pub fn new() -> Self {
		Self {
			state: Rc::new(RefCell::new(None)),
			selected: RwSignal::new(None),
		}
	}

	/// Id of the selected artist, if any.
	pub fn selected(&self) -> RwSignal<Option<String>> {
		self.selected
	}

	pub fn search(&self, query: &str) {
		self.apply(|ctl| {
			ctl.search(query);
		});
	}

	pub fn zoom_in(&self) {
		self.apply(InteractionController::zoom_in);
	}

	pub fn zoom_out(&self) {
		self.apply(InteractionController::zoom_out);
	}

	pub fn reset_view(&self) {
		self.apply(InteractionController::reset_view);
	}

	pub fn background_click(&self) {
		self.apply(InteractionController::background_click);
	}

	fn apply(&self, f: impl FnOnce(&mut InteractionController<Camera>)) {
		let selected = {
			let mut state = self.state.borrow_mut();
			let Some(s) = state.as_mut() else {
				return;
			};
			f(&mut s.controller);
			s.controller.state().selected.clone()
		};
		self.sync_selected(selected);
	}

	fn with_state<T>(&self, f: impl FnOnce(&mut ForceGraphState) -> T) -> Option<T> {
		let mut state = self.state.borrow_mut();
		state.as_mut().map(f)
	}

	fn sync_selected(&self, selected: Option<String>) {
		if self.selected.get_untracked() != selected {
			self.selected.set(selected);
		}
	}
}

fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<IndexedGraph>,
	handle: GraphHandle,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (handle_init, animate_init, resize_cb_init) =
		(handle.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("Canvas 2d context unavailable");
			return;
		};

		let graph = data.get();
		debug!(
			"Mounting graph canvas {w}x{h} with {} artists",
			graph.model.nodes.len()
		);
		*handle_init.state.borrow_mut() = Some(ForceGraphState::new(graph, w, h));
		handle_init.sync_selected(None);

		if fullscreen {
			let (handle_resize, canvas_resize) = (handle_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				handle_resize.with_state(|s| s.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (handle_anim, animate_inner) = (handle_init.clone(), animate_init.clone());
		let mut last_frame = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = ((now - last_frame) / 1000.0).clamp(0.0, MAX_FRAME_SECS);
			last_frame = now;
			handle_anim.with_state(|s| {
				s.tick(dt as f32);
				render::render(s, &ctx);
			});
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let handle_md = handle.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			handle_md.with_state(|s| s.press(x, y));
		}
	};

	let handle_mm = handle.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			handle_mm.with_state(|s| s.pointer_move(x, y));
		}
	};

	let handle_mu = handle.clone();
	let on_mouseup = move |_: MouseEvent| {
		let Some((release, selected)) = handle_mu.with_state(|s| {
			let release = s.release();
			(release, s.controller.state().selected.clone())
		}) else {
			return;
		};
		if let Release::Pinned(id) = &release {
			debug!("Pinned {id}");
		}
		handle_mu.sync_selected(selected);
	};

	let handle_ml = handle.clone();
	let on_mouseleave = move |_: MouseEvent| {
		handle_ml.with_state(ForceGraphState::leave);
	};

	let handle_wh = handle.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			handle_wh.with_state(|s| s.camera_mut().zoom_about(x, y, factor));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
