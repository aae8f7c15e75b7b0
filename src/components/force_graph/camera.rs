use super::controller::Viewport;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
const FIT_PADDING: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	fn looking_at(wx: f64, wy: f64, k: f64, width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0 - wx * k,
			y: height / 2.0 - wy * k,
			k,
		}
	}

	fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// World-space extent of the nodes: `(min_x, min_y, max_x, max_y)`.
pub type Bounds = (f64, f64, f64, f64);

#[derive(Clone, Debug, PartialEq)]
enum Target {
	Zoom(f64),
	Node { id: String, k: f64 },
	Fit,
}

#[derive(Clone, Debug)]
struct Flight {
	from: ViewTransform,
	target: Target,
	elapsed_ms: f64,
	duration_ms: f64,
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Pan/zoom transform of the canvas plus the animation toward the last
/// requested viewport command.
///
/// Targets are resolved every frame against live node positions, so a
/// focused node that is still settling is tracked until the flight lands.
#[derive(Clone, Debug)]
pub struct Camera {
	pub transform: ViewTransform,
	width: f64,
	height: f64,
	flight: Option<Flight>,
}

impl Camera {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::centered(width, height),
			width,
			height,
			flight: None,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn is_flying(&self) -> bool {
		self.flight.is_some()
	}

	/// Direct manipulation (wheel, drag-pan) cancels any running flight.
	pub fn pan_to(&mut self, x: f64, y: f64) {
		self.flight = None;
		self.transform.x = x;
		self.transform.y = y;
	}

	/// Zooms by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_about(&mut self, sx: f64, sy: f64, factor: f64) {
		self.flight = None;
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Advances the current flight by `dt_ms`.
	///
	/// `locate` gives a node's world position; `bounds` is `None` for an
	/// empty scene.
	pub fn advance(
		&mut self,
		dt_ms: f64,
		locate: impl Fn(&str) -> Option<(f64, f64)>,
		bounds: Option<Bounds>,
	) {
		let Some(flight) = self.flight.as_mut() else {
			return;
		};
		flight.elapsed_ms += dt_ms;
		let t = if flight.duration_ms <= 0.0 {
			1.0
		} else {
			(flight.elapsed_ms / flight.duration_ms).min(1.0)
		};

		let from = flight.from;
		let target = flight.target.clone();
		let Some(to) = self.resolve(&from, &target, locate, bounds) else {
			// Focused node vanished; stay where we are.
			self.flight = None;
			return;
		};

		self.transform = from.lerp(&to, ease_out_cubic(t));
		if t >= 1.0 {
			self.flight = None;
		}
	}

	fn resolve(
		&self,
		from: &ViewTransform,
		target: &Target,
		locate: impl Fn(&str) -> Option<(f64, f64)>,
		bounds: Option<Bounds>,
	) -> Option<ViewTransform> {
		let (w, h) = (self.width, self.height);
		match target {
			Target::Zoom(k) => {
				let cx = (w / 2.0 - from.x) / from.k;
				let cy = (h / 2.0 - from.y) / from.k;
				Some(ViewTransform::looking_at(cx, cy, *k, w, h))
			}
			Target::Node { id, k } => {
				let (wx, wy) = locate(id)?;
				Some(ViewTransform::looking_at(wx, wy, *k, w, h))
			}
			Target::Fit => Some(match bounds {
				Some((min_x, min_y, max_x, max_y)) => {
					let span_x = (max_x - min_x).max(1.0);
					let span_y = (max_y - min_y).max(1.0);
					let k = ((w - 2.0 * FIT_PADDING) / span_x)
						.min((h - 2.0 * FIT_PADDING) / span_y)
						.clamp(MIN_ZOOM, MAX_ZOOM);
					ViewTransform::looking_at((min_x + max_x) / 2.0, (min_y + max_y) / 2.0, k, w, h)
				}
				None => ViewTransform::centered(w, h),
			}),
		}
	}

	fn fly(&mut self, target: Target, duration_ms: u32) {
		self.flight = Some(Flight {
			from: self.transform,
			target,
			elapsed_ms: 0.0,
			duration_ms: f64::from(duration_ms),
		});
	}
}

impl Viewport for Camera {
	fn zoom(&self) -> f64 {
		self.transform.k
	}

	fn set_zoom(&mut self, k: f64, duration_ms: u32) {
		self.fly(Target::Zoom(k.clamp(MIN_ZOOM, MAX_ZOOM)), duration_ms);
	}

	fn center_on(&mut self, node_id: &str, k: f64, duration_ms: u32) {
		self.fly(
			Target::Node {
				id: node_id.to_owned(),
				k: k.clamp(MIN_ZOOM, MAX_ZOOM),
			},
			duration_ms,
		);
	}

	fn fit_to_view(&mut self, duration_ms: u32) {
		self.fly(Target::Fit, duration_ms);
	}
}
