pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
pub const ZOOM_STEP: f64 = 1.2;
/// Fraction of the viewport left empty around the content by `fit`.
pub const FIT_PADDING: f64 = 0.1;

/// Axis-aligned rectangle in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

impl Rect {
	pub fn contains(&self, px: f64, py: f64) -> bool {
		px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
	}

	pub fn union(&self, other: &Rect) -> Rect {
		let (x0, y0) = (self.x.min(other.x), self.y.min(other.y));
		let (x1, y1) = (
			(self.x + self.w).max(other.x + other.w),
			(self.y + self.h).max(other.y + other.h),
		);
		Rect {
			x: x0,
			y: y0,
			w: x1 - x0,
			h: y1 - y0,
		}
	}

	/// Smallest rectangle covering all of `rects`.
	pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
		rects.into_iter().fold(None, |acc: Option<Rect>, r| {
			Some(acc.map_or(*r, |a| a.union(r)))
		})
	}
}

/// Screen = graph * k + (x, y).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	#[cfg(test)]
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Scale by `factor` keeping the screen point (sx, sy) fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	/// Frame `bounds` centred in a `width` x `height` viewport.
	pub fn fit(bounds: &Rect, width: f64, height: f64) -> Self {
		if bounds.w <= 0.0 || bounds.h <= 0.0 || width <= 0.0 || height <= 0.0 {
			return Self::default();
		}
		let usable = 1.0 - 2.0 * FIT_PADDING;
		let k = (width * usable / bounds.w)
			.min(height * usable / bounds.h)
			.clamp(MIN_ZOOM, MAX_ZOOM);
		Self {
			x: width / 2.0 - (bounds.x + bounds.w / 2.0) * k,
			y: height / 2.0 - (bounds.y + bounds.h / 2.0) * k,
			k,
		}
	}

	/// The graph-space rectangle visible in a `width` x `height` viewport.
	pub fn visible(&self, width: f64, height: f64) -> Rect {
		let (x, y) = self.screen_to_graph(0.0, 0.0);
		Rect {
			x,
			y,
			w: width / self.k,
			h: height / self.k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn screen_graph_round_trip() {
		let t = ViewTransform {
			x: 40.0,
			y: -10.0,
			k: 2.5,
		};
		let (gx, gy) = t.screen_to_graph(140.0, 90.0);
		assert!(close(gx, 40.0) && close(gy, 40.0));
		let (sx, sy) = t.graph_to_screen(gx, gy);
		assert!(close(sx, 140.0) && close(sy, 90.0));
	}

	#[test]
	fn zoom_keeps_anchor_fixed_and_clamps() {
		let mut t = ViewTransform::default();
		let before = t.screen_to_graph(300.0, 200.0);
		t.zoom_at(300.0, 200.0, ZOOM_STEP);
		let after = t.screen_to_graph(300.0, 200.0);
		assert!(close(before.0, after.0) && close(before.1, after.1));

		for _ in 0..100 {
			t.zoom_at(0.0, 0.0, ZOOM_STEP);
		}
		assert!(close(t.k, MAX_ZOOM));
		for _ in 0..100 {
			t.zoom_at(0.0, 0.0, 1.0 / ZOOM_STEP);
		}
		assert!(close(t.k, MIN_ZOOM));
	}

	#[test]
	fn fit_centres_bounds() {
		let bounds = Rect {
			x: 100.0,
			y: 50.0,
			w: 400.0,
			h: 200.0,
		};
		let t = ViewTransform::fit(&bounds, 1000.0, 800.0);
		assert!(close(t.k, 2.0));
		let (cx, cy) = t.graph_to_screen(300.0, 150.0);
		assert!(close(cx, 500.0) && close(cy, 400.0));
		let visible = t.visible(1000.0, 800.0);
		assert!(visible.contains(bounds.x, bounds.y));
		assert!(visible.contains(bounds.x + bounds.w, bounds.y + bounds.h));
	}

	#[test]
	fn bounding_of_nothing_is_none() {
		assert_eq!(Rect::bounding(&[]), None);
		let a = Rect {
			x: 0.0,
			y: 0.0,
			w: 10.0,
			h: 10.0,
		};
		let b = Rect {
			x: -5.0,
			y: 20.0,
			w: 1.0,
			h: 1.0,
		};
		assert_eq!(
			Rect::bounding([&a, &b]),
			Some(Rect {
				x: -5.0,
				y: 0.0,
				w: 15.0,
				h: 21.0
			})
		);
	}
}
