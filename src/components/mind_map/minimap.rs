//! Overview widget geometry: the whole diagram plus the current viewport,
//! scaled into a fixed box in the bottom-right corner of the canvas.

use super::style::minimap_color;
use super::types::NodeCategory;
use super::viewport::Rect;

pub const MINIMAP_WIDTH: f64 = 200.0;
pub const MINIMAP_HEIGHT: f64 = 150.0;
pub const MINIMAP_MARGIN: f64 = 15.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MinimapNode {
	pub rect: Rect,
	pub color: &'static str,
}

/// Everything in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Minimap {
	pub frame: Rect,
	pub nodes: Vec<MinimapNode>,
	pub viewport: Rect,
}

/// Project node rectangles and the visible region into the minimap frame of a
/// `canvas_w` x `canvas_h` canvas.
pub fn layout(
	nodes: impl IntoIterator<Item = (NodeCategory, Rect)>,
	visible: &Rect,
	canvas_w: f64,
	canvas_h: f64,
) -> Minimap {
	let frame = Rect {
		x: canvas_w - MINIMAP_WIDTH - MINIMAP_MARGIN,
		y: canvas_h - MINIMAP_HEIGHT - MINIMAP_MARGIN,
		w: MINIMAP_WIDTH,
		h: MINIMAP_HEIGHT,
	};
	let nodes: Vec<(NodeCategory, Rect)> = nodes.into_iter().collect();
	let world = Rect::bounding(nodes.iter().map(|(_, r)| r).chain([visible]))
		.unwrap_or(*visible);

	let scale = (world.w / frame.w).max(world.h / frame.h).max(f64::EPSILON);
	let (offset_x, offset_y) = (
		frame.x + (frame.w - world.w / scale) / 2.0,
		frame.y + (frame.h - world.h / scale) / 2.0,
	);
	let project = |r: &Rect| Rect {
		x: offset_x + (r.x - world.x) / scale,
		y: offset_y + (r.y - world.y) / scale,
		w: r.w / scale,
		h: r.h / scale,
	};

	Minimap {
		frame,
		nodes: nodes
			.iter()
			.map(|(category, r)| MinimapNode {
				rect: project(r),
				color: minimap_color(category.as_str()),
			})
			.collect(),
		viewport: project(visible),
	}
}
