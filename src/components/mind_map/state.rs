use log::debug;

use super::interaction::{self, Connection, EdgeIdGenerator, NodeChange};
use super::registry::{NodeCard, layout_card};
use super::types::{DiagramModel, Edge, Node, Position};
use super::viewport::{Rect, ViewTransform, ZOOM_STEP};

pub const HANDLE_RADIUS: f64 = 4.0;
/// Handle hit radius, in graph space so it scales with zoom like the cards.
pub const HANDLE_HIT_RADIUS: f64 = 10.0;
pub const WHEEL_ZOOM_IN: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleKind {
	Source,
	Target,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
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

/// A connection being drawn from a handle; `cursor` is in graph space.
#[derive(Clone, Debug)]
pub struct ConnectState {
	pub from: usize,
	pub kind: HandleKind,
	pub cursor: (f64, f64),
	pub moved: bool,
}

/// Live diagram state for one mounted canvas.
pub struct MindMapState {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	cards: Vec<NodeCard>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: Option<ConnectState>,
	/// Node picked by a click without drag.
	pub selected: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	edge_ids: EdgeIdGenerator,
}

impl MindMapState {
	pub fn new(
		model: DiagramModel,
		width: f64,
		height: f64,
		measure: &impl Fn(&str, f64) -> f64,
	) -> Self {
		let cards = model.nodes.iter().map(|n| layout_card(n, measure)).collect();
		let mut state = Self {
			nodes: model.nodes,
			edges: model.edges,
			cards,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			connect: None,
			selected: None,
			width,
			height,
			flow_time: 0.0,
			edge_ids: EdgeIdGenerator::default(),
		};
		state.fit_view();
		state
	}

	pub fn card(&self, idx: usize) -> &NodeCard {
		&self.cards[idx]
	}

	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	pub fn node_rect(&self, idx: usize) -> Rect {
		let (pos, card) = (&self.nodes[idx].position, &self.cards[idx]);
		Rect {
			x: pos.x,
			y: pos.y,
			w: card.width,
			h: card.height,
		}
	}

	/// Graph-space position of a node's handle.
	pub fn handle_position(&self, idx: usize, kind: HandleKind) -> (f64, f64) {
		let (pos, card) = (&self.nodes[idx].position, &self.cards[idx]);
		let (hx, hy) = match kind {
			HandleKind::Source => card.source_handle(),
			HandleKind::Target => card.target_handle(),
		};
		(pos.x + hx, pos.y + hy)
	}

	pub fn bounds(&self) -> Option<Rect> {
		let rects: Vec<Rect> = (0..self.nodes.len()).map(|i| self.node_rect(i)).collect();
		Rect::bounding(&rects)
	}

	pub fn fit_view(&mut self) {
		if let Some(bounds) = self.bounds() {
			self.transform = ViewTransform::fit(&bounds, self.width, self.height);
		}
	}

	pub fn zoom_in(&mut self) {
		self.transform
			.zoom_at(self.width / 2.0, self.height / 2.0, ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.transform
			.zoom_at(self.width / 2.0, self.height / 2.0, 1.0 / ZOOM_STEP);
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			1.0 / WHEEL_ZOOM_IN
		} else {
			WHEEL_ZOOM_IN
		};
		self.transform.zoom_at(sx, sy, factor);
	}

	/// Topmost node under the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		(0..self.nodes.len())
			.rev()
			.find(|&i| self.node_rect(i).contains(gx, gy))
	}

	/// Nearest handle within reach of the screen point.
	pub fn handle_at_position(&self, sx: f64, sy: f64) -> Option<(usize, HandleKind)> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let mut best: Option<((usize, HandleKind), f64)> = None;
		for i in (0..self.nodes.len()).rev() {
			for kind in [HandleKind::Source, HandleKind::Target] {
				let (hx, hy) = self.handle_position(i, kind);
				let dist = ((hx - gx).powi(2) + (hy - gy).powi(2)).sqrt();
				if dist < HANDLE_HIT_RADIUS && best.is_none_or(|(_, d)| dist < d) {
					best = Some(((i, kind), dist));
				}
			}
		}
		best.map(|(hit, _)| hit)
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if let Some((from, kind)) = self.handle_at_position(sx, sy) {
			self.connect = Some(ConnectState {
				from,
				kind,
				cursor: self.transform.screen_to_graph(sx, sy),
				moved: false,
			});
		} else if let Some(idx) = self.node_at_position(sx, sy) {
			self.drag = DragState {
				node: Some(idx),
				moved: false,
				start_x: sx,
				start_y: sy,
				node_start: self.nodes[idx].position,
			};
		} else {
			self.pan = PanState {
				active: true,
				moved: false,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let Some(connect) = self.connect.as_mut() {
			connect.cursor = self.transform.screen_to_graph(sx, sy);
			connect.moved = true;
		} else if let Some(idx) = self.drag.node {
			let k = self.transform.k;
			let position = Position::new(
				self.drag.node_start.x + (sx - self.drag.start_x) / k,
				self.drag.node_start.y + (sy - self.drag.start_y) / k,
			);
			self.drag.moved = true;
			let change = NodeChange::Position {
				id: self.nodes[idx].id.clone(),
				position,
				dragging: true,
			};
			interaction::apply_node_change(&mut self.nodes, &change);
		} else if self.pan.active {
			self.pan.moved = true;
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Finish the current gesture. Returns the edge created by a completed
	/// connection, if any.
	///
	/// A click on a node without dragging selects it; a click on the
	/// background clears the selection.
	pub fn pointer_up(&mut self, sx: f64, sy: f64) -> Option<&Edge> {
		if std::mem::take(&mut self.pan.active) && !std::mem::take(&mut self.pan.moved) {
			self.selected = None;
		}

		if let Some(idx) = self.drag.node.take() {
			if std::mem::take(&mut self.drag.moved) {
				self.finish_drag(idx, self.nodes[idx].position);
			} else {
				self.selected = Some(idx);
			}
		}

		let connect = self.connect.take()?;
		if !connect.moved {
			return None;
		}
		let handle = self.handle_at_position(sx, sy);
		if handle == Some((connect.from, connect.kind)) {
			debug!("connection from node {} dropped on its own handle", self.nodes[connect.from].id);
			return None;
		}
		let Some(hit) = handle
			.map(|(i, _)| i)
			.or_else(|| self.node_at_position(sx, sy))
		else {
			debug!("connection from node {} dropped on empty space", self.nodes[connect.from].id);
			return None;
		};
		let (source, target) = match connect.kind {
			HandleKind::Source => (connect.from, hit),
			HandleKind::Target => (hit, connect.from),
		};
		let connection = Connection {
			source: self.nodes[source].id.clone(),
			target: self.nodes[target].id.clone(),
		};
		Some(interaction::add_edge(
			&mut self.edges,
			connection,
			&mut self.edge_ids,
		))
	}

	fn finish_drag(&mut self, idx: usize, position: Position) {
		let change = NodeChange::Position {
			id: self.nodes[idx].id.clone(),
			position,
			dragging: false,
		};
		interaction::apply_node_change(&mut self.nodes, &change);
	}

	/// Abandon any gesture in progress. A dragged node goes back to where
	/// the drag started.
	pub fn cancel(&mut self) {
		let drag = std::mem::take(&mut self.drag);
		if let (Some(idx), true) = (drag.node, drag.moved) {
			self.finish_drag(idx, drag.node_start);
		}
		self.pan = PanState::default();
		self.connect = None;
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::seed::initial_model;

	fn mono(text: &str, font: f64) -> f64 {
		text.chars().count() as f64 * font * 0.5
	}

	fn state() -> MindMapState {
		MindMapState::new(initial_model(), 1000.0, 800.0, &mono)
	}

	/// A screen point inside the left part of a node's card.
	fn point_in(s: &MindMapState, id: &str) -> (f64, f64) {
		let idx = s.node_index(id).unwrap();
		let r = s.node_rect(idx);
		let p = s.transform.graph_to_screen(r.x + 10.0, r.y + r.h / 2.0);
		assert_eq!(s.node_at_position(p.0, p.1), Some(idx), "node {id} is covered");
		p
	}

	fn handle_on_screen(s: &MindMapState, id: &str, kind: HandleKind) -> (f64, f64) {
		let (gx, gy) = s.handle_position(s.node_index(id).unwrap(), kind);
		s.transform.graph_to_screen(gx, gy)
	}

	#[test]
	fn initial_view_fits_all_nodes() {
		let s = state();
		let visible = s.transform.visible(s.width, s.height);
		let bounds = s.bounds().unwrap();
		assert!(visible.contains(bounds.x, bounds.y));
		assert!(visible.contains(bounds.x + bounds.w, bounds.y + bounds.h));
	}

	#[test]
	fn dragging_moves_only_that_node() {
		let mut s = state();
		let before = initial_model();
		let (x, y) = point_in(&s, "9");
		let k = s.transform.k;

		s.pointer_down(x, y);
		s.pointer_move(x + 30.0, y - 10.0);
		s.pointer_move(x + 50.0, y + 20.0);
		assert!(s.pointer_up(x + 50.0, y + 20.0).is_none());

		assert_eq!(s.edges, before.edges);
		for (now, was) in s.nodes.iter().zip(&before.nodes) {
			if now.id == "9" {
				assert!((now.position.x - (was.position.x + 50.0 / k)).abs() < 1e-9);
				assert!((now.position.y - (was.position.y + 20.0 / k)).abs() < 1e-9);
			} else {
				assert_eq!(now, was);
			}
		}
	}

	#[test]
	fn dragging_background_pans() {
		let mut s = state();
		let start = s.transform.clone();
		s.pointer_down(2.0, 2.0);
		s.pointer_move(42.0, 12.0);
		s.pointer_up(42.0, 12.0);
		assert_eq!(s.transform.x, start.x + 40.0);
		assert_eq!(s.transform.y, start.y + 10.0);
		assert_eq!(s.nodes, initial_model().nodes);
	}

	#[test]
	fn connecting_two_nodes_appends_an_edge() {
		let mut s = state();
		let before = s.edges.clone();
		let (hx, hy) = handle_on_screen(&s, "3", HandleKind::Source);
		let (tx, ty) = point_in(&s, "7");

		s.pointer_down(hx, hy);
		assert!(s.connect.is_some());
		s.pointer_move(tx, ty);
		let edge = s.pointer_up(tx, ty).cloned().unwrap();

		assert_eq!((edge.source.as_str(), edge.target.as_str()), ("3", "7"));
		assert_eq!(s.edges.len(), before.len() + 1);
		assert_eq!(&s.edges[..before.len()], &before[..]);
		assert!(before.iter().all(|e| e.id != edge.id));
		assert_eq!(s.nodes, initial_model().nodes);
	}

	#[test]
	fn connecting_from_a_target_handle_reverses_direction() {
		let mut s = state();
		let (hx, hy) = handle_on_screen(&s, "7", HandleKind::Target);
		let (tx, ty) = point_in(&s, "17");
		s.pointer_down(hx, hy);
		s.pointer_move(tx, ty);
		let edge = s.pointer_up(tx, ty).cloned().unwrap();
		assert_eq!((edge.source.as_str(), edge.target.as_str()), ("17", "7"));
	}

	#[test]
	fn dropping_a_connection_on_empty_space_is_ignored() {
		let mut s = state();
		let before = s.edges.clone();
		let (hx, hy) = handle_on_screen(&s, "3", HandleKind::Source);
		s.pointer_down(hx, hy);
		s.pointer_move(1.0, 1.0);
		assert!(s.pointer_up(1.0, 1.0).is_none());
		assert_eq!(s.edges, before);
		assert!(s.connect.is_none());
	}

	#[test]
	fn clicking_a_handle_adds_no_edge() {
		let mut s = state();
		let before = s.edges.clone();
		let (hx, hy) = handle_on_screen(&s, "3", HandleKind::Source);
		s.pointer_down(hx, hy);
		assert!(s.pointer_up(hx, hy).is_none());
		assert_eq!(s.edges, before);
	}

	#[test]
	fn dragging_back_onto_the_origin_handle_adds_no_edge() {
		let mut s = state();
		let before = s.edges.clone();
		let (hx, hy) = handle_on_screen(&s, "3", HandleKind::Source);
		s.pointer_down(hx, hy);
		s.pointer_move(hx + 40.0, hy + 40.0);
		s.pointer_move(hx, hy);
		assert!(s.pointer_up(hx, hy).is_none());
		assert_eq!(s.edges, before);
	}

	#[test]
	fn dragging_onto_the_own_card_makes_a_self_loop() {
		let mut s = state();
		let (hx, hy) = handle_on_screen(&s, "3", HandleKind::Source);
		let (tx, ty) = point_in(&s, "3");
		s.pointer_down(hx, hy);
		s.pointer_move(tx, ty);
		let edge = s.pointer_up(tx, ty).cloned().unwrap();
		assert_eq!((edge.source.as_str(), edge.target.as_str()), ("3", "3"));
	}

	#[test]
	fn click_selects_and_background_click_clears() {
		let mut s = state();
		let (x, y) = point_in(&s, "9");
		s.pointer_down(x, y);
		s.pointer_up(x, y);
		assert_eq!(s.selected, s.node_index("9"));
		assert_eq!(s.nodes, initial_model().nodes);

		s.pointer_down(2.0, 2.0);
		s.pointer_up(2.0, 2.0);
		assert_eq!(s.selected, None);
	}

	#[test]
	fn drags_and_pans_keep_the_selection() {
		let mut s = state();
		let (x, y) = point_in(&s, "9");
		s.pointer_down(x, y);
		s.pointer_up(x, y);
		let selected = s.selected;

		let (ox, oy) = point_in(&s, "17");
		s.pointer_down(ox, oy);
		s.pointer_move(ox + 5.0, oy + 5.0);
		s.pointer_up(ox + 5.0, oy + 5.0);
		s.pointer_down(2.0, 2.0);
		s.pointer_move(20.0, 2.0);
		s.pointer_up(20.0, 2.0);
		assert_eq!(s.selected, selected);
	}

	#[test]
	fn cancel_abandons_the_gesture() {
		let mut s = state();
		let (x, y) = point_in(&s, "9");
		s.pointer_down(x, y);
		s.cancel();
		s.pointer_move(x + 100.0, y);
		assert_eq!(s.nodes, initial_model().nodes);
	}

	#[test]
	fn cancel_puts_a_dragged_node_back() {
		let mut s = state();
		let (x, y) = point_in(&s, "9");
		s.pointer_down(x, y);
		s.pointer_move(x + 60.0, y + 30.0);
		assert_ne!(s.nodes, initial_model().nodes);
		s.cancel();
		assert_eq!(s.nodes, initial_model().nodes);
		assert!(s.drag.node.is_none());
	}

	#[test]
	fn zoom_controls_stay_centred() {
		let mut s = state();
		let centre = s.transform.screen_to_graph(500.0, 400.0);
		s.zoom_in();
		s.zoom_out();
		s.wheel(500.0, 400.0, -1.0);
		let after = s.transform.screen_to_graph(500.0, 400.0);
		assert!((centre.0 - after.0).abs() < 1e-9);
		assert!((centre.1 - after.1).abs() < 1e-9);
	}
}
