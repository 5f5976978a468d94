//! Folds user gestures into the live node and edge collections.

use log::{debug, info};

use super::style::CONNECTION_EDGE;
use super::types::{Edge, Node, Position};

/// A change to a single node produced by a gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
	/// The node was dragged; `dragging` is false on the final event.
	Position {
		id: String,
		position: Position,
		dragging: bool,
	},
}

/// Endpoints of a connection drawn from a source handle to a target handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
	pub source: String,
	pub target: String,
}

/// Hands out edge ids that do not collide with existing ones.
#[derive(Clone, Debug, Default)]
pub struct EdgeIdGenerator {
	next: u64,
}

impl EdgeIdGenerator {
	pub fn next_id(&mut self, connection: &Connection, existing: &[Edge]) -> String {
		loop {
			self.next += 1;
			let id = format!(
				"conn-{}-{}-{}",
				connection.source, connection.target, self.next
			);
			if !existing.iter().any(|e| e.id == id) {
				return id;
			}
		}
	}
}

/// Apply `change` to the matching node only. Returns false when no node
/// has the given id.
pub fn apply_node_change(nodes: &mut [Node], change: &NodeChange) -> bool {
	match change {
		NodeChange::Position {
			id,
			position,
			dragging,
		} => {
			let Some(node) = nodes.iter_mut().find(|n| &n.id == id) else {
				return false;
			};
			node.position = *position;
			if !dragging {
				debug!("node {id} moved to ({:.1}, {:.1})", position.x, position.y);
			}
			true
		}
	}
}

/// Append one edge for `connection` with neutral styling. Duplicate edges and
/// self-loops are accepted.
pub fn add_edge<'a>(
	edges: &'a mut Vec<Edge>,
	connection: Connection,
	ids: &mut EdgeIdGenerator,
) -> &'a Edge {
	let id = ids.next_id(&connection, edges);
	info!(
		"connected {} -> {} as {id}",
		connection.source, connection.target
	);
	edges.push(Edge {
		id,
		source: connection.source,
		target: connection.target,
		style: CONNECTION_EDGE,
		animated: false,
	});
	&edges[edges.len() - 1]
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::components::mind_map::seed::initial_model;

	fn connect(source: &str, target: &str) -> Connection {
		Connection {
			source: source.into(),
			target: target.into(),
		}
	}

	#[test]
	fn reposition_touches_only_the_dragged_node() {
		let before = initial_model();
		let mut after = before.clone();
		let moved = apply_node_change(
			&mut after.nodes,
			&NodeChange::Position {
				id: "9".into(),
				position: Position::new(123.0, -45.5),
				dragging: false,
			},
		);
		assert!(moved);
		assert_eq!(after.edges, before.edges);
		for (a, b) in after.nodes.iter().zip(&before.nodes) {
			if a.id == "9" {
				assert_eq!(a.position, Position::new(123.0, -45.5));
				assert_eq!(a.data, b.data);
				assert_eq!(a.category, b.category);
			} else {
				assert_eq!(a, b);
			}
		}
	}

	#[test]
	fn reposition_of_unknown_node_is_a_no_op() {
		let before = initial_model();
		let mut after = before.clone();
		let moved = apply_node_change(
			&mut after.nodes,
			&NodeChange::Position {
				id: "99".into(),
				position: Position::default(),
				dragging: true,
			},
		);
		assert!(!moved);
		assert_eq!(after, before);
	}

	#[test]
	fn connection_appends_one_fresh_edge() {
		let before = initial_model();
		let mut edges = before.edges.clone();
		let mut ids = EdgeIdGenerator::default();

		let edge = add_edge(&mut edges, connect("3", "7"), &mut ids).clone();
		assert_eq!(edge.source, "3");
		assert_eq!(edge.target, "7");
		assert!(!edge.animated);
		assert_eq!(edge.style, CONNECTION_EDGE);
		assert!(before.edges.iter().all(|e| e.id != edge.id));

		assert_eq!(edges.len(), before.edges.len() + 1);
		assert_eq!(&edges[..before.edges.len()], &before.edges[..]);
		assert_eq!(edges.last(), Some(&edge));
	}

	#[test]
	fn duplicates_and_self_loops_are_kept() {
		let mut edges = initial_model().edges;
		let base = edges.len();
		let mut ids = EdgeIdGenerator::default();

		add_edge(&mut edges, connect("3", "7"), &mut ids);
		add_edge(&mut edges, connect("3", "7"), &mut ids);
		let looped = add_edge(&mut edges, connect("5", "5"), &mut ids);
		assert_eq!(looped.source, looped.target);

		assert_eq!(edges.len(), base + 3);
		let unique: HashSet<_> = edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(unique.len(), edges.len());
	}

	#[test]
	fn generated_ids_skip_taken_ones() {
		let mut edges = initial_model().edges;
		let mut taken = edges[0].clone();
		taken.id = "conn-3-7-1".into();
		edges.push(taken);

		let mut ids = EdgeIdGenerator::default();
		let edge = add_edge(&mut edges, connect("3", "7"), &mut ids);
		assert_eq!(edge.id, "conn-3-7-2");
	}
}
