use std::fmt;
use std::str::FromStr;

use crate::error::DiagramError;

/// Role of a node in the workflow; selects its card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeCategory {
	Process,
	Deliverable,
	Decision,
}

impl NodeCategory {
	#[cfg(test)]
	pub const ALL: [NodeCategory; 3] = [Self::Process, Self::Deliverable, Self::Decision];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Process => "process",
			Self::Deliverable => "deliverable",
			Self::Decision => "decision",
		}
	}
}

impl fmt::Display for NodeCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NodeCategory {
	type Err = DiagramError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"process" => Ok(Self::Process),
			"deliverable" => Ok(Self::Deliverable),
			"decision" => Ok(Self::Decision),
			other => Err(DiagramError::UnknownCategory { name: other.into() }),
		}
	}
}

/// Graph-space coordinate of a node's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodePayload {
	pub label: String,
	pub icon: String,
	pub description: Option<String>,
	/// Tools for process nodes, examples for deliverables, `None` for decisions.
	pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	pub category: NodeCategory,
	pub position: Position,
	pub data: NodePayload,
}

/// Visual weight of an edge. Carries no meaning beyond rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	pub stroke: &'static str,
	pub width: f64,
	/// Dash and gap lengths; `None` draws a solid line.
	pub dash: Option<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub style: EdgeStyle,
	pub animated: bool,
}

/// A complete node and edge set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagramModel {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

#[cfg(test)]
impl DiagramModel {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn category_names_parse_back() {
		for category in NodeCategory::ALL {
			assert_eq!(category.as_str().parse::<NodeCategory>(), Ok(category));
		}
		assert!(matches!(
			"Process".parse::<NodeCategory>(),
			Err(DiagramError::UnknownCategory { .. })
		));
	}
}
