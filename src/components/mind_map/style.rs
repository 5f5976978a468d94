//! Colour and class table for node categories and edge kinds.
//!
//! All palette literals used by the diagram live here so the card renderer,
//! the minimap and the seed data agree on them.

use super::registry::NodeTemplate;
use super::types::{EdgeStyle, NodeCategory};

pub const VIOLET: &str = "#7c3aed";
pub const GREEN: &str = "#10b981";
pub const AMBER: &str = "#f59e0b";
pub const RED: &str = "#ef4444";
pub const PURPLE: &str = "#8b5cf6";
pub const CYAN: &str = "#06b6d4";
pub const SLATE: &str = "#64748b";
/// Stroke of connections drawn by the user.
pub const NEUTRAL: &str = "#b1b1b7";

pub const CANVAS_BACKGROUND: &str = "#f8fafc";
pub const GRID_DOT: &str = "#91919a";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryStyle {
	pub class_name: &'static str,
	/// Header band and border colour; also the minimap fill.
	pub accent: &'static str,
	pub body: &'static str,
	pub tag_fill: &'static str,
	pub tag_text: &'static str,
}

const PROCESS_STYLE: CategoryStyle = CategoryStyle {
	class_name: "process-node",
	accent: VIOLET,
	body: "#faf5ff",
	tag_fill: "#ede9fe",
	tag_text: "#5b21b6",
};

const DELIVERABLE_STYLE: CategoryStyle = CategoryStyle {
	class_name: "deliverable-node",
	accent: GREEN,
	body: "#f0fdf4",
	tag_fill: "#d1fae5",
	tag_text: "#065f46",
};

const DECISION_STYLE: CategoryStyle = CategoryStyle {
	class_name: "decision-node",
	accent: AMBER,
	body: "#fffbeb",
	tag_fill: "#fef3c7",
	tag_text: "#92400e",
};

pub fn category_style(category: NodeCategory) -> &'static CategoryStyle {
	match category {
		NodeCategory::Process => &PROCESS_STYLE,
		NodeCategory::Deliverable => &DELIVERABLE_STYLE,
		NodeCategory::Decision => &DECISION_STYLE,
	}
}

/// Minimap fill for a node type name. Unknown names fall back to slate.
pub fn minimap_color(type_name: &str) -> &'static str {
	NodeTemplate::for_type_name(type_name)
		.map(|t| t.style().accent)
		.unwrap_or(SLATE)
}

pub const fn solid(stroke: &'static str) -> EdgeStyle {
	EdgeStyle {
		stroke,
		width: 1.5,
		dash: None,
	}
}

pub const fn dashed(stroke: &'static str) -> EdgeStyle {
	EdgeStyle {
		stroke,
		width: 1.5,
		dash: Some((5.0, 5.0)),
	}
}

/// Hub-to-stage spokes.
pub const HUB_EDGE: EdgeStyle = solid(VIOLET);
/// Decision gates and cross-phase hand-offs.
pub const REFERENCE_EDGE: EdgeStyle = dashed(SLATE);
pub const CONNECTION_EDGE: EdgeStyle = EdgeStyle {
	stroke: NEUTRAL,
	width: 1.0,
	dash: None,
};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn minimap_colors_follow_category() {
		assert_eq!(minimap_color("process"), VIOLET);
		assert_eq!(minimap_color("deliverable"), GREEN);
		assert_eq!(minimap_color("decision"), AMBER);
		assert_eq!(minimap_color("milestone"), SLATE);
		assert_eq!(minimap_color(""), SLATE);
	}

	#[test]
	fn every_category_has_a_distinct_class() {
		let classes: std::collections::HashSet<_> = NodeCategory::ALL
			.iter()
			.map(|&c| category_style(c).class_name)
			.collect();
		assert_eq!(classes.len(), NodeCategory::ALL.len());
	}
}
