//! The authored technical-writing workflow: a hub fanning out to five
//! process stages, each with two deliverables, plus two decision gates.

use std::collections::HashSet;

use log::{debug, error};

use super::style::{self, HUB_EDGE, REFERENCE_EDGE};
use super::types::{DiagramModel, Edge, EdgeStyle, Node, NodeCategory, NodePayload, Position};
use crate::error::{DiagramError, Result};

fn node(
	id: &str,
	category: NodeCategory,
	(x, y): (f64, f64),
	icon: &str,
	label: &str,
	description: &str,
	tags: &[&str],
) -> Node {
	Node {
		id: id.into(),
		category,
		position: Position::new(x, y),
		data: NodePayload {
			label: label.into(),
			icon: icon.into(),
			description: Some(description.into()),
			tags: (!tags.is_empty()).then(|| tags.iter().map(|t| t.to_string()).collect()),
		},
	}
}

fn edge(source: &str, target: &str, style: EdgeStyle, animated: bool) -> Edge {
	Edge {
		id: format!("e{source}-{target}"),
		source: source.into(),
		target: target.into(),
		style,
		animated,
	}
}

fn seed_nodes() -> Vec<Node> {
	use NodeCategory::*;

	vec![
		node(
			"1",
			Process,
			(400.0, 300.0),
			"📝",
			"Technical Writing Process",
			"Complete workflow from requirements to deliverables",
			&["Research", "Planning", "Writing", "Review"],
		),
		// research & discovery
		node(
			"2",
			Process,
			(100.0, 100.0),
			"🔍",
			"Research & Discovery",
			"Understanding user needs and technical requirements",
			&["User Interviews", "Stakeholder Analysis", "Technical Review"],
		),
		node(
			"3",
			Deliverable,
			(50.0, 200.0),
			"👥",
			"User Personas",
			"Detailed profiles of target users",
			&["Developers", "End Users", "Support Teams"],
		),
		node(
			"4",
			Deliverable,
			(150.0, 200.0),
			"📋",
			"Requirements Document",
			"Comprehensive requirements analysis",
			&["Functional Specs", "Technical Constraints", "Success Metrics"],
		),
		// planning
		node(
			"5",
			Process,
			(400.0, 100.0),
			"🎯",
			"Content Strategy",
			"Planning content structure and delivery",
			&["Information Architecture", "Content Types", "Timeline"],
		),
		node(
			"6",
			Deliverable,
			(350.0, 200.0),
			"🗂️",
			"Content Outline",
			"Structured content plan",
			&["Hierarchy", "Navigation", "Cross-references"],
		),
		node(
			"7",
			Deliverable,
			(450.0, 200.0),
			"📅",
			"Project Plan",
			"Timeline and resource allocation",
			&["Milestones", "Dependencies", "Risk Assessment"],
		),
		// writing
		node(
			"8",
			Process,
			(700.0, 100.0),
			"✍️",
			"Content Creation",
			"Writing and developing content",
			&["Drafting", "Code Examples", "Visual Design"],
		),
		node(
			"9",
			Deliverable,
			(650.0, 200.0),
			"📄",
			"First Draft",
			"Initial content creation",
			&["API Docs", "User Guides", "Tutorials"],
		),
		node(
			"10",
			Deliverable,
			(750.0, 200.0),
			"🎨",
			"Interactive Elements",
			"Visual and interactive components",
			&["Code Samples", "Diagrams", "Demos"],
		),
		// review
		node(
			"11",
			Process,
			(400.0, 500.0),
			"✅",
			"Quality Assurance",
			"Review and validation process",
			&["Technical Review", "User Testing", "Editorial Review"],
		),
		node(
			"12",
			Deliverable,
			(300.0, 600.0),
			"📖",
			"Reviewed Content",
			"Validated and approved content",
			&["SME Approved", "User Tested", "Editorial Review"],
		),
		node(
			"13",
			Deliverable,
			(500.0, 600.0),
			"📊",
			"Feedback Report",
			"Analysis of review feedback",
			&["Issues Found", "Improvements", "Metrics"],
		),
		// delivery
		node(
			"14",
			Process,
			(700.0, 500.0),
			"🚀",
			"Publishing & Deployment",
			"Final delivery and launch",
			&["Version Control", "CI/CD", "Analytics"],
		),
		node(
			"15",
			Deliverable,
			(650.0, 600.0),
			"🌐",
			"Live Documentation",
			"Published and accessible content",
			&["Website", "API Docs", "Help Center"],
		),
		node(
			"16",
			Deliverable,
			(750.0, 600.0),
			"📈",
			"Analytics Dashboard",
			"Performance monitoring and metrics",
			&["Usage Stats", "User Feedback", "Success Metrics"],
		),
		// decision gates
		node(
			"17",
			Decision,
			(250.0, 350.0),
			"❓",
			"Content Type?",
			"Choose appropriate content format",
			&[],
		),
		node(
			"18",
			Decision,
			(550.0, 350.0),
			"❓",
			"Review Complete?",
			"Validate content quality",
			&[],
		),
	]
}

fn seed_edges() -> Vec<Edge> {
	let phase = |source: &str, target: &str, stroke| edge(source, target, style::solid(stroke), false);
	let reference = |source: &str, target: &str| edge(source, target, REFERENCE_EDGE, false);

	vec![
		edge("1", "2", HUB_EDGE, true),
		edge("1", "5", HUB_EDGE, true),
		edge("1", "8", HUB_EDGE, true),
		edge("1", "11", HUB_EDGE, true),
		edge("1", "14", HUB_EDGE, true),
		phase("2", "3", style::GREEN),
		phase("2", "4", style::GREEN),
		phase("5", "6", style::AMBER),
		phase("5", "7", style::AMBER),
		phase("8", "9", style::RED),
		phase("8", "10", style::RED),
		phase("11", "12", style::PURPLE),
		phase("11", "13", style::PURPLE),
		phase("14", "15", style::CYAN),
		phase("14", "16", style::CYAN),
		reference("17", "2"),
		reference("18", "11"),
		reference("2", "5"),
		reference("5", "8"),
		reference("8", "11"),
		reference("11", "14"),
	]
}

/// Build the initial diagram. Always returns the same data.
pub fn initial_model() -> DiagramModel {
	let model = DiagramModel {
		nodes: seed_nodes(),
		edges: seed_edges(),
	};
	debug!(
		"built mind map seed: {} nodes, {} edges",
		model.nodes.len(),
		model.edges.len()
	);
	if cfg!(debug_assertions) {
		if let Err(e) = check_integrity(&model) {
			error!("mind map seed is malformed: {e}");
		}
	}
	model
}

/// Check id uniqueness and that every edge endpoint names an existing node.
pub fn check_integrity(model: &DiagramModel) -> Result<()> {
	let mut node_ids = HashSet::new();
	for n in &model.nodes {
		if !node_ids.insert(n.id.as_str()) {
			return Err(DiagramError::DuplicateNodeId { id: n.id.clone() });
		}
	}

	let mut edge_ids = HashSet::new();
	for e in &model.edges {
		if !edge_ids.insert(e.id.as_str()) {
			return Err(DiagramError::DuplicateEdgeId { id: e.id.clone() });
		}
		for endpoint in [&e.source, &e.target] {
			if !node_ids.contains(endpoint.as_str()) {
				return Err(DiagramError::DanglingEdge {
					edge: e.id.clone(),
					node: endpoint.clone(),
				});
			}
		}
	}
	Ok(())
}
