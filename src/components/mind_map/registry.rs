//! Per-category card templates and the card layout they drive.
//!
//! Every card has a header (icon and label), an optional description body and,
//! when the template allows it, a row of pill-shaped tags. Layout is computed in
//! node-local coordinates from a caller-supplied text measure so it can run
//! both against a canvas context and in plain tests.

use log::warn;

use super::style::{CategoryStyle, category_style};
use super::types::{Node, NodeCategory};
use crate::error::Result;

pub const CARD_WIDTH: f64 = 200.0;
pub const PADDING: f64 = 10.0;
pub const HEADER_HEIGHT: f64 = 32.0;
pub const ICON_WIDTH: f64 = 22.0;
pub const LABEL_FONT: f64 = 13.0;
pub const DESCRIPTION_FONT: f64 = 11.0;
pub const DESCRIPTION_LINE: f64 = 15.0;
pub const TAG_FONT: f64 = 10.0;
pub const TAG_HEIGHT: f64 = 18.0;
pub const TAG_PAD_X: f64 = 6.0;
pub const TAG_GAP: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTemplate {
	pub category: NodeCategory,
	/// Class of the tag pills, `None` when the template has no tag list.
	pub tag_class: Option<&'static str>,
}

static TEMPLATES: [NodeTemplate; 3] = [
	NodeTemplate {
		category: NodeCategory::Process,
		tag_class: Some("tool-tag"),
	},
	NodeTemplate {
		category: NodeCategory::Deliverable,
		tag_class: Some("example-tag"),
	},
	NodeTemplate {
		category: NodeCategory::Decision,
		tag_class: None,
	},
];

impl NodeTemplate {
	pub fn for_category(category: NodeCategory) -> &'static NodeTemplate {
		match category {
			NodeCategory::Process => &TEMPLATES[0],
			NodeCategory::Deliverable => &TEMPLATES[1],
			NodeCategory::Decision => &TEMPLATES[2],
		}
	}

	/// Look up a template by category name. Unknown names are a
	/// configuration error.
	pub fn for_type_name(name: &str) -> Result<&'static NodeTemplate> {
		name.parse::<NodeCategory>()
			.map(Self::for_category)
			.inspect_err(|e| warn!("{e}"))
	}

	pub fn style(&self) -> &'static CategoryStyle {
		category_style(self.category)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
	pub text: String,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TagPill {
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub width: f64,
}

/// Visual description of one node card, in node-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeCard {
	pub template: NodeTemplate,
	pub width: f64,
	pub height: f64,
	pub icon: TextRun,
	pub label: TextRun,
	pub description: Vec<TextRun>,
	pub tags: Vec<TagPill>,
}

impl NodeCard {
	/// Incoming connections attach at the top centre.
	pub fn target_handle(&self) -> (f64, f64) {
		(self.width / 2.0, 0.0)
	}

	/// Outgoing connections leave from the bottom centre.
	pub fn source_handle(&self) -> (f64, f64) {
		(self.width / 2.0, self.height)
	}
}

/// Lay out `node` with `measure(text, font_px)` returning rendered width.
pub fn layout_card(node: &Node, measure: &impl Fn(&str, f64) -> f64) -> NodeCard {
	let template = *NodeTemplate::for_category(node.category);
	let inner = CARD_WIDTH - 2.0 * PADDING;
	let header_mid = HEADER_HEIGHT / 2.0;

	let icon = TextRun {
		text: node.data.icon.clone(),
		x: PADDING,
		y: header_mid,
	};
	let label = TextRun {
		text: truncate(&node.data.label, inner - ICON_WIDTH, LABEL_FONT, measure),
		x: PADDING + ICON_WIDTH,
		y: header_mid,
	};

	let mut y = HEADER_HEIGHT + PADDING;
	let description: Vec<TextRun> = node
		.data
		.description
		.as_deref()
		.map(|text| wrap(text, inner, DESCRIPTION_FONT, measure))
		.unwrap_or_default()
		.into_iter()
		.map(|line| {
			let run = TextRun {
				text: line,
				x: PADDING,
				y: y + DESCRIPTION_LINE / 2.0,
			};
			y += DESCRIPTION_LINE;
			run
		})
		.collect();

	let mut tags = Vec::new();
	if template.tag_class.is_some() {
		if let Some(list) = node.data.tags.as_ref().filter(|t| !t.is_empty()) {
			if !description.is_empty() {
				y += TAG_GAP;
			}
			let mut x = 0.0;
			for text in list {
				let width = (measure(text, TAG_FONT) + 2.0 * TAG_PAD_X).min(inner);
				if x > 0.0 && x + width > inner {
					x = 0.0;
					y += TAG_HEIGHT + TAG_GAP;
				}
				tags.push(TagPill {
					text: text.clone(),
					x: PADDING + x,
					y,
					width,
				});
				x += width + TAG_GAP;
			}
			y += TAG_HEIGHT;
		}
	}

	let height = if description.is_empty() && tags.is_empty() {
		HEADER_HEIGHT
	} else {
		y + PADDING
	};

	NodeCard {
		template,
		width: CARD_WIDTH,
		height,
		icon,
		label,
		description,
		tags,
	}
}

fn wrap(text: &str, max: f64, font: f64, measure: &impl Fn(&str, f64) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut line = String::new();
	for word in text.split_whitespace() {
		let candidate = if line.is_empty() {
			word.to_string()
		} else {
			format!("{line} {word}")
		};
		if !line.is_empty() && measure(&candidate, font) > max {
			lines.push(std::mem::replace(&mut line, word.to_string()));
		} else {
			line = candidate;
		}
	}
	if !line.is_empty() {
		lines.push(line);
	}
	lines
}

fn truncate(text: &str, max: f64, font: f64, measure: &impl Fn(&str, f64) -> f64) -> String {
	if measure(text, font) <= max {
		return text.to_string();
	}
	let mut out: String = text.chars().collect();
	while !out.is_empty() && measure(&format!("{out}…"), font) > max {
		out.pop();
	}
	format!("{}…", out.trim_end())
}
