use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::minimap;
use super::registry::{DESCRIPTION_FONT, LABEL_FONT, TAG_FONT, TAG_HEIGHT, TAG_PAD_X};
use super::state::{HANDLE_RADIUS, HandleKind, MindMapState};
use super::style::{self, CANVAS_BACKGROUND, CONNECTION_EDGE, GRID_DOT};

pub const GRID_GAP: f64 = 12.0;
pub const GRID_DOT_SIZE: f64 = 1.0;
pub const MIN_GRID_SCREEN_GAP: f64 = 4.0;
const CARD_RADIUS: f64 = 6.0;
const SELECTION_PAD: f64 = 4.0;
const SELECTION_OUTLINE: &str = "#1a192b";
const HANDLE_FILL: &str = "#1a192b";
/// Marching speed of animated edges, graph units per second.
const FLOW_SPEED: f64 = 20.0;

/// CSS font for a given size. Labels are the only semibold text.
pub fn font(px: f64) -> String {
	let weight = if px >= LABEL_FONT { 600 } else { 400 };
	format!("{weight} {px}px system-ui, sans-serif")
}

/// Text width as the canvas will draw it.
pub fn measure_text(ctx: &CanvasRenderingContext2d, text: &str, px: f64) -> f64 {
	ctx.set_font(&font(px));
	ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
}

pub fn render(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(CANVAS_BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_connection_line(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();

	draw_minimap(state, ctx);
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((d, g)) => js_sys::Array::of2(&JsValue::from_f64(d), &JsValue::from_f64(g)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

fn draw_grid(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	let t = &state.transform;
	let gap = grid_spacing(t.k);
	let size = (GRID_DOT_SIZE * t.k).max(0.5);
	ctx.set_fill_style_str(GRID_DOT);
	let mut x = t.x.rem_euclid(gap);
	while x < state.width {
		let mut y = t.y.rem_euclid(gap);
		while y < state.height {
			ctx.fill_rect(x - size / 2.0, y - size / 2.0, size, size);
			y += gap;
		}
		x += gap;
	}
}

/// Screen distance between grid dots. When zoomed far out every other
/// dot is skipped until they are at least `MIN_GRID_SCREEN_GAP` apart.
pub fn grid_spacing(k: f64) -> f64 {
	let mut gap = GRID_GAP * k;
	while gap < MIN_GRID_SCREEN_GAP {
		gap *= 2.0;
	}
	gap
}

fn bezier(ctx: &CanvasRenderingContext2d, (sx, sy): (f64, f64), (tx, ty): (f64, f64)) {
	let offset = ((ty - sy).abs() * 0.5).max(25.0);
	ctx.begin_path();
	ctx.move_to(sx, sy);
	ctx.bezier_curve_to(sx, sy + offset, tx, ty - offset, tx, ty);
	ctx.stroke();
}

fn draw_edges(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	for edge in &state.edges {
		let (Some(src), Some(tgt)) = (state.node_index(&edge.source), state.node_index(&edge.target))
		else {
			continue;
		};
		ctx.set_stroke_style_str(edge.style.stroke);
		ctx.set_line_width(edge.style.width);
		if edge.animated {
			set_dash(ctx, Some((5.0, 5.0)));
			ctx.set_line_dash_offset(-(state.flow_time * FLOW_SPEED) % 10.0);
		} else {
			set_dash(ctx, edge.style.dash);
			ctx.set_line_dash_offset(0.0);
		}
		bezier(
			ctx,
			state.handle_position(src, HandleKind::Source),
			state.handle_position(tgt, HandleKind::Target),
		);
	}
	set_dash(ctx, None);
}

fn draw_connection_line(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	let Some(connect) = &state.connect else {
		return;
	};
	let from = state.handle_position(connect.from, connect.kind);
	ctx.set_stroke_style_str(CONNECTION_EDGE.stroke);
	ctx.set_line_width(CONNECTION_EDGE.width);
	match connect.kind {
		HandleKind::Source => bezier(ctx, from, connect.cursor),
		HandleKind::Target => bezier(ctx, connect.cursor, from),
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_nodes(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_baseline("middle");
	for (idx, node) in state.nodes.iter().enumerate() {
		let card = state.card(idx);
		let palette = card.template.style();
		let (x, y) = (node.position.x, node.position.y);

		rounded_rect(ctx, x, y, card.width, card.height, CARD_RADIUS);
		ctx.set_fill_style_str(palette.body);
		ctx.fill();
		ctx.set_stroke_style_str(palette.accent);
		ctx.set_line_width(2.0);
		ctx.stroke();
		if state.selected == Some(idx) {
			let pad = SELECTION_PAD;
			rounded_rect(
				ctx,
				x - pad,
				y - pad,
				card.width + 2.0 * pad,
				card.height + 2.0 * pad,
				CARD_RADIUS + pad,
			);
			ctx.set_stroke_style_str(SELECTION_OUTLINE);
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		ctx.set_fill_style_str(palette.accent);
		ctx.set_font(&font(LABEL_FONT));
		let _ = ctx.fill_text(&card.icon.text, x + card.icon.x, y + card.icon.y);
		let _ = ctx.fill_text(&card.label.text, x + card.label.x, y + card.label.y);

		ctx.set_fill_style_str("#475569");
		ctx.set_font(&font(DESCRIPTION_FONT));
		for line in &card.description {
			let _ = ctx.fill_text(&line.text, x + line.x, y + line.y);
		}

		ctx.set_font(&font(TAG_FONT));
		for tag in &card.tags {
			rounded_rect(ctx, x + tag.x, y + tag.y, tag.width, TAG_HEIGHT, TAG_HEIGHT / 2.0);
			ctx.set_fill_style_str(palette.tag_fill);
			ctx.fill();
			ctx.set_fill_style_str(palette.tag_text);
			let _ = ctx.fill_text(
				&tag.text,
				x + tag.x + TAG_PAD_X,
				y + tag.y + TAG_HEIGHT / 2.0,
			);
		}

		for kind in [HandleKind::Target, HandleKind::Source] {
			let (hx, hy) = state.handle_position(idx, kind);
			ctx.begin_path();
			let _ = ctx.arc(hx, hy, HANDLE_RADIUS, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(HANDLE_FILL);
			ctx.fill();
			ctx.set_stroke_style_str("white");
			ctx.set_line_width(1.0);
			ctx.stroke();
		}
	}
}

fn draw_minimap(state: &MindMapState, ctx: &CanvasRenderingContext2d) {
	let map = minimap::layout(
		(0..state.nodes.len()).map(|i| (state.nodes[i].category, state.node_rect(i))),
		&state.transform.visible(state.width, state.height),
		state.width,
		state.height,
	);
	let f = &map.frame;

	ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
	ctx.fill_rect(f.x, f.y, f.w, f.h);
	for node in &map.nodes {
		ctx.set_fill_style_str(node.color);
		ctx.fill_rect(node.rect.x, node.rect.y, node.rect.w, node.rect.h);
	}

	let v = &map.viewport;
	ctx.set_fill_style_str("rgba(240, 240, 240, 0.35)");
	ctx.fill_rect(v.x, v.y, v.w, v.h);
	ctx.set_stroke_style_str(style::SLATE);
	ctx.set_line_width(1.0);
	ctx.stroke_rect(v.x, v.y, v.w, v.h);
	ctx.set_stroke_style_str("#e2e8f0");
	ctx.stroke_rect(f.x, f.y, f.w, f.h);
}
