use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::editor::{Editor, EditorMode};
use super::engine::AlgorithmStep;
use super::state::{NODE_RADIUS, VisualizerState};
use super::types::{Edge, NodeId};

const BACKGROUND: &str = "#f8fafc";
const EDGE_COLOR: &str = "#94a3b8";
const PATH_COLOR: &str = "#16a34a";
const WEIGHT_BG: &str = "#ffffff";
const TEXT_COLOR: &str = "#0f172a";
const SELECTED_OUTLINE: &str = "#f59e0b";
const NODE_OUTLINE: &str = "#334155";

/// How a node is painted, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	Start,
	End,
	Current,
	Visited,
	Default,
}

impl NodeRole {
	fn fill(self) -> &'static str {
		match self {
			NodeRole::Start => "#22c55e",
			NodeRole::End => "#ef4444",
			NodeRole::Current => "#f97316",
			NodeRole::Visited => "#93c5fd",
			NodeRole::Default => "#e2e8f0",
		}
	}
}

pub fn node_role(id: &str, editor: &Editor, step: Option<&AlgorithmStep>) -> NodeRole {
	if editor.start_node() == Some(id) {
		NodeRole::Start
	} else if editor.end_node() == Some(id) {
		NodeRole::End
	} else if step.is_some_and(|s| s.current_node.as_deref() == Some(id)) {
		NodeRole::Current
	} else if step.is_some_and(|s| s.is_visited(id)) {
		NodeRole::Visited
	} else {
		NodeRole::Default
	}
}

/// True if the edge joins two consecutive nodes of `path`, in either direction.
pub fn edge_on_path(edge: &Edge, path: &[NodeId]) -> bool {
	path.windows(2).any(|pair| {
		(pair[0] == edge.from && pair[1] == edge.to) || (pair[0] == edge.to && pair[1] == edge.from)
	})
}

pub fn distance_label(distance: f64) -> String {
	if distance.is_finite() {
		format!("{distance}")
	} else {
		"∞".to_string()
	}
}

pub fn render(state: &VisualizerState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	let step = state.current_step();
	draw_edges(state, step, ctx);
	draw_nodes(state, step, ctx);
}

fn draw_edges(state: &VisualizerState, step: Option<&AlgorithmStep>, ctx: &CanvasRenderingContext2d) {
	let graph = state.graph();
	let editor = state.editor();
	let path: &[NodeId] = step.map(|s| s.path.as_slice()).unwrap_or_default();
	let pending = match editor.mode() {
		EditorMode::AddEdge => editor.selected_node(),
		_ => None,
	};

	for edge in &graph.edges {
		let (Some(a), Some(b)) = (graph.node(&edge.from), graph.node(&edge.to)) else {
			continue;
		};
		let highlighted = edge_on_path(edge, path);
		if highlighted {
			ctx.set_stroke_style_str(PATH_COLOR);
			ctx.set_line_width(5.0);
		} else {
			ctx.set_stroke_style_str(EDGE_COLOR);
			ctx.set_line_width(2.0);
		}
		if pending.is_some_and(|p| edge.touches(p)) {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(6.0),
				&JsValue::from_f64(4.0),
			));
		}
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		// Weight label sits on the midpoint, which is also the edge's hit target.
		let (mx, my) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
		ctx.begin_path();
		let _ = ctx.arc(mx, my, 10.0, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(WEIGHT_BG);
		ctx.fill();
		ctx.set_fill_style_str(if highlighted { PATH_COLOR } else { TEXT_COLOR });
		ctx.set_font("12px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&distance_label(edge.weight), mx, my);
	}
}

fn draw_nodes(state: &VisualizerState, step: Option<&AlgorithmStep>, ctx: &CanvasRenderingContext2d) {
	let editor = state.editor();

	for node in &state.graph().nodes {
		let role = node_role(&node.id, editor, step);
		let selected = editor.selected_node() == Some(node.id.as_str());

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(role.fill());
		ctx.fill();
		if selected {
			ctx.set_stroke_style_str(SELECTED_OUTLINE);
			ctx.set_line_width(4.0);
		} else {
			ctx.set_stroke_style_str(NODE_OUTLINE);
			ctx.set_line_width(1.5);
		}
		ctx.stroke();

		ctx.set_fill_style_str(TEXT_COLOR);
		ctx.set_font("bold 14px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&node.label, node.x, node.y);

		if let Some(step) = step
			&& !step.on_path(&node.id)
		{
			ctx.set_font("11px sans-serif");
			let _ = ctx.fill_text(
				&distance_label(step.distance(&node.id)),
				node.x,
				node.y + NODE_RADIUS + 12.0,
			);
		}
	}
}
