use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const BACKGROUND: &str = "#14141f";
const EDGE_RGB: &str = "160, 170, 200";

/// Paints one frame: background in screen space, then edges and nodes under the
/// current viewport.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (width, height) = state.size;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);

	ctx.save();
	let (ox, oy) = state.viewport.offset;
	let _ = ctx.translate(ox, oy);
	let _ = ctx.scale(state.viewport.scale, state.viewport.scale);
	edges(state, ctx);
	nodes(state, ctx);
	ctx.restore();
}

fn edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let scale = state.viewport.scale;
	let head = 8.0 / scale;
	let emphasis = state.emphasis();
	ctx.set_line_width(1.5 / scale);

	state.graph.visit_edges(|from, to, _| {
		let (x1, y1) = (from.x() as f64, from.y() as f64);
		let (x2, y2) = (to.x() as f64, to.y() as f64);
		let length = (x2 - x1).hypot(y2 - y1);
		if length < 0.001 {
			return;
		}
		let (ux, uy) = ((x2 - x1) / length, (y2 - y1) / length);
		let (start, end) = (from.data.user_data.radius(), to.data.user_data.radius());

		let alpha = if state.in_focus(from.index()) && state.in_focus(to.index()) {
			0.6 + 0.35 * emphasis
		} else {
			0.6 - 0.45 * emphasis
		};
		let color = format!("rgba({}, {})", EDGE_RGB, alpha);
		ctx.set_stroke_style_str(&color);
		ctx.set_fill_style_str(&color);

		ctx.begin_path();
		ctx.move_to(x1 + ux * start, y1 + uy * start);
		ctx.line_to(x2 - ux * (end + head), y2 - uy * (end + head));
		ctx.stroke();

		// Arrow head touching the target's rim.
		let tip = (x2 - ux * end, y2 - uy * end);
		let base = (tip.0 - ux * head, tip.1 - uy * head);
		let wing = (-uy * head / 2.0, ux * head / 2.0);
		ctx.begin_path();
		ctx.move_to(tip.0, tip.1);
		ctx.line_to(base.0 + wing.0, base.1 + wing.1);
		ctx.line_to(base.0 - wing.0, base.1 - wing.1);
		ctx.close_path();
		ctx.fill();
	});
}

fn nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let scale = state.viewport.scale;
	let emphasis = state.emphasis();
	ctx.set_font(&format!("{}px sans-serif", 11.0 / scale.max(0.5)));

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let marker = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let focused = state.is_focused(idx);
		let radius = if focused {
			marker.radius() * (1.0 + 0.35 * emphasis)
		} else {
			marker.radius()
		};

		ctx.set_global_alpha(if state.in_focus(idx) { 1.0 } else { 1.0 - 0.7 * emphasis });
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, TAU);
		ctx.set_fill_style_str(&marker.fill);
		ctx.fill();

		if focused && emphasis > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / scale, 0.0, TAU);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * emphasis));
			ctx.set_line_width(1.5 / scale);
			ctx.stroke();
		}

		if let Some(caption) = &marker.caption {
			ctx.set_fill_style_str("white");
			let _ = ctx.fill_text(caption, x + radius + 3.0, y + 3.0);
		}
	});
	ctx.set_global_alpha(1.0);
}
