use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{STROKE_WIDTH, VectorVisual};
use super::state::{MARGIN, VectorGraphState};

/// Grid lines on multiples of this many units are drawn solid and labelled.
const MAJOR_EVERY: u32 = 10;

pub fn render(state: &VectorGraphState, ctx: &CanvasRenderingContext2d) {
	let (width, height) = (state.transform.width(), state.transform.height());
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(
		0.0,
		0.0,
		width + MARGIN.left + MARGIN.right,
		height + MARGIN.top + MARGIN.bottom,
	);
	ctx.save();
	let _ = ctx.translate(MARGIN.left, MARGIN.top);
	draw_grid(state, ctx);
	draw_axes(state, ctx);
	for visual in state.scene.visuals() {
		draw_vector(visual, ctx);
	}
	ctx.restore();
}

fn draw_grid(state: &VectorGraphState, ctx: &CanvasRenderingContext2d) {
	let t = &state.transform;
	let (width, height) = (t.width(), t.height());
	ctx.set_line_width(1.0);

	for major in [false, true] {
		if major {
			ctx.set_stroke_style_str("rgba(0, 0, 0, 0.25)");
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		} else {
			ctx.set_stroke_style_str("rgba(0, 0, 0, 0.1)");
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(2.0),
				&JsValue::from_f64(2.0),
			));
		}
		ctx.begin_path();
		for i in 0..=state.config.num_x_ticks {
			if (i % MAJOR_EVERY == 0) == major {
				let x = t.to_pixels(i as f64);
				ctx.move_to(x, 0.0);
				ctx.line_to(x, height);
			}
		}
		for j in 0..=state.config.num_y_ticks {
			if (j % MAJOR_EVERY == 0) == major {
				let y = height - t.to_pixels(j as f64);
				ctx.move_to(0.0, y);
				ctx.line_to(width, y);
			}
		}
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_axes(state: &VectorGraphState, ctx: &CanvasRenderingContext2d) {
	let t = &state.transform;
	let (width, height) = (t.width(), t.height());
	ctx.set_stroke_style_str("#000000");
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(0.0, 0.0);
	ctx.line_to(0.0, height);
	ctx.line_to(width, height);
	ctx.stroke();

	ctx.set_fill_style_str("#000000");
	ctx.set_font("10px sans-serif");
	// The zero tick is left unlabelled.
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	for i in (MAJOR_EVERY..=state.config.num_x_ticks).step_by(MAJOR_EVERY as usize) {
		let _ = ctx.fill_text(&i.to_string(), t.to_pixels(i as f64), height + 6.0);
	}
	ctx.set_text_align("right");
	ctx.set_text_baseline("middle");
	for j in (MAJOR_EVERY..=state.config.num_y_ticks).step_by(MAJOR_EVERY as usize) {
		let _ = ctx.fill_text(&j.to_string(), -6.0, height - t.to_pixels(j as f64));
	}
}

fn draw_vector(visual: &VectorVisual, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(visual.color);
	ctx.set_fill_style_str(visual.color);
	ctx.set_line_width(STROKE_WIDTH);
	ctx.set_line_cap("butt");
	ctx.begin_path();
	ctx.move_to(visual.start.x, visual.start.y);
	ctx.line_to(visual.shaft_end.x, visual.shaft_end.y);
	ctx.stroke();

	let (ux, uy) = (visual.direction.x, visual.direction.y);
	if ux != 0.0 || uy != 0.0 {
		let size = VectorVisual::arrow_length();
		let (tip_x, tip_y) = (visual.tip.x, visual.tip.y);
		let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
		let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}

	let label = &visual.label;
	ctx.save();
	let _ = ctx.translate(label.anchor.x, label.anchor.y);
	let _ = ctx.rotate(label.rotation.to_radians());
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("bottom");
	let _ = ctx.fill_text(&label.text, 0.0, -STROKE_WIDTH);
	ctx.restore();
}
