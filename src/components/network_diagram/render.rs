use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{Align, Rect, Scene, Shape, Stroke};

/// Clears the canvas and paints every shape of `scene` in order.
pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, scene.width, scene.height);
	for shape in &scene.shapes {
		match shape {
			Shape::Rect(rect) => draw_rect(rect, ctx),
			Shape::Circle(c) => {
				ctx.begin_path();
				let _ = ctx.arc(c.cx, c.cy, c.r, 0.0, 2.0 * PI);
				if let Some(fill) = c.fill {
					ctx.set_fill_style_str(fill);
					ctx.fill();
				}
				if let Some(stroke) = &c.stroke {
					apply_stroke(stroke, ctx);
					ctx.stroke();
				}
			}
			Shape::Line(line) => {
				apply_stroke(&line.stroke, ctx);
				ctx.begin_path();
				ctx.move_to(line.from.0, line.from.1);
				ctx.line_to(line.to.0, line.to.1);
				ctx.stroke();
			}
			Shape::Text(text) => {
				ctx.set_fill_style_str(text.style.color);
				ctx.set_font(&text.style.css_font());
				ctx.set_text_align(match text.style.align {
					Align::Start => "start",
					Align::Middle => "center",
				});
				ctx.set_text_baseline("alphabetic");
				let _ = ctx.fill_text(&text.text, text.x, text.y);
			}
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn apply_stroke(stroke: &Stroke, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(stroke.color);
	ctx.set_line_width(stroke.width);
	let dash = match stroke.dash {
		Some((dash, gap)) => js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&dash);
}

fn draw_rect(rect: &Rect, ctx: &CanvasRenderingContext2d) {
	let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);
	let r = rect.radius.min(w / 2.0).min(h / 2.0).max(0.0);

	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();

	ctx.set_global_alpha(rect.opacity);
	if let Some(fill) = rect.fill {
		ctx.set_fill_style_str(fill);
		ctx.fill();
	}
	if let Some(stroke) = &rect.stroke {
		apply_stroke(stroke, ctx);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}
