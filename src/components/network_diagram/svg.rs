//! Standalone SVG serialization of a scene.

use std::fmt::Write;

use super::scene::{Align, FONT_FAMILY, Scene, Shape, Stroke};

fn escape(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&apos;"),
			c => out.push(c),
		}
	}
	out
}

fn paint_attrs(fill: Option<&str>, stroke: Option<&Stroke>) -> String {
	let mut attrs = format!(r#" fill="{}""#, fill.unwrap_or("none"));
	if let Some(stroke) = stroke {
		let _ = write!(
			attrs,
			r#" stroke="{}" stroke-width="{}""#,
			stroke.color, stroke.width
		);
		if let Some((dash, gap)) = stroke.dash {
			let _ = write!(attrs, r#" stroke-dasharray="{},{}""#, dash, gap);
		}
	}
	attrs
}

/// Serializes a scene as a standalone SVG document of the scene's size.
pub fn to_svg(scene: &Scene) -> String {
	let mut out = String::new();
	let _ = writeln!(
		out,
		r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
		w = scene.width,
		h = scene.height
	);

	for shape in &scene.shapes {
		let _ = match shape {
			Shape::Rect(r) => {
				let opacity = if r.opacity < 1.0 {
					format!(r#" opacity="{}""#, r.opacity)
				} else {
					String::new()
				};
				writeln!(
					out,
					r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" ry="{radius}"{}{}/>"#,
					r.x,
					r.y,
					r.w,
					r.h,
					paint_attrs(r.fill, r.stroke.as_ref()),
					opacity,
					radius = r.radius,
				)
			}
			Shape::Circle(c) => writeln!(
				out,
				r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
				c.cx,
				c.cy,
				c.r,
				paint_attrs(c.fill, c.stroke.as_ref())
			),
			Shape::Line(l) => writeln!(
				out,
				r#"<path d="M{},{} L{},{}"{}/>"#,
				l.from.0,
				l.from.1,
				l.to.0,
				l.to.1,
				paint_attrs(None, Some(&l.stroke))
			),
			Shape::Text(t) => {
				let style = &t.style;
				writeln!(
					out,
					r#"<text x="{}" y="{}" text-anchor="{}" font-family="{}" font-size="{}px"{}{} fill="{}">{}</text>"#,
					t.x,
					t.y,
					match style.align {
						Align::Start => "start",
						Align::Middle => "middle",
					},
					FONT_FAMILY,
					style.size,
					if style.bold { r#" font-weight="bold""# } else { "" },
					if style.italic { r#" font-style="italic""# } else { "" },
					style.color,
					escape(&t.text)
				)
			}
		};
	}

	out.push_str("</svg>\n");
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_diagram::model::GraphModel;
	use crate::components::network_diagram::scene;
	use crate::components::network_diagram::settings::DiagramSettings;
	use crate::topology::default_topology;

	#[test]
	fn document_has_canvas_dimensions() {
		let model = GraphModel::new(default_topology()).unwrap();
		let svg = to_svg(&scene::build(&model, &DiagramSettings::default(), None));
		assert!(svg.starts_with(
			r#"<svg xmlns="http://www.w3.org/2000/svg" width="900" height="650" viewBox="0 0 900 650">"#
		));
		assert!(svg.trim_end().ends_with("</svg>"));
		assert!(svg.contains(
			r##"<path d="M380,180 L700,170" fill="none" stroke="#666" stroke-width="1.5"/>"##
		));
		assert!(svg.contains(r#"stroke-dasharray="4,2""#));
	}

	#[test]
	fn label_text_is_escaped() {
		let mut document = default_topology();
		document.nodes[0].name = "<edge & \"core\">".into();
		let model = GraphModel::new(document).unwrap();
		let svg = to_svg(&scene::build(&model, &DiagramSettings::default(), None));
		assert!(svg.contains("&lt;edge &amp; &quot;core&quot;&gt;"));
		assert!(!svg.contains("<edge"));
	}
}
