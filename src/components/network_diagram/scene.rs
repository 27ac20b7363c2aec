//! Backend-independent drawing commands for one frame.
//!
//! [`build`] is a pure read of the model; the canvas painter and the SVG
//! writer both consume its output, so the screen and the exported image
//! always agree.

use super::layout::{self, LABEL_FONT_SIZE, glyph_box, label_box};
use super::model::GraphModel;
use super::settings::DiagramSettings;
use super::state::DragTarget;
use super::types::{LabelField, Node, NodeKind};

/// Font family of all text.
pub const FONT_FAMILY: &str = "Arial, sans-serif";
const TITLE: &str = "Interactive Network Diagram - Drag Nodes to Reposition";
const FOOTER: &str = "Click and drag any node to reposition it";
const HIGHLIGHT_PAD: f64 = 3.0;

/// Outline paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
	/// CSS color.
	pub color: &'static str,
	/// Line width in pixels.
	pub width: f64,
	/// Dash pattern as (dash, gap).
	pub dash: Option<(f64, f64)>,
}

impl Stroke {
	/// An undashed stroke.
	pub fn solid(color: &'static str, width: f64) -> Self {
		Self {
			color,
			width,
			dash: None,
		}
	}
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
	/// Text starts at `x`.
	Start,
	/// Text is centered on `x`.
	#[default]
	Middle,
}

/// Font and fill of a text run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
	/// Font size in pixels.
	pub size: f64,
	/// Bold weight.
	pub bold: bool,
	/// Italic slant.
	pub italic: bool,
	/// Fill color.
	pub color: &'static str,
	/// Anchoring.
	pub align: Align,
}

impl TextStyle {
	fn plain(size: f64, color: &'static str) -> Self {
		Self {
			size,
			bold: false,
			italic: false,
			color,
			align: Align::Middle,
		}
	}

	fn bold(size: f64, color: &'static str) -> Self {
		Self {
			bold: true,
			..Self::plain(size, color)
		}
	}

	/// CSS font shorthand, as accepted by canvas `font`.
	pub fn css_font(&self) -> String {
		format!(
			"{}{}{}px {}",
			if self.italic { "italic " } else { "" },
			if self.bold { "bold " } else { "" },
			self.size,
			FONT_FAMILY
		)
	}
}

/// Axis-aligned, optionally rounded rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Width.
	pub w: f64,
	/// Height.
	pub h: f64,
	/// Corner radius; 0 for square corners.
	pub radius: f64,
	/// Fill color.
	pub fill: Option<&'static str>,
	/// Outline.
	pub stroke: Option<Stroke>,
	/// Global alpha for fill and outline.
	pub opacity: f64,
}

impl Default for Rect {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			w: 0.0,
			h: 0.0,
			radius: 0.0,
			fill: None,
			stroke: None,
			opacity: 1.0,
		}
	}
}

/// Filled or outlined circle.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
	/// Center x.
	pub cx: f64,
	/// Center y.
	pub cy: f64,
	/// Radius.
	pub r: f64,
	/// Fill color.
	pub fill: Option<&'static str>,
	/// Outline.
	pub stroke: Option<Stroke>,
}

/// Straight line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
	/// Start point.
	pub from: (f64, f64),
	/// End point.
	pub to: (f64, f64),
	/// Paint.
	pub stroke: Stroke,
}

/// A single line of text at its baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
	/// Anchor x.
	pub x: f64,
	/// Baseline y.
	pub y: f64,
	/// Content.
	pub text: String,
	/// Font and fill.
	pub style: TextStyle,
}

/// One drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	/// A rectangle.
	Rect(Rect),
	/// A circle.
	Circle(Circle),
	/// A line.
	Line(Line),
	/// A text run.
	Text(Text),
}

/// Everything drawn in one frame, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	/// Frame width.
	pub width: f64,
	/// Frame height.
	pub height: f64,
	/// Shapes in paint order.
	pub shapes: Vec<Shape>,
}

impl Scene {
	fn rect(&mut self, rect: Rect) {
		self.shapes.push(Shape::Rect(rect));
	}

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &'static str) {
		self.rect(Rect {
			x,
			y,
			w,
			h,
			fill: Some(fill),
			..Rect::default()
		});
	}

	fn circle(&mut self, circle: Circle) {
		self.shapes.push(Shape::Circle(circle));
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) {
		self.shapes.push(Shape::Line(Line { from, to, stroke }));
	}

	fn text(&mut self, x: f64, y: f64, text: impl Into<String>, style: TextStyle) {
		self.shapes.push(Shape::Text(Text {
			x,
			y,
			text: text.into(),
			style,
		}));
	}

	fn outline(&mut self, (left, top, right, bottom): (f64, f64, f64, f64)) {
		self.rect(Rect {
			x: left - HIGHLIGHT_PAD,
			y: top - HIGHLIGHT_PAD,
			w: right - left + 2.0 * HIGHLIGHT_PAD,
			h: bottom - top + 2.0 * HIGHLIGHT_PAD,
			stroke: Some(Stroke::solid("black", 1.0)),
			..Rect::default()
		});
	}
}

/// Builds the frame for the given model. `highlight` is the element under an
/// active gesture, if any.
pub fn build(
	model: &GraphModel,
	settings: &DiagramSettings,
	highlight: Option<&DragTarget>,
) -> Scene {
	let mut scene = Scene {
		width: settings.width,
		height: settings.height,
		shapes: Vec::new(),
	};

	draw_backdrop(&mut scene);

	for segment in layout::link_segments(model) {
		let kind = segment.link.kind;
		scene.line(
			segment.from,
			segment.to,
			Stroke {
				color: kind.color(),
				width: 1.5,
				dash: kind.dash(),
			},
		);
	}

	for node in model.nodes() {
		draw_node(&mut scene, node);
		match highlight {
			Some(DragTarget::Node(id)) if *id == node.id => {
				scene.outline(glyph_box(node));
			}
			Some(DragTarget::Label(id, field)) if *id == node.id => {
				scene.outline(label_box(node, *field));
			}
			_ => {}
		}
	}

	draw_legend(&mut scene);
	scene
}

fn draw_backdrop(scene: &mut Scene) {
	let (w, h) = (scene.width, scene.height);
	scene.rect(Rect {
		w,
		h,
		radius: 5.0,
		fill: Some("#f8f9fa"),
		..Rect::default()
	});
	scene.text(w / 2.0, 30.0, TITLE, TextStyle::bold(22.0, "#333"));

	// Environments
	scene.rect(Rect {
		x: 40.0,
		y: 70.0,
		w: 440.0,
		h: 490.0,
		radius: 10.0,
		fill: Some("#E8F6FF"),
		stroke: Some(Stroke::solid("#0099CC", 2.0)),
		..Rect::default()
	});
	scene.text(260.0, 95.0, "On-Premises Cyber Range", TextStyle::bold(18.0, "#0070A0"));
	scene.rect(Rect {
		x: 550.0,
		y: 70.0,
		w: 300.0,
		h: 490.0,
		radius: 10.0,
		fill: Some("#FFF9E8"),
		stroke: Some(Stroke::solid("#FF9900", 2.0)),
		..Rect::default()
	});
	scene.text(700.0, 95.0, "AWS Cloud", TextStyle::bold(18.0, "#D86B00"));

	// Subnets
	scene.rect(Rect {
		x: 60.0,
		y: 120.0,
		w: 220.0,
		h: 220.0,
		radius: 5.0,
		fill: Some("#D1EDF8"),
		stroke: Some(Stroke::solid("#0099CC", 1.0)),
		..Rect::default()
	});
	scene.text(170.0, 140.0, "Servers", TextStyle::bold(14.0, "#0070A0"));
	scene.text(170.0, 158.0, "172.16.2.0/24", TextStyle::plain(12.0, "#0070A0"));
	scene.rect(Rect {
		x: 580.0,
		y: 200.0,
		w: 240.0,
		h: 320.0,
		radius: 5.0,
		fill: Some("#FFE7C1"),
		stroke: Some(Stroke {
			color: "#FF9900",
			width: 1.0,
			dash: Some((3.0, 2.0)),
		}),
		..Rect::default()
	});
	scene.text(
		700.0,
		220.0,
		"Public Subnet (10.210.1.0/24)",
		TextStyle::bold(13.0, "#D86B00"),
	);
	scene.rect(Rect {
		x: 595.0,
		y: 235.0,
		w: 210.0,
		h: 75.0,
		radius: 5.0,
		fill: Some("#EE5A6A"),
		opacity: 0.7,
		..Rect::default()
	});
	scene.text(700.0, 255.0, "Security Group - HAProxy", TextStyle::bold(12.0, "white"));
	scene.text(
		700.0,
		273.0,
		"Inbound: Allow from 70.39.165.194/32",
		TextStyle::plain(11.0, "white"),
	);
}

fn draw_node(scene: &mut Scene, node: &Node) {
	let (x, y) = node.position();
	// Glyph coordinates are relative to the node center.
	let at = |dx: f64, dy: f64| (x + dx, y + dy);

	match node.kind {
		NodeKind::Router => {
			scene.circle(Circle {
				cx: x,
				cy: y,
				r: 25.0,
				fill: Some("white"),
				stroke: Some(Stroke::solid("#333", 1.5)),
			});
			let cross = Stroke::solid("black", 2.0);
			scene.line(at(0.0, -15.0), at(0.0, 15.0), cross);
			scene.line(at(-15.0, 0.0), at(15.0, 0.0), cross);
			scene.circle(Circle {
				cx: x,
				cy: y,
				r: 20.0,
				fill: None,
				stroke: Some(Stroke::solid("black", 1.5)),
			});
		}
		NodeKind::Server => {
			scene.rect(Rect {
				x: x - 25.0,
				y: y - 20.0,
				w: 50.0,
				h: 45.0,
				fill: Some("black"),
				stroke: Some(Stroke::solid("black", 2.0)),
				..Rect::default()
			});
			scene.fill_rect(x - 25.0, y - 20.0, 50.0, 30.0, "black");
			scene.fill_rect(x - 15.0, y - 15.0, 30.0, 20.0, "#444");
			scene.fill_rect(x - 25.0, y + 10.0, 50.0, 10.0, "black");
		}
		NodeKind::Firewall => {
			scene.rect(Rect {
				x: x - 30.0,
				y: y - 25.0,
				w: 60.0,
				h: 50.0,
				fill: Some("#333"),
				stroke: Some(Stroke::solid("black", 1.0)),
				..Rect::default()
			});
			for i in 0..5_u8 {
				for j in 0..4_u8 {
					let (bx, by) = at(-25.0 + f64::from(i) * 12.0, -20.0 + f64::from(j) * 10.0);
					scene.fill_rect(bx, by, 10.0, 5.0, "white");
				}
			}
		}
		NodeKind::Gateway => {
			scene.rect(Rect {
				x: x - 40.0,
				y: y - 20.0,
				w: 80.0,
				h: 40.0,
				radius: 5.0,
				fill: Some("#FF9900"),
				..Rect::default()
			});
		}
		NodeKind::Haproxy => {
			scene.rect(Rect {
				x: x - 40.0,
				y: y - 25.0,
				w: 80.0,
				h: 50.0,
				radius: 5.0,
				fill: Some("#996633"),
				..Rect::default()
			});
			scene.rect(Rect {
				x: x - 35.0,
				y: y - 20.0,
				w: 70.0,
				h: 40.0,
				radius: 3.0,
				fill: Some("#664422"),
				..Rect::default()
			});
		}
		NodeKind::Vm => {
			scene.rect(Rect {
				x: x - 30.0,
				y: y - 20.0,
				w: 60.0,
				h: 40.0,
				radius: 3.0,
				fill: Some("#7EB26D"),
				..Rect::default()
			});
			scene.rect(Rect {
				x: x - 25.0,
				y: y - 15.0,
				w: 50.0,
				h: 30.0,
				radius: 2.0,
				fill: Some("#518D41"),
				..Rect::default()
			});
		}
	}

	// Active indicator
	scene.circle(Circle {
		cx: x + 25.0,
		cy: y,
		r: 6.0,
		fill: Some("#33CC66"),
		stroke: None,
	});

	for field in [LabelField::Name, LabelField::Ip] {
		let (lx, ly) = layout::label_anchor(node, field);
		scene.text(
			lx,
			ly,
			node.label_text(field),
			TextStyle::plain(LABEL_FONT_SIZE, "#333"),
		);
	}
}

fn draw_legend(scene: &mut Scene) {
	scene.text(
		scene.width / 2.0,
		scene.height - 20.0,
		FOOTER,
		TextStyle {
			italic: true,
			..TextStyle::plain(14.0, "#333")
		},
	);

	let (ox, oy) = (40.0, 580.0);
	for (i, kind) in NodeKind::ALL.into_iter().enumerate() {
		let x = ox + i as f64 * 140.0;
		scene.fill_rect(x, oy, 20.0, 20.0, kind.legend_color());
		scene.text(
			x + 25.0,
			oy + 15.0,
			kind.label(),
			TextStyle {
				align: Align::Start,
				..TextStyle::plain(12.0, "#333")
			},
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::topology::default_topology;

	fn lines(scene: &Scene) -> Vec<&Line> {
		scene
			.shapes
			.iter()
			.filter_map(|shape| match shape {
				Shape::Line(line) if line.stroke.width == 1.5 => Some(line),
				_ => None,
			})
			.collect()
	}

	fn texts(scene: &Scene) -> Vec<&Text> {
		scene
			.shapes
			.iter()
			.filter_map(|shape| match shape {
				Shape::Text(text) => Some(text),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn one_segment_per_resolvable_link() {
		let mut document = default_topology();
		document.links.push(document.links[0].clone());
		document.links[14].target = "nowhere".into();
		let model = GraphModel::new(document).unwrap();

		let scene = build(&model, &DiagramSettings::default(), None);
		let links = lines(&scene);
		assert_eq!(links.len(), 14);
		assert_eq!(links[0].from, (380.0, 180.0));
		assert_eq!(links[0].to, (700.0, 170.0));
		assert_eq!(links[0].stroke.color, "#666");
		assert_eq!(links[13].stroke.dash, Some((4.0, 2.0)));
	}

	#[test]
	fn labels_are_drawn_at_their_offsets() {
		let model = GraphModel::new(default_topology()).unwrap();
		let scene = build(&model, &DiagramSettings::default(), None);
		let texts = texts(&scene);
		let masa01 = texts.iter().find(|t| t.text == "fll-masa01").unwrap();
		assert_eq!((masa01.x, masa01.y), (170.0, 240.0));
		let ip = texts.iter().find(|t| t.text == "172.16.2.6").unwrap();
		assert_eq!((ip.x, ip.y), (170.0, 255.0));
	}

	#[test]
	fn build_is_deterministic_and_highlight_only_adds_an_outline() {
		let model = GraphModel::new(default_topology()).unwrap();
		let settings = DiagramSettings::default();
		let plain = build(&model, &settings, None);
		assert_eq!(plain, build(&model, &settings, None));

		let target = DragTarget::Node("admin".into());
		let highlighted = build(&model, &settings, Some(&target));
		assert_eq!(highlighted.shapes.len(), plain.shapes.len() + 1);
	}

	#[test]
	fn font_shorthand() {
		let style = TextStyle {
			italic: true,
			..TextStyle::bold(14.0, "#333")
		};
		assert_eq!(style.css_font(), "italic bold 14px Arial, sans-serif");
	}
}
