//! Layout Engine: node and label moves, label geometry, link endpoints and
//! hit testing.

use log::debug;

use super::model::{GraphModel, NodePatch};
use super::settings::DiagramSettings;
use super::types::{LabelField, Link, Node};

/// Label font size in pixels.
pub const LABEL_FONT_SIZE: f64 = 10.0;
/// Distance from the name line down to the ip line.
pub const LABEL_LINE_HEIGHT: f64 = 15.0;
const CHAR_WIDTH: f64 = 0.6 * LABEL_FONT_SIZE;
const MIN_LABEL_WIDTH: f64 = 10.0;

/// Straight segment between two live node centers.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkSegment<'a> {
	/// Link being drawn.
	pub link: &'a Link,
	/// Source node center.
	pub from: (f64, f64),
	/// Target node center.
	pub to: (f64, f64),
}

/// Moves a node towards `proposed`, clamped into the draggable area.
///
/// Returns the stored position, or `None` if the node does not exist.
pub fn move_node(
	model: &mut GraphModel,
	settings: &DiagramSettings,
	id: &str,
	proposed: (f64, f64),
) -> Option<(f64, f64)> {
	let (x, y) = settings.clamp(proposed);
	model
		.update_node(id, NodePatch::position(x, y))
		.then_some((x, y))
}

/// Re-anchors a node's labels at `pointer`, stored relative to the node's
/// current center. Not clamped.
pub fn move_label(model: &mut GraphModel, id: &str, pointer: (f64, f64)) -> Option<(f64, f64)> {
	let (nx, ny) = model.node(id)?.position();
	let offset = (pointer.0 - nx, pointer.1 - ny);
	model
		.update_node(id, NodePatch::label_offset(offset.0, offset.1))
		.then_some(offset)
}

/// Absolute baseline anchor (text center) of one label line.
pub fn label_anchor(node: &Node, field: LabelField) -> (f64, f64) {
	let (ox, oy) = node.label_offset();
	let line = match field {
		LabelField::Name => 0.0,
		LabelField::Ip => LABEL_LINE_HEIGHT,
	};
	(node.x + ox, node.y + oy + line)
}

/// Approximate hit box of a label line as (left, top, right, bottom).
pub fn label_box(node: &Node, field: LabelField) -> (f64, f64, f64, f64) {
	let (ax, ay) = label_anchor(node, field);
	let chars = node.label_text(field).chars().count() as f64;
	let half_w = (chars * CHAR_WIDTH).max(MIN_LABEL_WIDTH) / 2.0;
	(ax - half_w, ay - LABEL_FONT_SIZE, ax + half_w, ay + 2.0)
}

/// Resolves every link against the current node positions, skipping links
/// whose source or target is missing.
pub fn link_segments(model: &GraphModel) -> Vec<LinkSegment<'_>> {
	model
		.links()
		.iter()
		.filter_map(|link| {
			match (model.node(&link.source), model.node(&link.target)) {
				(Some(source), Some(target)) => Some(LinkSegment {
					link,
					from: source.position(),
					to: target.position(),
				}),
				_ => {
					debug!(
						"skipping link {} -> {}: endpoint not found",
						link.source, link.target
					);
					None
				}
			}
		})
		.collect()
}

/// Absolute hit box of a node's glyph, indicator included, as
/// (left, top, right, bottom).
pub fn glyph_box(node: &Node) -> (f64, f64, f64, f64) {
	let (left, top, right, bottom) = node.kind.extent();
	(node.x + left, node.y + top, node.x + right, node.y + bottom)
}

fn contains((left, top, right, bottom): (f64, f64, f64, f64), (px, py): (f64, f64)) -> bool {
	px >= left && px <= right && py >= top && py <= bottom
}

/// Topmost node whose glyph contains `point`.
pub fn node_at(model: &GraphModel, point: (f64, f64)) -> Option<&Node> {
	model
		.nodes()
		.iter()
		.rev()
		.find(|node| contains(glyph_box(node), point))
}

/// Topmost node whose glyph or either label line contains `point`.
pub fn node_group_at(model: &GraphModel, point: (f64, f64)) -> Option<&Node> {
	model.nodes().iter().rev().find(|node| {
		contains(glyph_box(node), point)
			|| [LabelField::Name, LabelField::Ip]
				.into_iter()
				.any(|field| contains(label_box(node, field), point))
	})
}

/// Topmost label line containing `point`.
pub fn label_at(model: &GraphModel, point: (f64, f64)) -> Option<(&Node, LabelField)> {
	model.nodes().iter().rev().find_map(|node| {
		[LabelField::Ip, LabelField::Name]
			.into_iter()
			.find(|&field| contains(label_box(node, field), point))
			.map(|field| (node, field))
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_diagram::types::{ConfigDocument, LinkKind, NodeKind};

	fn model() -> GraphModel {
		let node = |id: &str, kind, x, y| Node {
			id: String::from(id),
			name: format!("fll-{id}"),
			ip: "172.16.2.6".into(),
			kind,
			x,
			y,
			label_offset_x: 0.0,
			label_offset_y: 40.0,
			fixed: false,
		};
		let link = |source: &str, target: &str| Link {
			source: source.into(),
			target: target.into(),
			kind: LinkKind::Network,
		};
		GraphModel::new(ConfigDocument {
			nodes: vec![
				node("router", NodeKind::Router, 220.0, 380.0),
				node("admin", NodeKind::Server, 100.0, 200.0),
			],
			links: vec![link("router", "admin"), link("router", "ghost")],
		})
		.unwrap()
	}

	#[test]
	fn node_move_is_clamped() {
		let mut model = model();
		let settings = DiagramSettings::default();
		let pos = move_node(&mut model, &settings, "admin", (5000.0, 5000.0));
		assert_eq!(pos, Some((840.0, 550.0)));
		assert_eq!(model.node("admin").unwrap().position(), (840.0, 550.0));
	}

	#[test]
	fn moving_unknown_node_changes_nothing() {
		let mut model = model();
		let before = model.clone();
		assert_eq!(
			move_node(&mut model, &DiagramSettings::default(), "nope", (1.0, 1.0)),
			None
		);
		assert_eq!(model, before);
	}

	#[test]
	fn label_offset_is_pointer_minus_node() {
		let mut model = model();
		let offset = move_label(&mut model, "admin", (-400.0, 1000.0));
		assert_eq!(offset, Some((-500.0, 800.0)));

		let admin = model.node("admin").unwrap();
		assert_eq!(admin.position(), (100.0, 200.0));
		assert_eq!(label_anchor(admin, LabelField::Name), (-400.0, 1000.0));
		assert_eq!(label_anchor(admin, LabelField::Ip), (-400.0, 1015.0));
	}

	#[test]
	fn label_follows_node_after_node_move() {
		let mut model = model();
		move_label(&mut model, "admin", (130.0, 260.0));
		move_node(&mut model, &DiagramSettings::default(), "admin", (300.0, 300.0));
		let admin = model.node("admin").unwrap();
		assert_eq!(label_anchor(admin, LabelField::Name), (330.0, 360.0));
	}

	#[test]
	fn dangling_links_produce_no_geometry() {
		let mut model = model();
		let segments = link_segments(&model);
		assert_eq!(segments.len(), 1);
		assert_eq!(segments[0].from, (220.0, 380.0));
		assert_eq!(segments[0].to, (100.0, 200.0));

		move_node(&mut model, &DiagramSettings::default(), "admin", (400.0, 400.0));
		assert_eq!(link_segments(&model)[0].to, (400.0, 400.0));
	}

	#[test]
	fn hit_testing_finds_glyphs_and_labels() {
		let model = model();
		assert_eq!(node_at(&model, (110.0, 190.0)).map(|n| n.id.as_str()), Some("admin"));
		assert!(node_at(&model, (500.0, 500.0)).is_none());

		let (node, field) = label_at(&model, (100.0, 238.0)).unwrap();
		assert_eq!((node.id.as_str(), field), ("admin", LabelField::Name));
		let (node, field) = label_at(&model, (100.0, 253.0)).unwrap();
		assert_eq!((node.id.as_str(), field), ("admin", LabelField::Ip));
		assert!(label_at(&model, (100.0, 200.0)).is_none());
	}

	#[test]
	fn indicator_dot_is_part_of_the_glyph() {
		let model = model();
		assert_eq!(node_at(&model, (130.0, 200.0)).map(|n| n.id.as_str()), Some("admin"));
		assert_eq!(node_at(&model, (250.0, 380.0)).map(|n| n.id.as_str()), Some("router"));
		assert!(node_at(&model, (132.0, 200.0)).is_none());
		assert_eq!(glyph_box(model.node("admin").unwrap()), (75.0, 175.0, 131.0, 225.0));
	}

	#[test]
	fn node_group_covers_glyph_and_labels() {
		let model = model();
		let at = |p| node_group_at(&model, p).map(|n| n.id.as_str());
		assert_eq!(at((100.0, 238.0)), Some("admin"));
		assert_eq!(at((100.0, 253.0)), Some("admin"));
		assert_eq!(at((110.0, 190.0)), Some("admin"));
		assert_eq!(at((220.0, 418.0)), Some("router"));
		assert_eq!(at((500.0, 500.0)), None);
	}
}
