//! Layout files and the JSON configuration editor.

use log::{debug, info};

use super::model::{GraphModel, NodePatch};
use super::settings::DiagramSettings;
use super::types::{ConfigDocument, LayoutEntry, LayoutSnapshot};
use crate::error::{DiagramError, Result};

/// Download name for saved layouts.
pub const LAYOUT_FILE_NAME: &str = "network-layout.json";

/// Positions of every node, in model order.
pub fn snapshot(model: &GraphModel) -> LayoutSnapshot {
	LayoutSnapshot(
		model
			.nodes()
			.iter()
			.map(|node| LayoutEntry {
				id: node.id.clone(),
				x: node.x,
				y: node.y,
			})
			.collect(),
	)
}

/// Compact JSON text of a layout snapshot.
pub fn encode_layout(snapshot: &LayoutSnapshot) -> Result<String> {
	serde_json::to_string(snapshot).map_err(|source| DiagramError::Encode {
		what: "layout",
		source,
	})
}

/// Parses layout file text; anything but an array of `{id, x, y}` is rejected.
pub fn parse_layout(text: &str) -> Result<LayoutSnapshot> {
	serde_json::from_str(text).map_err(DiagramError::MalformedLayout)
}

/// Overwrites the position of every node named in `snapshot`, kept inside the
/// canvas. Entries for unknown ids are skipped. Returns how many nodes were
/// moved.
pub fn apply_layout(
	model: &mut GraphModel,
	settings: &DiagramSettings,
	snapshot: &LayoutSnapshot,
) -> usize {
	let applied = snapshot
		.0
		.iter()
		.filter(|entry| {
			let (x, y) = settings.clamp_to_canvas((entry.x, entry.y));
			let found = model.update_node(&entry.id, NodePatch::position(x, y));
			if !found {
				debug!("layout entry for unknown node '{}' skipped", entry.id);
			}
			found
		})
		.count();
	info!(
		"Applied layout: {} of {} entries matched",
		applied,
		snapshot.0.len()
	);
	applied
}

/// Parses then applies layout text. Malformed text leaves the model untouched.
pub fn load_layout(
	model: &mut GraphModel,
	settings: &DiagramSettings,
	text: &str,
) -> Result<usize> {
	let snapshot = parse_layout(text)?;
	Ok(apply_layout(model, settings, &snapshot))
}

/// Pretty JSON text of the full configuration, as shown in the editor.
pub fn encode_config(document: &ConfigDocument) -> Result<String> {
	serde_json::to_string_pretty(document).map_err(|source| DiagramError::Encode {
		what: "configuration",
		source,
	})
}

/// Parses editor text into a configuration document.
pub fn parse_config(text: &str) -> Result<ConfigDocument> {
	serde_json::from_str(text).map_err(DiagramError::MalformedConfig)
}

/// Parses editor text and swaps it in as the whole model, with node positions
/// kept inside the canvas. Nothing is applied unless the whole document is
/// valid.
pub fn apply_config(
	model: &mut GraphModel,
	settings: &DiagramSettings,
	text: &str,
) -> Result<()> {
	let mut document = parse_config(text)?;
	for node in &mut document.nodes {
		(node.x, node.y) = settings.clamp_to_canvas(node.position());
	}
	let (nodes, links) = (document.nodes.len(), document.links.len());
	model.replace_all(document.nodes, document.links)?;
	info!("Applied configuration: {} nodes, {} links", nodes, links);
	Ok(())
}
