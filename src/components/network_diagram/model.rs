//! The in-memory graph of nodes and links.

use std::collections::HashSet;

use log::debug;

use super::types::{ConfigDocument, LabelField, Link, Node};
use crate::error::{DiagramError, Result};

/// Field changes merged into a node by [`GraphModel::update_node`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
	/// New display name.
	pub name: Option<String>,
	/// New address text.
	pub ip: Option<String>,
	/// New center position.
	pub position: Option<(f64, f64)>,
	/// New label offset.
	pub label_offset: Option<(f64, f64)>,
}

impl NodePatch {
	/// Patch that only moves the node.
	pub fn position(x: f64, y: f64) -> Self {
		Self {
			position: Some((x, y)),
			..Self::default()
		}
	}

	/// Patch that only moves the node's labels.
	pub fn label_offset(dx: f64, dy: f64) -> Self {
		Self {
			label_offset: Some((dx, dy)),
			..Self::default()
		}
	}

	/// Patch that replaces the text of one label.
	pub fn label_text(field: LabelField, text: String) -> Self {
		match field {
			LabelField::Name => Self {
				name: Some(text),
				..Self::default()
			},
			LabelField::Ip => Self {
				ip: Some(text),
				..Self::default()
			},
		}
	}
}

/// The nodes and links currently on the diagram.
///
/// Node ids are unique. Links may reference ids that do not exist; those are
/// skipped wherever geometry is resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
	nodes: Vec<Node>,
	links: Vec<Link>,
}

impl GraphModel {
	/// Builds a model from a configuration document.
	pub fn new(document: ConfigDocument) -> Result<Self> {
		let mut model = Self::default();
		model.replace_all(document.nodes, document.links)?;
		Ok(model)
	}

	/// Nodes in draw order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Links in draw order.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Swaps in a new set of nodes and links. On error the current contents are kept.
	pub fn replace_all(&mut self, nodes: Vec<Node>, links: Vec<Link>) -> Result<()> {
		let mut seen = HashSet::with_capacity(nodes.len());
		for node in &nodes {
			if !seen.insert(node.id.as_str()) {
				return Err(DiagramError::DuplicateNodeId(node.id.clone()));
			}
		}
		self.nodes = nodes;
		self.links = links;
		Ok(())
	}

	/// Merges `patch` into the node with `id`. Returns false when no such node exists.
	pub fn update_node(&mut self, id: &str, patch: NodePatch) -> bool {
		let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) else {
			debug!("update for unknown node '{}' ignored", id);
			return false;
		};
		if let Some(name) = patch.name {
			node.name = name;
		}
		if let Some(ip) = patch.ip {
			node.ip = ip;
		}
		if let Some((x, y)) = patch.position {
			node.x = x;
			node.y = y;
		}
		if let Some((dx, dy)) = patch.label_offset {
			node.label_offset_x = dx;
			node.label_offset_y = dy;
		}
		true
	}

	/// Snapshot of the full configuration.
	pub fn to_document(&self) -> ConfigDocument {
		ConfigDocument {
			nodes: self.nodes.clone(),
			links: self.links.clone(),
		}
	}
}
