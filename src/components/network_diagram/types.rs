use serde::{Deserialize, Serialize};

/// Kind of network device a node stands for; selects its glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// Router.
	Router,
	/// Physical or virtual server.
	Server,
	/// Firewall appliance.
	Firewall,
	/// Internet gateway.
	Gateway,
	/// HAProxy load balancer VM.
	Haproxy,
	/// Generic virtual machine.
	Vm,
}

impl NodeKind {
	/// All kinds, in legend order.
	pub const ALL: [NodeKind; 6] = [
		NodeKind::Router,
		NodeKind::Server,
		NodeKind::Firewall,
		NodeKind::Gateway,
		NodeKind::Haproxy,
		NodeKind::Vm,
	];

	/// Glyph bounds relative to the node center as (left, top, right, bottom),
	/// including the active indicator that reaches x + 31.
	pub fn extent(self) -> (f64, f64, f64, f64) {
		match self {
			NodeKind::Router => (-25.0, -25.0, 31.0, 25.0),
			NodeKind::Server => (-25.0, -25.0, 31.0, 25.0),
			NodeKind::Firewall => (-30.0, -25.0, 31.0, 25.0),
			NodeKind::Gateway => (-40.0, -20.0, 40.0, 20.0),
			NodeKind::Haproxy => (-40.0, -25.0, 40.0, 25.0),
			NodeKind::Vm => (-30.0, -20.0, 31.0, 20.0),
		}
	}

	/// Legend label.
	pub fn label(self) -> &'static str {
		match self {
			NodeKind::Router => "Router",
			NodeKind::Server => "Server",
			NodeKind::Firewall => "Firewall",
			NodeKind::Gateway => "AWS Gateway",
			NodeKind::Haproxy => "HAProxy",
			NodeKind::Vm => "Virtual Machine",
		}
	}

	/// Legend swatch color.
	pub fn legend_color(self) -> &'static str {
		match self {
			NodeKind::Router => "#4CB8C4",
			NodeKind::Server => "#666666",
			NodeKind::Firewall => "#333333",
			NodeKind::Gateway => "#FF9900",
			NodeKind::Haproxy => "#996633",
			NodeKind::Vm => "#7EB26D",
		}
	}
}

/// Kind of connection a link stands for; selects its stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
	/// Internal network segment.
	#[default]
	Network,
	/// Uplink to the internet.
	Internet,
	/// Guacamole remote-desktop session.
	Guac,
}

impl LinkKind {
	/// Stroke color.
	pub fn color(self) -> &'static str {
		match self {
			LinkKind::Internet => "#666",
			LinkKind::Guac => "#009966",
			LinkKind::Network => "#0099CC",
		}
	}

	/// Dash pattern as (dash, gap), if any.
	pub fn dash(self) -> Option<(f64, f64)> {
		match self {
			LinkKind::Guac => Some((4.0, 2.0)),
			_ => None,
		}
	}
}

/// Default vertical label offset below the node center.
pub const DEFAULT_LABEL_OFFSET_Y: f64 = 40.0;

fn default_label_offset_y() -> f64 {
	DEFAULT_LABEL_OFFSET_Y
}

/// A device on the diagram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique identifier.
	pub id: String,
	/// Display name, drawn as the first label line.
	pub name: String,
	/// Address text, drawn as the second label line.
	#[serde(default)]
	pub ip: String,
	/// Device kind.
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Center x in canvas pixels.
	pub x: f64,
	/// Center y in canvas pixels.
	pub y: f64,
	/// Label anchor x, relative to the node center.
	#[serde(default)]
	pub label_offset_x: f64,
	/// Label anchor y, relative to the node center.
	#[serde(default = "default_label_offset_y")]
	pub label_offset_y: f64,
	/// Carried through documents; has no effect on dragging.
	#[serde(default)]
	pub fixed: bool,
}

impl Node {
	/// Current center position.
	pub fn position(&self) -> (f64, f64) {
		(self.x, self.y)
	}

	/// Label offset vector relative to the center.
	pub fn label_offset(&self) -> (f64, f64) {
		(self.label_offset_x, self.label_offset_y)
	}

	/// Text of one of the node's labels.
	pub fn label_text(&self, field: LabelField) -> &str {
		match field {
			LabelField::Name => &self.name,
			LabelField::Ip => &self.ip,
		}
	}
}

/// A connection between two nodes, by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Connection kind.
	#[serde(rename = "type", default)]
	pub kind: LinkKind,
}

/// Which of a node's two text labels is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelField {
	/// The `name` line.
	Name,
	/// The `ip` line.
	Ip,
}

/// One saved node position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
	/// Node id the position belongs to.
	pub id: String,
	/// Saved center x.
	pub x: f64,
	/// Saved center y.
	pub y: f64,
}

/// Ordered node positions, as written to and read from a layout file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutSnapshot(pub Vec<LayoutEntry>);

/// A full diagram configuration, as edited in the JSON editor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
	/// All nodes.
	pub nodes: Vec<Node>,
	/// All links.
	pub links: Vec<Link>,
}
