//! The cyber-range topology shown when the app starts.

use crate::components::network_diagram::{ConfigDocument, Link, LinkKind, Node, NodeKind};

fn node(id: &str, name: &str, ip: &str, kind: NodeKind, x: f64, y: f64) -> Node {
	Node {
		id: id.into(),
		name: name.into(),
		ip: ip.into(),
		kind,
		x,
		y,
		label_offset_x: 0.0,
		label_offset_y: 40.0,
		fixed: false,
	}
}

fn link(source: &str, target: &str, kind: LinkKind) -> Link {
	Link {
		source: source.into(),
		target: target.into(),
		kind,
	}
}

/// On-premises range plus the AWS side it reaches through the internet gateway.
pub fn default_topology() -> ConfigDocument {
	use LinkKind::{Guac, Internet, Network};
	use NodeKind::{Firewall, Gateway, Haproxy, Router, Server, Vm};

	let nodes = vec![
		// On-premises
		node("edge-router", "fll-edge-router", "172.16.0.1", Router, 380.0, 180.0),
		node("firewall", "fll-firewall", "172.16.0.5", Firewall, 380.0, 310.0),
		node("core-router", "fll-core-router", "172.16.0.6", Router, 220.0, 380.0),
		node("admin", "admin", "172.16.2.5", Server, 100.0, 200.0),
		node("masa01", "fll-masa01", "172.16.2.6", Server, 170.0, 200.0),
		node("masa02", "fll-masa02", "172.16.2.7", Server, 240.0, 200.0),
		node("red-guac", "fll-red-guac", "172.16.2.253", Server, 100.0, 280.0),
		node("redkali01", "fll-redkali01", "172.16.2.2", Server, 170.0, 280.0),
		node("redkali02", "fll-redkali02", "172.16.2.3", Server, 240.0, 280.0),
		// AWS
		node("internet-gateway", "Internet Gateway", "", Gateway, 700.0, 170.0),
		node("haproxy", "HAProxy VM", "10.210.1.X", Haproxy, 700.0, 320.0),
		node("windows-vm", "Windows 10 VM", "10.210.1.Y", Vm, 650.0, 450.0),
		node("kali-vm", "Kali VM", "10.210.1.Z", Vm, 750.0, 450.0),
	];

	let links = vec![
		link("edge-router", "internet-gateway", Internet),
		link("edge-router", "firewall", Network),
		link("firewall", "core-router", Network),
		link("core-router", "admin", Network),
		link("core-router", "masa01", Network),
		link("core-router", "masa02", Network),
		link("core-router", "red-guac", Network),
		link("core-router", "redkali01", Network),
		link("core-router", "redkali02", Network),
		link("internet-gateway", "haproxy", Network),
		link("haproxy", "windows-vm", Network),
		link("haproxy", "kali-vm", Network),
		link("red-guac", "windows-vm", Guac),
		link("red-guac", "kali-vm", Guac),
	];

	ConfigDocument { nodes, links }
}
