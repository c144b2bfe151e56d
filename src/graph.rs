//! Derives the character → film → starship graph from a detail snapshot.
//!
//! [`assemble`] is a pure function of the snapshot; it runs in full every time the
//! snapshot changes. Pending and failed lookups simply leave their node out.

use std::collections::HashSet;

use log::debug;

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::query::{DetailSnapshot, FetchResult};

const COLUMN: f32 = 250.0;
const ROW: f32 = 100.0;

/// Node kinds, in column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// The selected character.
	Entity,
	/// A film.
	Appearance,
	/// A starship.
	Vehicle,
}

impl NodeKind {
	/// Prefix of node ids of this kind.
	pub fn tag(self) -> &'static str {
		match self {
			NodeKind::Entity => "entity",
			NodeKind::Appearance => "appearance",
			NodeKind::Vehicle => "vehicle",
		}
	}

	fn group(self) -> u32 {
		match self {
			NodeKind::Entity => 0,
			NodeKind::Appearance => 1,
			NodeKind::Vehicle => 2,
		}
	}
}

/// `kind-id`, e.g. `appearance-1`.
pub fn node_id(kind: NodeKind, id: u32) -> String {
	format!("{}-{}", kind.tag(), id)
}

/// `e-source-target`.
pub fn link_id(source: &str, target: &str) -> String {
	format!("e-{}-{}", source, target)
}

#[derive(Default)]
struct Builder {
	graph: GraphData,
	nodes: HashSet<String>,
	links: HashSet<String>,
}

impl Builder {
	/// Adds a node unless one with the same id exists; returns the id either way.
	fn node(&mut self, kind: NodeKind, id: u32, label: &str, position: (f32, f32)) -> String {
		let key = node_id(kind, id);
		if self.nodes.insert(key.clone()) {
			self.graph.nodes.push(GraphNode {
				id: key.clone(),
				label: Some(label.to_string()),
				color: None,
				group: Some(kind.group()),
				position: Some(position),
			});
		}
		key
	}

	fn link(&mut self, source: &str, target: &str) {
		let id = link_id(source, target);
		if self.links.insert(id.clone()) {
			self.graph.links.push(GraphLink {
				id,
				source: source.to_string(),
				target: target.to_string(),
			});
		}
	}

	/// Centres the layout hints vertically around the origin.
	fn finish(mut self) -> GraphData {
		let (top, bottom) = self
			.graph
			.nodes
			.iter()
			.filter_map(|node| node.position)
			.fold((f32::MAX, f32::MIN), |(lo, hi), (_, y)| (lo.min(y), hi.max(y)));
		if top <= bottom {
			let middle = (top + bottom) / 2.0;
			for node in &mut self.graph.nodes {
				if let Some((_, y)) = node.position.as_mut() {
					*y -= middle;
				}
			}
		}
		self.graph
	}
}

/// Builds the graph for one snapshot. Empty until the character has resolved.
pub fn assemble(snapshot: &DetailSnapshot) -> GraphData {
	let FetchResult::Succeeded(entity) = &snapshot.entity else {
		return GraphData::default();
	};

	let mut builder = Builder::default();
	let root = builder.node(NodeKind::Entity, entity.id, &entity.name, (-COLUMN, 0.0));
	let mut seen = HashSet::new();

	for &appearance_id in &entity.appearances {
		let Some(FetchResult::Succeeded(appearance)) = snapshot.appearances.get(&appearance_id)
		else {
			continue;
		};
		if !seen.insert(appearance_id) {
			continue;
		}
		let row = seen.len() as f32;
		let film = builder.node(
			NodeKind::Appearance,
			appearance_id,
			&appearance.title,
			(0.0, ROW * row),
		);
		builder.link(&root, &film);

		for (offset, &vehicle_id) in appearance.vehicles.iter().enumerate() {
			match snapshot.vehicles.get(&vehicle_id) {
				Some(FetchResult::Succeeded(vehicle)) => {
					let ship = builder.node(
						NodeKind::Vehicle,
						vehicle_id,
						&vehicle.name,
						(COLUMN, ROW * (row + offset as f32)),
					);
					builder.link(&film, &ship);
				}
				_ => debug!("vehicle {} not resolved, left out of the graph", vehicle_id),
			}
		}
	}

	let graph = builder.finish();
	debug!(
		"assembled graph for entity {}: {} nodes, {} links",
		entity.id,
		graph.nodes.len(),
		graph.links.len()
	);
	graph
}
