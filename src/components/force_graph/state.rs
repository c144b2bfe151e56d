use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;

/// Indexed by node group: entity, appearance, vehicle.
const PALETTE: &[&str] = &["#ff4f9a", "#ffd54f", "#4fc3f7"];
const FALLBACK_COLOR: &str = "#9467bd";

pub const NODE_RADIUS: f64 = 6.0;
pub const ROOT_RADIUS: f64 = 9.0;
const PICK_RADIUS: f64 = 12.0;
const ZOOM_RANGE: (f64, f64) = (0.1, 10.0);

/// What the renderer needs to know about a node.
#[derive(Clone, Debug, Default)]
pub struct Marker {
	pub key: String,
	pub caption: Option<String>,
	pub fill: String,
	pub root: bool,
}

impl Marker {
	pub fn radius(&self) -> f64 {
		if self.root { ROOT_RADIUS } else { NODE_RADIUS }
	}
}

/// Screen = graph * scale + offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub offset: (f64, f64),
	pub scale: f64,
}

impl Viewport {
	fn to_graph(self, (sx, sy): (f64, f64)) -> (f64, f64) {
		(
			(sx - self.offset.0) / self.scale,
			(sy - self.offset.1) / self.scale,
		)
	}
}

/// Pointer gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
	#[default]
	Idle,
	Node {
		idx: DefaultNodeIdx,
		grab: (f64, f64),
		origin: (f32, f32),
	},
	Pan {
		grab: (f64, f64),
		origin: (f64, f64),
	},
}

#[derive(Debug, Default)]
struct Focus {
	node: Option<DefaultNodeIdx>,
	adjacent: HashSet<DefaultNodeIdx>,
	/// 0 = no emphasis, 1 = fully emphasised; eased towards the target each tick.
	level: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<Marker, ()>,
	pub viewport: Viewport,
	pub gesture: Gesture,
	pub size: (f64, f64),
	focus: Focus,
	links: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

fn simulation() -> ForceGraph<Marker, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			viewport: Viewport {
				offset: (width / 2.0, height / 2.0),
				scale: 1.0,
			},
			gesture: Gesture::Idle,
			size: (width, height),
			focus: Focus::default(),
			links: Vec::new(),
		};
		state.load(data);
		state
	}

	/// Replaces the displayed graph. Nodes that survive keep their current position
	/// (and pin) so a growing graph does not jump around; new ones start at their
	/// layout hint, or on a ring when they have none.
	pub fn load(&mut self, data: &GraphData) {
		let mut placed = HashMap::new();
		self.graph.visit_nodes(|node| {
			placed.insert(
				node.data.user_data.key.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});

		let mut graph = simulation();
		let mut index = HashMap::with_capacity(data.nodes.len());
		let ring = data.nodes.len().max(1) as f64;

		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y, is_anchor) = placed.get(&node.id).copied().unwrap_or_else(|| {
				let (x, y) = node.position.unwrap_or_else(|| {
					let angle = i as f64 * TAU / ring;
					((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32)
				});
				(x, y, false)
			});
			let fill = node.color.clone().unwrap_or_else(|| {
				node.group
					.and_then(|g| PALETTE.get(g as usize))
					.unwrap_or(&FALLBACK_COLOR)
					.to_string()
			});
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: Marker {
					key: node.id.clone(),
					caption: node.label.clone(),
					fill,
					root: node.group == Some(0),
				},
			});
			index.insert(node.id.as_str(), idx);
		}

		let links: Vec<_> = data
			.links
			.iter()
			.filter_map(|link| {
				Some((
					*index.get(link.source.as_str())?,
					*index.get(link.target.as_str())?,
				))
			})
			.collect();
		for &(source, target) in &links {
			graph.add_edge(source, target, EdgeData::default());
		}

		self.graph = graph;
		self.links = links;
		self.gesture = Gesture::Idle;
		self.focus = Focus::default();
	}

	pub fn pick(&self, screen: (f64, f64)) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.viewport.to_graph(screen);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if (node.x() as f64 - gx).hypot(node.y() as f64 - gy) < PICK_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Grabs the node under the pointer, or the background to pan.
	pub fn press(&mut self, screen: (f64, f64)) {
		self.gesture = match self.pick(screen) {
			Some(idx) => {
				let mut origin = (0.0, 0.0);
				self.graph.visit_nodes(|node| {
					if node.index() == idx {
						origin = (node.x(), node.y());
					}
				});
				Gesture::Node {
					idx,
					grab: screen,
					origin,
				}
			}
			None => Gesture::Pan {
				grab: screen,
				origin: self.viewport.offset,
			},
		};
	}

	/// Continues the current gesture; with none in progress it updates the hover focus.
	pub fn drag_to(&mut self, screen: (f64, f64)) {
		match self.gesture {
			Gesture::Node { idx, grab, origin } => {
				let scale = self.viewport.scale;
				let x = origin.0 + ((screen.0 - grab.0) / scale) as f32;
				let y = origin.1 + ((screen.1 - grab.1) / scale) as f32;
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = x;
						node.data.y = y;
						node.data.is_anchor = true;
					}
				});
			}
			Gesture::Pan { grab, origin } => {
				self.viewport.offset = (origin.0 + screen.0 - grab.0, origin.1 + screen.1 - grab.1);
			}
			Gesture::Idle => {
				let hovered = self.pick(screen);
				self.set_focus(hovered);
			}
		}
	}

	pub fn release(&mut self) {
		self.gesture = Gesture::Idle;
	}

	pub fn leave(&mut self) {
		self.release();
		self.set_focus(None);
	}

	/// Zooms by one wheel notch keeping the point under the pointer fixed.
	pub fn zoom_at(&mut self, screen: (f64, f64), zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let scale = (self.viewport.scale * factor).clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
		let ratio = scale / self.viewport.scale;
		let (ox, oy) = self.viewport.offset;
		self.viewport.offset = (
			screen.0 - (screen.0 - ox) * ratio,
			screen.1 - (screen.1 - oy) * ratio,
		);
		self.viewport.scale = scale;
	}

	fn set_focus(&mut self, node: Option<DefaultNodeIdx>) {
		if self.focus.node == node {
			return;
		}
		self.focus.node = node;
		self.focus.adjacent = node
			.map(|idx| {
				self.links
					.iter()
					.filter_map(|&(a, b)| match (a == idx, b == idx) {
						(true, _) => Some(b),
						(_, true) => Some(a),
						_ => None,
					})
					.collect()
			})
			.unwrap_or_default();
	}

	pub fn is_focused(&self, idx: DefaultNodeIdx) -> bool {
		self.focus.node == Some(idx)
	}

	/// The focused node or one of its neighbours.
	pub fn in_focus(&self, idx: DefaultNodeIdx) -> bool {
		self.is_focused(idx) || self.focus.adjacent.contains(&idx)
	}

	pub fn emphasis(&self) -> f64 {
		1.0 - (1.0 - self.focus.level).powi(3)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		let target = if self.focus.node.is_some() { 1.0 } else { 0.0 };
		self.focus.level += (target - self.focus.level) * 1.5 * dt as f64;
		if self.focus.level < 0.01 {
			self.focus.level = 0.0;
		}
	}

	/// Keeps the graph centred when the canvas changes size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport.offset.0 += (width - self.size.0) / 2.0;
		self.viewport.offset.1 += (height - self.size.1) / 2.0;
		self.size = (width, height);
	}
}
