/// A node as handed to the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique within the graph; edges refer to it.
	pub id: String,
	/// Caption drawn beside the node.
	pub label: Option<String>,
	/// Fill colour; defaults to the group colour.
	pub color: Option<String>,
	/// Palette index. Group 0 is drawn larger, as the root.
	pub group: Option<u32>,
	/// Initial placement relative to the canvas centre; the simulation moves it.
	pub position: Option<(f32, f32)>,
}

/// A directed edge between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Unique within the graph.
	pub id: String,
	/// Node the arrow starts at.
	pub source: String,
	/// Node the arrow points to.
	pub target: String,
}

/// Everything the canvas draws.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes, in insertion order.
	pub nodes: Vec<GraphNode>,
	/// Edges; dangling ones are ignored when drawn.
	pub links: Vec<GraphLink>,
}
