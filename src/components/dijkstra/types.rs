//! Graph model shared by the editor, the engine and the renderer.

use log::debug;

/// Node identifier, a letter id such as `A` or `AB`.
pub type NodeId = String;

/// A node placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique id.
	pub id: NodeId,
	/// Canvas x of the centre.
	pub x: f64,
	/// Canvas y of the centre.
	pub y: f64,
	/// Text drawn inside the node.
	pub label: String,
}

/// Weighted connection between two nodes. Traversal ignores direction;
/// `from`/`to` only remember which endpoint was clicked first.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// See [`edge_id`].
	pub id: String,
	/// First endpoint clicked.
	pub from: NodeId,
	/// Second endpoint clicked.
	pub to: NodeId,
	/// Positive traversal cost.
	pub weight: f64,
}

impl Edge {
	/// Whether `node` is one of the endpoints.
	pub fn touches(&self, node: &str) -> bool {
		self.from == node || self.to == node
	}
}

/// Edge id for an unordered endpoint pair, so `A-B` and `B-A` collide.
pub fn edge_id(a: &str, b: &str) -> String {
	if a <= b {
		format!("{a}-{b}")
	} else {
		format!("{b}-{a}")
	}
}

/// Spreadsheet-style column name: 0 -> A, 25 -> Z, 26 -> AA.
fn letter_id(mut n: usize) -> NodeId {
	let mut out = Vec::new();
	loop {
		out.push(b'A' + (n % 26) as u8);
		if n < 26 {
			break;
		}
		n = n / 26 - 1;
	}
	out.reverse();
	String::from_utf8_lossy(&out).into_owned()
}

/// Nodes in insertion order plus at most one edge per node pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	/// Nodes in insertion order, which also breaks distance ties.
	pub nodes: Vec<Node>,
	/// Undirected weighted edges.
	pub edges: Vec<Edge>,
	next_id: usize,
}

impl Graph {
	/// Empty graph whose first generated id is `A`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Whether a node with this id exists.
	pub fn contains_node(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	/// Look up an edge by id.
	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	/// The edge joining `a` and `b`, in either direction.
	pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
		self.edge(&edge_id(a, b))
	}

	/// Next sequential letter id not already taken by a node.
	fn next_node_id(&mut self) -> NodeId {
		loop {
			let id = letter_id(self.next_id);
			self.next_id += 1;
			if !self.contains_node(&id) {
				return id;
			}
		}
	}

	/// Insert a node with an explicit id. Returns false if the id is taken.
	pub fn add_node(&mut self, id: impl Into<NodeId>, x: f64, y: f64) -> bool {
		let id = id.into();
		if self.contains_node(&id) {
			return false;
		}
		self.nodes.push(Node {
			label: id.clone(),
			id,
			x,
			y,
		});
		true
	}

	/// Insert a node at `(x, y)` under the next free letter id.
	pub fn add_node_at(&mut self, x: f64, y: f64) -> NodeId {
		let id = self.next_node_id();
		self.add_node(id.clone(), x, y);
		debug!("added node {id} at ({x:.0}, {y:.0})");
		id
	}

	/// Reposition a node. Returns false for an unknown id.
	pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
		match self.nodes.iter_mut().find(|n| n.id == id) {
			Some(node) => {
				node.x = x;
				node.y = y;
				true
			}
			None => false,
		}
	}

	/// Remove a node and every edge touching it.
	pub fn remove_node(&mut self, id: &str) -> Option<Node> {
		let pos = self.nodes.iter().position(|n| n.id == id)?;
		let node = self.nodes.remove(pos);
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		debug!(
			"removed node {id} and {} incident edge(s)",
			before - self.edges.len()
		);
		Some(node)
	}

	/// Create the edge between `from` and `to`, or overwrite the existing one
	/// in place. Returns the edge id, or `None` for a self-loop, an unknown
	/// endpoint or a weight that is not finite and positive.
	pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Option<String> {
		if from == to || !weight.is_finite() || weight <= 0.0 {
			return None;
		}
		if !self.contains_node(from) || !self.contains_node(to) {
			return None;
		}
		let id = edge_id(from, to);
		let edge = Edge {
			id: id.clone(),
			from: from.to_string(),
			to: to.to_string(),
			weight,
		};
		match self.edges.iter_mut().find(|e| e.id == id) {
			Some(existing) => *existing = edge,
			None => self.edges.push(edge),
		}
		Some(id)
	}

	/// Remove an edge, leaving its endpoints in place.
	pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
		let pos = self.edges.iter().position(|e| e.id == id)?;
		Some(self.edges.remove(pos))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn triangle() -> Graph {
		let mut g = Graph::new();
		g.add_node("A", 0.0, 0.0);
		g.add_node("B", 100.0, 0.0);
		g.add_node("C", 50.0, 80.0);
		g.add_edge("A", "B", 4.0);
		g.add_edge("B", "C", 1.0);
		g.add_edge("C", "A", 2.0);
		g
	}

	#[test]
	fn letter_ids_roll_over_like_columns() {
		assert_eq!(letter_id(0), "A");
		assert_eq!(letter_id(25), "Z");
		assert_eq!(letter_id(26), "AA");
		assert_eq!(letter_id(27), "AB");
		assert_eq!(letter_id(26 + 26 * 26), "AAA");
	}

	#[test]
	fn generated_ids_skip_existing_nodes() {
		let mut g = triangle();
		assert_eq!(g.add_node_at(10.0, 10.0), "D");
		assert_eq!(g.add_node_at(20.0, 20.0), "E");
		let node = g.node("E").expect("node E exists");
		assert_eq!((node.x, node.y), (20.0, 20.0));
		assert_eq!(node.label, "E");
	}

	#[test]
	fn generated_ids_are_not_reused_after_delete() {
		let mut g = Graph::new();
		let a = g.add_node_at(0.0, 0.0);
		g.remove_node(&a);
		assert_eq!(g.add_node_at(0.0, 0.0), "B");
	}

	#[test]
	fn duplicate_explicit_id_is_rejected() {
		let mut g = triangle();
		assert!(!g.add_node("A", 5.0, 5.0));
		assert_eq!(g.nodes.len(), 3);
	}

	#[test]
	fn same_pair_overwrites_in_either_order() {
		let mut g = triangle();
		assert_eq!(g.add_edge("B", "A", 9.0).as_deref(), Some("A-B"));
		let between: Vec<_> = g
			.edges
			.iter()
			.filter(|e| e.touches("A") && e.touches("B"))
			.collect();
		assert_eq!(between.len(), 1);
		assert_eq!(between[0].weight, 9.0);
		assert_eq!(between[0].from, "B");
		assert_eq!(g.edges.len(), 3);
	}

	#[test]
	fn invalid_edges_are_rejected() {
		let mut g = triangle();
		assert!(g.add_edge("A", "A", 1.0).is_none());
		assert!(g.add_edge("A", "Z", 1.0).is_none());
		assert!(g.add_edge("A", "B", 0.0).is_none());
		assert!(g.add_edge("A", "B", f64::NAN).is_none());
		assert_eq!(g.edge_between("A", "B").map(|e| e.weight), Some(4.0));
	}

	#[test]
	fn removing_node_cascades_to_edges() {
		let mut g = triangle();
		let removed = g.remove_node("A").expect("A existed");
		assert_eq!(removed.id, "A");
		assert!(g.edges.iter().all(|e| !e.touches("A")));
		assert_eq!(g.edges.len(), 1);
		assert!(g.remove_node("A").is_none());
	}

	#[test]
	fn move_node_updates_position() {
		let mut g = triangle();
		assert!(g.move_node("C", 1.0, 2.0));
		assert!(!g.move_node("Q", 1.0, 2.0));
		let c = g.node("C").expect("C exists");
		assert_eq!((c.x, c.y), (1.0, 2.0));
	}
}
