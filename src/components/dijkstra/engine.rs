//! Step-recording Dijkstra over the editor's undirected graph.
//!
//! Every finalized node produces one [`AlgorithmStep`] holding its own copy
//! of the visited set, tentative distances and predecessors, so the UI can
//! scrub back and forth through the run.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::types::{Edge, Node, NodeId};

/// Frozen snapshot of the search right after `current_node` was finalized.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmStep {
	/// Finalized nodes, `current_node` included.
	pub visited_nodes: HashSet<NodeId>,
	/// Node finalized by this step.
	pub current_node: Option<NodeId>,
	/// Tentative distance per node; unreached nodes hold infinity.
	pub distances: HashMap<NodeId, f64>,
	/// Best known predecessor per node.
	pub previous_nodes: HashMap<NodeId, Option<NodeId>>,
	/// Start-to-end path. Only the last step of a run carries one, and only
	/// when the end node was reached.
	pub path: Vec<NodeId>,
}

impl AlgorithmStep {
	/// Tentative distance of `node`, infinity if unknown.
	pub fn distance(&self, node: &str) -> f64 {
		self.distances.get(node).copied().unwrap_or(f64::INFINITY)
	}

	/// Whether `node` was finalized by this step or an earlier one.
	pub fn is_visited(&self, node: &str) -> bool {
		self.visited_nodes.contains(node)
	}

	/// Whether `node` lies on this step's path.
	pub fn on_path(&self, node: &str) -> bool {
		self.path.iter().any(|n| n == node)
	}
}

fn adjacency(edges: &[Edge]) -> HashMap<&str, Vec<(&str, f64)>> {
	let mut adj: HashMap<&str, Vec<(&str, f64)>> = HashMap::new();
	for edge in edges {
		adj.entry(&edge.from).or_default().push((&edge.to, edge.weight));
		adj.entry(&edge.to).or_default().push((&edge.from, edge.weight));
	}
	adj
}

/// Unvisited node with the smallest finite distance. Ties go to the node
/// that comes first in `nodes`.
fn closest_unvisited<'a>(
	nodes: &'a [Node],
	visited: &HashSet<NodeId>,
	distances: &HashMap<NodeId, f64>,
) -> Option<&'a Node> {
	let mut best: Option<(&Node, f64)> = None;
	for node in nodes.iter().filter(|n| !visited.contains(&n.id)) {
		let d = distances.get(&node.id).copied().unwrap_or(f64::INFINITY);
		if best.is_none_or(|(_, b)| d < b) {
			best = Some((node, d));
		}
	}
	match best {
		Some((node, d)) if d.is_finite() => Some(node),
		_ => None,
	}
}

/// Walk predecessors back from `end`. Empty unless the walk arrives at `start`.
fn reconstruct_path(
	previous: &HashMap<NodeId, Option<NodeId>>,
	start: &str,
	end: &str,
) -> Vec<NodeId> {
	let mut path = vec![end.to_string()];
	let mut cursor = end;
	while cursor != start {
		match previous.get(cursor).and_then(|p| p.as_deref()) {
			Some(prev) if !path.iter().any(|n| n == prev) => {
				path.push(prev.to_string());
				cursor = prev;
			}
			_ => return Vec::new(),
		}
	}
	path.reverse();
	path
}

/// Run Dijkstra from `start` and record one step per finalized node, in
/// visitation order. Stops as soon as `end` is finalized or nothing
/// reachable is left.
///
/// Ids are not validated: an unknown `start` yields no steps and an
/// unreachable `end` yields steps that never visit it and an empty path.
pub fn compute_steps(nodes: &[Node], edges: &[Edge], start: &str, end: &str) -> Vec<AlgorithmStep> {
	let mut distances: HashMap<NodeId, f64> = nodes
		.iter()
		.map(|n| {
			let d = if n.id == start { 0.0 } else { f64::INFINITY };
			(n.id.clone(), d)
		})
		.collect();
	let mut previous: HashMap<NodeId, Option<NodeId>> =
		nodes.iter().map(|n| (n.id.clone(), None)).collect();
	let mut visited: HashSet<NodeId> = HashSet::new();
	let adj = adjacency(edges);
	let mut steps = Vec::new();

	while visited.len() < nodes.len() {
		let Some(current) = closest_unvisited(nodes, &visited, &distances) else {
			break;
		};
		let current_id = current.id.as_str();
		let current_dist = distances[current_id];
		visited.insert(current.id.clone());

		steps.push(AlgorithmStep {
			visited_nodes: visited.clone(),
			current_node: Some(current.id.clone()),
			distances: distances.clone(),
			previous_nodes: previous.clone(),
			path: Vec::new(),
		});

		if current_id == end {
			break;
		}

		for &(neighbour, weight) in adj.get(current_id).into_iter().flatten() {
			if visited.contains(neighbour) {
				continue;
			}
			let candidate = current_dist + weight;
			if let Some(d) = distances.get_mut(neighbour)
				&& candidate < *d
			{
				*d = candidate;
				previous.insert(neighbour.to_string(), Some(current.id.clone()));
			}
		}
	}

	let path = reconstruct_path(&previous, start, end);
	debug!(
		"dijkstra {start} -> {end}: {} step(s), path {:?}",
		steps.len(),
		path
	);
	if let Some(last) = steps.last_mut() {
		last.path = path;
	}
	steps
}

/// Length of the shortest path recorded by a run, if the end was reached.
pub fn path_distance(steps: &[AlgorithmStep], end: &str) -> Option<f64> {
	let last = steps.last()?;
	if last.path.is_empty() {
		return None;
	}
	Some(last.distance(end))
}

#[cfg(test)]
mod tests {
	use super::super::types::Graph;
	use super::*;

	fn line() -> Graph {
		let mut g = Graph::new();
		g.add_node("A", 0.0, 0.0);
		g.add_node("B", 1.0, 0.0);
		g.add_node("C", 2.0, 0.0);
		g.add_edge("A", "B", 1.0);
		g.add_edge("B", "C", 1.0);
		g
	}

	fn current_ids(steps: &[AlgorithmStep]) -> Vec<&str> {
		steps
			.iter()
			.filter_map(|s| s.current_node.as_deref())
			.collect()
	}

	#[test]
	fn straight_line_path() {
		let g = line();
		let steps = compute_steps(&g.nodes, &g.edges, "A", "C");
		let last = steps.last().expect("at least one step");
		assert_eq!(last.path, vec!["A", "B", "C"]);
		assert_eq!(path_distance(&steps, "C"), Some(2.0));
		assert_eq!(current_ids(&steps), vec!["A", "B", "C"]);
	}

	#[test]
	fn only_last_step_has_path() {
		let g = line();
		let steps = compute_steps(&g.nodes, &g.edges, "A", "C");
		let (last, rest) = steps.split_last().expect("steps");
		assert!(rest.iter().all(|s| s.path.is_empty()));
		assert!(!last.path.is_empty());
	}

	#[test]
	fn disconnected_end_is_never_visited() {
		let mut g = Graph::new();
		g.add_node("A", 0.0, 0.0);
		g.add_node("B", 50.0, 0.0);
		let steps = compute_steps(&g.nodes, &g.edges, "A", "B");
		assert_eq!(steps.len(), 1);
		assert_eq!(steps[0].current_node.as_deref(), Some("A"));
		assert!(steps[0].path.is_empty());
		assert_eq!(path_distance(&steps, "B"), None);
	}

	#[test]
	fn unknown_start_records_nothing() {
		let g = line();
		let steps = compute_steps(&g.nodes, &g.edges, "Q", "C");
		assert!(steps.is_empty());
		assert_eq!(path_distance(&steps, "C"), None);
	}

	#[test]
	fn start_equals_end() {
		let g = line();
		let steps = compute_steps(&g.nodes, &g.edges, "B", "B");
		assert_eq!(steps.len(), 1);
		assert_eq!(steps[0].path, vec!["B"]);
		assert_eq!(path_distance(&steps, "B"), Some(0.0));
	}

	#[test]
	fn stops_once_end_is_finalized() {
		let mut g = line();
		g.add_node("D", 3.0, 0.0);
		g.add_edge("C", "D", 1.0);
		let steps = compute_steps(&g.nodes, &g.edges, "A", "B");
		assert_eq!(current_ids(&steps), vec!["A", "B"]);
		// B was finalized without relaxing its neighbours.
		assert!(steps[1].distance("C").is_infinite());
	}

	#[test]
	fn ties_follow_node_order() {
		let mut g = Graph::new();
		g.add_node("S", 0.0, 0.0);
		g.add_node("Y", 0.0, 0.0);
		g.add_node("X", 0.0, 0.0);
		g.add_node("T", 0.0, 0.0);
		g.add_edge("S", "X", 1.0);
		g.add_edge("S", "Y", 1.0);
		g.add_edge("X", "T", 5.0);
		let steps = compute_steps(&g.nodes, &g.edges, "S", "T");
		assert_eq!(current_ids(&steps), vec!["S", "Y", "X", "T"]);
	}

	#[test]
	fn edges_are_traversed_both_ways() {
		let mut g = Graph::new();
		g.add_node("A", 0.0, 0.0);
		g.add_node("B", 0.0, 0.0);
		g.add_node("C", 0.0, 0.0);
		// Stored as C->B and B->A; the search still walks A->B->C.
		g.add_edge("C", "B", 2.0);
		g.add_edge("B", "A", 3.0);
		let steps = compute_steps(&g.nodes, &g.edges, "A", "C");
		assert_eq!(steps.last().map(|s| s.path.clone()), Some(vec!["A".into(), "B".into(), "C".into()]));
		assert_eq!(path_distance(&steps, "C"), Some(5.0));
	}

	#[test]
	fn prefers_cheaper_detour() {
		let mut g = line();
		g.add_node("D", 1.0, 1.0);
		g.add_edge("A", "C", 10.0);
		g.add_edge("A", "D", 1.0);
		g.add_edge("D", "C", 0.5);
		let steps = compute_steps(&g.nodes, &g.edges, "A", "C");
		assert_eq!(steps.last().map(|s| s.path.clone()), Some(vec!["A".into(), "D".into(), "C".into()]));
		assert_eq!(path_distance(&steps, "C"), Some(1.5));
	}

	#[test]
	fn snapshots_do_not_share_state() {
		let g = line();
		let steps = compute_steps(&g.nodes, &g.edges, "A", "C");
		assert_eq!(steps[0].visited_nodes.len(), 1);
		assert!(steps[0].distance("B").is_infinite());
		assert_eq!(steps[1].distance("B"), 1.0);
		assert_eq!(steps[0].previous_nodes.get("B"), Some(&None));
		assert_eq!(steps[2].previous_nodes.get("B"), Some(&Some("A".to_string())));
	}

	#[test]
	fn reconstruct_rejects_broken_chain() {
		let mut previous = HashMap::new();
		previous.insert("C".to_string(), Some("B".to_string()));
		previous.insert("B".to_string(), None);
		assert!(reconstruct_path(&previous, "A", "C").is_empty());
	}
}
