//! Authoring modes and pointer routing for the graph editor.
//!
//! The editor owns the graph plus the small amount of transient state the
//! modes need (selection, start/end assignment, an in-progress drag). It
//! receives already resolved [`Hit`]s and never draws anything itself.

use log::{debug, info, warn};
use thiserror::Error;

use super::hit_test::Hit;
use super::types::{Graph, NodeId};

/// What a press on the canvas does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
	/// Drag nodes around.
	#[default]
	Move,
	/// Place a node on empty space.
	AddNode,
	/// Join two nodes with a weighted edge.
	AddEdge,
	/// Remove a node or an edge.
	Delete,
	/// Pick the start node, then return to `Move`.
	SetStart,
	/// Pick the end node, then return to `Move`.
	SetEnd,
}

impl EditorMode {
	/// Every mode, in toolbar order.
	pub const ALL: [EditorMode; 6] = [
		EditorMode::Move,
		EditorMode::AddNode,
		EditorMode::AddEdge,
		EditorMode::Delete,
		EditorMode::SetStart,
		EditorMode::SetEnd,
	];

	/// Toolbar button text.
	pub fn label(self) -> &'static str {
		match self {
			EditorMode::Move => "Move",
			EditorMode::AddNode => "Add node",
			EditorMode::AddEdge => "Add edge",
			EditorMode::Delete => "Delete",
			EditorMode::SetStart => "Set start",
			EditorMode::SetEnd => "Set end",
		}
	}

	/// Status-line help shown while the mode is idle.
	pub fn hint(self) -> &'static str {
		match self {
			EditorMode::Move => "Drag nodes to reposition them.",
			EditorMode::AddNode => "Click empty space to add a node.",
			EditorMode::AddEdge => "Click two nodes to connect them.",
			EditorMode::Delete => "Click a node or an edge weight to delete it.",
			EditorMode::SetStart => "Click the node to start from.",
			EditorMode::SetEnd => "Click the destination node.",
		}
	}
}

/// Rejected weight input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightError {
	/// Blank input.
	#[error("no weight entered")]
	Empty,
	/// Input that is not a non-negative integer.
	#[error("`{0}` is not a whole number")]
	NotANumber(String),
	/// Zero.
	#[error("weight must be greater than zero")]
	NotPositive,
}

/// Parse user input into an edge weight (a positive integer).
pub fn parse_weight(input: &str) -> Result<u32, WeightError> {
	let input = input.trim();
	if input.is_empty() {
		return Err(WeightError::Empty);
	}
	let weight: u32 = input
		.parse()
		.map_err(|_| WeightError::NotANumber(input.to_string()))?;
	if weight == 0 {
		return Err(WeightError::NotPositive);
	}
	Ok(weight)
}

/// Source of edge weights for the add-edge gesture. `None` means the user
/// cancelled.
pub trait WeightPrompt {
	/// Ask for the weight of the edge `from`-`to`.
	fn ask_weight(&mut self, from: &str, to: &str) -> Option<String>;
}

impl<F> WeightPrompt for F
where
	F: FnMut(&str, &str) -> Option<String>,
{
	fn ask_weight(&mut self, from: &str, to: &str) -> Option<String> {
		self(from, to)
	}
}

/// What a pointer press changed, so callers know whether recorded steps
/// still describe the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
	/// Nothing happened.
	Unchanged,
	/// Only the selection or drag state moved.
	SelectionChanged,
	/// Nodes or edges were added or removed, or a weight changed.
	GraphChanged,
	/// The start or end node changed.
	EndpointsChanged,
}

impl EditOutcome {
	/// True when a previous run no longer matches the graph.
	pub fn invalidates_steps(self) -> bool {
		matches!(self, EditOutcome::GraphChanged | EditOutcome::EndpointsChanged)
	}
}

#[derive(Clone, Debug, Default)]
struct DragState {
	node: Option<NodeId>,
	start_x: f64,
	start_y: f64,
	node_start_x: f64,
	node_start_y: f64,
}

/// Graph plus mode, selection, endpoints and drag state.
#[derive(Clone, Debug, Default)]
pub struct Editor {
	graph: Graph,
	mode: EditorMode,
	selected_node: Option<NodeId>,
	start_node: Option<NodeId>,
	end_node: Option<NodeId>,
	drag: DragState,
}

impl Editor {
	/// Editor in move mode with nothing selected.
	pub fn new(graph: Graph) -> Self {
		Self {
			graph,
			..Self::default()
		}
	}

	/// The graph being edited.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Active mode.
	pub fn mode(&self) -> EditorMode {
		self.mode
	}

	/// Node picked as the first endpoint in add-edge mode, or the node last
	/// grabbed in move mode.
	pub fn selected_node(&self) -> Option<&str> {
		self.selected_node.as_deref()
	}

	/// Where runs start.
	pub fn start_node(&self) -> Option<&str> {
		self.start_node.as_deref()
	}

	/// Where runs end.
	pub fn end_node(&self) -> Option<&str> {
		self.end_node.as_deref()
	}

	/// Whether a node is held.
	pub fn is_dragging(&self) -> bool {
		self.drag.node.is_some()
	}

	/// Switch modes. Reselecting the current mode still drops any pending
	/// selection.
	pub fn set_mode(&mut self, mode: EditorMode) {
		if self.mode != mode {
			debug!("editor mode {:?} -> {:?}", self.mode, mode);
		}
		self.mode = mode;
		self.selected_node = None;
		self.drag = DragState::default();
	}

	/// Swap in a whole new graph, forgetting every reference into the old one.
	pub fn replace_graph(&mut self, graph: Graph) {
		self.graph = graph;
		self.selected_node = None;
		self.start_node = None;
		self.end_node = None;
		self.drag = DragState::default();
	}

	fn clear_selection(&mut self) -> EditOutcome {
		match self.selected_node.take() {
			Some(_) => EditOutcome::SelectionChanged,
			None => EditOutcome::Unchanged,
		}
	}

	/// Apply a pointer press at `(x, y)` that resolved to `hit`.
	pub fn pointer_down(
		&mut self,
		hit: &Hit,
		x: f64,
		y: f64,
		prompt: &mut dyn WeightPrompt,
	) -> EditOutcome {
		match self.mode {
			EditorMode::Move => self.press_move(hit, x, y),
			EditorMode::AddNode => match hit {
				Hit::Background => {
					self.graph.add_node_at(x, y);
					EditOutcome::GraphChanged
				}
				_ => EditOutcome::Unchanged,
			},
			EditorMode::AddEdge => self.press_add_edge(hit, prompt),
			EditorMode::Delete => self.press_delete(hit),
			EditorMode::SetStart | EditorMode::SetEnd => self.press_set_endpoint(hit),
		}
	}

	fn press_move(&mut self, hit: &Hit, x: f64, y: f64) -> EditOutcome {
		let Hit::Node(id) = hit else {
			return self.clear_selection();
		};
		let Some(node) = self.graph.node(id) else {
			return EditOutcome::Unchanged;
		};
		self.drag = DragState {
			node: Some(id.clone()),
			start_x: x,
			start_y: y,
			node_start_x: node.x,
			node_start_y: node.y,
		};
		self.selected_node = Some(id.clone());
		EditOutcome::SelectionChanged
	}

	fn press_add_edge(&mut self, hit: &Hit, prompt: &mut dyn WeightPrompt) -> EditOutcome {
		let Hit::Node(id) = hit else {
			return self.clear_selection();
		};
		let Some(first) = self.selected_node.take() else {
			self.selected_node = Some(id.clone());
			return EditOutcome::SelectionChanged;
		};
		if first == *id {
			return EditOutcome::SelectionChanged;
		}

		let Some(answer) = prompt.ask_weight(&first, id) else {
			debug!("edge {first}-{id} cancelled");
			return EditOutcome::SelectionChanged;
		};
		match parse_weight(&answer) {
			Ok(weight) => match self.graph.add_edge(&first, id, f64::from(weight)) {
				Some(edge) => {
					info!("edge {edge} set to weight {weight}");
					EditOutcome::GraphChanged
				}
				None => EditOutcome::SelectionChanged,
			},
			Err(err) => {
				warn!("edge {first}-{id} not created: {err}");
				EditOutcome::SelectionChanged
			}
		}
	}

	fn press_delete(&mut self, hit: &Hit) -> EditOutcome {
		match hit {
			Hit::Node(id) => {
				if self.graph.remove_node(id).is_none() {
					return EditOutcome::Unchanged;
				}
				let id = Some(id.as_str());
				if self.start_node.as_deref() == id {
					self.start_node = None;
				}
				if self.end_node.as_deref() == id {
					self.end_node = None;
				}
				if self.selected_node.as_deref() == id {
					self.selected_node = None;
				}
				EditOutcome::GraphChanged
			}
			Hit::Edge(id) => match self.graph.remove_edge(id) {
				Some(_) => EditOutcome::GraphChanged,
				None => EditOutcome::Unchanged,
			},
			Hit::Background => EditOutcome::Unchanged,
		}
	}

	fn press_set_endpoint(&mut self, hit: &Hit) -> EditOutcome {
		let Hit::Node(id) = hit else {
			return EditOutcome::Unchanged;
		};
		if !self.graph.contains_node(id) {
			return EditOutcome::Unchanged;
		}
		if self.mode == EditorMode::SetStart {
			self.start_node = Some(id.clone());
		} else {
			self.end_node = Some(id.clone());
		}
		info!("{} = {id}", self.mode.label().to_lowercase());
		self.set_mode(EditorMode::Move);
		EditOutcome::EndpointsChanged
	}

	/// Follow the pointer while a node is held in move mode. Returns true if
	/// a node moved.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		let Some(id) = self.drag.node.as_deref() else {
			return false;
		};
		let (nx, ny) = (
			self.drag.node_start_x + (x - self.drag.start_x),
			self.drag.node_start_y + (y - self.drag.start_y),
		);
		self.graph.move_node(id, nx, ny)
	}

	/// Release the held node, if any.
	pub fn pointer_up(&mut self) -> bool {
		self.drag.node.take().is_some()
	}
}
