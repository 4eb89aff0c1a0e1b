//! Visualizer session: editing, runs and step navigation in one place.

use log::{debug, info};
use thiserror::Error;

use super::editor::{EditOutcome, Editor, EditorMode, WeightPrompt};
use super::engine::{AlgorithmStep, compute_steps, path_distance};
use super::hit_test::hit_test;
use super::types::{Graph, NodeId};

/// Drawn node radius.
pub const NODE_RADIUS: f64 = 20.0;
/// Pointer distance from a node centre that still counts as a hit.
pub const NODE_HIT_RADIUS: f64 = 20.0;
/// Pointer distance from an edge midpoint that still counts as a hit.
pub const EDGE_HIT_RADIUS: f64 = 10.0;

/// Why a run could not start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
	/// No start node is set.
	#[error("Choose a start node first.")]
	MissingStart,
	/// No end node is set.
	#[error("Choose an end node first.")]
	MissingEnd,
	/// An endpoint refers to a node that is gone.
	#[error("Node {0} no longer exists.")]
	UnknownNode(NodeId),
}

/// One visualizer session: the editor, the most recent run and which of its
/// steps is on screen.
pub struct VisualizerState {
	editor: Editor,
	initial: Graph,
	steps: Vec<AlgorithmStep>,
	current: Option<usize>,
	run_ends: Option<(NodeId, NodeId)>,
	last_error: Option<RunError>,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	dirty: bool,
}

impl VisualizerState {
	/// Start a session on a copy of `graph`, which also becomes the reset target.
	pub fn new(graph: &Graph, width: f64, height: f64) -> Self {
		Self {
			editor: Editor::new(graph.clone()),
			initial: graph.clone(),
			steps: Vec::new(),
			current: None,
			run_ends: None,
			last_error: None,
			width,
			height,
			dirty: true,
		}
	}

	/// The editor, for read access to mode, selection and endpoints.
	pub fn editor(&self) -> &Editor {
		&self.editor
	}

	/// The graph as currently edited.
	pub fn graph(&self) -> &Graph {
		self.editor.graph()
	}

	/// Steps of the last run, empty when none is recorded.
	pub fn steps(&self) -> &[AlgorithmStep] {
		&self.steps
	}

	/// Index of the step on screen.
	pub fn current_index(&self) -> Option<usize> {
		self.current
	}

	/// The step on screen, if any.
	pub fn current_step(&self) -> Option<&AlgorithmStep> {
		self.steps.get(self.current?)
	}

	/// Returns whether a redraw is due and resets the flag.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}

	fn touch(&mut self) {
		self.dirty = true;
	}

	/// Switch editor mode and drop any error from a blocked run.
	pub fn set_mode(&mut self, mode: EditorMode) {
		self.editor.set_mode(mode);
		self.last_error = None;
		self.touch();
	}

	/// Route a pointer press through hit testing into the editor.
	pub fn pointer_down(&mut self, x: f64, y: f64, prompt: &mut dyn WeightPrompt) -> EditOutcome {
		let hit = hit_test(self.editor.graph(), x, y);
		let outcome = self.editor.pointer_down(&hit, x, y, prompt);
		if outcome.invalidates_steps() {
			self.clear_steps();
			self.last_error = None;
		}
		if outcome != EditOutcome::Unchanged {
			self.touch();
		}
		outcome
	}

	/// Drag the held node, if any.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if self.editor.pointer_move(x, y) {
			self.touch();
		}
	}

	/// End a drag.
	pub fn pointer_up(&mut self) {
		if self.editor.pointer_up() {
			self.touch();
		}
	}

	fn endpoints(&self) -> Result<(NodeId, NodeId), RunError> {
		let start = self.editor.start_node().ok_or(RunError::MissingStart)?;
		let end = self.editor.end_node().ok_or(RunError::MissingEnd)?;
		for id in [start, end] {
			if !self.graph().contains_node(id) {
				return Err(RunError::UnknownNode(id.to_string()));
			}
		}
		Ok((start.to_string(), end.to_string()))
	}

	/// Recompute the full step list from the current start to the current end
	/// and show the first step. Returns the number of steps recorded.
	pub fn run(&mut self) -> Result<usize, RunError> {
		self.touch();
		let (start, end) = match self.endpoints() {
			Ok(ends) => ends,
			Err(err) => {
				self.last_error = Some(err.clone());
				return Err(err);
			}
		};
		let graph = self.editor.graph();
		self.steps = compute_steps(&graph.nodes, &graph.edges, &start, &end);
		self.current = (!self.steps.is_empty()).then_some(0);
		info!("ran dijkstra {start} -> {end}: {} step(s)", self.steps.len());
		self.run_ends = Some((start, end));
		self.last_error = None;
		Ok(self.steps.len())
	}

	/// Forget the last run. The graph is untouched.
	pub fn clear_steps(&mut self) {
		if !self.steps.is_empty() {
			debug!("discarding {} recorded step(s)", self.steps.len());
		}
		self.steps.clear();
		self.current = None;
		self.run_ends = None;
		self.touch();
	}

	/// Restore the graph the session started with.
	pub fn reset_graph(&mut self) {
		self.editor.replace_graph(self.initial.clone());
		self.last_error = None;
		self.clear_steps();
	}

	/// Make `graph` the new reset target and load it, dropping edits, endpoints
	/// and steps.
	pub fn load_graph(&mut self, graph: &Graph) {
		debug!("loading graph with {} node(s)", graph.nodes.len());
		self.initial = graph.clone();
		self.reset_graph();
	}

	fn jump(&mut self, index: usize) -> bool {
		if self.steps.is_empty() || self.current == Some(index) {
			return false;
		}
		self.current = Some(index.min(self.steps.len() - 1));
		self.touch();
		true
	}

	/// Show the first step. Returns false if nothing changed.
	pub fn first_step(&mut self) -> bool {
		self.jump(0)
	}

	/// Show the last step, the one carrying the path.
	pub fn last_step(&mut self) -> bool {
		self.jump(self.steps.len().saturating_sub(1))
	}

	/// Advance one step, stopping at the last.
	pub fn next_step(&mut self) -> bool {
		match self.current {
			Some(i) if i + 1 < self.steps.len() => self.jump(i + 1),
			_ => false,
		}
	}

	/// Go back one step, stopping at the first.
	pub fn prev_step(&mut self) -> bool {
		match self.current {
			Some(i) if i > 0 => self.jump(i - 1),
			_ => false,
		}
	}

	/// One line of feedback for the controls: the last error, the step on
	/// screen, or the active mode's hint.
	pub fn status_line(&self) -> String {
		if let Some(err) = &self.last_error {
			return err.to_string();
		}
		let (Some(step), Some(index), Some((start, end))) =
			(self.current_step(), self.current, self.run_ends.as_ref())
		else {
			return self.editor.mode().hint().to_string();
		};

		let total = self.steps.len();
		if index + 1 == total {
			return match path_distance(&self.steps, end) {
				Some(d) => format!("Shortest path {}, distance {d}", step.path.join(" → ")),
				None => format!("No path from {start} to {end}."),
			};
		}
		match step.current_node.as_deref() {
			Some(node) => format!(
				"Step {}/{total}: visiting {node} (distance {})",
				index + 1,
				step.distance(node)
			),
			None => format!("Step {}/{total}", index + 1),
		}
	}
}
