//! Dijkstra visualizer widget: graph model, engine, editor and canvas.

mod component;
pub mod editor;
pub mod engine;
mod render;
pub mod state;
pub mod types;

pub use component::DijkstraCanvas;
pub use editor::{EditOutcome, Editor, EditorMode, WeightError, WeightPrompt, parse_weight};
pub use engine::{AlgorithmStep, compute_steps, path_distance};
pub use hit_test::{Hit, hit_test};
pub use state::{RunError, VisualizerState};
pub use types::{Edge, Graph, Node, NodeId, edge_id};
