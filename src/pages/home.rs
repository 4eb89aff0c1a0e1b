use leptos::prelude::*;

use crate::components::dijkstra::{DijkstraCanvas, Graph};

/// Six-node weighted graph the visualizer opens with.
pub fn sample_graph() -> Graph {
	let mut graph = Graph::new();
	for (id, x, y) in [
		("A", 100.0, 260.0),
		("B", 260.0, 120.0),
		("C", 260.0, 400.0),
		("D", 460.0, 120.0),
		("E", 460.0, 400.0),
		("F", 620.0, 260.0),
	] {
		graph.add_node(id, x, y);
	}
	for (from, to, weight) in [
		("A", "B", 4.0),
		("A", "C", 2.0),
		("B", "C", 1.0),
		("B", "D", 5.0),
		("C", "E", 10.0),
		("D", "E", 2.0),
		("D", "F", 6.0),
		("E", "F", 3.0),
	] {
		graph.add_edge(from, to, weight);
	}
	graph
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph = Signal::derive(sample_graph);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="visualizer-page">
				<h1>"Dijkstra's Algorithm"</h1>
				<p class="subtitle">
					"Build a weighted graph, pick a start and an end node, then step through the search."
				</p>
				<DijkstraCanvas graph=graph />
			</div>
		</ErrorBoundary>
	}
}
