//! Browser entry point: mounts the app into `<body>`.

use dijkstra_visualizer::{App, init_logging};
use leptos::prelude::*;

// Used by the library only.
use console_error_panic_hook as _;
use console_log as _;
use js_sys as _;
use leptos_meta as _;
use leptos_router as _;
use log as _;
use thiserror as _;
use wasm_bindgen as _;
use web_sys as _;
#[cfg(test)]
use petgraph as _;

fn main() {
	init_logging();
	mount_to_body(App);
}
