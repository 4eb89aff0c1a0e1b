use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::editor::{EditorMode, WeightPrompt};
use super::hit_test::canvas_point;
use super::render;
use super::state::VisualizerState;
use super::types::Graph;

type Shared = Rc<RefCell<Option<VisualizerState>>>;

/// Asks for edge weights with `window.prompt`.
struct BrowserPrompt;

impl WeightPrompt for BrowserPrompt {
	fn ask_weight(&mut self, from: &str, to: &str) -> Option<String> {
		web_sys::window()?
			.prompt_with_message_and_default(&format!("Weight for edge {from}-{to}:"), "1")
			.ok()
			.flatten()
	}
}

/// Reactive mirrors of the session for the parts of the view outside the canvas.
#[derive(Clone, Copy)]
struct UiSignals {
	mode: WriteSignal<EditorMode>,
	status: WriteSignal<String>,
	progress: WriteSignal<String>,
}

impl UiSignals {
	fn publish(self, s: &VisualizerState) {
		self.mode.set(s.editor().mode());
		self.status.set(s.status_line());
		self.progress.set(match s.current_index() {
			Some(i) => format!("{}/{}", i + 1, s.steps().len()),
			None => String::new(),
		});
	}
}

fn update(state: &Shared, ui: UiSignals, f: impl FnOnce(&mut VisualizerState)) {
	let mut guard = state.borrow_mut();
	let Some(s) = guard.as_mut() else {
		return;
	};
	f(s);
	ui.publish(s);
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Only the main button edits; right and middle clicks are left to the browser.
fn is_primary_button(button: i16) -> bool {
	button == 0
}

fn cursor(mode: EditorMode) -> &'static str {
	match mode {
		EditorMode::Move => "grab",
		EditorMode::AddNode => "crosshair",
		_ => "pointer",
	}
}

/// Editable canvas with mode buttons, run controls and a status line.
#[component]
pub fn DijkstraCanvas(
	/// Graph the session starts from and returns to on "Reset graph". A new
	/// value replaces the session graph and discards edits and steps.
	#[prop(into)]
	graph: Signal<Graph>,
	/// Canvas width in pixels. Defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Canvas height in pixels.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	let (mode, set_mode) = signal(EditorMode::Move);
	let (status, set_status) = signal(String::new());
	let (progress, set_progress) = signal(String::new());
	let ui = UiSignals {
		mode: set_mode,
		status: set_status,
		progress: set_progress,
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or(520.0),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas 2d context unavailable");
			return;
		};
		let session = VisualizerState::new(&graph.get_untracked(), w, h);
		ui.publish(&session);
		*state_init.borrow_mut() = Some(session);

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut()
				&& s.take_dirty()
			{
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(window)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(window)) = (&*animate_init.borrow(), web_sys::window()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Later graph values restart the session. The first run finds no session
	// yet; the mount effect above builds it from the same value.
	let state_graph = state.clone();
	Effect::new(move |prev: Option<()>| {
		let next = graph.get();
		if prev.is_some() {
			update(&state_graph, ui, |s| s.load_graph(&next));
		}
	});

	let pointer = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some(canvas_point(
			(ev.client_x() as f64, ev.client_y() as f64),
			(
				rect.left() + canvas.client_left() as f64,
				rect.top() + canvas.client_top() as f64,
			),
			(canvas.client_width() as f64, canvas.client_height() as f64),
			(canvas.width() as f64, canvas.height() as f64),
		))
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if !is_primary_button(ev.button()) {
			return;
		}
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		update(&state_md, ui, |s| {
			s.pointer_down(x, y, &mut BrowserPrompt);
		});
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_up();
		}
	};

	let action = {
		let state = state.clone();
		move |f: fn(&mut VisualizerState)| {
			let state = state.clone();
			move |_: MouseEvent| update(&state, ui, f)
		}
	};

	let on_run = action(|s| {
		if let Err(err) = s.run() {
			warn!("run blocked: {err}");
		}
	});
	let on_first = action(|s| {
		s.first_step();
	});
	let on_prev = action(|s| {
		s.prev_step();
	});
	let on_next = action(|s| {
		s.next_step();
	});
	let on_last = action(|s| {
		s.last_step();
	});
	let on_clear = action(VisualizerState::clear_steps);
	let on_reset = action(VisualizerState::reset_graph);

	let mode_buttons = EditorMode::ALL
		.into_iter()
		.map(|m| {
			let state = state.clone();
			view! {
				<button
					class="mode-button"
					class:active=move || mode.get() == m
					on:click=move |_| update(&state, ui, |s| s.set_mode(m))
				>
					{m.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="dijkstra-visualizer">
			<div class="toolbar">{mode_buttons}</div>
			<canvas
				node_ref=canvas_ref
				class="dijkstra-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				style=move || format!("display: block; cursor: {};", cursor(mode.get()))
			/>
			<div class="controls">
				<button class="run" on:click=on_run>"Run"</button>
				<button on:click=on_first>"|<"</button>
				<button on:click=on_prev>"<"</button>
				<span class="progress">{move || progress.get()}</span>
				<button on:click=on_next>">"</button>
				<button on:click=on_last>">|"</button>
				<button on:click=on_clear>"Clear steps"</button>
				<button on:click=on_reset>"Reset graph"</button>
			</div>
			<p class="status">{move || status.get()}</p>
		</div>
	}
}
