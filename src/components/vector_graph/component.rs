use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::controls::VectorControls;
use super::error::GraphError;
use super::panel::VectorDetailsPanel;
use super::render;
use super::state::{PanelSnapshot, VectorGraphState};
use super::types::GraphConfig;

/// Shared, copyable access to one graph for every part of the view.
///
/// The engine lives in local arena storage; the panel snapshot is mirrored
/// into a signal after every mutation so the DOM controls stay reactive.
#[derive(Clone, Copy)]
pub struct GraphHandle {
	state: StoredValue<VectorGraphState, LocalStorage>,
	snapshot: RwSignal<PanelSnapshot>,
}

impl GraphHandle {
	pub fn new(config: GraphConfig) -> Self {
		let state = VectorGraphState::new(config);
		let snapshot = RwSignal::new(state.snapshot());
		Self {
			state: StoredValue::new_local(state),
			snapshot,
		}
	}

	pub fn snapshot(&self) -> RwSignal<PanelSnapshot> {
		self.snapshot
	}

	pub fn with<R>(&self, fun: impl FnOnce(&VectorGraphState) -> R) -> Option<R> {
		self.state.try_with_value(fun)
	}

	/// Mutates the graph and publishes the new snapshot.
	pub fn update<R>(&self, fun: impl FnOnce(&mut VectorGraphState) -> R) -> Option<R> {
		let result = self.state.try_update_value(fun);
		if let Some(next) = self.state.try_with_value(|s| s.snapshot()) {
			if self.snapshot.get_untracked() != next {
				self.snapshot.set(next);
			}
		}
		result
	}

	/// Runs a fallible action; refusals are logged and otherwise ignored.
	pub fn apply(&self, fun: impl FnOnce(&mut VectorGraphState) -> Result<(), GraphError>) {
		if let Some(Err(err)) = self.update(fun) {
			debug!("Action refused: {err}");
		}
	}

	fn paint(&self, ctx: &CanvasRenderingContext2d) {
		let _ = self.state.try_update_value(|s| {
			if s.scene.take_dirty() {
				render::render(s, ctx);
			}
		});
	}
}

/// Controls, details panel, and drawing surface for one graph.
#[component]
pub fn VectorWorkbench(#[prop(optional)] config: GraphConfig) -> impl IntoView {
	let graph = GraphHandle::new(config);

	view! {
		<div class="vector-workbench">
			<VectorControls graph=graph />
			<VectorDetailsPanel graph=graph />
			<VectorGraphCanvas graph=graph />
		</div>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn VectorGraphCanvas(graph: GraphHandle) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let cursor = RwSignal::new("default");
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("No window to draw in");
			return;
		};
		let Some((w, h)) = graph.with(|s| s.surface_size()) else {
			return;
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("Canvas 2d context unavailable");
			return;
		};
		graph.update(|s| s.scene.mark_dirty());

		let animate_inner = animate.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			graph.paint(&ctx);
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			graph.update(|s| s.begin_drag(x, y));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if graph.with(|s| s.drag.active) == Some(true) {
			graph.update(|s| s.drag_to(x, y));
		} else if let Some(next) = graph.with(|s| s.cursor_at(x, y)) {
			if cursor.get_untracked() != next {
				cursor.set(next);
			}
		}
	};

	let on_mouseup = move |_: MouseEvent| {
		graph.update(|s| s.end_drag());
	};

	let on_mouseleave = move |_: MouseEvent| {
		graph.update(|s| s.end_drag());
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="vector-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style=move || format!("display: block; cursor: {};", cursor.get())
		/>
	}
}
