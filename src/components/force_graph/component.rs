use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;

type Shared = Rc<RefCell<Option<ForceGraphState>>>;
type JsHook = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

const FRAME_SECONDS: f32 = 0.016;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Fixed width if given, otherwise whatever the parent element offers.
fn measure(canvas: &HtmlCanvasElement, width: Option<f64>) -> f64 {
	width.unwrap_or_else(|| {
		canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.filter(|w| *w > 0.0)
			.unwrap_or(800.0)
	})
}

/// Pointer position relative to the canvas.
fn local(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Runs `f` on the live state, if the canvas has been set up.
fn with_state(state: &Shared, f: impl FnOnce(&mut ForceGraphState)) {
	if let Some(s) = state.borrow_mut().as_mut() {
		f(s);
	}
}

fn schedule(window: &Window, frame: &JsHook) {
	if let Some(cb) = frame.borrow().as_ref() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Empties the slots the frame loop holds. The frame callback captures the slot that
/// stores it, so the loop stays alive until this runs. `unlisten` sees the resize
/// callback before it is dropped.
fn teardown<F>(
	frame: &RefCell<Option<F>>,
	on_resize: &RefCell<Option<F>>,
	state: &RefCell<Option<ForceGraphState>>,
	unlisten: impl FnOnce(&F),
) {
	let resize = on_resize.borrow_mut().take();
	if let Some(cb) = &resize {
		unlisten(cb);
	}
	drop(resize);
	let stopped = frame.borrow_mut().take();
	drop(stopped);
	state.borrow_mut().take();
}

/// Draws `data` as a force-directed graph. Nodes can be dragged, the background
/// panned, and the wheel zooms around the pointer.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = 500.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let state: Shared = Rc::new(RefCell::new(None));
	let frame: JsHook = Rc::new(RefCell::new(None));
	let on_resize: JsHook = Rc::new(RefCell::new(None));
	// Disposed with the component; the frame loop stops once it is gone.
	let mounted = StoredValue::new(());

	let (setup_state, setup_frame, setup_resize) = (state.clone(), frame.clone(), on_resize.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("graph canvas has no 2d context");
			return;
		};

		let w = measure(&canvas, width);
		canvas.set_width(w as u32);
		canvas.set_height(height as u32);
		*setup_state.borrow_mut() = Some(ForceGraphState::new(&data.get_untracked(), w, height));

		let (resize_state, resize_canvas) = (setup_state.clone(), canvas.clone());
		*setup_resize.borrow_mut() = Some(Closure::new(move || {
			let nw = measure(&resize_canvas, width);
			resize_canvas.set_width(nw as u32);
			with_state(&resize_state, |s| s.resize(nw, height));
		}));
		if let Some(cb) = setup_resize.borrow().as_ref() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (tick_state, tick_frame, tick_resize) =
			(setup_state.clone(), setup_frame.clone(), setup_resize.clone());
		*setup_frame.borrow_mut() = Some(Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if mounted.try_with_value(|_| ()).is_none() {
				teardown(&tick_frame, &tick_resize, &tick_state, |cb| {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				});
				debug!("graph canvas unmounted, animation stopped");
				return;
			}
			with_state(&tick_state, |s| {
				s.tick(FRAME_SECONDS);
				render::render(s, &ctx);
			});
			schedule(&window, &tick_frame);
		}));
		schedule(&window, &setup_frame);
	});

	// Swap in every new graph without restarting the animation loop.
	let load_state = state.clone();
	Effect::new(move |_| {
		let graph = data.get();
		with_state(&load_state, |s| s.load(&graph));
	});

	let pointer_handler = |apply: fn(&mut ForceGraphState, (f64, f64))| {
		let state = state.clone();
		move |ev: MouseEvent| {
			if let Some(at) = local(canvas_ref, &ev) {
				with_state(&state, |s| apply(s, at));
			}
		}
	};
	let on_mousedown = pointer_handler(ForceGraphState::press);
	let on_mousemove = pointer_handler(ForceGraphState::drag_to);

	let release_state = state.clone();
	let on_mouseup = move |_: MouseEvent| with_state(&release_state, ForceGraphState::release);
	let leave_state = state.clone();
	let on_mouseleave = move |_: MouseEvent| with_state(&leave_state, ForceGraphState::leave);

	let wheel_state = state.clone();
	let on_wheel = move |ev: web_sys::WheelEvent| {
		ev.prevent_default();
		if let Some(at) = local(canvas_ref, &ev) {
			with_state(&wheel_state, |s| s.zoom_at(at, ev.delta_y() < 0.0));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	type Slot = Rc<RefCell<Option<Box<dyn FnMut()>>>>;

	#[test]
	fn teardown_breaks_the_frame_cycle() {
		let frame: Slot = Rc::new(RefCell::new(None));
		let on_resize: Slot = Rc::new(RefCell::new(None));
		let state: Shared = Rc::new(RefCell::new(Some(ForceGraphState::new(
			&GraphData::default(),
			800.0,
			500.0,
		))));
		let (looped, drawn) = (frame.clone(), state.clone());
		*frame.borrow_mut() = Some(Box::new(move || {
			let _ = (&looped, &drawn);
		}));
		*on_resize.borrow_mut() = Some(Box::new(|| {}));
		assert_eq!(Rc::strong_count(&frame), 2);
		assert_eq!(Rc::strong_count(&state), 2);

		let mut unlistened = false;
		teardown(&frame, &on_resize, &state, |_| unlistened = true);

		assert!(unlistened);
		assert_eq!(Rc::strong_count(&frame), 1);
		assert_eq!(Rc::strong_count(&state), 1);
		assert!(frame.borrow().is_none());
		assert!(on_resize.borrow().is_none());
		assert!(state.borrow().is_none());
	}

	#[test]
	fn teardown_before_setup_is_a_no_op() {
		let frame: Slot = Rc::new(RefCell::new(None));
		let on_resize: Slot = Rc::new(RefCell::new(None));
		let state: Shared = Rc::new(RefCell::new(None));
		let mut unlistened = false;
		teardown(&frame, &on_resize, &state, |_| unlistened = true);
		assert!(!unlistened);
	}
}
