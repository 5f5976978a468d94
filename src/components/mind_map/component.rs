use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::MindMapState;
use super::types::DiagramModel;

type SharedState = Rc<RefCell<Option<MindMapState>>>;

fn parent_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| parent.as_ref().map_or(800.0, |p| p.client_width() as f64)),
		height.unwrap_or_else(|| parent.as_ref().map_or(600.0, |p| p.client_height() as f64)),
	)
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Everything the mounted canvas keeps alive between frames.
#[derive(Clone, Default)]
struct CanvasLoop {
	state: SharedState,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	frame: Rc<Cell<Option<i32>>>,
}

impl CanvasLoop {
	/// Cancel the pending frame, detach the resize listener and drop the
	/// diagram state.
	fn stop(&self) {
		let (frame, resize_cb) = self.release();
		if frame.is_none() && resize_cb.is_none() {
			return;
		}
		if let Some(win) = web_sys::window() {
			if let Some(id) = frame {
				let _ = win.cancel_animation_frame(id);
			}
			if let Some(cb) = &resize_cb {
				let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	}

	/// Break the animation closure's self reference and hand back what still
	/// has to be detached from the window.
	fn release(&self) -> (Option<i32>, Option<Closure<dyn FnMut()>>) {
		self.animate.borrow_mut().take();
		self.state.borrow_mut().take();
		(self.frame.take(), self.resize_cb.borrow_mut().take())
	}
}

/// Canvas that draws `data` and lets the user drag nodes, draw connections,
/// pan and zoom. Sized to its parent unless `width`/`height` are given.
#[component]
pub fn MindMapCanvas(
	#[prop(into)] data: Signal<DiagramModel>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handles = CanvasLoop::default();
	let state = handles.state.clone();
	let init = handles.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		init.stop();
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("mind map: no window");
			return;
		};

		let (w, h) = parent_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("mind map: canvas has no 2d context");
				return;
			}
		};

		let measure = |text: &str, px: f64| render::measure_text(&ctx, text, px);
		*init.state.borrow_mut() = Some(MindMapState::new(data.get(), w, h, &measure));
		info!("mind map mounted at {w}x{h}");

		let (state_resize, canvas_resize) = (init.state.clone(), canvas.clone());
		*init.resize_cb.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *init.resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, frame_inner) =
			(init.state.clone(), init.animate.clone(), init.frame.clone());
		*init.animate.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				frame_inner.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *init.animate.borrow() {
			init.frame
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let teardown = SendWrapper::new(handles);
	on_cleanup(move || {
		teardown.take().stop();
		debug!("mind map unmounted");
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up(x, y);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	let control = move |action: fn(&mut MindMapState)| {
		let state = state.clone();
		move |_: MouseEvent| {
			if let Some(ref mut s) = *state.borrow_mut() {
				action(s);
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="mind-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<div class="mind-map-controls">
			<button title="zoom in" on:click=control(MindMapState::zoom_in)>"+"</button>
			<button title="zoom out" on:click=control(MindMapState::zoom_out)>"−"</button>
			<button title="fit view" on:click=control(MindMapState::fit_view)>"⤢"</button>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::mind_map::seed::initial_model;

	#[test]
	fn stopping_drops_the_diagram_state() {
		let handles = CanvasLoop::default();
		let measure = |text: &str, px: f64| text.len() as f64 * px * 0.5;
		*handles.state.borrow_mut() = Some(MindMapState::new(initial_model(), 800.0, 600.0, &measure));
		let held = handles.clone();

		handles.stop();
		assert!(held.state.borrow().is_none());
		assert!(held.animate.borrow().is_none());
		assert_eq!(held.frame.get(), None);
	}
}
