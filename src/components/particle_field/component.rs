//! Leptos component wrapping the particle-field canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page and
//! wires window-level `mousemove` and `resize` listeners into a
//! [`FieldState`]. An animation loop runs via `requestAnimationFrame`, calling
//! [`FieldState::frame`] each refresh. Everything registered here is released
//! when the component unmounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::error::SurfaceError;
use super::state::FieldState;

const CANVAS_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
	pointer-events: none; z-index: 0;";

/// Browser resources held by one mounted field.
struct Mount {
	window: Window,
	state: Rc<RefCell<FieldState>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	/// Id of the pending animation frame, if one is scheduled.
	frame_id: Rc<Cell<Option<i32>>>,
	resize_cb: Option<Closure<dyn FnMut()>>,
	pointer_cb: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl Mount {
	/// Stop the loop and detach every listener. Safe to call twice.
	fn unmount(&mut self) {
		if !self.state.borrow().is_live() {
			return;
		}
		self.state.borrow_mut().cancel();

		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		if let Some(cb) = self.resize_cb.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some(cb) = self.pointer_cb.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}
		// The frame closure holds a handle to its own slot; dropping it breaks the cycle.
		self.animate.borrow_mut().take();

		info!("particle-field: unmounted");
	}
}

impl Drop for Mount {
	fn drop(&mut self) {
		self.unmount();
	}
}

fn viewport_size(window: &Window) -> Result<(f64, f64), SurfaceError> {
	let width = window.inner_width().ok().and_then(|v| v.as_f64());
	let height = window.inner_height().ok().and_then(|v| v.as_f64());
	match (width, height) {
		(Some(w), Some(h)) => Ok((w, h)),
		_ => Err(SurfaceError::ViewportUnavailable),
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")
		.map_err(|e| SurfaceError::ContextFailed(format!("{e:?}")))?
		.ok_or(SurfaceError::ContextUnsupported)?
		.dyn_into()
		.map_err(|_| SurfaceError::NotCanvas2d)
}

/// Seed for the spawn RNG, taken from `Math.random`.
fn entropy_seed() -> u64 {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(hi << 32) | lo
}

/// Size the canvas, spawn the field and start the loop and listeners.
///
/// Nothing is registered unless the 2D context is available.
fn attach(canvas: HtmlCanvasElement) -> Result<Mount, SurfaceError> {
	let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
	let mut ctx = context_2d(&canvas)?;
	let (w, h) = viewport_size(&window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let mut rng = StdRng::seed_from_u64(entropy_seed());
	let state = Rc::new(RefCell::new(FieldState::new(
		w,
		h,
		FieldConfig::from_document(),
		&mut rng,
	)));
	info!(
		"particle-field: spawned {} particles on {}x{}",
		state.borrow().particles.len(),
		w,
		h
	);

	let state_resize = state.clone();
	let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let Ok((nw, nh)) = viewport_size(&win) else {
			return;
		};
		canvas.set_width(nw as u32);
		canvas.set_height(nh as u32);
		state_resize.borrow_mut().resize(nw, nh);
		debug!("particle-field: resized to {}x{}", nw, nh);
	});
	let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

	let state_pointer = state.clone();
	let pointer_cb: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
		state_pointer
			.borrow_mut()
			.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
	});
	let _ =
		window.add_event_listener_with_callback("mousemove", pointer_cb.as_ref().unchecked_ref());

	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (state_anim, animate_inner, frame_id_anim, window_anim) =
		(state.clone(), animate.clone(), frame_id.clone(), window.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		frame_id_anim.set(None);
		if !state_anim.borrow_mut().frame(&mut ctx) {
			return;
		}
		if let Some(ref cb) = *animate_inner.borrow() {
			frame_id_anim.set(
				window_anim
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
	}

	Ok(Mount {
		window,
		state,
		animate,
		frame_id,
		resize_cb: Some(resize_cb),
		pointer_cb: Some(pointer_cb),
	})
}

/// Animated backdrop of drifting, loosely connected points.
///
/// Takes no props: the field sizes itself from the viewport at mount and
/// follows window resizes. The canvas sits behind all page content and lets
/// pointer events through. If no 2D context is available the component
/// renders an inert canvas and does nothing else.
#[component]
pub fn ParticleBackground() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mount = StoredValue::new_local(None::<Mount>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		match attach(canvas) {
			Ok(m) => mount.set_value(Some(m)),
			Err(e) => debug!("particle-field: not starting: {}", e),
		}
	});

	on_cleanup(move || {
		mount.try_update_value(|m| {
			if let Some(mut m) = m.take() {
				m.unmount();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-canvas"
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}
