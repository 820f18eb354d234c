//! particle-field: ambient animated backdrop for a single-page portfolio.
//!
//! This crate provides a WASM canvas component that renders drifting,
//! interconnected points behind the page content and nudges them away from
//! the mouse pointer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::particle_field::{FieldConfig, FieldState, ParticleBackground, Surface};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Main application component.
/// Mounts the particle background behind a content container for the host page.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="page">
			<ParticleBackground />
			<main class="page-content" style="position: relative; z-index: 10;"></main>
		</div>
	}
}
