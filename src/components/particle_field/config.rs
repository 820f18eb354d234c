//! Tunable constants for the particle field.
//!
//! Every value has a default that reproduces the stock backdrop. A page can
//! override any subset by embedding a JSON object in a
//! `<script type="application/json" id="particle-field-config">` element.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

/// Id of the optional script element holding JSON overrides.
pub const CONFIG_ELEMENT_ID: &str = "particle-field-config";

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Spawn ranges, interaction radii and styling for the field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Upper bound on the number of particles.
	pub max_particles: usize,
	/// One particle per this many pixels of viewport width.
	pub particle_spacing: f64,
	/// Initial velocity components are drawn from `[-max_speed, max_speed)`.
	pub max_speed: f64,
	pub radius_min: f64,
	pub radius_max: f64,
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Pointer distance at which repulsion falls to zero.
	pub repulsion_radius: f64,
	/// Impulse magnitude applied at distance zero.
	pub repulsion_strength: f64,
	/// Particle distance at which connection lines disappear.
	pub link_distance: f64,
	/// Stroke opacity of a connection between coincident particles.
	pub link_opacity: f64,
	pub link_width: f64,
	/// Hue shared by particles and connections; alpha is set per draw.
	pub color: Color,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			max_particles: 80,
			particle_spacing: 20.0,
			max_speed: 0.25,
			radius_min: 1.0,
			radius_max: 3.0,
			opacity_min: 0.2,
			opacity_max: 0.7,
			repulsion_radius: 150.0,
			repulsion_strength: 0.02,
			link_distance: 120.0,
			link_opacity: 0.3,
			link_width: 0.5,
			color: Color::rgb(0, 212, 255),
		}
	}
}

impl FieldConfig {
	/// Parse overrides from JSON. Absent keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Read overrides from the page, falling back to defaults when the
	/// element is absent or its contents do not parse.
	pub fn from_document() -> Self {
		let Some(json) = config_element_text() else {
			return Self::default();
		};
		match Self::from_json(&json) {
			Ok(config) => {
				info!("particle-field: loaded config overrides");
				config
			}
			Err(e) => {
				warn!("particle-field: ignoring malformed config: {}", e);
				Self::default()
			}
		}
	}
}

fn config_element_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
