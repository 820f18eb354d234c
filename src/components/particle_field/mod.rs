//! Ambient particle-field background.
//!
//! Renders a full-viewport canvas behind the page with:
//! - Slowly drifting points that wrap around the viewport edges
//! - Faint lines between points closer than a fixed distance
//! - A gentle push away from the mouse pointer
//!
//! The simulation ([`FieldState`]) is independent of the browser and draws
//! through the [`Surface`] trait; [`ParticleBackground`] wires it to a canvas,
//! `requestAnimationFrame` and window events.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::ParticleBackground;
//!
//! view! {
//!     <ParticleBackground />
//!     <main class="content">...</main>
//! }
//! ```

mod component;
pub mod config;
mod error;
pub mod particles;
pub mod render;
pub mod state;

pub use component::ParticleBackground;
pub use config::{Color, FieldConfig};
pub use error::SurfaceError;
pub use particles::Particle;
pub use render::Surface;
pub use state::FieldState;
