//! Per-mount simulation state and the frame pass.
//!
//! A [`FieldState`] is created when the background mounts and lives until it
//! unmounts. Browser callbacks feed it pointer and resize notifications; the
//! animation loop calls [`FieldState::frame`] once per display refresh and
//! keeps rescheduling only while it returns `true`.

use rand::Rng;

use super::config::FieldConfig;
use super::particles::{Particle, link_alpha, particle_count};
use super::render::Surface;

/// Particles, last pointer position and canvas bounds for one mount.
pub struct FieldState {
	pub particles: Vec<Particle>,
	pub config: FieldConfig,
	/// Last pointer position in viewport space. `(0, 0)` until the first move.
	pub pointer: (f64, f64),
	pub width: f64,
	pub height: f64,
	live: bool,
}

impl FieldState {
	/// Spawn `min(max_particles, floor(width / spacing))` particles over the viewport.
	pub fn new<R: Rng + ?Sized>(width: f64, height: f64, config: FieldConfig, rng: &mut R) -> Self {
		let count = particle_count(width, &config);
		let particles = (0..count)
			.map(|_| Particle::spawn(rng, width, height, &config))
			.collect();
		Self::from_particles(particles, width, height, config)
	}

	pub fn from_particles(
		particles: Vec<Particle>,
		width: f64,
		height: f64,
		config: FieldConfig,
	) -> Self {
		Self {
			particles,
			config,
			pointer: (0.0, 0.0),
			width,
			height,
			live: true,
		}
	}

	pub fn is_live(&self) -> bool {
		self.live
	}

	/// Stop the field. Every later call becomes a no-op.
	pub fn cancel(&mut self) {
		self.live = false;
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if self.live {
			self.pointer = (x, y);
		}
	}

	/// Track new canvas bounds. Particles are kept as they are; any left
	/// outside re-enter at the opposite edge on the next frame's wrap.
	pub fn resize(&mut self, width: f64, height: f64) {
		if self.live {
			self.width = width;
			self.height = height;
		}
	}

	/// Run one update and render pass. Returns whether another frame should
	/// be scheduled.
	///
	/// Particles are processed in order: each is advanced, wrapped, pushed by
	/// the pointer and drawn, then linked to every later particle within
	/// range. Later particles are linked at their positions from the
	/// previous frame since they have not been advanced yet.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
		if !self.live {
			return false;
		}

		surface.clear(self.width, self.height);

		let (width, height) = (self.width, self.height);
		let (px, py) = self.pointer;
		let config = &self.config;

		for i in 0..self.particles.len() {
			let (head, tail) = self.particles.split_at_mut(i + 1);
			let p = &mut head[i];

			p.advance();
			p.wrap(width, height);
			p.repel_from(px, py, config);

			surface.fill_circle(p.x, p.y, p.radius, config.color.with_alpha(p.opacity));

			for other in tail.iter() {
				if let Some(alpha) = link_alpha(p.distance_to(other), config) {
					surface.stroke_line(
						(p.x, p.y),
						(other.x, other.y),
						config.link_width,
						config.color.with_alpha(alpha),
					);
				}
			}
		}

		true
	}
}
