//! Particle spawning and per-particle physics.

use rand::Rng;

use super::config::FieldConfig;

/// A single drifting point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Fixed at spawn.
	pub radius: f64,
	/// Fixed at spawn.
	pub opacity: f64,
}

/// Number of particles for a viewport of the given width.
///
/// Negative or NaN widths yield zero.
pub fn particle_count(width: f64, config: &FieldConfig) -> usize {
	let by_width = (width / config.particle_spacing).floor();
	if by_width.is_nan() || by_width <= 0.0 {
		return 0;
	}
	(by_width as usize).min(config.max_particles)
}

/// Uniform sample in `[0, 1)`.
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	rng.gen_range(0.0..1.0)
}

impl Particle {
	/// Sample a particle uniformly over a `width` x `height` surface.
	pub fn spawn<R: Rng + ?Sized>(
		rng: &mut R,
		width: f64,
		height: f64,
		config: &FieldConfig,
	) -> Self {
		let x = unit(rng) * width;
		let y = unit(rng) * height;
		let vx = (unit(rng) - 0.5) * 2.0 * config.max_speed;
		let vy = (unit(rng) - 0.5) * 2.0 * config.max_speed;
		let radius = config.radius_min + unit(rng) * (config.radius_max - config.radius_min);
		let opacity = config.opacity_min + unit(rng) * (config.opacity_max - config.opacity_min);

		Self {
			x,
			y,
			vx,
			vy,
			radius,
			opacity,
		}
	}

	pub fn advance(&mut self) {
		self.x += self.vx;
		self.y += self.vy;
	}

	/// Fold the position back onto the torus `[0, width) x [0, height)`.
	pub fn wrap(&mut self, width: f64, height: f64) {
		self.x = wrap_coordinate(self.x, width);
		self.y = wrap_coordinate(self.y, height);
	}

	/// Push the particle away from the pointer at `(px, py)`.
	pub fn repel_from(&mut self, px: f64, py: f64, config: &FieldConfig) {
		if let Some((ix, iy)) = repulsion_impulse(px - self.x, py - self.y, config) {
			self.vx += ix;
			self.vy += iy;
		}
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Reset a coordinate that left `[0, extent)` to the opposite edge.
///
/// Leaving past the high edge lands on 0; leaving below 0 lands on the
/// largest value below `extent`. A non-positive extent collapses to 0.
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
	if extent.is_nan() || extent <= 0.0 || !value.is_finite() {
		return 0.0;
	}
	if value >= extent {
		0.0
	} else if value < 0.0 {
		below(extent)
	} else {
		value
	}
}

/// Largest `f64` strictly less than a positive `extent`.
fn below(extent: f64) -> f64 {
	f64::from_bits(extent.to_bits() - 1)
}

/// Magnitude of the pointer impulse at `distance`: linear from
/// `repulsion_strength` at 0 down to 0 at `repulsion_radius`.
pub fn repulsion_force(distance: f64, config: &FieldConfig) -> f64 {
	if distance.is_nan() || distance < 0.0 || distance >= config.repulsion_radius {
		return 0.0;
	}
	(config.repulsion_radius - distance) / config.repulsion_radius * config.repulsion_strength
}

/// Velocity change for a particle whose displacement to the pointer is
/// `(dx, dy)`. `None` outside the radius or when the pointer sits exactly
/// on the particle, where no direction exists.
pub fn repulsion_impulse(dx: f64, dy: f64, config: &FieldConfig) -> Option<(f64, f64)> {
	let dist = (dx * dx + dy * dy).sqrt();
	if !dist.is_finite() || dist == 0.0 {
		return None;
	}
	let force = repulsion_force(dist, config);
	if force == 0.0 {
		return None;
	}
	Some((-dx / dist * force, -dy / dist * force))
}

/// Stroke opacity of the connection between two particles `distance` apart,
/// or `None` when they are too far apart to be linked.
pub fn link_alpha(distance: f64, config: &FieldConfig) -> Option<f64> {
	if distance.is_nan() || distance < 0.0 || distance >= config.link_distance {
		return None;
	}
	Some((1.0 - distance / config.link_distance) * config.link_opacity)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn still(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 2.0,
			opacity: 0.5,
		}
	}

	#[test]
	fn count_follows_viewport_width() {
		let config = FieldConfig::default();
		assert_eq!(particle_count(0.0, &config), 0);
		assert_eq!(particle_count(19.9, &config), 0);
		assert_eq!(particle_count(20.0, &config), 1);
		assert_eq!(particle_count(799.0, &config), 39);
		assert_eq!(particle_count(800.0, &config), 40);
		assert_eq!(particle_count(1600.0, &config), 80);
		assert_eq!(particle_count(3840.0, &config), 80);
		assert_eq!(particle_count(-100.0, &config), 0);
		assert_eq!(particle_count(f64::NAN, &config), 0);
	}

	#[test]
	fn count_matches_formula_for_every_integer_width() {
		let config = FieldConfig::default();
		for w in 0..4000u32 {
			let expected = (w as usize / 20).min(80);
			assert_eq!(particle_count(w as f64, &config), expected, "width {w}");
		}
	}

	#[test]
	fn spawn_respects_ranges() {
		let config = FieldConfig::default();
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..1000 {
			let p = Particle::spawn(&mut rng, 800.0, 600.0, &config);
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!((-0.25..=0.25).contains(&p.vx));
			assert!((-0.25..=0.25).contains(&p.vy));
			assert!((1.0..3.0).contains(&p.radius));
			assert!((0.2..0.7).contains(&p.opacity));
		}
	}

	#[test]
	fn spawn_on_zero_height_does_not_panic() {
		let config = FieldConfig::default();
		let mut rng = StdRng::seed_from_u64(1);
		let p = Particle::spawn(&mut rng, 400.0, 0.0, &config);
		assert_eq!(p.y, 0.0);
	}

	#[test]
	fn wrap_resets_to_opposite_edge() {
		let top = wrap_coordinate(-1.0, 800.0);
		assert!(top < 800.0);
		assert!(800.0 - top < 1e-9);
		assert_eq!(wrap_coordinate(-1e-20, 800.0), top);
		assert_eq!(wrap_coordinate(-5000.0, 800.0), top);

		assert_eq!(wrap_coordinate(800.0, 800.0), 0.0);
		assert_eq!(wrap_coordinate(801.0, 800.0), 0.0);
		assert_eq!(wrap_coordinate(1250.0, 800.0), 0.0);

		assert_eq!(wrap_coordinate(0.0, 800.0), 0.0);
		assert_eq!(wrap_coordinate(450.0, 800.0), 450.0);
	}

	#[test]
	fn small_high_side_crossing_lands_on_zero() {
		let mut p = still(399.9, 100.0);
		p.vx = 0.3;
		p.advance();
		p.wrap(400.0, 300.0);
		assert_eq!(p.x, 0.0);
		assert_eq!(p.y, 100.0);

		let mut q = still(0.1, 299.9);
		q.vx = -0.3;
		q.vy = 0.3;
		q.advance();
		q.wrap(400.0, 300.0);
		assert!(q.x < 400.0 && q.x > 399.0);
		assert_eq!(q.y, 0.0);
	}

	#[test]
	fn wrap_handles_degenerate_extent() {
		assert_eq!(wrap_coordinate(5.0, 0.0), 0.0);
		assert_eq!(wrap_coordinate(5.0, -3.0), 0.0);
		assert_eq!(wrap_coordinate(f64::NAN, 100.0), 0.0);
	}

	#[test]
	fn wrap_is_idempotent() {
		for v in [-1234.5, -0.1, 0.0, 3.0, 599.99, 600.0, 9000.0] {
			let once = wrap_coordinate(v, 600.0);
			assert_eq!(wrap_coordinate(once, 600.0), once);
		}
	}

	#[test]
	fn repulsion_strictly_decreases_with_distance() {
		let config = FieldConfig::default();
		let mut last = f64::INFINITY;
		let mut d = 0.5;
		while d < 150.0 {
			let force = repulsion_force(d, &config);
			assert!(force > 0.0);
			assert!(force < last, "force did not decrease at {d}");
			last = force;
			d += 0.5;
		}
		assert_eq!(repulsion_force(0.0, &config), 0.02);
		assert_eq!(repulsion_force(150.0, &config), 0.0);
		assert_eq!(repulsion_force(400.0, &config), 0.0);
	}

	#[test]
	fn impulse_points_away_from_pointer() {
		let config = FieldConfig::default();
		let mut p = still(100.0, 100.0);
		p.repel_from(130.0, 140.0, &config);
		assert!(p.vx < 0.0);
		assert!(p.vy < 0.0);

		let magnitude = (p.vx * p.vx + p.vy * p.vy).sqrt();
		let expected = repulsion_force(50.0, &config);
		assert!((magnitude - expected).abs() < 1e-12);
	}

	#[test]
	fn impulse_is_zero_at_and_beyond_radius() {
		let config = FieldConfig::default();
		assert_eq!(repulsion_impulse(150.0, 0.0, &config), None);
		assert_eq!(repulsion_impulse(90.0, 120.0, &config), None);
		assert!(repulsion_impulse(149.9, 0.0, &config).is_some());
	}

	#[test]
	fn coincident_pointer_applies_no_force() {
		let config = FieldConfig::default();
		let mut p = still(42.0, 42.0);
		p.repel_from(42.0, 42.0, &config);
		assert_eq!((p.vx, p.vy), (0.0, 0.0));
		assert!(p.vx.is_finite() && p.vy.is_finite());
	}

	#[test]
	fn link_threshold_excludes_boundary() {
		let config = FieldConfig::default();
		assert_eq!(link_alpha(0.0, &config), Some(0.3));
		assert_eq!(link_alpha(120.0, &config), None);
		assert_eq!(link_alpha(500.0, &config), None);
		let mid = link_alpha(60.0, &config).unwrap();
		assert!((mid - 0.15).abs() < 1e-12);
	}

	#[test]
	fn advance_moves_by_velocity() {
		let mut p = still(10.0, 10.0);
		p.vx = 0.25;
		p.vy = -0.5;
		p.advance();
		assert_eq!((p.x, p.y), (10.25, 9.5));
		assert_eq!(p.distance_to(&still(13.25, 13.5)), 5.0);
	}
}
