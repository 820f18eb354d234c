//! Drawing primitives for the particle field.
//!
//! The simulation only needs three operations: wipe the surface, fill a
//! circle, and stroke a line. They are expressed as the [`Surface`] trait so
//! frames can be driven against the browser canvas or a recorder in tests.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::Color;

/// A 2D target the field draws onto.
pub trait Surface {
	/// Clear the rectangle `(0, 0) .. (width, height)`.
	fn clear(&mut self, width: f64, height: f64);

	/// Fill a circle centred on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Stroke a straight segment from `from` to `to`.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}
}
