//! Reasons the field could not attach to the page.
//!
//! None of these are surfaced to the user. The component logs them and
//! stays inert, since the backdrop is purely decorative.

use std::fmt;

/// Failure to acquire a drawable surface or the viewport it should cover.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
	/// No global `window` (not running in a browser).
	NoWindow,
	/// `innerWidth` / `innerHeight` were not numbers.
	ViewportUnavailable,
	/// `getContext("2d")` threw.
	ContextFailed(String),
	/// The browser returned no 2D context for the canvas.
	ContextUnsupported,
	/// The returned context was not a `CanvasRenderingContext2D`.
	NotCanvas2d,
}

impl fmt::Display for SurfaceError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SurfaceError::NoWindow => write!(f, "no window object"),
			SurfaceError::ViewportUnavailable => write!(f, "viewport size unavailable"),
			SurfaceError::ContextFailed(msg) => write!(f, "getContext(\"2d\") failed: {msg}"),
			SurfaceError::ContextUnsupported => write!(f, "2d canvas context not supported"),
			SurfaceError::NotCanvas2d => write!(f, "context is not a CanvasRenderingContext2D"),
		}
	}
}

impl std::error::Error for SurfaceError {}
