//! Canvas size and the drag clamp.

/// Insets that keep dragged nodes inside the visible canvas, below the title
/// and above the footer and legend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
	/// Left and right inset.
	pub x: f64,
	/// Top inset.
	pub top: f64,
	/// Bottom inset.
	pub bottom: f64,
}

impl Default for Margins {
	fn default() -> Self {
		Self {
			x: 60.0,
			top: 120.0,
			bottom: 100.0,
		}
	}
}

/// Canvas size and drag margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagramSettings {
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Drag clamp insets.
	pub margins: Margins,
}

impl Default for DiagramSettings {
	fn default() -> Self {
		Self {
			width: 900.0,
			height: 650.0,
			margins: Margins::default(),
		}
	}
}

impl DiagramSettings {
	/// Clamps a proposed node position into the draggable area.
	///
	/// The lower bound wins when the canvas is narrower than its margins, and a
	/// NaN coordinate collapses onto a bound, so the result is always finite.
	pub fn clamp(&self, (x, y): (f64, f64)) -> (f64, f64) {
		let m = &self.margins;
		(
			x.min(self.width - m.x).max(m.x),
			y.min(self.height - m.bottom).max(m.top),
		)
	}

	/// Clamps a position from a document into the canvas rectangle
	/// `[0, width] x [0, height]`, ignoring the drag margins.
	pub fn clamp_to_canvas(&self, (x, y): (f64, f64)) -> (f64, f64) {
		(x.min(self.width).max(0.0), y.min(self.height).max(0.0))
	}
}
