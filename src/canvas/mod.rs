//! The drawing surface and stroke capture.

pub mod stroke;
pub mod surface;

pub use stroke::StrokeCapture;
pub use surface::Surface;
