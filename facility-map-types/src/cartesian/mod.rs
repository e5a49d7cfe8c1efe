//! Screen-space primitives, measured in pixels.

mod size;

pub use size::Size;

/// Point on the screen in pixels, with `y` pointing down.
pub type Point2d = nalgebra::Point2<f64>;
