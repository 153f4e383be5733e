//! Rasterization of primitives and scatter markers.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: Fast non-antialiased line drawing
//! - **Midpoint Circle**: Filled circle rendering
//! - **Scanline Fill**: Even-odd polygon filling for marker shapes
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod marker;
mod primitives;

pub use marker::Marker;
pub use primitives::{draw_circle, draw_line, draw_rect_outline, draw_thick_line, fill_polygon};
