//! Animated scatter plots over point trajectories.
//!
//! [`Trajectories`] holds the coordinate tensor, [`Layer`] groups points that
//! share a marker, and [`AnimatedScatter`] moves every layer through time.

mod animated_scatter;
mod layer;
mod trajectories;

pub use animated_scatter::{animate_scatter, AnimatedScatter, ScatterAnimation};
pub use layer::{partition, Layer, MarkerTable};
pub use trajectories::Trajectories;
