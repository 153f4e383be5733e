//! # Trajectory-Anim
//!
//! Animated 2D scatter plots of point trajectories.
//!
//! The input is a coordinate tensor of `n` points, 2 axes and `t` time steps.
//! Every point carries a label, which picks its color, and an attribute, which
//! picks its marker. Points with the same attribute form one layer; each frame
//! moves every layer to the positions of that time step.
//!
//! ## Features
//!
//! - **Pure Rust**: No JavaScript, HTML, or browser dependencies
//! - **Fixed axes**: The view is fitted once over every frame
//! - **Pluggable display**: Frames go to any [`FrameSink`](animation::FrameSink)
//! - **Multiple Outputs**: Animated PNG, still PNG, and terminal playback
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trajectory_anim::prelude::*;
//! use std::path::Path;
//!
//! // 3 points, 2 time steps
//! let traj = Trajectories::from_vec(
//!     vec![0.0, 1.0, 0.0, 1.0, 1.0, 2.0, 1.0, 2.0, 2.0, 3.0, 2.0, 3.0],
//!     3,
//!     2,
//! )?;
//!
//! let mut animation =
//!     animate_scatter(&traj, &[1, 2, 3], &[0, 0, 1], [Marker::Circle, Marker::Cross], None)?;
//! animation.save(Path::new("trajectories.png"))?;
//! # Ok::<(), trajectory_anim::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable parallel SIMD reductions in trueno
//! - `serde`: Serialize and deserialize [`AnimationConfig`](config::AnimationConfig)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// RGBA colors.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Data-to-pixel and label-to-color mappings.
pub mod scale;

/// Rendering and timing configuration.
pub mod config;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Trajectories, layers and the animated scatter plot.
pub mod plots;

/// Animation handle and frame sinks.
pub mod animation;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization and markers.
pub mod render;

/// Output encoders (APNG, PNG, terminal).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trajectory-anim operations.
pub mod error;

pub use error::{Error, Result};
pub use plots::animate_scatter;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trajectory_anim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::{Animation, AnimationInfo, FrameSink};
    pub use crate::color::Rgba;
    pub use crate::config::AnimationConfig;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::{ApngWriter, PngEncoder, TerminalPlayer};
    pub use crate::plots::{
        animate_scatter, AnimatedScatter, Layer, MarkerTable, ScatterAnimation, Trajectories,
    };
    pub use crate::render::Marker;
    pub use crate::scale::{Palette, Viewport};
}
