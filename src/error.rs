//! Error types for trajectory-anim operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, rendering or saving an animation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// An input's length disagrees with the number of points.
    #[error("Shape mismatch: {what} has {actual} elements, expected {expected}")]
    ShapeMismatch {
        /// Name of the offending input.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// An attribute value has no marker assigned.
    #[error("No marker for attribute {attribute} ({available} markers available)")]
    MissingMarker {
        /// Attribute value without a marker.
        attribute: usize,
        /// Number of entries in the marker table.
        available: usize,
    },

    /// Unknown marker symbol.
    #[error("Invalid marker: {0:?}")]
    InvalidMarker(String),

    /// Frame index past the end of the time axis.
    #[error("Frame {frame} out of range (animation has {frame_count} frames)")]
    FrameOutOfRange {
        /// Requested frame.
        frame: usize,
        /// Number of frames.
        frame_count: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., equal domain bounds).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Invalid animation configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Animation writer used out of order.
    #[error("Rendering error: {0}")]
    Rendering(String),
}
