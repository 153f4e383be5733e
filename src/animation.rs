//! Animation handle and frame sinks.
//!
//! An [`Animation`] renders frames on demand. Timing and display belong to a
//! [`FrameSink`]: [`Animation::play`] pushes every frame, in order, into the
//! sink, which may write it to a file, print it, or keep it in memory.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use tempfile::{Builder, NamedTempFile};

use crate::config::AnimationConfig;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::{ApngWriter, PngEncoder};
use crate::plots::AnimatedScatter;
use crate::render::draw_rect_outline;
use crate::scale::Viewport;

/// Timing and size of an animation, handed to a sink before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationInfo {
    /// Number of frames that will be presented.
    pub frame_count: usize,
    /// Delay between frames.
    pub interval: Duration,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of plays; 0 loops forever.
    pub loop_count: u32,
}

/// Consumer of rendered frames.
pub trait FrameSink {
    /// Called once before the first frame.
    ///
    /// # Errors
    ///
    /// Implementations return an error if they cannot accept the animation.
    fn begin(&mut self, info: &AnimationInfo) -> Result<()> {
        let _ = info;
        Ok(())
    }

    /// Receive frame `index`. Frames arrive in increasing order.
    ///
    /// # Errors
    ///
    /// Implementations return an error if the frame cannot be consumed.
    fn present(&mut self, index: usize, frame: &Framebuffer) -> Result<()>;

    /// Called once after the last frame.
    ///
    /// # Errors
    ///
    /// Implementations return an error if they cannot be finalized.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects frames in memory.
impl FrameSink for Vec<Framebuffer> {
    fn present(&mut self, _index: usize, frame: &Framebuffer) -> Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// A ready-to-play animated scatter plot.
#[derive(Debug, Clone)]
pub struct Animation<'a> {
    scatter: AnimatedScatter<'a>,
    viewport: Viewport,
    config: AnimationConfig,
}

impl<'a> Animation<'a> {
    /// Fit the axes to every frame of `scatter`'s trajectories.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(scatter: AnimatedScatter<'a>, config: AnimationConfig) -> Result<Self> {
        config.validate()?;

        let trajectories = scatter.trajectories();
        let skipped = trajectories.non_finite_count();
        if skipped > 0 {
            warn!("{skipped} positions have non-finite coordinates and will not be drawn");
        }

        let viewport = Viewport::fit(
            &trajectories.axis_values(0),
            &trajectories.axis_values(1),
            config.plot_area(),
            config.padding,
        )?;

        Ok(Self { scatter, viewport, config })
    }

    /// Number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.scatter.frame_count()
    }

    /// Delay between frames.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.config.interval()
    }

    /// The configuration the animation was built with.
    #[must_use]
    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Data-to-pixel mapping shared by all frames.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The layers and their current offsets.
    #[must_use]
    pub const fn scatter(&self) -> &AnimatedScatter<'a> {
        &self.scatter
    }

    /// Timing and size summary.
    #[must_use]
    pub fn info(&self) -> AnimationInfo {
        AnimationInfo {
            frame_count: self.frame_count(),
            interval: self.interval(),
            width: self.config.width,
            height: self.config.height,
            loop_count: self.config.loop_count,
        }
    }

    /// Advance the layers to `frame` and rasterize it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameOutOfRange`] for a frame past the end.
    pub fn render_frame(&mut self, frame: usize) -> Result<Framebuffer> {
        self.scatter.update(frame)?;

        let mut fb = Framebuffer::new(self.config.width, self.config.height)?;
        fb.clear(self.config.background);
        if self.config.draw_axes {
            draw_rect_outline(&mut fb, self.viewport.plot_area(), self.config.axis_color, 1);
        }
        self.scatter.draw(&mut fb, &self.viewport, self.config.marker_size);
        Ok(fb)
    }

    /// Iterate over every frame in order.
    pub fn frames(&mut self) -> Frames<'_, 'a> {
        Frames { animation: self, next: 0 }
    }

    /// Push every frame, in order, into `sink`.
    ///
    /// # Errors
    ///
    /// Returns the first error from rendering or from the sink.
    pub fn play<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        sink.begin(&self.info())?;
        for index in 0..self.frame_count() {
            let frame = self.render_frame(index)?;
            sink.present(index, &frame)?;
        }
        sink.finish()
    }

    /// Write the animation to `path` as an animated PNG.
    ///
    /// The file is written next to `path` under a temporary name and renamed
    /// into place, so a failed save leaves no partial file and an existing
    /// file is replaced only on success. A replaced file keeps its
    /// permissions; a new file gets the same permissions as any file created
    /// by the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is not writable or encoding fails.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = temp_file_in(dir)?;
        if let Ok(existing) = fs::metadata(path) {
            tmp.as_file().set_permissions(existing.permissions())?;
        }
        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            self.play(&mut ApngWriter::new(&mut out))?;
            out.flush()?;
        }
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        let bytes = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        info!("saved {} frames to {} ({bytes} bytes)", self.frame_count(), path.display());
        Ok(())
    }

    /// Write a single frame to `path` as a still PNG.
    ///
    /// # Errors
    ///
    /// Returns an error for a frame past the end or if writing fails.
    pub fn save_frame<P: AsRef<Path>>(&mut self, frame: usize, path: P) -> Result<()> {
        let fb = self.render_frame(frame)?;
        PngEncoder::write_to_file(&fb, path)
    }
}

/// Temporary file in `dir` created with the default file mode (0666 less the
/// umask) instead of tempfile's owner-only 0600.
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    #[allow(unused_mut)]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Iterator over the frames of an [`Animation`], created by
/// [`Animation::frames`].
#[derive(Debug)]
pub struct Frames<'s, 'a> {
    animation: &'s mut Animation<'a>,
    next: usize,
}

impl Iterator for Frames<'_, '_> {
    type Item = Result<Framebuffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.animation.frame_count() {
            return None;
        }
        let frame = self.animation.render_frame(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.animation.frame_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_, '_> {}
