//! Animated PNG output.
//!
//! Writes one APNG frame per presented framebuffer. The frame delay and loop
//! count come from the [`AnimationInfo`] given to [`FrameSink::begin`].

use std::io::Write;
use std::mem;

use crate::animation::{AnimationInfo, FrameSink};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;

enum State<W: Write> {
    Ready(W),
    Writing { writer: png::Writer<W>, width: u32, height: u32 },
    Done,
}

/// Frame-by-frame APNG writer.
pub struct ApngWriter<W: Write> {
    state: State<W>,
}

impl<W: Write> ApngWriter<W> {
    /// Create a writer over `out`. Nothing is written until the first frame
    /// sequence begins.
    pub fn new(out: W) -> Self {
        Self { state: State::Ready(out) }
    }
}

impl<W: Write> FrameSink for ApngWriter<W> {
    fn begin(&mut self, info: &AnimationInfo) -> Result<()> {
        let State::Ready(out) = mem::replace(&mut self.state, State::Done) else {
            return Err(Error::Rendering("APNG writer already started".to_string()));
        };
        let frames = u32::try_from(info.frame_count)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(Error::EmptyData)?;
        let delay_ms = u16::try_from(info.interval.as_millis()).map_err(|_| {
            Error::InvalidConfig(format!("frame delay {:?} does not fit APNG", info.interval))
        })?;

        let mut encoder = png::Encoder::new(out, info.width, info.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_animated(frames, info.loop_count)?;
        encoder.set_frame_delay(delay_ms, 1000)?;

        let writer = encoder.write_header()?;
        self.state = State::Writing { writer, width: info.width, height: info.height };
        Ok(())
    }

    fn present(&mut self, _index: usize, frame: &Framebuffer) -> Result<()> {
        let State::Writing { writer, width, height } = &mut self.state else {
            return Err(Error::Rendering("APNG writer is not accepting frames".to_string()));
        };
        if frame.width() != *width || frame.height() != *height {
            return Err(Error::InvalidDimensions { width: frame.width(), height: frame.height() });
        }

        writer.write_image_data(&frame.to_compact_pixels())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, State::Done) {
            State::Writing { writer, .. } => {
                writer.finish()?;
                Ok(())
            }
            _ => Err(Error::Rendering("APNG writer finished before it started".to_string())),
        }
    }
}
