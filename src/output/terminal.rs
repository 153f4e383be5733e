//! Terminal output (ASCII and ANSI true color).
//!
//! [`TerminalEncoder`] turns a framebuffer into text; [`TerminalPlayer`] is a
//! [`FrameSink`] that redraws the terminal once per frame, waiting the frame
//! interval in between.

use std::fmt::Write as FmtWrite;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::animation::{AnimationInfo, FrameSink};
use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Unicode upper-half blocks with 24-bit foreground and background,
    /// two pixel rows per line
    #[default]
    UnicodeHalfBlock,
}

/// Framebuffer-to-text encoder.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: u32,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// ASCII grayscale ramp from dark to light (10 levels).
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Monospace cells are about twice as tall as they are wide.
    const CELL_ASPECT: f32 = 2.0;

    /// Create an encoder 80 columns wide.
    #[must_use]
    pub fn new() -> Self {
        Self { mode: TerminalMode::default(), width: 80 }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the output width in columns.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width.max(1);
        self
    }

    /// Render a framebuffer to a string, one line per text row.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        let cols = self.width.min(fb.width());
        let sx = fb.width() as f32 / cols as f32;
        // Each text row covers CELL_ASPECT columns' worth of pixels
        let rows = ((fb.height() as f32 / (sx * Self::CELL_ASPECT)).round() as u32).max(1);
        let sy = fb.height() as f32 / rows as f32;
        let sample = |col: u32, y: f32| sample(fb, col as f32 * sx, y);

        let mut out = String::new();
        for row in 0..rows {
            for col in 0..cols {
                match self.mode {
                    TerminalMode::Ascii => {
                        out.push(Self::ramp(sample(col, row as f32 * sy)));
                    }
                    TerminalMode::UnicodeHalfBlock => {
                        let top = sample(col, row as f32 * sy);
                        let bottom = sample(col, (row as f32 + 0.5) * sy);
                        let _ = write!(
                            out,
                            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                            top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                        );
                    }
                }
            }
            if self.mode == TerminalMode::UnicodeHalfBlock {
                out.push_str("\x1b[0m");
            }
            out.push('\n');
        }
        out
    }

    /// Rec. 709 luminance mapped onto the ASCII ramp.
    fn ramp(color: Rgba) -> char {
        let luma = 0.2126 * f32::from(color.r)
            + 0.7152 * f32::from(color.g)
            + 0.0722 * f32::from(color.b);
        let last = Self::ASCII_RAMP.len() - 1;
        let idx = ((luma / 255.0) * last as f32).round() as usize;
        Self::ASCII_RAMP[idx.min(last)]
    }
}

fn sample(fb: &Framebuffer, x: f32, y: f32) -> Rgba {
    let x = (x as u32).min(fb.width() - 1);
    let y = (y as u32).min(fb.height() - 1);
    fb.get_pixel(x, y).unwrap_or(Rgba::BLACK)
}

/// Plays an animation in a terminal.
///
/// Each frame moves the cursor home and overwrites the previous one.
pub struct TerminalPlayer<W: Write> {
    encoder: TerminalEncoder,
    out: W,
    interval: Duration,
    pace: bool,
}

impl TerminalPlayer<io::Stdout> {
    /// Player writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPlayer<W> {
    /// Player writing to `out`.
    pub fn new(out: W) -> Self {
        Self { encoder: TerminalEncoder::new(), out, interval: Duration::ZERO, pace: true }
    }

    /// Use a custom encoder.
    #[must_use]
    pub fn encoder(mut self, encoder: TerminalEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Wait the frame interval between frames (on by default).
    #[must_use]
    pub fn pace(mut self, pace: bool) -> Self {
        self.pace = pace;
        self
    }

    /// Consume the player and return the output.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TerminalPlayer<W> {
    fn begin(&mut self, info: &AnimationInfo) -> Result<()> {
        self.interval = info.interval;
        // Clear screen
        self.out.write_all(b"\x1b[2J")?;
        Ok(())
    }

    fn present(&mut self, index: usize, frame: &Framebuffer) -> Result<()> {
        if self.pace && index > 0 {
            thread::sleep(self.interval);
        }
        write!(self.out, "\x1b[H{}", self.encoder.render(frame))?;
        self.out.flush()?;
        Ok(())
    }
}
